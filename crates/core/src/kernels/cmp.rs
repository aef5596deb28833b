//! Compare.

use crate::arch::format::Layout;
use crate::arch::status::{self, CondCode, Condition};
use crate::common::outcome::Outcome;

use super::round;

/// Floating-point compare.
///
/// Classifies the pair into less/greater/equal/unordered and writes the
/// condition codes plus the C predicate bit into the status word; there is
/// no numeric result. `cond` is the instruction's 5-bit condition field:
/// the low four bits select which classifications make the predicate true
/// (bit 0 less, bit 1 greater, bit 2 equal, bit 3 unordered), bit 4 makes
/// quiet NaNs signal INVALID as well.
pub fn cmp(l: &Layout, a: u64, b: u64, cond: u32, sw: &mut u32) -> Outcome {
    let cc = classify(l, a, b);
    status::set_cond_codes(sw, cc);
    status::set_c_bit(sw, cond & (1 << cc as u32) != 0);

    let signaling = l.is_signaling(a) || l.is_signaling(b);
    let quiet_traps = cond & 0x10 != 0 && cc == CondCode::Unordered;
    if signaling || quiet_traps {
        return round::raise(sw, Condition::Invalid, Outcome::INVALID);
    }
    Outcome::NONE
}

/// Orders two values, treating +0 and -0 as equal.
fn classify(l: &Layout, a: u64, b: u64) -> CondCode {
    if l.is_nan(a) || l.is_nan(b) {
        return CondCode::Unordered;
    }
    if a == b || (l.is_zero(a) && l.is_zero(b)) {
        return CondCode::Equal;
    }
    let (sa, sb) = (l.sign(a), l.sign(b));
    let less = if sa != sb {
        sa == 1
    } else if sa == 0 {
        l.magnitude(a) < l.magnitude(b)
    } else {
        l.magnitude(a) > l.magnitude(b)
    };
    if less {
        CondCode::Less
    } else {
        CondCode::Greater
    }
}
