//! Arithmetic kernels.
//!
//! One kernel per emulated operation, each parameterized by a
//! [`Layout`](crate::arch::format::Layout) so the same code serves single
//! and double precision. Every kernel follows the same contract: operands
//! arrive as opaque bit patterns, a defined result is always written through
//! `dst` (a substitute value even on exception), and exactly one
//! [`Outcome`] is returned. The shared special-value cascade lives here;
//! the rounding and range-disposition tail lives in [`round`].

pub mod add;
pub mod cmp;
pub mod cnv;
pub mod denorm;
pub mod div;
pub mod fma;
pub mod mul;
pub mod rem;
pub mod round;
pub mod sqrt;

use crate::arch::format::Layout;
use crate::arch::status::Condition;
use crate::common::outcome::Outcome;

/// Reads a finite operand's significand with the hidden bit at `mant_bits`,
/// writing its normalized-equivalent biased exponent through `exp`.
///
/// The operand must be finite and nonzero.
pub(crate) fn significand(l: &Layout, w: u64, exp: &mut i32) -> u64 {
    *exp = l.exponent(w);
    let mant = l.mantissa(w);
    if *exp == 0 {
        round::normalize_subnormal(l, exp, mant)
    } else {
        mant | (1_u64 << l.mant_bits)
    }
}

/// NaN propagation for a two-operand kernel.
///
/// The result is the first NaN in operand order, quieted. Any signaling
/// operand raises INVALID through the flag-versus-trap duality.
pub(crate) fn propagate_nan2(l: &Layout, a: u64, b: u64, sw: &mut u32) -> (u64, Outcome) {
    let signaling = l.is_signaling(a) || l.is_signaling(b);
    let nan = if l.is_nan(a) { a } else { b };
    let outcome = if signaling {
        round::raise(sw, Condition::Invalid, Outcome::INVALID)
    } else {
        Outcome::NONE
    };
    (l.quieted(nan), outcome)
}

/// NaN propagation for the three-operand fused kernels, same ordering rule.
pub(crate) fn propagate_nan3(l: &Layout, a: u64, b: u64, c: u64, sw: &mut u32) -> (u64, Outcome) {
    let signaling = l.is_signaling(a) || l.is_signaling(b) || l.is_signaling(c);
    let nan = if l.is_nan(a) {
        a
    } else if l.is_nan(b) {
        b
    } else {
        c
    };
    let outcome = if signaling {
        round::raise(sw, Condition::Invalid, Outcome::INVALID)
    } else {
        Outcome::NONE
    };
    (l.quieted(nan), outcome)
}

/// Invalid operation on non-NaN operands: the default quiet NaN.
pub(crate) fn invalid_default(l: &Layout, sw: &mut u32) -> (u64, Outcome) {
    (l.qnan(), round::raise(sw, Condition::Invalid, Outcome::INVALID))
}
