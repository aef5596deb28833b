//! Shared normalization, rounding, and range-disposition machinery.
//!
//! Every arithmetic kernel funnels its result through the same tail:
//! 1. **Working form:** a `u64` mantissa with the hidden bit at the working
//!    position (`imant`), guard/round bits below the stored-mantissa field,
//!    and sticky state folded into the lowest bit.
//! 2. **Rounding:** one of the four modes, ties-to-even in nearest mode.
//! 3. **Range disposition:** overflow and underflow handling, including the
//!    flag-versus-trap duality. A condition whose trap-enable bit is set
//!    returns its outcome with an exponent-wrapped result; otherwise the
//!    sticky flag is set and a well-defined substitute is produced.
//!
//! Tininess is decided after a speculative rounding increment: a value whose
//! rounded mantissa carries into the minimum-normal encoding is not tiny.
//! Underflow escape paths are early-returning helpers, not shared labels.

use crate::arch::format::Layout;
use crate::arch::status::{self, Condition, RoundingMode};
use crate::common::outcome::Outcome;

/// Right shift with the shifted-out bits folded into the lowest kept bit.
///
/// Past 63 bits the whole value collapses to one sticky bit; this is the
/// format threshold that caps alignment shifts.
#[inline]
pub fn rshift_rnd(a: u64, d: i32) -> u64 {
    if d <= 0 {
        a
    } else if d >= 64 {
        u64::from(a != 0)
    } else {
        (a >> d) | u64::from(a & ((1_u64 << d) - 1) != 0)
    }
}

/// Brings a denormal's stored mantissa into implicit-leading-1 form.
///
/// Returns the mantissa with the hidden bit at `mant_bits` and writes the
/// normalized-equivalent biased exponent (`1 - shift`) through `exp`.
#[inline]
pub fn normalize_subnormal(l: &Layout, exp: &mut i32, mant: u64) -> u64 {
    debug_assert!(mant != 0);
    let shift = l.mant_bits as i32 - (63 - mant.leading_zeros() as i32);
    *exp = 1 - shift;
    mant << shift
}

/// The rounding increment added below the stored mantissa.
#[inline]
fn rounding_addend(rm: RoundingMode, sign: u32, rnd_size: u32) -> u64 {
    match rm {
        RoundingMode::Nearest => 1_u64 << (rnd_size - 1),
        RoundingMode::TowardZero => 0,
        RoundingMode::TowardPositive => {
            if sign == 0 {
                (1_u64 << rnd_size) - 1
            } else {
                0
            }
        }
        RoundingMode::TowardNegative => {
            if sign == 1 {
                (1_u64 << rnd_size) - 1
            } else {
                0
            }
        }
    }
}

/// Sign an exact zero result takes in the given rounding mode.
#[inline]
pub fn zero_sign(rm: RoundingMode) -> u32 {
    u32::from(rm == RoundingMode::TowardNegative)
}

/// Applies the flag-versus-trap duality for a single condition.
///
/// Trap enabled: returns `outcome`. Disabled: sets the sticky flag and
/// reports `NONE`; the caller has already written the substitute value.
#[inline]
pub fn raise(sw: &mut u32, cond: Condition, outcome: Outcome) -> Outcome {
    if status::trap_enabled(*sw, cond) {
        outcome
    } else {
        status::set_sticky(sw, cond);
        Outcome::NONE
    }
}

/// Outcome for a trapped overflow/underflow, folding in the inexact residue.
fn trapped_outcome(sw: &mut u32, cond_outcome: Outcome, inexact: bool) -> Outcome {
    if inexact {
        if status::trap_enabled(*sw, Condition::Inexact) {
            cond_outcome | Outcome::INEXACT
        } else {
            status::set_sticky(sw, Condition::Inexact);
            cond_outcome
        }
    } else {
        cond_outcome
    }
}

/// Outcome for an in-range result whose rounding was inexact.
pub(crate) fn inexact_outcome(sw: &mut u32) -> Outcome {
    if status::trap_enabled(*sw, Condition::Inexact) {
        Outcome::INEXACT
    } else {
        status::set_sticky(sw, Condition::Inexact);
        Outcome::NONE
    }
}

/// The untrapped-overflow substitute: the round-mode-correct extreme.
pub(crate) fn overflow_substitute(l: &Layout, rm: RoundingMode, sign: u32) -> u64 {
    match rm {
        RoundingMode::Nearest => l.infinity(sign),
        RoundingMode::TowardZero => l.max_finite(sign),
        RoundingMode::TowardPositive => {
            if sign == 0 {
                l.infinity(0)
            } else {
                l.max_finite(1)
            }
        }
        RoundingMode::TowardNegative => {
            if sign == 1 {
                l.infinity(1)
            } else {
                l.max_finite(0)
            }
        }
    }
}

/// Gradual-underflow tail: denormalize, round, and classify.
pub(crate) fn finish_underflow(
    l: &Layout,
    sign: u32,
    exp: i32,
    mant: u64,
    tiny: bool,
    sw: &mut u32,
) -> (u64, Outcome) {
    let rm = status::rounding_mode(*sw);
    let rnd_size = l.rnd_bits();
    let rnd_mask = (1_u64 << rnd_size) - 1;
    let addend = rounding_addend(rm, sign, rnd_size);

    let mant = rshift_rnd(mant, 1 - exp);
    let rnd = mant & rnd_mask;
    let mut m = (mant + addend) >> rnd_size;
    if rm == RoundingMode::Nearest && rnd == 1_u64 << (rnd_size - 1) {
        m &= !1;
    }

    // m <= 2^mant_bits here: the hidden bit set means the increment pushed
    // the value back up to the minimum normal.
    let exp_field = (m >> l.mant_bits) as i32;
    let bits = l.pack(sign, exp_field, m);

    if rnd == 0 {
        return (bits, Outcome::NONE);
    }
    if tiny {
        status::set_sticky(sw, Condition::Underflow);
    }
    (bits, inexact_outcome(sw))
}

/// Rounds a normalized working mantissa and disposes of the range ends.
///
/// `mant` must be normalized (`2^imant <= mant < 2^(imant+1)`) with all
/// sticky state already folded into its low bits; `exp` is the biased
/// exponent of that working form. Always produces result bits — a defined
/// substitute even when the outcome reports a trapped condition.
pub fn round_and_finish(
    l: &Layout,
    sign: u32,
    exp: i32,
    mant: u64,
    sw: &mut u32,
) -> (u64, Outcome) {
    debug_assert!(mant >> l.imant == 1, "working mantissa not normalized");

    let rm = status::rounding_mode(*sw);
    let rnd_size = l.rnd_bits();
    let rnd_mask = (1_u64 << rnd_size) - 1;
    let addend = rounding_addend(rm, sign, rnd_size);

    let mut exp = exp;
    let mut trapped_uf = false;
    if exp <= 0 {
        let tiny = exp < 0 || (mant + addend) < (1_u64 << (l.imant + 1));
        if tiny && status::trap_enabled(*sw, Condition::Underflow) {
            // Deliver the exponent-wrapped result and trap.
            exp += l.wrap;
            trapped_uf = true;
        } else {
            return finish_underflow(l, sign, exp, mant, tiny, sw);
        }
    }

    let rnd = mant & rnd_mask;
    let inexact = rnd != 0;
    let mut m = (mant + addend) >> rnd_size;
    if rm == RoundingMode::Nearest && rnd == 1_u64 << (rnd_size - 1) {
        m &= !1;
    }
    if m >> (l.mant_bits + 1) != 0 {
        m >>= 1;
        exp += 1;
    }

    if trapped_uf {
        let bits = l.pack(sign, exp, m);
        return (bits, trapped_outcome(sw, Outcome::UNDERFLOW, inexact));
    }

    if exp >= l.exp_max {
        if status::trap_enabled(*sw, Condition::Overflow) {
            let bits = l.pack(sign, exp - l.wrap, m);
            return (bits, trapped_outcome(sw, Outcome::OVERFLOW, inexact));
        }
        // Untrapped overflow substitutes the round-mode-correct extreme and
        // is always inexact.
        let bits = overflow_substitute(l, rm, sign);
        status::set_sticky(sw, Condition::Overflow);
        return (bits, inexact_outcome(sw));
    }

    let bits = l.pack(sign, exp, m);
    if inexact {
        return (bits, inexact_outcome(sw));
    }
    (bits, Outcome::NONE)
}
