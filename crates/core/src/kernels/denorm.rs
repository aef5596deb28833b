//! Unwrapping of trapped exponent-wrapped results.
//!
//! A kernel that overflows or underflows with the matching trap enabled
//! delivers an exponent-wrapped result (bias adjusted by the format's wrap
//! constant) and leaves the real disposition to the exception-queue
//! decoder. When the decoder finds the trap has since been disabled, it
//! rewrites the captured destination with the untrapped substitute: a
//! gradually denormalized value for underflow, the round-mode-correct
//! extreme for overflow. The inexact residue is re-raised or made sticky
//! through the usual duality.

use crate::arch::format::Layout;
use crate::arch::status::{self, Condition};
use crate::common::outcome::Outcome;

use super::round;

/// Rewrites a wrapped underflow result as its gradually denormalized value.
///
/// Returns the substitute bits and the inexact disposition (`NONE` or
/// `INEXACT` when that trap is enabled).
pub fn unwrap_underflow(l: &Layout, wrapped: u64, sw: &mut u32) -> (u64, Outcome) {
    let sign = l.sign(wrapped);
    let mut exp = l.exponent(wrapped) - l.wrap;
    if exp > 0 {
        // The wrapped exponent field carried modulo the field width.
        exp -= 1 << l.exp_bits;
    }
    let mant = (l.mantissa(wrapped) | (1_u64 << l.mant_bits)) << l.rnd_bits();
    round::finish_underflow(l, sign, exp, mant, true, sw)
}

/// Rewrites a wrapped overflow result as the untrapped substitute.
///
/// The wrapped mantissa no longer matters: the substitute depends only on
/// the sign and rounding mode. Sticky overflow is set; the returned outcome
/// carries the inexact disposition.
pub fn unwrap_overflow(l: &Layout, wrapped: u64, sw: &mut u32) -> (u64, Outcome) {
    let sign = l.sign(wrapped);
    let rm = status::rounding_mode(*sw);
    let bits = round::overflow_substitute(l, rm, sign);
    status::set_sticky(sw, Condition::Overflow);
    (bits, round::inexact_outcome(sw))
}
