//! Multiplication.

use super::{invalid_default, propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::common::outcome::Outcome;
use crate::common::wide::Wide;

use super::round;

/// Floating-point multiplication.
///
/// The full double-width significand product is formed in a [`Wide`], then
/// folded back to the working mantissa with everything below the fold
/// collapsed into the sticky bit.
pub fn mul(l: &Layout, a: u64, b: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    let sign = l.sign(a) ^ l.sign(b);

    if l.is_nan(a) || l.is_nan(b) {
        let (r, o) = propagate_nan2(l, a, b, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) || l.is_infinity(b) {
        if l.is_zero(a) || l.is_zero(b) {
            let (r, o) = invalid_default(l, sw);
            *dst = r;
            return o;
        }
        *dst = l.infinity(sign);
        return Outcome::NONE;
    }
    if l.is_zero(a) || l.is_zero(b) {
        *dst = l.zero(sign);
        return Outcome::NONE;
    }

    let (mut ae, mut be) = (0_i32, 0_i32);
    let am = significand(l, a, &mut ae);
    let bm = significand(l, b, &mut be);

    let prod = Wide::mul_u64(am, bm);
    let pmsb = 127 - prod.leading_zeros() as i32;
    let exp = ae + be - l.bias + pmsb - 2 * l.mant_bits as i32;
    let mant = prod.fold_to_u64(l.imant);

    let (bits, outcome) = round::round_and_finish(l, sign, exp, mant, sw);
    *dst = bits;
    outcome
}
