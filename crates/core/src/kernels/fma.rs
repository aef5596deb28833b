//! Fused multiply-add.

use super::{invalid_default, propagate_nan3, significand};
use crate::arch::format::Layout;
use crate::arch::status;
use crate::common::outcome::Outcome;
use crate::common::wide::Wide;

use super::round;

/// Fused multiply-add: `a * b + c` with a single rounding.
pub fn fma(l: &Layout, a: u64, b: u64, c: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    fused(l, a, b, c, false, dst, sw)
}

/// Negated fused multiply-add: `-(a * b) + c` with a single rounding.
pub fn fnma(l: &Layout, a: u64, b: u64, c: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    fused(l, a, b, c, true, dst, sw)
}

/// The extended product is aligned against the addend inside a [`Wide`] and
/// summed before the one rounding step; a quiet NaN addend suppresses the
/// Inf * 0 invalid case because NaN propagation is checked first.
fn fused(l: &Layout, a: u64, b: u64, c: u64, neg: bool, dst: &mut u64, sw: &mut u32) -> Outcome {
    if l.is_nan(a) || l.is_nan(b) || l.is_nan(c) {
        let (r, o) = propagate_nan3(l, a, b, c, sw);
        *dst = r;
        return o;
    }

    let ps = l.sign(a) ^ l.sign(b) ^ u32::from(neg);
    let cs = l.sign(c);
    let rm = status::rounding_mode(*sw);

    if (l.is_infinity(a) && l.is_zero(b)) || (l.is_zero(a) && l.is_infinity(b)) {
        let (r, o) = invalid_default(l, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) || l.is_infinity(b) {
        if l.is_infinity(c) && cs != ps {
            let (r, o) = invalid_default(l, sw);
            *dst = r;
            return o;
        }
        *dst = l.infinity(ps);
        return Outcome::NONE;
    }
    if l.is_infinity(c) {
        *dst = c;
        return Outcome::NONE;
    }
    if l.is_zero(a) || l.is_zero(b) {
        if l.is_zero(c) {
            let sign = if ps == cs { cs } else { round::zero_sign(rm) };
            *dst = l.zero(sign);
        } else {
            *dst = c;
        }
        return Outcome::NONE;
    }

    let (mut ae, mut be) = (0_i32, 0_i32);
    let am = significand(l, a, &mut ae);
    let bm = significand(l, b, &mut be);
    let prod = Wide::mul_u64(am, bm);
    let mb = l.mant_bits as i32;
    // Power-of-two scale of the product's bit 0.
    let prod_scale = ae + be - 2 * l.bias - 2 * mb;

    if l.is_zero(c) {
        let pmsb = 127 - prod.leading_zeros() as i32;
        let exp = ae + be - l.bias + pmsb - 2 * mb;
        let mant = prod.fold_to_u64(l.imant);
        let (bits, outcome) = round::round_and_finish(l, ps, exp, mant, sw);
        *dst = bits;
        return outcome;
    }

    let mut ce = 0_i32;
    let cm = significand(l, c, &mut ce);
    let c_scale = ce - l.bias - mb;

    // Bring both onto a common bit-0 scale. The addend shifts left (exact,
    // capped so it stays in range) and whichever operand ends up below bit 0
    // collapses into the sticky position.
    let d = c_scale - prod_scale;
    let (p_w, c_w, scale) = if d >= 0 {
        let up = d.min(64);
        (
            prod.shr_sticky((d - up) as u32),
            Wide::from_u64(cm).shl(up as u32),
            c_scale - up,
        )
    } else {
        (prod, Wide::from_u64(cm).shr_sticky((-d) as u32), prod_scale)
    };

    let (sign, sum) = if ps == cs {
        (ps, p_w.add(c_w))
    } else if p_w.ge(c_w) {
        (ps, p_w.sub(c_w))
    } else {
        (cs, c_w.sub(p_w))
    };
    if sum.is_zero() {
        *dst = l.zero(round::zero_sign(rm));
        return Outcome::NONE;
    }

    let smsb = 127 - sum.leading_zeros() as i32;
    let exp = scale + smsb + l.bias;
    let mant = sum.fold_to_u64(l.imant);
    let (bits, outcome) = round::round_and_finish(l, sign, exp, mant, sw);
    *dst = bits;
    outcome
}
