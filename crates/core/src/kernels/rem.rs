//! IEEE remainder.

use super::{invalid_default, propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::common::outcome::Outcome;

use super::round;

/// IEEE remainder: `a - b * n` with `n` the integer quotient rounded to
/// nearest, half-ties to the even quotient.
///
/// Repeated conditional-subtract reduction, one exponent step per
/// iteration, tracking only the quotient's final parity. The result is
/// always exact and independent of the rounding mode; an exact zero takes
/// the dividend's sign.
pub fn rem(l: &Layout, a: u64, b: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    if l.is_nan(a) || l.is_nan(b) {
        let (r, o) = propagate_nan2(l, a, b, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) || l.is_zero(b) {
        let (r, o) = invalid_default(l, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(b) || l.is_zero(a) {
        *dst = a;
        return Outcome::NONE;
    }

    let a_sign = l.sign(a);
    let (mut ae, mut be) = (0_i32, 0_i32);
    let am = significand(l, a, &mut ae);
    let bm = significand(l, b, &mut be);
    let e_diff = ae - be;

    if e_diff < 0 {
        // |a| < |b|: the quotient is 0 or +/-1. Only at |a| > |b|/2 does it
        // round away from zero; the exact |b|/2 tie keeps the even quotient 0.
        if e_diff == -1 && am > bm {
            let r = 2 * bm - am;
            let msb = 63 - r.leading_zeros() as i32;
            let exp = ae + msb - l.mant_bits as i32;
            let mant = r << (l.imant as i32 - msb);
            let (bits, outcome) = round::round_and_finish(l, a_sign ^ 1, exp, mant, sw);
            *dst = bits;
            return outcome;
        }
        *dst = a;
        return Outcome::NONE;
    }

    let mut r = am;
    let mut parity = 0_u32;
    if r >= bm {
        r -= bm;
        parity = 1;
    }
    for _ in 0..e_diff {
        r <<= 1;
        parity = 0;
        if r >= bm {
            r -= bm;
            parity = 1;
        }
    }

    // Nearest-quotient correction against |b|/2; the exact half tie is
    // resolved by quotient parity.
    let mut sign = a_sign;
    if 2 * r > bm || (2 * r == bm && parity == 1) {
        r = bm - r;
        sign ^= 1;
    }
    if r == 0 {
        *dst = l.zero(a_sign);
        return Outcome::NONE;
    }

    let msb = 63 - r.leading_zeros() as i32;
    let exp = be + msb - l.mant_bits as i32;
    let mant = r << (l.imant as i32 - msb);
    let (bits, outcome) = round::round_and_finish(l, sign, exp, mant, sw);
    *dst = bits;
    outcome
}
