//! Division.

use super::{invalid_default, propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::arch::status::Condition;
use crate::common::outcome::Outcome;

use super::round;

/// Floating-point division.
///
/// Conditional-subtract binary long division: one quotient bit per
/// iteration through the full working precision, with the final remainder
/// jammed into the sticky position.
pub fn div(l: &Layout, a: u64, b: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    let sign = l.sign(a) ^ l.sign(b);

    if l.is_nan(a) || l.is_nan(b) {
        let (r, o) = propagate_nan2(l, a, b, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) {
        if l.is_infinity(b) {
            let (r, o) = invalid_default(l, sw);
            *dst = r;
            return o;
        }
        *dst = l.infinity(sign);
        return Outcome::NONE;
    }
    if l.is_infinity(b) {
        *dst = l.zero(sign);
        return Outcome::NONE;
    }
    if l.is_zero(b) {
        if l.is_zero(a) {
            let (r, o) = invalid_default(l, sw);
            *dst = r;
            return o;
        }
        *dst = l.infinity(sign);
        return round::raise(sw, Condition::DivByZero, Outcome::DIV_BY_ZERO);
    }
    if l.is_zero(a) {
        *dst = l.zero(sign);
        return Outcome::NONE;
    }

    let (mut ae, mut be) = (0_i32, 0_i32);
    let am = significand(l, a, &mut ae);
    let bm = significand(l, b, &mut be);

    // Pre-align so the significand ratio lies in [1, 2); the first
    // iteration then always produces the hidden bit.
    let mut exp = ae - be + l.bias;
    let mut r = am;
    if r < bm {
        r <<= 1;
        exp -= 1;
    }

    let mut q = 0_u64;
    for _ in 0..=l.imant {
        q <<= 1;
        if r >= bm {
            r -= bm;
            q |= 1;
        }
        r <<= 1;
    }
    q |= u64::from(r != 0);

    let (bits, outcome) = round::round_and_finish(l, sign, exp, q, sw);
    *dst = bits;
    outcome
}
