//! Addition and subtraction.

use super::{propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::arch::status;
use crate::common::outcome::Outcome;

use super::invalid_default;
use super::round::{self, rshift_rnd};

/// Floating-point addition.
///
/// The smaller-magnitude operand is aligned by a sticky-collapsing right
/// shift, the significands are added or subtracted per the operand signs,
/// and the result is renormalized and rounded once.
pub fn add(l: &Layout, a: u64, b: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    if l.is_nan(a) || l.is_nan(b) {
        let (r, o) = propagate_nan2(l, a, b, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) && l.is_infinity(b) && l.sign(a) != l.sign(b) {
        let (r, o) = invalid_default(l, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) {
        *dst = a;
        return Outcome::NONE;
    }
    if l.is_infinity(b) {
        *dst = b;
        return Outcome::NONE;
    }

    // Order by magnitude so a subtraction never borrows and the result sign
    // comes from the dominant operand.
    let (x, y) = if l.magnitude(a) >= l.magnitude(b) {
        (a, b)
    } else {
        (b, a)
    };
    let (xs, ys) = (l.sign(x), l.sign(y));
    let rm = status::rounding_mode(*sw);

    if l.is_zero(y) {
        if l.is_zero(x) {
            let sign = if xs == ys { xs } else { round::zero_sign(rm) };
            *dst = l.zero(sign);
        } else {
            *dst = x;
        }
        return Outcome::NONE;
    }

    let (mut xe, mut ye) = (0_i32, 0_i32);
    let xm = significand(l, x, &mut xe) << l.rnd_bits();
    let ym = significand(l, y, &mut ye) << l.rnd_bits();
    let ym = rshift_rnd(ym, xe - ye);

    let mut mant = if xs == ys { xm + ym } else { xm - ym };
    if mant == 0 {
        // Exact cancellation; the zero sign follows the rounding mode.
        *dst = l.zero(round::zero_sign(rm));
        return Outcome::NONE;
    }

    let msb = 63 - mant.leading_zeros() as i32;
    let mut exp = xe;
    let imant = l.imant as i32;
    if msb > imant {
        mant = rshift_rnd(mant, msb - imant);
        exp += msb - imant;
    } else {
        mant <<= imant - msb;
        exp -= imant - msb;
    }

    let (bits, outcome) = round::round_and_finish(l, xs, exp, mant, sw);
    *dst = bits;
    outcome
}

/// Floating-point subtraction: addition with the second sign flipped.
pub fn sub(l: &Layout, a: u64, b: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    add(l, a, l.negate(b), dst, sw)
}
