//! Square root.

use super::{invalid_default, propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::common::outcome::Outcome;
use crate::common::wide::Wide;

use super::round;

/// Floating-point square root.
///
/// The exponent is halved after pre-shifting the significand to make it
/// even, then a conditional-subtract digit recurrence consumes the radicand
/// two bits per iteration, producing one root bit each. The remainder
/// supplies the sticky bit.
pub fn sqrt(l: &Layout, a: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    if l.is_nan(a) {
        let (r, o) = propagate_nan2(l, a, a, sw);
        *dst = r;
        return o;
    }
    if l.is_zero(a) {
        *dst = a;
        return Outcome::NONE;
    }
    if l.sign(a) == 1 {
        let (r, o) = invalid_default(l, sw);
        *dst = r;
        return o;
    }
    if l.is_infinity(a) {
        *dst = a;
        return Outcome::NONE;
    }

    let mut e = 0_i32;
    let m = significand(l, a, &mut e);
    let t = e - l.bias - l.mant_bits as i32;

    // Place the significand in an even-width field with an even remaining
    // exponent, so the exponent halves exactly.
    let field = (l.mant_bits + 3) & !1;
    let mut k = (field - l.mant_bits - 2) as i32;
    if (t - k) & 1 != 0 {
        k += 1;
    }
    let radicand = m << k;
    let half_exp = (t - k) / 2;

    // One root bit per iteration; the root carries the stored mantissa plus
    // guard and round bits, the remainder collapses to sticky.
    let root_bits = l.mant_bits + 3;
    let mut rad = Wide {
        hi: radicand << (64 - field),
        lo: 0,
    };
    let mut rem = 0_u64;
    let mut root = 0_u64;
    for _ in 0..root_bits {
        let pair = rad.shl2_carry();
        rem = (rem << 2) | pair;
        let trial = (root << 2) | 1;
        if rem >= trial {
            rem -= trial;
            root = (root << 1) | 1;
        } else {
            root <<= 1;
        }
    }

    let up = l.imant + 1 - root_bits;
    let mant = (root << up) | u64::from(rem != 0);
    let exp = l.bias - 1 + half_exp + (field as i32) / 2;

    let (bits, outcome) = round::round_and_finish(l, 0, exp, mant, sw);
    *dst = bits;
    outcome
}
