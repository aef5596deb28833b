//! Format conversions.
//!
//! Four families, all sharing the rounding tail or the integer-rounding
//! helper below:
//! 1. float -> float across precisions (widening is exact, narrowing runs
//!    the full rounding pipeline),
//! 2. fixed -> float from signed and unsigned 32/64-bit sources,
//! 3. float -> fixed to signed and unsigned 32/64-bit destinations, in the
//!    current rounding mode or the truncating form,
//! 4. round-to-integral within a floating format.
//!
//! Out-of-range float -> fixed conversions (NaN and infinity included)
//! raise INVALID and substitute the destination extreme of matching sign.

use super::{propagate_nan2, significand};
use crate::arch::format::Layout;
use crate::arch::status::{self, Condition, RoundingMode};
use crate::common::outcome::Outcome;

use super::round::{self, rshift_rnd};

/// Converts between floating formats.
pub fn cnv_ff(src: &Layout, dst_fmt: &Layout, a: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    let sign = src.sign(a);
    if src.is_nan(a) {
        let outcome = if src.is_signaling(a) {
            round::raise(sw, Condition::Invalid, Outcome::INVALID)
        } else {
            Outcome::NONE
        };
        // Carry the payload across, left-aligned, and force it quiet.
        let payload = src.mantissa(a);
        let shifted = if dst_fmt.mant_bits >= src.mant_bits {
            payload << (dst_fmt.mant_bits - src.mant_bits)
        } else {
            payload >> (src.mant_bits - dst_fmt.mant_bits)
        };
        *dst = dst_fmt.quieted(dst_fmt.pack(sign, dst_fmt.exp_max, shifted));
        return outcome;
    }
    if src.is_infinity(a) {
        *dst = dst_fmt.infinity(sign);
        return Outcome::NONE;
    }
    if src.is_zero(a) {
        *dst = dst_fmt.zero(sign);
        return Outcome::NONE;
    }

    let mut e = 0_i32;
    let m = significand(src, a, &mut e);
    let shift = src.mant_bits as i32 - dst_fmt.imant as i32;
    let mant = if shift >= 0 {
        rshift_rnd(m, shift)
    } else {
        m << -shift
    };
    let exp = e - src.bias + dst_fmt.bias;

    let (bits, outcome) = round::round_and_finish(dst_fmt, sign, exp, mant, sw);
    *dst = bits;
    outcome
}

/// Converts a fixed-point source to floating.
///
/// 32-bit sources arrive sign- or zero-extended to 64 bits; the conversion
/// to single precision can be inexact.
pub fn fixed_to_float(l: &Layout, v: u64, signed: bool, dst: &mut u64, sw: &mut u32) -> Outcome {
    let (sign, mag) = if signed && (v as i64) < 0 {
        (1, (v as i64).unsigned_abs())
    } else {
        (0, v)
    };
    if mag == 0 {
        *dst = l.zero(0);
        return Outcome::NONE;
    }

    let msb = 63 - mag.leading_zeros() as i32;
    let imant = l.imant as i32;
    let mant = if msb > imant {
        rshift_rnd(mag, msb - imant)
    } else {
        mag << (imant - msb)
    };
    let exp = l.bias + msb;

    let (bits, outcome) = round::round_and_finish(l, sign, exp, mant, sw);
    *dst = bits;
    outcome
}

/// Rounds a significand to an integer magnitude with eight guard bits.
///
/// Returns the whole part and whether fraction bits were discarded.
/// `frac_bits` is the fraction width within `m` and must be positive.
fn round_magnitude(m: u64, frac_bits: i32, rm: RoundingMode, sign: u32) -> (u64, bool) {
    let x = if frac_bits > 8 {
        rshift_rnd(m, frac_bits - 8)
    } else {
        m << (8 - frac_bits)
    };
    let addend: u64 = match rm {
        RoundingMode::Nearest => 0x80,
        RoundingMode::TowardZero => 0,
        RoundingMode::TowardPositive => {
            if sign == 0 {
                0xFF
            } else {
                0
            }
        }
        RoundingMode::TowardNegative => {
            if sign == 1 {
                0xFF
            } else {
                0
            }
        }
    };
    let frac = x & 0xFF;
    let mut whole = (x + addend) >> 8;
    if rm == RoundingMode::Nearest && frac == 0x80 {
        whole &= !1;
    }
    (whole, frac != 0)
}

/// Converts floating to fixed.
///
/// `width` is the destination width in bits (32 or 64); a 32-bit result is
/// returned sign-extended so its low word is the destination value.
/// `truncate` forces round-toward-zero regardless of the status word.
pub fn float_to_fixed(
    l: &Layout,
    a: u64,
    signed: bool,
    width: u32,
    truncate: bool,
    dst: &mut u64,
    sw: &mut u32,
) -> Outcome {
    debug_assert!(width == 32 || width == 64);
    let sign = l.sign(a);
    let extreme = |sign: u32| -> u64 {
        if signed {
            if sign == 0 {
                (1_u64 << (width - 1)) - 1
            } else {
                ((1_u64 << (width - 1)) as i64).wrapping_neg() as u64
            }
        } else if sign == 0 {
            if width == 64 { u64::MAX } else { u32::MAX.into() }
        } else {
            0
        }
    };

    if l.is_nan(a) || l.is_infinity(a) {
        // NaN counts as positive for the substitute.
        let s = if l.is_nan(a) { 0 } else { sign };
        *dst = extreme(s);
        return round::raise(sw, Condition::Invalid, Outcome::INVALID);
    }
    if l.is_zero(a) {
        *dst = 0;
        return Outcome::NONE;
    }

    let mut e = 0_i32;
    let m = significand(l, a, &mut e);
    let t = e - l.bias;
    if t >= 64 {
        *dst = extreme(sign);
        return round::raise(sw, Condition::Invalid, Outcome::INVALID);
    }

    let rm = if truncate {
        RoundingMode::TowardZero
    } else {
        status::rounding_mode(*sw)
    };
    let frac_bits = l.mant_bits as i32 - t;
    let (whole, inexact) = if frac_bits <= 0 {
        (m << -frac_bits, false)
    } else {
        round_magnitude(m, frac_bits, rm, sign)
    };

    let in_range = if signed {
        if sign == 0 {
            whole <= (1_u64 << (width - 1)) - 1
        } else {
            whole <= 1_u64 << (width - 1)
        }
    } else if sign == 1 {
        whole == 0
    } else {
        width == 64 || whole <= u64::from(u32::MAX)
    };
    if !in_range {
        *dst = extreme(sign);
        return round::raise(sw, Condition::Invalid, Outcome::INVALID);
    }

    *dst = if sign == 1 {
        (whole as i64).wrapping_neg() as u64
    } else {
        whole
    };
    if inexact {
        return round::raise(sw, Condition::Inexact, Outcome::INEXACT);
    }
    Outcome::NONE
}

/// Rounds to an integral value within the floating format.
pub fn round_to_int(l: &Layout, a: u64, dst: &mut u64, sw: &mut u32) -> Outcome {
    if l.is_nan(a) {
        let (r, o) = propagate_nan2(l, a, a, sw);
        *dst = r;
        return o;
    }
    if l.is_zero(a) || l.is_infinity(a) {
        *dst = a;
        return Outcome::NONE;
    }

    let sign = l.sign(a);
    let mut e = 0_i32;
    let m = significand(l, a, &mut e);
    let t = e - l.bias;
    if t >= l.mant_bits as i32 {
        // Already integral.
        *dst = a;
        return Outcome::NONE;
    }

    let rm = status::rounding_mode(*sw);
    let (whole, inexact) = round_magnitude(m, l.mant_bits as i32 - t, rm, sign);
    if whole == 0 {
        *dst = l.zero(sign);
    } else {
        let msb = 63 - whole.leading_zeros() as i32;
        let mant = whole << (l.imant as i32 - msb);
        let (bits, _) = round::round_and_finish(l, sign, l.bias + msb, mant, sw);
        *dst = bits;
    }
    if inexact {
        return round::raise(sw, Condition::Inexact, Outcome::INEXACT);
    }
    Outcome::NONE
}
