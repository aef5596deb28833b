//! Floating-point format layouts and field accessors.
//!
//! This module defines the storage formats the register file serializes:
//! 1. **Format selection:** the 2-bit format field decoded from instructions.
//! 2. **Layouts:** [`SINGLE`] (1+8+23 bits, one word) and [`DOUBLE`]
//!    (1+11+52 bits, two words `p1` upper / `p2` lower, handled as one
//!    assembled `u64`). Accessors are width-generic over a `u64` holding the
//!    value in its low bits.
//! 3. **Quad precision:** stub type definitions only; no arithmetic exists.
//!
//! Normalized values carry an implicit hidden bit that is never stored.
//! NaNs use the mantissa MSB as the quiet bit: set means quiet, clear with a
//! nonzero payload means signaling. Every accessor is built from the
//! [`bits`](crate::common::bits) primitives.

use crate::common::bits::{deposit, extract, mask};

/// Floating-point operand format selected by an instruction's format field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// 32-bit single precision.
    Single,
    /// 64-bit double precision (two register-file words).
    Double,
    /// 128-bit quad precision; decodes but has no implemented operations.
    Quad,
}

impl Format {
    /// Decodes the 2-bit format field. Encoding 2 is reserved.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & 0x3 {
            0 => Some(Self::Single),
            1 => Some(Self::Double),
            3 => Some(Self::Quad),
            _ => None,
        }
    }
}

/// Fixed-point operand width for the conversion kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedFormat {
    /// 32-bit fixed, one register-file word.
    Word,
    /// 64-bit fixed, two register-file words.
    DoubleWord,
}

impl FixedFormat {
    /// Decodes the 2-bit format field as a fixed-point width.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & 0x3 {
            0 => Some(Self::Word),
            1 => Some(Self::DoubleWord),
            _ => None,
        }
    }
}

/// Field layout of one floating-point storage format.
///
/// Values travel through the kernels as `u64` bit patterns occupying the low
/// `total_bits` of the word; the accessors below are the only place the
/// sign/exponent/mantissa split is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Stored mantissa width (hidden bit not included).
    pub mant_bits: u32,
    /// Exponent field width.
    pub exp_bits: u32,
    /// Exponent bias.
    pub bias: i32,
    /// All-ones exponent encoding (infinity and NaN).
    pub exp_max: i32,
    /// Exponent wrap adjustment delivered with a trapped overflow/underflow.
    pub wrap: i32,
    /// Hidden-bit position of the working-form mantissa the kernels round.
    pub imant: u32,
}

/// Single-precision layout.
pub const SINGLE: Layout = Layout {
    mant_bits: 23,
    exp_bits: 8,
    bias: 127,
    exp_max: 0xFF,
    wrap: 192,
    imant: 30,
};

/// Double-precision layout.
pub const DOUBLE: Layout = Layout {
    mant_bits: 52,
    exp_bits: 11,
    bias: 1023,
    exp_max: 0x7FF,
    wrap: 1536,
    imant: 62,
};

impl Layout {
    /// Total storage width of the format.
    #[inline]
    pub const fn total_bits(&self) -> u32 {
        1 + self.exp_bits + self.mant_bits
    }

    /// Width of the guard/round/sticky field below the stored mantissa in
    /// working form.
    #[inline]
    pub const fn rnd_bits(&self) -> u32 {
        self.imant - self.mant_bits
    }

    /// MSB position of the sign bit within the 64-bit carrier.
    #[inline]
    const fn off(&self) -> u32 {
        64 - self.total_bits()
    }

    /// Sign bit (0 or 1).
    #[inline]
    pub fn sign(&self, w: u64) -> u32 {
        extract(self.off(), 1, w) as u32
    }

    /// Biased exponent field.
    #[inline]
    pub fn exponent(&self, w: u64) -> i32 {
        extract(self.off() + 1, self.exp_bits, w) as i32
    }

    /// Mantissa field, hidden bit not included.
    #[inline]
    pub fn mantissa(&self, w: u64) -> u64 {
        extract(self.off() + 1 + self.exp_bits, self.mant_bits, w)
    }

    /// Assembles a value from sign, biased exponent, and mantissa fields.
    ///
    /// The exponent is masked to its field width, which gives trapped
    /// overflow/underflow results their architectural modulo behavior.
    pub fn pack(&self, sign: u32, exp: i32, mant: u64) -> u64 {
        let w = deposit(u64::from(sign), self.off(), 1, 0);
        let w = deposit(exp as u64, self.off() + 1, self.exp_bits, w);
        deposit(mant, self.off() + 1 + self.exp_bits, self.mant_bits, w)
    }

    /// The value with its sign bit cleared.
    #[inline]
    pub fn magnitude(&self, w: u64) -> u64 {
        mask(self.off() + 1, self.total_bits() - 1, w)
    }

    /// The value with its sign bit flipped.
    #[inline]
    pub fn negate(&self, w: u64) -> u64 {
        deposit(u64::from(self.sign(w) ^ 1), self.off(), 1, w)
    }

    /// True for +0.0 or -0.0.
    #[inline]
    pub fn is_zero(&self, w: u64) -> bool {
        self.magnitude(w) == 0
    }

    /// True when the exponent is all ones (infinity or NaN).
    #[inline]
    pub fn is_exp_max(&self, w: u64) -> bool {
        self.exponent(w) == self.exp_max
    }

    /// True for +/-infinity.
    #[inline]
    pub fn is_infinity(&self, w: u64) -> bool {
        self.is_exp_max(w) && self.mantissa(w) == 0
    }

    /// True for any NaN.
    #[inline]
    pub fn is_nan(&self, w: u64) -> bool {
        self.is_exp_max(w) && self.mantissa(w) != 0
    }

    /// True for a signaling NaN (quiet bit clear, payload nonzero).
    #[inline]
    pub fn is_signaling(&self, w: u64) -> bool {
        self.is_nan(w) && extract(self.off() + 1 + self.exp_bits, 1, w) == 0
    }

    /// Returns the NaN with its quiet bit set.
    #[inline]
    pub fn quieted(&self, w: u64) -> u64 {
        deposit(1, self.off() + 1 + self.exp_bits, 1, w)
    }

    /// The default quiet NaN produced for invalid operations.
    #[inline]
    pub fn qnan(&self) -> u64 {
        self.pack(0, self.exp_max, 1 << (self.mant_bits - 1))
    }

    /// Infinity of the given sign.
    #[inline]
    pub fn infinity(&self, sign: u32) -> u64 {
        self.pack(sign, self.exp_max, 0)
    }

    /// Largest finite magnitude of the given sign.
    #[inline]
    pub fn max_finite(&self, sign: u32) -> u64 {
        self.pack(sign, self.exp_max - 1, !0)
    }

    /// Zero of the given sign.
    #[inline]
    pub fn zero(&self, sign: u32) -> u64 {
        self.pack(sign, 0, 0)
    }
}

/// Quad-precision stub definitions.
///
/// The instruction set reserves a format encoding for 128-bit operands; the
/// core decodes it but implements no quad arithmetic, so any quad operation
/// reports `UNIMPLEMENTED`. Only the storage shape is defined here.
pub mod quad {
    /// A quad-precision value as its four register-file words, most
    /// significant first.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct QuadWords(pub [u32; 4]);

    /// Exponent field width in bits.
    pub const EXP_BITS: u32 = 15;
    /// Mantissa field width in bits.
    pub const MANT_BITS: u32 = 112;
    /// Exponent bias.
    pub const BIAS: i32 = 16383;
}
