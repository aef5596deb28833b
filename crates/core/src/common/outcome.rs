//! Kernel outcome codes.
//!
//! Every arithmetic kernel reports exactly one outcome: no exception, one of
//! the five IEEE conditions, `UNIMPLEMENTED` for an undecodable instruction
//! form, or one of the two legal composites (`OVERFLOW|INEXACT`,
//! `UNDERFLOW|INEXACT`). The bit assignments match the 6-bit exception-type
//! field the hardware writes into a captured exception slot, so the queue
//! decoder can re-tag a slot with a kernel outcome directly.

use std::fmt;
use std::ops::BitOr;

/// Outcome of one emulated floating-point operation.
///
/// A set over six condition bits; only the values listed on the associated
/// constants (plus the two legal composites) ever appear.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome(u8);

impl Outcome {
    /// Operation completed with no reportable condition.
    pub const NONE: Self = Self(0);
    /// Unrecognized instruction bit pattern; never a numeric condition.
    pub const UNIMPLEMENTED: Self = Self(1 << 0);
    /// Rounding altered the exact result.
    pub const INEXACT: Self = Self(1 << 1);
    /// Result tiny (subnormal range).
    pub const UNDERFLOW: Self = Self(1 << 2);
    /// Result magnitude exceeded the format.
    pub const OVERFLOW: Self = Self(1 << 3);
    /// Finite nonzero dividend over a zero divisor.
    pub const DIV_BY_ZERO: Self = Self(1 << 4);
    /// Mathematically undefined operands.
    pub const INVALID: Self = Self(1 << 5);

    /// Reconstructs an outcome from a captured 6-bit exception-type code.
    ///
    /// Returns `None` for bit patterns that are not a legal outcome; the
    /// queue decoder treats those as fatal.
    pub fn from_bits(bits: u32) -> Option<Self> {
        let v = Self(u8::try_from(bits & 0x3F).ok()?);
        let legal = matches!(
            v,
            Self::NONE
                | Self::UNIMPLEMENTED
                | Self::INEXACT
                | Self::UNDERFLOW
                | Self::OVERFLOW
                | Self::DIV_BY_ZERO
                | Self::INVALID
        ) || v == (Self::OVERFLOW | Self::INEXACT)
            || v == (Self::UNDERFLOW | Self::INEXACT);
        legal.then_some(v)
    }

    /// Raw 6-bit encoding, as stored in an exception slot.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when no condition bits are set.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for Outcome {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "NONE");
        }
        let names = [
            (Self::INVALID, "INVALID"),
            (Self::DIV_BY_ZERO, "DIV_BY_ZERO"),
            (Self::OVERFLOW, "OVERFLOW"),
            (Self::UNDERFLOW, "UNDERFLOW"),
            (Self::INEXACT, "INEXACT"),
            (Self::UNIMPLEMENTED, "UNIMPLEMENTED"),
        ];
        let mut first = true;
        for (bit, name) in names {
            if self.contains(bit) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
