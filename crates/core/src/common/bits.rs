//! MSB-indexed bitfield primitives.
//!
//! This module provides the four field operations every format and status
//! accessor in the core is built from:
//! 1. **Extract:** Read a field as an unsigned value.
//! 2. **Extract signed:** Read a field with sign extension.
//! 3. **Mask:** Keep a field in place, clearing everything else.
//! 4. **Deposit:** Write a field without disturbing its neighbours.
//!
//! Fields are addressed the way the architecture manuals write them: bit 0
//! is the most significant bit of the word, and a field covers bits
//! `start..start + len`. Confining every bit-layout decision to these four
//! operations keeps the serialization boundary auditable; the arithmetic
//! kernels never touch instruction or register encodings directly.

/// A fixed-width word the bitfield primitives operate on.
///
/// Implemented for the two word sizes the register file uses: `u32`
/// (instruction words, status word, single-precision values) and `u64`
/// (assembled double-precision values).
pub trait Word: Copy + Eq {
    /// Width of the word in bits.
    const BITS: u32;

    /// Reads the unsigned field covering MSB-indexed bits `start..start + len`.
    fn extract(self, start: u32, len: u32) -> Self;

    /// Reads the field as a sign-extended value.
    fn extract_signed(self, start: u32, len: u32) -> i64;

    /// Keeps only the field bits, in place; everything else is cleared.
    fn mask(self, start: u32, len: u32) -> Self;

    /// Returns the word with `value` deposited into the field.
    fn deposit(self, value: Self, start: u32, len: u32) -> Self;
}

macro_rules! impl_word {
    ($ty:ty, $bits:expr) => {
        impl Word for $ty {
            const BITS: u32 = $bits;

            #[inline]
            fn extract(self, start: u32, len: u32) -> Self {
                debug_assert!(len >= 1 && start + len <= Self::BITS);
                let low = Self::BITS - start - len;
                (self >> low) & (!(0 as $ty) >> (Self::BITS - len))
            }

            #[inline]
            fn extract_signed(self, start: u32, len: u32) -> i64 {
                debug_assert!(len >= 1 && start + len <= Self::BITS);
                let field = self.extract(start, len) as i64;
                let sign = 1_i64 << (len - 1);
                (field ^ sign) - sign
            }

            #[inline]
            fn mask(self, start: u32, len: u32) -> Self {
                debug_assert!(len >= 1 && start + len <= Self::BITS);
                let low = Self::BITS - start - len;
                let field = (!(0 as $ty) >> (Self::BITS - len)) << low;
                self & field
            }

            #[inline]
            fn deposit(self, value: Self, start: u32, len: u32) -> Self {
                debug_assert!(len >= 1 && start + len <= Self::BITS);
                let low = Self::BITS - start - len;
                let field = (!(0 as $ty) >> (Self::BITS - len)) << low;
                (self & !field) | ((value << low) & field)
            }
        }
    };
}

impl_word!(u32, 32);
impl_word!(u64, 64);

/// Reads the unsigned field covering MSB-indexed bits `start..start + len`.
#[inline]
pub fn extract<W: Word>(start: u32, len: u32, word: W) -> W {
    word.extract(start, len)
}

/// Reads a field with sign extension.
#[inline]
pub fn extract_signed<W: Word>(start: u32, len: u32, word: W) -> i64 {
    word.extract_signed(start, len)
}

/// Keeps only the field bits of `word`, in place.
#[inline]
pub fn mask<W: Word>(start: u32, len: u32, word: W) -> W {
    word.mask(start, len)
}

/// Returns `word` with `value` deposited into the field.
#[inline]
pub fn deposit<W: Word>(value: W, start: u32, len: u32, word: W) -> W {
    word.deposit(value, start, len)
}
