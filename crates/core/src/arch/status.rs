//! Status/control word access.
//!
//! Register-file word 0 is the status word shared by every kernel call. It
//! carries (MSB-indexed):
//! 1. **Sticky flags** (bits 0..4): invalid, div-by-zero, overflow,
//!    underflow, inexact — set-only within the core.
//! 2. **C bit** (bit 5): the compare predicate result.
//! 3. **Condition codes** (bits 6..9): less / greater / equal / unordered.
//! 4. **Rounding mode** (bits 21..22).
//! 5. **T bit** (bit 25): a trap is pending in the exception queue.
//! 6. **Trap enables** (bits 27..31), mirroring the sticky flags.
//!
//! Trap-enable bits are read-only for the duration of one kernel call; the
//! kernels consult them to decide between trapping and silently substituting
//! a default result.

use crate::common::bits::{deposit, extract};

/// MSB position of the sticky-flag group.
const FLAGS_START: u32 = 0;
/// MSB position of the C bit.
const C_BIT: u32 = 5;
/// MSB position of the condition-code group.
const CC_START: u32 = 6;
/// MSB position of the rounding-mode field.
const RM_START: u32 = 21;
/// MSB position of the T (pending-trap) bit.
const T_BIT: u32 = 25;
/// MSB position of the trap-enable group.
const ENABLES_START: u32 = 27;

/// One of the five IEEE exception conditions.
///
/// The discriminant is the bit offset of the condition inside both the
/// sticky-flag and trap-enable groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Condition {
    /// Mathematically undefined operands.
    Invalid = 0,
    /// Finite nonzero dividend over a zero divisor.
    DivByZero = 1,
    /// Result magnitude exceeded the format.
    Overflow = 2,
    /// Result tiny (subnormal range).
    Underflow = 3,
    /// Rounding altered the exact result.
    Inexact = 4,
}

/// Compare classification written into the condition-code bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CondCode {
    /// First operand compares less.
    Less = 0,
    /// First operand compares greater.
    Greater = 1,
    /// Operands compare equal (including +0 against -0).
    Equal = 2,
    /// At least one operand is a NaN.
    Unordered = 3,
}

/// Rounding mode held in the status word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RoundingMode {
    /// Round to nearest, ties to even. The reset default.
    Nearest = 0,
    /// Round toward zero.
    TowardZero = 1,
    /// Round toward positive infinity.
    TowardPositive = 2,
    /// Round toward negative infinity.
    TowardNegative = 3,
}

impl RoundingMode {
    /// Decodes a 2-bit rounding-mode field.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            1 => Self::TowardZero,
            2 => Self::TowardPositive,
            3 => Self::TowardNegative,
            _ => Self::Nearest,
        }
    }
}

/// Current rounding mode.
#[inline]
pub fn rounding_mode(w: u32) -> RoundingMode {
    RoundingMode::from_bits(extract(RM_START, 2, w))
}

/// Replaces the rounding-mode field.
#[inline]
pub fn set_rounding_mode(w: &mut u32, rm: RoundingMode) {
    *w = deposit(rm as u32, RM_START, 2, *w);
}

/// Whether the trap-enable bit for `cond` is set.
#[inline]
pub fn trap_enabled(w: u32, cond: Condition) -> bool {
    extract(ENABLES_START + cond as u32, 1, w) != 0
}

/// Sets the trap-enable bit for `cond`.
#[inline]
pub fn set_trap_enable(w: &mut u32, cond: Condition) {
    *w = deposit(1, ENABLES_START + cond as u32, 1, *w);
}

/// Whether the sticky flag for `cond` is set.
#[inline]
pub fn sticky(w: u32, cond: Condition) -> bool {
    extract(FLAGS_START + cond as u32, 1, w) != 0
}

/// Sets the sticky flag for `cond`. Idempotent; arithmetic never clears.
#[inline]
pub fn set_sticky(w: &mut u32, cond: Condition) {
    *w = deposit(1, FLAGS_START + cond as u32, 1, *w);
}

/// Whether the pending-trap (T) bit is set.
#[inline]
pub fn t_bit(w: u32) -> bool {
    extract(T_BIT, 1, w) != 0
}

/// Sets the pending-trap (T) bit.
#[inline]
pub fn set_t_bit(w: &mut u32) {
    *w = deposit(1, T_BIT, 1, *w);
}

/// Clears the pending-trap (T) bit.
#[inline]
pub fn clear_t_bit(w: &mut u32) {
    *w = deposit(0, T_BIT, 1, *w);
}

/// The compare predicate (C) bit.
#[inline]
pub fn c_bit(w: u32) -> bool {
    extract(C_BIT, 1, w) != 0
}

/// Writes the compare predicate (C) bit.
#[inline]
pub fn set_c_bit(w: &mut u32, value: bool) {
    *w = deposit(value as u32, C_BIT, 1, *w);
}

/// Whether a condition-code bit is set.
#[inline]
pub fn cond_code(w: u32, cc: CondCode) -> bool {
    extract(CC_START + cc as u32, 1, w) != 0
}

/// Replaces all four condition-code bits with the single classification
/// produced by a compare.
#[inline]
pub fn set_cond_codes(w: &mut u32, cc: CondCode) {
    *w = deposit(0, CC_START, 4, *w);
    *w = deposit(1, CC_START + cc as u32, 1, *w);
}
