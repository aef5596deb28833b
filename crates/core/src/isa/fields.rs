//! Instruction bitfield accessors, MSB-indexed.
//!
//! Coprocessor-operation layout (majors 0x0C/0x0E): opcode(0,6) r1(6,5)
//! r2(11,5) sub(16,3) fmt(19,2) class(21,2) t(27,5). The conversion class
//! replaces sub/fmt with sub(15,2), source format(19,2), destination
//! format(17,2), and an unsigned-conversion bit at 26. Under major 0x0E the
//! extension bits 24/25/23 extend r1/r2/t to right-half single words.
//!
//! Multiple-operation layout (majors 0x06/0x26): rm1(6,5) rm2(11,5)
//! ta(16,5) ra(21,5) f(26,1) tm(27,5).
//!
//! Fused layout (major 0x2E): r1(6,5) r2(11,5) r3(16,5) neg(21,1) f(26,1)
//! t(27,5).

use crate::common::bits::extract;

/// Major opcode field.
#[inline]
pub fn opcode(ir: u32) -> u32 {
    extract(0, 6, ir)
}

/// First source register.
#[inline]
pub fn r1(ir: u32) -> u32 {
    extract(6, 5, ir)
}

/// Second source register.
#[inline]
pub fn r2(ir: u32) -> u32 {
    extract(11, 5, ir)
}

/// Sub-operation within a class.
#[inline]
pub fn sub(ir: u32) -> u32 {
    extract(16, 3, ir)
}

/// Operand format field.
#[inline]
pub fn fmt(ir: u32) -> u32 {
    extract(19, 2, ir)
}

/// Operation class.
#[inline]
pub fn class(ir: u32) -> u32 {
    extract(21, 2, ir)
}

/// Target register; the condition field for compares.
#[inline]
pub fn t(ir: u32) -> u32 {
    extract(27, 5, ir)
}

/// Conversion sub-operation (float/float, fixed/float, float/fixed,
/// float/fixed truncating).
#[inline]
pub fn cnv_sub(ir: u32) -> u32 {
    extract(15, 2, ir)
}

/// Conversion destination format.
#[inline]
pub fn cnv_dst_fmt(ir: u32) -> u32 {
    extract(17, 2, ir)
}

/// Unsigned-conversion bit.
#[inline]
pub fn cnv_unsigned(ir: u32) -> bool {
    extract(26, 1, ir) != 0
}

/// Extension bit for `r1` under major 0x0E.
#[inline]
pub fn ext_r1(ir: u32) -> u32 {
    extract(24, 1, ir)
}

/// Extension bit for `r2` under major 0x0E.
#[inline]
pub fn ext_r2(ir: u32) -> u32 {
    extract(25, 1, ir)
}

/// Extension bit for `t` under major 0x0E.
#[inline]
pub fn ext_t(ir: u32) -> u32 {
    extract(23, 1, ir)
}

/// Multiple-operation multiplicand register.
#[inline]
pub fn m_rm1(ir: u32) -> u32 {
    extract(6, 5, ir)
}

/// Multiple-operation multiplier register.
#[inline]
pub fn m_rm2(ir: u32) -> u32 {
    extract(11, 5, ir)
}

/// Multiple-operation add/subtract target (and first addend).
#[inline]
pub fn m_ta(ir: u32) -> u32 {
    extract(16, 5, ir)
}

/// Multiple-operation second addend register.
#[inline]
pub fn m_ra(ir: u32) -> u32 {
    extract(21, 5, ir)
}

/// Multiple-operation format bit: set selects single precision.
#[inline]
pub fn m_single(ir: u32) -> bool {
    extract(26, 1, ir) != 0
}

/// Multiple-operation multiply target.
#[inline]
pub fn m_tm(ir: u32) -> u32 {
    extract(27, 5, ir)
}

/// Fused-group third source register.
#[inline]
pub fn f_r3(ir: u32) -> u32 {
    extract(16, 5, ir)
}

/// Fused-group negated-product bit.
#[inline]
pub fn f_neg(ir: u32) -> bool {
    extract(21, 1, ir) != 0
}

/// Fused-group format bit: set selects single precision.
#[inline]
pub fn f_single(ir: u32) -> bool {
    extract(26, 1, ir) != 0
}
