//! Major-opcode classification.

use super::fields;

/// The five floating-point major opcodes the dispatcher accepts.
///
/// Everything else the trap entry hands over is undecodable here and
/// escalates as an illegal instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MajorOp {
    /// 0x0C: classic coprocessor operation.
    CoprOp,
    /// 0x0E: coprocessor operation with extended register numbering; the
    /// extension bits select right-half single words.
    CoprOpExt,
    /// 0x06: combined multiply + add, two independent sub-operations.
    MultiAdd,
    /// 0x26: combined multiply + subtract.
    MultiSub,
    /// 0x2E: fused multiply-add group (negated-product variant included).
    Fused,
}

impl MajorOp {
    /// Classifies an instruction word by its major opcode field.
    pub fn classify(ir: u32) -> Option<Self> {
        match fields::opcode(ir) {
            0x0C => Some(Self::CoprOp),
            0x0E => Some(Self::CoprOpExt),
            0x06 => Some(Self::MultiAdd),
            0x26 => Some(Self::MultiSub),
            0x2E => Some(Self::Fused),
            _ => None,
        }
    }
}
