//! Instruction-set definitions: major opcodes and bitfield layout.

/// Instruction field accessors.
pub mod fields;

/// Major-opcode classification.
pub mod opcode;
