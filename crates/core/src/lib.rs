//! Software floating-point emulation core.
//!
//! This crate emulates hardware floating-point arithmetic for a trap-driven
//! driver: given a captured register file and its pending exception queue,
//! it performs IEEE-754-style single/double add, subtract, multiply,
//! divide, remainder, square root, compare, fused multiply-add, and format
//! conversion entirely in software, with the following layers:
//! 1. **Common:** bitfield primitives, the two-word wide intermediate,
//!    kernel outcome codes, capture errors.
//! 2. **Arch:** format layouts, status/control word, register file, and the
//!    hardware exception queue.
//! 3. **Kernels:** one arithmetic kernel per operation, sharing a single
//!    rounding and range-disposition tail.
//! 4. **ISA:** instruction field layout and major-opcode classification.
//! 5. **Dispatch & traps:** stateless instruction dispatch and the
//!    exception-queue decoder that produces the final process signal.

/// Architectural state (formats, status word, register file, queue).
pub mod arch;
/// Shared primitives (bitfields, wide arithmetic, outcomes, errors).
pub mod common;
/// Instruction dispatcher.
pub mod dispatch;
/// Instruction-set definitions.
pub mod isa;
/// Arithmetic kernels.
pub mod kernels;
/// Trap-disposition statistics.
pub mod stats;
/// Exception-queue decoder and driver glue.
pub mod traps;

/// Captured register file plus exception queue; the core's sole state.
pub use crate::arch::regfile::RegisterFile;
/// Outcome of one emulated operation.
pub use crate::common::outcome::Outcome;
/// Stateless instruction dispatch entry.
pub use crate::dispatch::dispatch;
/// Statistics accumulated across trap decodes.
pub use crate::stats::TrapCounters;
/// Top-level trap entry points.
pub use crate::traps::{decode_fpu, handle_fpu_trap};
