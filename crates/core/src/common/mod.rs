//! Common types shared across the emulation core.
//!
//! This module gathers the foundations everything else is built on:
//! 1. **Bitfield primitives:** MSB-indexed extract/deposit/mask operations.
//! 2. **Wide intermediates:** the two-word extended-precision working value.
//! 3. **Outcomes:** the per-operation condition report.
//! 4. **Capture errors:** the serialization-boundary error type.

/// MSB-indexed bitfield primitives over fixed-width words.
pub mod bits;

/// Capture-boundary error definitions.
pub mod error;

/// Kernel outcome codes and composites.
pub mod outcome;

/// Two-word extended-precision intermediate.
pub mod wide;
