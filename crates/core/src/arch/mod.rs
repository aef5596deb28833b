//! Architectural state: formats, status word, register file, queue.
//!
//! This module defines everything the serialization boundary knows about:
//! 1. **Formats:** single/double field layouts and accessors (quad stubs).
//! 2. **Status:** the shared status/control word's fields.
//! 3. **Register file:** the 64-word capture the kernels operate on.
//! 4. **Queue:** the hardware-captured exception slots.

/// Floating-point format layouts and field accessors.
pub mod format;

/// Hardware-captured exception queue.
pub mod queue;

/// Floating-point register file.
pub mod regfile;

/// Status/control word access.
pub mod status;
