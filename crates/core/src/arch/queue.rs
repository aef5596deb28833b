//! Hardware-captured exception queue.
//!
//! When the floating-point unit traps, the hardware parks up to seven
//! pending operations in an exception queue: each slot holds the captured
//! instruction word and a 6-bit exception-type code using the same bit
//! assignments as [`Outcome`]. The queue is produced externally at trap
//! entry; the decoder consumes it in arrival order and may re-type a slot
//! after re-dispatching an unimplemented form.

use crate::common::error::CaptureError;
use crate::common::outcome::Outcome;

/// Number of exception slots the hardware can capture.
pub const QUEUE_DEPTH: usize = 7;

/// One captured exception: instruction word plus exception-type code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExceptionSlot {
    /// The trapped instruction word.
    pub ir: u32,
    /// The 6-bit exception-type code (see [`Outcome`] bit assignments).
    pub code: u32,
}

impl ExceptionSlot {
    /// An empty slot: no instruction, code `NONE`.
    pub const EMPTY: Self = Self { ir: 0, code: 0 };

    /// Builds a slot from an instruction and a typed outcome.
    #[inline]
    pub const fn new(ir: u32, code: Outcome) -> Self {
        Self {
            ir,
            code: code.bits() as u32,
        }
    }

    /// True when the slot holds no pending exception.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.code == 0
    }

    /// Clears the slot after it has been fully resolved.
    #[inline]
    pub const fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Re-types the slot with the outcome of a re-dispatched operation.
    #[inline]
    pub const fn retag(&mut self, outcome: Outcome) {
        self.code = outcome.bits() as u32;
    }

    /// The slot's code as a typed outcome, or `None` for an illegal capture.
    #[inline]
    pub fn outcome(self) -> Option<Outcome> {
        Outcome::from_bits(self.code)
    }
}

/// The seven-slot exception queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExceptionQueue {
    /// Captured slots, in arrival order.
    pub slots: [ExceptionSlot; QUEUE_DEPTH],
}

impl ExceptionQueue {
    /// An empty queue.
    pub const EMPTY: Self = Self {
        slots: [ExceptionSlot::EMPTY; QUEUE_DEPTH],
    };

    /// Checks every slot carries a legal exception-type code.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::IllegalExceptionCode`] for the first slot
    /// whose code is not a legal outcome encoding.
    pub fn validate(&self) -> Result<(), CaptureError> {
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.outcome().is_none() {
                return Err(CaptureError::IllegalExceptionCode {
                    slot: i,
                    code: slot.code,
                });
            }
        }
        Ok(())
    }
}
