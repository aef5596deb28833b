//! Floating-point register file.
//!
//! This module implements the captured register file a trap hands to the
//! core. It performs the following:
//! 1. **Storage:** 64 fixed-width words; word 0 is the status/control word.
//! 2. **Slot addressing:** single-precision values occupy one word,
//!    double-precision values a `p1`/`p2` pair of consecutive words.
//! 3. **Assembly:** double values cross the serialization boundary as one
//!    `u64`, so kernels never depend on word adjacency.
//!
//! The register file is the sole persistent state of the core. It is owned
//! by the trapping process and alive only for the duration of one trap; the
//! external handler saves and restores it around the call.

use super::queue::ExceptionQueue;
use crate::common::bits::{deposit, extract};
use crate::common::error::CaptureError;

/// Number of words in the register file image.
pub const NUM_WORDS: usize = 64;

/// Number of architectural double-width registers.
pub const NUM_REGS: usize = 32;

/// A captured floating-point register file plus its exception queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    words: [u32; NUM_WORDS],
    /// The hardware-captured exception queue for this trap.
    pub queue: ExceptionQueue,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// An all-zero register file with an empty queue.
    pub const fn new() -> Self {
        Self {
            words: [0; NUM_WORDS],
            queue: ExceptionQueue::EMPTY,
        }
    }

    /// Builds a register file from a captured word image.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::BadImageLength`] when the image is not
    /// exactly [`NUM_WORDS`] words.
    pub fn from_words(image: &[u32]) -> Result<Self, CaptureError> {
        let words: [u32; NUM_WORDS] =
            image
                .try_into()
                .map_err(|_| CaptureError::BadImageLength {
                    expected: NUM_WORDS,
                    got: image.len(),
                })?;
        Ok(Self {
            words,
            queue: ExceptionQueue::EMPTY,
        })
    }

    /// The raw word image, for the external handler's restore path.
    #[inline]
    pub const fn words(&self) -> &[u32; NUM_WORDS] {
        &self.words
    }

    /// The status/control word (word 0).
    #[inline]
    pub const fn status(&self) -> u32 {
        self.words[0]
    }

    /// Mutable access to the status/control word.
    #[inline]
    pub const fn status_mut(&mut self) -> &mut u32 {
        &mut self.words[0]
    }

    /// Reads one word by word index.
    #[inline]
    pub const fn word(&self, idx: usize) -> u32 {
        self.words[idx]
    }

    /// Writes one word by word index.
    #[inline]
    pub const fn set_word(&mut self, idx: usize, value: u32) {
        self.words[idx] = value;
    }

    /// Reads a double-precision register as an assembled 64-bit value
    /// (`p1` upper word, `p2` lower word).
    #[inline]
    pub fn double(&self, reg: usize) -> u64 {
        debug_assert!(reg < NUM_REGS);
        let p1 = u64::from(self.words[reg * 2]);
        let p2 = u64::from(self.words[reg * 2 + 1]);
        deposit(p2, 32, 32, deposit(p1, 0, 32, 0))
    }

    /// Writes a double-precision register from an assembled 64-bit value.
    #[inline]
    pub fn set_double(&mut self, reg: usize, value: u64) {
        debug_assert!(reg < NUM_REGS);
        self.words[reg * 2] = extract(0, 32, value) as u32;
        self.words[reg * 2 + 1] = extract(32, 32, value) as u32;
    }
}
