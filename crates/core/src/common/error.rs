//! Capture-boundary error definitions.
//!
//! The arithmetic core itself never fails: kernels always produce a defined
//! substitute value and report an [`Outcome`](super::outcome::Outcome).
//! Errors only exist at the serialization boundary, where a raw trap capture
//! handed in by the external trap handler may be malformed.

use thiserror::Error;

/// A malformed trap capture.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// The register-file image is the wrong number of words.
    #[error("register file image must be {expected} words, got {got}")]
    BadImageLength {
        /// Required word count.
        expected: usize,
        /// Word count actually supplied.
        got: usize,
    },

    /// An exception slot carries a code outside the legal outcome encodings.
    #[error("illegal exception-type code {code:#04x} in slot {slot}")]
    IllegalExceptionCode {
        /// Queue position of the offending slot.
        slot: usize,
        /// The captured 6-bit code.
        code: u32,
    },
}
