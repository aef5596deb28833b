//! Register file and exception queue tests.

use fpemu_core::arch::queue::{ExceptionQueue, ExceptionSlot, QUEUE_DEPTH};
use fpemu_core::arch::regfile::{NUM_WORDS, RegisterFile};
use fpemu_core::common::error::CaptureError;
use fpemu_core::common::outcome::Outcome;
use pretty_assertions::assert_eq;

use crate::common::f64_bits;

/// A captured image must be exactly the register-file width.
#[test]
fn from_words_rejects_bad_lengths() {
    let short = [0_u32; 10];
    assert!(matches!(
        RegisterFile::from_words(&short),
        Err(CaptureError::BadImageLength {
            expected: NUM_WORDS,
            got: 10,
        })
    ));
    let exact = [0_u32; NUM_WORDS];
    assert!(RegisterFile::from_words(&exact).is_ok());
}

/// A double register assembles from its word pair, upper word first.
#[test]
fn double_assembles_from_word_pair() {
    let mut regs = RegisterFile::new();
    regs.set_word(6, 0x3FF0_0000);
    regs.set_word(7, 0x0000_0000);
    assert_eq!(regs.double(3), f64_bits(1.0));
}

/// Writing a double register splits it back into the same word pair.
#[test]
fn set_double_round_trip() {
    let mut regs = RegisterFile::new();
    regs.set_double(5, 0x1234_5678_9ABC_DEF0);
    assert_eq!(regs.word(10), 0x1234_5678);
    assert_eq!(regs.word(11), 0x9ABC_DEF0);
    assert_eq!(regs.double(5), 0x1234_5678_9ABC_DEF0);
}

/// Word 0 is the status word.
#[test]
fn status_is_word_zero() {
    let mut regs = RegisterFile::new();
    *regs.status_mut() = 0xDEAD_BEEF;
    assert_eq!(regs.status(), 0xDEAD_BEEF);
    assert_eq!(regs.words()[0], 0xDEAD_BEEF);
}

/// Slot construction, emptiness, and re-tagging.
#[test]
fn slot_life_cycle() {
    let mut slot = ExceptionSlot::new(0x3000_0000, Outcome::DIV_BY_ZERO);
    assert!(!slot.is_empty());
    assert_eq!(slot.outcome(), Some(Outcome::DIV_BY_ZERO));

    slot.retag(Outcome::NONE);
    assert!(slot.is_empty());

    slot.retag(Outcome::INVALID);
    slot.clear();
    assert_eq!(slot, ExceptionSlot::EMPTY);
}

/// Validation reports the first slot carrying an illegal code.
#[test]
fn validate_flags_illegal_codes() {
    let mut queue = ExceptionQueue::EMPTY;
    assert!(queue.validate().is_ok());

    queue.slots[2].code = 0x03;
    assert!(matches!(
        queue.validate(),
        Err(CaptureError::IllegalExceptionCode { slot: 2, code: 0x03 })
    ));
}

/// The queue holds exactly seven slots.
#[test]
fn queue_depth_is_fixed() {
    assert_eq!(QUEUE_DEPTH, 7);
    assert_eq!(ExceptionQueue::EMPTY.slots.len(), QUEUE_DEPTH);
}
