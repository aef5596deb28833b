//! Exception-queue decoder tests.
//!
//! Each test seeds a register file with captured slots, runs the decoder,
//! and checks the packed signal, the rewritten state, and the counters.

use fpemu_core::arch::queue::ExceptionSlot;
use fpemu_core::arch::regfile::RegisterFile;
use fpemu_core::arch::status::{Condition, set_t_bit, set_trap_enable, sticky, t_bit};
use fpemu_core::common::outcome::Outcome;
use fpemu_core::stats::TrapCounters;
use fpemu_core::traps::{
    FPE_FLTDIV, FPE_FLTINV, FPE_FLTOVF, FPE_FLTRES, FPE_FLTUND, ILL_COPROC, NO_SIGNAL,
    ProcessSignal, SIGFPE, SIGILL, decode_fpu, handle_fpu_trap, pack_signal,
};
use pretty_assertions::assert_eq;

use crate::common::{f32_bits, fpop, init_tracing};

/// A single-precision add instruction writing word 6 from words 2 and 4.
fn add_ir() -> u32 {
    fpop(0x0C, 3, 0, 0, 1, 2, 3)
}

/// An empty queue resumes immediately and clears the pending-trap bit.
#[test]
fn empty_queue_resumes() {
    init_tracing();
    let mut regs = RegisterFile::new();
    set_t_bit(regs.status_mut());
    let mut counters = TrapCounters::default();

    assert_eq!(decode_fpu(&mut regs, &mut counters), NO_SIGNAL);
    assert!(!t_bit(regs.status()));
    assert_eq!(counters.decodes, 1);
    assert_eq!(counters.resumed, 1);
}

/// An UNIMPLEMENTED slot re-dispatches the captured instruction, re-tags
/// the slot, and resumes when the retry runs clean.
#[test]
fn unimplemented_slot_redispatches() {
    init_tracing();
    let mut regs = RegisterFile::new();
    regs.set_word(2, 1.0_f32.to_bits());
    regs.set_word(4, 2.0_f32.to_bits());
    set_t_bit(regs.status_mut());
    regs.queue.slots[0] = ExceptionSlot::new(add_ir(), Outcome::UNIMPLEMENTED);
    let mut counters = TrapCounters::default();

    assert_eq!(decode_fpu(&mut regs, &mut counters), NO_SIGNAL);
    assert_eq!(u64::from(regs.word(6)), f32_bits(3.0));
    assert!(regs.queue.slots[0].is_empty());
    assert!(!t_bit(regs.status()));
    assert_eq!(counters.redispatched, 1);
    assert_eq!(counters.resumed, 1);
}

/// A retry that is still UNIMPLEMENTED escalates to SIGILL.
#[test]
fn twice_unimplemented_is_illegal() {
    let mut regs = RegisterFile::new();
    // Class 0 sub 0 never decodes.
    let ir = fpop(0x0C, 0, 0, 0, 1, 0, 3);
    regs.queue.slots[0] = ExceptionSlot::new(ir, Outcome::UNIMPLEMENTED);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGILL, ILL_COPROC)
    );
    assert_eq!(counters.redispatched, 1);
    assert_eq!(counters.illegal, 1);
}

/// A captured instruction outside the coprocessor majors is illegal.
#[test]
fn unassigned_opcode_is_illegal() {
    let mut regs = RegisterFile::new();
    regs.queue.slots[0] = ExceptionSlot::new(0x0000_0000, Outcome::UNIMPLEMENTED);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGILL, ILL_COPROC)
    );
    assert_eq!(
        handle_fpu_trap(&mut regs, &mut counters),
        ProcessSignal::IllegalInstruction { code: ILL_COPROC }
    );
}

/// A slot carrying an illegal exception-type code is fatal.
#[test]
fn illegal_slot_code() {
    let mut regs = RegisterFile::new();
    regs.queue.slots[0].ir = add_ir();
    regs.queue.slots[0].code = 0x03;
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGILL, ILL_COPROC)
    );
    assert_eq!(counters.illegal, 1);
}

/// The three directly terminal conditions map to their signal codes.
#[test]
fn terminal_condition_codes() {
    for (outcome, code) in [
        (Outcome::INVALID, FPE_FLTINV),
        (Outcome::DIV_BY_ZERO, FPE_FLTDIV),
        (Outcome::INEXACT, FPE_FLTRES),
    ] {
        let mut regs = RegisterFile::new();
        regs.queue.slots[0] = ExceptionSlot::new(add_ir(), outcome);
        let mut counters = TrapCounters::default();
        assert_eq!(
            decode_fpu(&mut regs, &mut counters),
            pack_signal(SIGFPE, code)
        );
        assert_eq!(
            handle_fpu_trap(&mut regs, &mut counters),
            ProcessSignal::FloatingPoint { code }
        );
    }
}

/// An overflow slot is terminal while the trap stays enabled.
#[test]
fn trapped_overflow_is_terminal() {
    let mut regs = RegisterFile::new();
    set_trap_enable(regs.status_mut(), Condition::Overflow);
    regs.queue.slots[0] = ExceptionSlot::new(add_ir(), Outcome::OVERFLOW);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGFPE, FPE_FLTOVF)
    );
    assert_eq!(counters.overflow, 1);
}

/// An underflow slot is terminal while the trap stays enabled.
#[test]
fn trapped_underflow_is_terminal() {
    let mut regs = RegisterFile::new();
    set_trap_enable(regs.status_mut(), Condition::Underflow);
    regs.queue.slots[0] = ExceptionSlot::new(add_ir(), Outcome::UNDERFLOW);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGFPE, FPE_FLTUND)
    );
    assert_eq!(counters.underflow, 1);
}

/// With the trap since disabled, a wrapped overflow destination is
/// rewritten with the untrapped substitute and the decode resumes.
#[test]
fn disabled_overflow_rewrites_in_place() {
    let mut regs = RegisterFile::new();
    // A single multiply into word 6, captured with its wrapped result:
    // MAX * 2 wrapped down by 2^192.
    let ir = fpop(0x0C, 3, 2, 0, 1, 2, 3);
    let wrapped = SINGLE_WRAPPED_MAX_TIMES_TWO;
    regs.set_word(6, wrapped);
    regs.queue.slots[0] = ExceptionSlot::new(ir, Outcome::OVERFLOW);
    let mut counters = TrapCounters::default();

    assert_eq!(decode_fpu(&mut regs, &mut counters), NO_SIGNAL);
    assert_eq!(u64::from(regs.word(6)), f32_bits(f32::INFINITY));
    assert!(sticky(regs.status(), Condition::Overflow));
    assert!(sticky(regs.status(), Condition::Inexact));
    assert!(regs.queue.slots[0].is_empty());
    assert_eq!(counters.overflow, 1);
    assert_eq!(counters.resumed, 1);
}

/// A rewritten underflow with the inexact trap enabled escalates to the
/// inexact signal instead of resuming.
#[test]
fn rewrite_escalates_inexact_residue() {
    let mut regs = RegisterFile::new();
    set_trap_enable(regs.status_mut(), Condition::Inexact);
    let ir = fpop(0x0C, 3, 2, 0, 1, 2, 3);
    // Wrapped 2^-150: denormalization will round it away, inexactly.
    regs.set_word(6, SINGLE_WRAPPED_TWO_POW_M150);
    regs.queue.slots[0] = ExceptionSlot::new(ir, Outcome::UNDERFLOW);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGFPE, FPE_FLTRES)
    );
    assert_eq!(counters.underflow, 1);
    assert_eq!(counters.inexact, 1);
}

/// An exact wrapped underflow rewrites to the subnormal and resumes.
#[test]
fn disabled_underflow_rewrites_in_place() {
    let mut regs = RegisterFile::new();
    let ir = fpop(0x0C, 3, 2, 0, 1, 2, 3);
    // Wrapped 2^-127: biased exponent 0 + 192.
    regs.set_word(6, 192 << 23);
    regs.queue.slots[0] = ExceptionSlot::new(ir, Outcome::UNDERFLOW);
    let mut counters = TrapCounters::default();

    assert_eq!(decode_fpu(&mut regs, &mut counters), NO_SIGNAL);
    assert_eq!(u64::from(regs.word(6)), f32_bits(f32::MIN_POSITIVE / 2.0));
    assert_eq!(counters.underflow, 1);
    assert_eq!(counters.resumed, 1);
}

/// Slots drain in arrival order: a terminal condition in a later slot is
/// reached only after earlier slots run clean.
#[test]
fn slots_drain_in_order() {
    let mut regs = RegisterFile::new();
    regs.set_word(2, 1.0_f32.to_bits());
    regs.set_word(4, 2.0_f32.to_bits());
    regs.queue.slots[0] = ExceptionSlot::new(add_ir(), Outcome::UNIMPLEMENTED);
    regs.queue.slots[1] = ExceptionSlot::new(add_ir(), Outcome::INVALID);
    let mut counters = TrapCounters::default();

    assert_eq!(
        decode_fpu(&mut regs, &mut counters),
        pack_signal(SIGFPE, FPE_FLTINV)
    );
    // The first slot was resolved before the terminal one.
    assert!(regs.queue.slots[0].is_empty());
    assert_eq!(u64::from(regs.word(6)), f32_bits(3.0));
    assert_eq!(counters.invalid, 1);
    assert_eq!(counters.resumed, 0);
}

/// Wrapped single result of `f32::MAX * 2.0`: mantissa intact, exponent
/// scaled down by 2^192 (biased field 255 - 192 = 63).
const SINGLE_WRAPPED_MAX_TIMES_TWO: u32 = (63 << 23) | 0x7F_FFFF;

/// Wrapped single result of `2^-150`: biased exponent -23 + 192 = 169.
const SINGLE_WRAPPED_TWO_POW_M150: u32 = 169 << 23;
