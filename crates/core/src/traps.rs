//! Exception-queue decoder and driver glue.
//!
//! The hardware parks pending operations in the exception queue and raises
//! one trap; [`decode_fpu`] drains the queue in arrival order and decides
//! the process-visible disposition of each slot:
//!
//! - `UNIMPLEMENTED` clears the pending-trap bit and re-dispatches the
//!   captured instruction; a second `UNIMPLEMENTED` is terminal. Any other
//!   returned type re-tags the slot and is re-tested.
//! - Wrapped `UNDERFLOW`/`OVERFLOW` results are rewritten in place with
//!   their untrapped substitutes when the trap has since been disabled; the
//!   inexact residue is re-raised or made sticky.
//! - `INVALID`, `DIV_BY_ZERO`, and `INEXACT` map directly to terminal
//!   signal codes.
//!
//! The return value packs (signal number, signal code) into one word, with
//! [`NO_SIGNAL`] meaning the faulting context can simply resume.

use tracing::{error, warn};

use crate::arch::format::{DOUBLE, SINGLE};
use crate::arch::queue::QUEUE_DEPTH;
use crate::arch::regfile::RegisterFile;
use crate::arch::status::{self, Condition};
use crate::common::outcome::Outcome;
use crate::dispatch::{self, WrappedDest, dispatch};
use crate::isa::opcode::MajorOp;
use crate::kernels::denorm;
use crate::stats::TrapCounters;

/// Floating-point exception signal number.
pub const SIGFPE: u32 = 8;
/// Illegal-instruction signal number.
pub const SIGILL: u32 = 4;

/// Division-by-zero signal code.
pub const FPE_FLTDIV: u32 = 3;
/// Overflow signal code.
pub const FPE_FLTOVF: u32 = 4;
/// Underflow signal code.
pub const FPE_FLTUND: u32 = 5;
/// Inexact-result signal code.
pub const FPE_FLTRES: u32 = 6;
/// Invalid-operation signal code.
pub const FPE_FLTINV: u32 = 7;
/// Coprocessor-error signal code for illegal instructions.
pub const ILL_COPROC: u32 = 7;

/// Sentinel: no signal, resume the faulting context.
pub const NO_SIGNAL: u32 = 0;

/// Packs a (signal number, signal code) pair into one word.
#[inline]
pub const fn pack_signal(signal: u32, code: u32) -> u32 {
    (signal << 24) | code
}

/// A decoded trap disposition for the driver layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessSignal {
    /// Resume; nothing to deliver.
    None,
    /// Deliver SIGFPE with the given condition code.
    FloatingPoint {
        /// One of the `FPE_*` codes.
        code: u32,
    },
    /// Deliver SIGILL with the given code.
    IllegalInstruction {
        /// The `ILL_*` code.
        code: u32,
    },
}

/// Driver glue: decodes the queue and converts the packed word into a
/// typed signal.
pub fn handle_fpu_trap(regs: &mut RegisterFile, counters: &mut TrapCounters) -> ProcessSignal {
    let packed = decode_fpu(regs, counters);
    let code = packed & 0x00FF_FFFF;
    match packed >> 24 {
        0 => ProcessSignal::None,
        SIGFPE => ProcessSignal::FloatingPoint { code },
        _ => ProcessSignal::IllegalInstruction { code },
    }
}

/// Drains the exception queue, returning the packed (signal, code) of the
/// first terminal disposition, or [`NO_SIGNAL`] after all slots run clean.
pub fn decode_fpu(regs: &mut RegisterFile, counters: &mut TrapCounters) -> u32 {
    counters.decodes += 1;

    for i in 0..QUEUE_DEPTH {
        let mut redispatched = false;
        loop {
            let slot = regs.queue.slots[i];
            let Some(outcome) = slot.outcome() else {
                error!(slot = i, code = slot.code, "unrecognized exception-type code");
                counters.illegal += 1;
                return pack_signal(SIGILL, ILL_COPROC);
            };

            if outcome.is_none() {
                regs.queue.slots[i].clear();
                break;
            }

            if outcome == Outcome::UNIMPLEMENTED {
                if redispatched {
                    counters.illegal += 1;
                    return pack_signal(SIGILL, ILL_COPROC);
                }
                redispatched = true;
                status::clear_t_bit(regs.status_mut());
                let Some(major) = MajorOp::classify(slot.ir) else {
                    warn!(
                        ir = format_args!("{:#010x}", slot.ir),
                        "captured instruction is not a coprocessor op"
                    );
                    counters.illegal += 1;
                    return pack_signal(SIGILL, ILL_COPROC);
                };
                counters.redispatched += 1;
                let retried = dispatch(slot.ir, major, regs);
                regs.queue.slots[i].retag(retried);
                continue;
            }

            if outcome.contains(Outcome::UNDERFLOW) {
                counters.underflow += 1;
                if status::trap_enabled(regs.status(), Condition::Underflow) {
                    return pack_signal(SIGFPE, FPE_FLTUND);
                }
                match rewrite_wrapped(regs, slot.ir, false) {
                    Some(residue) if residue == Outcome::INEXACT => {
                        counters.inexact += 1;
                        return pack_signal(SIGFPE, FPE_FLTRES);
                    }
                    Some(_) => {
                        regs.queue.slots[i].clear();
                        break;
                    }
                    None => {
                        counters.illegal += 1;
                        return pack_signal(SIGILL, ILL_COPROC);
                    }
                }
            }

            if outcome.contains(Outcome::OVERFLOW) {
                counters.overflow += 1;
                if status::trap_enabled(regs.status(), Condition::Overflow) {
                    return pack_signal(SIGFPE, FPE_FLTOVF);
                }
                match rewrite_wrapped(regs, slot.ir, true) {
                    Some(residue) if residue == Outcome::INEXACT => {
                        counters.inexact += 1;
                        return pack_signal(SIGFPE, FPE_FLTRES);
                    }
                    Some(_) => {
                        regs.queue.slots[i].clear();
                        break;
                    }
                    None => {
                        counters.illegal += 1;
                        return pack_signal(SIGILL, ILL_COPROC);
                    }
                }
            }

            if outcome.contains(Outcome::INVALID) {
                counters.invalid += 1;
                return pack_signal(SIGFPE, FPE_FLTINV);
            }
            if outcome.contains(Outcome::DIV_BY_ZERO) {
                counters.div_by_zero += 1;
                return pack_signal(SIGFPE, FPE_FLTDIV);
            }
            // Only INEXACT remains.
            counters.inexact += 1;
            return pack_signal(SIGFPE, FPE_FLTRES);
        }
    }

    status::clear_t_bit(regs.status_mut());
    counters.resumed += 1;
    NO_SIGNAL
}

/// Rewrites a slot's wrapped overflow/underflow destination in place.
///
/// Returns the inexact residue to escalate, or `None` when the captured
/// instruction has no locatable floating destination.
fn rewrite_wrapped(regs: &mut RegisterFile, ir: u32, overflow: bool) -> Option<Outcome> {
    let major = MajorOp::classify(ir)?;
    let dest = dispatch::wrapped_destination(ir, major)?;
    match dest {
        WrappedDest::Single(idx) => {
            let bits = u64::from(regs.word(idx));
            let (v, residue) = if overflow {
                denorm::unwrap_overflow(&SINGLE, bits, regs.status_mut())
            } else {
                denorm::unwrap_underflow(&SINGLE, bits, regs.status_mut())
            };
            regs.set_word(idx, v as u32);
            Some(residue)
        }
        WrappedDest::Double(r) => {
            let bits = regs.double(r);
            let (v, residue) = if overflow {
                denorm::unwrap_overflow(&DOUBLE, bits, regs.status_mut())
            } else {
                denorm::unwrap_underflow(&DOUBLE, bits, regs.status_mut())
            };
            regs.set_double(r, v);
            Some(residue)
        }
    }
}
