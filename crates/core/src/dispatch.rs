//! Instruction dispatcher.
//!
//! Stateless decode-and-call: given an instruction word and its major-opcode
//! classification from trap entry, extract the class/sub-operation/format
//! fields and invoke exactly one kernel (or, for the multiple-operation
//! majors, two independent kernels whose outcomes combine into one report).
//! Any undefined class/sub-operation/format combination returns
//! `UNIMPLEMENTED` — never a guessed result.

use tracing::debug;

use crate::arch::format::{DOUBLE, FixedFormat, Format, Layout, SINGLE};
use crate::arch::regfile::RegisterFile;
use crate::common::outcome::Outcome;
use crate::isa::fields;
use crate::isa::opcode::MajorOp;
use crate::kernels::{add, cmp, cnv, div, fma, mul, rem, sqrt};

/// Where an instruction writes its floating-point result.
///
/// The exception-queue decoder uses this to rewrite a trapped
/// overflow/underflow destination in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WrappedDest {
    /// A single-precision word index.
    Single(usize),
    /// A double-precision register number.
    Double(usize),
}

/// Register-file word index of a single-precision operand.
#[inline]
fn word_index(r: u32, ext: u32) -> usize {
    (r * 2 + ext) as usize
}

/// Reads an operand of the given format.
fn read(regs: &RegisterFile, fmt: Format, r: u32, ext: u32) -> u64 {
    match fmt {
        Format::Single => u64::from(regs.word(word_index(r, ext))),
        Format::Double => regs.double(r as usize),
        Format::Quad => 0,
    }
}

/// Writes a result of the given format.
fn write(regs: &mut RegisterFile, fmt: Format, r: u32, ext: u32, v: u64) {
    match fmt {
        Format::Single => regs.set_word(word_index(r, ext), v as u32),
        Format::Double => regs.set_double(r as usize, v),
        Format::Quad => {}
    }
}

/// The kernel-facing layout for a format, if one is implemented.
fn layout(fmt: Format) -> Option<&'static Layout> {
    match fmt {
        Format::Single => Some(&SINGLE),
        Format::Double => Some(&DOUBLE),
        Format::Quad => None,
    }
}

/// Decodes one trapped instruction and runs it against the register file.
pub fn dispatch(ir: u32, major: MajorOp, regs: &mut RegisterFile) -> Outcome {
    let outcome = match major {
        MajorOp::CoprOp => fpop(ir, false, regs),
        MajorOp::CoprOpExt => fpop(ir, true, regs),
        MajorOp::MultiAdd => multi(ir, false, regs),
        MajorOp::MultiSub => multi(ir, true, regs),
        MajorOp::Fused => fused(ir, regs),
    };
    debug!(ir = format_args!("{ir:#010x}"), ?major, ?outcome, "dispatched");
    outcome
}

/// The coprocessor-operation majors (0x0C, and 0x0E with extended register
/// numbering).
fn fpop(ir: u32, extended: bool, regs: &mut RegisterFile) -> Outcome {
    let (e1, e2, et) = if extended {
        (fields::ext_r1(ir), fields::ext_r2(ir), fields::ext_t(ir))
    } else {
        (0, 0, 0)
    };

    match fields::class(ir) {
        0 => unary(ir, e1, et, regs),
        1 => convert(ir, e1, et, regs),
        2 => compare(ir, e1, e2, regs),
        _ => dyadic(ir, e1, e2, et, regs),
    }
}

/// Class 0: register moves, square root, round-to-integral.
fn unary(ir: u32, e1: u32, et: u32, regs: &mut RegisterFile) -> Outcome {
    let Some(fmt) = Format::from_bits(fields::fmt(ir)) else {
        return Outcome::UNIMPLEMENTED;
    };
    let Some(l) = layout(fmt) else {
        return Outcome::UNIMPLEMENTED;
    };
    let a = read(regs, fmt, fields::r1(ir), e1);
    let t = fields::t(ir);

    // Copy, abs, negate, and negate-abs are pure sign-bit moves.
    let moved = match fields::sub(ir) {
        1 => Some(a),
        2 => Some(l.magnitude(a)),
        5 => Some(l.negate(a)),
        6 => Some(l.negate(l.magnitude(a))),
        _ => None,
    };
    if let Some(v) = moved {
        write(regs, fmt, t, et, v);
        return Outcome::NONE;
    }

    let mut out = 0_u64;
    let outcome = match fields::sub(ir) {
        3 => sqrt::sqrt(l, a, &mut out, regs.status_mut()),
        4 => cnv::round_to_int(l, a, &mut out, regs.status_mut()),
        _ => return Outcome::UNIMPLEMENTED,
    };
    write(regs, fmt, t, et, out);
    outcome
}

/// Class 1: the conversion family.
fn convert(ir: u32, e1: u32, et: u32, regs: &mut RegisterFile) -> Outcome {
    let t = fields::t(ir);
    let signed = !fields::cnv_unsigned(ir);

    match fields::cnv_sub(ir) {
        0 => {
            let (Some(src), Some(dfmt)) = (
                Format::from_bits(fields::fmt(ir)),
                Format::from_bits(fields::cnv_dst_fmt(ir)),
            ) else {
                return Outcome::UNIMPLEMENTED;
            };
            let (Some(sl), Some(dl)) = (layout(src), layout(dfmt)) else {
                return Outcome::UNIMPLEMENTED;
            };
            let a = read(regs, src, fields::r1(ir), e1);
            let mut out = 0_u64;
            let outcome = cnv::cnv_ff(sl, dl, a, &mut out, regs.status_mut());
            write(regs, dfmt, t, et, out);
            outcome
        }
        1 => {
            let (Some(src), Some(dfmt)) = (
                FixedFormat::from_bits(fields::fmt(ir)),
                Format::from_bits(fields::cnv_dst_fmt(ir)),
            ) else {
                return Outcome::UNIMPLEMENTED;
            };
            let Some(dl) = layout(dfmt) else {
                return Outcome::UNIMPLEMENTED;
            };
            let v = match src {
                FixedFormat::Word => {
                    let w = regs.word(word_index(fields::r1(ir), e1));
                    if signed {
                        i64::from(w as i32) as u64
                    } else {
                        u64::from(w)
                    }
                }
                FixedFormat::DoubleWord => regs.double(fields::r1(ir) as usize),
            };
            let mut out = 0_u64;
            let outcome = cnv::fixed_to_float(dl, v, signed, &mut out, regs.status_mut());
            write(regs, dfmt, t, et, out);
            outcome
        }
        sub => {
            let truncate = sub == 3;
            let (Some(src), Some(dfmt)) = (
                Format::from_bits(fields::fmt(ir)),
                FixedFormat::from_bits(fields::cnv_dst_fmt(ir)),
            ) else {
                return Outcome::UNIMPLEMENTED;
            };
            let Some(sl) = layout(src) else {
                return Outcome::UNIMPLEMENTED;
            };
            let width = match dfmt {
                FixedFormat::Word => 32,
                FixedFormat::DoubleWord => 64,
            };
            let a = read(regs, src, fields::r1(ir), e1);
            let mut out = 0_u64;
            let outcome =
                cnv::float_to_fixed(sl, a, signed, width, truncate, &mut out, regs.status_mut());
            match dfmt {
                FixedFormat::Word => regs.set_word(word_index(t, et), out as u32),
                FixedFormat::DoubleWord => regs.set_double(t as usize, out),
            }
            outcome
        }
    }
}

/// Class 2: compare, with the condition in the `t` field.
fn compare(ir: u32, e1: u32, e2: u32, regs: &mut RegisterFile) -> Outcome {
    let Some(fmt) = Format::from_bits(fields::fmt(ir)) else {
        return Outcome::UNIMPLEMENTED;
    };
    let Some(l) = layout(fmt) else {
        return Outcome::UNIMPLEMENTED;
    };
    let a = read(regs, fmt, fields::r1(ir), e1);
    let b = read(regs, fmt, fields::r2(ir), e2);
    cmp::cmp(l, a, b, fields::t(ir), regs.status_mut())
}

/// Class 3: the dyadic arithmetic kernels.
fn dyadic(ir: u32, e1: u32, e2: u32, et: u32, regs: &mut RegisterFile) -> Outcome {
    let Some(fmt) = Format::from_bits(fields::fmt(ir)) else {
        return Outcome::UNIMPLEMENTED;
    };
    let Some(l) = layout(fmt) else {
        return Outcome::UNIMPLEMENTED;
    };
    let a = read(regs, fmt, fields::r1(ir), e1);
    let b = read(regs, fmt, fields::r2(ir), e2);

    let mut out = 0_u64;
    let sw = regs.status_mut();
    let outcome = match fields::sub(ir) {
        0 => add::add(l, a, b, &mut out, sw),
        1 => add::sub(l, a, b, &mut out, sw),
        2 => mul::mul(l, a, b, &mut out, sw),
        3 => div::div(l, a, b, &mut out, sw),
        4 => rem::rem(l, a, b, &mut out, sw),
        _ => return Outcome::UNIMPLEMENTED,
    };
    write(regs, fmt, fields::t(ir), et, out);
    outcome
}

/// The multiple-operation majors: an independent multiply and add/subtract
/// in one instruction word.
///
/// The multiply's outcome takes report priority; the other sub-operation
/// still runs and accumulates its sticky flags either way.
fn multi(ir: u32, subtract: bool, regs: &mut RegisterFile) -> Outcome {
    let fmt = if fields::m_single(ir) {
        Format::Single
    } else {
        Format::Double
    };
    let l = if fields::m_single(ir) {
        &SINGLE
    } else {
        &DOUBLE
    };

    let x = read(regs, fmt, fields::m_rm1(ir), 0);
    let y = read(regs, fmt, fields::m_rm2(ir), 0);
    let mut prod = 0_u64;
    let mul_outcome = mul::mul(l, x, y, &mut prod, regs.status_mut());
    write(regs, fmt, fields::m_tm(ir), 0, prod);

    let ta = read(regs, fmt, fields::m_ta(ir), 0);
    let ra = read(regs, fmt, fields::m_ra(ir), 0);
    let mut sum = 0_u64;
    let add_outcome = if subtract {
        add::sub(l, ta, ra, &mut sum, regs.status_mut())
    } else {
        add::add(l, ta, ra, &mut sum, regs.status_mut())
    };
    write(regs, fmt, fields::m_ta(ir), 0, sum);

    if mul_outcome.is_none() {
        add_outcome
    } else {
        mul_outcome
    }
}

/// The fused multiply-add major.
fn fused(ir: u32, regs: &mut RegisterFile) -> Outcome {
    let fmt = if fields::f_single(ir) {
        Format::Single
    } else {
        Format::Double
    };
    let l = if fields::f_single(ir) {
        &SINGLE
    } else {
        &DOUBLE
    };

    let a = read(regs, fmt, fields::r1(ir), 0);
    let b = read(regs, fmt, fields::r2(ir), 0);
    let c = read(regs, fmt, fields::f_r3(ir), 0);
    let mut out = 0_u64;
    let outcome = if fields::f_neg(ir) {
        fma::fnma(l, a, b, c, &mut out, regs.status_mut())
    } else {
        fma::fma(l, a, b, c, &mut out, regs.status_mut())
    };
    write(regs, fmt, fields::t(ir), 0, out);
    outcome
}

/// The destination a trapped overflow/underflow result was written to.
///
/// Compares and fixed-point destinations have no wrapped floating result;
/// for the multiple-operation majors the wrapped value is attributed to the
/// multiply target, matching report priority.
pub(crate) fn wrapped_destination(ir: u32, major: MajorOp) -> Option<WrappedDest> {
    let float_dest = |fmt: Format, t: u32, et: u32| match fmt {
        Format::Single => Some(WrappedDest::Single(word_index(t, et))),
        Format::Double => Some(WrappedDest::Double(t as usize)),
        Format::Quad => None,
    };

    match major {
        MajorOp::CoprOp | MajorOp::CoprOpExt => {
            let et = if major == MajorOp::CoprOpExt {
                fields::ext_t(ir)
            } else {
                0
            };
            let t = fields::t(ir);
            match fields::class(ir) {
                0 | 3 => float_dest(Format::from_bits(fields::fmt(ir))?, t, et),
                1 => match fields::cnv_sub(ir) {
                    0 | 1 => float_dest(Format::from_bits(fields::cnv_dst_fmt(ir))?, t, et),
                    _ => None,
                },
                _ => None,
            }
        }
        MajorOp::MultiAdd | MajorOp::MultiSub => {
            let fmt = if fields::m_single(ir) {
                Format::Single
            } else {
                Format::Double
            };
            float_dest(fmt, fields::m_tm(ir), 0)
        }
        MajorOp::Fused => {
            let fmt = if fields::f_single(ir) {
                Format::Single
            } else {
                Format::Double
            };
            float_dest(fmt, fields::t(ir), 0)
        }
    }
}
