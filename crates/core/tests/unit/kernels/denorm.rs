//! Unwrap tests for trapped exponent-wrapped results.
//!
//! Each case first produces a wrapped result through a kernel with the
//! trap enabled, then unwraps it with the trap's substitute semantics and
//! checks the value matches what the untrapped kernel would have produced.

use fpemu_core::arch::format::SINGLE;
use fpemu_core::arch::status::{Condition, RoundingMode, sticky};
use fpemu_core::common::outcome::Outcome;
use fpemu_core::kernels::{denorm, mul};
use pretty_assertions::assert_eq;

use crate::common::{default_status, f32_bits, status_with, with_trap};

/// An exact wrapped underflow unwraps to the exact subnormal.
#[test]
fn unwrap_exact_underflow() {
    let mut sw = with_trap(default_status(), Condition::Underflow);
    let mut wrapped = 0;
    let o = mul::mul(
        &SINGLE,
        f32_bits(f32::MIN_POSITIVE),
        f32_bits(0.5),
        &mut wrapped,
        &mut sw,
    );
    assert_eq!(o, Outcome::UNDERFLOW);

    let mut sw = default_status();
    let (bits, residue) = denorm::unwrap_underflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(bits, f32_bits(f32::MIN_POSITIVE / 2.0));
    assert_eq!(residue, Outcome::NONE);
    assert!(!sticky(sw, Condition::Underflow));
    assert!(!sticky(sw, Condition::Inexact));
}

/// An inexact wrapped underflow unwraps with denormalization rounding and
/// makes underflow and inexact sticky.
#[test]
fn unwrap_inexact_underflow() {
    // Smallest subnormal halved: ties to even, vanishing entirely.
    let mut sw = with_trap(default_status(), Condition::Underflow);
    let mut wrapped = 0;
    let o = mul::mul(&SINGLE, 1, f32_bits(0.5), &mut wrapped, &mut sw);
    assert_eq!(o, Outcome::UNDERFLOW);

    let mut sw = default_status();
    let (bits, residue) = denorm::unwrap_underflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(bits, f32_bits(0.0));
    assert_eq!(residue, Outcome::NONE);
    assert!(sticky(sw, Condition::Underflow));
    assert!(sticky(sw, Condition::Inexact));
}

/// The inexact residue escalates when that trap is enabled.
#[test]
fn unwrap_underflow_escalates_inexact() {
    let mut sw = with_trap(default_status(), Condition::Underflow);
    let mut wrapped = 0;
    let _ = mul::mul(&SINGLE, 1, f32_bits(0.5), &mut wrapped, &mut sw);

    let mut sw = with_trap(default_status(), Condition::Inexact);
    let (_, residue) = denorm::unwrap_underflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(residue, Outcome::INEXACT);
}

/// A wrapped overflow unwraps to the round-mode-correct extreme.
#[test]
fn unwrap_overflow_substitutes() {
    let mut sw = with_trap(default_status(), Condition::Overflow);
    let mut wrapped = 0;
    let o = mul::mul(&SINGLE, f32_bits(f32::MAX), f32_bits(2.0), &mut wrapped, &mut sw);
    assert_eq!(o, Outcome::OVERFLOW);

    let mut sw = default_status();
    let (bits, residue) = denorm::unwrap_overflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(bits, f32_bits(f32::INFINITY));
    assert_eq!(residue, Outcome::NONE);
    assert!(sticky(sw, Condition::Overflow));
    assert!(sticky(sw, Condition::Inexact));

    let mut sw = status_with(RoundingMode::TowardZero);
    let (bits, _) = denorm::unwrap_overflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(bits, f32_bits(f32::MAX));
}

/// The overflow substitute keeps the wrapped result's sign.
#[test]
fn unwrap_overflow_keeps_sign() {
    let mut sw = with_trap(default_status(), Condition::Overflow);
    let mut wrapped = 0;
    let _ = mul::mul(&SINGLE, f32_bits(-f32::MAX), f32_bits(2.0), &mut wrapped, &mut sw);

    let mut sw = default_status();
    let (bits, _) = denorm::unwrap_overflow(&SINGLE, wrapped, &mut sw);
    assert_eq!(bits, f32_bits(f32::NEG_INFINITY));
}
