//! IEEE remainder kernel tests.
//!
//! The remainder is always exact, so expectations are concrete values: the
//! host standard library exposes no IEEE remainder to compare against.

use fpemu_core::arch::format::{DOUBLE, SINGLE};
use fpemu_core::arch::status::{Condition, sticky};
use fpemu_core::common::outcome::Outcome;
use fpemu_core::kernels::rem;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{default_status, f32_bits, f64_bits};

/// Nearest-quotient remainders, including the away-rounded and tie cases.
#[rstest]
#[case(5.0, 2.0, 1.0)] // quotient 2.5 rounds to 2
#[case(7.0, 2.0, -1.0)] // quotient 3.5 ties to 4
#[case(3.0, 2.0, -1.0)] // quotient 1.5 ties to 2
#[case(5.5, 1.25, 0.5)] // quotient 4.4 rounds to 4
#[case(0.75, 1.0, -0.25)] // quotient rounds up to 1
#[case(0.5, 1.0, 0.5)] // half tie keeps quotient 0
#[case(0.25, 1.0, 0.25)] // quotient rounds to 0
#[case(-7.0, 2.0, 1.0)] // dividend sign flows through
fn nearest_quotient(#[case] a: f32, #[case] b: f32, #[case] expected: f32) {
    let mut sw = default_status();
    let mut out = 0;
    let o = rem::rem(&SINGLE, f32_bits(a), f32_bits(b), &mut out, &mut sw);
    assert_eq!(o, Outcome::NONE);
    assert_eq!(out, f32_bits(expected));
    // Always exact: no flag ever accumulates.
    assert_eq!(sw, default_status());
}

/// An exact zero remainder takes the dividend's sign.
#[test]
fn exact_zero_takes_dividend_sign() {
    let mut sw = default_status();
    let mut out = 0;
    let _ = rem::rem(&SINGLE, f32_bits(-4.0), f32_bits(2.0), &mut out, &mut sw);
    assert_eq!(out, f32_bits(-0.0));
    let _ = rem::rem(&SINGLE, f32_bits(4.0), f32_bits(2.0), &mut out, &mut sw);
    assert_eq!(out, f32_bits(0.0));
}

/// An infinite dividend or zero divisor is invalid.
#[test]
fn invalid_operands() {
    let mut sw = default_status();
    let mut out = 0;
    let o = rem::rem(
        &DOUBLE,
        f64_bits(f64::INFINITY),
        f64_bits(2.0),
        &mut out,
        &mut sw,
    );
    assert_eq!(o, Outcome::NONE);
    assert_eq!(out, DOUBLE.qnan());
    assert!(sticky(sw, Condition::Invalid));

    let mut sw = default_status();
    let _ = rem::rem(&DOUBLE, f64_bits(2.0), f64_bits(0.0), &mut out, &mut sw);
    assert_eq!(out, DOUBLE.qnan());
    assert!(sticky(sw, Condition::Invalid));
}

/// An infinite divisor or zero dividend passes the dividend through.
#[test]
fn passthrough_operands() {
    let mut sw = default_status();
    let mut out = 0;
    let _ = rem::rem(
        &DOUBLE,
        f64_bits(-2.5),
        f64_bits(f64::INFINITY),
        &mut out,
        &mut sw,
    );
    assert_eq!(out, f64_bits(-2.5));

    let _ = rem::rem(&DOUBLE, f64_bits(-0.0), f64_bits(3.0), &mut out, &mut sw);
    assert_eq!(out, f64_bits(-0.0));
}

/// Double precision runs the same reduction.
#[test]
fn double_precision_reduction() {
    let mut sw = default_status();
    let mut out = 0;
    let _ = rem::rem(&DOUBLE, f64_bits(17.0), f64_bits(5.0), &mut out, &mut sw);
    assert_eq!(out, f64_bits(2.0));
    let _ = rem::rem(&DOUBLE, f64_bits(18.0), f64_bits(5.0), &mut out, &mut sw);
    assert_eq!(out, f64_bits(-2.0));
}
