//! Arithmetic kernel tests.
//!
//! Where the host rounds identically (round-to-nearest on IEEE hardware,
//! fused `mul_add`, `f64 as f32` narrowing), results are checked bit for bit
//! against host arithmetic over random operands; directed tests cover the
//! rounding modes, exception flags, and the trap-enabled outcomes the host
//! cannot reproduce.




/// Unwrapping of trapped exponent-wrapped results.
pub mod denorm;




/// IEEE remainder.
pub mod rem;
