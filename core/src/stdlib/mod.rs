//! Functions that expressions are allowed to call.
//!
//! The whitelist is a closed, compile-time table mapping a bare name to a
//! native function pointer. Nothing outside [`math::FUNCTIONS`] can ever be
//! resolved by name.

pub mod math;

pub use math::{Arity, FUNCTIONS, MathError, MathFunction, lookup};
