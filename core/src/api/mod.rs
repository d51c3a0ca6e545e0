//! Public API for the abacus evaluator.
//!
//! [`evaluate_expression`] is the one-call entry point: it parses the text
//! into a fresh arena and evaluates it with default limits. An [`Engine`]
//! does the same with configurable limits.
//!
//! # Example
//!
//! ```
//! use abacus_core::{Number, evaluate_expression};
//!
//! assert_eq!(evaluate_expression("2 + 3 * 4").unwrap(), Number::Int(14));
//! assert!(evaluate_expression("__import__('os')").is_err());
//! ```

pub mod engine;
pub mod error;
pub mod options;

pub use engine::Engine;
pub use error::{Diagnostic, Error};
pub use options::{CompilationOptions, EngineOptions};

use crate::values::Number;

/// Parse and evaluate `source` with default limits.
///
/// Pure and re-entrant: every call uses its own arena and shares nothing
/// mutable, so independent threads may call it concurrently.
pub fn evaluate_expression(source: &str) -> Result<Number, Error> {
    Engine::default().evaluate(source)
}
