//! Tree-walking evaluator for parsed arithmetic expressions.
//!
//! The evaluator is where the sandbox is enforced. The parser accepts a broad
//! grammar; every node is classified here and anything that is not a numeric
//! literal, an arithmetic operator or a call to a whitelisted function is
//! rejected before its children are touched.
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking prevents stack overflow from deeply nested expressions
//! - **Closed world**: Only names in [`crate::stdlib::FUNCTIONS`] can be called
//!
//! ## Example
//!
//! ```
//! use abacus_core::{evaluator, parser, values::Number};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let parsed = parser::parse(&arena, "1 + 2").unwrap();
//! assert_eq!(evaluator::eval(&parsed).unwrap(), Number::Int(3));
//! ```

mod error;
mod eval;
mod operators;


pub use error::EvalError;
pub use eval::Evaluator;

use crate::{parser::ParsedExpr, values::Number};

/// Default maximum evaluation depth.
///
/// Left-associative chains such as `1 + 1 + ... + 1` are not limited by the
/// parser, so this bound alone keeps them within a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Runtime limits for the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 200
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Evaluate a parsed expression with default limits.
pub fn eval(parsed: &ParsedExpr<'_>) -> Result<Number, EvalError> {
    eval_with_options(parsed, EvaluatorOptions::default())
}

/// Evaluate a parsed expression with custom limits.
///
/// ```ignore
/// // Allow deeper recursion for specific use case
/// let result = eval_with_options(&parsed, EvaluatorOptions { max_depth: 5000 })?;
/// ```
pub fn eval_with_options(
    parsed: &ParsedExpr<'_>,
    options: EvaluatorOptions,
) -> Result<Number, EvalError> {
    Evaluator::new(options, parsed).eval()
}
