//! Public error types for the abacus API.
//!
//! Parse and evaluation errors stay distinct so callers can tell malformed
//! input from input that was well-formed but rejected or failed.

use thiserror::Error;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};

/// Error returned by [`crate::evaluate_expression`] and [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The text is not a well-formed expression.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The expression parsed but could not be evaluated.
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),
}

impl Error {
    /// Stable error code (`P001`, `E004`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Error::Parse(err) => err.code(),
            Error::Evaluation(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Parse(err) => err.to_diagnostic(),
            Error::Evaluation(err) => err.to_diagnostic(),
        }
    }
}

/// A single error message with its source location, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Suggestions on how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "E001") for documentation lookup.
    pub code: Option<String>,
}
