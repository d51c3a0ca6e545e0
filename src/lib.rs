//! Abacus - A sandboxed arithmetic expression evaluator
//!
//! # Overview
//!
//! Abacus evaluates untrusted arithmetic text such as `2 * sqrt(16) + 1`.
//! Input is parsed into a tree and walked by an evaluator that accepts only
//! numeric literals, the operators `+ - * / // % **` (and unary `+ -`), and
//! calls to a fixed set of math functions. Names, attributes, subscripts,
//! strings and any other construct are rejected with a typed error; nothing
//! is ever executed as code.
//!
//! # Quick Start
//!
//! ```
//! use abacus::{Number, evaluate_expression};
//!
//! assert_eq!(evaluate_expression("2 + 3 * 4").unwrap(), Number::Int(14));
//! assert_eq!(evaluate_expression("sqrt(16)").unwrap(), Number::Float(4.0));
//! assert!(evaluate_expression("__import__('os')").is_err());
//! ```
//!
//! # Error Rendering
//!
//! Errors carry spans into the source text and can be rendered with a
//! highlighted snippet:
//!
//! ```
//! use abacus::{evaluate_expression, render_error_to_string_no_color};
//!
//! let source = "1 + sqrt(-1)";
//! let err = evaluate_expression(source).unwrap_err();
//! let report = render_error_to_string_no_color(source, &err);
//! assert!(report.contains("Math domain error"));
//! ```

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from abacus_core
pub use abacus_core::api::{
    CompilationOptions, Diagnostic, Engine, EngineOptions, Error, evaluate_expression,
};
pub use abacus_core::evaluator::{EvalError, EvaluatorOptions};
pub use abacus_core::parser::{ParseError, ParseErrorKind};
pub use abacus_core::stdlib::FUNCTIONS;
pub use abacus_core::values::Number;
