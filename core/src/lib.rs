//! Core of the abacus arithmetic evaluator.
//!
//! Source text is parsed into an arena-allocated [`parser::Expr`] tree, which
//! the [`evaluator`] walks while rejecting every construct outside a fixed
//! numeric grammar. The [`api`] module ties both together.

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod stdlib;
pub mod values;

pub use api::{Engine, EngineOptions, Error, evaluate_expression};
pub use values::Number;
