//! The abacus evaluation engine.

use bumpalo::Bump;
use tracing::debug;

use super::{EngineOptions, Error};
use crate::{evaluator, parser, values::Number};

/// Parses and evaluates expressions with a fixed set of limits.
///
/// The engine holds no per-expression state. Each call to
/// [`Engine::evaluate`] allocates its tree in a fresh arena that is dropped
/// before returning, so one engine can be shared across threads.
///
/// # Example
///
/// ```
/// use abacus_core::{Engine, EngineOptions, Number};
///
/// let engine = Engine::new(EngineOptions::default());
/// assert_eq!(engine.evaluate("sqrt(16)").unwrap(), Number::Float(4.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse and evaluate `source`.
    pub fn evaluate(&self, source: &str) -> Result<Number, Error> {
        let arena = Bump::new();
        let parsed = parser::parse_with_max_depth(
            &arena,
            source,
            self.options.default_compilation_options.max_depth,
        )?;
        let value = evaluator::eval_with_options(&parsed, self.options.default_execution_options)?;
        debug!(allocated = arena.allocated_bytes(), "arena released");
        Ok(value)
    }
}
