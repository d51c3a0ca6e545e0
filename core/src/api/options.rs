//! Configuration options for the abacus engine.

use crate::evaluator::EvaluatorOptions;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for parsing.
///
/// # Example
///
/// ```
/// use abacus_core::api::CompilationOptions;
///
/// let options = CompilationOptions { max_depth: 64 };
/// assert_eq!(CompilationOptions::default().max_depth, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Maximum bracket and unary-operator nesting accepted by the parser.
    ///
    /// Default: 100
    pub max_depth: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration options for the abacus engine.
///
/// # Example
///
/// ```
/// use abacus_core::api::{CompilationOptions, EngineOptions};
/// use abacus_core::evaluator::EvaluatorOptions;
///
/// let options = EngineOptions {
///     default_compilation_options: CompilationOptions::default(),
///     default_execution_options: EvaluatorOptions { max_depth: 64 },
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Options used when parsing.
    pub default_compilation_options: CompilationOptions,

    /// Options used when evaluating.
    pub default_execution_options: EvaluatorOptions,
}
