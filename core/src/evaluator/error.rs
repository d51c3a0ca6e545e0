//! Evaluation errors.
//!
//! Every error carries the span of the node that caused it, when known.
//! Rejections (`Unsupported*`) come from the whitelist; the rest are
//! arithmetic faults on otherwise accepted input.

use thiserror::Error;

use crate::api::Diagnostic;
use crate::parser::Span;
use crate::stdlib::Arity;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Node kind outside the accepted set (names, attributes, subscripts, ...).
    #[error("Unsupported expression: {kind}")]
    UnsupportedExpression {
        kind: &'static str,
        span: Option<Span>,
    },

    #[error("Unsupported operator '{op}'")]
    UnsupportedOperator { op: &'static str, span: Option<Span> },

    /// Literal that is not a number.
    #[error("Unsupported constant of type {kind}")]
    UnsupportedConstant {
        kind: &'static str,
        span: Option<Span>,
    },

    /// Call to a name that is not whitelisted.
    #[error("Unsupported function '{name}'")]
    UnsupportedFunction { name: String, span: Option<Span> },

    #[error("{name}() takes {expected}, got {got}")]
    ArityMismatch {
        name: &'static str,
        expected: Arity,
        got: usize,
        span: Option<Span>,
    },

    #[error("Division by zero")]
    DivisionByZero { span: Option<Span> },

    #[error("Math domain error in {operation}")]
    DomainError {
        operation: &'static str,
        span: Option<Span>,
    },

    /// Finite operands whose result does not fit a double.
    #[error("Numeric overflow in {operation}")]
    Overflow {
        operation: &'static str,
        span: Option<Span>,
    },

    #[error("Evaluation depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded {
        depth: usize,
        max_depth: usize,
        span: Option<Span>,
    },
}

impl EvalError {
    pub fn span(&self) -> Option<&Span> {
        match self {
            EvalError::UnsupportedExpression { span, .. }
            | EvalError::UnsupportedOperator { span, .. }
            | EvalError::UnsupportedConstant { span, .. }
            | EvalError::UnsupportedFunction { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::DomainError { span, .. }
            | EvalError::Overflow { span, .. }
            | EvalError::DepthExceeded { span, .. } => span.as_ref(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EvalError::UnsupportedExpression { .. } => "E001",
            EvalError::UnsupportedOperator { .. } => "E002",
            EvalError::UnsupportedConstant { .. } => "E003",
            EvalError::UnsupportedFunction { .. } => "E004",
            EvalError::ArityMismatch { .. } => "E005",
            EvalError::DivisionByZero { .. } => "E006",
            EvalError::DomainError { .. } => "E007",
            EvalError::Overflow { .. } => "E008",
            EvalError::DepthExceeded { .. } => "E009",
        }
    }

    /// True for errors raised because the input leaves the allowed subset,
    /// as opposed to arithmetic failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EvalError::UnsupportedExpression { .. }
                | EvalError::UnsupportedOperator { .. }
                | EvalError::UnsupportedConstant { .. }
                | EvalError::UnsupportedFunction { .. }
        )
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let help = match self {
            EvalError::UnsupportedExpression { .. } => vec![
                "Only numbers, arithmetic operators and whitelisted function calls are allowed"
                    .to_string(),
            ],
            EvalError::UnsupportedOperator { .. } => {
                vec!["Supported operators: + - * / // % ** and unary + -".to_string()]
            }
            EvalError::UnsupportedConstant { .. } => {
                vec!["Only integer and float literals are allowed".to_string()]
            }
            EvalError::UnsupportedFunction { .. } => vec![format!(
                "Available functions: {}",
                crate::stdlib::FUNCTIONS
                    .iter()
                    .map(|function| function.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )],
            EvalError::DepthExceeded { .. } => {
                vec!["Reduce nesting or simplify the expression".to_string()]
            }
            EvalError::ArityMismatch { .. }
            | EvalError::DivisionByZero { .. }
            | EvalError::DomainError { .. }
            | EvalError::Overflow { .. } => vec![],
        };

        Diagnostic {
            message: self.to_string(),
            span: self.span().cloned().unwrap_or(Span(0..0)),
            help,
            code: Some(self.code().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EvalError::ArityMismatch {
            name: "log",
            expected: Arity::between(1, 2),
            got: 3,
            span: None,
        };
        assert_eq!(err.to_string(), "log() takes 1 or 2 arguments, got 3");

        let err = EvalError::UnsupportedFunction {
            name: "__import__".to_string(),
            span: Some(Span(0..10)),
        };
        assert_eq!(err.to_string(), "Unsupported function '__import__'");
        assert_eq!(err.span(), Some(&Span(0..10)));
    }

    #[test]
    fn test_to_diagnostic() {
        let err = EvalError::DivisionByZero {
            span: Some(Span(0..3)),
        };
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.message, "Division by zero");
        assert_eq!(diagnostic.span, Span(0..3));
        assert_eq!(diagnostic.code.as_deref(), Some("E006"));
        assert!(diagnostic.help.is_empty());

        let diagnostic = EvalError::UnsupportedFunction {
            name: "open".to_string(),
            span: None,
        }
        .to_diagnostic();
        assert_eq!(diagnostic.span, Span(0..0));
        assert!(diagnostic.help[0].contains("sqrt"));
    }

    #[test]
    fn test_rejection_classification() {
        assert!(
            EvalError::UnsupportedConstant {
                kind: "string",
                span: None
            }
            .is_rejection()
        );
        assert!(!EvalError::DivisionByZero { span: None }.is_rejection());
    }
}
