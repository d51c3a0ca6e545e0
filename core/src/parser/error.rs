use thiserror::Error;

use crate::api::Diagnostic;
use crate::parser::{Rule, Span};

/// Parser error with the source it was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Nothing but whitespace
    #[error("Expected an expression, found empty input")]
    EmptyInput,
    /// Unexpected token
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    /// Unclosed delimiter
    #[error("Unclosed delimiter '{delimiter}'")]
    UnclosedDelimiter { delimiter: char },
    /// Invalid number literal
    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String },
    /// Maximum nesting depth exceeded
    #[error("Expression nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    #[error("{message}")]
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => "P001",
            ParseErrorKind::UnclosedDelimiter { .. } => "P002",
            ParseErrorKind::InvalidNumber { .. } => "P003",
            ParseErrorKind::MaxDepthExceeded { .. } => "P004",
            ParseErrorKind::EmptyInput => "P005",
            ParseErrorKind::Other { .. } => "P999",
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let help = match &self.kind {
            ParseErrorKind::EmptyInput => {
                vec!["Enter an arithmetic expression such as 2 + 2".to_string()]
            }
            ParseErrorKind::UnclosedDelimiter { .. } => {
                vec!["Add the missing closing delimiter".to_string()]
            }
            ParseErrorKind::InvalidNumber { .. } => vec![
                "Integers must fit in 64 bits; write large values as floats (e.g. 1e30)"
                    .to_string(),
            ],
            ParseErrorKind::MaxDepthExceeded { .. } => {
                vec!["Reduce nesting or simplify the expression".to_string()]
            }
            ParseErrorKind::UnexpectedToken { .. } | ParseErrorKind::Other { .. } => vec![],
        };

        Diagnostic {
            message: self.kind.to_string(),
            span: self.span.clone(),
            help,
            code: Some(self.code().to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [{}]", self.kind, self.code())
    }
}

impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => {
            let expected = format_expected_rules(&positives);
            let found = if negatives.is_empty() {
                describe_found(source, span.0.start)
            } else {
                format_found_rules(&negatives)
            };

            ParseErrorKind::UnexpectedToken { expected, found }
        }
        ErrorVariant::CustomError { message } => {
            if message.starts_with("invalid integer literal")
                || message.starts_with("invalid float literal")
            {
                ParseErrorKind::InvalidNumber {
                    text: span.str_of(source).to_string(),
                }
            } else {
                ParseErrorKind::Other { message }
            }
        }
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "something else".to_string();
    }

    // Group related rules into higher-level concepts
    let mut concepts = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::integer | Rule::float => "number",
            Rule::ident => "identifier",
            Rule::EOI => "end of input",
            Rule::pow
            | Rule::floor_div
            | Rule::mul
            | Rule::div
            | Rule::modulo
            | Rule::add
            | Rule::sub
            | Rule::shl
            | Rule::shr
            | Rule::le
            | Rule::ge
            | Rule::eq
            | Rule::neq
            | Rule::lt
            | Rule::gt
            | Rule::bit_and
            | Rule::bit_or
            | Rule::bit_xor
            | Rule::and
            | Rule::or => "operator",
            Rule::call_op | Rule::index_op | Rule::field_op => "operator",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "something else".to_string(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Format found rules in a human-readable way
fn format_found_rules(rules: &[Rule]) -> String {
    match rules.first() {
        None => "unexpected token".to_string(),
        Some(Rule::ident) => "identifier".to_string(),
        Some(Rule::integer) => "integer".to_string(),
        Some(Rule::float) => "floating-point number".to_string(),
        Some(Rule::boolean) => "boolean".to_string(),
        Some(Rule::string) => "string".to_string(),
        Some(Rule::EOI) => "end of input".to_string(),
        Some(Rule::grouped) => "grouped expression".to_string(),
        Some(rule) => format!("{:?}", rule),
    }
}

/// Describe the character at `pos`, or end of input.
fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}
