use crate::parser::{BinaryOp, BoolOp, ComparisonOp, UnaryOp, syntax::AnnotatedSource};

#[derive(Debug)]
pub struct ParsedExpr<'a> {
    pub expr: &'a Expr<'a>,
    pub ann: &'a AnnotatedSource<'a, Expr<'a>>,
}

/// A node of the parsed syntax tree.
///
/// The grammar accepts more than the evaluator does: anything other than
/// numeric literals, arithmetic operators and calls to bare names is parsed
/// so that the evaluator can reject it with a precise error.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary {
        op: BinaryOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Boolean {
        op: BoolOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Comparison {
        op: ComparisonOp,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Unary {
        op: UnaryOp,
        expr: &'a Expr<'a>,
    },
    Call {
        callable: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    Index {
        value: &'a Expr<'a>,
        index: &'a Expr<'a>,
    },
    Field {
        value: &'a Expr<'a>,
        field: &'a str,
    },
    List(&'a [&'a Expr<'a>]),
    Tuple(&'a [&'a Expr<'a>]),
    Literal(Literal<'a>),
    Ident(&'a str),
}

impl<'a> Expr<'a> {
    /// Short human-readable name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Binary { .. } => "binary operation",
            Expr::Boolean { .. } => "boolean operation",
            Expr::Comparison { .. } => "comparison",
            Expr::Unary { .. } => "unary operation",
            Expr::Call { .. } => "function call",
            Expr::Index { .. } => "subscript",
            Expr::Field { .. } => "attribute access",
            Expr::List(_) => "list literal",
            Expr::Tuple(_) => "tuple literal",
            Expr::Literal(literal) => literal.kind_name(),
            Expr::Ident(_) => "name",
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum Literal<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    None,
}

impl<'a> Literal<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "boolean",
            Literal::Str(_) => "string",
            Literal::None => "None",
        }
    }
}

impl<'a> core::fmt::Debug for Literal<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "Int({value})"),
            Literal::Float(value) => write!(f, "Float({value:?})"),
            Literal::Bool(b) => write!(f, "Bool({b})"),
            Literal::Str(s) => write!(f, "Str({s:?})"),
            Literal::None => write!(f, "None"),
        }
    }
}
