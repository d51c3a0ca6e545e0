use bumpalo::Bump;
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use tracing::debug;

use crate::parser::error::{ParseError, ParseErrorKind, convert_pest_error};
use crate::parser::{
    AnnotatedSource, BinaryOp, BoolOp, ComparisonOp, Expr, Literal, ParsedExpr, Span, UnaryOp,
};

/// Default limit for bracket nesting plus pending prefix operators and `**`.
///
/// Sized so that parsing and evaluating fit in the 2 MiB stack of a spawned
/// thread in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 100;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        // Logical operators.
        .op(Op::infix(Rule::or, Assoc::Left))            // `or`
        .op(Op::infix(Rule::and, Assoc::Left))           // `and`
        .op(Op::prefix(Rule::not))                       // `not`

        // Comparisons.
        .op(
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left)
        )                                               // `==`, `!=`, `<`, `<=`, `>`, `>=`

        // Bitwise operators.
        .op(Op::infix(Rule::bit_or, Assoc::Left))        // `|`
        .op(Op::infix(Rule::bit_xor, Assoc::Left))       // `^`
        .op(Op::infix(Rule::bit_and, Assoc::Left))       // `&`
        .op(
            Op::infix(Rule::shl, Assoc::Left) |
            Op::infix(Rule::shr, Assoc::Left)
        )                                               // `<<`, `>>`

        // Arithmetic operators.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left) |
            Op::infix(Rule::floor_div, Assoc::Left) |
            Op::infix(Rule::modulo, Assoc::Left)
        )                                               // `*`, `/`, `//`, `%`
        .op(
            Op::prefix(Rule::neg) |
            Op::prefix(Rule::pos) |
            Op::prefix(Rule::invert)
        )                                               // `-`, `+`, `~`
        .op(Op::infix(Rule::pow, Assoc::Right))          // `**` (right-assoc)

        // Postfix operators.
        .op(
            Op::postfix(Rule::call_op) |
            Op::postfix(Rule::index_op) |
            Op::postfix(Rule::field_op)
        )                                               // `()`, `[]`, `.`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

type PestResult<T> = Result<T, pest::error::Error<Rule>>;

fn custom_error(message: &str, span: pest::Span<'_>) -> pest::error::Error<Rule> {
    pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError {
            message: message.to_string(),
        },
        span,
    )
}

/// Builds arena nodes from pest pairs, recording a span for each one.
struct TreeBuilder<'a> {
    arena: &'a Bump,
    ann: &'a AnnotatedSource<'a, Expr<'a>>,
}

impl<'a> TreeBuilder<'a> {
    fn alloc(&self, expr: Expr<'a>, span: Span) -> &'a Expr<'a> {
        let expr = self.arena.alloc(expr);
        self.ann.add_span(expr, span);
        expr
    }

    fn span_of(&self, expr: &Expr<'a>) -> Span {
        self.ann.span_of(expr).unwrap_or(Span::new(0, 0))
    }

    fn parse_items(&self, pairs: Pairs<'a, Rule>) -> PestResult<&'a [&'a Expr<'a>]> {
        let items = pairs
            .map(|pair| self.parse_expr(pair))
            .collect::<PestResult<Vec<_>>>()?;
        Ok(self.arena.alloc_slice_copy(&items))
    }

    fn parse_expr(&self, pair: Pair<'a, Rule>) -> PestResult<&'a Expr<'a>> {
        let span = Span::from(pair.as_span());
        match pair.as_rule() {
            Rule::main => {
                let pest_span = pair.as_span();
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| custom_error("missing expected pair in rule", pest_span))?;
                self.parse_expr(inner)
            }

            Rule::expression => PRATT_PARSER
                .map_primary(|primary| self.parse_expr(primary))
                .map_prefix(|op, rhs| {
                    let rhs = rhs?;
                    let op_span = Span::from(op.as_span());
                    let op = match op.as_rule() {
                        Rule::neg => UnaryOp::Neg,
                        Rule::pos => UnaryOp::Pos,
                        Rule::invert => UnaryOp::Invert,
                        Rule::not => UnaryOp::Not,
                        rule => {
                            return Err(custom_error(
                                &format!("unknown prefix operator: {rule:?}"),
                                op.as_span(),
                            ));
                        }
                    };
                    let span = Span::combine(&op_span, &self.span_of(rhs));
                    Ok(self.alloc(Expr::Unary { op, expr: rhs }, span))
                })
                .map_infix(|lhs, op, rhs| {
                    let (left, right) = (lhs?, rhs?);
                    let span = Span::combine(&self.span_of(left), &self.span_of(right));
                    let expr = match op.as_rule() {
                        Rule::add => binary(BinaryOp::Add, left, right),
                        Rule::sub => binary(BinaryOp::Sub, left, right),
                        Rule::mul => binary(BinaryOp::Mul, left, right),
                        Rule::div => binary(BinaryOp::Div, left, right),
                        Rule::floor_div => binary(BinaryOp::FloorDiv, left, right),
                        Rule::modulo => binary(BinaryOp::Mod, left, right),
                        Rule::pow => binary(BinaryOp::Pow, left, right),
                        Rule::bit_and => binary(BinaryOp::BitAnd, left, right),
                        Rule::bit_or => binary(BinaryOp::BitOr, left, right),
                        Rule::bit_xor => binary(BinaryOp::BitXor, left, right),
                        Rule::shl => binary(BinaryOp::Shl, left, right),
                        Rule::shr => binary(BinaryOp::Shr, left, right),
                        Rule::and => Expr::Boolean {
                            op: BoolOp::And,
                            left,
                            right,
                        },
                        Rule::or => Expr::Boolean {
                            op: BoolOp::Or,
                            left,
                            right,
                        },
                        Rule::eq => comparison(ComparisonOp::Eq, left, right),
                        Rule::neq => comparison(ComparisonOp::Neq, left, right),
                        Rule::lt => comparison(ComparisonOp::Lt, left, right),
                        Rule::le => comparison(ComparisonOp::Le, left, right),
                        Rule::gt => comparison(ComparisonOp::Gt, left, right),
                        Rule::ge => comparison(ComparisonOp::Ge, left, right),
                        rule => {
                            return Err(custom_error(
                                &format!("unknown binary operator: {rule:?}"),
                                op.as_span(),
                            ));
                        }
                    };
                    Ok(self.alloc(expr, span))
                })
                .map_postfix(|lhs, op| {
                    let lhs = lhs?;
                    let span = Span::combine(&self.span_of(lhs), &Span::from(op.as_span()));
                    let expr = match op.as_rule() {
                        Rule::call_op => Expr::Call {
                            callable: lhs,
                            args: self.parse_items(op.into_inner())?,
                        },
                        Rule::index_op => {
                            let op_span = op.as_span();
                            let index = op
                                .into_inner()
                                .next()
                                .ok_or_else(|| custom_error("missing index expression", op_span))?;
                            Expr::Index {
                                value: lhs,
                                index: self.parse_expr(index)?,
                            }
                        }
                        Rule::field_op => {
                            let op_span = op.as_span();
                            let field = op
                                .into_inner()
                                .next()
                                .ok_or_else(|| custom_error("missing attribute ident", op_span))?
                                .as_str();
                            Expr::Field { value: lhs, field }
                        }
                        rule => {
                            return Err(custom_error(
                                &format!("unknown postfix operator: {rule:?}"),
                                op.as_span(),
                            ));
                        }
                    };
                    Ok(self.alloc(expr, span))
                })
                .parse(pair.into_inner()),

            Rule::grouped => {
                let pest_span = pair.as_span();
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| custom_error("missing grouped expression", pest_span))?;
                self.parse_expr(inner)
            }

            Rule::tuple => {
                let items = self.parse_items(pair.into_inner())?;
                Ok(self.alloc(Expr::Tuple(items), span))
            }

            Rule::list => {
                let items = self.parse_items(pair.into_inner())?;
                Ok(self.alloc(Expr::List(items), span))
            }

            Rule::integer => {
                let value = parse_integer(pair.as_str())
                    .ok_or_else(|| custom_error("invalid integer literal", pair.as_span()))?;
                Ok(self.alloc(Expr::Literal(Literal::Int(value)), span))
            }

            Rule::float => {
                let value = pair
                    .as_str()
                    .replace('_', "")
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| custom_error("invalid float literal", pair.as_span()))?;
                Ok(self.alloc(Expr::Literal(Literal::Float(value)), span))
            }

            Rule::boolean => {
                let value = pair.as_str() == "True";
                Ok(self.alloc(Expr::Literal(Literal::Bool(value)), span))
            }

            Rule::none => Ok(self.alloc(Expr::Literal(Literal::None), span)),

            Rule::string => {
                let s = pair.as_str();
                let inner = &s[1..s.len() - 1];
                Ok(self.alloc(Expr::Literal(Literal::Str(inner)), span))
            }

            Rule::ident => Ok(self.alloc(Expr::Ident(pair.as_str()), span)),

            rule => Err(custom_error(
                &format!("Unhandled rule: {rule:?}"),
                pair.as_span(),
            )),
        }
    }
}

fn binary<'a>(op: BinaryOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> Expr<'a> {
    Expr::Binary { op, left, right }
}

fn comparison<'a>(op: ComparisonOp, left: &'a Expr<'a>, right: &'a Expr<'a>) -> Expr<'a> {
    Expr::Comparison { op, left, right }
}

/// Parses a decimal, `0x`, `0o` or `0b` integer literal with `_` separators.
///
/// Returns `None` when the value does not fit in an `i64`.
fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else {
        digits.parse().ok()
    }
}

/// Operators at one bracket level whose operand is still being read.
///
/// Each of them costs the Pratt parser one level of recursion.
#[derive(Debug, Default)]
struct Level {
    /// Prefix `+ - ~` and `**`, closed by any other infix operator.
    tight: usize,
    /// Prefix `not`, closed only by `and`, `or` and `,`.
    loose: usize,
}

/// State of the nesting pre-scan.
struct NestingScan {
    open: Vec<(char, usize)>,
    levels: Vec<Level>,
    pending: usize,
    expect_operand: bool,
}

impl NestingScan {
    fn new() -> Self {
        Self {
            open: Vec::new(),
            levels: vec![Level::default()],
            pending: 0,
            expect_operand: true,
        }
    }

    fn depth(&self) -> usize {
        self.open.len() + self.pending
    }

    fn open_bracket(&mut self, delimiter: char, pos: usize) {
        self.open.push((delimiter, pos));
        self.levels.push(Level::default());
        self.expect_operand = true;
    }

    /// Returns `false` when `closer` does not match the innermost open bracket.
    fn close_bracket(&mut self, closer: char) -> bool {
        let expected = if closer == ')' { '(' } else { '[' };
        match self.open.last() {
            Some(&(opener, _)) if opener == expected => {
                self.open.pop();
                if let Some(level) = self.levels.pop() {
                    self.pending -= level.tight + level.loose;
                }
                self.expect_operand = false;
                true
            }
            _ => false,
        }
    }

    fn push_tight(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            level.tight += 1;
            self.pending += 1;
        }
        self.expect_operand = true;
    }

    fn push_loose(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            level.loose += 1;
            self.pending += 1;
        }
        self.expect_operand = true;
    }

    /// An infix operator that binds looser than the prefix signs.
    fn infix(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            self.pending -= level.tight;
            level.tight = 0;
        }
        self.expect_operand = true;
    }

    /// `and`, `or` or `,`: every pending prefix at this level is complete.
    fn separator(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            self.pending -= level.tight + level.loose;
            *level = Level::default();
        }
        self.expect_operand = true;
    }

    fn operand(&mut self) {
        self.expect_operand = false;
    }
}

/// Rejects input whose nesting would make the recursive parser too deep, and
/// reports brackets that are opened but never closed.
///
/// Nesting counts open brackets plus, at every open level, the prefix
/// operators and `**` still waiting for their operand. Mismatched closers
/// are left for the grammar to report.
fn check_nesting(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let mut scan = NestingScan::new();
    let mut chars = source.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();
        match c {
            '(' | '[' => scan.open_bracket(c, start),
            ')' | ']' => {
                if !scan.close_bracket(c) {
                    return Ok(());
                }
            }
            ',' => scan.separator(),
            '+' | '-' | '~' if scan.expect_operand => scan.push_tight(),
            '*' if chars.peek().is_some_and(|&(_, next)| next == '*') => {
                chars.next();
                end += 1;
                scan.push_tight();
            }
            '"' | '\'' => {
                // Skip string literals so brackets inside them are ignored.
                let mut escaped = false;
                for (pos, s) in chars.by_ref() {
                    end = pos + s.len_utf8();
                    if escaped {
                        escaped = false;
                    } else if s == '\\' {
                        escaped = true;
                    } else if s == c {
                        break;
                    }
                }
                scan.operand();
            }
            c if c.is_ascii_digit() => {
                // Numbers, including exponent signs and radix prefixes.
                let mut prev = c;
                let hex = c == '0' && chars.peek().is_some_and(|&(_, n)| n == 'x' || n == 'X');
                while let Some(&(pos, n)) = chars.peek() {
                    let exponent_sign =
                        !hex && (n == '+' || n == '-') && (prev == 'e' || prev == 'E');
                    if !(n.is_ascii_alphanumeric() || n == '_' || n == '.' || exponent_sign) {
                        break;
                    }
                    chars.next();
                    end = pos + n.len_utf8();
                    prev = n;
                }
                scan.operand();
            }
            c if c.is_alphabetic() || c == '_' => {
                while let Some(&(pos, n)) = chars.peek() {
                    if !(n.is_alphanumeric() || n == '_') {
                        break;
                    }
                    chars.next();
                    end = pos + n.len_utf8();
                }
                match &source[start..end] {
                    "not" => scan.push_loose(),
                    "and" | "or" => scan.separator(),
                    _ => scan.operand(),
                }
            }
            c if c.is_whitespace() || c == '.' => {}
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' => {
                scan.infix()
            }
            _ => scan.operand(),
        }

        let depth = scan.depth();
        if depth > max_depth {
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded { depth, max_depth },
                source.to_string(),
                Span::new(start, end),
            ));
        }
    }

    if let Some(&(delimiter, pos)) = scan.open.last() {
        return Err(ParseError::new(
            ParseErrorKind::UnclosedDelimiter { delimiter },
            source.to_string(),
            Span::new(pos, pos + 1),
        ));
    }

    Ok(())
}

/// Parse `source` into a tree allocated in `arena`, using the default depth limit.
pub fn parse<'a>(arena: &'a Bump, source: &'a str) -> Result<ParsedExpr<'a>, ParseError> {
    parse_with_max_depth(arena, source, DEFAULT_MAX_DEPTH)
}

/// Parse `source` into a tree allocated in `arena`.
///
/// Fails with [`ParseErrorKind::MaxDepthExceeded`] before running the grammar
/// if the input nests deeper than `max_depth`.
pub fn parse_with_max_depth<'a>(
    arena: &'a Bump,
    source: &'a str,
    max_depth: usize,
) -> Result<ParsedExpr<'a>, ParseError> {
    debug!(source, max_depth, "parsing expression");

    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyInput,
            source.to_string(),
            Span::new(0, source.len()),
        ));
    }

    check_nesting(source, max_depth)?;

    let ann = arena.alloc(AnnotatedSource::new(arena, source));
    let builder = TreeBuilder { arena, ann };

    let expr = ExpressionParser::parse(Rule::main, source)
        .and_then(|mut pairs| match pairs.next() {
            Some(pair) => builder.parse_expr(pair),
            None => Err(pest::error::Error::new_from_pos(
                pest::error::ErrorVariant::CustomError {
                    message: "missing expected pair in rule".to_string(),
                },
                pest::Position::from_start(source),
            )),
        })
        .map_err(|err| convert_pest_error(err, source))?;

    debug!(kind = expr.kind_name(), "parsed expression");
    Ok(ParsedExpr { expr, ann })
}
