//! Core evaluation logic.

use tracing::{debug, trace};

use crate::{
    evaluator::{
        EvalError, EvaluatorOptions,
        operators::{eval_binary, eval_unary, is_supported_binary},
    },
    parser::{AnnotatedSource, Expr, Literal, ParsedExpr, Span},
    stdlib::{self, MathError, MathFunction},
    values::Number,
};

/// Tree-walking evaluator over a parsed expression.
pub struct Evaluator<'a> {
    options: EvaluatorOptions,
    expr: &'a Expr<'a>,
    ann: &'a AnnotatedSource<'a, Expr<'a>>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator with the given options.
    pub fn new(options: EvaluatorOptions, parsed: &ParsedExpr<'a>) -> Self {
        Self {
            options,
            expr: parsed.expr,
            ann: parsed.ann,
            depth: 0,
        }
    }

    /// Evaluate the whole expression.
    pub fn eval(&mut self) -> Result<Number, EvalError> {
        debug!(source = self.ann.source, max_depth = self.options.max_depth, "evaluating");
        let result = self.eval_expr(self.expr);
        match &result {
            Ok(value) => debug!(%value, "evaluated"),
            Err(err) => debug!(code = err.code(), %err, "evaluation failed"),
        }
        result
    }

    fn span_of(&self, expr: &Expr<'a>) -> Option<Span> {
        self.ann.span_of(expr)
    }

    /// Evaluate an expression node.
    fn eval_expr(&mut self, expr: &'a Expr<'a>) -> Result<Number, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(EvalError::DepthExceeded {
                depth: self.depth + 1,
                max_depth: self.options.max_depth,
                span: self.span_of(expr),
            });
        }

        self.depth += 1;
        let result = self.eval_expr_inner(expr);
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_expr_inner(&mut self, expr: &'a Expr<'a>) -> Result<Number, EvalError> {
        trace!(depth = self.depth, kind = expr.kind_name(), "eval");

        match expr {
            Expr::Literal(literal) => match literal {
                Literal::Int(i) => Ok(Number::Int(*i)),
                Literal::Float(f) => Ok(Number::Float(*f)),
                Literal::Bool(_) | Literal::Str(_) | Literal::None => {
                    Err(EvalError::UnsupportedConstant {
                        kind: literal.kind_name(),
                        span: self.span_of(expr),
                    })
                }
            },

            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                let span = self.span_of(expr);
                if !is_supported_binary(*op) {
                    return Err(EvalError::UnsupportedOperator {
                        op: op.symbol(),
                        span,
                    });
                }
                eval_binary(*op, left, right, span)
            }

            Expr::Unary { op, expr: operand } => {
                let span = self.span_of(expr);
                if !op.is_arithmetic() {
                    return Err(EvalError::UnsupportedOperator {
                        op: op.symbol(),
                        span,
                    });
                }
                let value = self.eval_expr(operand)?;
                eval_unary(*op, value, span)
            }

            Expr::Call { callable, args } => self.eval_call(expr, callable, args),

            Expr::Ident(_)
            | Expr::Field { .. }
            | Expr::Index { .. }
            | Expr::List(_)
            | Expr::Tuple(_)
            | Expr::Comparison { .. }
            | Expr::Boolean { .. } => Err(EvalError::UnsupportedExpression {
                kind: expr.kind_name(),
                span: self.span_of(expr),
            }),
        }
    }

    fn eval_call(
        &mut self,
        call: &'a Expr<'a>,
        callable: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    ) -> Result<Number, EvalError> {
        let Expr::Ident(name) = callable else {
            return Err(EvalError::UnsupportedExpression {
                kind: callable.kind_name(),
                span: self.span_of(callable),
            });
        };

        let Some(function) = stdlib::lookup(name) else {
            return Err(EvalError::UnsupportedFunction {
                name: name.to_string(),
                span: self.span_of(callable),
            });
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?.as_f64());
        }

        let span = self.span_of(call);
        if !function.arity.accepts(values.len()) {
            return Err(EvalError::ArityMismatch {
                name: function.name,
                expected: function.arity,
                got: values.len(),
                span,
            });
        }

        trace!(function = function.name, ?values, "call");
        function
            .call(&values)
            .map(Number::Float)
            .map_err(|err| math_error(function, err, span))
    }
}

fn math_error(function: &MathFunction, err: MathError, span: Option<Span>) -> EvalError {
    match err {
        MathError::Domain => EvalError::DomainError {
            operation: function.name,
            span,
        },
        MathError::Overflow => EvalError::Overflow {
            operation: function.name,
            span,
        },
        MathError::DivisionByZero => EvalError::DivisionByZero { span },
        MathError::Arity { got } => EvalError::ArityMismatch {
            name: function.name,
            expected: function.arity,
            got,
            span,
        },
    }
}
