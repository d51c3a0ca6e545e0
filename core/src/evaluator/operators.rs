//! Binary and unary operator implementations.
//!
//! Integer operations stay exact while the result fits in `i64` and are
//! recomputed in `f64` otherwise. `//` and `%` round toward negative infinity,
//! so the remainder takes the sign of the divisor.

use crate::{
    evaluator::EvalError,
    parser::{BinaryOp, Span, UnaryOp},
    values::Number,
};

/// Evaluate an arithmetic binary operation.
///
/// Operators outside `+ - * / // % **` are rejected.
pub(super) fn eval_binary(
    op: BinaryOp,
    left: Number,
    right: Number,
    span: Option<Span>,
) -> Result<Number, EvalError> {
    match (left, right) {
        (Number::Int(l), Number::Int(r)) => eval_binary_int(op, l, r, span),
        _ => eval_binary_float(op, left.as_f64(), right.as_f64(), span).map(Number::Float),
    }
}

/// Evaluate an arithmetic unary operation.
pub(super) fn eval_unary(
    op: UnaryOp,
    operand: Number,
    span: Option<Span>,
) -> Result<Number, EvalError> {
    match (op, operand) {
        (UnaryOp::Pos, n) => Ok(n),
        (UnaryOp::Neg, Number::Int(i)) => Ok(i
            .checked_neg()
            .map_or(Number::Float(-(i as f64)), Number::Int)),
        (UnaryOp::Neg, Number::Float(f)) => Ok(Number::Float(-f)),
        (UnaryOp::Not | UnaryOp::Invert, _) => Err(EvalError::UnsupportedOperator {
            op: op.symbol(),
            span,
        }),
    }
}

/// Whether the evaluator accepts `op` at all.
pub(super) fn is_supported_binary(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::FloorDiv
            | BinaryOp::Mod
            | BinaryOp::Pow
    )
}

fn eval_binary_int(
    op: BinaryOp,
    left: i64,
    right: i64,
    span: Option<Span>,
) -> Result<Number, EvalError> {
    let exact = match op {
        BinaryOp::Add => left.checked_add(right),
        BinaryOp::Sub => left.checked_sub(right),
        BinaryOp::Mul => left.checked_mul(right),
        BinaryOp::Div => {
            // True division always produces a float.
            return eval_binary_float(op, left as f64, right as f64, span).map(Number::Float);
        }
        BinaryOp::FloorDiv => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            floor_div_int(left, right)
        }
        BinaryOp::Mod => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            // i64::MIN % -1 is the only overflowing case, and its result is 0.
            Some(floor_mod_int(left, right).unwrap_or(0))
        }
        BinaryOp::Pow => {
            if right < 0 {
                return eval_binary_float(op, left as f64, right as f64, span).map(Number::Float);
            }
            u32::try_from(right)
                .ok()
                .and_then(|exp| left.checked_pow(exp))
        }
        _ => {
            return Err(EvalError::UnsupportedOperator {
                op: op.symbol(),
                span,
            });
        }
    };

    match exact {
        Some(value) => Ok(Number::Int(value)),
        None => eval_binary_float(op, left as f64, right as f64, span).map(Number::Float),
    }
}

fn floor_div_int(left: i64, right: i64) -> Option<i64> {
    let quotient = left.checked_div(right)?;
    let remainder = left.checked_rem(right)?;
    if remainder != 0 && (remainder < 0) != (right < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn floor_mod_int(left: i64, right: i64) -> Option<i64> {
    let remainder = left.checked_rem(right)?;
    if remainder != 0 && (remainder < 0) != (right < 0) {
        remainder.checked_add(right)
    } else {
        Some(remainder)
    }
}

/// Evaluate a binary operation on two floats.
///
/// Addition, subtraction and multiplication follow IEEE 754. Division by zero
/// is an error rather than an infinity.
fn eval_binary_float(
    op: BinaryOp,
    left: f64,
    right: f64,
    span: Option<Span>,
) -> Result<f64, EvalError> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Ok(left / right)
        }
        BinaryOp::FloorDiv => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Ok(float_div_mod(left, right).0)
        }
        BinaryOp::Mod => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero { span });
            }
            Ok(float_div_mod(left, right).1)
        }
        BinaryOp::Pow => float_pow(left, right, span),
        _ => Err(EvalError::UnsupportedOperator {
            op: op.symbol(),
            span,
        }),
    }
}

/// Floored quotient and remainder. `right` must be non-zero.
fn float_div_mod(left: f64, right: f64) -> (f64, f64) {
    let mut remainder = left % right;
    let mut quotient = (left - remainder) / right;
    if remainder != 0.0 {
        if (right < 0.0) != (remainder < 0.0) {
            remainder += right;
            quotient -= 1.0;
        }
    } else {
        remainder = 0.0f64.copysign(right);
    }

    let floored = if quotient != 0.0 {
        let floor = quotient.floor();
        if quotient - floor > 0.5 {
            floor + 1.0
        } else {
            floor
        }
    } else {
        0.0f64.copysign(left / right)
    };

    (floored, remainder)
}

fn float_pow(base: f64, exp: f64, span: Option<Span>) -> Result<f64, EvalError> {
    if base == 0.0 && exp < 0.0 {
        return Err(EvalError::DivisionByZero { span });
    }
    if base < 0.0 && base.is_finite() && exp.is_finite() && exp.fract() != 0.0 {
        return Err(EvalError::DomainError {
            operation: BinaryOp::Pow.symbol(),
            span,
        });
    }
    let result = base.powf(exp);
    if result.is_infinite() && base.is_finite() && exp.is_finite() {
        return Err(EvalError::Overflow {
            operation: BinaryOp::Pow.symbol(),
            span,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Number {
        Number::Int(i)
    }

    fn float(f: f64) -> Number {
        Number::Float(f)
    }

    fn bin(op: BinaryOp, l: Number, r: Number) -> Result<Number, EvalError> {
        eval_binary(op, l, r, None)
    }

    #[test]
    fn test_int_add_sub_mul() {
        assert_eq!(bin(BinaryOp::Add, int(2), int(3)).unwrap(), int(5));
        assert_eq!(bin(BinaryOp::Sub, int(3), int(10)).unwrap(), int(-7));
        assert_eq!(bin(BinaryOp::Mul, int(-2), int(5)).unwrap(), int(-10));
    }

    #[test]
    fn test_int_overflow_falls_back_to_float() {
        assert_eq!(
            bin(BinaryOp::Add, int(i64::MAX), int(1)).unwrap(),
            float(i64::MAX as f64 + 1.0)
        );
        assert_eq!(
            bin(BinaryOp::Mul, int(i64::MAX), int(2)).unwrap(),
            float(i64::MAX as f64 * 2.0)
        );
        assert_eq!(
            eval_unary(UnaryOp::Neg, int(i64::MIN), None).unwrap(),
            float(9.223372036854775808e18)
        );
        assert_eq!(
            bin(BinaryOp::FloorDiv, int(i64::MIN), int(-1)).unwrap(),
            float(9.223372036854775808e18)
        );
        assert_eq!(bin(BinaryOp::Mod, int(i64::MIN), int(-1)).unwrap(), int(0));
    }

    #[test]
    fn test_mixed_operands_promote() {
        assert_eq!(bin(BinaryOp::Add, int(1), float(0.5)).unwrap(), float(1.5));
        assert_eq!(bin(BinaryOp::Mul, float(2.0), int(3)).unwrap(), float(6.0));
    }

    #[test]
    fn test_true_division_is_float() {
        assert_eq!(bin(BinaryOp::Div, int(6), int(3)).unwrap(), float(2.0));
        assert_eq!(bin(BinaryOp::Div, int(1), int(4)).unwrap(), float(0.25));
    }

    #[test]
    fn test_division_by_zero() {
        for op in [BinaryOp::Div, BinaryOp::FloorDiv, BinaryOp::Mod] {
            for zero in [int(0), float(0.0), float(-0.0)] {
                assert!(
                    matches!(bin(op, int(1), zero), Err(EvalError::DivisionByZero { .. })),
                    "{op} {zero:?}"
                );
                assert!(matches!(
                    bin(op, float(1.5), zero),
                    Err(EvalError::DivisionByZero { .. })
                ));
            }
        }
    }

    #[test]
    fn test_floor_division_signs() {
        assert_eq!(bin(BinaryOp::FloorDiv, int(7), int(2)).unwrap(), int(3));
        assert_eq!(bin(BinaryOp::FloorDiv, int(-7), int(2)).unwrap(), int(-4));
        assert_eq!(bin(BinaryOp::FloorDiv, int(7), int(-2)).unwrap(), int(-4));
        assert_eq!(bin(BinaryOp::FloorDiv, int(-7), int(-2)).unwrap(), int(3));
        assert_eq!(bin(BinaryOp::FloorDiv, float(7.5), int(2)).unwrap(), float(3.0));
        assert_eq!(bin(BinaryOp::FloorDiv, float(-7.5), int(2)).unwrap(), float(-4.0));
    }

    #[test]
    fn test_modulo_signs() {
        assert_eq!(bin(BinaryOp::Mod, int(7), int(2)).unwrap(), int(1));
        assert_eq!(bin(BinaryOp::Mod, int(-7), int(2)).unwrap(), int(1));
        assert_eq!(bin(BinaryOp::Mod, int(7), int(-2)).unwrap(), int(-1));
        assert_eq!(bin(BinaryOp::Mod, int(-7), int(-2)).unwrap(), int(-1));
        assert_eq!(bin(BinaryOp::Mod, float(-7.5), int(2)).unwrap(), float(0.5));
        assert_eq!(bin(BinaryOp::Mod, float(7.5), int(-2)).unwrap(), float(-0.5));
    }

    #[test]
    fn test_zero_float_remainder_takes_divisor_sign() {
        let Number::Float(r) = bin(BinaryOp::Mod, float(4.0), float(-2.0)).unwrap() else {
            panic!("expected float");
        };
        assert_eq!(r, 0.0);
        assert!(r.is_sign_negative());

        let Number::Float(r) = bin(BinaryOp::Mod, float(-4.0), float(2.0)).unwrap() else {
            panic!("expected float");
        };
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_int_pow() {
        assert_eq!(bin(BinaryOp::Pow, int(2), int(8)).unwrap(), int(256));
        assert_eq!(bin(BinaryOp::Pow, int(-3), int(3)).unwrap(), int(-27));
        assert_eq!(bin(BinaryOp::Pow, int(0), int(0)).unwrap(), int(1));
        assert_eq!(bin(BinaryOp::Pow, int(2), int(-1)).unwrap(), float(0.5));
        assert_eq!(bin(BinaryOp::Pow, int(2), int(64)).unwrap(), float(2f64.powi(64)));
    }

    #[test]
    fn test_pow_errors() {
        assert!(matches!(
            bin(BinaryOp::Pow, int(0), int(-1)),
            Err(EvalError::DivisionByZero { .. })
        ));
        assert!(matches!(
            bin(BinaryOp::Pow, float(0.0), float(-0.5)),
            Err(EvalError::DivisionByZero { .. })
        ));
        assert!(matches!(
            bin(BinaryOp::Pow, int(-8), float(0.5)),
            Err(EvalError::DomainError { operation: "**", .. })
        ));
        assert!(matches!(
            bin(BinaryOp::Pow, float(10.0), int(400)),
            Err(EvalError::Overflow { operation: "**", .. })
        ));
        assert!(matches!(
            bin(BinaryOp::Pow, int(10), int(400)),
            Err(EvalError::Overflow { .. })
        ));
        assert!(matches!(
            bin(BinaryOp::Pow, int(2), int(i64::MAX)),
            Err(EvalError::Overflow { .. })
        ));
    }

    #[test]
    fn test_float_pow() {
        assert_eq!(bin(BinaryOp::Pow, float(4.0), float(0.5)).unwrap(), float(2.0));
        assert_eq!(bin(BinaryOp::Pow, float(-2.0), int(2)).unwrap(), float(4.0));
        assert_eq!(
            bin(BinaryOp::Pow, float(f64::INFINITY), int(2)).unwrap(),
            float(f64::INFINITY)
        );
    }

    #[test]
    fn test_unsupported_binary_operators() {
        for op in [
            BinaryOp::BitAnd,
            BinaryOp::BitOr,
            BinaryOp::BitXor,
            BinaryOp::Shl,
            BinaryOp::Shr,
        ] {
            assert!(!is_supported_binary(op));
            assert!(matches!(
                bin(op, int(1), int(2)),
                Err(EvalError::UnsupportedOperator { .. })
            ));
            assert!(matches!(
                bin(op, float(1.0), int(2)),
                Err(EvalError::UnsupportedOperator { .. })
            ));
        }
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval_unary(UnaryOp::Pos, int(5), None).unwrap(), int(5));
        assert_eq!(eval_unary(UnaryOp::Neg, int(5), None).unwrap(), int(-5));
        assert_eq!(eval_unary(UnaryOp::Neg, float(0.5), None).unwrap(), float(-0.5));
        assert!(matches!(
            eval_unary(UnaryOp::Not, int(1), None),
            Err(EvalError::UnsupportedOperator { op: "not", .. })
        ));
        assert!(matches!(
            eval_unary(UnaryOp::Invert, int(1), None),
            Err(EvalError::UnsupportedOperator { op: "~", .. })
        ));
    }
}
