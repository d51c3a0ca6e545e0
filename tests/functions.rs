#[macro_use]
mod cases;

use abacus::{Error, EvalError, FUNCTIONS, Number};

test_case!(
    sqrt,
    input: "sqrt(16)",
    value: Number::Float(4.0),
);

test_case!(
    fabs_of_int_is_float,
    input: "fabs(-3)",
    value: Number::Float(3.0),
);

test_case!(
    exp_zero,
    input: "exp(0)",
    value: Number::Float(1.0),
);

test_case!(
    log_natural,
    input: "log(exp(2))",
    approx: 2.0,
);

test_case!(
    log_with_base,
    input: "log(1024, 2)",
    approx: 10.0,
);

test_case!(
    log10,
    input: "log10(1000)",
    value: Number::Float(3.0),
);

test_case!(
    trig_identity,
    input: "sin(0.5) ** 2 + cos(0.5) ** 2",
    approx: 1.0,
);

test_case!(
    tan_zero,
    input: "tan(0)",
    value: Number::Float(0.0),
);

test_case!(
    nested_calls,
    input: "sqrt(fabs(-16)) * 2",
    value: Number::Float(8.0),
);

test_case!(
    sqrt_negative,
    input: "sqrt(-1)",
    error: Error::Evaluation(EvalError::DomainError { operation: "sqrt", .. }),
);

test_case!(
    log_zero,
    input: "log(0)",
    error: Error::Evaluation(EvalError::DomainError { .. }),
);

test_case!(
    log10_negative,
    input: "log10(-5)",
    error: Error::Evaluation(EvalError::DomainError { .. }),
);

test_case!(
    log_base_one,
    input: "log(10, 1)",
    error: Error::Evaluation(EvalError::DivisionByZero { .. }),
);

test_case!(
    log_negative_base,
    input: "log(10, -2)",
    error: Error::Evaluation(EvalError::DomainError { .. }),
);

test_case!(
    exp_overflow,
    input: "exp(1000)",
    error: Error::Evaluation(EvalError::Overflow { operation: "exp", .. }),
);

test_case!(
    argument_error_propagates,
    input: "sqrt(1/0)",
    error: Error::Evaluation(EvalError::DivisionByZero { .. }),
);

#[test]
fn single_argument_functions_reject_other_arities() {
    for function in FUNCTIONS.iter().filter(|f| f.name != "log") {
        for args in ["", "1, 2", "1, 2, 3"] {
            let input = format!("{}({})", function.name, args);
            let result = abacus::evaluate_expression(&input);
            assert!(
                matches!(
                    result,
                    Err(Error::Evaluation(EvalError::ArityMismatch { .. }))
                ),
                "{input}: {result:?}"
            );
        }
    }
}

#[test]
fn log_accepts_one_or_two_arguments() {
    for input in ["log()", "log(1, 2, 3)", "log(1, 2, 3, 4)"] {
        let result = abacus::evaluate_expression(input);
        assert!(
            matches!(
                result,
                Err(Error::Evaluation(EvalError::ArityMismatch { name: "log", .. }))
            ),
            "{input}: {result:?}"
        );
    }
    assert!(abacus::evaluate_expression("log(1)").is_ok());
    assert!(abacus::evaluate_expression("log(1, 10)").is_ok());
}

#[test]
fn functions_always_return_floats() {
    for function in FUNCTIONS {
        let input = format!("{}(1)", function.name);
        assert!(
            matches!(abacus::evaluate_expression(&input), Ok(Number::Float(_))),
            "{input}"
        );
    }
}
