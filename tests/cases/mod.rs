//! Table-driven helpers shared by the integration tests.

/// Declare a test that evaluates `input` and checks the outcome.
///
/// - `value:` expects exactly this [`abacus::Number`].
/// - `approx:` expects a float within `1e-12` of the given value.
/// - `error:` expects an [`abacus::Error`] matching the pattern.
macro_rules! test_case {
    ($name:ident, input: $input:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            let result = abacus::evaluate_expression($input);
            pretty_assertions::assert_eq!(result, Ok($value), "input: {:?}", $input);
        }
    };
    ($name:ident, input: $input:expr, approx: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            match abacus::evaluate_expression($input) {
                Ok(abacus::Number::Float(actual)) => assert!(
                    (actual - $value).abs() < 1e-12,
                    "input: {:?}, expected {}, got {}",
                    $input,
                    $value,
                    actual
                ),
                other => panic!("input: {:?}, expected a float, got {:?}", $input, other),
            }
        }
    };
    ($name:ident, input: $input:expr, error: $pattern:pat $(,)?) => {
        #[test]
        fn $name() {
            let result = abacus::evaluate_expression($input);
            assert!(
                matches!(result, Err($pattern)),
                "input: {:?}, got {:?}",
                $input,
                result
            );
        }
    };
}
