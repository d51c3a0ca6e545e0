use crate::values::Number;

#[test]
fn test_as_f64_promotes_ints() {
    assert_eq!(Number::Int(3).as_f64(), 3.0);
    assert_eq!(Number::Float(2.5).as_f64(), 2.5);
}

#[test]
fn test_int_and_float_are_distinct() {
    assert_ne!(Number::Int(1), Number::Float(1.0));
    assert_eq!(Number::from(1i64), Number::Int(1));
    assert_eq!(Number::from(1.0f64), Number::Float(1.0));
}
