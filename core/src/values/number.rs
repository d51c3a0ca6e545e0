//! Numeric results produced by the evaluator.

use core::fmt;

/// A real number: either an exact 64-bit integer or a double.
///
/// Mixed operations promote to [`Number::Float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a double (integers are converted, possibly losing precision).
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Integers print as-is; floats always show a fractional part or exponent
/// (`4.0`, `0.5`, `1e16`) so the two kinds stay distinguishable.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) if x.is_nan() => write!(f, "nan"),
            Number::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}
