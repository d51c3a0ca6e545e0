//! Math Package
//!
//! Real-valued functions callable from expressions:
//! sqrt, sin, cos, tan, log, log10, exp, fabs.
//!
//! Every function takes and returns `f64`. A NaN produced from a non-NaN
//! argument is a domain error; an infinity produced from a finite argument is
//! an overflow (or a domain error for functions with a pole, like `log(0)`).

use core::fmt;
use thiserror::Error;

/// Failure of a math function on otherwise valid arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("math domain error")]
    Domain,
    #[error("math range error")]
    Overflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong number of arguments: {got}")]
    Arity { got: usize },
}

/// Number of arguments a function accepts (inclusive range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn accepts(self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.max == 1 { "" } else { "s" };
        if self.min == self.max {
            write!(f, "{} argument{}", self.min, plural)
        } else {
            write!(f, "{} or {} arguments", self.min, self.max)
        }
    }
}

pub type NativeMathFn = fn(&[f64]) -> Result<f64, MathError>;

/// One entry of the whitelist.
#[derive(Debug, Clone, Copy)]
pub struct MathFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub signature: &'static str,
    pub summary: &'static str,
    call: NativeMathFn,
}

impl MathFunction {
    /// Invoke the function. Callers check [`MathFunction::arity`] first.
    pub fn call(&self, args: &[f64]) -> Result<f64, MathError> {
        if !self.arity.accepts(args.len()) {
            return Err(MathError::Arity { got: args.len() });
        }
        (self.call)(args)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn single(args: &[f64]) -> Result<f64, MathError> {
    match args {
        [x] => Ok(*x),
        _ => Err(MathError::Arity { got: args.len() }),
    }
}

/// Apply `f` and classify non-finite results.
fn checked(x: f64, f: fn(f64) -> f64, can_overflow: bool) -> Result<f64, MathError> {
    let result = f(x);
    if result.is_nan() && !x.is_nan() {
        return Err(MathError::Domain);
    }
    if result.is_infinite() && x.is_finite() {
        return Err(if can_overflow {
            MathError::Overflow
        } else {
            MathError::Domain
        });
    }
    Ok(result)
}

// ============================================================================
// Basic Operations
// ============================================================================

/// Absolute value
fn math_fabs(args: &[f64]) -> Result<f64, MathError> {
    Ok(single(args)?.abs())
}

/// Square root
fn math_sqrt(args: &[f64]) -> Result<f64, MathError> {
    checked(single(args)?, f64::sqrt, false)
}

/// Exponential function (e^x)
fn math_exp(args: &[f64]) -> Result<f64, MathError> {
    checked(single(args)?, f64::exp, true)
}

// ============================================================================
// Trigonometry
// ============================================================================

/// Sine function
fn math_sin(args: &[f64]) -> Result<f64, MathError> {
    checked(single(args)?, f64::sin, false)
}

/// Cosine function
fn math_cos(args: &[f64]) -> Result<f64, MathError> {
    checked(single(args)?, f64::cos, false)
}

/// Tangent function
fn math_tan(args: &[f64]) -> Result<f64, MathError> {
    checked(single(args)?, f64::tan, true)
}

// ============================================================================
// Logarithms
// ============================================================================

/// Natural logarithm, or logarithm to `base` with a second argument
fn math_log(args: &[f64]) -> Result<f64, MathError> {
    match args {
        [x] => log_positive(*x, f64::ln),
        [x, base] => {
            let num = log_positive(*x, f64::ln)?;
            let den = log_positive(*base, f64::ln)?;
            if den == 0.0 {
                return Err(MathError::DivisionByZero);
            }
            Ok(num / den)
        }
        _ => Err(MathError::Arity { got: args.len() }),
    }
}

/// Base-10 logarithm
fn math_log10(args: &[f64]) -> Result<f64, MathError> {
    log_positive(single(args)?, f64::log10)
}

fn log_positive(x: f64, f: fn(f64) -> f64) -> Result<f64, MathError> {
    if x <= 0.0 {
        return Err(MathError::Domain);
    }
    checked(x, f, false)
}

// ============================================================================
// Whitelist
// ============================================================================

/// The complete set of callable functions, in lookup order.
pub static FUNCTIONS: &[MathFunction] = &[
    MathFunction {
        name: "sqrt",
        arity: Arity::exactly(1),
        signature: "sqrt(x)",
        summary: "square root of x",
        call: math_sqrt,
    },
    MathFunction {
        name: "sin",
        arity: Arity::exactly(1),
        signature: "sin(x)",
        summary: "sine of x radians",
        call: math_sin,
    },
    MathFunction {
        name: "cos",
        arity: Arity::exactly(1),
        signature: "cos(x)",
        summary: "cosine of x radians",
        call: math_cos,
    },
    MathFunction {
        name: "tan",
        arity: Arity::exactly(1),
        signature: "tan(x)",
        summary: "tangent of x radians",
        call: math_tan,
    },
    MathFunction {
        name: "log",
        arity: Arity::between(1, 2),
        signature: "log(x[, base])",
        summary: "natural logarithm of x, or logarithm to the given base",
        call: math_log,
    },
    MathFunction {
        name: "log10",
        arity: Arity::exactly(1),
        signature: "log10(x)",
        summary: "base-10 logarithm of x",
        call: math_log10,
    },
    MathFunction {
        name: "exp",
        arity: Arity::exactly(1),
        signature: "exp(x)",
        summary: "e raised to the power x",
        call: math_exp,
    },
    MathFunction {
        name: "fabs",
        arity: Arity::exactly(1),
        signature: "fabs(x)",
        summary: "absolute value of x as a float",
        call: math_fabs,
    },
];

/// Look up a whitelisted function by its bare name.
pub fn lookup(name: &str) -> Option<&'static MathFunction> {
    FUNCTIONS.iter().find(|function| function.name == name)
}
