use crate::parser::Expr;
use bumpalo::Bump;

use super::parser::parse;

// Helper function to parse an expression and return the AST.
//
// We test precedence by comparing whether two expressions parenthesized in
// different ways yield the same AST.
fn ast<'a>(arena: &'a Bump, source: &'a str) -> &'a Expr<'a> {
    let parsed = parse(arena, source)
        .unwrap_or_else(|e| panic!("Expression parsing failed: {}\n{}", source, e));
    parsed.expr
}

#[test]
fn test_addition_vs_subtraction() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a + b - c"), ast(&arena, "(a + b) - c"));
    assert_eq!(ast(&arena, "a - b + c"), ast(&arena, "(a - b) + c"));
    assert_eq!(
        ast(&arena, "a + b - c + d - e + f"),
        ast(&arena, "((((a + b) - c) + d) - e) + f")
    );
}

#[test]
fn test_multiplicative_operators() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a * b / c"), ast(&arena, "(a * b) / c"));
    assert_eq!(ast(&arena, "a / b * c"), ast(&arena, "(a / b) * c"));
    assert_eq!(ast(&arena, "a // b % c"), ast(&arena, "(a // b) % c"));
    assert_eq!(ast(&arena, "a % b // c * d"), ast(&arena, "((a % b) // c) * d"));
}

#[test]
fn test_addition_vs_multiplication() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a + b * c"), ast(&arena, "a + (b * c)"));
    assert_eq!(ast(&arena, "a * b + c"), ast(&arena, "(a * b) + c"));
    assert_eq!(ast(&arena, "a - b // c"), ast(&arena, "a - (b // c)"));
    assert_eq!(ast(&arena, "a % b + c"), ast(&arena, "(a % b) + c"));
}

#[test]
fn test_unary_vs_binary() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "--a"), ast(&arena, "-(-a)"));
    assert_eq!(ast(&arena, "-a + b"), ast(&arena, "(-a) + b"));
    assert_eq!(ast(&arena, "a + -b"), ast(&arena, "a + (-b)"));
    assert_eq!(ast(&arena, "-a * b"), ast(&arena, "(-a) * b"));
    assert_eq!(ast(&arena, "+a - +b"), ast(&arena, "(+a) - (+b)"));
}

#[test]
fn test_exponentiation() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a ** b ** c"), ast(&arena, "a ** (b ** c)"));
    assert_eq!(
        ast(&arena, "a ** b ** c ** d"),
        ast(&arena, "a ** (b ** (c ** d))")
    );
}

#[test]
fn test_exponentiation_vs_multiplication() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a * b ** c"), ast(&arena, "a * (b ** c)"));
    assert_eq!(ast(&arena, "a ** b * c"), ast(&arena, "(a ** b) * c"));
}

#[test]
fn test_exponentiation_vs_negation() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "-a ** b"), ast(&arena, "- (a  ** b)"));
    assert_eq!(ast(&arena, "a ** -b"), ast(&arena, "a ** ( -b )"));
    assert_eq!(ast(&arena, "a ** -b + c"), ast(&arena, "(a ** (-b)) + c"));
}

#[test]
fn test_call_binds_tightest() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "-f(a)"), ast(&arena, "-(f(a))"));
    assert_eq!(ast(&arena, "f(a) ** 2"), ast(&arena, "(f(a)) ** 2"));
    assert_eq!(ast(&arena, "a.b(c)"), ast(&arena, "(a.b)(c)"));
}

#[test]
fn test_comparison_vs_arithmetic() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a + b < c * d"), ast(&arena, "(a + b) < (c * d)"));
    assert_eq!(
        ast(&arena, "a < b and c or d"),
        ast(&arena, "((a < b) and c) or d")
    );
    assert_eq!(ast(&arena, "not a == b"), ast(&arena, "not (a == b)"));
}

#[test]
fn test_bitwise_vs_arithmetic() {
    let arena = Bump::new();
    assert_eq!(ast(&arena, "a | b ^ c & d"), ast(&arena, "a | (b ^ (c & d))"));
    assert_eq!(ast(&arena, "a << b + c"), ast(&arena, "a << (b + c)"));
    assert_eq!(ast(&arena, "a & b == c"), ast(&arena, "(a & b) == c"));
}
