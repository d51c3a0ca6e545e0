//! Error rendering using ariadne
//!
//! Renders an [`Error`] as a report with the offending part of the source
//! underlined, plus the error code and any help text.

use crate::{Diagnostic, Error};
use ariadne::{Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<input>";

/// Render an error with colors to stderr
///
/// # Example
/// ```no_run
/// use abacus::{evaluate_expression, render_error};
///
/// let source = "1 / 0";
/// if let Err(e) = evaluate_expression(source) {
///     render_error(source, &e);
/// }
/// ```
pub fn render_error(source: &str, error: &Error) {
    render_error_to_writer(source, error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(
    source: &str,
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_error_to_writer(source, error, writer, use_color)
}

/// Render an error to a String
pub fn render_error_to_string(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    source: &str,
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    render_diagnostic(source, &error.to_diagnostic(), writer, use_color)
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    // Clamp to the source so a stale span never points past the end.
    let end = diag.span.0.end.min(source.len());
    let start = diag.span.0.start.min(end);
    let span = start..end;

    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    let mut label = Label::new((SOURCE_ID, span)).with_message(&diag.message);
    if use_color {
        label = label.with_color(ariadne::Color::Red);
    }
    report = report.with_label(label);

    for help_msg in &diag.help {
        report = report.with_help(help_msg);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate_expression;

    fn render(source: &str) -> String {
        let err = evaluate_expression(source).expect_err("expected an error");
        render_error_to_string_no_color(source, &err)
    }

    #[test]
    fn test_render_parse_error() {
        let output = render("1 + + * 2");

        assert!(output.contains("Error"));
        assert!(output.contains("P001"));
        assert!(output.contains("1 + + * 2"));
    }

    #[test]
    fn test_render_rejected_function() {
        let output = render("2 * __import__('os')");

        assert!(output.contains("E004"));
        assert!(output.contains("Unsupported function '__import__'"));
        assert!(output.contains("Available functions"));
    }

    #[test]
    fn test_render_runtime_error() {
        let output = render("10 / (5 - 5)");

        assert!(output.contains("Division by zero"));
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_error_at_end_of_input() {
        let output = render("1 +");

        assert!(output.contains("end of input"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let source = "sqrt(-1)";
        let err = evaluate_expression(source).unwrap_err();
        let colored = render_error_to_string(source, &err);
        let plain = render_error_to_string_no_color(source, &err);

        assert!(colored.contains("sqrt"));
        assert!(!plain.contains('\u{1b}'));
    }
}
