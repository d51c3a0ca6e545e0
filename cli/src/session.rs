//! Line-by-line interpreter state for the REPL and pipe modes.

use abacus::{Engine, Error, FUNCTIONS, Number};
use tracing::debug;

const COMMANDS: &str = "Commands: help, history, clear, exit";
const EXAMPLES: &str = "Examples: 2+2, (3+4)*5, 2**10, sqrt(16), sin(0.5)";

/// The `help` text: commands, callable functions and a few examples.
pub fn help_text() -> String {
    let width = FUNCTIONS
        .iter()
        .map(|function| function.signature.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec![COMMANDS.to_string(), "Functions:".to_string()];
    lines.extend(
        FUNCTIONS
            .iter()
            .map(|function| format!("  {:width$}  {}", function.signature, function.summary)),
    );
    lines.push(EXAMPLES.to_string());
    lines.join("\n")
}

/// What a single input line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Blank,
    Exit,
    Help,
    History,
    Clear,
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    /// Classify a line. Command words are matched case-insensitively after
    /// trimming; everything else is an expression.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Blank;
        }
        match line.to_lowercase().as_str() {
            "exit" | "quit" | "q" => Command::Exit,
            "help" => Command::Help,
            "history" => Command::History,
            "clear" => Command::Clear,
            _ => Command::Evaluate(line),
        }
    }
}

/// Outcome of handling one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Silent,
    Exit,
    Output(String),
    Value(Number),
    Failure { source: String, error: Error },
}

/// An interactive session: an engine plus the history of successful results.
///
/// History lives only as long as the session.
#[derive(Debug, Default)]
pub struct Session {
    engine: Engine,
    history: Vec<(String, Number)>,
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[(String, Number)] {
        &self.history
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Command::Blank => Reply::Silent,
            Command::Exit => Reply::Exit,
            Command::Help => Reply::Output(help_text()),
            Command::History => Reply::Output(self.format_history()),
            Command::Clear => {
                self.history.clear();
                Reply::Output("History cleared".to_string())
            }
            Command::Evaluate(expr) => match self.engine.evaluate(expr) {
                Ok(value) => {
                    self.history.push((expr.to_string(), value));
                    Reply::Value(value)
                }
                Err(error) => {
                    debug!(code = error.code(), "expression rejected");
                    Reply::Failure {
                        source: expr.to_string(),
                        error,
                    }
                }
            },
        }
    }

    fn format_history(&self) -> String {
        if self.history.is_empty() {
            return "No history".to_string();
        }
        self.history
            .iter()
            .enumerate()
            .map(|(i, (expr, value))| format!("{}: {} = {}", i + 1, expr, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
