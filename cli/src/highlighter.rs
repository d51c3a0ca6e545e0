use abacus::FUNCTIONS;
use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::{StyledText, ValidationResult, Validator};

use crate::lexer::{Token, calculate_depth};

const COMMANDS: &[&str] = &["help", "history", "clear", "exit", "quit", "q"];

/// Colors a line by token kind; names the evaluator will reject are red.
pub struct Highlighter;

fn style_for(token: Result<Token, ()>, text: &str, whole_line: &str) -> Style {
    match token {
        Ok(Token::Number) => Style::new().fg(Color::Cyan),
        Ok(Token::Ident) if FUNCTIONS.iter().any(|f| f.name == text) => {
            Style::new().fg(Color::Blue)
        }
        Ok(Token::Ident) if COMMANDS.contains(&whole_line.trim().to_lowercase().as_str()) => {
            Style::new().fg(Color::Magenta)
        }
        Ok(Token::Ident) | Ok(Token::StringDouble) | Ok(Token::StringSingle) | Err(()) => {
            Style::new().fg(Color::Red)
        }
        Ok(Token::Operator)
        | Ok(Token::LParen)
        | Ok(Token::RParen)
        | Ok(Token::LBracket)
        | Ok(Token::RBracket) => Style::new().fg(Color::White),
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let mut curr_end = 0;

        for (token, span) in Token::lexer(line).spanned() {
            if span.start > curr_end {
                output.push((Style::new(), line[curr_end..span.start].to_string()));
            }
            let text = &line[span.clone()];
            output.push((style_for(token, text, line), text.to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((Style::new(), line[curr_end..].to_string()));
        }

        output
    }
}

/// Keeps reading lines while brackets are still open.
pub struct BracketValidator;

impl Validator for BracketValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match calculate_depth(line) {
            Some(depth) if depth > 0 => ValidationResult::Incomplete,
            _ => ValidationResult::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::Highlighter as _;

    fn rendered_text(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, text)| text.as_str()).collect()
    }

    #[test]
    fn test_highlight_preserves_text() {
        for line in ["sqrt(16) + 2", "  1 +   x  ", "'abc", "help", ""] {
            assert_eq!(rendered_text(&Highlighter.highlight(line, 0)), line);
        }
    }

    #[test]
    fn test_function_names_are_blue() {
        let styled = Highlighter.highlight("sqrt(x)", 0);
        assert_eq!(styled.buffer[0].0, Style::new().fg(Color::Blue));
        assert_eq!(styled.buffer[2].0, Style::new().fg(Color::Red));
    }

    #[test]
    fn test_validator() {
        assert!(matches!(
            BracketValidator.validate("sqrt((1"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            BracketValidator.validate("sqrt(1)"),
            ValidationResult::Complete
        ));
    }
}
