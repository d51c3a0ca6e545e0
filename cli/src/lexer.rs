use logos::Logos;

/// Coarse tokens used for highlighting and for detecting unfinished input.
///
/// This is not the evaluator's grammar; it only needs to be close enough to
/// color a line and count brackets.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+")]
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // Strict Double Quote String (must end with ")
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    StringDouble,

    // Strict Single Quote String (must end with ')
    #[regex(r#"'(?:[^'\\]|\\.)*'"#)]
    StringSingle,

    #[regex(r"\*\*|//|<<|>>|<=|>=|==|!=|[-+*/%<>&|^~=,.:]")]
    Operator,
}

/// Net bracket depth at the end of `buffer`, or `None` if it cannot be
/// tokenized (for example an unterminated string).
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token_res in Token::lexer(buffer) {
        match token_res {
            Ok(Token::LParen) | Ok(Token::LBracket) => depth += 1,
            Ok(Token::RParen) | Ok(Token::RBracket) => depth -= 1,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(depth.max(0) as usize)
}
