//! Tokenizer for calculator expressions
//!
//! Produces a flat token stream. Identifiers are kept as raw names here;
//! resolving them against a symbol scope is the parser's job.

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Integer literal without fraction or exponent
    Int(i64),
    /// Literal with a fraction, an exponent, or too large for i64
    Float(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the source expression
    pub pos: usize,
}

/// Split an expression into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)) {
            let (kind, end) = scan_number(source, i)?;
            tokens.push(Token { kind, pos: i });
            i = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(source[start..i].to_string()),
                pos: start,
            });
            continue;
        }

        let kind = match c {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            _ => {
                let ch = source[i..].chars().next().unwrap_or('?');
                return Err(CalcError::evaluation(format!(
                    "unexpected character '{}' at position {}",
                    ch, i
                )));
            },
        };
        tokens.push(Token { kind, pos: i });
        i += 1;
    }

    Ok(tokens)
}

/// Scan a numeric literal starting at `start`
///
/// Accepts `12`, `1.5`, `.5`, `3.`, `1e3`, `2.5E-4`. An `e` that is not
/// followed by digits is left for the identifier scanner.
fn scan_number(source: &str, start: usize) -> Result<(TokenKind, usize)> {
    let bytes = source.as_bytes();
    let mut i = start;
    let mut is_float = false;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            is_float = true;
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    let text = &source[start..i];
    let invalid = || CalcError::evaluation(format!("invalid number literal '{}'", text));

    if !is_float {
        if let Ok(value) = text.parse::<i64>() {
            return Ok((TokenKind::Int(value), i));
        }
    }

    let value: f64 = text.parse().map_err(|_| invalid())?;
    Ok((TokenKind::Float(value), i))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_parens() {
        assert_eq!(
            kinds("(1+2)*3^2"),
            vec![
                TokenKind::LParen,
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Int(2),
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Int(3),
                TokenKind::Caret,
                TokenKind::Int(2),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("1.5"), vec![TokenKind::Float(1.5)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Float(0.5)]);
        assert_eq!(kinds("2e3"), vec![TokenKind::Float(2000.0)]);
        assert_eq!(kinds("2.5E-1"), vec![TokenKind::Float(0.25)]);
        // Out of i64 range degrades to float
        assert_eq!(
            kinds("99999999999999999999"),
            vec![TokenKind::Float(1e20)]
        );
    }

    #[test]
    fn test_trailing_e_is_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Int(2), TokenKind::Ident("e".to_string())]
        );
    }

    #[test]
    fn test_identifiers_are_whole_words() {
        assert_eq!(
            kinds("exp(e)"),
            vec![
                TokenKind::Ident("exp".to_string()),
                TokenKind::LParen,
                TokenKind::Ident("e".to_string()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_characters() {
        let err = tokenize("2 % 3").unwrap_err();
        assert!(err.to_string().contains("unexpected character '%' at position 2"));

        assert!(tokenize("__import__('os')").is_err());
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("  12 + x").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![2, 5, 7]);
    }
}
