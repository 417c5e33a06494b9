//! Tokenizer for normalized, validated expressions.

use std::fmt;

use super::error::CalcError;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**`
    Pow,
    /// `++`, never valid in an expression
    Increment,
    /// `--`, never valid in an expression
    Decrement,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(num) => write!(f, "number {num}"),
            Token::Ident(name) => write!(f, "identifier '{name}'"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::Pow => write!(f, "'**'"),
            Token::Increment => write!(f, "'++'"),
            Token::Decrement => write!(f, "'--'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

/// A token and the byte offset it starts at.
pub type Spanned = (Token, usize);

/// Split an expression into tokens, skipping whitespace.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        let token = match c {
            b if b.is_ascii_whitespace() => {
                pos += 1;
                continue;
            }
            b'+' if bytes.get(pos + 1) == Some(&b'+') => {
                pos += 1;
                Token::Increment
            }
            b'-' if bytes.get(pos + 1) == Some(&b'-') => {
                pos += 1;
                Token::Decrement
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 1;
                Token::Pow
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'%' => Token::Percent,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'0' if matches!(
                bytes.get(pos + 1).copied(),
                Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
            ) =>
            {
                let end = scan_word(bytes, pos);
                let literal = &input[pos..end];
                pos = end;
                tokens.push((parse_radix(literal)?, start));
                continue;
            }
            b'0'..=b'9' | b'.' => {
                let end = scan_number(bytes, pos);
                let literal = &input[pos..end];
                pos = end;
                tokens.push((parse_number(literal)?, start));
                continue;
            }
            b if b.is_ascii_alphabetic() => {
                let end = scan_word(bytes, pos);
                let name = input[pos..end].to_string();
                pos = end;
                tokens.push((Token::Ident(name), start));
                continue;
            }
            _ => {
                let found = input[pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(CalcError::UnexpectedChar {
                    found,
                    position: pos,
                });
            }
        };

        pos += 1;
        tokens.push((token, start));
    }

    Ok(tokens)
}

/// End of the run of ASCII letters and digits starting at `start`.
fn scan_word(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .map_or(bytes.len(), |offset| start + offset)
}

/// Find the end of a numeric literal starting at `start`.
///
/// Accepts `12`, `12.`, `12.5`, `.5` and an optional exponent (`1e3`,
/// `2.5E-4`). An `e` not followed by digits is left for the identifier
/// scanner.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    let digits = |pos: &mut usize| {
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
    };

    digits(&mut pos);
    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        digits(&mut pos);
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = exp;
            digits(&mut pos);
        }
    }

    pos
}

fn parse_number(literal: &str) -> Result<Token, CalcError> {
    let bytes = literal.as_bytes();
    // A lone "." is the only shape scan_number lets through without a digit.
    // Multi-digit literals may not start with 0 (`012`, `08`).
    let leading_zero = bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit();
    if leading_zero || !bytes.iter().any(|b| b.is_ascii_digit()) {
        return Err(CalcError::MalformedNumber {
            literal: literal.to_string(),
        });
    }
    literal
        .parse::<f64>()
        .map(Token::Num)
        .map_err(|_| CalcError::MalformedNumber {
            literal: literal.to_string(),
        })
}

/// Parse `0x1f`, `0b101` or `0o17`.
fn parse_radix(literal: &str) -> Result<Token, CalcError> {
    let malformed = || CalcError::MalformedNumber {
        literal: literal.to_string(),
    };
    let radix = match literal.as_bytes().get(1) {
        Some(b'x' | b'X') => 16,
        Some(b'b' | b'B') => 2,
        _ => 8,
    };
    let digits = &literal[2..];
    if digits.is_empty() {
        return Err(malformed());
    }

    digits
        .chars()
        .try_fold(0f64, |acc, c| {
            c.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .map(Token::Num)
        .ok_or_else(malformed)
}
