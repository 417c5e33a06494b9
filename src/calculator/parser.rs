//! Recursive-descent parser producing an expression tree.
//!
//! Precedence, loosest first: `+ -`, then `* / %`, then unary `+ -`, then
//! `**` (right associative). A signed operand may not be the base of `**`:
//! `-2**2` is rejected and must be written `(-2)**2` or `-(2**2)`, while a
//! signed exponent (`2**-1`) is fine.

use super::error::CalcError;
use super::lexer::{Spanned, Token, tokenize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Ident(String),
    Call { name: String, args: Vec<Expr> },
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Parse a normalized expression into a tree.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };

    let expr = parser.expr()?;
    if let Some((token, position)) = parser.tokens.get(parser.pos) {
        return Err(CalcError::UnexpectedToken {
            found: token.to_string(),
            position: *position,
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Result<Spanned, CalcError> {
        let spanned = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(CalcError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), CalcError> {
        let (token, position) = self.next()?;
        if &token == expected {
            Ok(())
        } else {
            Err(CalcError::UnexpectedToken {
                found: token.to_string(),
                position,
            })
        }
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        if !matches!(self.peek(), Some(Token::Minus | Token::Plus)) {
            return self.power();
        }

        let operand = self.signed()?;
        if let Some((Token::Pow, position)) = self.tokens.get(self.pos) {
            return Err(CalcError::UnexpectedToken {
                found: Token::Pow.to_string(),
                position: *position,
            });
        }
        Ok(operand)
    }

    /// A chain of signs applied to a primary, with no `**` absorbed.
    fn signed(&mut self) -> Result<Expr, CalcError> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::Neg(Box::new(self.signed()?)));
        }
        if self.eat(&Token::Plus) {
            return self.signed();
        }
        self.primary()
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if self.eat(&Token::Pow) {
            let exponent = self.unary()?;
            return Ok(binary(BinOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let (token, position) = self.next()?;
        match token {
            Token::Num(num) => Ok(Expr::Num(num)),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let args = self.args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(CalcError::UnexpectedToken {
                found: other.to_string(),
                position,
            }),
        }
    }

    /// Argument list after an opening parenthesis, through the closing one.
    /// One trailing comma is allowed (`pow(2, 3,)`).
    fn args(&mut self) -> Result<Vec<Expr>, CalcError> {
        let mut args = Vec::new();
        loop {
            if self.eat(&Token::RParen) {
                return Ok(args);
            }
            args.push(self.expr()?);
            if !self.eat(&Token::Comma) {
                self.expect(&Token::RParen)?;
                return Ok(args);
            }
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Num(n))
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            parse("2+3*4").unwrap(),
            Expr::Binary {
                op: BinOp::Add,
                lhs: num(2.0),
                rhs: Box::new(Expr::Binary {
                    op: BinOp::Mul,
                    lhs: num(3.0),
                    rhs: num(4.0),
                }),
            }
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2**3**2").unwrap(),
            Expr::Binary {
                op: BinOp::Pow,
                lhs: num(2.0),
                rhs: Box::new(Expr::Binary {
                    op: BinOp::Pow,
                    lhs: num(3.0),
                    rhs: num(2.0),
                }),
            }
        );
    }

    #[test]
    fn test_signed_base_of_power_rejected() {
        assert_eq!(
            parse("-2**2"),
            Err(CalcError::UnexpectedToken {
                found: "'**'".to_string(),
                position: 2
            })
        );
        assert!(parse("+2**2").is_err());
        assert!(parse("- -2**2").is_err());
        assert!(parse("-(2)**2").is_err());
        assert!(parse("2**-1**2").is_err());
        assert_eq!(
            parse("(-2)**2").unwrap(),
            Expr::Binary {
                op: BinOp::Pow,
                lhs: Box::new(Expr::Neg(num(2.0))),
                rhs: num(2.0),
            }
        );
    }

    #[test]
    fn test_signed_exponent_allowed() {
        assert_eq!(
            parse("2**-1").unwrap(),
            Expr::Binary {
                op: BinOp::Pow,
                lhs: num(2.0),
                rhs: Box::new(Expr::Neg(num(1.0))),
            }
        );
        assert_eq!(parse("- -2").unwrap(), Expr::Neg(Box::new(Expr::Neg(num(2.0)))));
        assert_eq!(parse("-+2").unwrap(), Expr::Neg(num(2.0)));
    }

    #[test]
    fn test_doubled_signs_rejected() {
        for input in ["--5", "2--3", "2++3", "++5"] {
            assert!(
                matches!(parse(input), Err(CalcError::UnexpectedToken { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_trailing_comma_in_call() {
        assert_eq!(
            parse("pow(2, 3,)").unwrap(),
            Expr::Call {
                name: "pow".to_string(),
                args: vec![Expr::Num(2.0), Expr::Num(3.0)],
            }
        );
        assert!(parse("pow(2,,3)").is_err());
        assert!(parse("sin(,)").is_err());
    }

    #[test]
    fn test_calls() {
        assert_eq!(
            parse("pow(2, 3)").unwrap(),
            Expr::Call {
                name: "pow".to_string(),
                args: vec![Expr::Num(2.0), Expr::Num(3.0)],
            }
        );
        assert_eq!(
            parse("sin()").unwrap(),
            Expr::Call {
                name: "sin".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(parse("2 +"), Err(CalcError::UnexpectedEnd));
        assert_eq!(parse("(1"), Err(CalcError::UnexpectedEnd));
        assert!(matches!(
            parse("+*1"),
            Err(CalcError::UnexpectedToken { position: 1, .. })
        ));
        assert!(matches!(
            parse("1 2"),
            Err(CalcError::UnexpectedToken { position: 2, .. })
        ));
        assert!(matches!(
            parse("1,2"),
            Err(CalcError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("()"),
            Err(CalcError::UnexpectedToken { .. })
        ));
    }
}
