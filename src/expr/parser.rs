//! Parser for time expressions.
//!
//! Precedence-climbing recursive descent over two binary tiers, with unary
//! prefixes and parenthesized grouping. Binary operators fold left to right
//! within a tier; `* / @` bind tighter than `+ -`.

use crate::error::TimeError;

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::token::{Token, TokenKind, TokenStream};

/// Loosest binary tier. Parsing starts here, and parentheses reset to it.
const MAX_TIER: i8 = 1;

pub struct Parser {
    stream: TokenStream,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
        }
    }

    pub fn parse(&mut self) -> Result<Expr, TimeError> {
        let expr = self.parse_binary(MAX_TIER)?;
        if let Some(token) = self.stream.peek() {
            return Err(TimeError::syntax(
                format!("unexpected trailing input: '{}'", token.text),
                token.pos,
            ));
        }
        Ok(expr)
    }

    fn parse_binary(&mut self, tier: i8) -> Result<Expr, TimeError> {
        if tier < 0 {
            return self.parse_unary();
        }
        let mut lhs = self.parse_binary(tier - 1)?;
        while let Some(op) = self.match_binary(tier) {
            let rhs = self.parse_binary(tier - 1)?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Consume the next token if it is a binary operator of this tier.
    fn match_binary(&mut self, tier: i8) -> Option<BinaryOp> {
        let op = match self.stream.peek()?.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mult,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::At => BinaryOp::Quantize,
            _ => return None,
        };
        if op.tier() as i8 != tier {
            return None;
        }
        self.stream.next();
        Some(op)
    }

    fn parse_unary(&mut self) -> Result<Expr, TimeError> {
        match self.stream.peek().map(|t| &t.kind) {
            Some(TokenKind::Minus) => {
                self.stream.next();
                Ok(Expr::unary(UnaryOp::Negate, self.parse_unary()?))
            }
            Some(TokenKind::Plus) => {
                self.stream.next();
                Ok(Expr::unary(UnaryOp::FromNow, self.parse_unary()?))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, TimeError> {
        let (kind, pos, text) = match self.stream.next() {
            Some(t) => (t.kind.clone(), t.pos, t.text.clone()),
            None => {
                return Err(TimeError::syntax(
                    "unexpected end of expression, expected a value",
                    self.stream.end_pos(),
                ));
            }
        };

        match kind {
            TokenKind::Value(value) => Ok(Expr::value(value)),
            TokenKind::LParen => {
                let expr = self.parse_binary(MAX_TIER)?;
                match self.stream.next() {
                    Some(t) if t.kind == TokenKind::RParen => Ok(expr),
                    Some(t) => Err(TimeError::syntax(
                        format!("expected ')', got '{}'", t.text),
                        t.pos,
                    )),
                    None => Err(TimeError::syntax(
                        "expected ')'",
                        self.stream.end_pos(),
                    )),
                }
            }
            _ => Err(TimeError::syntax(
                format!("unexpected token: '{text}'"),
                pos,
            )),
        }
    }
}
