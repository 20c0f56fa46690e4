//! Token types and the token stream cursor.

use crate::time::Value;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Char offset of the token in the source expression.
    pub pos: usize,
    /// The literal text the token was matched from.
    pub text: String,
}

/// The kind of token.
///
/// `Plus` and `Minus` serve as both binary and unary operators; the parser
/// decides from grammatical position.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A materialized value literal.
    Value(Value),

    // Glue
    LParen,
    RParen,
    Comma,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    At,
}

/// Cursor over a token sequence with single-token look-ahead.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map_or(0, |t| t.pos + t.text.chars().count());
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn next(&mut self) -> Option<&Token> {
        let i = self.pos;
        if i < self.tokens.len() {
            self.pos += 1;
        }
        self.tokens.get(i)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Char offset just past the last token, for end-of-input diagnostics.
    pub fn end_pos(&self) -> usize {
        self.end
    }
}
