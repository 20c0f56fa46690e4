//! Lexer for time expressions.
//!
//! Converts an expression string into a sequence of [`Token`]s. At each
//! position value literals are tried first, then glue, then operators;
//! a position no pattern matches is fatal and names the unmatched
//! remainder of the expression.

use crate::error::TimeError;
use crate::time::Value;

use super::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, TimeError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }

            let token = match self.peek() {
                '0'..='9' => self.lex_value()?,
                '(' => self.single_char(TokenKind::LParen),
                ')' => self.single_char(TokenKind::RParen),
                ',' => self.single_char(TokenKind::Comma),
                '+' => self.single_char(TokenKind::Plus),
                '-' => self.single_char(TokenKind::Minus),
                '*' => self.single_char(TokenKind::Star),
                '/' => self.single_char(TokenKind::Slash),
                '@' => self.single_char(TokenKind::At),
                _ => return Err(self.unmatched(self.pos)),
            };
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn peek_is(&self, ch: char) -> bool {
        !self.is_at_end() && self.peek() == ch
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        ch
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn single_char(&mut self, kind: TokenKind) -> Token {
        let pos = self.pos;
        let ch = self.advance();
        Token {
            kind,
            pos,
            text: ch.to_string(),
        }
    }

    /// A syntax error naming the whole unmatched remainder from `start`.
    fn unmatched(&self, start: usize) -> TimeError {
        let rest: String = self.chars[start..].iter().collect();
        TimeError::syntax(format!("unmatched expression at '{rest}'"), start)
    }

    /// Lex a value literal starting at a digit: a unit-suffixed count,
    /// a transport position, or a bare seconds number.
    fn lex_value(&mut self) -> Result<Token, TimeError> {
        let start = self.pos;
        let (first, is_float) = self.lex_number();

        let value = if self.peek_is(':') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.lex_transport(&first)
        } else if !is_float && self.peek_is('n') {
            self.advance();
            Value::Duplet(self.parse_count(&first, start)?)
        } else if !is_float && self.peek_is('t') {
            self.advance();
            Value::Triplet(self.parse_count(&first, start)?)
        } else if !is_float && self.peek_is('m') {
            self.advance();
            Value::Measures(self.parse_count(&first, start)?)
        } else if !is_float && self.peek_is('i') {
            self.advance();
            let ticks: u64 = first
                .parse()
                .map_err(|_| TimeError::syntax(format!("tick count out of range: '{first}'"), start))?;
            Value::Ticks(ticks)
        } else if !is_float && self.peek_is('h') && self.peek_next() == Some('z') {
            self.advance();
            self.advance();
            Value::Hertz(self.parse_count(&first, start)?)
        } else if self.peek_is('s') {
            self.advance();
            Value::Seconds(first.parse().unwrap_or(0.0))
        } else {
            // Bare number: seconds.
            Value::Seconds(first.parse().unwrap_or(0.0))
        };

        // A stray alphanumeric tail glued to the literal invalidates the
        // whole literal, not just the tail: "4x" is unmatched as "4x".
        if !self.is_at_end() && self.peek().is_ascii_alphanumeric() {
            return Err(self.unmatched(start));
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        Ok(Token {
            kind: TokenKind::Value(value),
            pos: start,
            text,
        })
    }

    /// Lex the remaining components of a `bars:beats:sixteenths` position.
    /// Missing trailing components default to 0.
    fn lex_transport(&mut self, first: &str) -> Value {
        let mut parts = vec![first.parse::<f64>().unwrap_or(0.0)];
        while parts.len() < 3
            && self.peek_is(':')
            && self.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance(); // ':'
            let (text, _) = self.lex_number();
            parts.push(text.parse().unwrap_or(0.0));
        }
        Value::Transport {
            bars: parts[0],
            beats: parts[1],
            sixteenths: parts.get(2).copied().unwrap_or(0.0),
        }
    }

    /// Lex a digit run with an optional fractional part. The caller
    /// guarantees the current char is a digit.
    fn lex_number(&mut self) -> (String, bool) {
        let start = self.pos;
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }
        let mut is_float = false;
        if self.peek_is('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // '.'
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        (text, is_float)
    }

    fn parse_count(&self, text: &str, start: usize) -> Result<u32, TimeError> {
        text.parse()
            .map_err(|_| TimeError::syntax(format!("count out of range: '{text}'"), start))
    }
}
