//! Error types for expression parsing and evaluation.

use std::fmt;

/// An error from parsing or evaluating a time expression.
#[derive(Debug, Clone)]
pub struct TimeError {
    pub message: String,
    /// Char offset into the source expression, when known.
    pub pos: Option<usize>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Tokenization or parse failure. The whole expression is invalid.
    Syntax,
    /// Division or quantization by a zero-length operand, or a zero-valued
    /// frequency or note literal with no finite duration.
    Arithmetic,
}

impl TimeError {
    pub fn syntax(message: impl Into<String>, pos: usize) -> Self {
        Self {
            message: message.into(),
            pos: Some(pos),
            kind: ErrorKind::Syntax,
        }
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            pos: None,
            kind: ErrorKind::Arithmetic,
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Arithmetic => "arithmetic error",
        };
        match self.pos {
            Some(pos) => write!(f, "{label} at {pos}: {}", self.message),
            None => write!(f, "{label}: {}", self.message),
        }
    }
}

impl std::error::Error for TimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_position() {
        let err = TimeError::syntax("unmatched expression at '4x'", 0);
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.pos, Some(0));
        assert_eq!(err.to_string(), "syntax error at 0: unmatched expression at '4x'");
    }

    #[test]
    fn arithmetic_error_has_no_position() {
        let err = TimeError::arithmetic("division by a zero-length operand");
        assert_eq!(err.kind, ErrorKind::Arithmetic);
        assert_eq!(err.pos, None);
        assert!(err.to_string().starts_with("arithmetic error: "));
    }
}
