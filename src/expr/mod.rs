//! Time expression DSL — text → tokens → expression tree → [`TimeValue`].

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{BinaryOp, Expr, UnaryOp};

use crate::error::TimeError;
use crate::time::TimeValue;
use lexer::Lexer;
use parser::Parser;

/// The expression engine facade.
///
/// Runs lexer → parser → materialization.
pub struct TimeExpr;

impl TimeExpr {
    /// Parse an expression into a [`TimeValue`] ready for evaluation.
    pub fn parse(source: &str) -> Result<TimeValue, TimeError> {
        Ok(TimeValue::from_expr(Self::parse_tree(source)?))
    }

    /// Parse an expression into its raw tree form.
    pub fn parse_tree(source: &str) -> Result<Expr, TimeError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        let mut parser = Parser::new(tokens);
        parser.parse()
    }
}
