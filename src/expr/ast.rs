//! Expression tree for parsed time expressions.

use crate::time::Value;

/// A node in the parsed expression tree.
///
/// Leaves carry a literal [`Value`]; operator nodes own their children
/// exclusively. The tree is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(Value),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Prefix `-`.
    Negate,
    /// Prefix `+`: offset from the caller's reference time.
    FromNow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
    /// `@`: express the left side as a multiple of the right side.
    Quantize,
}

impl BinaryOp {
    /// Precedence tier: 0 binds tightest.
    pub fn tier(self) -> u8 {
        match self {
            BinaryOp::Mult | BinaryOp::Div | BinaryOp::Quantize => 0,
            BinaryOp::Add | BinaryOp::Sub => 1,
        }
    }
}

impl Expr {
    pub fn value(value: Value) -> Self {
        Expr::Value(value)
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}
