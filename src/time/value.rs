//! Time values — tagged unit literals with chained deferred operations.
//!
//! A [`TimeValue`] is a base [`Value`] plus an ordered chain of operations
//! (add/sub/mult/div/quantize/from-now). The chain is applied strictly
//! left-to-right at evaluation time; it is never reordered for precedence,
//! because precedence was already resolved when the chain was built.

use std::fmt;

use crate::error::TimeError;
use crate::expr::ast::{BinaryOp, Expr, UnaryOp};

use super::tempo::EvalContext;

/// A tagged unit + magnitude literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Plain seconds: `1.5` or `1.5s`.
    Seconds(f64),
    /// Whole measures: `2m`.
    Measures(u32),
    /// Duplet note fraction: `4n` is a quarter note, `1n` a whole measure.
    Duplet(u32),
    /// Triplet note fraction: `4t` is a quarter-note triplet.
    Triplet(u32),
    /// Transport ticks: `3i`.
    Ticks(u64),
    /// Frequency period: `2hz` is half a second.
    Hertz(u32),
    /// Transport position `bars:beats:sixteenths`: `1:2:0`.
    Transport {
        bars: f64,
        beats: f64,
        sixteenths: f64,
    },
}

impl Value {
    /// Whether evaluation of this unit depends on an attached tempo.
    pub fn is_tempo_relative(&self) -> bool {
        !matches!(self, Value::Seconds(_) | Value::Hertz(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Seconds(s) => write!(f, "{s}s"),
            Value::Measures(m) => write!(f, "{m}m"),
            Value::Duplet(n) => write!(f, "{n}n"),
            Value::Triplet(t) => write!(f, "{t}t"),
            Value::Ticks(i) => write!(f, "{i}i"),
            Value::Hertz(hz) => write!(f, "{hz}hz"),
            Value::Transport {
                bars,
                beats,
                sixteenths,
            } => write!(f, "{bars}:{beats}:{sixteenths}"),
        }
    }
}

/// One deferred operation in a value's chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainedOp {
    Add(TimeValue),
    Sub(TimeValue),
    Mult(TimeValue),
    Div(TimeValue),
    /// Express the running value as a multiple of the operand's duration.
    Quantize(TimeValue),
    /// Shift by the caller's reference time.
    FromNow,
}

/// A base value plus its ordered operation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeValue {
    base: Value,
    ops: Vec<ChainedOp>,
}

impl TimeValue {
    pub fn new(base: Value) -> Self {
        Self {
            base,
            ops: Vec::new(),
        }
    }

    pub fn seconds(secs: f64) -> Self {
        Self::new(Value::Seconds(secs))
    }

    pub fn base(&self) -> Value {
        self.base
    }

    pub fn ops(&self) -> &[ChainedOp] {
        &self.ops
    }

    // Fluent chain builders. Each consumes the receiver and appends one
    // operation; insertion order is evaluation order.

    pub fn add(mut self, rhs: impl Into<TimeValue>) -> Self {
        self.ops.push(ChainedOp::Add(rhs.into()));
        self
    }

    pub fn sub(mut self, rhs: impl Into<TimeValue>) -> Self {
        self.ops.push(ChainedOp::Sub(rhs.into()));
        self
    }

    pub fn mult(mut self, rhs: impl Into<TimeValue>) -> Self {
        self.ops.push(ChainedOp::Mult(rhs.into()));
        self
    }

    pub fn div(mut self, rhs: impl Into<TimeValue>) -> Self {
        self.ops.push(ChainedOp::Div(rhs.into()));
        self
    }

    pub fn quantize(mut self, rhs: impl Into<TimeValue>) -> Self {
        self.ops.push(ChainedOp::Quantize(rhs.into()));
        self
    }

    pub fn from_now(mut self) -> Self {
        self.ops.push(ChainedOp::FromNow);
        self
    }

    fn negated(self) -> Self {
        self.mult(-1.0)
    }

    /// Materialize a parsed expression tree.
    ///
    /// A binary node folds its materialized right child into the left
    /// child's chain. Taking the tree by value means no subtree is ever
    /// shared between two chains.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Value(v) => TimeValue::new(v),
            Expr::Unary { op, operand } => {
                let value = Self::from_expr(*operand);
                match op {
                    UnaryOp::Negate => value.negated(),
                    UnaryOp::FromNow => value.from_now(),
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = Self::from_expr(*lhs);
                let rhs = Self::from_expr(*rhs);
                match op {
                    BinaryOp::Add => lhs.add(rhs),
                    BinaryOp::Sub => lhs.sub(rhs),
                    BinaryOp::Mult => lhs.mult(rhs),
                    BinaryOp::Div => lhs.div(rhs),
                    BinaryOp::Quantize => lhs.quantize(rhs),
                }
            }
        }
    }

    /// Evaluate to seconds against `ctx`. From-now shifts use `ctx.now()`.
    ///
    /// Evaluation is a pure read; no result is cached, since the tempo may
    /// change between calls.
    pub fn eval(&self, ctx: &EvalContext) -> Result<f64, TimeError> {
        self.eval_from(ctx, None)
    }

    /// Evaluate with an explicit reference time for from-now shifts.
    ///
    /// The reference time applies only to this value's own chain; nested
    /// operands evaluate against the context alone.
    pub fn eval_from(
        &self,
        ctx: &EvalContext,
        reference_now: Option<f64>,
    ) -> Result<f64, TimeError> {
        let mut value = self.base_seconds(ctx)?;
        for op in &self.ops {
            match op {
                ChainedOp::Add(rhs) => value += rhs.eval(ctx)?,
                ChainedOp::Sub(rhs) => value -= rhs.eval(ctx)?,
                ChainedOp::Mult(rhs) => value *= rhs.eval(ctx)?,
                ChainedOp::Div(rhs) => value /= nonzero(rhs.eval(ctx)?, "division")?,
                ChainedOp::Quantize(rhs) => value /= nonzero(rhs.eval(ctx)?, "quantization")?,
                ChainedOp::FromNow => value += reference_now.unwrap_or_else(|| ctx.now()),
            }
        }
        Ok(value)
    }

    /// Convert the base unit to seconds.
    fn base_seconds(&self, ctx: &EvalContext) -> Result<f64, TimeError> {
        if !ctx.has_tempo() && self.base.is_tempo_relative() {
            log::warn!("no transport attached; '{}' evaluates to 0s", self.base);
        }
        let seconds = match self.base {
            Value::Seconds(s) => s,
            Value::Hertz(hz) => {
                if hz == 0 {
                    return Err(TimeError::arithmetic("'0hz' has no finite period"));
                }
                1.0 / hz as f64
            }
            Value::Measures(m) => m as f64 * ctx.beats_per_bar() * ctx.beat_duration(),
            Value::Duplet(n) => {
                let beats = match n {
                    0 => return Err(TimeError::arithmetic("'0n' has no finite duration")),
                    // A whole note spans a full measure.
                    1 => ctx.beats_per_bar(),
                    n => 4.0 / n as f64,
                };
                beats * ctx.beat_duration()
            }
            Value::Triplet(t) => {
                if t == 0 {
                    return Err(TimeError::arithmetic("'0t' has no finite duration"));
                }
                8.0 / (3.0 * t as f64) * ctx.beat_duration()
            }
            Value::Ticks(i) => i as f64 * ctx.tick_duration(),
            Value::Transport {
                bars,
                beats,
                sixteenths,
            } => (bars * ctx.beats_per_bar() + beats + sixteenths / 4.0) * ctx.beat_duration(),
        };
        Ok(seconds)
    }
}

fn nonzero(value: f64, what: &str) -> Result<f64, TimeError> {
    if value == 0.0 {
        return Err(TimeError::arithmetic(format!(
            "{what} by a zero-length operand"
        )));
    }
    Ok(value)
}

impl From<f64> for TimeValue {
    fn from(secs: f64) -> Self {
        TimeValue::seconds(secs)
    }
}

impl From<Value> for TimeValue {
    fn from(base: Value) -> Self {
        TimeValue::new(base)
    }
}
