//! Cadence — a musical time expression parser and evaluator.
//!
//! Parses expressions like `"4n + 1m @ 8n"` or `"0:2:0"` into a chain of
//! time values and evaluates them to seconds against a tempo context.

pub mod error;
pub mod expr;
pub mod time;

pub use error::{ErrorKind, TimeError};
pub use expr::TimeExpr;
pub use time::{EvalContext, Tempo, TempoSource, TimeValue, Value};
