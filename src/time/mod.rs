//! Time values, tempo context, and evaluation.

pub mod config;
pub mod tempo;
pub mod value;

pub use tempo::{EvalContext, Tempo, TempoSource};
pub use value::{ChainedOp, TimeValue, Value};
