//! Tempo context — the external supplier of beat and tick durations.
//!
//! The engine never owns a transport. It reads beat-level timing through
//! [`TempoSource`] at evaluation time, so the same value can be evaluated
//! against different tempos. A detached context (no transport attached)
//! resolves every tempo-relative duration to zero instead of failing.

use serde::{Deserialize, Serialize};

/// Timing capability supplied by the surrounding transport/clock.
pub trait TempoSource {
    /// Duration of one beat in seconds (60 / BPM).
    fn beat_duration(&self) -> f64;
    /// Duration of one tick in seconds (beat duration / PPQ).
    fn tick_duration(&self) -> f64;
    /// Time signature numerator (beats per bar).
    fn beats_per_bar(&self) -> f64;
}

/// A standalone tempo: BPM, time signature numerator, and tick resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    bpm: f64,
    beats_per_bar: f64,
    ppq: u32,
}

impl Tempo {
    pub fn new(bpm: f64, beats_per_bar: f64, ppq: u32) -> Self {
        Self {
            bpm,
            beats_per_bar,
            ppq,
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Set a new BPM. Takes effect on the next evaluation.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm;
    }

    pub fn ppq(&self) -> u32 {
        self.ppq
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(120.0, 4.0, 192)
    }
}

impl TempoSource for Tempo {
    fn beat_duration(&self) -> f64 {
        60.0 / self.bpm
    }

    fn tick_duration(&self) -> f64 {
        self.beat_duration() / self.ppq as f64
    }

    fn beats_per_bar(&self) -> f64 {
        self.beats_per_bar
    }
}

/// Evaluation context: an optional tempo plus the caller's reference time.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    tempo: Option<&'a dyn TempoSource>,
    now: f64,
}

impl<'a> EvalContext<'a> {
    pub fn new(tempo: &'a dyn TempoSource) -> Self {
        Self {
            tempo: Some(tempo),
            now: 0.0,
        }
    }

    /// A context with no transport attached. Tempo-relative units read as
    /// zero-length under it.
    pub fn detached() -> EvalContext<'static> {
        EvalContext {
            tempo: None,
            now: 0.0,
        }
    }

    /// Set the reference time used by from-now (`+expr`) shifts.
    pub fn with_now(mut self, now: f64) -> Self {
        self.now = now;
        self
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn has_tempo(&self) -> bool {
        self.tempo.is_some()
    }

    pub(crate) fn beat_duration(&self) -> f64 {
        self.tempo.map_or(0.0, |t| t.beat_duration())
    }

    pub(crate) fn tick_duration(&self) -> f64 {
        self.tempo.map_or(0.0, |t| t.tick_duration())
    }

    pub(crate) fn beats_per_bar(&self) -> f64 {
        self.tempo.map_or(0.0, |t| t.beats_per_bar())
    }
}
