//! Clock normalization
//!
//! The host hands the engine absolute timestamps; physics wants a bounded
//! millisecond delta. `FrameClock` does that conversion, `StepCounter` turns
//! deltas into discrete cadence steps.

use crate::consts::FRAME_MS;
use crate::tuning::{Cadence, Tuning};

/// Converts absolute host time into a clamped per-call delta
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    min_delta_ms: f32,
    max_delta_ms: f32,
    first_delta_ms: f32,
}

impl FrameClock {
    /// Out-of-range clamp values from an unvalidated [`Tuning`] fall back to
    /// an ordered, positive range
    pub fn new(tuning: &Tuning) -> Self {
        let min_delta_ms = if tuning.min_delta_ms > 0.0 && tuning.min_delta_ms.is_finite() {
            tuning.min_delta_ms
        } else {
            1.0
        };
        let max_delta_ms = if tuning.max_delta_ms.is_finite() {
            tuning.max_delta_ms.max(min_delta_ms)
        } else {
            min_delta_ms.max(FRAME_MS)
        };
        let first_delta_ms = if tuning.first_delta_ms > 0.0 && tuning.first_delta_ms.is_finite() {
            tuning.first_delta_ms
        } else {
            FRAME_MS
        };
        Self {
            last_time: None,
            min_delta_ms,
            max_delta_ms,
            first_delta_ms,
        }
    }

    /// Forget the previous sample; the next `advance` uses the synthetic delta
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    /// Record `now_ms` and return the clamped delta since the last sample.
    ///
    /// A non-finite timestamp is not recorded; it yields the synthetic delta
    /// and the next finite sample is measured against the last good one.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("ignoring non-finite host timestamp {now_ms}");
            return self.first_delta_ms;
        }
        let delta = match self.last_time {
            None => self.first_delta_ms,
            Some(last) => {
                let raw = (now_ms - last) as f32;
                if raw.is_finite() {
                    raw.clamp(self.min_delta_ms, self.max_delta_ms)
                } else {
                    self.max_delta_ms
                }
            }
        };
        self.last_time = Some(now_ms);
        delta
    }

    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }
}

/// Turns per-call deltas into cadence steps
#[derive(Debug, Clone)]
pub struct StepCounter {
    cadence: Cadence,
    accumulated_ms: f32,
}

impl StepCounter {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            accumulated_ms: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }

    /// Number of cadence steps this call is worth
    pub fn steps(&mut self, delta_ms: f32) -> u32 {
        match self.cadence {
            Cadence::Calls => 1,
            Cadence::Elapsed => {
                self.accumulated_ms += delta_ms.max(0.0);
                let steps = (self.accumulated_ms / FRAME_MS).floor();
                self.accumulated_ms -= steps * FRAME_MS;
                steps as u32
            }
        }
    }
}
