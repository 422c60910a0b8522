//! Data-driven game balance
//!
//! Every number the simulation uses to pace a run lives here. Hosts can ship
//! a partial JSON document; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// How call-driven cadences (score tick, run animation) advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    /// One step per `update` call, regardless of elapsed time (retro behaviour)
    #[default]
    Calls,
    /// Accumulate elapsed milliseconds; one nominal frame counts as one step
    Elapsed,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Calls => "Calls",
            Cadence::Elapsed => "Elapsed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calls" | "call" => Some(Cadence::Calls),
            "elapsed" | "time" => Some(Cadence::Elapsed),
            _ => None,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration, px/frame²
    pub gravity: f32,
    /// Initial vertical velocity of a jump, px/frame (negative is up)
    pub jump_impulse: f32,
    /// Steps per run animation cycle (first half RUN_A, second half RUN_B)
    pub run_anim_period: u32,
    /// Hitbox inset from the player sprite, each side
    pub player_hitbox_inset: f32,

    // === Speed / score ===
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed units gained per point of score (floored)
    pub speed_increase_rate: f32,
    /// Steps per +1 score while playing
    pub score_interval: u32,
    pub cadence: Cadence,

    // === Obstacles ===
    pub max_obstacles: usize,
    /// Obstacles are dropped once `x + width` falls below `-cull_margin`
    pub cull_margin: f32,
    /// Hitbox inset from an obstacle sprite, each side
    pub obstacle_hitbox_inset: f32,
    pub spawn_gap_base: f32,
    pub spawn_gap_per_speed: f32,
    pub spawn_gap_min: f32,
    pub spawn_gap_max: f32,
    /// Symmetric jitter applied to the pixel gap (0.3 = ±30%)
    pub spawn_jitter: f32,
    pub spawn_min_ms: f32,
    pub spawn_max_ms: f32,
    /// Extra delay before the first obstacle of a run
    pub startup_delay_ms: f32,

    // === Clock ===
    pub min_delta_ms: f32,
    pub max_delta_ms: f32,
    /// Delta used for the first update after (re)start
    pub first_delta_ms: f32,
    pub scroll_cycle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.5,
            jump_impulse: -38.0,
            run_anim_period: 10,
            player_hitbox_inset: 10.0,

            initial_speed: 13.0,
            max_speed: 30.0,
            speed_increase_rate: 0.005,
            score_interval: 5,
            cadence: Cadence::Calls,

            max_obstacles: 3,
            cull_margin: 50.0,
            obstacle_hitbox_inset: 5.0,
            spawn_gap_base: 900.0,
            spawn_gap_per_speed: 30.0,
            spawn_gap_min: 600.0,
            spawn_gap_max: 2000.0,
            spawn_jitter: 0.3,
            spawn_min_ms: 1800.0,
            spawn_max_ms: 4000.0,
            startup_delay_ms: 800.0,

            min_delta_ms: 1.0,
            max_delta_ms: 50.0,
            first_delta_ms: crate::consts::FRAME_MS,
            scroll_cycle: crate::consts::SCROLL_CYCLE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// The spawn interval minimum is not checked against the maximum; see
    /// [`Tuning::spawn_interval_bounds`].
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_speed < self.initial_speed {
            return Err(TuningError::Invalid {
                field: "max_speed",
                reason: "must be >= initial_speed",
            });
        }
        if self.initial_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "initial_speed",
                reason: "must be positive",
            });
        }
        if self.score_interval == 0 {
            return Err(TuningError::Invalid {
                field: "score_interval",
                reason: "must be at least 1",
            });
        }
        if self.run_anim_period < 2 {
            return Err(TuningError::Invalid {
                field: "run_anim_period",
                reason: "must be at least 2",
            });
        }
        if self.min_delta_ms <= 0.0 || self.max_delta_ms < self.min_delta_ms {
            return Err(TuningError::Invalid {
                field: "max_delta_ms",
                reason: "delta clamp must be positive and ordered",
            });
        }
        if !(self.first_delta_ms > 0.0 && self.first_delta_ms.is_finite()) {
            return Err(TuningError::Invalid {
                field: "first_delta_ms",
                reason: "must be positive",
            });
        }
        if !(self.scroll_cycle > 0.0 && self.scroll_cycle.is_finite()) {
            return Err(TuningError::Invalid {
                field: "scroll_cycle",
                reason: "must be positive",
            });
        }
        if self.max_obstacles == 0 {
            return Err(TuningError::Invalid {
                field: "max_obstacles",
                reason: "must be at least 1",
            });
        }
        if self.spawn_gap_min.is_nan()
            || self.spawn_gap_max.is_nan()
            || self.spawn_gap_min > self.spawn_gap_max
        {
            return Err(TuningError::Invalid {
                field: "spawn_gap_max",
                reason: "must be >= spawn_gap_min",
            });
        }
        if self.spawn_max_ms.is_nan() || self.spawn_max_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_max_ms",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Spawn interval clamp, self-correcting a misconfigured range.
    ///
    /// When `min >= max` the minimum falls back below the maximum instead of
    /// failing. A non-positive maximum falls back to the default.
    pub fn spawn_interval_bounds(&self) -> (f32, f32) {
        let mut max = self.spawn_max_ms;
        if max.is_nan() || max <= 0.0 {
            max = Tuning::default().spawn_max_ms;
            log::warn!(
                "spawn_max_ms {} is not positive, using {}",
                self.spawn_max_ms,
                max
            );
        }
        let mut min = self.spawn_min_ms;
        if min.is_nan() || min >= max {
            min = max - 500.0;
            if min <= 0.0 {
                min = max * 0.5;
            }
            log::warn!(
                "spawn interval bounds misconfigured ({} >= {}), using {}",
                self.spawn_min_ms,
                max,
                min
            );
        }
        (min, max)
    }

    /// Pixel gap clamp; an unordered range is swapped, a NaN bound falls
    /// back to the default range
    pub fn spawn_gap_bounds(&self) -> (f32, f32) {
        let (min, max) = (self.spawn_gap_min, self.spawn_gap_max);
        if min.is_nan() || max.is_nan() {
            let d = Tuning::default();
            log::warn!("spawn gap bounds are NaN, using defaults");
            return (d.spawn_gap_min, d.spawn_gap_max);
        }
        if min > max {
            log::warn!("spawn gap bounds unordered ({} > {}), swapping", min, max);
            return (max, min);
        }
        (min, max)
    }
}
