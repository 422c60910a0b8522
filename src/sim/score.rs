//! Score accrual and the speed curve derived from it

use serde::{Deserialize, Serialize};

use super::clock::StepCounter;
use crate::tuning::Tuning;

/// Score, high score and play time
#[derive(Debug, Clone)]
pub struct ScoreProgression {
    score: u32,
    high_score: u32,
    /// Steps since the last +1
    sub_tick: u32,
    total_time_ms: f64,
    steps: StepCounter,
    interval: u32,
    increase_rate: f32,
    initial_speed: f32,
    max_speed: f32,
}

/// Score fields as exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub high_score: u32,
    /// Whole seconds of play
    pub total_time: u32,
}

impl ScoreProgression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            high_score: 0,
            sub_tick: 0,
            total_time_ms: 0.0,
            steps: StepCounter::new(tuning.cadence),
            interval: tuning.score_interval.max(1),
            increase_rate: tuning.speed_increase_rate,
            initial_speed: tuning.initial_speed,
            max_speed: tuning.max_speed,
        }
    }

    /// Clear the run; the high score survives
    pub fn reset(&mut self) {
        self.score = 0;
        self.sub_tick = 0;
        self.total_time_ms = 0.0;
        self.steps.reset();
    }

    pub fn update(&mut self, delta_ms: f32, is_running: bool) {
        self.total_time_ms += f64::from(delta_ms);
        if !is_running {
            return;
        }
        for _ in 0..self.steps.steps(delta_ms) {
            self.sub_tick += 1;
            if self.sub_tick >= self.interval {
                self.score += 1;
                self.sub_tick = 0;
            }
        }
    }

    /// Raise the high score to the current score. Returns true on a new record.
    pub fn update_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// `base + floor(score * rate)`, clamped to the speed range
    pub fn game_speed(&self, base: f32) -> f32 {
        let increase = (self.score as f32 * self.increase_rate).floor();
        (base + increase).clamp(self.initial_speed, self.max_speed)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Overwrite the stored high score (loading from storage)
    pub fn set_high_score(&mut self, high_score: u32) {
        self.high_score = high_score;
    }

    pub fn total_time_ms(&self) -> f64 {
        self.total_time_ms
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            high_score: self.high_score,
            total_time: (self.total_time_ms / 1000.0) as u32,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Cadence;

    #[test]
    fn test_score_every_fifth_call() {
        let mut s = ScoreProgression::new(&Tuning::default());
        for _ in 0..4 {
            s.update(16.67, true);
        }
        assert_eq!(s.score(), 0);
        s.update(16.67, true);
        assert_eq!(s.score(), 1);
        for _ in 0..5 {
            s.update(1.0, true);
        }
        assert_eq!(s.score(), 2, "call count, not elapsed time");
    }

    #[test]
    fn test_time_accrues_when_not_running() {
        let mut s = ScoreProgression::new(&Tuning::default());
        for _ in 0..30 {
            s.update(50.0, false);
        }
        assert_eq!(s.score(), 0);
        assert_eq!(s.total_time_ms(), 1500.0);
        assert_eq!(s.view().total_time, 1);
    }

    #[test]
    fn test_elapsed_cadence() {
        let tuning = Tuning {
            cadence: Cadence::Elapsed,
            ..Tuning::default()
        };
        let mut s = ScoreProgression::new(&tuning);
        // 5 nominal frames in one call
        s.update(5.0 * 16.67 + 0.01, true);
        assert_eq!(s.score(), 1);
        for _ in 0..5 {
            s.update(1.0, true);
        }
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut s = ScoreProgression::new(&Tuning::default());
        s.set_high_score(10);
        s.set_score(5);
        assert!(!s.update_high_score());
        assert_eq!(s.high_score(), 10);
        s.set_score(11);
        assert!(s.update_high_score());
        assert!(!s.update_high_score(), "idempotent");
        assert_eq!(s.high_score(), 11);
        s.reset();
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), 11);
    }

    #[test]
    fn test_game_speed_curve() {
        let mut s = ScoreProgression::new(&Tuning::default());
        assert_eq!(s.game_speed(13.0), 13.0);
        s.set_score(1000);
        assert_eq!(s.game_speed(13.0), 18.0);
        s.set_score(1_000_000);
        assert_eq!(s.game_speed(13.0), 30.0);
        s.set_score(0);
        assert_eq!(s.game_speed(0.0), 13.0, "clamped up to initial speed");
    }
}
