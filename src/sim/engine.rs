//! The engine: one instance owns every piece of simulation state and advances
//! it once per host call.

use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::collision::{CollisionResult, check_collision};
use super::obstacle::{Obstacle, ObstacleField, ObstacleKind};
use super::player::Player;
use super::score::ScoreProgression;
use super::snapshot::{EngineSnapshot, ObstacleView, PlayerView};
use super::state::{GamePhase, GameStateMachine, PhaseChange};
use crate::persistence::HighScoreStore;
use crate::tuning::Tuning;
use crate::ms_to_frames;

/// Returned when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub is_new_record: bool,
    pub final_score: u32,
    pub high_score: u32,
}

pub struct Engine {
    tuning: Tuning,
    player: Player,
    obstacles: ObstacleField,
    score: ScoreProgression,
    machine: GameStateMachine,
    clock: FrameClock,
    /// Authoritative speed in px/frame, recomputed from score every tick
    game_speed: f32,
    ground_offset: f32,
    store: Box<dyn HighScoreStore>,
}

impl Engine {
    /// Build an engine in the Idle phase and load the stored high score
    pub fn new(tuning: Tuning, mut store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let mut score = ScoreProgression::new(&tuning);
        score.set_high_score(store.load());
        log::info!(
            "Engine created (seed {}, high score {})",
            seed,
            score.high_score()
        );
        Self {
            player: Player::new(&tuning),
            obstacles: ObstacleField::new(&tuning, seed),
            score,
            machine: GameStateMachine::new(),
            clock: FrameClock::new(&tuning),
            game_speed: tuning.initial_speed,
            ground_offset: 0.0,
            store,
            tuning,
        }
    }

    /// Default tuning and a random seed
    pub fn with_store(store: Box<dyn HighScoreStore>) -> Self {
        Self::new(Tuning::default(), store, rand::random())
    }

    /// Begin (or keep) playing
    pub fn start(&mut self) -> bool {
        if self.machine.is_playing() {
            return true;
        }
        let Some(change) = self.machine.set_phase(GamePhase::Playing) else {
            return false;
        };
        self.clock.reset();
        if self.player.is_dead {
            self.player.reset();
        }
        self.on_phase_change(change);
        true
    }

    /// Restore every component to its initial values and go back to Idle.
    /// Returns whether the Idle transition was taken.
    pub fn reset(&mut self) -> bool {
        self.player.reset();
        self.obstacles.reset();
        self.score.reset();
        self.game_speed = self.tuning.initial_speed;
        self.ground_offset = 0.0;

        match self.machine.set_phase(GamePhase::Idle) {
            Some(change) => {
                self.on_phase_change(change);
                true
            }
            None => false,
        }
    }

    /// Advance one step to host time `now_ms`. No-op unless Playing.
    pub fn update(&mut self, now_ms: f64) {
        if !self.machine.is_playing() {
            return;
        }

        let delta_ms = self.clock.advance(now_ms);
        let frames = ms_to_frames(delta_ms);
        self.ground_offset += self.game_speed * frames;
        if self.tuning.scroll_cycle > 0.0 {
            self.ground_offset %= self.tuning.scroll_cycle;
        }

        self.player.update(delta_ms);
        self.obstacles.update(delta_ms, self.game_speed);
        self.score.update(delta_ms, self.machine.is_playing());

        self.game_speed = self.score.game_speed(self.tuning.initial_speed);

        let hit = check_collision(&self.player, &self.obstacles);
        if hit.hit && !self.player.is_dead {
            log::debug!("collision with {:?}", hit.kind);
            self.game_over();
        }
    }

    /// Jump; only honoured while Playing
    pub fn jump(&mut self) -> bool {
        self.machine.is_playing() && self.player.jump()
    }

    /// End the run. `None` if the GameOver transition is not allowed.
    pub fn game_over(&mut self) -> Option<GameOverSummary> {
        self.player.die();
        let is_new_record = self.score.update_high_score();

        let change = self.machine.set_phase(GamePhase::GameOver)?;
        self.on_phase_change(change);

        let summary = GameOverSummary {
            is_new_record,
            final_score: self.score.score(),
            high_score: self.score.high_score(),
        };
        log::info!(
            "Game over: score {} (high {}{})",
            summary.final_score,
            summary.high_score,
            if is_new_record { ", new record" } else { "" }
        );
        Some(summary)
    }

    /// Runs synchronously after every accepted transition
    fn on_phase_change(&mut self, change: PhaseChange) {
        log::info!("Phase {:?} -> {:?}", change.from, change.to);
        if change.to == GamePhase::GameOver {
            self.store.save(self.score.high_score());
        }
    }

    /// Drop an obstacle at `x` (still subject to the field cap)
    pub fn place_obstacle(&mut self, kind: ObstacleKind, x: f32) -> bool {
        self.obstacles.push(Obstacle::new(kind, x, 0))
    }

    pub fn check_collision(&self) -> CollisionResult {
        check_collision(&self.player, &self.obstacles)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            player: PlayerView::from(&self.player),
            obstacles: self.obstacles.obstacles().iter().map(ObstacleView::from).collect(),
            ground_offset: self.ground_offset,
            game_speed: self.game_speed,
            score: self.score.view(),
            game_state: self.machine.phase().code(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.machine.is_playing()
    }

    pub fn is_game_over(&self) -> bool {
        self.machine.is_game_over()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.obstacles()
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub fn set_high_score(&mut self, high_score: u32) {
        self.score.set_high_score(high_score);
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
