//! Game phase state machine
//!
//! Idle -> Playing -> GameOver -> Idle. Anything else is rejected and leaves
//! the phase untouched.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the first start (or after a restart)
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Declared but not wired: no transition enters or leaves it
    Paused,
    /// Run ended, waiting for reset
    GameOver,
}

impl GamePhase {
    /// Host-facing code: Idle=0, Playing=1, GameOver=2.
    /// Paused is not part of the mapping and reports as Idle.
    pub fn code(&self) -> u8 {
        match self {
            GamePhase::Playing => 1,
            GamePhase::GameOver => 2,
            GamePhase::Idle | GamePhase::Paused => 0,
        }
    }
}

/// An accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: GamePhase,
    pub to: GamePhase,
}

/// Phase gate with the previous phase retained
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    phase: GamePhase,
    previous: GamePhase,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn previous(&self) -> GamePhase {
        self.previous
    }

    pub fn is(&self, phase: GamePhase) -> bool {
        self.phase == phase
    }

    pub fn is_playing(&self) -> bool {
        self.is(GamePhase::Playing)
    }

    pub fn is_game_over(&self) -> bool {
        self.is(GamePhase::GameOver)
    }

    pub fn can_transition_to(&self, to: GamePhase) -> bool {
        matches!(
            (self.phase, to),
            (GamePhase::Idle, GamePhase::Playing)
                | (GamePhase::Playing, GamePhase::GameOver)
                | (GamePhase::GameOver, GamePhase::Idle)
        )
    }

    /// Request a transition.
    ///
    /// Returns the change when accepted; `None` when `to` is the current
    /// phase or the transition is not allowed.
    pub fn set_phase(&mut self, to: GamePhase) -> Option<PhaseChange> {
        if self.phase == to {
            return None;
        }
        if !self.can_transition_to(to) {
            log::debug!("rejected transition {:?} -> {:?}", self.phase, to);
            return None;
        }
        self.previous = self.phase;
        self.phase = to;
        Some(PhaseChange {
            from: self.previous,
            to,
        })
    }
}
