//! Simulation module
//!
//! All gameplay logic lives here:
//! - Call-driven: one `Engine::update` is one step, no internal scheduling
//! - Seeded RNG only (owned by the obstacle field)
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering, storage or platform dependencies

pub mod clock;
pub mod collision;
pub mod engine;
pub mod obstacle;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod state;

pub use clock::{FrameClock, StepCounter};
pub use collision::{CollisionResult, check_collision};
pub use engine::{Engine, GameOverSummary};
pub use obstacle::{Obstacle, ObstacleField, ObstacleKind};
pub use player::{Player, Pose};
pub use score::{ScoreProgression, ScoreView};
pub use snapshot::{EngineSnapshot, ObstacleView, PlayerView};
pub use state::{GamePhase, GameStateMachine, PhaseChange};
