//! Read-only views handed to the renderer

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::{Player, Pose};
use super::score::ScoreView;
use crate::SpriteRect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_jumping: bool,
    pub is_dead: bool,
    pub pose: Pose,
    pub sprite: SpriteRect,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            width: p.size.x,
            height: p.size.y,
            is_jumping: p.is_jumping,
            is_dead: p.is_dead,
            pose: p.pose,
            sprite: p.pose.sprite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub sprite: SpriteRect,
}

impl From<&Obstacle> for ObstacleView {
    fn from(o: &Obstacle) -> Self {
        Self {
            kind: o.kind,
            x: o.pos.x,
            y: o.pos.y,
            width: o.size.x,
            height: o.size.y,
            sprite: o.sprite,
        }
    }
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub player: PlayerView,
    /// Spawn order, front to back
    pub obstacles: Vec<ObstacleView>,
    pub ground_offset: f32,
    pub game_speed: f32,
    pub score: ScoreView,
    /// 0 = Idle, 1 = Playing, 2 = GameOver
    pub game_state: u8,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
