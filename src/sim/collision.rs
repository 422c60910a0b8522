//! Player vs obstacle hit test
//!
//! Both sides use inset hitboxes, so grazing a sprite corner is forgiven.

use super::obstacle::{ObstacleField, ObstacleKind};
use super::player::Player;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    pub hit: bool,
    /// Category of the first overlapping obstacle (spawn order)
    pub kind: Option<ObstacleKind>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            kind: None,
        }
    }
}

/// First obstacle, in spawn order, whose hitbox overlaps the player's
pub fn check_collision(player: &Player, field: &ObstacleField) -> CollisionResult {
    let player_box = player.bounding_box();
    let inset = field.hitbox_inset();
    field
        .obstacles()
        .iter()
        .find(|o| player_box.intersects(&o.bounding_box(inset)))
        .map(|o| CollisionResult {
            hit: true,
            kind: Some(o.kind),
        })
        .unwrap_or_else(CollisionResult::miss)
}
