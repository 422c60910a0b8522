//! Dino Run - simulation core for a side-scrolling runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, obstacles, score, state machine, engine)
//! - `tuning`: Data-driven game balance
//! - `persistence`: High score load/save capability
//! - `platform`: Host boundary (flat state buffer, wasm handle)

pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use persistence::{HighScoreStore, MemoryStore, NullStore};
pub use sim::{Engine, EngineSnapshot, GamePhase};
pub use tuning::{Cadence, Tuning};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length; one "frame" of velocity is applied per this many ms
    pub const FRAME_MS: f32 = 16.67;

    /// Visible play area
    pub const CANVAS_WIDTH: f32 = 1300.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;
    /// Walking surface; the player's lower edge rests here
    pub const GROUND_Y: f32 = 600.0;

    /// Player body (fixed x, sprite-sized box)
    pub const DINO_X: f32 = 100.0;
    pub const DINO_WIDTH: f32 = 89.0;
    pub const DINO_HEIGHT: f32 = 94.0;

    /// Obstacle sizes by category
    pub const SMALL_WIDTH: f32 = 34.0;
    pub const SMALL_HEIGHT: f32 = 70.0;
    pub const BIG_WIDTH: f32 = 49.0;
    pub const BIG_HEIGHT: f32 = 100.0;

    /// Background tile period for the ground scroll
    pub const SCROLL_CYCLE: f32 = 2404.0;
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }

    /// Strict overlap: touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Sprite-sheet source rectangle (integer pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Convert a millisecond delta into nominal frames
#[inline]
pub fn ms_to_frames(delta_ms: f32) -> f32 {
    delta_ms / consts::FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(100.0, 506.0, 89.0, 94.0).inset(10.0);
        assert_eq!(r, Rect::new(110.0, 516.0, 69.0, 74.0));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_ms_to_frames() {
        assert!((ms_to_frames(16.67) - 1.0).abs() < 1e-6);
        assert!((ms_to_frames(50.0) - 2.9994).abs() < 1e-3);
    }
}
