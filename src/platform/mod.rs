//! Host boundary
//!
//! The simulation never serializes itself; this layer packs snapshots into a
//! flat `f32` layout for cheap transfer across the wasm boundary:
//!
//! ```text
//! [0]  player x        [6]  ground offset
//! [1]  player y        [7]  game speed
//! [2]  player width    [8]  score
//! [3]  player height   [9]  high score
//! [4]  jumping (0/1)   [10] obstacle count n
//! [5]  dead (0/1)
//! [11 + 5i ..] obstacle i: x, y, width, height, small (1.0) / big (0.0)
//! ```

use crate::sim::{EngineSnapshot, ObstacleKind};

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::DinoGame;

/// Number of leading fields before the obstacle tuples
pub const HEADER_LEN: usize = 11;
/// Fields per obstacle tuple
pub const FIELDS_PER_OBSTACLE: usize = 5;

/// Index of the obstacle count field
pub const OBSTACLE_COUNT_INDEX: usize = HEADER_LEN - 1;

/// Reusable flat snapshot buffer; only grows, never shrinks
#[derive(Debug, Clone, Default)]
pub struct StateBuffer {
    data: Vec<f32>,
}

impl StateBuffer {
    pub fn new() -> Self {
        Self::with_obstacles(3)
    }

    /// Pre-size for `obstacles` tuples
    pub fn with_obstacles(obstacles: usize) -> Self {
        Self {
            data: Vec::with_capacity(Self::required_len(obstacles)),
        }
    }

    pub fn required_len(obstacles: usize) -> usize {
        HEADER_LEN + obstacles * FIELDS_PER_OBSTACLE
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Pack `snapshot`; the returned slice is exactly the valid region
    pub fn fill(&mut self, snapshot: &EngineSnapshot) -> &[f32] {
        let needed = Self::required_len(snapshot.obstacles.len());
        self.data.clear();
        if self.data.capacity() < needed {
            self.data.reserve_exact(needed);
        }

        let p = &snapshot.player;
        self.data.extend_from_slice(&[
            p.x,
            p.y,
            p.width,
            p.height,
            flag(p.is_jumping),
            flag(p.is_dead),
            snapshot.ground_offset,
            snapshot.game_speed,
            snapshot.score.score as f32,
            snapshot.score.high_score as f32,
            snapshot.obstacles.len() as f32,
        ]);
        for o in &snapshot.obstacles {
            self.data.extend_from_slice(&[
                o.x,
                o.y,
                o.width,
                o.height,
                flag(o.kind == ObstacleKind::Small),
            ]);
        }
        &self.data
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Byte view of the packed region
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[inline]
fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::NullStore;
    use crate::sim::Engine;
    use crate::tuning::Tuning;

    fn engine() -> Engine {
        Engine::new(Tuning::default(), Box::new(NullStore), 1)
    }

    #[test]
    fn test_header_layout() {
        let e = engine();
        let mut buf = StateBuffer::new();
        let data = buf.fill(&e.snapshot());
        assert_eq!(data.len(), HEADER_LEN);
        assert_eq!(&data[..4], &[100.0, 506.0, 89.0, 94.0]);
        assert_eq!(data[4], 0.0);
        assert_eq!(data[5], 0.0);
        assert_eq!(data[7], 13.0);
        assert_eq!(data[OBSTACLE_COUNT_INDEX], 0.0);
    }

    #[test]
    fn test_obstacle_tuples() {
        let mut e = engine();
        e.place_obstacle(ObstacleKind::Small, 700.0);
        e.place_obstacle(ObstacleKind::Big, 900.0);
        let mut buf = StateBuffer::new();
        let data = buf.fill(&e.snapshot());
        assert_eq!(data.len(), HEADER_LEN + 2 * FIELDS_PER_OBSTACLE);
        assert_eq!(data[OBSTACLE_COUNT_INDEX], 2.0);
        assert_eq!(&data[11..16], &[700.0, 530.0, 34.0, 70.0, 1.0]);
        assert_eq!(&data[16..21], &[900.0, 500.0, 49.0, 100.0, 0.0]);
    }

    #[test]
    fn test_buffer_reused_without_realloc() {
        let mut e = engine();
        let mut buf = StateBuffer::with_obstacles(3);
        let cap = buf.capacity();
        for x in [400.0, 500.0, 600.0] {
            e.place_obstacle(ObstacleKind::Small, x);
            buf.fill(&e.snapshot());
            assert_eq!(buf.capacity(), cap);
        }
        assert_eq!(buf.as_bytes().len(), buf.as_slice().len() * 4);
    }

    #[test]
    fn test_buffer_grows_when_needed() {
        let e = {
            let mut e = engine();
            e.place_obstacle(ObstacleKind::Big, 400.0);
            e
        };
        let mut buf = StateBuffer::with_obstacles(0);
        let len = buf.fill(&e.snapshot()).len();
        assert_eq!(len, StateBuffer::required_len(1));
        assert!(buf.capacity() >= len);
    }
}
