//! Obstacles and the field that spawns, scrolls and culls them
//!
//! Spawning is driven by a countdown whose length is derived from the
//! current speed, so the on-screen gap between obstacles stays roughly
//! constant as the game speeds up.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Rect, SpriteRect, ms_to_frames};

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Small,
    Big,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Small => "small",
            ObstacleKind::Big => "big",
        }
    }

    /// Width and height, fixed per category
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Small => Vec2::new(SMALL_WIDTH, SMALL_HEIGHT),
            ObstacleKind::Big => Vec2::new(BIG_WIDTH, BIG_HEIGHT),
        }
    }

    /// Sprite-sheet origin of the first variant
    fn sprite_origin(&self) -> (i32, i32) {
        match self {
            ObstacleKind::Small => (446, 2),
            ObstacleKind::Big => (652, 2),
        }
    }

    /// Horizontal distance between sprite variants
    fn variant_stride(&self) -> i32 {
        match self {
            ObstacleKind::Small => 102,
            ObstacleKind::Big => 150,
        }
    }
}

/// A single cactus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner; y sits the obstacle on the ground
    pub pos: Vec2,
    pub size: Vec2,
    pub sprite: SpriteRect,
}

impl Obstacle {
    /// Build an obstacle of `kind` at `x`, using sprite `variant` (0 or 1)
    pub fn new(kind: ObstacleKind, x: f32, variant: u8) -> Self {
        let size = kind.size();
        let (sx, sy) = kind.sprite_origin();
        Self {
            kind,
            pos: Vec2::new(x, GROUND_Y - size.y),
            size,
            sprite: SpriteRect::new(
                sx + i32::from(variant.min(1)) * kind.variant_stride(),
                sy,
                size.x as i32,
                size.y as i32,
            ),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Hitbox inset by `inset` on every side
    pub fn bounding_box(&self, inset: f32) -> Rect {
        self.rect().inset(inset)
    }
}

/// Spawn pacing derived from [`Tuning`]
#[derive(Debug, Clone)]
struct SpawnRules {
    max_obstacles: usize,
    cull_margin: f32,
    hitbox_inset: f32,
    initial_speed: f32,
    gap_base: f32,
    gap_per_speed: f32,
    gap_min: f32,
    gap_max: f32,
    jitter: f32,
    interval_min: f32,
    interval_max: f32,
    startup_delay: f32,
}

impl SpawnRules {
    fn from_tuning(tuning: &Tuning) -> Self {
        let (interval_min, interval_max) = tuning.spawn_interval_bounds();
        let (gap_min, gap_max) = tuning.spawn_gap_bounds();
        Self {
            max_obstacles: tuning.max_obstacles,
            cull_margin: tuning.cull_margin,
            hitbox_inset: tuning.obstacle_hitbox_inset,
            initial_speed: tuning.initial_speed,
            gap_base: tuning.spawn_gap_base,
            gap_per_speed: tuning.spawn_gap_per_speed,
            gap_min,
            gap_max,
            jitter: tuning.spawn_jitter,
            interval_min,
            interval_max,
            startup_delay: tuning.startup_delay_ms,
        }
    }
}

/// Ordered obstacle collection (spawn order) plus the spawn countdown
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    next_spawn_ms: f32,
    rng: Pcg32,
    rules: SpawnRules,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let rules = SpawnRules::from_tuning(tuning);
        let mut field = Self {
            obstacles: Vec::with_capacity(rules.max_obstacles),
            spawn_timer: 0.0,
            next_spawn_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            rules,
        };
        field.reset();
        field
    }

    /// Clear the field and schedule a longer-than-usual first gap
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.next_spawn_ms =
            self.compute_next_spawn_time(self.rules.initial_speed) + self.rules.startup_delay;
    }

    /// Restart the random sequence
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn next_spawn_ms(&self) -> f32 {
        self.next_spawn_ms
    }

    pub fn hitbox_inset(&self) -> f32 {
        self.rules.hitbox_inset
    }

    /// Insert an obstacle directly, bypassing spawn pacing (still capped)
    pub fn push(&mut self, obstacle: Obstacle) -> bool {
        if self.obstacles.len() >= self.rules.max_obstacles {
            return false;
        }
        self.obstacles.push(obstacle);
        true
    }

    /// Scroll, cull, then run the spawn countdown
    pub fn update(&mut self, delta_ms: f32, game_speed: f32) {
        let frames = ms_to_frames(delta_ms);
        let margin = self.rules.cull_margin;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= game_speed * frames;
        }
        self.obstacles.retain(|o| o.pos.x + o.size.x >= -margin);

        self.spawn_timer += delta_ms;
        if self.spawn_timer >= self.next_spawn_ms {
            self.spawn();
            self.spawn_timer = 0.0;
            self.next_spawn_ms = self.compute_next_spawn_time(game_speed);
        }
    }

    /// Try to spawn a group of 1-2 same-kind obstacles off the right edge.
    /// Returns how many were added.
    fn spawn(&mut self) -> usize {
        if self.obstacles.len() >= self.rules.max_obstacles {
            return 0;
        }

        if !self.obstacles.is_empty() {
            // Nearest obstacle still on screen (or about to be)
            let nearest_x = self
                .obstacles
                .iter()
                .filter(|o| o.pos.x > -o.size.x)
                .map(|o| o.pos.x)
                .fold(CANVAS_WIDTH * 2.0, f32::min);
            if nearest_x > CANVAS_WIDTH * 0.5 {
                return 0;
            }

            let rightmost_x = self
                .obstacles
                .iter()
                .map(|o| o.pos.x)
                .fold(f32::NEG_INFINITY, f32::max);
            if rightmost_x > CANVAS_WIDTH * 0.66 {
                return 0;
            }
        }

        let kind = if self.rng.random_bool(0.5) {
            ObstacleKind::Small
        } else {
            ObstacleKind::Big
        };
        let count = self.rng.random_range(1..=2usize);
        let width = kind.size().x;

        let mut spawned = 0;
        for i in 0..count {
            if self.obstacles.len() >= self.rules.max_obstacles {
                break;
            }
            let variant = self.rng.random_range(0..2u8);
            let x = CANVAS_WIDTH + i as f32 * width;
            self.obstacles.push(Obstacle::new(kind, x, variant));
            spawned += 1;
        }
        log::debug!("spawned {} x {}", spawned, kind.as_str());
        spawned
    }

    /// Milliseconds until the next spawn at `game_speed` (px/frame).
    ///
    /// Picks a pixel gap that widens with speed, jitters it, converts it to
    /// time at the current scroll rate and clamps the result.
    pub fn compute_next_spawn_time(&mut self, game_speed: f32) -> f32 {
        let rules = &self.rules;
        let speed = if game_speed > 0.0 {
            game_speed
        } else {
            rules.initial_speed
        };
        let px_per_ms = ms_to_frames(speed);

        let gap = (rules.gap_base + rules.gap_per_speed * (game_speed - rules.initial_speed))
            .clamp(rules.gap_min, rules.gap_max);
        let jitter = 1.0 - rules.jitter + self.rng.random::<f32>() * 2.0 * rules.jitter;

        let (min_ms, max_ms) = (rules.interval_min, rules.interval_max);
        (gap * jitter / px_per_ms).clamp(min_ms, max_ms)
    }
}
