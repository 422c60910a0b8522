//! The player body: vertical physics and visual pose

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::StepCounter;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Rect, SpriteRect, ms_to_frames};

/// Visual pose, each mapping to a sprite-sheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    RunA,
    RunB,
    Jump,
    Dead,
}

impl Pose {
    pub fn sprite(&self) -> SpriteRect {
        match self {
            Pose::RunA => SpriteRect::new(1514, 0, 88, 94),
            Pose::RunB => SpriteRect::new(1602, 0, 88, 94),
            Pose::Jump => SpriteRect::new(1338, 0, 88, 94),
            Pose::Dead => SpriteRect::new(1788, 0, 88, 94),
        }
    }
}

/// The dino
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity in px/frame (negative is up)
    pub vel_y: f32,
    pub size: Vec2,
    pub is_jumping: bool,
    pub is_dead: bool,
    pub is_on_ground: bool,
    pub pose: Pose,
    /// Position within the run animation cycle
    anim_tick: u32,
    anim_steps: StepCounter,
    gravity: f32,
    jump_impulse: f32,
    anim_period: u32,
    hitbox_inset: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel_y: 0.0,
            size: Vec2::new(DINO_WIDTH, DINO_HEIGHT),
            is_jumping: false,
            is_dead: false,
            is_on_ground: true,
            pose: Pose::RunA,
            anim_tick: 0,
            anim_steps: StepCounter::new(tuning.cadence),
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            anim_period: tuning.run_anim_period,
            hitbox_inset: tuning.player_hitbox_inset,
        };
        player.reset();
        player
    }

    /// y of the top edge when standing on the ground
    #[inline]
    pub fn ground_top(&self) -> f32 {
        GROUND_Y - self.size.y
    }

    /// Back to the standing pose
    pub fn reset(&mut self) {
        self.pos = Vec2::new(DINO_X, self.ground_top());
        self.vel_y = 0.0;
        self.is_jumping = false;
        self.is_dead = false;
        self.is_on_ground = true;
        self.pose = Pose::RunA;
        self.anim_tick = 0;
        self.anim_steps.reset();
    }

    /// Advance physics by `delta_ms`
    pub fn update(&mut self, delta_ms: f32) {
        let frames = ms_to_frames(delta_ms);
        if !self.is_on_ground {
            self.vel_y += self.gravity * frames;
        }
        self.pos.y += self.vel_y * frames;

        let ground = self.ground_top();
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.vel_y = 0.0;
            self.is_jumping = false;
            self.is_on_ground = true;
        } else {
            self.is_on_ground = false;
        }

        self.update_pose(delta_ms);
    }

    fn update_pose(&mut self, delta_ms: f32) {
        // Dead pose is sticky
        if self.is_dead {
            return;
        }
        if self.is_jumping || !self.is_on_ground {
            self.pose = Pose::Jump;
            return;
        }
        let steps = self.anim_steps.steps(delta_ms);
        self.anim_tick = (self.anim_tick + steps) % self.anim_period;
        self.pose = if self.anim_tick < self.anim_period / 2 {
            Pose::RunA
        } else {
            Pose::RunB
        };
    }

    /// Start a jump. Returns false when already jumping or dead.
    pub fn jump(&mut self) -> bool {
        if self.is_jumping || self.is_dead {
            return false;
        }
        self.vel_y = self.jump_impulse;
        self.is_jumping = true;
        true
    }

    pub fn die(&mut self) {
        self.is_dead = true;
        self.pose = Pose::Dead;
    }

    /// Sprite-sized rectangle
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Forgiving hitbox, smaller than the sprite
    pub fn bounding_box(&self) -> Rect {
        self.rect().inset(self.hitbox_inset)
    }
}
