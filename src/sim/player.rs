//! Player kinematics: vertical integration under gravity, jump / double jump,
//! fast descent, and the run-cycle animation counter.

use crate::collision::Rect;
use crate::config::{GameConfig, PLAYER_SPRITE_COUNT};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub jumping: bool,
    pub can_double_jump: bool,
    pub sprite_index: usize,
    pub animation_counter: u64,
}

impl PlayerState {
    /// Fresh player standing on the ground line.
    pub fn new(cfg: &GameConfig, ground_line: f64) -> Self {
        Self {
            x: cfg.player_x,
            y: ground_line,
            velocity_y: 0.0,
            jumping: false,
            can_double_jump: true,
            sprite_index: 0,
            animation_counter: 0,
        }
    }

    /// Edge-triggered jump. Returns whether an impulse was applied.
    pub fn jump(&mut self, cfg: &GameConfig) -> bool {
        if !self.jumping {
            self.velocity_y = cfg.jump_force;
            self.jumping = true;
            self.can_double_jump = true;
            true
        } else if self.can_double_jump {
            self.velocity_y = cfg.jump_force;
            self.can_double_jump = false;
            true
        } else {
            false
        }
    }

    /// Force a fast fall. Grounded players are unaffected.
    pub fn fast_fall(&mut self, cfg: &GameConfig) {
        if self.jumping {
            self.velocity_y = cfg.fast_fall_velocity;
        }
    }

    /// One fixed step: integrate, clamp to the ground, advance the run cycle.
    pub fn integrate(&mut self, cfg: &GameConfig, ground_line: f64) {
        let mut y = self.y + self.velocity_y;
        let mut velocity = self.velocity_y + cfg.gravity;
        if y >= ground_line {
            y = ground_line;
            velocity = 0.0;
            self.jumping = false;
            self.can_double_jump = true;
        }
        self.y = y;
        self.velocity_y = velocity;

        self.animation_counter += 1;
        let per_frame = u64::from(cfg.animation_ticks_per_frame.max(1));
        self.sprite_index = ((self.animation_counter / per_frame) % PLAYER_SPRITE_COUNT as u64) as usize;
    }

    /// Snap back to a (possibly new) ground line, e.g. after a viewport resize.
    pub fn anchor_to(&mut self, ground_line: f64) {
        self.y = ground_line;
    }

    pub fn rect(&self, cfg: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, cfg.player_width, cfg.player_height)
    }
}
