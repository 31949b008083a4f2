//! Tunable constants for the runner.
//!
//! Every value lives in [`GameConfig`] so a host page can override it with
//! `configure(json)` before mounting. The `Default` impl reproduces the shipped
//! game. Canvas size is not a tunable: it follows the browser viewport and is
//! tracked separately in [`Viewport`].

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Canvas size used before the first resize event arrives.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Viewports at or below this width count as mobile for the orientation gate.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Number of frames in the player's run cycle.
pub const PLAYER_SPRITE_COUNT: usize = 5;
/// Number of obstacle artworks; variants are numbered `1..=OBSTACLE_VARIANTS`.
pub const OBSTACLE_VARIANTS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Height of the ground strip at the bottom of the canvas.
    pub ground_height: f64,
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    /// Added to vertical velocity every tick.
    pub gravity: f64,
    /// Impulse applied on jump and double jump (negative = upward).
    pub jump_force: f64,
    /// Velocity forced while fast-descending.
    pub fast_fall_velocity: f64,
    /// Ticks per run-cycle frame.
    pub animation_ticks_per_frame: u32,
    /// Horizontal entity speed, px per tick.
    pub game_speed: f64,
    /// Background scroll speed, px per tick.
    pub background_speed: f64,
    /// Entities at or left of this x are dropped.
    pub offscreen_threshold: f64,
    pub obstacle_spawn_rate: f64,
    pub collectible_spawn_rate: f64,
    pub obstacle_width: f64,
    pub obstacle_height: f64,
    pub collectible_size: f64,
    /// Lowest collectible spawn height above the ground line.
    pub collectible_min_lift: f64,
    /// Highest collectible spawn height above the ground line.
    pub collectible_max_lift: f64,
    pub survival_points: u64,
    pub collectible_bonus: u64,
    /// Floating score opacity lost per decay tick.
    pub effect_fade_step: f64,
    /// Floating score upward drift per decay tick.
    pub effect_rise_step: f64,
    /// Hard lifetime of a floating score in ms.
    pub effect_lifetime_ms: f64,
    /// Wall-clock period of the decay timer in ms.
    pub effect_tick_ms: i32,
    pub high_score_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ground_height: 100.0,
            player_x: 100.0,
            player_width: 80.0,
            player_height: 80.0,
            gravity: 0.8,
            jump_force: -15.0,
            fast_fall_velocity: 20.0,
            animation_ticks_per_frame: 8,
            game_speed: 5.0,
            background_speed: 2.0,
            offscreen_threshold: -100.0,
            obstacle_spawn_rate: 0.012,
            collectible_spawn_rate: 0.008,
            obstacle_width: 40.0,
            obstacle_height: 60.0,
            collectible_size: 30.0,
            collectible_min_lift: 50.0,
            collectible_max_lift: 200.0,
            survival_points: 1,
            collectible_bonus: 100,
            effect_fade_step: 0.02,
            effect_rise_step: 2.0,
            effect_lifetime_ms: 2000.0,
            effect_tick_ms: 16,
            high_score_capacity: 5,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same tunables with both spawners switched off. Handy for scripted runs.
    pub fn without_spawning(mut self) -> Self {
        self.obstacle_spawn_rate = 0.0;
        self.collectible_spawn_rate = 0.0;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("ground_height", self.ground_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("fast_fall_velocity", self.fast_fall_velocity),
            ("game_speed", self.game_speed),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("collectible_size", self.collectible_size),
            ("effect_fade_step", self.effect_fade_step),
            ("effect_lifetime_ms", self.effect_lifetime_ms),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }
        if self.background_speed < 0.0 {
            return Err(GameError::InvalidConfig("background_speed must be >= 0".into()));
        }
        if !(self.jump_force < 0.0) {
            return Err(GameError::InvalidConfig("jump_force must be negative (upward)".into()));
        }
        for (name, p) in [
            ("obstacle_spawn_rate", self.obstacle_spawn_rate),
            ("collectible_spawn_rate", self.collectible_spawn_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GameError::InvalidConfig(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if self.collectible_min_lift >= self.collectible_max_lift {
            return Err(GameError::InvalidConfig(
                "collectible_min_lift must be below collectible_max_lift".into(),
            ));
        }
        if self.animation_ticks_per_frame == 0 || self.effect_tick_ms <= 0 || self.high_score_capacity == 0 {
            return Err(GameError::InvalidConfig(
                "animation_ticks_per_frame, effect_tick_ms and high_score_capacity must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Live canvas dimensions (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: width.max(1.0), height: height.max(1.0) }
    }

    /// Narrow and taller than wide: the game refuses to start here.
    pub fn is_portrait_mobile(&self) -> bool {
        self.width <= MOBILE_MAX_WIDTH && self.height > self.width
    }

    /// Top of the ground strip.
    pub fn ground_top(&self, cfg: &GameConfig) -> f64 {
        self.height - cfg.ground_height
    }

    /// Resting y of the player's top edge.
    pub fn ground_line(&self, cfg: &GameConfig) -> f64 {
        self.ground_top(cfg) - cfg.player_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{ "gravity": 1.2, "game_speed": 7 }"#).unwrap();
        assert_eq!(cfg.gravity, 1.2);
        assert_eq!(cfg.game_speed, 7.0);
        assert_eq!(cfg.jump_force, -15.0);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(GameConfig::from_json(r#"{ "gravty": 1.0 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "obstacle_spawn_rate": 1.5 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "jump_force": 3.0 }"#).is_err());
        // ArrowDown must push the rider down, never up
        assert!(GameConfig::from_json(r#"{ "fast_fall_velocity": -20.0 }"#).is_err());
        assert!(GameConfig::from_json(r#"{ "fast_fall_velocity": 0.0 }"#).is_err());
    }

    #[test]
    fn ground_line_and_orientation() {
        let cfg = GameConfig::default();
        let vp = Viewport::new(1200.0, 600.0);
        assert_eq!(vp.ground_line(&cfg), 420.0);
        assert!(!vp.is_portrait_mobile());
        assert!(Viewport::new(390.0, 844.0).is_portrait_mobile());
        // Landscape phone is fine.
        assert!(!Viewport::new(700.0, 390.0).is_portrait_mobile());
        // Tall desktop window is not "mobile".
        assert!(!Viewport::new(1000.0, 1400.0).is_portrait_mobile());
    }
}
