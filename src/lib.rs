//! Danmaku Boss - simulation core for a single-boss bullet-hell encounter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, patterns, collisions, state machines)
//! - `tuning`: Data-driven difficulty balance
//! - `renderer`: Render boundary (frame snapshots handed to a drawing backend)
//! - `audio`: Audio cue boundary

pub mod audio;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{Difficulty, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions (screen space, +y points down)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_HITBOX_SIZE: f32 = 8.0;
    /// Grazebox is the sprite shrunk by this much on each axis
    pub const PLAYER_GRAZE_INSET: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_FOCUS_SPEED: f32 = 2.0;
    /// Distance of the home point above the bottom edge
    pub const PLAYER_HOME_OFFSET: f32 = 50.0;
    /// 100 ms at 60 Hz
    pub const FIRE_COOLDOWN_TICKS: u64 = 6;
    /// 10 seconds at 60 Hz
    pub const INVINCIBLE_TICKS: u32 = 600;
    /// Visibility flips every this many ticks while invincible
    pub const BLINK_HALF_PERIOD: u32 = 15;

    /// Homing shot defaults
    pub const SHOT_SIZE: f32 = 10.0;
    pub const SHOT_SPEED: f32 = 8.0;
    /// Degrees per tick
    pub const SHOT_TURN_RATE: f32 = 3.0;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 100.0;
    pub const BOSS_HOME_Y: f32 = 150.0;
    pub const BOSS_MOVE_SPEED: f32 = 2.0;
    /// Ticks between random-walk retargets (1.5 s)
    pub const BOSS_RETARGET_TICKS: u32 = 90;
    pub const BOSS_ROAM_MARGIN_X: f32 = 100.0;
    pub const BOSS_ROAM_MIN_Y: f32 = 100.0;
    pub const BOSS_ROAM_MAX_Y: f32 = 250.0;

    /// Hazard sprite sizes
    pub const SMALL_BULLET_SIZE: f32 = 8.0;
    pub const LARGE_BULLET_SIZE: f32 = 20.0;
    pub const HUGE_BULLET_SIZE: f32 = 48.0;
    pub const LASER_LENGTH: f32 = 100.0;
    pub const LASER_WIDTH: f32 = 5.0;
    pub const CHARGE_LASER_WIDTH: f32 = 30.0;
    pub const CHARGE_LASER_HEIGHT: f32 = 300.0;
    /// Charge lasers spawn inside this margin, in the lower half of the field
    pub const CHARGE_LASER_MARGIN: f32 = 50.0;

    /// Scoring
    pub const GRAZE_SCORE: u64 = 20;
    pub const AVOID_SCORE: u64 = 1;
    pub const DAMAGE_SCORE: u64 = 1;

    /// Ceremony holds around the extra stage (3 seconds)
    pub const EXTRA_TRANSITION_TICKS: u32 = 180;
    pub const EXTRA_RESULTS_HOLD_TICKS: u32 = 180;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    180.0 - (180.0 - angle).rem_euclid(360.0)
}

/// Unit vector for a heading in degrees (standard math orientation)
#[inline]
pub fn heading_to_vec(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in degrees from `from` toward `to`
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}
