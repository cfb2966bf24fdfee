//! Swarm Shooter - A Galaga-style formation shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Draw-list generation for the host sprite service
//! - `audio`: Sound cue dispatch
//! - `platform`: Input aggregation and host service contracts
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{ConfigError, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one update per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical playfield size in pixels
    pub const SCREEN_WIDTH: f32 = 240.0;
    pub const SCREEN_HEIGHT: f32 = 320.0;

    /// Player sprite footprint (used for edge clamping)
    pub const PLAYER_SPRITE_SIZE: f32 = 32.0;
    /// Ship nose, relative to player position, where bullets spawn
    pub const GUN_OFFSET_X: f32 = 12.0;
    pub const GUN_OFFSET_Y: f32 = 4.0;

    /// Falling stars re-enter here after dropping off the bottom
    pub const STAR_WRAP_Y: f32 = -64.0;

    /// Number of enemy sprite variants a wave may pick from
    pub const ENEMY_VARIANTS: u32 = 3;
}

/// Offset of length `len` in direction `dir` (radians)
#[inline]
pub fn length_dir(len: f32, dir: f32) -> Vec2 {
    Vec2::new(dir.cos() * len, dir.sin() * len)
}

/// Clamp each axis of `pos` into `[0, max]`
#[inline]
pub fn clamp_to_field(pos: Vec2, max: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO))
}
