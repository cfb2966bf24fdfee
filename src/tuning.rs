//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a run can be
//! re-tuned from a JSON file without rebuilding. `Default` is the arcade
//! cabinet's balance.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::ConfigError;

/// Environment variable naming a tuning file for the native runner
pub const TUNING_ENV: &str = "SWARM_TUNING";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    /// Pixels per tick while a direction is held
    pub player_speed: f32,
    /// Ticks between shots
    pub max_fire_rate: u32,
    /// Invincibility at the start of a run (4 seconds)
    pub start_safety_ticks: u32,
    /// Invincibility after a respawn (2 seconds)
    pub respawn_safety_ticks: u32,
    pub start_lives: u32,
    /// Wall-clock delay between death and respawn
    pub respawn_delay_secs: f64,
    pub bullet_speed: f32,

    // === Waves ===
    pub wave_cols: u32,
    pub wave_rows: u32,
    /// Top-left ship position
    pub wave_origin: Vec2,
    /// Distance between neighbouring ships
    pub wave_spacing: Vec2,
    /// Starting age offset per formation step, desynchronises the wiggle
    pub wave_stagger: u32,

    // === Enemy fire ===
    /// Ticks before the first enemy shot of a run
    pub enemy_fire_delay: u32,
    /// Ticks between subsequent shots
    pub enemy_fire_interval: u32,
    /// Lower bound on the interval
    pub enemy_fire_floor: u32,
    pub enemy_bullet_speed: f32,

    // === Ambience ===
    pub star_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: 2.0,
            max_fire_rate: 8,
            start_safety_ticks: 60 * 4,
            respawn_safety_ticks: 120,
            start_lives: 3,
            respawn_delay_secs: 3.0,
            bullet_speed: 6.0,

            wave_cols: 5,
            wave_rows: 4,
            wave_origin: Vec2::new(12.0, 48.0),
            wave_spacing: Vec2::new(40.0, 32.0),
            wave_stagger: 3,

            enemy_fire_delay: 120,
            enemy_fire_interval: 60,
            enemy_fire_floor: 10,
            enemy_bullet_speed: 3.0,

            star_count: 50,
        }
    }
}

impl Tuning {
    /// Playfield size as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Player spawn point: horizontally centred, just above the bottom edge
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0 - 16.0, self.screen_height - 50.0)
    }

    /// Enemy fire interval with the floor applied
    pub fn effective_fire_interval(&self) -> u32 {
        self.enemy_fire_interval.max(self.enemy_fire_floor)
    }

    /// Parse tuning from JSON text; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::debug!("No tuning file, using default balance");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_fire_rate": 4, "start_lives": 5 }"#).unwrap();
        assert_eq!(tuning.max_fire_rate, 4);
        assert_eq!(tuning.start_lives, 5);
        assert_eq!(tuning.wave_cols, 5);
        assert_eq!(tuning.respawn_delay_secs, 3.0);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Some(Path::new("/definitely/not/here.json")));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_fire_interval_floor() {
        let tuning = Tuning {
            enemy_fire_interval: 2,
            ..Default::default()
        };
        assert_eq!(tuning.effective_fire_interval(), 10);
    }

    #[test]
    fn test_spawn_point() {
        assert_eq!(Tuning::default().player_spawn(), Vec2::new(104.0, 270.0));
    }
}
