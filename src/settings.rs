//! Game settings and preferences
//!
//! Player-facing options that never change gameplay. Stored as JSON next to,
//! but separate from, the balance file in [`crate::tuning`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a settings file for the native runner
pub const SETTINGS_ENV: &str = "SWARM_SETTINGS";

/// Failure reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Particle effects (explosions, stars, engine trail)
    pub particles: bool,
    /// Draw hitbox outlines over entities
    pub debug_hitboxes: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Input ===
    /// Stick deflection that counts as a held direction
    pub gamepad_threshold: f32,

    // === Accessibility ===
    /// Reduced motion (no invincibility flicker or orbiting stars)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            debug_hitboxes: false,

            master_volume: 1.0,
            sfx_volume: 0.4,
            music_volume: 0.3,
            muted: false,

            gamepad_threshold: 1.0,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective flicker while invincible (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective orbiting-star effect while invincible (respects reduced_motion)
    pub fn effective_orbit_stars(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::debug!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arcade_mix() {
        let settings = Settings::default();
        assert_eq!(settings.sfx_volume, 0.4);
        assert_eq!(settings.music_volume, 0.3);
        assert!(settings.effective_flicker());
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_flicker());
        assert!(!settings.effective_orbit_stars());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("swarm_settings_{}.json", std::process::id()));
        let settings = Settings {
            muted: true,
            debug_hitboxes: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
