//! Platform abstraction layer
//!
//! The simulation never talks to a window, a sound card or a controller.
//! Hosts implement the traits here and the runner wires them together:
//! - Sprites: atlas lookup plus a sink for draw commands
//! - Audio: one-shot cues and a music loop
//! - Input: keyboard and gamepad polling

pub mod input;

pub use input::{GamepadState, Gamepads, InputSnapshot, KeyboardState};

use glam::Vec2;

use crate::audio::{MusicTrack, SoundEffect};
use crate::renderer::{DrawCommand, SpriteId};

/// Sprite sizes as packed in the host's texture atlas
pub trait SpriteAtlas {
    /// Pixel size of `sprite`
    fn sprite_size(&self, sprite: SpriteId) -> Vec2;
}

/// Draws commands produced by [`crate::renderer::build_draw_list`]
pub trait SpriteRenderer: SpriteAtlas {
    fn draw(&mut self, command: &DrawCommand);
}

/// Plays sound at a pre-mixed volume
pub trait AudioBackend {
    /// Restart `effect` from the beginning
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    /// Start `track` looping
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    fn stop_music(&mut self);
}

/// Polls device state once per frame
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}
