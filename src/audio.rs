//! Sound cue dispatch
//!
//! Maps simulation events to sound effects and mixes volumes from
//! [`Settings`]. The actual playback is a host service ([`AudioBackend`]).

use crate::platform::AudioBackend;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player bullet fired
    Shoot,
    /// Actors removed by end-of-frame cleanup
    Explode,
    /// Player ship destroyed
    PlayerDeath,
}

impl SoundEffect {
    /// Per-effect trim applied on top of the sfx volume
    fn trim(self) -> f32 {
        match self {
            SoundEffect::Shoot => -0.2,
            SoundEffect::Explode => -0.2,
            SoundEffect::PlayerDeath => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Background loop, started with the run
    Theme,
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume and mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.backend.stop_music();
        }
    }

    /// Final volume for `effect`, 0 when muted
    pub fn effect_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        (self.sfx_volume + effect.trim()).clamp(0.0, 1.0) * self.master_volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effect_volume(effect);
        if vol <= 0.0 {
            return;
        }
        log::debug!("sfx {:?} at {:.2}", effect, vol);
        self.backend.play_effect(effect, vol);
    }

    pub fn start_music(&mut self, track: MusicTrack) {
        if self.muted {
            return;
        }
        let vol = self.music_volume * self.master_volume;
        self.backend.play_music(track, vol);
    }

    /// Play the cue for each event raised by the last tick
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(effect) = cue_for(event) {
                self.play(effect);
            }
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Sound effect for a game event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::PlayerFired => Some(SoundEffect::Shoot),
        GameEvent::ActorsPurged => Some(SoundEffect::Explode),
        GameEvent::PlayerKilled { .. } => Some(SoundEffect::PlayerDeath),
        GameEvent::EnemyFired { .. }
        | GameEvent::PlayerRespawned
        | GameEvent::WaveSpawned { .. }
        | GameEvent::GameOver { .. } => None,
    }
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudioBackend {
    /// Effects played so far
    pub played: usize,
}

impl AudioBackend for LogAudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("play {:?} ({:.2})", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::info!("music {:?} ({:.2})", track, volume);
    }

    fn stop_music(&mut self) {
        log::info!("music stopped");
    }
}
