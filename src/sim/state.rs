//! Game state and core simulation types
//!
//! One owned [`GameState`] holds everything the simulation touches: entities,
//! counters, the run RNG, and the delayed-event queue. It is passed by `&mut`
//! to `tick`; nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actors::{Actor, ActorKind, Actors, EnemyVariant};
use super::bullets::Bullet;
use super::particles::{self, Particle};
use super::player::Player;
use super::schedule::EventQueue;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (including while the player waits to respawn)
    Playing,
    /// Out of lives. Input, waves, enemy fire and respawns are frozen.
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player shot a bullet
    PlayerFired,
    /// An enemy shot at the player
    EnemyFired { pos: Vec2 },
    /// End-of-frame cleanup removed at least one actor
    ActorsPurged,
    /// Player ship destroyed
    PlayerKilled { lives_left: u32 },
    PlayerRespawned,
    WaveSpawned { wave: u32, variant: EnemyVariant },
    GameOver { score: u64, wave: u32 },
}

/// Decides whether a player bullet can hit an actor
pub type HitFilter = fn(&Actor) -> bool;

/// Default hit filter: everything except the reserved inert kind
pub fn default_hit_filter(actor: &Actor) -> bool {
    actor.kind != ActorKind::Inert
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (drives flicker and orbit effects)
    pub time_ticks: u64,
    /// Wall-clock seconds accumulated from tick `dt`s
    pub clock: f64,
    /// Actors destroyed
    pub score: u64,
    /// Waves spawned
    pub difficulty: u32,
    /// Ticks until the next enemy shot
    pub enemy_fire_timer: u32,
    pub player: Player,
    pub actors: Actors,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Delayed events (respawns)
    pub scheduled: EventQueue,
    /// Which actors player bullets may hit
    pub hit_filter: HitFilter,
    /// Bumped on every respawn and reset; stale respawns carry an old value
    epoch: u32,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut particles = Vec::new();
        particles::spawn_starfield(&mut particles, tuning.star_count, tuning.field(), &mut rng);

        Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            clock: 0.0,
            score: 0,
            difficulty: 0,
            enemy_fire_timer: tuning.enemy_fire_delay,
            player: Player::new(&tuning, tuning.start_lives, tuning.start_safety_ticks),
            actors: Actors::new(),
            bullets: Vec::new(),
            particles,
            events: Vec::new(),
            scheduled: EventQueue::new(),
            hit_filter: default_hit_filter,
            epoch: 0,
            rng,
            tuning,
        }
    }

    /// Start a new run, discarding any pending respawn
    pub fn reset(&mut self, seed: u64) {
        let epoch = self.epoch.wrapping_add(1);
        let hit_filter = self.hit_filter;
        *self = Self::with_tuning(seed, self.tuning.clone());
        self.epoch = epoch;
        self.hit_filter = hit_filter;
        log::info!("Game reset with seed {}", seed);
    }

    /// Current player life epoch
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Invalidate outstanding respawns for the current life
    pub(crate) fn advance_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Run RNG (all simulation randomness goes through here)
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Field borrows split out for code that spawns particles while
    /// iterating other entities
    pub(crate) fn particles_and_rng(&mut self) -> (&mut Vec<Particle>, &mut Pcg32) {
        (&mut self.particles, &mut self.rng)
    }
}
