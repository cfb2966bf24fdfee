//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per tick, fixed order
//! - Seeded RNG only
//! - Wall-clock time only enters through `tick`'s `dt`
//! - No rendering or platform dependencies

pub mod actors;
pub mod bullets;
pub mod collision;
pub mod particles;
pub mod player;
pub mod schedule;
pub mod state;
pub mod tick;

pub use actors::{Actor, ActorGroup, ActorKind, Actors, EnemyVariant, wiggle_velocity};
pub use bullets::Bullet;
pub use collision::{Aabb, Hitbox, boxes_overlap, hitboxes_overlap};
pub use particles::{Particle, ParticleKind};
pub use player::Player;
pub use schedule::{EventQueue, Scheduled};
pub use state::{GameEvent, GamePhase, GameState, HitFilter, default_hit_filter};
pub use tick::{
    TickInput, kill_player, resolve_bullet_hits, resolve_player_hits, spawn_next_wave, tick,
};
