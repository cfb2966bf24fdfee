//! Enemies and enemy bullets
//!
//! Both live in one collection and are told apart by their [`ActorGroup`].
//! Enemies drift in a stepped sine "wiggle" driven by their own age counter;
//! enemy bullets fall straight down until they leave the playfield.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Hitbox, hitboxes_overlap};
use crate::tuning::Tuning;

/// Enemy sprite footprint
pub const ENEMY_SIZE: f32 = 32.0;
/// Enemy bullet sprite footprint
pub const ENEMY_BULLET_SIZE: f32 = 8.0;

/// Role of an actor in collision queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorGroup {
    Enemy,
    EnemyBullet,
}

/// Enemy sprite variant; one is picked per wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Scout,
    Stinger,
    Mantis,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [
        EnemyVariant::Scout,
        EnemyVariant::Stinger,
        EnemyVariant::Mantis,
    ];

    pub fn from_index(i: u32) -> Self {
        Self::ALL[(i as usize) % Self::ALL.len()]
    }
}

/// What an actor is, independent of its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// A formation ship
    Ship(EnemyVariant),
    /// A shot fired by a ship
    Shot,
    /// Reserved marker kind that player bullets pass through
    Inert,
}

/// An enemy or enemy-fired bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub group: ActorGroup,
    pub kind: ActorKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks since creation (may start non-zero to phase-shift motion)
    pub t: u32,
    pub hitbox: Hitbox,
    pub to_delete: bool,
}

/// Formation wiggle velocity for an actor of age `t`.
///
/// `t / 10` and `t / 20` are integer divisions, so the velocity holds steady
/// for runs of ticks and then jumps; the resulting stepped drift is part of
/// the game's look.
pub fn wiggle_velocity(t: u32) -> Vec2 {
    let vx = ((t / 10) as f32).sin();
    let vy = ((t / 20) as f32 + 80.0).sin();
    Vec2::new(vx, vy)
}

impl Actor {
    pub fn enemy(variant: EnemyVariant, pos: Vec2, t: u32) -> Self {
        Self {
            group: ActorGroup::Enemy,
            kind: ActorKind::Ship(variant),
            pos,
            vel: Vec2::ZERO,
            t,
            hitbox: Hitbox::new(4.0, 4.0, ENEMY_SIZE - 8.0, ENEMY_SIZE - 8.0),
            to_delete: false,
        }
    }

    pub fn enemy_bullet(pos: Vec2, speed: f32) -> Self {
        Self {
            group: ActorGroup::EnemyBullet,
            kind: ActorKind::Shot,
            pos,
            vel: Vec2::new(0.0, speed),
            t: 0,
            hitbox: Hitbox::sprite(ENEMY_BULLET_SIZE, ENEMY_BULLET_SIZE),
            to_delete: false,
        }
    }

    /// Mark for removal at the end of the frame
    pub fn kill(&mut self) {
        self.to_delete = true;
    }

    /// Set this tick's velocity, and flag enemy bullets that fell off the bottom
    pub fn steer(&mut self, screen_height: f32) {
        match (self.group, self.kind) {
            (ActorGroup::Enemy, ActorKind::Ship(_)) => self.vel = wiggle_velocity(self.t),
            (ActorGroup::EnemyBullet, _) => {
                if self.pos.y > screen_height {
                    self.kill();
                }
            }
            _ => {}
        }
    }

    /// Integrate velocity and age by one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.t += 1;
    }
}

/// All live actors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Actors {
    pub actors: Vec<Actor>,
}

impl Actors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Actors of one group
    pub fn group(&self, group: ActorGroup) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(move |a| a.group == group)
    }

    /// Steer then move every actor
    pub fn update(&mut self, screen_height: f32) {
        for actor in &mut self.actors {
            actor.steer(screen_height);
        }
        for actor in &mut self.actors {
            actor.update();
        }
    }

    /// Remove actors marked for deletion; true if at least one was removed
    pub fn clean(&mut self) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| !a.to_delete);
        self.actors.len() != before
    }

    /// Does a hitbox at `pos` overlap any live actor in `group`?
    pub fn collides_hitbox(&self, pos: Vec2, hitbox: &Hitbox, group: ActorGroup) -> bool {
        self.group(group)
            .filter(|a| !a.to_delete)
            .any(|a| hitboxes_overlap(pos, hitbox, a.pos, &a.hitbox))
    }

    /// Lay out a fresh formation of `variant` ships.
    ///
    /// Each slot starts with age `(col + row) * stagger` so neighbouring ships
    /// are out of phase and the formation ripples.
    pub fn spawn_wave(&mut self, variant: EnemyVariant, tuning: &Tuning) {
        for col in 0..tuning.wave_cols {
            for row in 0..tuning.wave_rows {
                let slot = Vec2::new(col as f32, row as f32);
                let pos = tuning.wave_origin + slot * tuning.wave_spacing;
                let t = (col + row) * tuning.wave_stagger;
                self.create(Actor::enemy(variant, pos, t));
            }
        }
    }
}
