//! Visual-only particles: starfield, explosion flashes, fireball puffs, engine trail
//!
//! Particles never take part in collisions. Their randomness still comes from
//! the run RNG so a seeded run reproduces the same effects.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::STAR_WRAP_Y;

/// Rendering behaviour of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Ambient falling star, wraps to the top instead of expiring off-screen
    Star,
    /// Orange puff that shrinks away
    Fireball,
    /// Big white flash at the centre of an explosion
    Flash,
    /// Exhaust left behind the player ship
    Trail,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Size change per tick (negative shrinks)
    pub size_vel: f32,
    pub kind: ParticleKind,
    /// Ticks remaining; the particle dies once this goes negative
    pub life: i32,
    /// Exempt from expiry
    pub forever: bool,
    pub to_delete: bool,
    /// Ticks since creation
    pub t: u32,
}

impl Particle {
    pub fn new(
        kind: ParticleKind,
        pos: Vec2,
        vel: Vec2,
        size: f32,
        size_vel: f32,
        life: i32,
    ) -> Self {
        Self {
            pos,
            vel,
            size,
            size_vel,
            kind,
            life,
            forever: false,
            to_delete: false,
            t: 0,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, screen_height: f32) {
        self.pos += self.vel;
        self.size += self.size_vel;
        if !self.forever {
            self.life -= 1;
            if self.life < 0 {
                self.to_delete = true;
            }
        }

        if self.kind == ParticleKind::Star && self.pos.y > screen_height {
            self.pos.y = STAR_WRAP_Y;
        }

        self.t += 1;
    }
}

/// Explosion recipe: one flash plus a handful of jittered fireballs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionRecipe {
    pub flash_size: f32,
    pub flash_life: i32,
    pub puffs: u32,
    /// Puff size is drawn from `puff_size_min .. puff_size_min + puff_size_range`
    pub puff_size_min: i32,
    pub puff_size_range: i32,
    pub puff_size_vel: f32,
    pub puff_life: i32,
}

/// Enemy kill
pub const SMALL_EXPLOSION: ExplosionRecipe = ExplosionRecipe {
    flash_size: 100.0,
    flash_life: 6,
    puffs: 8,
    puff_size_min: 20,
    puff_size_range: 30,
    puff_size_vel: -3.0,
    puff_life: 10,
};

/// Player death
pub const BIG_EXPLOSION: ExplosionRecipe = ExplosionRecipe {
    flash_size: 250.0,
    flash_life: 8,
    puffs: 20,
    puff_size_min: 30,
    puff_size_range: 40,
    puff_size_vel: -2.0,
    puff_life: 15,
};

const FLASH_SHRINK: f32 = -10.0;

/// Spawn an explosion at `pos`
pub fn explode(
    particles: &mut Vec<Particle>,
    recipe: &ExplosionRecipe,
    pos: Vec2,
    rng: &mut impl Rng,
) {
    particles.push(Particle::new(
        ParticleKind::Flash,
        pos,
        Vec2::ZERO,
        recipe.flash_size,
        FLASH_SHRINK,
        recipe.flash_life,
    ));

    for _ in 0..recipe.puffs {
        // Integer jitter in -3..=4
        let vel = Vec2::new(
            (4 - rng.random_range(0..8)) as f32,
            (4 - rng.random_range(0..8)) as f32,
        );
        let size = (rng.random_range(0..recipe.puff_size_range) + recipe.puff_size_min) as f32;
        particles.push(Particle::new(
            ParticleKind::Fireball,
            pos,
            vel,
            size,
            recipe.puff_size_vel,
            recipe.puff_life,
        ));
    }
}

pub fn explode_small(particles: &mut Vec<Particle>, pos: Vec2, rng: &mut impl Rng) {
    explode(particles, &SMALL_EXPLOSION, pos, rng);
}

pub fn explode_big(particles: &mut Vec<Particle>, pos: Vec2, rng: &mut impl Rng) {
    explode(particles, &BIG_EXPLOSION, pos, rng);
}

/// Exhaust puff left at the ship each tick it is alive
pub fn engine_trail(pos: Vec2) -> Particle {
    Particle::new(ParticleKind::Trail, pos, Vec2::ZERO, 10.0, -1.0, 6)
}

/// Background stars scattered over the whole field, falling forever
pub fn spawn_starfield(particles: &mut Vec<Particle>, count: u32, field: Vec2, rng: &mut impl Rng) {
    let (w, h) = (field.x.max(1.0) as u32, field.y.max(1.0) as u32);
    for _ in 0..count {
        let pos = Vec2::new(rng.random_range(0..w) as f32, rng.random_range(0..h) as f32);
        let vy = rng.random_range(1..=10) as f32;
        let mut star = Particle::new(ParticleKind::Star, pos, Vec2::new(0.0, vy), 0.0, 0.0, 0);
        star.forever = true;
        particles.push(star);
    }
}

/// Drop particles marked for deletion, returning how many were removed
pub fn clean(particles: &mut Vec<Particle>) -> usize {
    let before = particles.len();
    particles.retain(|p| !p.to_delete);
    before - particles.len()
}
