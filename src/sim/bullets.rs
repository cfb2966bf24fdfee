//! Player bullets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;

/// Player bullet sprite is 8x8 and collides over its full area
pub const BULLET_SIZE: f32 = 8.0;

/// A player-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hitbox: Hitbox,
    pub to_delete: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            hitbox: Hitbox::sprite(BULLET_SIZE, BULLET_SIZE),
            to_delete: false,
        }
    }

    /// Move one tick and flag once off the top of the screen
    pub fn update(&mut self) {
        self.pos += self.vel;
        if self.pos.y < 0.0 {
            self.to_delete = true;
        }
    }
}

/// Drop bullets marked for deletion, returning how many were removed
pub fn clean(bullets: &mut Vec<Bullet>) -> usize {
    let before = bullets.len();
    bullets.retain(|b| !b.to_delete);
    before - bullets.len()
}
