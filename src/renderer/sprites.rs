//! Sprite identifiers and their atlas names

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::platform::SpriteAtlas;
use crate::sim::EnemyVariant;

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    Bullet,
    EnemyBullet,
    Enemy(EnemyVariant),
    StarSmall,
    StarTiny,
    StarFast,
    StarSlow,
    CircleWhite,
    Lives,
}

impl SpriteId {
    /// Sub-texture name in the packed atlas
    pub fn atlas_name(self) -> &'static str {
        match self {
            SpriteId::Player => "player",
            SpriteId::Bullet => "bullet",
            SpriteId::EnemyBullet => "enemyBullet",
            SpriteId::Enemy(EnemyVariant::Scout) => "enemy0",
            SpriteId::Enemy(EnemyVariant::Stinger) => "enemy1",
            SpriteId::Enemy(EnemyVariant::Mantis) => "enemy2",
            SpriteId::StarSmall => "starSmall",
            SpriteId::StarTiny => "starTiny",
            SpriteId::StarFast => "starFast",
            SpriteId::StarSlow => "starSlow",
            SpriteId::CircleWhite => "circleWhite",
            SpriteId::Lives => "lives",
        }
    }
}

/// Nominal sprite sizes, for hosts without a real atlas (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NominalAtlas;

impl SpriteAtlas for NominalAtlas {
    fn sprite_size(&self, sprite: SpriteId) -> Vec2 {
        match sprite {
            SpriteId::Player | SpriteId::Enemy(_) => Vec2::splat(32.0),
            SpriteId::Bullet | SpriteId::EnemyBullet | SpriteId::StarSmall => Vec2::splat(8.0),
            SpriteId::StarTiny => Vec2::splat(4.0),
            SpriteId::StarFast | SpriteId::StarSlow => Vec2::new(2.0, 8.0),
            SpriteId::CircleWhite => Vec2::splat(64.0),
            SpriteId::Lives => Vec2::splat(16.0),
        }
    }
}
