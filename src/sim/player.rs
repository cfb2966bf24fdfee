//! The player's ship
//!
//! Movement, the fire-rate limiter and the post-spawn invincibility window
//! ("safety"). Death and respawn scheduling are driven from the tick, which
//! owns the particles and the delayed-event queue.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullets::Bullet;
use super::collision::Hitbox;
use super::tick::TickInput;
use crate::consts::{GUN_OFFSET_X, GUN_OFFSET_Y, PLAYER_SPRITE_SIZE};
use crate::tuning::Tuning;

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pixels per tick along each held axis
    pub speed: f32,
    /// Ticks until the next shot is allowed (0 = ready)
    pub fire_cooldown: u32,
    pub max_fire_rate: u32,
    pub hitbox: Hitbox,
    pub lives: u32,
    /// Remaining invincibility ticks
    pub safety: u32,
    pub alive: bool,
    /// Set by a lethal collision, consumed by the death handler
    pub marked_for_death: bool,
}

impl Player {
    /// A fresh ship at the spawn point with `safety` ticks of invincibility
    pub fn new(tuning: &Tuning, lives: u32, safety: u32) -> Self {
        Self {
            pos: tuning.player_spawn(),
            vel: Vec2::ZERO,
            speed: tuning.player_speed,
            fire_cooldown: 0,
            max_fire_rate: tuning.max_fire_rate,
            hitbox: Hitbox::new(8.0, 8.0, 8.0, 8.0),
            lives,
            safety,
            alive: true,
            marked_for_death: false,
        }
    }

    /// Rebuild the ship in its spawn state, keeping the lives counter
    pub fn respawn(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning, self.lives, tuning.respawn_safety_ticks);
    }

    /// Reset velocity then apply held directions.
    ///
    /// Right/down are applied before left/up, so holding both directions on an
    /// axis moves left/up.
    pub fn steer(&mut self, input: &TickInput) {
        self.vel = Vec2::ZERO;
        if input.right {
            self.vel.x = self.speed;
        }
        if input.left {
            self.vel.x = -self.speed;
        }
        if input.down {
            self.vel.y = self.speed;
        }
        if input.up {
            self.vel.y = -self.speed;
        }
    }

    /// Integrate velocity and keep the whole sprite inside the field
    pub fn advance(&mut self, field: Vec2) {
        self.pos += self.vel;
        let max = field - Vec2::splat(PLAYER_SPRITE_SIZE);
        self.pos = crate::clamp_to_field(self.pos, max);
    }

    /// One tick of the fire-rate limiter
    pub fn cool_down(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    /// Fire if the cooldown has run out
    pub fn try_fire(&mut self, bullet_speed: f32) -> Option<Bullet> {
        if self.fire_cooldown != 0 {
            return None;
        }
        self.fire_cooldown = self.max_fire_rate;
        let nose = self.pos + Vec2::new(GUN_OFFSET_X, GUN_OFFSET_Y);
        Some(Bullet::new(nose, Vec2::new(0.0, -bullet_speed)))
    }

    pub fn is_safe(&self) -> bool {
        self.safety > 0
    }

    /// Count down the invincibility window
    pub fn tick_safety(&mut self) {
        self.safety = self.safety.saturating_sub(1);
    }

    /// Apply a death: the ship goes down (if it was up) and a life is spent.
    /// Returns true if the ship was alive, i.e. an explosion is due.
    pub fn die(&mut self) -> bool {
        self.marked_for_death = false;
        let was_alive = self.alive;
        self.alive = false;
        self.lives = self.lives.saturating_sub(1);
        was_alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Player {
        let tuning = Tuning::default();
        Player::new(&tuning, 3, 0)
    }

    #[test]
    fn test_steer_resets_velocity() {
        let mut p = player();
        p.steer(&TickInput { right: true, down: true, ..Default::default() });
        assert_eq!(p.vel, Vec2::new(2.0, 2.0));
        p.steer(&TickInput::default());
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_opposing_inputs_favour_left_and_up() {
        let mut p = player();
        p.steer(&TickInput {
            left: true,
            right: true,
            up: true,
            down: true,
            fire: false,
        });
        assert_eq!(p.vel, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_fire_cooldown_cycle() {
        let mut p = player();
        let bullet = p.try_fire(6.0).expect("ready to fire");
        assert_eq!(bullet.pos, p.pos + Vec2::new(12.0, 4.0));
        assert_eq!(bullet.vel, Vec2::new(0.0, -6.0));
        assert_eq!(p.fire_cooldown, 8);

        for expected in (0..8).rev() {
            assert!(p.try_fire(6.0).is_none());
            p.cool_down();
            assert_eq!(p.fire_cooldown, expected);
        }
        assert!(p.try_fire(6.0).is_some());
    }

    #[test]
    fn test_die_spends_a_life() {
        let mut p = player();
        p.marked_for_death = true;
        assert!(p.die());
        assert!(!p.alive);
        assert!(!p.marked_for_death);
        assert_eq!(p.lives, 2);

        // Already down: no second explosion, but the life is still spent
        assert!(!p.die());
        assert_eq!(p.lives, 1);
    }

    #[test]
    fn test_respawn_restores_spawn_state() {
        let tuning = Tuning::default();
        let mut p = player();
        p.pos = Vec2::new(3.0, 3.0);
        p.fire_cooldown = 5;
        p.die();

        p.respawn(&tuning);
        assert!(p.alive);
        assert_eq!(p.lives, 2);
        assert_eq!(p.pos, tuning.player_spawn());
        assert_eq!(p.safety, tuning.respawn_safety_ticks);
        assert_eq!(p.fire_cooldown, 0);
    }

    proptest! {
        #[test]
        fn prop_clamp_keeps_sprite_on_screen(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
        ) {
            let field = Vec2::new(240.0, 320.0);
            let mut p = player();
            p.pos = Vec2::new(x, y);
            p.vel = Vec2::new(vx, vy);
            p.advance(field);
            prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 240.0 - 32.0);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y <= 320.0 - 32.0);
        }
    }
}
