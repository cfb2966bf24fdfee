//! Draw-list generation
//!
//! Converts a [`GameState`] into sprite draw commands for the host's
//! [`SpriteRenderer`]. Drawing order matches the arcade layering: player,
//! orbiting shield stars, enemies, enemy shots, player bullets, particles,
//! life icons, HUD text.

pub mod sprites;

pub use sprites::{NominalAtlas, SpriteId};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::length_dir;
use crate::platform::{SpriteAtlas, SpriteRenderer};
use crate::settings::Settings;
use crate::sim::{Actor, ActorGroup, ActorKind, GameState, Hitbox, ParticleKind};

/// Debug hitbox colour (translucent red)
pub const HITBOX_COLOR: [u8; 4] = [0xff, 0x00, 0x00, 0x77];

/// Shield stars per ring
const ORBIT_STARS: u32 = 6;
const SMALL_ORBIT_RADIUS: f32 = 24.0;
const TINY_ORBIT_RADIUS: f32 = 32.0;

/// Falling star speed that reads as a full-length streak
const STAR_STREAK_SPEED: f32 = 9.0;
/// Stars faster than this use the long streak sprite
const STAR_FAST_ABOVE: f32 = 5.0;

/// One draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Atlas sprite, scaled about its top-left corner and then placed at `pos`
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        scale: Vec2,
        /// Additive RGBA offset applied to sampled texels
        color_shift: [f32; 4],
    },
    /// Filled rectangle
    Rect { pos: Vec2, size: Vec2, color: [u8; 4] },
    /// Debug-font text anchored at the top-left
    Text { pos: Vec2, text: String },
}

impl DrawCommand {
    fn sprite(sprite: SpriteId, pos: Vec2) -> Self {
        DrawCommand::Sprite {
            sprite,
            pos,
            scale: Vec2::ONE,
            color_shift: [0.0; 4],
        }
    }

    fn hitbox(pos: Vec2, hitbox: &Hitbox) -> Self {
        let aabb = hitbox.at(pos);
        DrawCommand::Rect {
            pos: aabb.min,
            size: aabb.size,
            color: HITBOX_COLOR,
        }
    }
}

/// HUD line. Score is shown in thousands, like the arcade cabinet.
pub fn hud_text(state: &GameState) -> String {
    format!(
        "SCORE: {}  -  WAVE: {} ",
        state.score.saturating_mul(1000),
        state.difficulty
    )
}

/// Build the full draw list for one frame
pub fn build_draw_list(
    state: &GameState,
    settings: &Settings,
    atlas: &impl SpriteAtlas,
) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let t = state.time_ticks;

    draw_player(&mut out, state, settings, atlas, t);

    for actor in state.actors.group(ActorGroup::Enemy) {
        draw_actor(&mut out, actor, settings);
    }
    for actor in state.actors.group(ActorGroup::EnemyBullet) {
        draw_actor(&mut out, actor, settings);
    }

    for bullet in state.bullets.iter().filter(|b| !b.to_delete) {
        out.push(DrawCommand::sprite(SpriteId::Bullet, bullet.pos));
        if settings.debug_hitboxes {
            out.push(DrawCommand::hitbox(bullet.pos, &bullet.hitbox));
        }
    }

    if settings.particles {
        draw_particles(&mut out, state, atlas);
    }

    for i in 0..state.player.lives {
        let pos = Vec2::new(16.0 + i as f32 * 18.0, state.tuning.screen_height - 20.0);
        out.push(DrawCommand::sprite(SpriteId::Lives, pos));
    }

    out.push(DrawCommand::Text {
        pos: Vec2::ZERO,
        text: hud_text(state),
    });

    out
}

/// Build the frame and hand every command to `renderer`
pub fn render(state: &GameState, settings: &Settings, renderer: &mut impl SpriteRenderer) {
    let commands = build_draw_list(state, settings, &*renderer);
    for command in &commands {
        renderer.draw(command);
    }
}

fn draw_player(
    out: &mut Vec<DrawCommand>,
    state: &GameState,
    settings: &Settings,
    atlas: &impl SpriteAtlas,
    t: u64,
) {
    let player = &state.player;
    if !player.alive {
        return;
    }

    let flicker_off = player.is_safe() && settings.effective_flicker() && t % 2 != 0;
    if !flicker_off {
        out.push(DrawCommand::sprite(SpriteId::Player, player.pos));
    }
    if settings.debug_hitboxes {
        out.push(DrawCommand::hitbox(player.pos, &player.hitbox));
    }

    if !player.is_safe() || !settings.effective_orbit_stars() {
        return;
    }

    let centre = player.pos + atlas.sprite_size(SpriteId::Player) / 2.0;
    let small_half = atlas.sprite_size(SpriteId::StarSmall) / 2.0;
    let tiny_half = atlas.sprite_size(SpriteId::StarTiny) / 2.0;
    for i in 0..ORBIT_STARS {
        let small_angle = (t + u64::from(i) * 10) as f32 / 10.0;
        let tiny_angle = -((t + u64::from(i) * 18) as f32 / 18.0);
        out.push(DrawCommand::sprite(
            SpriteId::StarSmall,
            centre - small_half + length_dir(SMALL_ORBIT_RADIUS, small_angle),
        ));
        out.push(DrawCommand::sprite(
            SpriteId::StarTiny,
            centre - tiny_half + length_dir(TINY_ORBIT_RADIUS, tiny_angle),
        ));
    }
}

fn draw_actor(out: &mut Vec<DrawCommand>, actor: &Actor, settings: &Settings) {
    if actor.to_delete {
        return;
    }
    let sprite = match actor.kind {
        ActorKind::Ship(variant) => SpriteId::Enemy(variant),
        ActorKind::Shot => SpriteId::EnemyBullet,
        ActorKind::Inert => return,
    };
    out.push(DrawCommand::sprite(sprite, actor.pos));
    if settings.debug_hitboxes {
        out.push(DrawCommand::hitbox(actor.pos, &actor.hitbox));
    }
}

fn draw_particles(out: &mut Vec<DrawCommand>, state: &GameState, atlas: &impl SpriteAtlas) {
    let circle = atlas.sprite_size(SpriteId::CircleWhite);

    for p in &state.particles {
        match p.kind {
            ParticleKind::Star => {
                let scale = p.vel.y / STAR_STREAK_SPEED;
                let sprite = if p.vel.y > STAR_FAST_ABOVE {
                    SpriteId::StarFast
                } else {
                    SpriteId::StarSlow
                };
                out.push(DrawCommand::Sprite {
                    sprite,
                    pos: p.pos,
                    scale: Vec2::new(1.0, scale),
                    // Slow stars fade out
                    color_shift: [0.0, 0.0, 0.0, -(0.5 + (1.0 - scale))],
                });
            }
            ParticleKind::Fireball | ParticleKind::Trail | ParticleKind::Flash => {
                let scale = p.size / 100.0;
                let color_shift = if p.kind == ParticleKind::Flash {
                    [0.0; 4]
                } else {
                    // Hot orange that cools as the puff shrinks
                    [2.0, -scale * 2.0, -1.0, 0.0]
                };
                out.push(DrawCommand::Sprite {
                    sprite: SpriteId::CircleWhite,
                    pos: p.pos - circle * scale / 2.0,
                    scale: Vec2::splat(scale),
                    color_shift,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyVariant, Particle};

    fn sprites_of(list: &[DrawCommand], id: SpriteId) -> Vec<Vec2> {
        list.iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, pos, .. } if *sprite == id => Some(*pos),
                _ => None,
            })
            .collect()
    }

    fn bare_state() -> GameState {
        let mut state = GameState::new(9);
        state.particles.clear();
        state
    }

    #[test]
    fn test_player_flickers_while_safe() {
        let mut state = bare_state();
        let settings = Settings::default();
        assert!(state.player.is_safe());

        state.time_ticks = 4;
        let even = build_draw_list(&state, &settings, &NominalAtlas);
        assert_eq!(sprites_of(&even, SpriteId::Player).len(), 1);

        state.time_ticks = 5;
        let odd = build_draw_list(&state, &settings, &NominalAtlas);
        assert!(sprites_of(&odd, SpriteId::Player).is_empty());
        // Shield stars are drawn every frame
        assert_eq!(sprites_of(&odd, SpriteId::StarSmall).len(), 6);
        assert_eq!(sprites_of(&odd, SpriteId::StarTiny).len(), 6);
    }

    #[test]
    fn test_no_shield_once_safety_runs_out() {
        let mut state = bare_state();
        state.player.safety = 0;
        state.time_ticks = 5;
        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);
        assert_eq!(sprites_of(&list, SpriteId::Player).len(), 1);
        assert!(sprites_of(&list, SpriteId::StarSmall).is_empty());
    }

    #[test]
    fn test_orbit_positions() {
        let mut state = bare_state();
        state.time_ticks = 0;
        state.player.pos = Vec2::new(100.0, 200.0);
        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);

        // First small star at angle 0: centre (116, 216) - half size (4, 4) + (24, 0)
        let small = sprites_of(&list, SpriteId::StarSmall);
        assert!((small[0] - Vec2::new(136.0, 212.0)).length() < 1e-4);
        // First tiny star at angle 0: centre - (2, 2) + (32, 0)
        let tiny = sprites_of(&list, SpriteId::StarTiny);
        assert!((tiny[0] - Vec2::new(146.0, 214.0)).length() < 1e-4);
    }

    #[test]
    fn test_reduced_motion_draws_steady_player() {
        let mut state = bare_state();
        state.time_ticks = 1;
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let list = build_draw_list(&state, &settings, &NominalAtlas);
        assert_eq!(sprites_of(&list, SpriteId::Player).len(), 1);
        assert!(sprites_of(&list, SpriteId::StarSmall).is_empty());
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = bare_state();
        state.player.alive = false;
        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);
        assert!(sprites_of(&list, SpriteId::Player).is_empty());
    }

    #[test]
    fn test_lives_and_hud() {
        let mut state = bare_state();
        state.score = 7;
        state.difficulty = 2;
        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);

        let lives = sprites_of(&list, SpriteId::Lives);
        assert_eq!(
            lives,
            vec![Vec2::new(16.0, 300.0), Vec2::new(34.0, 300.0), Vec2::new(52.0, 300.0)]
        );
        assert_eq!(
            list.last(),
            Some(&DrawCommand::Text {
                pos: Vec2::ZERO,
                text: "SCORE: 7000  -  WAVE: 2 ".to_string(),
            })
        );
    }

    #[test]
    fn test_actors_use_variant_sprites() {
        let mut state = bare_state();
        state.actors.create(Actor::enemy(EnemyVariant::Mantis, Vec2::new(10.0, 10.0), 0));
        state.actors.create(Actor::enemy_bullet(Vec2::new(20.0, 20.0), 3.0));
        let mut dead = Actor::enemy(EnemyVariant::Scout, Vec2::ZERO, 0);
        dead.kill();
        state.actors.create(dead);

        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);
        assert_eq!(
            sprites_of(&list, SpriteId::Enemy(EnemyVariant::Mantis)),
            vec![Vec2::new(10.0, 10.0)]
        );
        assert_eq!(sprites_of(&list, SpriteId::EnemyBullet), vec![Vec2::new(20.0, 20.0)]);
        assert!(sprites_of(&list, SpriteId::Enemy(EnemyVariant::Scout)).is_empty());
    }

    #[test]
    fn test_star_sprite_and_stretch() {
        let mut state = bare_state();
        let star = |pos: Vec2, vy: f32| {
            Particle::new(ParticleKind::Star, pos, Vec2::new(0.0, vy), 0.0, 0.0, 0)
        };
        let mut fast = star(Vec2::new(5.0, 5.0), 9.0);
        fast.forever = true;
        let slow = star(Vec2::new(6.0, 6.0), 3.0);
        state.particles = vec![fast, slow];

        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);
        let stretched: Vec<_> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite { sprite, scale, .. } => Some((*sprite, *scale)),
                _ => None,
            })
            .filter(|(s, _)| matches!(s, SpriteId::StarFast | SpriteId::StarSlow))
            .collect();
        assert_eq!(stretched[0], (SpriteId::StarFast, Vec2::new(1.0, 1.0)));
        assert_eq!(stretched[1].0, SpriteId::StarSlow);
        assert!((stretched[1].1.y - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_explosion_circles_are_centred() {
        let mut state = bare_state();
        let centre = Vec2::new(50.0, 50.0);
        let flash = Particle::new(ParticleKind::Flash, centre, Vec2::ZERO, 50.0, -10.0, 6);
        state.particles.push(flash);
        let list = build_draw_list(&state, &Settings::default(), &NominalAtlas);
        // 64px circle at half scale is 32px wide, so it starts 16px up-left
        assert_eq!(sprites_of(&list, SpriteId::CircleWhite), vec![Vec2::new(34.0, 34.0)]);
    }

    #[test]
    fn test_particles_toggle() {
        let state = GameState::new(9);
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let list = build_draw_list(&state, &settings, &NominalAtlas);
        assert!(sprites_of(&list, SpriteId::StarFast).is_empty());
        assert!(sprites_of(&list, SpriteId::StarSlow).is_empty());
    }

    #[test]
    fn test_debug_hitboxes() {
        let mut state = bare_state();
        state.player.pos = Vec2::new(100.0, 100.0);
        let settings = Settings {
            debug_hitboxes: true,
            ..Default::default()
        };
        let list = build_draw_list(&state, &settings, &NominalAtlas);
        assert!(list.contains(&DrawCommand::Rect {
            pos: Vec2::new(108.0, 108.0),
            size: Vec2::new(8.0, 8.0),
            color: HITBOX_COLOR,
        }));
    }

    struct Counting {
        drawn: usize,
    }

    impl SpriteAtlas for Counting {
        fn sprite_size(&self, sprite: SpriteId) -> Vec2 {
            NominalAtlas.sprite_size(sprite)
        }
    }

    impl SpriteRenderer for Counting {
        fn draw(&mut self, _command: &DrawCommand) {
            self.drawn += 1;
        }
    }

    #[test]
    fn test_render_submits_every_command() {
        let state = GameState::new(3);
        let settings = Settings::default();
        let mut renderer = Counting { drawn: 0 };
        render(&state, &settings, &mut renderer);
        assert_eq!(renderer.drawn, build_draw_list(&state, &settings, &NominalAtlas).len());
    }
}
