//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one frame. Order within a
//! tick is fixed: delayed events, enemy fire, player, actors, bullets,
//! collisions, cleanup, particles.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actors::{Actor, ActorGroup, EnemyVariant};
use super::bullets;
use super::collision::hitboxes_overlap;
use super::particles::{self, engine_trail, explode_big, explode_small};
use super::schedule::Scheduled;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::ENEMY_VARIANTS;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Advance the game state by one frame. `dt` is the real time (seconds) the
/// frame represents and only drives delayed events. Motion is per tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;
    state.clock += f64::from(dt);

    run_scheduled(state);

    // Game over freezes the player's controls and all spawning
    let playing = state.phase == GamePhase::Playing;
    let input = if playing { *input } else { TickInput::default() };

    if playing {
        enemy_fire(state);
    }

    // Only move and shoot while alive
    if state.player.alive {
        let field = state.tuning.field();
        state.player.steer(&input);
        state.player.advance(field);
        state.player.cool_down();

        if input.fire {
            if let Some(bullet) = state.player.try_fire(state.tuning.bullet_speed) {
                state.bullets.push(bullet);
                state.events.push(GameEvent::PlayerFired);
            }
        }

        state.particles.push(engine_trail(state.player.pos));
    }

    if playing && state.actors.is_empty() {
        spawn_next_wave(state);
    }
    state.actors.update(state.tuning.screen_height);

    for bullet in &mut state.bullets {
        bullet.update();
    }
    resolve_bullet_hits(state);
    resolve_player_hits(state);

    if state.player.marked_for_death {
        kill_player(state);
    }

    // End-of-frame cleanup
    bullets::clean(&mut state.bullets);
    if state.actors.clean() {
        state.events.push(GameEvent::ActorsPurged);
    }
    particles::clean(&mut state.particles);
    let screen_height = state.tuning.screen_height;
    for particle in &mut state.particles {
        particle.update(screen_height);
    }

    state.player.tick_safety();
}

/// Fire delayed events that have come due
fn run_scheduled(state: &mut GameState) {
    for event in state.scheduled.drain_due(state.clock) {
        match event {
            Scheduled::Respawn { epoch } => {
                if epoch != state.epoch() || state.player.alive || state.is_game_over() {
                    log::debug!("Dropping stale respawn (epoch {})", epoch);
                    continue;
                }
                state.player.respawn(&state.tuning);
                state.advance_epoch();
                state.events.push(GameEvent::PlayerRespawned);
                log::info!("Player respawned, {} lives left", state.player.lives);
            }
        }
    }
}

/// Count down to the next enemy shot, firing from a random ship when it hits zero
fn enemy_fire(state: &mut GameState) {
    let shooters = state.actors.group(ActorGroup::Enemy).filter(|a| !a.to_delete).count();
    if state.enemy_fire_timer == 0 && shooters > 0 {
        let pick = state.rng().random_range(0..shooters);
        let Some(pos) = state
            .actors
            .group(ActorGroup::Enemy)
            .filter(|a| !a.to_delete)
            .nth(pick)
            .map(|a| a.pos)
        else {
            return;
        };
        state
            .actors
            .create(Actor::enemy_bullet(pos, state.tuning.enemy_bullet_speed));
        state.enemy_fire_timer = state.tuning.effective_fire_interval();
        state.events.push(GameEvent::EnemyFired { pos });
    } else {
        state.enemy_fire_timer = state.enemy_fire_timer.saturating_sub(1);
    }
}

/// Lay out a new formation with a randomly chosen enemy variant
pub fn spawn_next_wave(state: &mut GameState) {
    let variant = EnemyVariant::from_index(state.rng().random_range(0..ENEMY_VARIANTS));
    state.actors.spawn_wave(variant, &state.tuning);
    state.difficulty += 1;
    state.events.push(GameEvent::WaveSpawned {
        wave: state.difficulty,
        variant,
    });
    log::info!("Wave {} spawned ({:?})", state.difficulty, variant);
}

/// Player bullets against actors. A bullet destroys every live actor it
/// overlaps, but an actor only dies once. Each kill scores a point and leaves
/// a small explosion where the bullet was. Returns the number of kills.
pub fn resolve_bullet_hits(state: &mut GameState) -> usize {
    let can_hit = state.hit_filter;
    let mut blasts = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| !b.to_delete) {
        for actor in state.actors.iter_mut() {
            if actor.to_delete || !can_hit(actor) {
                continue;
            }
            if hitboxes_overlap(bullet.pos, &bullet.hitbox, actor.pos, &actor.hitbox) {
                bullet.to_delete = true;
                actor.kill();
                blasts.push(bullet.pos);
            }
        }
    }

    state.score += blasts.len() as u64;
    let (particles, rng) = state.particles_and_rng();
    for pos in &blasts {
        explode_small(particles, *pos, rng);
    }
    blasts.len()
}

/// Mark the player for death on contact with a ship or enemy shot, unless
/// still invincible
pub fn resolve_player_hits(state: &mut GameState) {
    let player = &state.player;
    if !player.alive || player.is_safe() {
        return;
    }
    let hit = [ActorGroup::Enemy, ActorGroup::EnemyBullet]
        .into_iter()
        .any(|group| state.actors.collides_hitbox(player.pos, &player.hitbox, group));
    if hit {
        state.player.marked_for_death = true;
    }
}

/// Apply a pending death: explode, spend a life, then schedule a respawn or
/// end the run
pub fn kill_player(state: &mut GameState) {
    let pos = state.player.pos;
    if state.player.die() {
        let (particles, rng) = state.particles_and_rng();
        explode_big(particles, pos, rng);
    }

    let lives_left = state.player.lives;
    state.events.push(GameEvent::PlayerKilled { lives_left });

    if lives_left > 0 {
        let epoch = state.epoch();
        state.scheduled.schedule(
            state.clock,
            state.tuning.respawn_delay_secs,
            Scheduled::Respawn { epoch },
        );
        log::info!(
            "Player down, respawning in {:.1}s ({} lives left)",
            state.tuning.respawn_delay_secs,
            lives_left
        );
    } else {
        state.phase = GamePhase::GameOver;
        state.scheduled.cancel_all();
        state.events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.difficulty,
        });
        log::info!(
            "Game over: score {} on wave {}",
            state.score,
            state.difficulty
        );
    }
}
