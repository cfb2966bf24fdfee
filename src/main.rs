//! Swarm Shooter headless runner
//!
//! Plays seeded autopilot sessions at the fixed timestep, logging game events
//! and printing the leaderboard at the end. Set `RUST_LOG=info` to follow a run.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use swarm_shooter::audio::{AudioManager, LogAudioBackend, MusicTrack};
use swarm_shooter::consts::*;
use swarm_shooter::platform::{
    Gamepads, InputSnapshot, InputSource, KeyboardState, SpriteAtlas, SpriteRenderer,
};
use swarm_shooter::renderer::{self, DrawCommand, NominalAtlas, SpriteId};
use swarm_shooter::settings::SETTINGS_ENV;
use swarm_shooter::sim::{GameEvent, GameState, tick};
use swarm_shooter::tuning::TUNING_ENV;
use swarm_shooter::{HighScores, Settings, Tuning};

/// Headless autopilot runs at the fixed timestep
#[derive(Parser, Debug)]
#[command(name = "swarm-shooter")]
#[command(about = "Play seeded autopilot sessions of Swarm Shooter without a window")]
struct Args {
    /// Run seed; each game over restarts with the next seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Frames to simulate (60 per second)
    #[arg(long, default_value_t = 60 * 60 * 5)]
    frames: u64,

    /// Balance file (JSON)
    #[arg(long, env = TUNING_ENV)]
    tuning: Option<PathBuf>,

    /// Preferences file (JSON)
    #[arg(long, env = SETTINGS_ENV)]
    settings: Option<PathBuf>,
}

/// Scripted pilot: holds a random direction for a random spell, firing on
/// a steady rhythm
struct Autopilot {
    rng: Pcg32,
    held: KeyboardState,
    hold_frames: u32,
    frame: u64,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5EED),
            held: KeyboardState::default(),
            hold_frames: 0,
            frame: 0,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> InputSnapshot {
        self.frame += 1;
        if self.hold_frames == 0 {
            self.held = KeyboardState {
                left: self.rng.random_bool(0.3),
                right: self.rng.random_bool(0.3),
                up: self.rng.random_bool(0.15),
                down: self.rng.random_bool(0.15),
                fire: false,
            };
            self.hold_frames = self.rng.random_range(10..60);
        }
        self.hold_frames -= 1;

        let mut keyboard = self.held;
        keyboard.fire = self.frame % 4 != 0;
        InputSnapshot {
            keyboard,
            gamepads: Vec::new(),
        }
    }
}

/// Renderer that only counts what it would draw
#[derive(Default)]
struct NullRenderer {
    commands: u64,
}

impl SpriteAtlas for NullRenderer {
    fn sprite_size(&self, sprite: SpriteId) -> glam::Vec2 {
        NominalAtlas.sprite_size(sprite)
    }
}

impl SpriteRenderer for NullRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        self.commands += 1;
        if let DrawCommand::Sprite { sprite, pos, .. } = command {
            log::trace!("{} at ({:.1}, {:.1})", sprite.atlas_name(), pos.x, pos.y);
        }
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    audio: AudioManager<LogAudioBackend>,
    renderer: NullRenderer,
    pilot: Autopilot,
    gamepads: Gamepads,
    high_scores: HighScores,
    accumulator: f32,
    runs: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut audio = AudioManager::new(LogAudioBackend::default(), &settings);
        audio.start_music(MusicTrack::Theme);
        Self {
            state: GameState::with_tuning(seed, tuning),
            audio,
            renderer: NullRenderer::default(),
            pilot: Autopilot::new(seed),
            gamepads: Gamepads::new(),
            high_scores: HighScores::new(),
            accumulator: 0.0,
            runs: 1,
            settings,
        }
    }

    /// Run simulation ticks for `dt` seconds of real time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let snapshot = self.pilot.poll();
        let input = self.gamepads.aggregate(&snapshot, self.settings.gamepad_threshold);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.handle_events();
        }
    }

    fn handle_events(&mut self) {
        self.audio.handle_events(&self.state.events);

        let mut game_over = false;
        for event in &self.state.events {
            match *event {
                GameEvent::WaveSpawned { wave, variant } => {
                    log::debug!("wave {} ({:?})", wave, variant);
                }
                GameEvent::PlayerKilled { lives_left } => {
                    if let Some(due) = self.state.scheduled.next_due() {
                        log::debug!(
                            "player killed, {} lives left, back at {:.2}s",
                            lives_left,
                            due
                        );
                    }
                }
                GameEvent::GameOver { score, wave } => {
                    let rank = self.high_scores.record(score, wave);
                    let rank = rank.map(|r| format!(" (rank #{})", r)).unwrap_or_default();
                    println!("Run {}: {} on wave {}{}", self.runs, score, wave, rank);
                    game_over = true;
                }
                _ => {}
            }
        }

        if game_over {
            let next_seed = self.state.seed.wrapping_add(1);
            self.state.reset(next_seed);
            self.runs += 1;
        }
    }

    fn render(&mut self) {
        renderer::render(&self.state, &self.settings, &mut self.renderer);
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Swarm Shooter (headless) starting with seed {}", args.seed);

    let tuning = Tuning::load_or_default(args.tuning.as_deref());
    let settings = Settings::load_or_default(args.settings.as_deref());

    let mut game = Game::new(args.seed, tuning, settings);
    for _ in 0..args.frames {
        game.update(SIM_DT);
        game.render();
    }

    // The run still in progress counts too
    game.high_scores.record(game.state.score, game.state.difficulty);

    println!(
        "{} frames, {} runs, {} draw commands, {} sound cues",
        args.frames,
        game.runs,
        game.renderer.commands,
        game.audio.backend().played
    );
    println!("Final: {}", renderer::hud_text(&game.state).trim_end());
    for (rank, entry) in game.high_scores.entries().iter().enumerate() {
        println!("{:>2}. {:>6}  wave {}", rank + 1, entry.score, entry.wave);
    }
}
