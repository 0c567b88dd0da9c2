//! Sky Pop entry point
//!
//! Headless demo session: an autopilot pointer orbits the board while
//! the engine runs at full rate, then the final score goes to the
//! leaderboard. Real presentation layers replace the sinks wired here.

use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use sky_pop::audio::NullAudio;
use sky_pop::board_center;
use sky_pop::sim::{GameEngine, InputSource, RenderSink, Renderable};
use sky_pop::{HighScores, Settings};

/// Autopilot input: the pointer circles the board center
struct OrbitInput {
    start: Instant,
}

impl OrbitInput {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl InputSource for OrbitInput {
    fn pointer(&self) -> Vec2 {
        let t = self.start.elapsed().as_secs_f32();
        board_center() + Vec2::new((t * 0.8).cos(), (t * 0.8).sin()) * 0.25
    }
}

/// Render sink that narrates progress to the log instead of a screen
#[derive(Default)]
struct ConsoleRender {
    frames: u64,
}

impl RenderSink for ConsoleRender {
    fn present(&mut self, frame: &[Renderable]) {
        self.frames += 1;
        if self.frames % 120 == 0 {
            let score = frame
                .iter()
                .find_map(|r| match r {
                    Renderable::Score { value, .. } => Some(*value),
                    _ => None,
                })
                .unwrap_or(0);
            log::info!(
                "~{}s in: score={score}, {} renderables",
                self.frames / 60,
                frame.len()
            );
        }
    }

    fn session_over(&mut self, score: u64) {
        println!("session over - final score {score}");
    }
}

fn main() {
    env_logger::init();

    let settings_path = Path::new("settings.json");
    let scores_path = Path::new("highscores.json");
    let settings = Settings::load_or_default(settings_path);

    let seed = settings.rng_seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("starting session with seed {seed}");

    let mut engine = GameEngine::new(seed, &settings.spawn_tuning);
    let input = OrbitInput::new();
    let mut render = ConsoleRender::default();
    let mut audio = NullAudio::new();

    let final_score = engine.run(&input, &mut render, &mut audio);

    let mut scores = match HighScores::load(scores_path) {
        Ok(scores) => scores,
        Err(err) => {
            log::warn!("starting a fresh leaderboard: {err}");
            HighScores::new()
        }
    };
    match scores.add_score(&settings.player_name, final_score) {
        Some(rank) => println!("{} reached rank #{rank}", settings.player_name),
        None => println!("no high score this time"),
    }
    if let Err(err) = scores.save(scores_path) {
        log::warn!("could not save the leaderboard: {err}");
    }
}
