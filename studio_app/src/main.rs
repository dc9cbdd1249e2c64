//! Headless studio session
//!
//! Loads a configuration (the first argument, `.toml` or `.ron`; defaults
//! otherwise), then plays a scripted session against the recording backend
//! and logs the outcome. Set `RUST_LOG=debug` to follow hits and damage.

use std::cell::Cell;
use std::env;

use studio_engine::foundation::logging;
use studio_engine::prelude::*;

/// Frames per second of the scripted session
const FRAME_RATE: f64 = 60.0;
/// Length of the scripted session in frames
const SESSION_FRAMES: u32 = 600;

/// Clock that moves forward one frame every time it is read
struct FixedStepClock {
    step: f64,
    ticks: Cell<u64>,
}

impl FixedStepClock {
    fn new(frame_rate: f64) -> Self {
        Self {
            step: 1.0 / frame_rate,
            ticks: Cell::new(0),
        }
    }
}

impl Clock for FixedStepClock {
    #[allow(clippy::cast_precision_loss)]
    fn now(&self) -> f64 {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        tick as f64 * self.step
    }
}

/// Sweep the aim from side to side, fire twice a second, and push forward
/// for one second in the middle of the session
fn session_script(width: u32, height: u32) -> ScriptedInput {
    let mut frames = Vec::with_capacity(SESSION_FRAMES as usize);
    for i in 0..SESSION_FRAMES {
        let t = f64::from(i) / FRAME_RATE;
        let x = f64::from(width) / 2.0 + 40.0 * (t * 0.5).sin();
        let mut frame = InputFrame::idle(width, height).with_cursor(x, f64::from(height) / 2.0);

        if i % 30 == 0 {
            frame = frame.with_keys(Keys::SPACE);
        } else if (240..300).contains(&i) {
            frame = frame.with_keys(Keys::W);
        }
        if i == SESSION_FRAMES / 2 {
            frame = frame.resized_to(1280, 720);
        }
        frames.push(frame);
    }
    ScriptedInput::new(frames)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match env::args().nth(1) {
        Some(path) => StudioConfig::load_from_file(&path)?,
        None => StudioConfig::default(),
    };
    logging::init_with_level(&config.engine.log_level);
    log::info!("Starting studio session...");

    let (width, height) = (config.window.width, config.window.height);
    let mut studio = match Studio::new(config, &InMemoryLoader::new()) {
        Ok(studio) => studio,
        Err(e) => {
            log::error!("Studio setup failed: {}", e);
            return Err(e.into());
        }
    };

    let clock = FixedStepClock::new(FRAME_RATE);
    let mut input = session_script(width, height);
    let mut backend = HeadlessBackend::new();
    let mut overlay = LogTextOverlay::new();

    let frames = studio.run(&clock, &mut input, &mut backend, &mut overlay);

    let game = studio.game();
    log::info!(
        "Session over after {} frames: stage {}, player energy {}, enemy energy {}{}",
        frames,
        game.stage(),
        game.player_energy(),
        game.enemy_energy(),
        if game.is_game_ended() { " (game over)" } else { "" }
    );
    Ok(())
}
