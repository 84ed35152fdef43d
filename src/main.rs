//! Snake Shooter - headless entry point
//!
//! Runs the simulation under the autopilot and reports the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use snake_shooter::Config;
use snake_shooter::renderer::SceneRenderer;
use snake_shooter::runner::{FixedClock, FrameLoop, LogHud, RealtimeClock, RunSummary};
use snake_shooter::sim::{Autopilot, GameState};

#[derive(Parser, Debug)]
#[command(name = "snake-shooter")]
#[command(about = "Headless snake shooter driven by the autopilot")]
struct Cli {
    /// JSON config file (defaults are used for missing keys)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run seed; overrides the config seed
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
    /// Pace frames to wall-clock time instead of stepping at a fixed dt
    #[arg(long)]
    realtime: bool,
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn run(cli: Cli) -> Result<RunSummary> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let seed = cli.seed.or(config.seed).unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let state = GameState::new(config, seed);
    let summary = if cli.realtime {
        FrameLoop::new(
            state,
            Autopilot::new(),
            RealtimeClock::default(),
            SceneRenderer::new(),
            LogHud::default(),
        )
        .run(cli.frames)
    } else {
        let dt = 1.0 / snake_shooter::consts::TARGET_FPS as f32;
        FrameLoop::new(
            state,
            Autopilot::new(),
            FixedClock::new(dt),
            SceneRenderer::new(),
            LogHud::default(),
        )
        .run(cli.frames)
    };

    Ok(summary)
}

fn main() {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Snake Shooter starting...");

    match run(cli) {
        Ok(summary) => {
            let cause = summary
                .cause
                .map_or_else(|| "still alive".to_string(), |c| format!("{c:?}"));
            log::info!(
                "Finished: {} frames, score {}, {} kills ({})",
                summary.frames,
                summary.score,
                summary.kills,
                cause
            );
        }
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    }
}
