//! Flappy headless runner
//!
//! Drives the simulation at its fixed tick count with the demo autopilot
//! and logs the outcome of each run. Windowing and drawing are supplied by
//! a host application; this binary exercises the simulation only.
//!
//! Usage: `flappy [CONFIG] [--seed N] [--ticks N]`

use std::path::PathBuf;

use clap::Parser;
use flappy::consts::TICK_MS;
use flappy::render::{Hud, build_scene};
use flappy::sim::{Session, TickInput, tick};
use flappy::{ConfigError, GameConfig};

/// Default run length: one minute of game time
const DEFAULT_TICKS: u64 = 60_000 / TICK_MS;
const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Parser, Debug)]
#[command(name = "flappy", about = "Run the flappy simulation headless with the autopilot")]
struct Cli {
    /// JSON config file; built-in defaults when omitted
    config: Option<PathBuf>,

    /// RNG seed for gap placement and effects
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

fn main() {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Flappy (headless) starting...");

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let (seed, ticks) = (cli.seed, cli.ticks);

    log::info!(
        "Screen {}x{} scale {:.2}, decor while game over: {}",
        config.width,
        config.height,
        config.scale(),
        config.decor_policy.as_str()
    );

    let mut session = Session::new(config, seed)?;
    let mut input = TickInput {
        flap: false,
        autopilot: true,
    };
    let mut runs = 1u32;
    let mut instances = 0usize;

    for _ in 0..ticks {
        tick(&mut session, &input);
        // Clear one-shot inputs after processing
        input.flap = false;

        instances += build_scene(&session).len();

        if session.is_game_over() {
            let hud = Hud::from_session(&session);
            if let Some(lines) = hud.game_over {
                log::info!("Run {}: {}", runs, lines.join(" | "));
            }
            input.flap = true;
            runs += 1;
        }
    }

    let hud = Hud::from_session(&session);
    log::info!(
        "Finished {} ticks ({} ms simulated): {} runs, best score {}, current score {} (level {})",
        ticks,
        ticks * TICK_MS,
        runs,
        hud.best_score.max(hud.score),
        hud.score,
        hud.level
    );
    log::debug!("Average instances per frame: {}", instances as u64 / ticks.max(1));
    Ok(())
}
