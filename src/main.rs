//! Space Invaders entry point
//!
//! Headless native driver: runs the autopilot through the fixed-step loop and
//! reports the result. Rendering hosts embed the library instead.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use space_invaders::Tuning;
use space_invaders::consts::TICK_RATE_HZ;
use space_invaders::platform::FixedStep;
use space_invaders::sim::{GameEvent, GamePhase, GameState, Snapshot, autopilot_input, tick};

#[derive(Debug, Parser)]
#[command(name = "space-invaders", about = "Run a headless Space Invaders demo")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of simulation ticks to run
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,

    /// Simulated display refresh rate driving the fixed-step loop
    #[arg(long, default_value_t = 60)]
    frame_hz: u64,

    /// JSON tuning file (missing fields keep their defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("loading tuning file {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn log_event(event: &GameEvent, time_ms: u64) {
    match event {
        GameEvent::EnemyDestroyed { enemy_id, points } => {
            log::debug!("[{time_ms} ms] enemy {enemy_id} destroyed (+{points})")
        }
        GameEvent::PlayerHit { health } => {
            log::info!("[{time_ms} ms] player hit, {health} health left")
        }
        GameEvent::DangerChanged { level } => {
            log::info!("[{time_ms} ms] danger level {:?}", level)
        }
        GameEvent::GameOver { .. } | GameEvent::Started => {}
        other => log::trace!("[{time_ms} ms] {:?}", other),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = load_tuning(args.tuning.as_ref())?;
    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_millis() as u64,
    };
    anyhow::ensure!(
        (1..=1_000).contains(&args.frame_hz),
        "--frame-hz must be between 1 and 1000"
    );
    log::info!("Space Invaders (headless) starting with seed {seed}");

    let mut state = GameState::with_tuning(seed, tuning);
    let mut step = FixedStep::default();
    let frame_us = 1_000_000 / args.frame_hz;
    let mut ticks_run = 0;

    'frames: while ticks_run < args.ticks {
        for _ in 0..step.advance(frame_us) {
            let input = autopilot_input(&state);
            tick(&mut state, &input, step.step_us());
            ticks_run += 1;

            for event in &state.events {
                log_event(event, state.time_ms());
            }
            if matches!(state.phase, GamePhase::GameOver(_)) || ticks_run >= args.ticks {
                break 'frames;
            }
        }
    }

    let snapshot = Snapshot::capture(&state);
    let simulated_s = ticks_run as f64 / TICK_RATE_HZ as f64;
    match snapshot.outcome.as_ref() {
        Some(outcome) => println!(
            "{} Score {} after {:.1}s ({} of {} enemies left)",
            outcome.message,
            snapshot.score,
            simulated_s,
            snapshot.alive_enemy_count(),
            snapshot.enemies.len()
        ),
        None => println!(
            "Stopped after {} ticks ({:.1}s): score {}, health {}, {} enemies left",
            ticks_run,
            simulated_s,
            snapshot.score,
            snapshot.player.health,
            snapshot.alive_enemy_count()
        ),
    }

    if args.snapshot {
        println!("{}", snapshot.to_json().context("serializing snapshot")?);
    }

    Ok(())
}
