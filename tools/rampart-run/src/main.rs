//! rampart-run: headless driver for the RAMPART simulation.
//!
//! Plays a level from start to finish with a seeded auto-builder that buys
//! towers on random free cells between waves, then prints a JSON summary.
//!
//! Usage:
//!   rampart-run --seed 7 --towers 3
//!   rampart-run --config tuning.json --level level.json --fps 30
//!   rampart-run --dump-config > tuning.json

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rampart_core::config::GameConfig;
use rampart_core::enums::{GamePhase, SpellKind, TowerKind};
use rampart_core::events::GameEvent;
use rampart_core::level::LevelDefinition;
use rampart_sim::{scenario, SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "rampart-run")]
#[command(about = "Run a RAMPART level headless with an automatic builder")]
struct Args {
    /// Tuning overrides (JSON). Defaults apply to anything not given.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level file (JSON). Uses the built-in level when omitted.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Seed for the auto-builder.
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Towers to try to buy before each wave.
    #[arg(long, default_value = "2")]
    towers: u32,

    /// Simulation frames per second.
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Stop after this much simulated time.
    #[arg(long, default_value = "30")]
    max_minutes: f64,

    /// Print the default tuning as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

/// Final report printed on stdout.
#[derive(Debug, Serialize)]
struct Summary {
    level: String,
    seed: u64,
    outcome: GamePhase,
    waves_launched: u32,
    max_wave: u32,
    gold: u32,
    lives: u32,
    towers_built: usize,
    enemies_killed: usize,
    enemies_arrived: usize,
    stones_intercepted: usize,
    ticks: u64,
    elapsed_secs: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.dump_config {
        let json = serde_json::to_string_pretty(&GameConfig::default())
            .context("failed to serialize default config")?;
        println!("{json}");
        return Ok(());
    }

    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }
    if !args.max_minutes.is_finite() || args.max_minutes <= 0.0 {
        bail!("--max-minutes must be positive");
    }

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let level = match &args.level {
        Some(path) => LevelDefinition::load(path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => scenario::default_level(),
    };

    let mut engine = SimulationEngine::new(config, level, SimConfig::default())
        .context("invalid config or level")?;
    let summary = play(&mut engine, &args);

    info!(
        outcome = ?summary.outcome,
        waves = summary.waves_launched,
        lives = summary.lives,
        "run finished"
    );
    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

/// Run the level until it ends or the time limit is hit.
fn play(engine: &mut SimulationEngine, args: &Args) -> Summary {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let dt = 1.0 / args.fps as f64;
    let limit_secs = args.max_minutes * 60.0;

    let mut towers_built = 0;
    let mut killed = 0;
    let mut arrived = 0;
    let mut intercepted = 0;

    while !engine.phase().is_over() && engine.time().elapsed_secs < limit_secs {
        if engine.wave_resolved() {
            towers_built += build(engine, &mut rng, args.towers);
            if !engine.launch_wave() {
                break;
            }
        }

        // Keep the board lit: the fairy when it is affordable, otherwise
        // the cursor sweeps the enemy nearest the castle.
        if !engine.fairy_active() && engine.gold() > 200 {
            engine.try_purchase_spell_level(SpellKind::Fairy);
        }
        let lead = engine
            .enemies()
            .into_iter()
            .filter(|e| e.health > 0)
            .min_by(|a, b| a.remaining_distance.total_cmp(&b.remaining_distance));
        engine.set_cursor(lead.map(|e| e.position));

        for event in engine.tick(dt).events {
            match event {
                GameEvent::EnemyKilled { .. } => killed += 1,
                GameEvent::EnemyArrived { .. } => arrived += 1,
                GameEvent::ProjectileIntercepted => intercepted += 1,
                _ => {}
            }
        }
    }

    let time = engine.time();
    Summary {
        level: engine.level().name.clone(),
        seed: args.seed,
        outcome: engine.phase(),
        waves_launched: engine.wave_number(),
        max_wave: engine.max_wave(),
        gold: engine.gold(),
        lives: engine.lives(),
        towers_built,
        enemies_killed: killed,
        enemies_arrived: arrived,
        stones_intercepted: intercepted,
        ticks: time.tick,
        elapsed_secs: time.elapsed_secs,
    }
}

/// Buy up to `count` towers on random free cells. Returns how many were built.
fn build(engine: &mut SimulationEngine, rng: &mut ChaCha8Rng, count: u32) -> usize {
    let mut built = 0;
    for _ in 0..count {
        let free = engine.free_cells();
        if free.is_empty() {
            break;
        }
        let cell = free[rng.gen_range(0..free.len())];
        let kind = TowerKind::ALL[rng.gen_range(0..TowerKind::ALL.len())];
        if engine.try_place_tower(cell, kind) {
            debug!(?cell, ?kind, "auto-builder placed a tower");
            built += 1;
        }
    }
    built
}
