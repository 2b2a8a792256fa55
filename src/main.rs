//! Lifeline - Headless Runner
//!
//! Builds a camp, runs a fixed number of simulation ticks, and prints a
//! summary of every survivor. Optionally loads and writes save slots.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lifeline::core::calendar::GameSpeed;
use lifeline::core::config::BalanceConfig;
use lifeline::core::error::{LifelineError, Result};
use lifeline::entity::needs::NeedType;
use lifeline::rules::{load_guideline_settings, GuidelineSettings};
use lifeline::simulation::tick::{run_simulation_tick, SimulationEvent};
use lifeline::world::{SaveSlot, World};

/// Headless camp simulation
#[derive(Parser, Debug)]
#[command(name = "lifeline")]
#[command(about = "Run the survival camp simulation without a UI")]
struct Args {
    /// Number of ticks to run
    #[arg(long, default_value_t = 240)]
    ticks: u32,

    /// Game speed multiplier (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    speed: u8,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Guideline settings file (.json or .toml)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Balance table (.toml)
    #[arg(long)]
    balance: Option<PathBuf>,

    /// Save slot to load before running
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a save slot here after running
    #[arg(long)]
    save: Option<PathBuf>,

    /// Sleep the configured tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Log every simulation event
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "lifeline=debug"
    } else {
        "lifeline=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let speed = GameSpeed::try_from(args.speed).map_err(LifelineError::InvalidConfig)?;

    let config = match &args.balance {
        Some(path) => BalanceConfig::load(path)?,
        None => BalanceConfig::default(),
    };
    let settings = match &args.settings {
        Some(path) => load_guideline_settings(path)?,
        None => GuidelineSettings::default(),
    };

    let pacing = args
        .realtime
        .then(|| Duration::from_millis(config.tick_interval_ms));

    let mut world = World::with_config(config, settings, args.seed);
    if let Some(path) = &args.load {
        world.apply_save(SaveSlot::load_from_file(path)?);
    }
    world.set_speed(speed);

    tracing::info!(ticks = args.ticks, seed = args.seed, start = %world.now(), "running camp");

    let mut completed = 0usize;
    let mut queued = 0usize;
    for _ in 0..args.ticks {
        for event in run_simulation_tick(&mut world) {
            match &event {
                SimulationEvent::ActivityCompleted { .. } => completed += 1,
                SimulationEvent::GuidelineQueued { .. } => queued += 1,
                _ => {}
            }
            tracing::debug!(?event, "simulation event");
        }
        if let Some(interval) = pacing {
            std::thread::sleep(interval);
        }
    }

    print_summary(&world, completed, queued);

    if let Some(path) = &args.save {
        world.to_save().save_to_file(path)?;
    }

    Ok(())
}

fn print_summary(world: &World, completed: usize, queued: usize) {
    println!("\n=== CAMP @ {} ===", world.now());
    println!(
        "activities completed: {}  guideline entries queued: {}",
        completed, queued
    );
    println!(
        "discovered survivors: {}  research: {}",
        world.discovered_survivor_count(),
        world.research_progress()
    );
    println!();

    for survivor in &world.survivors {
        let queue = world.board.reserved_for(&survivor.id).count();
        println!(
            "{:<12} {:>3}y  H{:>5.1} T{:>5.1} W{:>5.1} B{:>5.1}  {:?}/{:?}  queue={}",
            survivor.name,
            survivor.age,
            survivor.gauge(NeedType::Hunger),
            survivor.gauge(NeedType::Tiredness),
            survivor.gauge(NeedType::Thirst),
            survivor.gauge(NeedType::Boredom),
            survivor.status(),
            survivor.current_action,
            queue,
        );
    }

    println!();
    for (key, amount) in world.resources.iter() {
        if amount > 0 {
            println!("{:?}: {}", key, amount);
        }
    }
}
