#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that scrolls an obstacle grid and prints each tick.

mod config;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use lanes_core::{GridSnapshot, TickInput};
use lanes_rendering::{RoadScroll, Scene, ScreenLayout};
use lanes_world::{query, GridEngine};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Command-line arguments accepted by the lanes driver.
#[derive(Debug, Parser)]
#[command(name = "lanes", about = "Scrolls a lane obstacle grid one row per tick")]
struct Args {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, default_value = "lanes.toml")]
    config: PathBuf,
    /// Number of ticks to advance after construction.
    #[arg(long, default_value_t = 10)]
    ticks: u64,
    /// Overrides the generator seed from the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Only log warnings and errors.
    #[arg(long)]
    quiet: bool,
    /// Writes the final grid as JSON to this path.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
    /// Replaces the grid with a saved JSON snapshot before the first tick.
    #[arg(long, value_name = "PATH")]
    restore: Option<PathBuf>,
}

/// Entry point for the lanes command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let mut config = CliConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.grid.seed = Some(seed);
    }

    let layout = ScreenLayout::new(&config.layout).context("invalid layout configuration")?;
    let mut road = RoadScroll::new(config.layout.road_bands).context("invalid layout configuration")?;
    let mut engine = GridEngine::new(&config.grid).context("failed to build the obstacle grid")?;
    log::info!(
        "{}x{} grid with {} obstacles (seed {})",
        engine.dimensions().width(),
        engine.dimensions().height(),
        query::obstacle_count(&engine),
        engine.seed()
    );

    if let Some(path) = &args.restore {
        restore(&mut engine, path)?;
    }
    println!("{engine}");

    for _ in 0..args.ticks {
        if engine
            .advance_tick(TickInput::Generate)
            .context("tick input rejected")?
            .is_some()
        {
            road.advance();
        }

        let scene = Scene::capture(&query::view(&engine), &layout, &road);
        log::debug!(
            "tick {}: {} obstacle sprites, leading band {}",
            engine.tick(),
            scene.obstacles.len(),
            scene.road.first().map_or(0, |strip| strip.band)
        );
        println!("{engine}");
    }

    if let Some(path) = &args.save {
        write_snapshot(path, &query::snapshot(&engine))?;
        log::info!("saved grid to {}", path.display());
    }
    Ok(())
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        eprintln!("logging already initialised");
    }
}

/// Replaces the freshly populated grid with a saved snapshot before any row scrolls in.
fn restore(engine: &mut GridEngine, path: &Path) -> Result<()> {
    let input = TickInput::try_from(read_snapshot(path)?)
        .with_context(|| format!("inconsistent snapshot {}", path.display()))?;
    let _ = engine
        .advance_tick(input)
        .with_context(|| format!("snapshot {} does not fit the grid", path.display()))?;
    log::info!("restored grid from {}", path.display());
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<GridSnapshot> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid snapshot {}", path.display()))
}

fn write_snapshot(path: &Path, snapshot: &GridSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to encode snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write snapshot {}", path.display()))
}
