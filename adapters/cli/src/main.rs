#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Tile Defence level headlessly.

mod level_file;
mod png;
mod script;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tile_defence_core::{Event, GameConfig};
use tile_defence_rendering::PresentationBackend;
use tile_defence_simulation::Game;
use tile_defence_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{level_file::LevelDescriptor, png::PngWriter, script::InputScript};

#[derive(Debug, Parser)]
#[command(name = "tile-defence", about = "Runs a Tile Defence level without a window")]
struct Cli {
    /// Level descriptor (TOML)
    level: PathBuf,

    /// Game configuration (TOML); defaults apply to missing keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1_000)]
    ticks: u64,

    /// Input script such as `r*30,dr*10,-*5`
    #[arg(short, long, default_value = "")]
    input: InputScript,

    /// Write the final frame to this path as a PNG image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging when RUST_LOG is not set
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Tile Defence command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let text = fs::read_to_string(&cli.level)
        .with_context(|| format!("failed to read level {}", cli.level.display()))?;
    let loaded = LevelDescriptor::from_toml_str(&text)?
        .build(config.tile_metrics)
        .with_context(|| format!("invalid level {}", cli.level.display()))?;

    let mut game =
        Game::new(loaded.level, &config, loaded.sprites)?.with_background(loaded.background);

    let mut rejected = 0usize;
    for tick in 0..cli.ticks {
        game.set_input(cli.input.input_at(tick));
        rejected += game
            .update()
            .iter()
            .filter(|event| matches!(event, Event::SpawnRejected { .. }))
            .count();
    }

    let world = game.world();
    let camera = query::camera_position(world);
    info!(
        ticks = query::tick(world),
        enemies = query::enemy_count(world),
        rejected,
        camera_x = camera.x(),
        camera_y = camera.y(),
        "run_completed"
    );
    println!(
        "tick={} enemies={}/{} rejected_spawns={} camera=({}, {})",
        query::tick(world),
        query::enemy_count(world),
        query::enemy_capacity(world),
        rejected,
        camera.x(),
        camera.y()
    );

    if let Some(path) = cli.output {
        PngWriter::new(path).present(game.frame())?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GameConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
