use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::generate_maze;
use dungeon_core::rng::seeded;
use tools::{init_tracing, load_config};

/// Dumps a generated maze as JSON for the minimap renderer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Cells per side; defaults to the configured maze size
    #[arg(long)]
    size: Option<usize>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing("warn");

    let config = load_config(args.config.as_deref())?;
    let size = args.size.unwrap_or(config.maze_size);
    let maze = generate_maze(size, &mut seeded(args.seed))
        .with_context(|| format!("Failed to generate a {size}x{size} maze"))?;
    let json = serde_json::to_string_pretty(&maze).context("Failed to serialize maze")?;

    match args.out {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("Failed to write maze to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
