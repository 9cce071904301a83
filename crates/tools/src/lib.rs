//! Shared setup for the simulation binaries.

use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::{Direction, PlayerInput, SimConfig};
use rand_chacha::{ChaCha8Rng, rand_core::Rng};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a console subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).init();
}

pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

/// One held direction, with an occasional swing.
pub fn random_input(rng: &mut ChaCha8Rng) -> PlayerInput {
    let roll = rng.next_u64();
    let mut input = PlayerInput { attack: roll % 4 == 0, ..PlayerInput::default() };
    match Direction::ALL[(roll >> 8) as usize % Direction::ALL.len()] {
        Direction::North => input.up = true,
        Direction::South => input.down = true,
        Direction::East => input.right = true,
        Direction::West => input.left = true,
    }
    input
}
