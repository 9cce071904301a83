use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dungeon_core::{AdvanceStopReason, Game, GameEvent};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use tools::{init_tracing, load_config, random_input};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 3600)]
    ticks: u32,
    /// Optional TOML file overriding simulation constants
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Ticks between random input changes
    #[arg(long, default_value_t = 30)]
    input_period: u32,
    /// Print the final room as JSON
    #[arg(long)]
    json: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(args.config.as_deref())?;
    let mut game = Game::new(args.seed, config).context("Failed to start simulation")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let period = args.input_period.max(1);

    let mut rooms_cleared = 0;
    let mut deaths = 0;
    let mut elapsed = 0;
    while elapsed < args.ticks {
        game.set_input(random_input(&mut rng));
        let budget = period.min(args.ticks - elapsed);
        let result = game.advance(budget);
        elapsed += result.simulated_ticks;

        rooms_cleared += game
            .events()
            .iter()
            .filter(|event| matches!(event, GameEvent::RoomCleared { .. }))
            .count();

        match result.stop_reason {
            AdvanceStopReason::BudgetExhausted => {}
            AdvanceStopReason::LevelCompleted { level } => info!(level, elapsed, "level completed"),
            AdvanceStopReason::PlayerDefeated => {
                deaths += 1;
                game.restart_level().context("Failed to restart level")?;
            }
            AdvanceStopReason::LevelGenerationFailed => {
                bail!("Level generation failed after {elapsed} ticks");
            }
        }
    }

    println!("Simulation complete.");
    println!("Final Tick: {}", game.tick());
    println!("Level: {}", game.level());
    println!("Rooms Cleared: {rooms_cleared}");
    println!("Deaths: {deaths}");
    println!("Snapshot Hash: {}", game.snapshot_hash());
    if args.json {
        let json = serde_json::to_string_pretty(&game.room_snapshot())
            .context("Failed to serialize room snapshot")?;
        println!("{json}");
    }
    Ok(())
}
