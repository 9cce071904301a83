use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use dungeon_core::{AdvanceStopReason, Entity, Game, Role, SimConfig};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{init_tracing, random_input};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10000)]
    ticks: u32,
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn check_invariants(game: &Game) -> Result<()> {
    let room = game.room();
    let problem = room.math_problem;
    ensure!(problem.a() * problem.b() == problem.answer(), "Invariant failed: problem {problem:?}");

    let (low, high) = (room.geometry.interior_min(), room.geometry.interior_max());
    for entity in room.entities.values() {
        let Entity::Actor(actor) = entity else {
            continue;
        };
        ensure!(actor.hp() <= actor.max_hp(), "Invariant failed: HP > Max HP");
        ensure!(actor.hp() > 0 || actor.is_dying_or_dead(), "Invariant failed: 0 HP actor alive");
        if actor.core.role() != Role::Player {
            let pos = actor.pos();
            ensure!(
                (low..=high).contains(&pos.x) && (low..=high).contains(&pos.y),
                "Invariant failed: {:?} outside the floor at {pos:?}",
                actor.core.subtype
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    println!("Starting Fuzz harness on seed {} for max {} ticks...", args.seed, args.ticks);
    let mut game = Game::new(args.seed, SimConfig::default()).context("Failed to start game")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_ticks = 0;
    while total_ticks < args.ticks {
        game.set_input(random_input(&mut rng));
        let tier = (rng.next_u64() % 10) as u8;
        game.select_weapon(tier);
        game.select_item(tier);

        let result = game.advance(10);
        total_ticks += result.simulated_ticks;
        check_invariants(&game).with_context(|| format!("seed {} tick {}", args.seed, game.tick()))?;

        match result.stop_reason {
            AdvanceStopReason::BudgetExhausted => {}
            AdvanceStopReason::LevelCompleted { level } => {
                println!("Completed level {level} after {total_ticks} ticks");
            }
            AdvanceStopReason::PlayerDefeated => {
                println!("Player defeated on level {} after {total_ticks} ticks", game.level());
                game.restart_level().context("Failed to restart level")?;
            }
            AdvanceStopReason::LevelGenerationFailed => {
                bail!("Level generation failed after {total_ticks} ticks");
            }
        }
    }

    println!("Fuzz complete. Snapshot Hash: {}", game.snapshot_hash());
    Ok(())
}
