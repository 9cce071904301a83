use dungeon_core::rng::seeded;
use dungeon_core::{AdvanceStopReason, Direction, Game, GameEvent, PlayerInput, SimConfig, generate_maze};

fn input_for(tick: u32) -> PlayerInput {
    let mut input = PlayerInput { attack: tick % 11 == 0, ..PlayerInput::default() };
    match Direction::ALL[(tick / 40) as usize % 4] {
        Direction::North => input.up = true,
        Direction::South => input.down = true,
        Direction::East => input.right = true,
        Direction::West => input.left = true,
    }
    input
}

fn run(seed: u64, ticks: u32) -> (u64, u64, Vec<GameEvent>) {
    let mut game = Game::new(seed, SimConfig::default()).expect("game should start");
    let mut events = game.events();
    for tick in 0..ticks {
        game.set_input(input_for(tick));
        let result = game.advance(1);
        events.extend(game.events());
        if result.stop_reason == AdvanceStopReason::PlayerDefeated {
            break;
        }
    }
    (game.snapshot_hash(), game.tick(), events)
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    let (hash1, tick1, events1) = run(12345, 800);
    let (hash2, tick2, events2) = run(12345, 800);
    assert_eq!(hash1, hash2, "Identical runs must produce identical hashes");
    assert_eq!(tick1, tick2);
    assert_eq!(events1, events2, "Identical runs must publish identical events");
}

#[test]
fn test_determinism_different_seeds_produce_different_hashes() {
    let (hash1, ..) = run(123, 300);
    let (hash2, ..) = run(456, 300);
    assert_ne!(hash1, hash2);
}

#[test]
fn test_determinism_maze_layout_depends_only_on_seed() {
    let first = generate_maze(5, &mut seeded(77)).expect("maze");
    let second = generate_maze(5, &mut seeded(77)).expect("maze");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}

#[test]
fn test_determinism_chunked_advance_matches_single_steps() {
    let mut stepped = Game::new(9, SimConfig::default()).expect("game");
    for _ in 0..250 {
        stepped.advance(1);
    }
    let mut chunked = Game::new(9, SimConfig::default()).expect("game");
    let result = chunked.advance(250);
    assert_eq!(result.simulated_ticks, 250);
    assert_eq!(stepped.snapshot_hash(), chunked.snapshot_hash());
}
