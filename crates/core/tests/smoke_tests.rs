use dungeon_core::rng::seeded;
use dungeon_core::{
    AdvanceStopReason, CellType, Direction, Game, GameEvent, MathProblem, PlayerInput, Role,
    SimConfig, SimError, WallType, generate_maze,
};

#[test]
fn idle_game_runs_without_events_in_the_start_room() {
    let mut game = Game::new(1, SimConfig::default()).expect("game should start");
    assert_eq!(game.events(), vec![GameEvent::LevelChanged { level: 1 }]);

    let result = game.advance(500);
    assert_eq!(result.simulated_ticks, 500);
    assert_eq!(result.stop_reason, AdvanceStopReason::BudgetExhausted);
    assert_eq!(game.tick(), 500);
    assert!(game.events().is_empty());
    assert_eq!(game.room().cell, game.maze().start);
}

#[test]
fn wandering_player_visits_neighbouring_rooms() {
    let mut game = Game::new(2024, SimConfig::default()).expect("game should start");
    let start = game.maze().start;
    let side = Direction::ALL
        .into_iter()
        .find(|side| game.room().wall(*side) == WallType::Open)
        .expect("start room has an open doorway");
    let mut input = PlayerInput::default();
    match side {
        Direction::North => input.up = true,
        Direction::South => input.down = true,
        Direction::East => input.right = true,
        Direction::West => input.left = true,
    }
    game.set_input(input);
    game.advance(200);

    assert_ne!(game.room().cell, start);
    let events = game.events();
    assert!(events.iter().any(|event| matches!(event, GameEvent::RoomChanged { .. })));
    let seen = game.maze().cells().filter(|(_, cell)| cell.seen).count();
    assert_eq!(seen, 2);
}

#[test]
fn every_room_problem_is_consistent() {
    let mut game = Game::new(31, SimConfig::default()).expect("game should start");
    let problem = game.room().math_problem;
    assert_eq!(problem.a() * problem.b(), problem.answer());
    assert!(MathProblem::checked(problem.a(), problem.b(), problem.answer()).is_ok());
    assert!(matches!(
        MathProblem::checked(3, 4, 13),
        Err(SimError::InconsistentMathProblem { a: 3, b: 4, answer: 13 })
    ));
    assert!(!game.select_weapon(9));
}

#[test]
fn maze_has_one_start_boss_and_item_on_dead_ends() {
    for seed in 0..20 {
        let maze = generate_maze(4, &mut seeded(seed)).expect("maze");
        let count = |kind| maze.cells().filter(|(_, cell)| cell.kind == kind).count();
        assert_eq!(count(CellType::Start), 1);
        assert_eq!(count(CellType::Boss), 1);
        assert_eq!(count(CellType::Item), 1);
        assert_eq!(maze.cell(maze.boss).expect("boss").open_count(), 1);
        assert_eq!(maze.cell(maze.item).expect("item").open_count(), 1);
    }
}

#[test]
fn config_rejects_degenerate_mazes() {
    let config = SimConfig { maze_size: 1, ..SimConfig::default() };
    assert!(matches!(Game::new(0, config), Err(SimError::DegenerateMaze { size: 1 })));
}

#[test]
fn start_room_never_holds_hostiles() {
    for seed in 0..10 {
        let game = Game::new(seed, SimConfig::default()).expect("game should start");
        let hostiles = game
            .room()
            .entities
            .values()
            .filter(|entity| matches!(entity.role(), Role::Enemy | Role::Boss))
            .count();
        assert_eq!(hostiles, 0);
        assert_eq!(game.room().math_problem.answer(), 0);
    }
}
