//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating room setup across many tests.
//! It does not own production gameplay logic.

use super::*;
use crate::actor::DamageOutcome;
use crate::ai::Behavior;
use crate::mapgen::CellType;

/// Defaults with heart drops switched off so kill counts stay exact.
pub(super) fn quiet_config() -> SimConfig {
    SimConfig { heart_drop_chance: 0.0, ..SimConfig::default() }
}

pub(super) fn new_game(seed: u64) -> Game {
    Game::new(seed, quiet_config()).expect("game should start")
}

pub(super) fn find_cell(game: &Game, kind: CellType) -> CellPos {
    game.plan
        .maze
        .cells()
        .find(|(_, cell)| cell.kind == kind)
        .map(|(pos, _)| pos)
        .expect("maze should contain the cell kind")
}

/// Loads `cell` directly, carrying the current player over.
pub(super) fn enter_cell(game: &mut Game, cell: CellPos, entry: Pos) {
    let Some(Entity::Actor(player)) = game.room.remove(game.player_id) else {
        panic!("player should be in the room");
    };
    game.load_room(cell, entry, player).expect("room should load");
}

pub(super) fn clear_hostiles(game: &mut Game) {
    game.room.entities.retain(|_, entity| !entity.core().subtype.is_hostile());
}

/// Spawns a hostile whose behaviour is switched off.
pub(super) fn spawn_inert(game: &mut Game, subtype: Subtype, pos: Pos) -> EntityId {
    let level = game.level();
    let id = game.spawn(SpawnRequest { pos, subtype, level });
    if let Some(actor) = game.room.actor_mut(id) {
        actor.behavior = Behavior::None;
    }
    id
}

pub(super) fn place_player(game: &mut Game, pos: Pos, facing: Direction) {
    let player = game.room.actor_mut(game.player_id).expect("player should exist");
    player.core.pos = pos;
    player.facing = facing;
}

pub(super) fn player_pos(game: &Game) -> Pos {
    game.player().expect("player should exist").pos()
}

pub(super) fn damage_player(game: &mut Game, amount: i32, source: Pos) -> DamageOutcome {
    let mut env = SimEnv {
        clock: game.tick,
        config: &game.config,
        rng: &mut game.rng,
        events: &mut game.outbox,
        spawns: &mut game.pending_spawns,
    };
    let player = game.room.actor_mut(game.player_id).expect("player should exist");
    player.take_damage(amount, source, &mut env)
}

/// Publishes anything still in the outbox, then drains the log.
pub(super) fn drain(game: &mut Game) -> Vec<GameEvent> {
    game.flush_events();
    game.events()
}

pub(super) fn count(events: &[GameEvent], matches: impl Fn(&GameEvent) -> bool) -> usize {
    events.iter().filter(|event| matches(event)).count()
}

pub(super) fn holding(direction: Direction) -> PlayerInput {
    let mut input = PlayerInput::default();
    match direction {
        Direction::North => input.up = true,
        Direction::South => input.down = true,
        Direction::East => input.right = true,
        Direction::West => input.left = true,
    }
    input
}

pub(super) fn attacking() -> PlayerInput {
    PlayerInput { attack: true, ..PlayerInput::default() }
}

pub(super) fn open_side(game: &Game) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|side| game.room.wall(*side) == WallType::Open)
        .expect("room should have an open side")
}
