//! Tests for room loading, door locking, clearing, doorway transitions and pickups.

use super::support::*;

#[test]
fn new_game_starts_idle_in_an_empty_start_room() {
    let mut game = new_game(5);
    let center = game.config.room.center();
    assert_eq!(game.level(), 1);
    assert_eq!(game.room.cell, game.maze().start);
    assert_eq!(player_pos(&game), Pos::new(center, center));
    assert_eq!(game.player().map(Actor::state), Some(StateKind::Idle));
    assert_eq!(game.room.math_problem.answer(), 0);
    assert_eq!(game.room.hostile_count(), 0);
    assert!(!game.room.is_lock_pending());
    assert!(game.maze().cell(game.maze().start).expect("start").seen);
    assert_eq!(drain(&mut game), vec![GameEvent::LevelChanged { level: 1 }]);
}

#[test]
fn only_player_subtypes_can_drive_the_game() {
    let err = Game::with_player(1, quiet_config(), Subtype::Moblin)
        .err()
        .expect("an enemy cannot be the player");
    assert!(matches!(err, SimError::InvalidConfig(_)));

    let game = Game::with_player(1, quiet_config(), Subtype::Zelda).expect("zelda is playable");
    assert_eq!(game.player().map(|player| player.core.subtype), Some(Subtype::Zelda));
}

#[test]
fn walking_through_an_open_doorway_enters_the_neighbouring_room() {
    let mut game = new_game(11);
    let start = game.room.cell;
    let side = open_side(&game);
    let expected = game.maze().neighbor(start, side).expect("open side has a neighbour");
    drain(&mut game);

    game.set_input(holding(side));
    for _ in 0..400 {
        game.advance(1);
        if game.room.cell != start {
            break;
        }
    }
    assert_eq!(game.room.cell, expected);

    let geometry = game.config.room;
    let (center, inset) = (geometry.center(), geometry.wall_thickness);
    let entry = match side {
        Direction::North => Pos::new(center, geometry.room_size - inset),
        Direction::South => Pos::new(center, inset),
        Direction::West => Pos::new(geometry.room_size - inset, center),
        Direction::East => Pos::new(inset, center),
    };
    assert_eq!(player_pos(&game), entry);
    assert!(game.maze().cell(expected).expect("cell").seen);
    assert!(drain(&mut game).contains(&GameEvent::RoomChanged { from: start, to: expected }));
}

#[test]
fn solid_walls_keep_the_player_inside() {
    let mut game = new_game(11);
    let start = game.room.cell;
    let solid = Direction::ALL
        .into_iter()
        .find(|side| game.room.wall(*side) == WallType::Solid)
        .expect("the corner start room has solid sides");

    game.set_input(holding(solid));
    game.advance(300);
    assert_eq!(game.room.cell, start);
    let pos = player_pos(&game);
    let geometry = game.config.room;
    assert!(pos.x >= geometry.interior_min() && pos.x <= geometry.interior_max());
    assert!(pos.y >= geometry.interior_min() && pos.y <= geometry.interior_max());
}

#[test]
fn hostile_rooms_shut_their_doors_once_entered_and_reopen_when_cleared() {
    let mut game = new_game(13);
    let cell = find_cell(&game, CellType::Normal);
    let geometry = game.config.room;
    let (center, doorway) = (geometry.center(), geometry.room_size - geometry.wall_thickness);
    enter_cell(&mut game, cell, Pos::new(center, doorway));
    assert!(game.room.hostile_count() > 0);
    assert!(game.room.is_lock_pending());
    let walls = game.room.walls();

    game.update_lock();
    assert_eq!(game.room.walls(), walls, "doorway entry should not lock yet");

    place_player(&mut game, Pos::new(center, center), Direction::North);
    game.update_lock();
    for side in Direction::ALL {
        let expected = match walls[side.index()] {
            WallType::Open => WallType::Shut,
            other => other,
        };
        assert_eq!(game.room.wall(side), expected);
    }
    assert!(!game.room.is_lock_pending());

    clear_hostiles(&mut game);
    assert_eq!(game.check_room_clear().expect("clear check"), None);
    assert_eq!(game.room.walls(), walls);
    assert_eq!(game.check_room_clear().expect("second check"), None);

    let events = drain(&mut game);
    assert_eq!(count(&events, |event| matches!(event, GameEvent::DoorsShut { .. })), 1);
    assert_eq!(count(&events, |event| matches!(event, GameEvent::RoomCleared { .. })), 1);

    enter_cell(&mut game, cell, Pos::new(center, center));
    assert_eq!(game.room.hostile_count(), 0, "cleared rooms stay empty");
    assert!(!game.room.is_lock_pending());
}

#[test]
fn the_boss_room_stays_locked_until_the_item_is_collected() {
    let mut game = new_game(17);
    let boss = game.maze().boss;
    let into_boss = Direction::ALL
        .into_iter()
        .find(|side| game.maze().neighbor(boss, *side).is_some())
        .expect("boss room has one doorway");
    let approach = game.maze().neighbor(boss, into_boss).expect("neighbour");
    let center = game.config.room.center();

    enter_cell(&mut game, approach, Pos::new(center, center));
    assert_eq!(game.room.wall(into_boss.opposite()), WallType::Locked);

    let item = game.maze().item;
    enter_cell(&mut game, item, Pos::new(center, center - 64.0));
    clear_hostiles(&mut game);
    game.check_room_clear().expect("clear check");
    game.flush_spawns();
    let weapons = game
        .room
        .entities
        .values()
        .filter(|entity| entity.core().subtype == Subtype::Weapon)
        .count();
    assert_eq!(weapons, 1);
    assert!(!game.select_weapon(2));

    place_player(&mut game, Pos::new(center, center), Direction::South);
    game.resolve_touches();
    assert!(game.item_found());
    assert!(game.maze().cell(item).expect("item cell").item_collected);
    assert!(game.select_weapon(2));
    let events = drain(&mut game);
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::PickupCollected { pickup: PickupKind::Weapon, .. }
    )));

    enter_cell(&mut game, approach, Pos::new(center, center));
    assert_eq!(game.room.wall(into_boss.opposite()), WallType::Open);

    enter_cell(&mut game, item, Pos::new(center, center));
    assert!(game.room.entities.values().all(|entity| entity.role() != Role::Pickup));
}

#[test]
fn the_boss_carries_the_boss_room_problem() {
    let mut game = new_game(17);
    let boss_cell = game.maze().boss;
    let center = game.config.room.center();
    enter_cell(&mut game, boss_cell, Pos::new(center, center));

    let expected = game.plan.problem(boss_cell).expect("boss problem");
    let bosses: Vec<&Actor> = game
        .room
        .entities
        .values()
        .filter(|entity| entity.role() == Role::Boss)
        .filter_map(Entity::as_actor)
        .collect();
    assert_eq!(bosses.len(), 1);
    assert_eq!(bosses[0].math_problem, Some(expected));
    assert_eq!(game.room.math_problem, expected);
}

#[test]
fn hearts_only_get_collected_when_they_heal() {
    let mut game = new_game(19);
    let here = player_pos(&game);
    let heart = game.spawn(SpawnRequest { pos: here, subtype: Subtype::Heart, level: 0 });

    game.resolve_touches();
    assert!(game.room.entities.contains_key(heart), "full health leaves the heart");

    damage_player(&mut game, 3, here.offset(0.0, -16.0));
    game.resolve_touches();
    assert!(!game.room.entities.contains_key(heart));
    assert_eq!(game.player().map(Actor::hp), Some(game.config.player_hp - 3 + game.config.heart_heal));

    let events = drain(&mut game);
    assert!(events.contains(&GameEvent::PickupCollected { entity: heart, pickup: PickupKind::Heart }));
    assert!(events.contains(&GameEvent::Culled { entity: heart }));
}
