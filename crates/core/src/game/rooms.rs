//! Room lifecycle: building rooms from the level plan, locking, clearing,
//! doorway transitions and level progression.
//! This module does not own per-actor movement or combat resolution.

use tracing::debug;

use super::*;
use crate::content;
use crate::mapgen::CellType;

impl Game {
    /// Generates a new maze for `level` and drops the player into its start room.
    pub(super) fn start_level(&mut self, level: u32, player: Actor) -> Result<(), SimError> {
        let plan = LevelPlan::generate(level, &self.config, &mut self.rng)?;
        self.install_level(plan, player)
    }

    fn install_level(&mut self, plan: LevelPlan, mut player: Actor) -> Result<(), SimError> {
        let level = plan.level;
        self.plan = plan;
        self.item_found = false;
        self.clamp_loadout();
        self.pending_spawns.clear();

        let center = self.room_center();
        let start = self.plan.maze.start;
        player.core.subtype = self.player_subtype;
        self.load_room(start, Pos::new(center, center), player)?;
        self.outbox.push(GameEvent::LevelChanged { level });
        info!(level, "level started");
        Ok(())
    }

    fn clamp_loadout(&mut self) {
        let level = self.plan.level;
        if self.loadout.weapon >= combat::weapons_available(level, self.item_found) {
            self.loadout.weapon = 0;
        }
        if self.loadout.triforce > combat::triforce_available(level, self.item_found) {
            self.loadout.triforce = 0;
        }
    }

    /// Replaces the current room with `cell`, placing `player` at `entry`.
    pub(super) fn load_room(
        &mut self,
        cell: CellPos,
        entry: Pos,
        mut player: Actor,
    ) -> Result<(), SimError> {
        let problem = self.plan.problem(cell)?;
        let mut room =
            Room::from_maze(&self.plan.maze, cell, problem, self.config.room, self.item_found);
        let maze_cell = self.plan.maze.cell_mut(cell)?;
        maze_cell.seen = true;
        let (kind, cleared, item_collected) =
            (maze_cell.kind, maze_cell.cleared, maze_cell.item_collected);

        player.reset_to_idle(entry, self.config.room.grid_size);
        self.player_id = room.insert(Entity::Actor(player));

        if kind != CellType::Start && !cleared {
            let spawned = self.populate(&mut room, kind);
            room.lock_pending = spawned > 0;
        }
        if kind == CellType::Item && cleared && !item_collected {
            self.place_weapon_reward(&mut room);
        }
        debug!(
            ?cell,
            ?kind,
            answer = room.math_problem.answer(),
            hostiles = room.hostile_count(),
            "room loaded"
        );
        self.room = room;
        Ok(())
    }

    /// Boss rooms hold the level's boss; other rooms draw from the enemy pool.
    fn populate(&mut self, room: &mut Room, kind: CellType) -> usize {
        let level = self.plan.level;
        let subtypes: Vec<Subtype> = if kind == CellType::Boss {
            vec![content::boss_for_level(level)]
        } else {
            let count = rng::range_u32(
                &mut self.rng,
                self.config.enemies_per_room_min,
                self.config.enemies_per_room_max,
            );
            let pool = content::enemy_pool_for_level(level);
            (0..count).filter_map(|_| rng::pick(&mut self.rng, pool).copied()).collect()
        };

        let clearance = self.config.room.grid_size * 3.0;
        let mut points = room.free_grid_points(clearance);
        rng::shuffle(&mut self.rng, &mut points);
        let boss_problem = room.math_problem;
        let mut spawned = 0;
        for (subtype, pos) in subtypes.into_iter().zip(points) {
            let id =
                room.insert(Entity::from_spawn(SpawnRequest { pos, subtype, level }, &self.config));
            if kind == CellType::Boss
                && let Some(boss) = room.actor_mut(id)
            {
                boss.math_problem = Some(boss_problem);
            }
            spawned += 1;
        }
        spawned
    }

    fn place_weapon_reward(&self, room: &mut Room) {
        let center = self.room_center();
        let request =
            SpawnRequest { pos: Pos::new(center, center), subtype: Subtype::Weapon, level: 0 };
        room.insert(Entity::from_spawn(request, &self.config));
    }

    /// Shuts open doors once the player has walked fully into a hostile room.
    pub(super) fn update_lock(&mut self) {
        if !self.room.lock_pending {
            return;
        }
        let Some(player) = self.room.actor(self.player_id) else {
            return;
        };
        if !self.room.contains_player(player.pos()) {
            return;
        }
        self.room.lock_pending = false;
        if self.room.shut_doors() {
            self.outbox.push(GameEvent::DoorsShut { cell: self.room.cell });
            debug!(cell = ?self.room.cell, "doors shut");
        }
    }

    /// Fires once per room when its last hostile is gone. Returns the finished
    /// level when the boss room was cleared.
    pub(super) fn check_room_clear(&mut self) -> Result<Option<u32>, SimError> {
        let cell = self.room.cell;
        if self.room.hostile_count() > 0 {
            return Ok(None);
        }
        let maze_cell = self.plan.maze.cell_mut(cell)?;
        if maze_cell.kind == CellType::Start || maze_cell.cleared {
            return Ok(None);
        }
        maze_cell.cleared = true;
        let (kind, item_collected) = (maze_cell.kind, maze_cell.item_collected);

        self.room.lock_pending = false;
        self.room.reopen_doors();
        self.outbox.push(GameEvent::RoomCleared { cell });
        info!(?cell, ?kind, "room cleared");

        match kind {
            CellType::Item if !item_collected => {
                let center = self.room_center();
                self.pending_spawns.push(SpawnRequest {
                    pos: Pos::new(center, center),
                    subtype: Subtype::Weapon,
                    level: 0,
                });
                Ok(None)
            }
            CellType::Boss => {
                let finished = self.plan.level;
                info!(level = finished, "level complete");
                // The player stays put when the next maze cannot be built.
                let next = LevelPlan::generate(finished + 1, &self.config, &mut self.rng)?;
                let Some(Entity::Actor(player)) = self.room.remove(self.player_id) else {
                    return Ok(Some(finished));
                };
                self.install_level(next, player)?;
                Ok(Some(finished))
            }
            _ => Ok(None),
        }
    }

    /// Moves the player to the neighbouring room once it crosses an open
    /// doorway into the exit band.
    pub(super) fn check_transition(&mut self) -> Result<(), SimError> {
        let Some(player) = self.room.actor(self.player_id) else {
            return Ok(());
        };
        if player.is_dying_or_dead() {
            return Ok(());
        }
        let geometry = self.config.room;
        let pos = player.pos();
        let far = geometry.room_size - geometry.exit_band;
        let side = if pos.y <= geometry.exit_band {
            Direction::North
        } else if pos.y >= far {
            Direction::South
        } else if pos.x <= geometry.exit_band {
            Direction::West
        } else if pos.x >= far {
            Direction::East
        } else {
            return Ok(());
        };
        if self.room.wall(side) != WallType::Open {
            return Ok(());
        }
        let from = self.room.cell;
        let Some(to) = self.plan.maze.neighbor(from, side) else {
            return Ok(());
        };
        let Some(Entity::Actor(player)) = self.room.remove(self.player_id) else {
            return Ok(());
        };

        let center = geometry.center();
        let inset = geometry.wall_thickness;
        let entry = match side {
            Direction::North => Pos::new(center, geometry.room_size - inset),
            Direction::South => Pos::new(center, inset),
            Direction::West => Pos::new(geometry.room_size - inset, center),
            Direction::East => Pos::new(inset, center),
        };
        self.pending_spawns.clear();
        self.load_room(to, entry, player)?;
        self.outbox.push(GameEvent::RoomChanged { from, to });
        debug!(?from, ?to, "room changed");
        Ok(())
    }

    /// Inserts drops queued during the tick, skipping any that would spawn a
    /// second player.
    pub(super) fn flush_spawns(&mut self) {
        for request in mem::take(&mut self.pending_spawns) {
            if request.subtype.role() == Role::Player {
                continue;
            }
            self.room.insert(Entity::from_spawn(request, &self.config));
        }
    }
}
