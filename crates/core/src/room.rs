//! One dungeon room: its four sides, the live math problem, and the entities inside.
//! This module exists to answer passability queries without side effects.
//! It does not own room lifecycle policy (locking, clearing, transitions); the
//! game driver does.

use serde::Serialize;
use slotmap::SlotMap;

use crate::actor::Actor;
use crate::config::RoomGeometry;
use crate::content::Role;
use crate::entity::Entity;
use crate::mapgen::Maze;
use crate::types::{ALIGN_EPSILON, CellPos, Direction, EntityId, Pos};

pub mod math;

pub use math::MathProblem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    Open,
    Solid,
    /// Doorway that stays closed until the level's item is found.
    Locked,
    /// Doorway closed while the room still holds hostiles.
    Shut,
}

#[derive(Clone, Debug)]
pub struct Room {
    pub cell: CellPos,
    walls: [WallType; 4],
    pub math_problem: MathProblem,
    pub entities: SlotMap<EntityId, Entity>,
    pub geometry: RoomGeometry,
    pub(crate) lock_pending: bool,
}

impl Room {
    pub fn new(
        cell: CellPos,
        walls: [WallType; 4],
        math_problem: MathProblem,
        geometry: RoomGeometry,
    ) -> Self {
        Self {
            cell,
            walls,
            math_problem,
            entities: SlotMap::with_key(),
            geometry,
            lock_pending: false,
        }
    }

    /// Walls come from the maze; sides leading into the boss room are locked
    /// until `boss_unlocked`.
    pub fn from_maze(
        maze: &Maze,
        cell: CellPos,
        math_problem: MathProblem,
        geometry: RoomGeometry,
        boss_unlocked: bool,
    ) -> Self {
        let mut walls = [WallType::Solid; 4];
        for side in Direction::ALL {
            walls[side.index()] = match maze.neighbor(cell, side) {
                Some(next) if next == maze.boss && !boss_unlocked => WallType::Locked,
                Some(_) => WallType::Open,
                None => WallType::Solid,
            };
        }
        Self::new(cell, walls, math_problem, geometry)
    }

    pub fn wall(&self, side: Direction) -> WallType {
        self.walls[side.index()]
    }

    pub fn walls(&self) -> [WallType; 4] {
        self.walls
    }

    pub fn grid_size(&self) -> f32 {
        self.geometry.grid_size
    }

    pub fn is_lock_pending(&self) -> bool {
        self.lock_pending
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.entities[id].core_mut().id = id;
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.entities.get(id).and_then(Entity::as_actor)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.entities.get_mut(id).and_then(Entity::as_actor_mut)
    }

    /// Enemies and bosses still present, including those playing out Dying.
    pub fn hostile_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| matches!(entity.role(), Role::Enemy | Role::Boss))
            .count()
    }

    /// Whether `pos` may be occupied by a mover. Pure; callers may query it before issuing a move.
    pub fn is_passable(&self, pos: Pos, is_player: bool, ignore: &[EntityId]) -> bool {
        let grid = self.geometry.grid_size;
        let (x_span, y_span) = (occupied_span(pos.x, grid), occupied_span(pos.y, grid));
        let collides = self.entities.iter().any(|(id, entity)| {
            if !entity.is_blocking() || ignore.contains(&id) {
                return false;
            }
            let other = entity.pos();
            spans_overlap(x_span, occupied_span(other.x, grid))
                && spans_overlap(y_span, occupied_span(other.y, grid))
        });
        if collides {
            return false;
        }
        if is_player && self.doorway_allows(pos) {
            return true;
        }
        self.inside_floor(pos)
    }

    /// Player-only passage along a centerline into the wall band of an open side.
    fn doorway_allows(&self, pos: Pos) -> bool {
        let geometry = &self.geometry;
        let (low, high) = (geometry.interior_min(), geometry.interior_max());
        let edge = geometry.room_size;
        let center = geometry.center();

        let mut side = None;
        if (pos.x - center).abs() <= ALIGN_EPSILON {
            if (0.0..low).contains(&pos.y) {
                side = Some(Direction::North);
            } else if pos.y > high && pos.y <= edge {
                side = Some(Direction::South);
            }
        }
        if (pos.y - center).abs() <= ALIGN_EPSILON {
            if (0.0..low).contains(&pos.x) {
                side = Some(Direction::West);
            } else if pos.x > high && pos.x <= edge {
                side = Some(Direction::East);
            }
        }
        side.is_some_and(|side| self.wall(side) == WallType::Open)
    }

    fn inside_floor(&self, pos: Pos) -> bool {
        let (low, high) = (self.geometry.interior_min(), self.geometry.interior_max());
        (low..=high).contains(&pos.x) && (low..=high).contains(&pos.y)
    }

    /// Strictly inside the outermost grid lines, clear of every doorway.
    pub fn contains_player(&self, pos: Pos) -> bool {
        let lines = self.geometry.grid_lines();
        let (Some(&first), Some(&last)) = (lines.first(), lines.last()) else {
            return false;
        };
        first < pos.x && pos.x < last && first < pos.y && pos.y < last
    }

    /// Closes every open doorway. Returns whether anything changed.
    pub fn shut_doors(&mut self) -> bool {
        let mut changed = false;
        for wall in &mut self.walls {
            if *wall == WallType::Open {
                *wall = WallType::Shut;
                changed = true;
            }
        }
        changed
    }

    pub fn reopen_doors(&mut self) {
        for wall in &mut self.walls {
            if *wall == WallType::Shut {
                *wall = WallType::Open;
            }
        }
    }

    pub fn unlock_doors(&mut self) {
        for wall in &mut self.walls {
            if *wall == WallType::Locked {
                *wall = WallType::Open;
            }
        }
    }

    /// Grid points a blocking mover could rest on, at least `clearance` away
    /// (per axis) from every entity in the room.
    pub fn free_grid_points(&self, clearance: f32) -> Vec<Pos> {
        let lines = self.geometry.grid_lines();
        let mut points = Vec::new();
        for &y in &lines {
            for &x in &lines {
                let pos = Pos::new(x, y);
                let crowded = self.entities.values().any(|entity| {
                    let other = entity.pos();
                    (other.x - x).abs() < clearance && (other.y - y).abs() < clearance
                });
                if !crowded && self.is_passable(pos, false, &[]) {
                    points.push(pos);
                }
            }
        }
        points
    }
}

/// Grid cells covered on one axis. A mover between two lines covers both.
fn occupied_span(value: f32, grid: f32) -> (i32, i32) {
    let cells = value / grid;
    let nearest = cells.round();
    if (cells - nearest).abs() * grid <= ALIGN_EPSILON {
        (nearest as i32, nearest as i32)
    } else {
        (cells.floor() as i32, cells.ceil() as i32)
    }
}

fn spans_overlap(a: (i32, i32), b: (i32, i32)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}
