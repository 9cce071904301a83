use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

/// Room-space position in pixels. Entities are positioned by their centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn step(self, dir: Direction, distance: f32) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx * distance, dy * distance)
    }

    /// Rounds both axes to the nearest multiple of `grid`.
    pub fn snapped(self, grid: f32) -> Self {
        Self { x: snap_axis(self.x, grid), y: snap_axis(self.y, grid) }
    }

    /// Like `snapped`, but the axis of `dir` rounds back against the direction
    /// of travel, onto the last grid line already crossed.
    pub fn snapped_behind(self, dir: Direction, grid: f32) -> Self {
        let snapped = self.snapped(grid);
        if self.is_grid_aligned(grid) {
            return snapped;
        }
        let back = |value: f32, forward: f32| {
            let cells = value / grid;
            if forward > 0.0 { cells.floor() * grid } else { cells.ceil() * grid }
        };
        let (dx, dy) = dir.delta();
        if dir.is_horizontal() {
            Self { x: back(self.x, dx), y: snapped.y }
        } else {
            Self { x: snapped.x, y: back(self.y, dy) }
        }
    }

    pub fn is_grid_aligned(self, grid: f32) -> bool {
        (self.x - snap_axis(self.x, grid)).abs() <= ALIGN_EPSILON
            && (self.y - snap_axis(self.y, grid)).abs() <= ALIGN_EPSILON
    }
}

/// Tolerance used when comparing positions that should already sit on a grid line.
pub const ALIGN_EPSILON: f32 = 0.001;

pub fn snap_axis(value: f32, grid: f32) -> f32 {
    (value / grid).round() * grid
}

/// Cardinal direction, used both for actor facing and maze/room sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    /// Unit vector in room space (y grows downwards).
    pub fn delta(self) -> (f32, f32) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::South => (0.0, 1.0),
            Direction::East => (1.0, 0.0),
            Direction::West => (-1.0, 0.0),
        }
    }

    pub fn cell_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn horizontal_toward(dx: f32) -> Self {
        if dx > 0.0 { Direction::East } else { Direction::West }
    }

    pub fn vertical_toward(dy: f32) -> Self {
        if dy > 0.0 { Direction::South } else { Direction::North }
    }
}

/// Coordinates of a maze cell (one room of the dungeon).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn neighbor(self, dir: Direction) -> Self {
        let (dx, dy) = dir.cell_delta();
        Self { x: self.x + dx, y: self.y + dy }
    }
}
