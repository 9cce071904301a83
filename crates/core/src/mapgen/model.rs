//! Public maze data read by the driver and exposed read-only to the minimap.

use serde::Serialize;

use crate::error::SimError;
use crate::types::{CellPos, Direction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Normal,
    Start,
    Boss,
    Item,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MazeCell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
    #[serde(skip)]
    pub(crate) visited: bool,
    #[serde(rename = "type")]
    pub kind: CellType,
    pub cleared: bool,
    pub item_collected: bool,
    /// Set once the player has entered the room; drives the minimap.
    pub seen: bool,
}

impl MazeCell {
    pub fn is_open(&self, side: Direction) -> bool {
        match side {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub(crate) fn open(&mut self, side: Direction) {
        match side {
            Direction::North => self.north = true,
            Direction::South => self.south = true,
            Direction::East => self.east = true,
            Direction::West => self.west = true,
        }
    }

    pub fn open_count(&self) -> usize {
        Direction::ALL.iter().filter(|side| self.is_open(**side)).count()
    }

    /// Minimap bitmask: N=1, S=2, W=4, E=8.
    pub fn wall_mask(&self) -> u8 {
        u8::from(self.north)
            | (u8::from(self.south) << 1)
            | (u8::from(self.west) << 2)
            | (u8::from(self.east) << 3)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Maze {
    pub size: usize,
    pub start: CellPos,
    pub boss: CellPos,
    pub item: CellPos,
    cells: Vec<MazeCell>,
}

impl Maze {
    pub(crate) fn from_cells(
        size: usize,
        start: CellPos,
        boss: CellPos,
        item: CellPos,
        cells: Vec<MazeCell>,
    ) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, start, boss, item, cells }
    }

    pub fn in_bounds(&self, pos: CellPos) -> bool {
        in_bounds(self.size, pos)
    }

    pub fn cell(&self, pos: CellPos) -> Result<&MazeCell, SimError> {
        if !self.in_bounds(pos) {
            return Err(SimError::RoomOutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(&self.cells[index(self.size, pos)])
    }

    pub fn cell_mut(&mut self, pos: CellPos) -> Result<&mut MazeCell, SimError> {
        if !self.in_bounds(pos) {
            return Err(SimError::RoomOutOfBounds { x: pos.x, y: pos.y });
        }
        let idx = index(self.size, pos);
        Ok(&mut self.cells[idx])
    }

    /// The room reached by leaving `pos` through `side`, when that wall is open.
    pub fn neighbor(&self, pos: CellPos, side: Direction) -> Option<CellPos> {
        let cell = self.cell(pos).ok()?;
        let next = pos.neighbor(side);
        (cell.is_open(side) && self.in_bounds(next)).then_some(next)
    }

    pub fn positions(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.size as i32)
            .flat_map(move |y| (0..self.size as i32).map(move |x| CellPos::new(x, y)))
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellPos, &MazeCell)> + '_ {
        self.positions().zip(self.cells.iter())
    }

    /// Non-start cells with exactly one open wall.
    pub fn dead_ends(&self) -> Vec<CellPos> {
        dead_ends(&self.cells, self.size, self.start)
    }
}

pub(super) fn in_bounds(size: usize, pos: CellPos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < size && (pos.y as usize) < size
}

pub(super) fn index(size: usize, pos: CellPos) -> usize {
    (pos.y as usize) * size + (pos.x as usize)
}

pub(super) fn dead_ends(cells: &[MazeCell], size: usize, start: CellPos) -> Vec<CellPos> {
    let mut ends = Vec::new();
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let pos = CellPos::new(x, y);
            if pos != start && cells[index(size, pos)].open_count() == 1 {
                ends.push(pos);
            }
        }
    }
    ends
}
