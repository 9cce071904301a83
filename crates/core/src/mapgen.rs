//! Procedural dungeon layout: a spanning-tree maze of rooms with start, boss,
//! and item cells placed on distinct dead ends.

pub mod model;

mod generator;

pub use generator::MazeGenerator;
pub use model::{CellType, Maze, MazeCell};

use crate::error::SimError;
use crate::rng::SimRng;
use crate::types::CellPos;

/// Every level's dungeon starts in the top-left room.
pub const START_CELL: CellPos = CellPos::new(0, 0);

pub fn generate_maze(size: usize, rng: &mut SimRng) -> Result<Maze, SimError> {
    MazeGenerator::new(size).generate(START_CELL, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn generate_maze_matches_generator_output() {
        let from_helper = generate_maze(4, &mut seeded(123)).expect("maze");
        let from_generator =
            MazeGenerator::new(4).generate(START_CELL, &mut seeded(123)).expect("maze");
        assert_eq!(from_helper, from_generator);
    }
}
