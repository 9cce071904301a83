//! Per-level layout: the maze plus the math problem assigned to every room.

use tracing::info;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::mapgen::{CellType, Maze, MazeGenerator, START_CELL};
use crate::rng::SimRng;
use crate::room::math::{self, MathProblem};
use crate::types::CellPos;

#[derive(Clone, Debug)]
pub struct LevelPlan {
    pub level: u32,
    pub maze: Maze,
    problems: Vec<MathProblem>,
}

impl LevelPlan {
    /// Boss room gets the boss problem, the start room `level × 0`, and every
    /// other room `level × b` with `b` dealt from the multiplier deck.
    pub fn generate(level: u32, config: &SimConfig, rng: &mut SimRng) -> Result<Self, SimError> {
        let maze = MazeGenerator::new(config.maze_size).generate(START_CELL, rng)?;
        let dealt = maze.size * maze.size - 2;
        let mut deck = math::multiplier_deck(dealt, rng).into_iter();
        let boss = math::boss_problem(level, rng);

        let problems = maze
            .cells()
            .map(|(_, cell)| match cell.kind {
                CellType::Start => MathProblem::new(level, 0),
                CellType::Boss => boss,
                CellType::Normal | CellType::Item => {
                    MathProblem::new(level, deck.next().unwrap_or_default())
                }
            })
            .collect();
        info!(level, boss_answer = boss.answer(), boss_cell = ?maze.boss, item_cell = ?maze.item, "level planned");
        Ok(Self { level, maze, problems })
    }

    pub fn problem(&self, cell: CellPos) -> Result<MathProblem, SimError> {
        self.maze.cell(cell)?;
        let index = cell.y as usize * self.maze.size + cell.x as usize;
        self.problems
            .get(index)
            .copied()
            .ok_or(SimError::RoomOutOfBounds { x: cell.x, y: cell.y })
    }
}
