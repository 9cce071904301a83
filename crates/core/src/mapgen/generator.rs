//! Randomised depth-first carving with rejection sampling on the dead-end count.

use tracing::{debug, warn};

use crate::error::SimError;
use crate::rng::{self, SimRng};
use crate::types::{CellPos, Direction};

use super::model::{CellType, Maze, MazeCell, dead_ends, in_bounds, index};

/// Upper bound on rejected layouts. Grids of size >= 2 converge in a handful of tries.
const MAX_ATTEMPTS: u32 = 10_000;

pub struct MazeGenerator {
    size: usize,
}

impl MazeGenerator {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn generate(&self, start: CellPos, rng: &mut SimRng) -> Result<Maze, SimError> {
        if self.size < 2 {
            return Err(SimError::DegenerateMaze { size: self.size });
        }
        if !in_bounds(self.size, start) {
            return Err(SimError::StartOutOfBounds { x: start.x, y: start.y, size: self.size });
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let mut cells = vec![MazeCell::default(); self.size * self.size];
            cells[index(self.size, start)].kind = CellType::Start;
            carve(&mut cells, self.size, start, rng);

            let mut ends = dead_ends(&cells, self.size, start);
            if ends.len() < 2 {
                debug!(attempt, dead_ends = ends.len(), "rejected maze layout");
                continue;
            }

            rng::shuffle(rng, &mut ends);
            let (Some(boss), Some(item)) = (ends.pop(), ends.pop()) else {
                continue;
            };
            cells[index(self.size, boss)].kind = CellType::Boss;
            cells[index(self.size, item)].kind = CellType::Item;
            debug!(attempt, ?boss, ?item, "maze generated");
            return Ok(Maze::from_cells(self.size, start, boss, item, cells));
        }

        warn!(size = self.size, attempts = MAX_ATTEMPTS, "maze generation gave up");
        Err(SimError::MazeAttemptsExhausted { attempts: MAX_ATTEMPTS })
    }
}

struct CarveFrame {
    pos: CellPos,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn new(pos: CellPos, rng: &mut SimRng) -> Self {
        let mut directions = Direction::ALL;
        rng::shuffle(rng, &mut directions);
        Self { pos, directions, next: 0 }
    }
}

/// Depth-first carving on an explicit stack. Visits neighbours in the same
/// order a recursive backtracker would, so the result is a spanning tree.
fn carve(cells: &mut [MazeCell], size: usize, start: CellPos, rng: &mut SimRng) {
    cells[index(size, start)].visited = true;
    let mut stack = vec![CarveFrame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }
        let dir = frame.directions[frame.next];
        frame.next += 1;
        let from = frame.pos;
        let to = from.neighbor(dir);

        if !in_bounds(size, to) || cells[index(size, to)].visited {
            continue;
        }
        cells[index(size, from)].open(dir);
        let next = &mut cells[index(size, to)];
        next.open(dir.opposite());
        next.visited = true;
        stack.push(CarveFrame::new(to, rng));
    }
}
