//! Hard failures surfaced to the driver.
//! Gameplay misses (wrong answer, blocked step, full health) are never errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("maze size {size} is too small, at least 2 cells per side are required")]
    DegenerateMaze { size: usize },
    #[error("start cell ({x}, {y}) lies outside a {size}x{size} maze")]
    StartOutOfBounds { x: i32, y: i32, size: usize },
    #[error("room ({x}, {y}) is outside the dungeon")]
    RoomOutOfBounds { x: i32, y: i32 },
    #[error("math problem {a} x {b} does not equal {answer}")]
    InconsistentMathProblem { a: u32, b: u32, answer: u32 },
    #[error("no maze with two dead ends after {attempts} attempts")]
    MazeAttemptsExhausted { attempts: u32 },
    #[error("failed to read config file")]
    ConfigRead(#[from] io::Error),
    #[error("failed to parse config file")]
    ConfigParse(#[from] toml::de::Error),
}
