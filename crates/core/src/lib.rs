pub mod actor;
pub mod ai;
pub mod combat;
pub mod config;
pub mod content;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod mapgen;
pub mod rng;
pub mod room;
pub mod types;

#[cfg(test)]
mod test_support;

pub use actor::{Actor, DamageOutcome, StateCommand, StateKind};
pub use ai::{Behavior, PlayerInput};
pub use combat::Loadout;
pub use config::{RoomGeometry, SimConfig};
pub use content::{Role, Subtype};
pub use entity::{Entity, PickupKind, SpawnRequest};
pub use error::SimError;
pub use events::{EventBus, GameEvent, SubscriptionId};
pub use game::{AdvanceResult, AdvanceStopReason, EntitySnapshot, Game, RoomSnapshot};
pub use mapgen::{CellType, Maze, MazeCell, generate_maze};
pub use room::{MathProblem, Room, WallType};
pub use types::*;
