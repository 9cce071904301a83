//! Serializable views of the live room for renderers and tooling.

use serde::Serialize;

use super::*;
use crate::actor::StateKind;
use crate::room::MathProblem;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub subtype: Subtype,
    pub pos: Pos,
    /// Absent for pickups.
    pub hp: Option<i32>,
    pub state: Option<StateKind>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub tick: u64,
    pub level: u32,
    pub cell: CellPos,
    pub walls: [WallType; 4],
    pub problem: MathProblem,
    pub loadout: Loadout,
    pub attack_value: u32,
    pub item_found: bool,
    pub entities: Vec<EntitySnapshot>,
}

impl Game {
    pub fn room_snapshot(&self) -> RoomSnapshot {
        let entities = self
            .room
            .entities
            .iter()
            .map(|(id, entity)| {
                let actor = entity.as_actor();
                EntitySnapshot {
                    id,
                    subtype: entity.core().subtype,
                    pos: entity.pos(),
                    hp: actor.map(Actor::hp),
                    state: actor.map(Actor::state),
                }
            })
            .collect();
        RoomSnapshot {
            tick: self.tick,
            level: self.plan.level,
            cell: self.room.cell,
            walls: self.room.walls(),
            problem: self.room.math_problem,
            loadout: self.loadout,
            attack_value: self.loadout.attack_value(),
            item_found: self.item_found,
            entities,
        }
    }
}
