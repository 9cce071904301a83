//! Entities living inside a room: stateful actors and inert pickups.
//! This module exists to give the room one closed set of things it can hold.
//! It does not own per-state behaviour; see `actor`.

use serde::Serialize;

use crate::actor::{Actor, TickContext};
use crate::ai::Behavior;
use crate::config::SimConfig;
use crate::content::{self, ActorStats, Role, Subtype};
use crate::types::{ALIGN_EPSILON, EntityId, Pos, snap_axis};

/// Identity and placement shared by every entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityCore {
    pub id: EntityId,
    pub pos: Pos,
    pub subtype: Subtype,
}

impl EntityCore {
    pub fn new(pos: Pos, subtype: Subtype) -> Self {
        Self { id: EntityId::default(), pos, subtype }
    }

    pub fn role(&self) -> Role {
        self.subtype.role()
    }

    pub fn is_on_x_grid(&self, grid: f32) -> bool {
        (self.pos.x - snap_axis(self.pos.x, grid)).abs() <= ALIGN_EPSILON
    }

    pub fn is_on_y_grid(&self, grid: f32) -> bool {
        (self.pos.y - snap_axis(self.pos.y, grid)).abs() <= ALIGN_EPSILON
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Heart,
    Weapon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub core: EntityCore,
    pub kind: PickupKind,
}

/// Driver-facing request to create an entity in the current room.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    pub pos: Pos,
    pub subtype: Subtype,
    pub level: u32,
}

#[derive(Clone, Debug)]
pub enum Entity {
    Actor(Actor),
    Pickup(Pickup),
}

impl Entity {
    pub fn from_spawn(request: SpawnRequest, config: &SimConfig) -> Self {
        let core = EntityCore::new(request.pos, request.subtype);
        match request.subtype.role() {
            Role::Pickup => {
                let kind = match request.subtype {
                    Subtype::Weapon => PickupKind::Weapon,
                    _ => PickupKind::Heart,
                };
                Entity::Pickup(Pickup { core, kind })
            }
            Role::Player => {
                let stats = ActorStats {
                    hp: config.player_hp,
                    speed: config.player_speed,
                    contact_damage: 0,
                    behavior: Behavior::PlayerInput,
                    blocking: false,
                };
                let mut actor = Actor::new(core, stats, config.room.grid_size);
                actor.invincible_ticks = config.player_invincible_ticks;
                Entity::Actor(actor)
            }
            Role::Enemy | Role::Boss => {
                let stats = content::hostile_stats(request.subtype, request.level);
                Entity::Actor(Actor::new(core, stats, config.room.grid_size))
            }
        }
    }

    pub fn core(&self) -> &EntityCore {
        match self {
            Entity::Actor(actor) => &actor.core,
            Entity::Pickup(pickup) => &pickup.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            Entity::Actor(actor) => &mut actor.core,
            Entity::Pickup(pickup) => &mut pickup.core,
        }
    }

    pub fn id(&self) -> EntityId {
        self.core().id
    }

    pub fn pos(&self) -> Pos {
        self.core().pos
    }

    pub fn role(&self) -> Role {
        self.core().role()
    }

    pub fn is_blocking(&self) -> bool {
        match self {
            Entity::Actor(actor) => actor.blocking,
            Entity::Pickup(_) => false,
        }
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match self {
            Entity::Actor(actor) => Some(actor),
            Entity::Pickup(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match self {
            Entity::Actor(actor) => Some(actor),
            Entity::Pickup(_) => None,
        }
    }

    /// Pickups are inert and always survive the tick.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> bool {
        match self {
            Entity::Actor(actor) => actor.tick(ctx),
            Entity::Pickup(_) => true,
        }
    }
}
