//! Fire-and-forget notifications for presentation layers.
//! Core code only pushes into an `EventQueue`; the driver drains it into the
//! `EventBus` after each tick, so nothing in the simulation reads bus state.

use std::mem;

use serde::Serialize;

use crate::content::Subtype;
use crate::entity::PickupKind;
use crate::types::{CellPos, Direction, EntityId};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    HealthChanged { entity: EntityId, hp: i32, max_hp: i32 },
    Hurt { entity: EntityId, amount: i32 },
    Died { entity: EntityId, subtype: Subtype },
    BossDied { entity: EntityId, subtype: Subtype },
    Culled { entity: EntityId },
    PickupCollected { entity: EntityId, pickup: PickupKind },
    AttackStarted { entity: EntityId, facing: Direction },
    RoomChanged { from: CellPos, to: CellPos },
    RoomCleared { cell: CellPos },
    DoorsShut { cell: CellPos },
    LevelChanged { level: u32 },
    PlayerDied,
}

/// Outbox filled during a tick.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.pending)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

/// In-process publish/subscribe channel owned by the driver.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
