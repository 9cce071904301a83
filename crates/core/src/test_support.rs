//! Shared fixtures for unit tests that drive actors outside the game loop.
//! This module exists to avoid rebuilding rooms and tick contexts in every suite.
//! It does not own production gameplay logic.

use crate::actor::{Actor, DamageOutcome, PlayerView, SimEnv, TickContext};
use crate::ai::{Behavior, PlayerInput};
use crate::combat::{self, HitReport, WeaponStrike};
use crate::config::{RoomGeometry, SimConfig};
use crate::content::{Role, Subtype};
use crate::entity::{Entity, SpawnRequest};
use crate::events::{EventQueue, GameEvent};
use crate::rng::{SimRng, seeded};
use crate::room::{MathProblem, Room, WallType};
use crate::types::{CellPos, EntityId, Pos};

pub(crate) struct Harness {
    pub config: SimConfig,
    pub rng: SimRng,
    pub events: EventQueue,
    pub spawns: Vec<SpawnRequest>,
    pub strikes: Vec<WeaponStrike>,
    pub room: Room,
    pub clock: u64,
    pub input: PlayerInput,
    pub attack_value: u32,
}

impl Harness {
    /// Walled room with every side open and a `2 × 3` problem.
    pub fn new() -> Self {
        let config = SimConfig::default();
        let room = Room::new(
            CellPos::new(1, 1),
            [WallType::Open; 4],
            MathProblem::new(2, 3),
            RoomGeometry::default(),
        );
        Self {
            config,
            rng: seeded(0xC0FFEE),
            events: EventQueue::new(),
            spawns: Vec::new(),
            strikes: Vec::new(),
            room,
            clock: 0,
            input: PlayerInput::default(),
            attack_value: 0,
        }
    }

    /// Spawns an actor whose behaviour is switched off so tests drive it by hand.
    pub fn spawn_inert(&mut self, subtype: Subtype, pos: Pos) -> EntityId {
        let id = self.spawn(subtype, pos);
        if let Some(actor) = self.room.actor_mut(id) {
            actor.behavior = Behavior::None;
        }
        id
    }

    pub fn spawn(&mut self, subtype: Subtype, pos: Pos) -> EntityId {
        let request = SpawnRequest { pos, subtype, level: 1 };
        self.room.insert(Entity::from_spawn(request, &self.config))
    }

    pub fn actor(&self, id: EntityId) -> &Actor {
        self.room.actor(id).expect("actor should exist")
    }

    pub fn env(&mut self) -> SimEnv<'_> {
        SimEnv {
            clock: self.clock,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
            spawns: &mut self.spawns,
        }
    }

    /// Runs `f` against a detached copy of the actor, then writes it back.
    pub fn with_actor<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Actor, &mut SimEnv<'_>) -> R,
    ) -> R {
        let mut entity = self.room.entities[id].clone();
        let result = {
            let mut env = SimEnv {
                clock: self.clock,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.events,
                spawns: &mut self.spawns,
            };
            let actor = entity.as_actor_mut().expect("entity should be an actor");
            f(actor, &mut env)
        };
        self.room.entities[id] = entity;
        result
    }

    /// Mirrors the driver: tick a detached copy, then write it back.
    pub fn tick_actor(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.room.entities.get(id).cloned() else {
            return false;
        };
        let player = self
            .room
            .entities
            .iter()
            .find(|(_, entity)| entity.role() == Role::Player)
            .map(|(id, entity)| PlayerView { id, pos: entity.pos() });
        let alive = {
            let mut ctx = TickContext {
                env: SimEnv {
                    clock: self.clock,
                    config: &self.config,
                    rng: &mut self.rng,
                    events: &mut self.events,
                    spawns: &mut self.spawns,
                },
                room: &self.room,
                player,
                input: self.input,
                attack_value: self.attack_value,
                strikes: &mut self.strikes,
            };
            entity.tick(&mut ctx)
        };
        self.room.entities[id] = entity;
        alive
    }

    /// Advances the clock and ticks `id` that many times.
    pub fn run(&mut self, id: EntityId, ticks: u32) -> bool {
        let mut alive = true;
        for _ in 0..ticks {
            self.clock += 1;
            alive = self.tick_actor(id);
        }
        alive
    }

    pub fn damage(&mut self, id: EntityId, amount: i32, source: Pos) -> DamageOutcome {
        let mut env = SimEnv {
            clock: self.clock,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
            spawns: &mut self.spawns,
        };
        match self.room.actor_mut(id) {
            Some(actor) => actor.take_damage(amount, source, &mut env),
            None => DamageOutcome::Ignored,
        }
    }

    pub fn strike(&mut self, strike: &WeaponStrike) -> HitReport {
        let mut env = SimEnv {
            clock: self.clock,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.events,
            spawns: &mut self.spawns,
        };
        combat::resolve_weapon_hit(strike, &mut self.room, &mut env)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
