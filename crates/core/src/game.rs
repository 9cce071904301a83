//! The game driver: owns the RNG, the current level plan and room, and the
//! player's loadout, and advances the simulation one fixed tick at a time.
//! Submodules split tick sequencing, room lifecycle, touch resolution and hashing.

use std::mem;

use tracing::info;

use crate::actor::{Actor, PlayerView, SimEnv, TickContext};
use crate::ai::PlayerInput;
use crate::combat::{self, ITEMS_AVAILABLE, Loadout, WeaponStrike};
use crate::config::SimConfig;
use crate::content::{Role, Subtype};
use crate::entity::{Entity, SpawnRequest};
use crate::error::SimError;
use crate::events::{EventBus, EventQueue, GameEvent};
use crate::level::LevelPlan;
use crate::mapgen::Maze;
use crate::rng::{self, SimRng};
use crate::room::{Room, WallType};
use crate::types::{CellPos, Direction, EntityId, Pos};

mod advance;
mod hash;
mod rooms;
mod snapshot;
mod touch;

pub use snapshot::{EntitySnapshot, RoomSnapshot};

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    BudgetExhausted,
    PlayerDefeated,
    LevelCompleted { level: u32 },
    /// The next level's maze could not be generated.
    LevelGenerationFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

pub struct Game {
    seed: u64,
    tick: u64,
    config: SimConfig,
    rng: SimRng,
    plan: LevelPlan,
    room: Room,
    player_id: EntityId,
    player_subtype: Subtype,
    loadout: Loadout,
    item_found: bool,
    input: PlayerInput,
    outbox: EventQueue,
    log: Vec<GameEvent>,
    bus: EventBus,
    pending_spawns: Vec<SpawnRequest>,
    defeated: bool,
}

impl Game {
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, SimError> {
        Self::with_player(seed, config, Subtype::Link)
    }

    pub fn with_player(seed: u64, config: SimConfig, player: Subtype) -> Result<Self, SimError> {
        config.validate()?;
        if player.role() != Role::Player {
            return Err(SimError::InvalidConfig(format!("{player:?} cannot be the player")));
        }
        let mut rng = rng::seeded(seed);
        let plan = LevelPlan::generate(1, &config, &mut rng)?;
        let start = plan.maze.start;
        let room = Room::from_maze(&plan.maze, start, plan.problem(start)?, config.room, false);
        let mut game = Self {
            seed,
            tick: 0,
            config,
            rng,
            plan,
            room,
            player_id: EntityId::default(),
            player_subtype: player,
            loadout: Loadout::default(),
            item_found: false,
            input: PlayerInput::default(),
            outbox: EventQueue::new(),
            log: Vec::new(),
            bus: EventBus::new(),
            pending_spawns: Vec::new(),
            defeated: false,
        };
        let fresh = game.fresh_player()?;
        let center = game.room_center();
        game.load_room(start, Pos::new(center, center), fresh)?;
        game.outbox.push(GameEvent::LevelChanged { level: 1 });
        game.flush_events();
        info!(seed, "game started");
        Ok(game)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.plan.level
    }

    pub fn maze(&self) -> &Maze {
        &self.plan.maze
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player(&self) -> Option<&Actor> {
        self.room.actor(self.player_id)
    }

    pub fn loadout(&self) -> Loadout {
        self.loadout
    }

    pub fn item_found(&self) -> bool {
        self.item_found
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Selecting a locked tier is a miss, not an error.
    pub fn select_weapon(&mut self, tier: u8) -> bool {
        if tier >= combat::weapons_available(self.plan.level, self.item_found) {
            return false;
        }
        self.loadout.weapon = tier;
        true
    }

    pub fn select_item(&mut self, tier: u8) -> bool {
        if tier >= ITEMS_AVAILABLE {
            return false;
        }
        self.loadout.item = tier;
        true
    }

    pub fn select_triforce(&mut self, pieces: u8) -> bool {
        if pieces > combat::triforce_available(self.plan.level, self.item_found) {
            return false;
        }
        self.loadout.triforce = pieces;
        true
    }

    /// Creates an entity in the current room.
    pub fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        self.room.insert(Entity::from_spawn(request, &self.config))
    }

    /// Drains every event published since the last call.
    pub fn events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.log)
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Rebuilds the current level with a fresh maze and a full-health player.
    pub fn restart_level(&mut self) -> Result<(), SimError> {
        let level = self.plan.level;
        info!(level, "restarting level");
        self.defeated = false;
        let fresh = self.fresh_player()?;
        self.start_level(level, fresh)?;
        self.flush_events();
        Ok(())
    }

    fn fresh_player(&self) -> Result<Actor, SimError> {
        let center = self.room_center();
        let request = SpawnRequest {
            pos: Pos::new(center, center),
            subtype: self.player_subtype,
            level: self.plan.level,
        };
        match Entity::from_spawn(request, &self.config) {
            Entity::Actor(actor) => Ok(actor),
            Entity::Pickup(_) => Err(SimError::InvalidConfig(format!(
                "{:?} cannot be the player",
                self.player_subtype
            ))),
        }
    }

    fn room_center(&self) -> f32 {
        self.config.room.center()
    }

    /// Moves queued outbox events onto the bus and into the drainable log.
    fn flush_events(&mut self) {
        for event in self.outbox.drain() {
            self.bus.publish(&event);
            self.log.push(event);
        }
    }
}
