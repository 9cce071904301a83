//! Health-bearing entities driven by a queue of state commands.
//! This module exists to own hp bookkeeping, the damage contract and grid
//! walking. Per-state enter/update/exit lives in `states`.
//! It does not own decision making; see `ai`.

use std::collections::VecDeque;

use tracing::trace;

use crate::ai::{self, Behavior, PlayerInput};
use crate::combat::WeaponStrike;
use crate::config::SimConfig;
use crate::content::{ActorStats, Role};
use crate::entity::{EntityCore, SpawnRequest};
use crate::events::{EventQueue, GameEvent};
use crate::rng::SimRng;
use crate::room::{MathProblem, Room};
use crate::types::{ALIGN_EPSILON, Direction, EntityId, Pos};

pub mod states;

pub use states::{StateCommand, StateKind};

/// Shared mutable services every state transition may touch.
pub struct SimEnv<'a> {
    pub clock: u64,
    pub config: &'a SimConfig,
    pub rng: &'a mut SimRng,
    pub events: &'a mut EventQueue,
    pub spawns: &'a mut Vec<SpawnRequest>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    pub id: EntityId,
    pub pos: Pos,
}

/// Everything an actor may read or emit during its tick.
/// The room is read-only: the actor being ticked is a detached copy.
pub struct TickContext<'a> {
    pub env: SimEnv<'a>,
    pub room: &'a Room,
    pub player: Option<PlayerView>,
    pub input: PlayerInput,
    pub attack_value: u32,
    pub strikes: &'a mut Vec<WeaponStrike>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dying, dead, invincible or a non-positive amount.
    Ignored,
    Hurt,
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// Arrived on a grid intersection.
    Complete,
    Blocked,
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub core: EntityCore,
    hp: i32,
    max_hp: i32,
    pub speed: f32,
    pub facing: Direction,
    pub blocking: bool,
    pub behavior: Behavior,
    pub contact_damage: i32,
    pub invincible_ticks: u32,
    invincible_until: u64,
    /// Replaces the room's problem when this actor is the defender.
    pub math_problem: Option<MathProblem>,
    queue: VecDeque<StateCommand>,
}

impl Actor {
    /// Starts Idle, which means snapped to the grid.
    pub fn new(mut core: EntityCore, stats: ActorStats, grid: f32) -> Self {
        core.pos = core.pos.snapped(grid);
        let max_hp = stats.hp.max(1);
        Self {
            core,
            hp: max_hp,
            max_hp,
            speed: stats.speed,
            facing: Direction::South,
            blocking: stats.blocking,
            behavior: stats.behavior,
            contact_damage: stats.contact_damage,
            invincible_ticks: 0,
            invincible_until: 0,
            math_problem: None,
            queue: VecDeque::from([StateCommand::Idle]),
        }
    }

    pub fn id(&self) -> EntityId {
        self.core.id
    }

    pub fn pos(&self) -> Pos {
        self.core.pos
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_player(&self) -> bool {
        self.core.role() == Role::Player
    }

    pub fn current_state(&self) -> Option<&StateCommand> {
        self.queue.front()
    }

    pub fn state(&self) -> StateKind {
        self.queue.front().map_or(StateKind::Idle, StateCommand::kind)
    }

    pub fn queued(&self) -> impl Iterator<Item = &StateCommand> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Idle with nothing pending: the only moment decisions are made.
    pub fn is_awaiting_decision(&self) -> bool {
        self.state() == StateKind::Idle && self.queue.len() == 1
    }

    pub fn is_dead(&self) -> bool {
        self.state() == StateKind::Dead
    }

    pub fn is_dying_or_dead(&self) -> bool {
        matches!(self.state(), StateKind::Dying | StateKind::Dead)
    }

    pub fn is_invincible(&self, clock: u64) -> bool {
        clock < self.invincible_until
    }

    /// The only hp mutator. Clamps to `0..=max_hp` and reports real changes.
    pub fn set_hp(&mut self, value: i32, events: &mut EventQueue) -> bool {
        let clamped = value.clamp(0, self.max_hp);
        if clamped == self.hp {
            return false;
        }
        self.hp = clamped;
        events.push(GameEvent::HealthChanged {
            entity: self.core.id,
            hp: self.hp,
            max_hp: self.max_hp,
        });
        true
    }

    /// False when `amount` is not positive or hp is already full.
    pub fn heal(&mut self, amount: i32, events: &mut EventQueue) -> bool {
        if amount <= 0 || self.hp >= self.max_hp {
            return false;
        }
        self.set_hp(self.hp + amount, events)
    }

    /// Abandons whatever was queued and starts Knockback away from `source`,
    /// or Dying when hp reaches zero.
    pub fn take_damage(&mut self, amount: i32, source: Pos, env: &mut SimEnv<'_>) -> DamageOutcome {
        if amount <= 0 || self.is_dying_or_dead() || self.is_invincible(env.clock) {
            return DamageOutcome::Ignored;
        }
        self.set_hp(self.hp - amount, env.events);
        env.events.push(GameEvent::Hurt { entity: self.core.id, amount });
        self.invincible_until = env.clock + u64::from(self.invincible_ticks);

        self.queue.clear();
        if self.hp == 0 {
            self.queue.push_back(StateCommand::dying(env.config));
            self.enter_state(env);
            DamageOutcome::Killed
        } else {
            let knockback = StateCommand::knockback(source, self.core.pos, env.config);
            self.queue.push_back(knockback);
            self.enter_state(env);
            DamageOutcome::Hurt
        }
    }

    pub fn face(&mut self, dir: Direction) {
        self.facing = dir;
    }

    /// Faces the axis with the larger remaining offset, keeping the current
    /// axis on ties. Between grid lines only the current axis may be used.
    pub fn face_toward(&mut self, target: Pos, grid: f32) {
        let dx = target.x - self.core.pos.x;
        let dy = target.y - self.core.pos.y;
        if dx.abs() <= ALIGN_EPSILON && dy.abs() <= ALIGN_EPSILON {
            return;
        }
        let horizontal = if !self.core.pos.is_grid_aligned(grid) {
            self.facing.is_horizontal()
        } else if dx.abs() == dy.abs() {
            self.facing.is_horizontal()
        } else {
            dx.abs() > dy.abs()
        };
        self.facing = if horizontal {
            Direction::horizontal_toward(dx)
        } else {
            Direction::vertical_toward(dy)
        };
    }

    pub fn facing_leads_toward(&self, target: Pos) -> bool {
        let (fx, fy) = self.facing.delta();
        (target.x - self.core.pos.x) * fx + (target.y - self.core.pos.y) * fy > ALIGN_EPSILON
    }

    pub fn snap_to_grid(&mut self, grid: f32) {
        self.core.pos = self.core.pos.snapped(grid);
    }

    /// One `speed` step along the facing. On a grid intersection the whole
    /// next cell must be passable first.
    pub fn walk(&mut self, room: &Room) -> MoveResult {
        let grid = room.grid_size();
        if self.core.pos.is_grid_aligned(grid) {
            self.snap_to_grid(grid);
            let ahead = self.core.pos.step(self.facing, grid);
            if !room.is_passable(ahead, self.is_player(), &[self.core.id]) {
                return MoveResult::Blocked;
            }
        }
        self.core.pos = self.core.pos.step(self.facing, self.speed);
        if self.core.pos.is_grid_aligned(grid) {
            MoveResult::Complete
        } else {
            MoveResult::Moved
        }
    }

    /// Appends a command; an empty queue enters it immediately.
    pub fn push_state(&mut self, command: StateCommand, env: &mut SimEnv<'_>) {
        if self.is_dying_or_dead() {
            return;
        }
        self.queue.push_back(command);
        if self.queue.len() == 1 {
            self.enter_state(env);
        }
    }

    /// Puts a command ahead of the current one and enters it. The interrupted
    /// command resumes once this one finishes.
    pub fn push_priority(&mut self, command: StateCommand, env: &mut SimEnv<'_>) {
        if self.is_dying_or_dead() {
            return;
        }
        self.queue.push_front(command);
        self.enter_state(env);
    }

    /// Exits the head, then enters the next one (Idle when nothing is queued).
    /// No-op on an empty queue or once Dead.
    pub fn finish_state(&mut self, env: &mut SimEnv<'_>) {
        if matches!(self.queue.front(), None | Some(StateCommand::Dead)) {
            return;
        }
        let Some(finished) = self.queue.pop_front() else {
            return;
        };
        self.exit_state(finished, env);
        if self.queue.is_empty() {
            self.queue.push_back(StateCommand::Idle);
        }
        self.enter_state(env);
    }

    /// Decide (when applicable) then update the head. Returns false once Dead.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if self.is_dead() {
            return false;
        }
        ai::decide(self, ctx);
        self.update_state(ctx);
        trace!(entity = ?self.core.id, state = ?self.state(), x = self.core.pos.x, y = self.core.pos.y, "actor ticked");
        !self.is_dead()
    }

    /// Drops every queued command and rests on the grid. Used when the driver
    /// moves an actor between rooms.
    pub(crate) fn reset_to_idle(&mut self, pos: Pos, grid: f32) {
        self.queue.clear();
        self.queue.push_back(StateCommand::Idle);
        self.core.pos = pos.snapped(grid);
    }

    fn replace_head(&mut self, command: StateCommand) {
        if let Some(head) = self.queue.front_mut() {
            *head = command;
        }
    }
}
