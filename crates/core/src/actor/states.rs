//! State commands and their enter/update/exit behaviour.
//! Each variant carries only the payload its state needs.

use serde::Serialize;
use tracing::{debug, trace};

use super::*;
use crate::content::Subtype;
use crate::rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateCommand {
    Idle,
    /// Walk to a grid intersection one axis at a time.
    Move { target: Pos, steps_taken: u32 },
    Knockback { direction: Direction, remaining: f32 },
    /// `ends_at` is set on entry.
    Attack { ends_at: u64 },
    Wait { remaining: u32 },
    Dying { remaining: u32 },
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Idle,
    Move,
    Knockback,
    Attack,
    Wait,
    Dying,
    Dead,
}

impl StateCommand {
    pub fn kind(&self) -> StateKind {
        match self {
            StateCommand::Idle => StateKind::Idle,
            StateCommand::Move { .. } => StateKind::Move,
            StateCommand::Knockback { .. } => StateKind::Knockback,
            StateCommand::Attack { .. } => StateKind::Attack,
            StateCommand::Wait { .. } => StateKind::Wait,
            StateCommand::Dying { .. } => StateKind::Dying,
            StateCommand::Dead => StateKind::Dead,
        }
    }

    pub fn move_to(target: Pos) -> Self {
        StateCommand::Move { target, steps_taken: 0 }
    }

    pub fn wait(ticks: u32) -> Self {
        StateCommand::Wait { remaining: ticks }
    }

    pub fn attack() -> Self {
        StateCommand::Attack { ends_at: 0 }
    }

    pub fn dying(config: &SimConfig) -> Self {
        StateCommand::Dying { remaining: config.dying_ticks }
    }

    /// Push away from `source` along the dominant axis of the offset.
    /// Ties (including a zero offset) push vertically.
    pub fn knockback(source: Pos, actor: Pos, config: &SimConfig) -> Self {
        let dx = actor.x - source.x;
        let dy = actor.y - source.y;
        let direction = if dx.abs() > dy.abs() {
            Direction::horizontal_toward(dx)
        } else {
            Direction::vertical_toward(dy)
        };
        StateCommand::Knockback { direction, remaining: config.knockback_distance }
    }
}

impl Actor {
    pub(super) fn enter_state(&mut self, env: &mut SimEnv<'_>) {
        let Some(head) = self.queue.front().copied() else {
            return;
        };
        trace!(entity = ?self.core.id, state = ?head.kind(), "enter state");
        let grid = env.config.room.grid_size;
        match head {
            StateCommand::Idle => self.snap_to_grid(grid),
            StateCommand::Move { target, .. } => self.face_toward(target, grid),
            StateCommand::Attack { .. } => {
                let ends_at = env.clock + u64::from(env.config.attack_ticks);
                self.replace_head(StateCommand::Attack { ends_at });
                env.events.push(GameEvent::AttackStarted {
                    entity: self.core.id,
                    facing: self.facing,
                });
            }
            StateCommand::Dying { .. } => {
                self.queue.truncate(1);
                self.queue.push_back(StateCommand::Dead);
            }
            StateCommand::Dead => self.on_death(env),
            // Pushed away, still facing whatever hit it.
            StateCommand::Knockback { direction, .. } => self.facing = direction.opposite(),
            StateCommand::Wait { .. } => {}
        }
    }

    pub(super) fn exit_state(&mut self, finished: StateCommand, env: &mut SimEnv<'_>) {
        if let StateCommand::Knockback { direction, .. } = finished {
            self.core.pos = self.core.pos.snapped_behind(direction, env.config.room.grid_size);
        }
    }

    pub(super) fn update_state(&mut self, ctx: &mut TickContext<'_>) {
        let Some(head) = self.queue.front().copied() else {
            return;
        };
        match head {
            StateCommand::Idle => {
                if self.queue.len() > 1 {
                    self.finish_state(&mut ctx.env);
                }
            }
            StateCommand::Move { target, steps_taken } => {
                self.update_move(target, steps_taken, ctx);
            }
            StateCommand::Knockback { direction, remaining } => {
                self.update_knockback(direction, remaining, ctx);
            }
            StateCommand::Attack { ends_at } => {
                if ctx.env.clock >= ends_at {
                    self.finish_state(&mut ctx.env);
                }
            }
            StateCommand::Wait { remaining } => {
                let remaining = remaining.saturating_sub(1);
                self.replace_head(StateCommand::Wait { remaining });
                if remaining == 0 {
                    self.finish_state(&mut ctx.env);
                }
            }
            StateCommand::Dying { remaining } => {
                let remaining = remaining.saturating_sub(1);
                self.replace_head(StateCommand::Dying { remaining });
                if remaining == 0 {
                    self.finish_state(&mut ctx.env);
                }
            }
            StateCommand::Dead => {}
        }
    }

    fn update_move(&mut self, target: Pos, mut steps_taken: u32, ctx: &mut TickContext<'_>) {
        let grid = ctx.room.grid_size();
        if self.has_reached(target, grid) {
            self.core.pos = target.snapped(grid);
            self.finish_state(&mut ctx.env);
            return;
        }
        if self.core.pos.is_grid_aligned(grid)
            && (steps_taken >= 2 || !self.facing_leads_toward(target))
        {
            self.face_toward(target, grid);
            steps_taken = 0;
        }
        let result = self.walk(ctx.room);
        match result {
            MoveResult::Blocked => {
                self.snap_to_grid(grid);
                self.finish_state(&mut ctx.env);
            }
            MoveResult::Moved | MoveResult::Complete => {
                // Only cell arrivals count toward the two-step turn cadence.
                if result == MoveResult::Complete {
                    steps_taken += 1;
                }
                self.replace_head(StateCommand::Move { target, steps_taken });
                if self.has_reached(target, grid) {
                    self.core.pos = target.snapped(grid);
                    self.finish_state(&mut ctx.env);
                }
            }
        }
    }

    fn has_reached(&self, target: Pos, grid: f32) -> bool {
        self.core.pos.is_grid_aligned(grid)
            && (self.core.pos.x - target.x).abs() <= 1.0
            && (self.core.pos.y - target.y).abs() <= 1.0
    }

    /// Blocked steps still consume distance; the actor just stays put.
    fn update_knockback(&mut self, direction: Direction, remaining: f32, ctx: &mut TickContext<'_>) {
        let step = ctx.env.config.knockback_step;
        if remaining < step {
            self.finish_state(&mut ctx.env);
            return;
        }
        let next = self.core.pos.step(direction, step);
        if ctx.room.is_passable(next, self.is_player(), &[self.core.id]) {
            self.core.pos = next;
        }
        self.replace_head(StateCommand::Knockback { direction, remaining: remaining - step });
    }

    fn on_death(&mut self, env: &mut SimEnv<'_>) {
        let entity = self.core.id;
        let subtype = self.core.subtype;
        debug!(?entity, ?subtype, "actor died");
        env.events.push(GameEvent::Died { entity, subtype });
        match self.core.role() {
            Role::Boss => env.events.push(GameEvent::BossDied { entity, subtype }),
            Role::Enemy if rng::chance(env.rng, env.config.heart_drop_chance) => {
                env.spawns.push(SpawnRequest {
                    pos: self.core.pos.snapped(env.config.room.grid_size),
                    subtype: Subtype::Heart,
                    level: 0,
                });
            }
            _ => {}
        }
    }
}
