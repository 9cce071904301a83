//! Decision functions that queue state commands.
//! Hostile behaviours only run while the actor is Idle with nothing pending,
//! so they never preempt Knockback or an attack.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::actor::{Actor, StateCommand, StateKind, TickContext};
use crate::combat::WeaponStrike;
use crate::rng;
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    PlayerInput,
    RandomWander,
    ChasePlayer,
    #[default]
    None,
}

/// Held buttons for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

impl PlayerInput {
    /// Down beats up beats left beats right.
    pub fn direction(&self) -> Option<Direction> {
        if self.down {
            Some(Direction::South)
        } else if self.up {
            Some(Direction::North)
        } else if self.left {
            Some(Direction::West)
        } else if self.right {
            Some(Direction::East)
        } else {
            None
        }
    }
}

pub fn decide(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    match actor.behavior {
        Behavior::PlayerInput => player_input(actor, ctx),
        Behavior::RandomWander if actor.is_awaiting_decision() => random_wander(actor, ctx),
        Behavior::ChasePlayer if actor.is_awaiting_decision() => chase_player(actor, ctx),
        _ => {}
    }
}

fn player_input(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let input = ctx.input;
    let busy = matches!(
        actor.state(),
        StateKind::Attack | StateKind::Knockback | StateKind::Dying | StateKind::Dead
    );
    if input.attack && !busy {
        actor.push_priority(StateCommand::attack(), &mut ctx.env);
        ctx.strikes.push(WeaponStrike {
            attacker: actor.id(),
            origin: actor.pos(),
            facing: actor.facing,
            value: ctx.attack_value,
            damage: ctx.env.config.weapon_damage,
        });
        return;
    }
    if !actor.is_awaiting_decision() {
        return;
    }
    if let Some(dir) = input.direction() {
        let grid = ctx.room.grid_size();
        actor.face(dir);
        let target = actor.pos().snapped(grid).step(dir, grid);
        actor.push_state(StateCommand::move_to(target), &mut ctx.env);
    }
}

/// Move to a random grid intersection of the floor, then pause.
pub fn random_wander(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let lines = ctx.room.geometry.grid_lines();
    let (Some(&x), Some(&y)) = (rng::pick(ctx.env.rng, &lines), rng::pick(ctx.env.rng, &lines))
    else {
        return;
    };
    let target = Pos::new(x, y);
    let config = ctx.env.config;
    let pause = rng::range_u32(ctx.env.rng, config.wander_wait_min, config.wander_wait_max);
    trace!(entity = ?actor.id(), x, y, pause, "wander");
    actor.push_state(StateCommand::move_to(target), &mut ctx.env);
    actor.push_state(StateCommand::wait(pause), &mut ctx.env);
}

/// Step one cell toward the player along the dominant axis, falling back to
/// the other axis, or wait when adjacent or boxed in.
pub fn chase_player(actor: &mut Actor, ctx: &mut TickContext<'_>) {
    let config = ctx.env.config;
    let grid = ctx.room.grid_size();
    let Some(player) = ctx.player else {
        actor.push_state(StateCommand::wait(config.chase_wait), &mut ctx.env);
        return;
    };
    let here = actor.pos().snapped(grid);
    let dx = player.pos.x - here.x;
    let dy = player.pos.y - here.y;
    if dx.abs() < grid && dy.abs() < grid {
        actor.push_state(StateCommand::wait(config.chase_wait), &mut ctx.env);
        return;
    }

    let horizontal = Direction::horizontal_toward(dx);
    let vertical = Direction::vertical_toward(dy);
    let mut candidates = Vec::with_capacity(2);
    if dx.abs() >= dy.abs() {
        candidates.push(horizontal);
        if dy != 0.0 {
            candidates.push(vertical);
        }
    } else {
        candidates.push(vertical);
        if dx != 0.0 {
            candidates.push(horizontal);
        }
    }

    for dir in candidates {
        let next = here.step(dir, grid);
        if ctx.room.is_passable(next, false, &[actor.id()]) {
            actor.push_state(StateCommand::move_to(next), &mut ctx.env);
            return;
        }
    }
    actor.push_state(StateCommand::wait(config.chase_wait), &mut ctx.env);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Subtype;
    use crate::test_support::Harness;

    #[test]
    fn input_direction_priority_prefers_down_then_up_then_left() {
        let all = PlayerInput { up: true, down: true, left: true, right: true, attack: false };
        assert_eq!(all.direction(), Some(Direction::South));
        let no_down = PlayerInput { down: false, ..all };
        assert_eq!(no_down.direction(), Some(Direction::North));
        let sideways = PlayerInput { left: true, right: true, ..PlayerInput::default() };
        assert_eq!(sideways.direction(), Some(Direction::West));
        assert_eq!(PlayerInput::default().direction(), None);
    }

    #[test]
    fn wanderer_queues_a_move_then_a_pause() {
        let mut harness = Harness::new();
        let id = harness.spawn(Subtype::Moblin, Pos::new(128.0, 128.0));
        harness.tick_actor(id);

        let actor = harness.actor(id);
        let queued: Vec<StateKind> = actor.queued().map(StateCommand::kind).collect();
        assert_eq!(queued, vec![StateKind::Move, StateKind::Wait]);
        let Some(StateCommand::Wait { remaining }) = actor.queued().nth(1).copied() else {
            panic!("expected a pause after the move");
        };
        assert!((harness.config.wander_wait_min..=harness.config.wander_wait_max).contains(&remaining));
    }

    #[test]
    fn chaser_steps_along_the_dominant_axis() {
        let mut harness = Harness::new();
        harness.spawn_inert(Subtype::Link, Pos::new(128.0, 64.0));
        let id = harness.spawn(Subtype::Gel, Pos::new(96.0, 160.0));
        harness.tick_actor(id);

        let Some(StateCommand::Move { target, .. }) = harness.actor(id).current_state().copied()
        else {
            panic!("expected a move");
        };
        assert_eq!(target, Pos::new(96.0, 144.0));
    }

    #[test]
    fn chaser_falls_back_to_the_other_axis_when_blocked() {
        let mut harness = Harness::new();
        harness.spawn_inert(Subtype::Link, Pos::new(128.0, 64.0));
        harness.spawn_inert(Subtype::Darknut, Pos::new(96.0, 144.0));
        let id = harness.spawn(Subtype::Gel, Pos::new(96.0, 160.0));
        harness.tick_actor(id);

        let Some(StateCommand::Move { target, .. }) = harness.actor(id).current_state().copied()
        else {
            panic!("expected a move");
        };
        assert_eq!(target, Pos::new(112.0, 160.0));
    }

    #[test]
    fn chaser_next_to_the_player_waits() {
        let mut harness = Harness::new();
        harness.spawn_inert(Subtype::Link, Pos::new(128.0, 128.0));
        let id = harness.spawn(Subtype::Gel, Pos::new(128.0, 128.0));
        harness.tick_actor(id);
        assert_eq!(harness.actor(id).state(), StateKind::Wait);
    }
}
