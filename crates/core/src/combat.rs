//! Math-gated weapon hits.
//! A strike only lands when the attacker's encoded attack value equals the
//! defender's live problem answer. A mismatch is a silent miss.

use serde::Serialize;
use tracing::debug;

use crate::actor::{DamageOutcome, SimEnv};
use crate::content::Role;
use crate::room::Room;
use crate::types::{Direction, EntityId, Pos};

/// Player selections that encode the attack value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Loadout {
    pub weapon: u8,
    pub item: u8,
    pub triforce: u8,
}

impl Loadout {
    /// `triforce × 100 + weapon × 10 + item`.
    pub fn attack_value(&self) -> u32 {
        u32::from(self.triforce) * 100 + u32::from(self.weapon) * 10 + u32::from(self.item)
    }
}

/// Weapon tiers unlocked at `level`. Finding the item unlocks tier
/// `level + 1`, the tens digit of the boss answer.
pub fn weapons_available(level: u32, item_found: bool) -> u8 {
    (level + 1 + u32::from(item_found)).min(10) as u8
}

pub const ITEMS_AVAILABLE: u8 = 10;

/// Highest selectable piece count. Follows the weapon rule one digit up, so
/// the hundreds digit of a boss answer is reachable once the item is found.
pub fn triforce_available(level: u32, item_found: bool) -> u8 {
    (i64::from(level) + 1 + i64::from(item_found) - 10).clamp(0, 9) as u8
}

/// A swing recorded during the attacker's tick and resolved after all moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStrike {
    pub attacker: EntityId,
    pub origin: Pos,
    pub facing: Direction,
    pub value: u32,
    pub damage: i32,
}

impl WeaponStrike {
    pub fn hit_point(&self, reach: f32) -> Pos {
        self.origin.step(self.facing, reach)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: Vec<EntityId>,
    pub killed: Vec<EntityId>,
    /// Defenders in range whose answer did not match.
    pub misses: Vec<EntityId>,
}

/// Applies `strike` to every hostile whose centre lies inside the hit box
/// around the weapon tip.
pub fn resolve_weapon_hit(strike: &WeaponStrike, room: &mut Room, env: &mut SimEnv<'_>) -> HitReport {
    let tip = strike.hit_point(env.config.weapon_reach);
    let radius = env.config.hit_radius;
    let room_problem = room.math_problem;

    let in_range: Vec<EntityId> = room
        .entities
        .iter()
        .filter(|(id, entity)| {
            *id != strike.attacker
                && matches!(entity.role(), Role::Enemy | Role::Boss)
                && within_box(entity.pos(), tip, radius)
        })
        .map(|(id, _)| id)
        .collect();

    let mut report = HitReport::default();
    for id in in_range {
        let Some(defender) = room.actor_mut(id) else {
            continue;
        };
        let problem = defender.math_problem.unwrap_or(room_problem);
        if !problem.is_solved_by(strike.value) {
            report.misses.push(id);
            continue;
        }
        match defender.take_damage(strike.damage, strike.origin, env) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => report.hits.push(id),
            DamageOutcome::Killed => {
                report.hits.push(id);
                report.killed.push(id);
            }
        }
    }
    debug!(value = strike.value, answer = room_problem.answer(), hits = report.hits.len(), misses = report.misses.len(), "weapon strike resolved");
    report
}

/// Axis-aligned box test: both offsets strictly under `radius`.
pub fn within_box(a: Pos, b: Pos, radius: f32) -> bool {
    (a.x - b.x).abs() < radius && (a.y - b.y).abs() < radius
}
