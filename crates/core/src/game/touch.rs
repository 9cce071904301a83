//! Cross-actor contact checks, run once every actor has moved for the tick.
//! Hostiles touching the player deal contact damage; the player touching a
//! pickup collects it.

use tracing::debug;

use super::*;
use crate::combat::within_box;
use crate::entity::PickupKind;

#[derive(Clone, Copy, Debug)]
enum Contact {
    Hostile { source: Pos, damage: i32 },
    Pickup { id: EntityId, kind: PickupKind },
}

impl Game {
    pub(super) fn resolve_touches(&mut self) {
        let Some(player) = self.room.actor(self.player_id) else {
            return;
        };
        if player.is_dying_or_dead() {
            return;
        }
        let player_pos = player.pos();
        let radius = self.config.touch_radius;

        let contacts: Vec<Contact> = self
            .room
            .entities
            .iter()
            .filter(|(id, entity)| {
                *id != self.player_id && within_box(entity.pos(), player_pos, radius)
            })
            .filter_map(|(id, entity)| match entity {
                Entity::Actor(actor)
                    if actor.core.subtype.is_hostile()
                        && !actor.is_dying_or_dead()
                        && actor.contact_damage > 0 =>
                {
                    Some(Contact::Hostile { source: actor.pos(), damage: actor.contact_damage })
                }
                Entity::Actor(_) => None,
                Entity::Pickup(pickup) => Some(Contact::Pickup { id, kind: pickup.kind }),
            })
            .collect();

        for contact in contacts {
            match contact {
                Contact::Hostile { source, damage } => self.contact_damage(source, damage),
                Contact::Pickup { id, kind } => self.collect_pickup(id, kind),
            }
        }
    }

    fn contact_damage(&mut self, source: Pos, damage: i32) {
        let mut env = SimEnv {
            clock: self.tick,
            config: &self.config,
            rng: &mut self.rng,
            events: &mut self.outbox,
            spawns: &mut self.pending_spawns,
        };
        let Some(player) = self.room.actor_mut(self.player_id) else {
            return;
        };
        let outcome = player.take_damage(damage, source, &mut env);
        debug!(?outcome, damage, hp = player.hp(), "contact damage");
    }

    /// A heart on a full-health player stays where it is.
    fn collect_pickup(&mut self, id: EntityId, kind: PickupKind) {
        let collected = match kind {
            PickupKind::Heart => {
                let heal = self.config.heart_heal;
                match self.room.actor_mut(self.player_id) {
                    Some(player) => player.heal(heal, &mut self.outbox),
                    None => false,
                }
            }
            PickupKind::Weapon => {
                self.item_found = true;
                if let Ok(cell) = self.plan.maze.cell_mut(self.room.cell) {
                    cell.item_collected = true;
                }
                self.room.unlock_doors();
                info!(cell = ?self.room.cell, "item found");
                true
            }
        };
        if !collected || self.room.remove(id).is_none() {
            return;
        }
        self.outbox.push(GameEvent::PickupCollected { entity: id, pickup: kind });
        self.outbox.push(GameEvent::Culled { entity: id });
    }
}
