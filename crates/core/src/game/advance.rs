//! Per-tick sequencing and stop-reason handling for the game driver.
//! Order within a tick: every actor decides and moves, queued weapon strikes
//! resolve against post-move positions, the touch pass runs, dead actors are
//! culled, then room lifecycle checks run and the outbox is published.

use tracing::{trace, warn};

use super::*;

enum TickOutcome {
    Continue,
    PlayerDefeated,
    LevelCompleted(u32),
}

impl Game {
    pub fn advance(&mut self, max_ticks: u32) -> AdvanceResult {
        let mut ticks = 0;
        if self.defeated {
            return AdvanceResult {
                simulated_ticks: 0,
                stop_reason: AdvanceStopReason::PlayerDefeated,
            };
        }

        while ticks < max_ticks {
            let outcome = self.step();
            self.tick += 1;
            ticks += 1;
            self.flush_events();

            let stop_reason = match outcome {
                Ok(TickOutcome::Continue) => continue,
                Ok(TickOutcome::PlayerDefeated) => AdvanceStopReason::PlayerDefeated,
                Ok(TickOutcome::LevelCompleted(level)) => {
                    AdvanceStopReason::LevelCompleted { level }
                }
                Err(err) => {
                    warn!(%err, level = self.plan.level, "level transition failed");
                    AdvanceStopReason::LevelGenerationFailed
                }
            };
            return AdvanceResult { simulated_ticks: ticks, stop_reason };
        }
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    fn step(&mut self) -> Result<TickOutcome, SimError> {
        let strikes = self.tick_entities();
        self.resolve_strikes(strikes);
        self.resolve_touches();
        if self.cull_dead() {
            return Ok(TickOutcome::PlayerDefeated);
        }
        self.flush_spawns();
        self.update_lock();
        if let Some(level) = self.check_room_clear()? {
            return Ok(TickOutcome::LevelCompleted(level));
        }
        self.check_transition()?;
        Ok(TickOutcome::Continue)
    }

    /// Each entity ticks on a detached copy so it can read the room while it
    /// changes itself; the copy is written back afterwards.
    fn tick_entities(&mut self) -> Vec<WeaponStrike> {
        let attack_value = self.loadout.attack_value();
        let ids: Vec<EntityId> = self.room.entities.keys().collect();
        let mut strikes = Vec::new();

        for id in ids {
            let Some(mut entity) = self.room.entities.get(id).cloned() else {
                continue;
            };
            let player = self
                .room
                .actor(self.player_id)
                .map(|player| PlayerView { id: player.id(), pos: player.pos() });
            let mut ctx = TickContext {
                env: SimEnv {
                    clock: self.tick,
                    config: &self.config,
                    rng: &mut self.rng,
                    events: &mut self.outbox,
                    spawns: &mut self.pending_spawns,
                },
                room: &self.room,
                player,
                input: self.input,
                attack_value,
                strikes: &mut strikes,
            };
            entity.tick(&mut ctx);
            if let Some(slot) = self.room.entities.get_mut(id) {
                *slot = entity;
            }
        }
        strikes
    }

    fn resolve_strikes(&mut self, strikes: Vec<WeaponStrike>) {
        for strike in strikes {
            let mut env = SimEnv {
                clock: self.tick,
                config: &self.config,
                rng: &mut self.rng,
                events: &mut self.outbox,
                spawns: &mut self.pending_spawns,
            };
            let report = combat::resolve_weapon_hit(&strike, &mut self.room, &mut env);
            trace!(attacker = ?strike.attacker, hits = report.hits.len(), killed = report.killed.len(), "strike applied");
        }
    }

    /// Removes Dead hostiles. The player is never removed; reaching Dead marks
    /// the run defeated instead. Returns true on that transition.
    fn cull_dead(&mut self) -> bool {
        let dead: Vec<EntityId> = self
            .room
            .entities
            .iter()
            .filter(|(_, entity)| entity.as_actor().is_some_and(Actor::is_dead))
            .map(|(id, _)| id)
            .collect();

        let mut defeated = false;
        for id in dead {
            if id == self.player_id {
                if !self.defeated {
                    self.defeated = true;
                    defeated = true;
                    self.outbox.push(GameEvent::PlayerDied);
                    info!(level = self.plan.level, tick = self.tick, "player defeated");
                }
                continue;
            }
            if self.room.remove(id).is_some() {
                self.outbox.push(GameEvent::Culled { entity: id });
            }
        }
        defeated
    }
}
