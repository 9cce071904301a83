//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from tick sequencing.
//! It does not own event publication or room lifecycle.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.plan.level);
        hasher.write_i32(self.room.cell.x);
        hasher.write_i32(self.room.cell.y);
        hasher.write_u8(self.loadout.weapon);
        hasher.write_u8(self.loadout.item);
        hasher.write_u8(self.loadout.triforce);
        hasher.write_u8(u8::from(self.item_found));
        hasher.write_u8(u8::from(self.defeated));
        hasher.write_u32(self.room.math_problem.answer());
        for wall in self.room.walls() {
            hasher.write_u8(wall as u8);
        }
        for (cell_pos, cell) in self.plan.maze.cells() {
            if cell.cleared || cell.item_collected {
                hasher.write_i32(cell_pos.x);
                hasher.write_i32(cell_pos.y);
                hasher.write_u8(u8::from(cell.cleared) | (u8::from(cell.item_collected) << 1));
            }
        }

        hasher.write_usize(self.room.entities.len());
        for entity in self.room.entities.values() {
            let pos = entity.pos();
            hasher.write_u32(pos.x.to_bits());
            hasher.write_u32(pos.y.to_bits());
            hasher.write_u8(entity.core().subtype as u8);
            if let Some(actor) = entity.as_actor() {
                hasher.write_i32(actor.hp());
                hasher.write_u8(actor.state() as u8);
                hasher.write_u8(actor.facing as u8);
            }
        }
        hasher.finish()
    }
}
