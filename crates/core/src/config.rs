//! Tunable simulation constants, loadable from TOML.
//! Every constructor path goes through `validate` so the rest of the core can
//! rely on a consistent grid and room geometry.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SimError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub maze_size: usize,
    pub room: RoomGeometry,
    pub touch_radius: f32,
    pub weapon_reach: f32,
    pub hit_radius: f32,
    pub weapon_damage: i32,
    pub knockback_distance: f32,
    pub knockback_step: f32,
    pub attack_ticks: u32,
    pub dying_ticks: u32,
    pub player_invincible_ticks: u32,
    pub heart_drop_chance: f64,
    pub heart_heal: i32,
    pub wander_wait_min: u32,
    pub wander_wait_max: u32,
    pub chase_wait: u32,
    pub enemies_per_room_min: u32,
    pub enemies_per_room_max: u32,
    pub player_hp: i32,
    pub player_speed: f32,
}

/// Room geometry shared by every room of a run.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomGeometry {
    pub room_size: f32,
    pub wall_thickness: f32,
    pub grid_size: f32,
    pub footprint: f32,
    /// Distance from the outer edge at which a doorway crossing changes rooms.
    pub exit_band: f32,
}

impl Default for RoomGeometry {
    fn default() -> Self {
        Self {
            room_size: 256.0,
            wall_thickness: 32.0,
            grid_size: 16.0,
            footprint: 16.0,
            exit_band: 16.0,
        }
    }
}

impl RoomGeometry {
    pub fn floor_size(&self) -> f32 {
        self.room_size - 2.0 * self.wall_thickness
    }

    pub fn center(&self) -> f32 {
        self.room_size / 2.0
    }

    /// Lowest legal centre coordinate inside the floor rectangle.
    pub fn interior_min(&self) -> f32 {
        self.wall_thickness + self.footprint / 2.0
    }

    /// Highest legal centre coordinate inside the floor rectangle.
    pub fn interior_max(&self) -> f32 {
        self.room_size - self.wall_thickness - self.footprint / 2.0
    }

    /// Grid-aligned coordinates inside the floor rectangle, ascending.
    pub fn grid_lines(&self) -> Vec<f32> {
        let first = (self.interior_min() / self.grid_size).ceil() as i32;
        let last = (self.interior_max() / self.grid_size).floor() as i32;
        (first..=last).map(|index| index as f32 * self.grid_size).collect()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            maze_size: 4,
            room: RoomGeometry::default(),
            touch_radius: 12.0,
            weapon_reach: 20.0,
            hit_radius: 16.0,
            weapon_damage: 1,
            knockback_distance: 32.0,
            knockback_step: 2.0,
            attack_ticks: 15,
            dying_ticks: 16,
            player_invincible_ticks: 60,
            heart_drop_chance: 0.25,
            heart_heal: 2,
            wander_wait_min: 60,
            wander_wait_max: 90,
            chase_wait: 30,
            enemies_per_room_min: 1,
            enemies_per_room_max: 3,
            player_hp: 6,
            player_speed: 1.0,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SimError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let room = &self.room;
        if self.maze_size < 2 {
            return Err(SimError::DegenerateMaze { size: self.maze_size });
        }
        if room.grid_size <= 0.0 || room.footprint <= 0.0 {
            return invalid("grid_size and footprint must be positive");
        }
        if room.floor_size() < room.footprint {
            return invalid("room floor must fit at least one footprint");
        }
        if !divides(room.grid_size, room.floor_size()) {
            return invalid("room floor must be a whole number of grid cells");
        }
        if room.grid_lines().is_empty() {
            return invalid("room floor has no grid-aligned resting position");
        }
        if room.exit_band >= room.wall_thickness {
            return invalid("exit_band must sit inside the wall band");
        }
        if !divides(self.player_speed, room.grid_size) {
            return invalid("player_speed must evenly divide grid_size");
        }
        if !divides(self.knockback_step, self.knockback_distance) {
            return invalid("knockback_step must evenly divide knockback_distance");
        }
        if self.wander_wait_min > self.wander_wait_max {
            return invalid("wander_wait_min exceeds wander_wait_max");
        }
        if self.enemies_per_room_min > self.enemies_per_room_max {
            return invalid("enemies_per_room_min exceeds enemies_per_room_max");
        }
        if !(0.0..=1.0).contains(&self.heart_drop_chance) {
            return invalid("heart_drop_chance must be within [0, 1]");
        }
        if self.player_hp <= 0 || self.weapon_damage <= 0 {
            return invalid("player_hp and weapon_damage must be positive");
        }
        Ok(())
    }
}

/// True when `step` is positive and `total` is a whole number of steps.
pub(crate) fn divides(step: f32, total: f32) -> bool {
    if step <= 0.0 {
        return false;
    }
    let steps = total / step;
    (steps - steps.round()).abs() <= 1e-4
}

fn invalid(message: &str) -> Result<(), SimError> {
    Err(SimError::InvalidConfig(message.to_string()))
}
