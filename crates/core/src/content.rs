use serde::{Deserialize, Serialize};

use crate::ai::Behavior;

/// Identity tag of every spawnable entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subtype {
    // Players
    Link,
    Zelda,
    Sheik,
    Impa,
    Midna,
    Linkle,
    ToonLink,
    Tetra,
    // Enemies
    Moblin,
    Keese,
    Gel,
    Zol,
    Goriya,
    Darknut,
    Octorok,
    Lynel,
    // Bosses
    Gleeok,
    Gohma,
    Manhandla,
    Dodongo,
    // Pickups
    Heart,
    Weapon,
}

/// Gameplay role derived from a subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Player,
    Enemy,
    Boss,
    Pickup,
}

impl Subtype {
    /// The one lookup table from identity to role.
    pub fn role(self) -> Role {
        match self {
            Subtype::Link
            | Subtype::Zelda
            | Subtype::Sheik
            | Subtype::Impa
            | Subtype::Midna
            | Subtype::Linkle
            | Subtype::ToonLink
            | Subtype::Tetra => Role::Player,
            Subtype::Moblin
            | Subtype::Keese
            | Subtype::Gel
            | Subtype::Zol
            | Subtype::Goriya
            | Subtype::Darknut
            | Subtype::Octorok
            | Subtype::Lynel => Role::Enemy,
            Subtype::Gleeok | Subtype::Gohma | Subtype::Manhandla | Subtype::Dodongo => {
                Role::Boss
            }
            Subtype::Heart | Subtype::Weapon => Role::Pickup,
        }
    }

    pub fn is_hostile(self) -> bool {
        matches!(self.role(), Role::Enemy | Role::Boss)
    }
}

/// Enemies unlocked as levels progress; a room draws from the first `level + 1`.
pub const ENEMY_POOL: [Subtype; 8] = [
    Subtype::Moblin,
    Subtype::Gel,
    Subtype::Keese,
    Subtype::Octorok,
    Subtype::Zol,
    Subtype::Goriya,
    Subtype::Darknut,
    Subtype::Lynel,
];

pub const BOSS_ROTATION: [Subtype; 4] =
    [Subtype::Gohma, Subtype::Dodongo, Subtype::Manhandla, Subtype::Gleeok];

pub fn enemy_pool_for_level(level: u32) -> &'static [Subtype] {
    let unlocked = (level as usize + 1).clamp(1, ENEMY_POOL.len());
    &ENEMY_POOL[..unlocked]
}

pub fn boss_for_level(level: u32) -> Subtype {
    BOSS_ROTATION[(level.saturating_sub(1) as usize) % BOSS_ROTATION.len()]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorStats {
    pub hp: i32,
    pub speed: f32,
    pub contact_damage: i32,
    pub behavior: Behavior,
    pub blocking: bool,
}

/// Base stats for hostile subtypes. Bosses gain one hp per level.
pub fn hostile_stats(subtype: Subtype, level: u32) -> ActorStats {
    let (hp, speed, contact_damage, behavior) = match subtype {
        Subtype::Moblin => (2, 0.5, 1, Behavior::RandomWander),
        Subtype::Gel => (1, 0.5, 1, Behavior::ChasePlayer),
        Subtype::Keese => (1, 1.0, 1, Behavior::RandomWander),
        Subtype::Octorok => (2, 0.5, 1, Behavior::RandomWander),
        Subtype::Zol => (3, 0.5, 1, Behavior::ChasePlayer),
        Subtype::Goriya => (3, 1.0, 1, Behavior::RandomWander),
        Subtype::Darknut => (4, 0.5, 2, Behavior::ChasePlayer),
        Subtype::Lynel => (5, 1.0, 2, Behavior::ChasePlayer),
        Subtype::Gohma => (6 + level as i32, 0.5, 2, Behavior::ChasePlayer),
        Subtype::Dodongo => (6 + level as i32, 0.5, 2, Behavior::RandomWander),
        Subtype::Manhandla => (8 + level as i32, 0.5, 2, Behavior::ChasePlayer),
        Subtype::Gleeok => (8 + level as i32, 0.5, 2, Behavior::RandomWander),
        _ => (1, 0.5, 1, Behavior::None),
    };
    ActorStats { hp, speed, contact_damage, behavior, blocking: true }
}

pub const WEAPON_NAMES: [&str; 10] = [
    "Rapier",
    "Biggoron's Sword",
    "Sword of Demise",
    "Hammer",
    "Shadow Scimitar",
    "Protector Sword",
    "Dragon Spear",
    "Cutlass of Light",
    "Demon Sword",
    "Master Sword",
];

pub const ITEM_NAMES: [&str; 10] = [
    "Nothing",
    "Blue Ring",
    "Red Ring",
    "Blue Bracelet",
    "Red Bracelet",
    "Moon Pearl",
    "Fire Pearl",
    "Bombos Medallion",
    "Ether Medallion",
    "Quake Medallion",
];
