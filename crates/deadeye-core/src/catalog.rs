//! Level and weapon catalog — the static configuration table.
//!
//! Levels and weapons are looked up by level id; no game code branches
//! on literal level numbers. Immutable after construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{SpawnPolicy, WeaponClass};

/// Configuration of a single level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Level id, 1-based.
    pub id: u32,
    /// Number of targets spawned over the level.
    pub target_count: u32,
    /// Per-spawn speed draw range (units/sec), min <= max.
    pub speed_range: (f64, f64),
    /// Target sphere diameter.
    pub scale: f64,
    /// Accuracy required to pass, in percent (0..=100).
    pub accuracy_goal: f64,
    /// How spawns are scheduled.
    pub spawn_policy: SpawnPolicy,
}

/// Weapon configuration, keyed by level id alongside `LevelDefinition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub class: WeaponClass,
    /// Minimum elapsed time between two accepted shots (seconds).
    pub fire_cooldown_secs: f64,
}

/// Catalog lookup failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown level id {0}")]
    UnknownLevel(u32),
}

/// The read-only table of level and weapon definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    levels: Vec<LevelDefinition>,
    weapons: Vec<WeaponDefinition>,
}

impl Catalog {
    /// Build a catalog from parallel level/weapon tables.
    /// Entry `i` of each table belongs to level id `i + 1`.
    pub fn new(levels: Vec<LevelDefinition>, weapons: Vec<WeaponDefinition>) -> Self {
        debug_assert_eq!(levels.len(), weapons.len());
        Self { levels, weapons }
    }

    /// Look up a level definition by id.
    pub fn get(&self, level_id: u32) -> Result<&LevelDefinition, CatalogError> {
        self.levels
            .iter()
            .find(|l| l.id == level_id)
            .ok_or(CatalogError::UnknownLevel(level_id))
    }

    /// Look up the weapon equipped for a level.
    pub fn weapon(&self, level_id: u32) -> Result<&WeaponDefinition, CatalogError> {
        let index = self
            .levels
            .iter()
            .position(|l| l.id == level_id)
            .ok_or(CatalogError::UnknownLevel(level_id))?;
        self.weapons
            .get(index)
            .ok_or(CatalogError::UnknownLevel(level_id))
    }

    /// Highest level id in the catalog.
    pub fn max_level(&self) -> u32 {
        self.levels.iter().map(|l| l.id).max().unwrap_or(0)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for Catalog {
    /// The stock three-level gallery: escalating target counts and
    /// speeds, shrinking targets, rising accuracy goals.
    fn default() -> Self {
        Self::new(
            vec![
                LevelDefinition {
                    id: 1,
                    target_count: 15,
                    speed_range: (8.0, 12.0),
                    scale: 1.8,
                    accuracy_goal: 50.0,
                    spawn_policy: SpawnPolicy::Sequence,
                },
                LevelDefinition {
                    id: 2,
                    target_count: 20,
                    speed_range: (10.0, 15.0),
                    scale: 1.6,
                    accuracy_goal: 60.0,
                    spawn_policy: SpawnPolicy::Sequence,
                },
                LevelDefinition {
                    id: 3,
                    target_count: 25,
                    speed_range: (18.0, 25.0),
                    scale: 1.2,
                    accuracy_goal: 70.0,
                    spawn_policy: SpawnPolicy::Sequence,
                },
            ],
            vec![
                WeaponDefinition {
                    class: WeaponClass::Pistol,
                    fire_cooldown_secs: PISTOL_COOLDOWN_SECS,
                },
                WeaponDefinition {
                    class: WeaponClass::Rapid,
                    fire_cooldown_secs: RAPID_COOLDOWN_SECS,
                },
                WeaponDefinition {
                    class: WeaponClass::Heavy,
                    fire_cooldown_secs: HEAVY_COOLDOWN_SECS,
                },
            ],
        )
    }
}
