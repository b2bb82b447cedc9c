//! Enumeration types used throughout the game core.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
///
/// `Paused` is a sub-state of `Playing`: sim time is frozen but the
/// attempt (scoring, live targets, pending spawn timers) stays intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    LevelSelect,
    Playing,
    Paused,
    LevelResult,
}

/// Which top-level UI group the frontend should have enabled.
/// Exactly one is active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiScreen {
    #[default]
    MainMenu,
    LevelSelect,
    Hud,
    PauseMenu,
    ResultPanel,
}

/// Target spawning policy for a level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// The whole level is pre-rolled at start as a timed sequence;
    /// targets may coexist.
    #[default]
    Sequence,
    /// One target at a time; the next spawn is scheduled only after the
    /// current target resolves.
    Chained,
}

/// Weapon tier equipped for a level. Determines the fire-rate cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponClass {
    #[default]
    Pistol,
    Rapid,
    Heavy,
}

/// How a target left the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFate {
    /// Shot down by the player.
    Hit,
    /// Crossed the far playfield boundary untouched.
    Escaped,
}
