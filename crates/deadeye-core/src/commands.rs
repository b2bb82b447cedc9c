//! Player commands sent from the frontend to the game engine.
//!
//! Commands are queued and processed at the next tick boundary, in
//! arrival order. Commands illegal for the current phase are ignored.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Menu flow ---
    /// Leave the main menu for the level select screen.
    StartGame,
    /// Start an attempt of the given level. Ignored if the id is unknown
    /// or the level is still locked.
    SelectLevel { level_id: u32 },

    // --- Gameplay ---
    /// Fire a shot along the given camera ray. Dropped silently while
    /// the weapon cooldown is running.
    Fire { origin: Position, direction: DVec3 },
    /// Suspend the attempt (freezes spawn timers and the music).
    Pause,
    /// Resume a paused attempt.
    Resume,

    // --- Level result ---
    /// Continue to the next level (only after passing a non-final level).
    AdvanceToNext,
    /// Restart the level that just ended.
    RetryLevel,
    /// Dismiss the result panel and return to level select.
    BackToLevelSelect,

    // --- Global ---
    /// Abandon everything and return to the main menu.
    QuitToMenu,
}
