//! Events emitted by the engine for the audio and rendering collaborators.
//!
//! The engine never touches a sound device or a scene graph; it describes
//! what should happen and the frontend makes it so.

use serde::{Deserialize, Serialize};

use crate::enums::TargetFate;
use crate::types::Position;

/// Audio events for the frontend sound system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// An accepted shot was fired.
    GunShot,
    /// A target was hit.
    TargetHit { target_id: u32 },
    /// Level-start bleep.
    LevelStart { level_id: u32 },
    /// Begin the level's background track. At most one track is ever
    /// alive; a `MusicStopped` precedes this when another was playing.
    MusicStarted { level_id: u32 },
    /// Pause the background track in place (resume continues from the
    /// same position, never from zero).
    MusicPaused,
    /// Resume the paused background track.
    MusicResumed,
    /// Stop and discard the background track.
    MusicStopped,
}

/// Scene events for the frontend renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    /// A target entered the playfield.
    TargetSpawned {
        target_id: u32,
        position: Position,
        scale: f64,
    },
    /// A target left the playfield (shot down or escaped).
    TargetDestroyed { target_id: u32, fate: TargetFate },
    /// Short-lived expanding flash at a hit location.
    ImpactFlash { position: Position, scale: f64 },
    /// Kick the weapon model for an accepted shot.
    WeaponRecoil,
}
