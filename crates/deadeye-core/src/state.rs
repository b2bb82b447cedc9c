//! Game state snapshot — the complete visible state sent to the frontend
//! each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, UiScreen};
use crate::events::{AudioEvent, SceneEvent};
use crate::types::{Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Level currently being attempted (None in the menus).
    pub current_level: Option<u32>,
    /// Highest selectable level id. Never decreases.
    pub unlocked_level: u32,
    /// Number of levels in the catalog (for building select buttons).
    pub level_count: u32,
    /// Live targets, sorted by id.
    pub targets: Vec<TargetView>,
    pub hud: HudView,
    pub ui: UiView,
    /// Present while the result panel is up.
    pub result: Option<LevelResultView>,
    pub audio_events: Vec<AudioEvent>,
    pub scene_events: Vec<SceneEvent>,
}

/// A live target for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub target_id: u32,
    pub position: Position,
    pub scale: f64,
}

/// Score readout for the in-game HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub points: u32,
    pub hits: u32,
    pub shots_fired: u32,
    /// hits / shots_fired * 100, 0.0 before the first shot.
    pub accuracy: f64,
    pub targets_spawned: u32,
    pub targets_total: u32,
}

/// UI visibility flags. Mutated only on phase transitions; exactly one
/// `screen` is active at a time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UiView {
    pub screen: UiScreen,
    pub hud_visible: bool,
    pub weapon_visible: bool,
    pub crosshair_visible: bool,
    pub cursor_locked: bool,
}

/// Outcome of a finished attempt, shown on the result panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResultView {
    pub level_id: u32,
    pub accuracy: f64,
    pub accuracy_goal: f64,
    pub hits: u32,
    pub shots_fired: u32,
    pub target_count: u32,
    pub passed: bool,
    /// True when this was the last catalog level — a pass here completes
    /// the game and the panel offers level select instead of "next".
    pub final_level: bool,
}
