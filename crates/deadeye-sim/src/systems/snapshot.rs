//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only over the world — it never modifies it.

use hecs::World;

use deadeye_core::components::TargetInfo;
use deadeye_core::enums::GamePhase;
use deadeye_core::events::{AudioEvent, SceneEvent};
use deadeye_core::state::*;
use deadeye_core::types::{Position, SimTime};

use crate::scoring::ScoringState;

/// Build a complete GameStateSnapshot from the current engine state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    current_level: Option<u32>,
    unlocked_level: u32,
    level_count: u32,
    targets_total: u32,
    scoring: &ScoringState,
    ui: UiView,
    result: Option<LevelResultView>,
    audio_events: Vec<AudioEvent>,
    scene_events: Vec<SceneEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        current_level,
        unlocked_level,
        level_count,
        targets: build_targets(world),
        hud: build_hud(scoring, targets_total),
        ui,
        result,
        audio_events,
        scene_events,
    }
}

/// Build the TargetView list from all live, unresolved targets.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<(&Position, &TargetInfo)>()
        .iter()
        .filter(|(_, (_, info))| !info.resolved)
        .map(|(_, (pos, info))| TargetView {
            target_id: info.target_id,
            position: *pos,
            scale: info.scale,
        })
        .collect();

    targets.sort_by_key(|t| t.target_id);
    targets
}

/// Build the HUD readout from the scoring counters.
fn build_hud(scoring: &ScoringState, targets_total: u32) -> HudView {
    HudView {
        points: scoring.points,
        hits: scoring.hits,
        shots_fired: scoring.shots_fired,
        accuracy: scoring.accuracy(),
        targets_spawned: scoring.targets_spawned,
        targets_total,
    }
}
