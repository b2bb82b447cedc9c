//! Target spawner — decides when and where the next target appears.
//!
//! Owns the level's spawn budget. Under the Sequence policy the whole
//! level is pre-rolled at start (timing and placement); under the Chained
//! policy each target is rolled when its spawn timer fires.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use deadeye_core::catalog::LevelDefinition;
use deadeye_core::components::{TargetInfo, TargetMotion};
use deadeye_core::constants::*;
use deadeye_core::enums::SpawnPolicy;
use deadeye_core::events::SceneEvent;
use deadeye_core::types::Position;

use crate::scoring::ScoringState;
use crate::timer::secs_to_ticks;

/// Placement and motion of a single spawn, rolled from the level config.
#[derive(Debug, Clone, Copy)]
pub struct TargetParams {
    pub spawn_side: f64,
    pub start: Position,
    /// Unit flight direction.
    pub direction: DVec3,
    pub speed: f64,
    pub scale: f64,
}

/// Spawner state for one level attempt.
#[derive(Debug)]
pub struct TargetSpawner {
    level: LevelDefinition,
    /// Pre-rolled spawns, Sequence policy only.
    planned: VecDeque<TargetParams>,
}

impl TargetSpawner {
    /// Set up spawning for a fresh attempt. Returns the spawner plus the
    /// absolute ticks at which SpawnTarget timers should fire. Under
    /// Chained only the first spawn is scheduled here; the rest follow
    /// each resolution.
    pub fn begin_level(
        level: LevelDefinition,
        rng: &mut ChaCha8Rng,
        current_tick: u64,
    ) -> (Self, Vec<u64>) {
        let first_due = current_tick + secs_to_ticks(LEVEL_START_DELAY_SECS);

        match level.spawn_policy {
            SpawnPolicy::Sequence => {
                let mut planned = VecDeque::with_capacity(level.target_count as usize);
                let mut due_ticks = Vec::with_capacity(level.target_count as usize);
                let mut due = first_due;
                for i in 0..level.target_count {
                    if i > 0 {
                        let gap =
                            rng.gen_range(SEQUENCE_GAP_MIN_SECS..=SEQUENCE_GAP_MAX_SECS);
                        due += secs_to_ticks(gap);
                    }
                    planned.push_back(Self::roll_params(&level, rng));
                    due_ticks.push(due);
                }
                (Self { level, planned }, due_ticks)
            }
            SpawnPolicy::Chained => (
                Self {
                    level,
                    planned: VecDeque::new(),
                },
                vec![first_due],
            ),
        }
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.level.spawn_policy
    }

    /// Whether the level's spawn budget is used up.
    pub fn budget_exhausted(&self, scoring: &ScoringState) -> bool {
        scoring.targets_spawned >= self.level.target_count
    }

    /// Spawn the next target, or None once the budget is exhausted.
    pub fn spawn_next(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        scoring: &mut ScoringState,
        next_target_id: &mut u32,
        scene_events: &mut Vec<SceneEvent>,
    ) -> Option<hecs::Entity> {
        if self.budget_exhausted(scoring) {
            return None;
        }

        let params = match self.level.spawn_policy {
            SpawnPolicy::Sequence => self.planned.pop_front()?,
            SpawnPolicy::Chained => Self::roll_params(&self.level, rng),
        };

        let target_id = *next_target_id;
        *next_target_id += 1;
        scoring.record_spawn();

        let entity = world.spawn((
            params.start,
            TargetMotion {
                direction: params.direction,
                speed: params.speed,
            },
            TargetInfo {
                target_id,
                scale: params.scale,
                spawn_side: params.spawn_side,
                resolved: false,
            },
        ));

        scene_events.push(SceneEvent::TargetSpawned {
            target_id,
            position: params.start,
            scale: params.scale,
        });
        log::debug!(
            "spawned target {target_id} ({}/{}) side {:+.0} speed {:.1}",
            scoring.targets_spawned,
            self.level.target_count,
            params.spawn_side,
            params.speed,
        );

        Some(entity)
    }

    /// Roll placement and motion for one spawn. The entry side is uniform
    /// over {-1, +1}; flight is lateral toward the opposite side with
    /// small vertical/depth jitter, renormalized to unit length.
    fn roll_params(level: &LevelDefinition, rng: &mut ChaCha8Rng) -> TargetParams {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let start = Position::new(
            TARGET_ENTRY_X * side,
            rng.gen_range(SPAWN_HEIGHT_MIN..=SPAWN_HEIGHT_MAX),
            rng.gen_range(SPAWN_DEPTH_MIN..=SPAWN_DEPTH_MAX),
        );
        let direction = DVec3::new(
            -side,
            rng.gen_range(-DIRECTION_VERTICAL_JITTER..=DIRECTION_VERTICAL_JITTER),
            rng.gen_range(-DIRECTION_DEPTH_JITTER..=DIRECTION_DEPTH_JITTER),
        )
        .normalize();
        let speed = rng.gen_range(level.speed_range.0..=level.speed_range.1);

        TargetParams {
            spawn_side: side,
            start,
            direction,
            speed,
            scale: level.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use deadeye_core::constants::TICK_RATE;

    use super::*;

    fn sequence_level(target_count: u32) -> LevelDefinition {
        LevelDefinition {
            id: 1,
            target_count,
            speed_range: (8.0, 12.0),
            scale: 1.8,
            accuracy_goal: 50.0,
            spawn_policy: SpawnPolicy::Sequence,
        }
    }

    #[test]
    fn test_sequence_plan_timing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (_, due_ticks) = TargetSpawner::begin_level(sequence_level(10), &mut rng, 100);

        assert_eq!(due_ticks.len(), 10);
        // First spawn after the level-start delay.
        assert_eq!(due_ticks[0], 100 + TICK_RATE as u64);
        // Gaps within the configured range.
        for pair in due_ticks.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(
                gap >= secs_to_ticks(SEQUENCE_GAP_MIN_SECS)
                    && gap <= secs_to_ticks(SEQUENCE_GAP_MAX_SECS),
                "gap {gap} ticks outside configured range"
            );
        }
    }

    #[test]
    fn test_spawn_budget_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut world = World::new();
        let mut scoring = ScoringState::default();
        let mut next_id = 0;
        let mut events = Vec::new();

        let (mut spawner, _) = TargetSpawner::begin_level(sequence_level(3), &mut rng, 0);
        for _ in 0..3 {
            assert!(spawner
                .spawn_next(&mut world, &mut rng, &mut scoring, &mut next_id, &mut events)
                .is_some());
        }
        assert!(spawner.budget_exhausted(&scoring));
        assert!(spawner
            .spawn_next(&mut world, &mut rng, &mut scoring, &mut next_id, &mut events)
            .is_none());
        assert_eq!(scoring.targets_spawned, 3);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_directions_are_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let level = sequence_level(1);
        for _ in 0..100 {
            let params = TargetSpawner::roll_params(&level, &mut rng);
            assert!((params.direction.length() - 1.0).abs() < 1e-9);
            // Primarily lateral, toward the opposite side.
            assert!(params.direction.x * params.spawn_side < 0.0);
            assert!(params.start.x * params.spawn_side > 0.0);
        }
    }
}
