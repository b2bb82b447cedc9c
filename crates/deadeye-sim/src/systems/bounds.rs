//! Playfield bounds system — resolves targets that fly out of the arena.
//!
//! A target whose |x| exceeds the half-width escapes: it is resolved
//! (counted against the spawn budget, not as a hit) and queued for
//! despawn. The resolved guard keeps a same-tick hit from resolving the
//! same target twice.

use hecs::{Entity, World};

use deadeye_core::components::TargetInfo;
use deadeye_core::constants::PLAYFIELD_HALF_WIDTH;
use deadeye_core::enums::TargetFate;
use deadeye_core::events::SceneEvent;
use deadeye_core::types::Position;

/// Resolve out-of-bounds targets as escaped.
pub fn run(
    world: &mut World,
    scene_events: &mut Vec<SceneEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    for (entity, (pos, info)) in world.query_mut::<(&Position, &mut TargetInfo)>() {
        if info.resolved {
            continue;
        }
        if pos.x.abs() > PLAYFIELD_HALF_WIDTH {
            info.resolved = true;
            despawn_buffer.push(entity);
            scene_events.push(SceneEvent::TargetDestroyed {
                target_id: info.target_id,
                fate: TargetFate::Escaped,
            });
            log::debug!("target {} escaped at x={:.1}", info.target_id, pos.x);
        }
    }
}
