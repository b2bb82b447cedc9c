//! Kinematic integration system.
//!
//! Updates Position from TargetMotion each tick:
//! position += direction * speed * dt.

use hecs::World;

use deadeye_core::components::TargetMotion;
use deadeye_core::constants::DT;
use deadeye_core::types::Position;

/// Run kinematic integration for all entities with Position + TargetMotion.
pub fn run(world: &mut World) {
    for (_entity, (pos, motion)) in world.query_mut::<(&mut Position, &TargetMotion)>() {
        pos.x += motion.direction.x * motion.speed * DT;
        pos.y += motion.direction.y * motion.speed * DT;
        pos.z += motion.direction.z * motion.speed * DT;
    }
}
