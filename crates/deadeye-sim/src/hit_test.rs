//! Ray hit-testing against live targets.
//!
//! Only entities carrying `TargetInfo` are candidates; resolved targets
//! are transparent to the ray.

use glam::DVec3;
use hecs::World;

use deadeye_core::components::TargetInfo;
use deadeye_core::types::Position;

/// Result of a successful ray test.
#[derive(Debug, Clone, Copy)]
pub struct HitTest {
    pub entity: hecs::Entity,
    pub distance: f64,
}

/// Cast a ray and return the nearest unresolved target it pierces.
/// `direction` must be unit length.
pub fn cast(
    world: &World,
    origin: Position,
    direction: DVec3,
    max_range: f64,
) -> Option<HitTest> {
    let origin = origin.as_dvec3();
    let mut nearest: Option<HitTest> = None;

    for (entity, (pos, info)) in world.query::<(&Position, &TargetInfo)>().iter() {
        if info.resolved {
            continue;
        }
        let Some(distance) = ray_sphere(origin, direction, pos.as_dvec3(), info.scale * 0.5)
        else {
            continue;
        };
        if distance > max_range {
            continue;
        }
        if nearest.map_or(true, |n| distance < n.distance) {
            nearest = Some(HitTest { entity, distance });
        }
    }

    nearest
}

/// Distance along the ray to the first intersection with a sphere, or
/// None if the ray misses. Rays starting inside the sphere hit at the
/// exit point.
fn ray_sphere(origin: DVec3, direction: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let perp_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if perp_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - perp_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use deadeye_core::components::TargetMotion;

    use super::*;

    fn spawn_target(world: &mut World, id: u32, pos: Position, scale: f64) -> hecs::Entity {
        world.spawn((
            pos,
            TargetMotion {
                direction: DVec3::NEG_X,
                speed: 10.0,
            },
            TargetInfo {
                target_id: id,
                scale,
                spawn_side: 1.0,
                resolved: false,
            },
        ))
    }

    #[test]
    fn test_ray_hits_target_on_axis() {
        let mut world = World::new();
        let entity = spawn_target(&mut world, 0, Position::new(0.0, 0.0, 20.0), 2.0);

        let hit = cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).unwrap();
        assert_eq!(hit.entity, entity);
        assert!((hit.distance - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_misses_off_axis() {
        let mut world = World::new();
        spawn_target(&mut world, 0, Position::new(5.0, 0.0, 20.0), 2.0);

        assert!(cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).is_none());
    }

    #[test]
    fn test_nearest_target_wins() {
        let mut world = World::new();
        spawn_target(&mut world, 0, Position::new(0.0, 0.0, 30.0), 2.0);
        let near = spawn_target(&mut world, 1, Position::new(0.0, 0.0, 10.0), 2.0);

        let hit = cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).unwrap();
        assert_eq!(hit.entity, near);
    }

    #[test]
    fn test_resolved_target_is_transparent() {
        let mut world = World::new();
        let entity = spawn_target(&mut world, 0, Position::new(0.0, 0.0, 20.0), 2.0);
        world.get::<&mut TargetInfo>(entity).unwrap().resolved = true;

        assert!(cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).is_none());
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut world = World::new();
        spawn_target(&mut world, 0, Position::new(0.0, 0.0, 500.0), 2.0);

        assert!(cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).is_none());
    }

    #[test]
    fn test_behind_ray_ignored() {
        let mut world = World::new();
        spawn_target(&mut world, 0, Position::new(0.0, 0.0, -20.0), 2.0);

        assert!(cast(&world, Position::new(0.0, 0.0, 0.0), DVec3::Z, 200.0).is_none());
    }
}
