//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Flight parameters of a live target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetMotion {
    /// Unit flight direction. Always normalized at spawn.
    pub direction: DVec3,
    /// Speed in units/sec, drawn from the level's speed range.
    pub speed: f64,
}

/// Identity and hit-test capability of a live target.
///
/// Only entities carrying this component are hit-testable; the ECS query
/// is the capability check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Unique id assigned at spawn, stable for the target's lifetime.
    pub target_id: u32,
    /// Sphere diameter (hit-test radius = scale / 2).
    pub scale: f64,
    /// Which side the target entered from: -1.0 or +1.0.
    pub spawn_side: f64,
    /// Set on first resolution (hit or escape). A resolved target is
    /// invisible to hit tests and the bounds check; resolving it again
    /// is a no-op.
    pub resolved: bool,
}
