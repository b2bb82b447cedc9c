//! Per-tick systems, run in a fixed order by the engine.

pub mod bounds;
pub mod movement;
pub mod snapshot;
