//! Game constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Playfield ---

/// Half-width of the playfield; a target whose |x| exceeds this escapes.
pub const PLAYFIELD_HALF_WIDTH: f64 = 24.0;

/// Lateral entry coordinate for freshly spawned targets (|x| at spawn).
pub const TARGET_ENTRY_X: f64 = 22.0;

/// Vertical spawn band (units above the floor).
pub const SPAWN_HEIGHT_MIN: f64 = 1.0;
pub const SPAWN_HEIGHT_MAX: f64 = 8.0;

/// Depth spawn band (units away from the camera plane).
pub const SPAWN_DEPTH_MIN: f64 = 15.0;
pub const SPAWN_DEPTH_MAX: f64 = 25.0;

/// Random jitter applied to the lateral flight direction before
/// normalization.
pub const DIRECTION_VERTICAL_JITTER: f64 = 0.1;
pub const DIRECTION_DEPTH_JITTER: f64 = 0.05;

// --- Spawning ---

/// Delay between starting a level and the first spawn (seconds).
pub const LEVEL_START_DELAY_SECS: f64 = 1.0;

/// Inter-arrival gap range for the Sequence spawn policy (seconds).
pub const SEQUENCE_GAP_MIN_SECS: f64 = 1.0;
pub const SEQUENCE_GAP_MAX_SECS: f64 = 2.5;

/// Delay between a target resolving and the next spawn under the
/// Chained spawn policy (seconds).
pub const CHAIN_RESPAWN_DELAY_SECS: f64 = 0.5;

/// Grace period between the last target resolving and the level-end
/// evaluation (seconds). Lets the final destruction effect play out.
pub const LEVEL_END_GRACE_SECS: f64 = 1.0;

// --- Shooting ---

/// Points awarded per hit.
pub const POINTS_PER_HIT: u32 = 100;

/// Maximum hit-test ray distance.
pub const RAYCAST_MAX_RANGE: f64 = 200.0;

// --- Weapon cooldowns (seconds between accepted shots) ---

pub const PISTOL_COOLDOWN_SECS: f64 = 0.5;
pub const RAPID_COOLDOWN_SECS: f64 = 0.2;
pub const HEAVY_COOLDOWN_SECS: f64 = 0.8;
