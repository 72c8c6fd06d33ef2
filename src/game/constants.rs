pub const DEFAULT_POLYGON_SIZE: f64 = 10.0;
pub const BOUNDING_SIDES: usize = 10;
pub const SEGMENT_SPACING: f64 = 20.0;
pub const STARTING_LENGTH: usize = 10;
pub const BASE_SPEED: f64 = 350.0;
pub const TURBO_SPEED: f64 = 500.0;
// Per-tick cap on pursuit turns. Keep this small relative to per-tick
// travel: the pivot snap in Segment::advance compares straight-line
// magnitudes and overshoots on corners sharper than this allows.
pub const MAX_STEER_ANGLE: f64 = 0.2;
pub const TARGET_ANGLE_TOLERANCE: f64 = 0.001;
pub const SELF_COLLISION_SKIP: usize = 3;
pub const BASE_PICKUP_COUNT: usize = 3;
pub const PICKUP_EXTENT: f64 = 12.0;
pub const PICKUP_VALUE: i64 = 1;
pub const PICKUP_CLEARANCE: f64 = 60.0;
pub const MAX_SPAWN_ATTEMPTS: usize = 32;
pub const TICK_MS: u64 = 50;
pub const WORLD_WIDTH: f64 = 1280.0;
pub const WORLD_HEIGHT: f64 = 720.0;
