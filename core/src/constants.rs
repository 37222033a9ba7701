// Units: pixels, seconds for dt, milliseconds for timeline time.

// Physics
pub const GRAVITY: f64 = 1500.0;
pub const BASE_MOVE_SPEED: f64 = 110.0;

// Player hitbox
pub const PLAYER_WIDTH: f64 = 28.0;
pub const PLAYER_HEIGHT: f64 = 40.0;
pub const PLAYER_BASE_COLOR: &str = "#f5f5f5";

// Crouch / crush
pub const CROUCH_HEIGHT: f64 = 18.0;
/// Minimum vertical gap needed to grow back out of a crouch.
pub const MIN_CLEARANCE: f64 = 21.0;

// Timeline
/// Clips this short fire once at their start instead of being sampled.
pub const IMPULSE_MAX_MS: f64 = 20.0;
pub const IMPULSE_DURATION_MS: f64 = 16.0;
pub const GROW_PEAK_SCALE: f64 = 1.25;
pub const DEFEND_COLOR: &str = "#7bdff2";

// Double-jump solver sweep
pub const DOUBLE_JUMP_RATIO_MIN: f64 = 0.35;
pub const DOUBLE_JUMP_RATIO_STEP: f64 = 0.04;
pub const DOUBLE_JUMP_RATIO_STEPS: u32 = 5;
pub const DOUBLE_JUMP_FALLBACK_RATIO: f64 = 0.5;

// Platforms
pub const STANDING_TOLERANCE: f64 = 0.5;

// Projectiles
pub const BULLET_SIZE: f64 = 8.0;

// Attempt flow
pub const REVERSE_DEBOUNCE_MS: f64 = 50.0;
pub const FAILURE_GRACE_MS: f64 = 1000.0;
pub const FALL_OUT_MARGIN: f64 = 60.0;
