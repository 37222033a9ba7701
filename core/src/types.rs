use serde::{Deserialize, Serialize};

use crate::constants::*;

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

// ── Stage ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageSize {
    pub width: f64,
    pub height: f64,
}

/// Pit in the ground line, spanning `[x, x + width]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f64,
    pub width: f64,
}

impl Hole {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Platform disappears this long after the player first stands on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanish_on_stand_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Platform {
    pub fn solid(x: f64, y: f64, width: f64, height: f64) -> Self {
        Platform {
            id: None,
            x,
            y,
            width,
            height,
            vanish_on_stand_ms: None,
            color: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FallingSpike {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub trigger: Rect,
    /// Pixels per second.
    pub fall_speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shoot_interval_ms: f64,
    pub bullet_speed: f64,
    pub facing: Facing,
}

/// Vertical goal segment at `x`, from `y` down to `y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalLine {
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub size: StageSize,
    /// Top edge of the ground.
    pub ground_y: f64,
    #[serde(default)]
    pub holes: Vec<Hole>,
    pub max_selection_count: u32,
    #[serde(default)]
    pub animation_choices: Vec<String>,
    #[serde(default)]
    pub new_animation_ids: Vec<String>,
    pub player_start: Vec2,
    pub goal: GoalLine,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub obstacles: Vec<FallingSpike>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
}

// ── Player ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub base_height: f64,
    pub height: f64,
    pub base_color: String,
    pub dead_eyes: bool,
    pub dash_shape: bool,
    pub is_defending: bool,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Player {
            x: start.x,
            y: start.y,
            vx: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            base_height: PLAYER_HEIGHT,
            height: PLAYER_HEIGHT,
            base_color: PLAYER_BASE_COLOR.to_string(),
            dead_eyes: false,
            dash_shape: false,
            is_defending: false,
        }
    }

    pub fn reset(&mut self, start: Vec2) {
        self.x = start.x;
        self.y = start.y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.height = self.base_height;
        self.dead_eyes = false;
        self.dash_shape = false;
        self.is_defending = false;
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

// ── Timeline ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityId {
    Player,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Normalized to the clip duration, in `[0, 1]`.
    pub time: f64,
    pub value: T,
}

/// Visual keyframes carry colors as strings and scales as numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackValue {
    Number(f64),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisualProperty {
    Color,
    Scale,
}

impl VisualProperty {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectProperty {
    X,
    Y,
    Vx,
    Vy,
    Dir,
    Height,
    GravityScale,
    DashShape,
    IsDefending,
}

impl EffectProperty {
    pub const COUNT: usize = 9;

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualTrack {
    pub property: VisualProperty,
    pub keyframes: Vec<Keyframe<TrackValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectTrack {
    pub property: EffectProperty,
    pub keyframes: Vec<Keyframe<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Id of the move this clip was built from.
    pub id: String,
    pub target: EntityId,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub priority: i32,
    #[serde(default)]
    pub visuals: Vec<VisualTrack>,
    #[serde(default)]
    pub effects: Vec<EffectTrack>,
}

impl Clip {
    pub fn is_impulse(&self) -> bool {
        self.duration_ms <= IMPULSE_MAX_MS
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }
}

// ── Samples ─────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualPartial {
    pub color: Option<String>,
    pub scale: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub color: String,
    pub scale: f64,
}

impl VisualState {
    /// Player's resting look with any sampled properties laid over it.
    pub fn merged(base_color: &str, partial: &VisualPartial) -> Self {
        VisualState {
            color: partial
                .color
                .clone()
                .unwrap_or_else(|| base_color.to_string()),
            scale: partial.scale.unwrap_or(1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisOverride {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Merged effect values for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    pub position_override: AxisOverride,
    pub velocity_override: AxisOverride,
    pub direction_flip: Option<f64>,
    pub height_override: Option<f64>,
    pub gravity_scale: Option<f64>,
    pub dash_shape: Option<f64>,
    pub is_defending: Option<f64>,
}

// ── Runtime entities ────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardPhase {
    Idle,
    Falling,
    Gone,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleState {
    pub spike: FallingSpike,
    pub phase: HazardPhase,
}

impl ObstacleState {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.spike.x,
            y: self.spike.y,
            width: self.spike.width,
            height: self.spike.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Display bookkeeping only; never read by collision.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

// ── Attempt ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    Crushed,
    Shot,
    Hazard,
    FellOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "cause")]
pub enum AttemptStatus {
    Playing,
    /// Grace period after a crush before the attempt is lost.
    CrushPending,
    /// Grace period after a projectile hit before the attempt is lost.
    HitPending,
    Cleared,
    GameOver(FailureCause),
}

impl AttemptStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, AttemptStatus::Cleared | AttemptStatus::GameOver(_))
    }
}

// ── Config ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub gravity: f64,
    pub base_move_speed: f64,
    pub reverse_debounce_ms: f64,
    pub failure_grace_ms: f64,
    pub fall_out_margin: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            gravity: GRAVITY,
            base_move_speed: BASE_MOVE_SPEED,
            reverse_debounce_ms: REVERSE_DEBOUNCE_MS,
            failure_grace_ms: FAILURE_GRACE_MS,
            fall_out_margin: FALL_OUT_MARGIN,
        }
    }
}

// ── Replay I/O ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameTiming {
    /// `ticks` frames of `dt` seconds each.
    Fixed { dt: f64, ticks: u32 },
    /// Per-frame deltas in seconds, as captured from a live session.
    Recorded(Vec<f64>),
}

/// Input to a headless replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunInput {
    /// Built-in stage id; ignored when `custom_stage` is set.
    #[serde(default)]
    pub stage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_stage: Option<Stage>,
    pub moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_delay_override_ms: Option<f64>,
    #[serde(default)]
    pub config: SimConfig,
    pub frames: FrameTiming,
}

/// Result of a headless replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub status: AttemptStatus,
    pub ticks: u32,
    pub elapsed_ms: f64,
    pub player: Player,
    /// SHA-256 over every tick's player kinematics.
    pub trajectory_hash: [u8; 32],
}
