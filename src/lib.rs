//! Flappy Sim - deterministic core of a side-scrolling flap-and-dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacles, collisions, game state)
//! - `engine`: Phase state machine, per-frame orchestration and subscriptions
//! - `timing`: Frame clock and scheduler abstraction
//! - `audio`: Audio collaborator capability
//! - `persistence`: Best score / preference storage
//! - `input`: Default key bindings

pub mod audio;
pub mod engine;
pub mod input;
pub mod persistence;
pub mod sim;
pub mod timing;

pub use engine::{Engine, EngineOptions, SubscriptionId};
pub use sim::{GamePhase, GameState, InputAction};

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (pixels)
    pub const LOGICAL_WIDTH: f32 = 320.0;
    pub const LOGICAL_HEIGHT: f32 = 180.0;
    pub const GROUND_HEIGHT: f32 = 32.0;

    /// Playfield bounds the body may occupy
    pub const PLAYFIELD_TOP: f32 = 0.0;
    pub const PLAYFIELD_BOTTOM: f32 = LOGICAL_HEIGHT - GROUND_HEIGHT;

    /// Body defaults
    pub const BODY_WIDTH: f32 = 48.0;
    pub const BODY_HEIGHT: f32 = 34.0;
    pub const BODY_START_X: f32 = LOGICAL_WIDTH * 0.28;
    pub const BODY_START_Y: f32 = LOGICAL_HEIGHT * 0.5;

    /// Obstacle (pipe pair) geometry
    pub const PIPE_WIDTH: f32 = 54.0;
    pub const PIPE_GAP: f32 = 92.0;
    pub const PIPE_GAP_VARIANCE: f32 = 18.0;
    pub const PIPE_GAP_MARGIN: f32 = 20.0;
    /// Milliseconds between spawns
    pub const PIPE_SPAWN_INTERVAL_MS: f32 = 1_400.0;
    /// Distance past the right edge where new pipes appear
    pub const PIPE_SPAWN_OFFSET: f32 = 120.0;
    pub const PIPE_DESPAWN_BUFFER: f32 = PIPE_WIDTH * 2.0;

    /// Horizontal scroll (px/s)
    pub const SCROLL_SPEED: f32 = 180.0;
    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 790.0;
    /// Vertical velocity set by a flap (px/s, negative is up)
    pub const FLAP_VELOCITY: f32 = -260.0;
    pub const MAX_FALL_SPEED: f32 = 420.0;

    /// Tilt eases 1/ROTATION_SMOOTHING of the way to its target each frame
    pub const ROTATION_SMOOTHING: f32 = 6.0;
    pub const MAX_UP_TILT: f32 = -0.35; // radians
    pub const MAX_DOWN_TILT: f32 = 0.65; // radians

    /// Largest frame step ever integrated (48 ms)
    pub const MAX_DELTA: f32 = 0.048;
    /// Nominal frame step (16 ms)
    pub const MIN_DELTA: f32 = 0.016;

    /// Persistence keys
    pub const BEST_SCORE_KEY: &str = "flappy-best-score";
    pub const AUDIO_ENABLED_KEY: &str = "flappy-audio-enabled";
}

/// Clamp `value` into `[min, max]`
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
