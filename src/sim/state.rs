//! Game state and core simulation types
//!
//! `GameState` is the canonical snapshot published by the engine. It is
//! replaced, never edited in place, on every transition.

use serde::{Deserialize, Serialize};

use super::body::{self, BodyState};
use super::collision::CollisionResult;
use super::world::{self, WorldState};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap/start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "MENU",
            GamePhase::Playing => "PLAYING",
            GamePhase::Paused => "PAUSED",
            GamePhase::GameOver => "GAME_OVER",
        }
    }
}

/// Input actions accepted by the engine at any time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Start,
    Flap,
    Pause,
    Resume,
    TogglePause,
    Restart,
    ToggleAudio,
    Mute,
    Unmute,
    VisibilityHidden,
    VisibilityVisible,
}

/// Sound effects the engine asks the audio collaborator to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioEffect {
    Flap,
    Score,
    Hit,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// High-water mark, includes the running score
    pub best_score: u64,
    /// Simulated time since the run started (ms)
    pub elapsed_ms: f64,
    pub body: BodyState,
    pub world: WorldState,
    /// Last applied frame delta (seconds)
    pub delta: f32,
    pub audio_enabled: bool,
    pub last_collision: Option<CollisionResult>,
}

impl GameState {
    /// Fresh run state in the menu, carrying over best score and audio preference
    pub fn new(best_score: u64, audio_enabled: bool) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            best_score,
            elapsed_ms: 0.0,
            body: body::create_initial(),
            world: world::create_initial(),
            delta: 0.0,
            audio_enabled,
            last_collision: None,
        }
    }

    /// Whether the given phase change is a transition into game over
    pub fn became_game_over(&self, previous: GamePhase) -> bool {
        previous != GamePhase::GameOver && self.phase == GamePhase::GameOver
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, true)
    }
}
