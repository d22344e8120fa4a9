//! Run state owned by the game manager

use std::fmt;

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyLevel, DifficultySettings};
use crate::consts::DEFAULT_WORLD_SPEED;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Collaborators not yet bound
    #[default]
    Uninitialized,
    /// Waiting for a difficulty choice
    Menu,
    /// Active run
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    HitObstacle,
    FellOffStage,
}

impl fmt::Display for LoseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoseReason::HitObstacle => write!(f, "hit an obstacle"),
            LoseReason::FellOffStage => write!(f, "fell off stage"),
        }
    }
}

/// Mutable run state. Only the game manager writes to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Set on entering Playing, kept through GameOver
    pub difficulty: Option<DifficultyLevel>,
    /// Accumulated score (fractional)
    pub score: f32,
    /// Best integer score across sessions
    pub high_score: u32,
    /// Reason the current run ended
    pub lose_reason: Option<LoseReason>,
}

impl GameSession {
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Tuning of the selected difficulty
    pub fn settings(&self) -> Option<DifficultySettings> {
        self.difficulty.map(DifficultyLevel::settings)
    }

    /// Scroll speed of the selected difficulty, or the default before one is chosen
    pub fn world_speed(&self) -> f32 {
        self.settings().map_or(DEFAULT_WORLD_SPEED, |s| s.world_speed)
    }

    /// Score as shown on the HUD
    pub fn score_int(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }
}
