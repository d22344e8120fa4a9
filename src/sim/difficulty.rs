//! Difficulty levels and their tuning table

use serde::{Deserialize, Serialize};

/// Selectable difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

/// Tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Horizontal scroll rate (world units/s)
    pub world_speed: f32,
    /// Mean seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Score rate multiplier
    pub score_multiplier: f32,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn settings(self) -> DifficultySettings {
        match self {
            DifficultyLevel::Easy => DifficultySettings {
                world_speed: 5.0,
                spawn_interval: 1.7,
                score_multiplier: 1.0,
            },
            DifficultyLevel::Medium => DifficultySettings {
                world_speed: 7.0,
                spawn_interval: 1.2,
                score_multiplier: 1.5,
            },
            DifficultyLevel::Hard => DifficultySettings {
                world_speed: 9.0,
                spawn_interval: 0.85,
                score_multiplier: 2.0,
            },
        }
    }

    /// Menu digit (1 = Easy, 2 = Medium, 3 = Hard)
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(DifficultyLevel::Easy),
            2 => Some(DifficultyLevel::Medium),
            3 => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "EASY",
            DifficultyLevel::Medium => "MEDIUM",
            DifficultyLevel::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(DifficultyLevel::Easy),
            "medium" | "med" | "2" => Some(DifficultyLevel::Medium),
            "hard" | "3" => Some(DifficultyLevel::Hard),
            _ => None,
        }
    }
}
