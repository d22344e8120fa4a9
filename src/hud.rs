//! HUD text sinks
//!
//! The simulation only writes plain strings here; drawing them is up to
//! whoever owns the screen.

use crate::sim::{DifficultyLevel, LoseReason};

/// Banner shown while choosing a difficulty
pub const MENU_BANNER: &str =
    "8-BIT RUNNER\n1 = EASY  2 = MEDIUM  3 = HARD\nSPACE/UP = JUMP\nSURVIVE AND BEAT HI-SCORE";

/// A single text output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSink {
    pub text: String,
    pub visible: bool,
}

impl TextSink {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// The HUD sinks. Score, center and difficulty are required; high score is optional.
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub score: Option<TextSink>,
    pub high_score: Option<TextSink>,
    pub difficulty: Option<TextSink>,
    pub center: Option<TextSink>,
}

impl Hud {
    /// All four sinks with their initial text
    pub fn standard() -> Self {
        Self {
            score: Some(TextSink::new(score_text(0))),
            high_score: Some(TextSink::new(high_score_text(0))),
            difficulty: Some(TextSink::new(difficulty_text(None))),
            center: Some(TextSink::new(MENU_BANNER)),
        }
    }

    /// Whether every required sink is bound
    pub fn is_complete(&self) -> bool {
        self.score.is_some() && self.center.is_some() && self.difficulty.is_some()
    }

    pub fn set_score(&mut self, score: u32) {
        if let Some(sink) = &mut self.score {
            sink.set(score_text(score));
        }
    }

    pub fn set_high_score(&mut self, best: u32) {
        if let Some(sink) = &mut self.high_score {
            sink.set(high_score_text(best));
        }
    }

    pub fn set_difficulty(&mut self, level: Option<DifficultyLevel>) {
        if let Some(sink) = &mut self.difficulty {
            sink.set(difficulty_text(level));
        }
    }

    /// Show a center banner message
    pub fn show_banner(&mut self, text: impl Into<String>) {
        if let Some(sink) = &mut self.center {
            sink.set(text);
            sink.show();
        }
    }

    pub fn hide_banner(&mut self) {
        if let Some(sink) = &mut self.center {
            sink.hide();
        }
    }

    pub fn banner(&self) -> Option<&TextSink> {
        self.center.as_ref()
    }
}

pub fn score_text(score: u32) -> String {
    format!("SCORE: {}", score)
}

pub fn high_score_text(best: u32) -> String {
    format!("HI: {}", best)
}

pub fn difficulty_text(level: Option<DifficultyLevel>) -> String {
    match level {
        Some(level) => format!("DIFFICULTY: {}", level.label()),
        None => "DIFFICULTY: -".to_string(),
    }
}

pub fn game_over_text(reason: LoseReason, score: u32) -> String {
    format!("GAME OVER\n{}\nSCORE: {}\nPress R to restart", reason, score)
}
