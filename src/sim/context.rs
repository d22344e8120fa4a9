//! Per-tick view of the world handed to each component

use super::difficulty::DifficultyLevel;
use super::state::GameSession;
use super::tick::TickInput;

/// What a component may read during its update
#[derive(Debug, Clone, Copy)]
pub struct SimContext<'a> {
    pub session: &'a GameSession,
    pub input: &'a TickInput,
    pub dt: f32,
}

impl<'a> SimContext<'a> {
    pub fn new(session: &'a GameSession, input: &'a TickInput, dt: f32) -> Self {
        Self { session, input, dt }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn difficulty(&self) -> Option<DifficultyLevel> {
        self.session.difficulty
    }

    /// Active world speed, or the default before any difficulty was chosen
    pub fn world_speed(&self) -> f32 {
        self.session.world_speed()
    }

    /// Active spawn interval. Only meaningful while playing.
    pub fn spawn_interval(&self) -> f32 {
        debug_assert!(
            self.session.difficulty.is_some(),
            "spawn interval read without an active difficulty"
        );
        self.session.settings().map_or(0.0, |s| s.spawn_interval)
    }
}
