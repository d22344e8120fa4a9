//! High score record
//!
//! A single integer best score, read once from a `ScoreStore` at startup
//! and written back (with a flush) whenever a run beats it.

use crate::error::PersistError;
use crate::persistence::ScoreStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixel_runner_high_score";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Load from the store (0 if absent or out of range)
    pub fn load(store: &dyn ScoreStore) -> Self {
        let best = store
            .get_int(Self::STORAGE_KEY)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0);
        log::info!("Loaded high score: {}", best);
        Self { best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a final score beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a final score. Returns `Ok(true)` if it became the new best.
    ///
    /// The in-memory record is updated even if the flush fails.
    pub fn submit(&mut self, score: u32, store: &mut dyn ScoreStore) -> Result<bool, PersistError> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        store.set_int(Self::STORAGE_KEY, i64::from(score));
        store.flush()?;
        log::info!("New high score saved: {}", score);
        Ok(true)
    }
}
