//! Procedural obstacle spawner
//!
//! Counts down a randomized cooldown while a run is active and rolls each
//! obstacle's shape and size/lane variant independently.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::SimContext;
use super::difficulty::DifficultyLevel;
use super::obstacle::ObstacleKind;
use crate::consts::{OBSTACLE_SHAPES, SPAWN_JITTER_MAX, SPAWN_JITTER_MIN, SPAWN_WARMUP};

/// What to spawn and where
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub pos: Vec2,
    pub kind: ObstacleKind,
    pub shape: u8,
}

/// Pick the size/lane variant for a roll `r` in [0, 1).
///
/// Tall is checked first; Wide only applies when the Tall check fails.
pub fn roll_kind(difficulty: DifficultyLevel, r: f32) -> ObstacleKind {
    if difficulty != DifficultyLevel::Easy && r > 0.6 {
        ObstacleKind::Tall
    } else if difficulty == DifficultyLevel::Hard && r < 0.25 {
        ObstacleKind::Wide
    } else {
        ObstacleKind::Block
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    enabled: bool,
    cooldown: f32,
    spawn_x: f32,
    lane_y: f32,
}

impl Spawner {
    /// New spawners start disabled
    pub fn new(spawn_x: f32, lane_y: f32) -> Self {
        Self {
            enabled: false,
            cooldown: SPAWN_WARMUP,
            spawn_x,
            lane_y,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds until the next spawn
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Enabling a disabled spawner primes the warm-up delay
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.cooldown = SPAWN_WARMUP;
        }
        self.enabled = enabled;
    }

    pub fn update(&mut self, ctx: &SimContext, rng: &mut impl Rng) -> Option<SpawnPlan> {
        if !self.enabled || !ctx.is_playing() {
            return None;
        }

        self.cooldown -= ctx.dt;
        if self.cooldown > 0.0 {
            return None;
        }

        let difficulty = ctx.difficulty().unwrap_or(DifficultyLevel::Easy);
        let plan = self.roll(difficulty, rng);

        let base = ctx.spawn_interval();
        self.cooldown = rng.random_range(base * SPAWN_JITTER_MIN..=base * SPAWN_JITTER_MAX);

        log::debug!(
            "Spawned {:?} (shape {}) at {:?}, next in {:.2}s",
            plan.kind,
            plan.shape,
            plan.pos,
            self.cooldown
        );
        Some(plan)
    }

    fn roll(&self, difficulty: DifficultyLevel, rng: &mut impl Rng) -> SpawnPlan {
        let shape = rng.random_range(0..OBSTACLE_SHAPES);
        let kind = roll_kind(difficulty, rng.random::<f32>());
        SpawnPlan {
            pos: Vec2::new(self.spawn_x, self.lane_y + kind.lane_offset()),
            kind,
            shape,
        }
    }
}
