//! World tuning
//!
//! Loaded from JSON; every field falls back to the built-in layout.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::sim::DifficultyLevel;

/// A background strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub pos: Vec2,
    /// Fraction of world speed
    pub speed: f32,
    pub wrap_at_x: f32,
    pub reset_to_x: f32,
    pub color: [u8; 3],
}

/// Star field scatter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarField {
    pub count: u32,
    pub min: Vec2,
    pub max: Vec2,
    /// Even-indexed stars use the first speed, odd ones the second
    pub speeds: [f32; 2],
    pub wrap_at_x: f32,
    pub reset_to_x: f32,
}

impl StarField {
    /// Scatter bounds must be non-empty on both axes
    pub fn validate(&self) -> Result<(), PersistError> {
        let size = self.max - self.min;
        if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() {
            return Err(PersistError::Invalid(format!(
                "star field bounds {} .. {} are empty",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self {
            count: 18,
            min: Vec2::new(-10.0, 0.5),
            max: Vec2::new(12.0, 5.0),
            speeds: [0.04, 0.07],
            wrap_at_x: -12.0,
            reset_to_x: 12.0,
        }
    }
}

/// World layout and physics tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// RNG seed (spawner rolls and star scatter)
    pub seed: u64,
    /// Downward acceleration (world units/s², negative is down)
    pub gravity: f32,
    /// Vertical velocity set on jump
    pub jump_impulse: f32,
    /// Squash/stretch interpolation rate (per second)
    pub visual_lerp: f32,
    /// X where obstacles appear
    pub spawn_x: f32,
    /// Base obstacle lane
    pub lane_y: f32,
    pub player_start: Vec2,
    pub player_scale: Vec2,
    pub ground_center: Vec2,
    pub ground_size: Vec2,
    pub hills: Vec<LayerSpec>,
    pub stars: StarField,
    /// Difficulty the autopilot picks from the menu
    pub autopilot_difficulty: DifficultyLevel,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let far = [31, 41, 71];
        let near = [46, 64, 99];
        let hill = |x: f32, y: f32, speed: f32, color: [u8; 3]| LayerSpec {
            pos: Vec2::new(x, y),
            speed,
            wrap_at_x: -20.0,
            reset_to_x: 20.0,
            color,
        };

        Self {
            seed: 0x8B17,
            gravity: -30.0,
            jump_impulse: 11.0,
            visual_lerp: 10.0,
            spawn_x: 14.0,
            lane_y: -2.0,
            player_start: Vec2::new(-6.0, -1.25),
            player_scale: Vec2::new(1.0, 1.2),
            ground_center: Vec2::new(0.0, -2.5),
            ground_size: Vec2::new(42.0, 1.2),
            hills: vec![
                hill(-8.0, -0.8, 0.12, far),
                hill(16.0, -0.8, 0.12, far),
                hill(-8.0, -1.4, 0.24, near),
                hill(16.0, -1.4, 0.24, near),
            ],
            stars: StarField::default(),
            autopilot_difficulty: DifficultyLevel::Medium,
        }
    }
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
        let config: Self = serde_json::from_str(&json)?;
        config.stars.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| PersistError::io(path, e))?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
