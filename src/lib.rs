//! Pixel Runner - an 8-bit side-scrolling runner
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (state machine, spawner, player, scrolling)
//! - `hud`: Text sinks the simulation writes score/banner strings into
//! - `assets`: Opaque sprite handle contract
//! - `highscores` / `persistence`: High score record and key-value storage
//! - `settings`: Data-driven world tuning

pub mod assets;
pub mod error;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::PersistError;
pub use highscores::HighScore;
pub use settings::RunnerConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native driver (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World speed used by background layers before any difficulty is chosen
    pub const DEFAULT_WORLD_SPEED: f32 = 5.0;
    /// Score points per second at a 1.0 multiplier
    pub const SCORE_RATE: f32 = 10.0;

    /// Delay after the spawner is (re)enabled before the first obstacle
    pub const SPAWN_WARMUP: f32 = 0.5;
    /// Bounds of the random factor applied to the spawn interval
    pub const SPAWN_JITTER_MIN: f32 = 0.8;
    pub const SPAWN_JITTER_MAX: f32 = 1.2;
    /// Number of visual obstacle shapes
    pub const OBSTACLE_SHAPES: u8 = 3;
    /// Obstacles left of this x are destroyed
    pub const DESPAWN_X: f32 = -20.0;
    /// Collider offset (local space) that seats obstacles on the ground
    pub const OBSTACLE_COLLIDER_OFFSET_Y: f32 = -0.03;

    /// Player below this y has fallen off the stage
    pub const FALL_LIMIT_Y: f32 = -8.0;
    /// Upward velocity above which the player counts as rising (for squash/stretch)
    pub const RISING_THRESHOLD: f32 = 0.1;
}

/// Frame-rate independent linear interpolation factor, clamped to [0, 1]
#[inline]
pub fn lerp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}
