//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, single-threaded
//! - Components read a `SimContext`; only the manager writes the session
//! - Physics contacts arrive as queued events, drained at the start of a tick
//! - No rendering or platform dependencies

pub mod context;
pub mod difficulty;
pub mod manager;
pub mod obstacle;
pub mod parallax;
pub mod physics;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use context::SimContext;
pub use difficulty::{DifficultyLevel, DifficultySettings};
pub use manager::{Bindings, GameManager, ManagerRequest, Wiring};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleStatus};
pub use parallax::ParallaxScroller;
pub use physics::{Aabb, Body, Collider, ContactEvent, ContactQueue, Ground};
pub use player::PlayerController;
pub use spawner::{SpawnPlan, Spawner, roll_kind};
pub use state::{GamePhase, GameSession, LoseReason};
pub use tick::{TickInput, World};
