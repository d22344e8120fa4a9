//! Obstacles and their movement
//!
//! An obstacle only ever translates left at world speed and is removed once
//! it passes the trailing edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::context::SimContext;
use super::physics::Aabb;
use crate::assets::SpriteHandle;
use crate::consts::{DESPAWN_X, OBSTACLE_COLLIDER_OFFSET_Y};

/// Size/lane variant rolled at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Unit box on the base lane
    #[default]
    Block,
    /// Narrow and double height, raised lane
    Tall,
    /// Double width, base lane
    Wide,
}

impl ObstacleKind {
    pub fn scale(self) -> Vec2 {
        match self {
            ObstacleKind::Block => Vec2::new(1.0, 1.0),
            ObstacleKind::Tall => Vec2::new(0.8, 2.0),
            ObstacleKind::Wide => Vec2::new(2.0, 1.0),
        }
    }

    /// Vertical offset above the base lane
    pub fn lane_offset(self) -> f32 {
        match self {
            ObstacleKind::Tall => 1.0,
            ObstacleKind::Block | ObstacleKind::Wide => 0.5,
        }
    }
}

/// Result of advancing an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStatus {
    Alive,
    Despawned,
}

/// A spawned obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub kind: ObstacleKind,
    /// Visual shape, independent of the collider
    pub shape: u8,
    pub sprite: SpriteHandle,
}

impl Obstacle {
    pub fn scale(&self) -> Vec2 {
        self.kind.scale()
    }

    /// Unit collider scaled with the obstacle, nudged down onto the ground
    pub fn bounds(&self) -> Aabb {
        let scale = self.scale();
        let center = self.pos + Vec2::new(0.0, OBSTACLE_COLLIDER_OFFSET_Y * scale.y);
        Aabb::from_center_size(center, scale)
    }

    /// Move left at world speed while playing
    pub fn advance(&mut self, ctx: &SimContext) -> ObstacleStatus {
        if !ctx.is_playing() {
            return ObstacleStatus::Alive;
        }

        self.pos.x -= ctx.world_speed() * ctx.dt;

        if self.pos.x < DESPAWN_X {
            ObstacleStatus::Despawned
        } else {
            ObstacleStatus::Alive
        }
    }
}
