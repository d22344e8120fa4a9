//! Player controller
//!
//! Jump input, grounded tracking from contact events, fall detection and the
//! squash/stretch scale response. Physics itself lives on `body`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::context::SimContext;
use super::physics::{Body, Collider, ContactEvent};
use super::state::LoseReason;
use crate::assets::SpriteHandle;
use crate::consts::{FALL_LIMIT_Y, RISING_THRESHOLD};
use crate::lerp_factor;

/// Scale factors (x, y) applied to the base scale while airborne
const RISING_SCALE: Vec2 = Vec2::new(0.88, 1.12);
const FALLING_SCALE: Vec2 = Vec2::new(1.16, 0.86);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    enabled: bool,
    grounded: bool,
    pub body: Body,
    base_scale: Vec2,
    /// Rendered scale
    scale: Vec2,
    jump_impulse: f32,
    visual_lerp: f32,
    pub sprite: SpriteHandle,
}

impl PlayerController {
    /// Collider is a unit box at `base_scale`. Starts disabled and airborne.
    pub fn new(pos: Vec2, base_scale: Vec2, jump_impulse: f32, visual_lerp: f32, sprite: SpriteHandle) -> Self {
        Self {
            enabled: false,
            grounded: false,
            body: Body::new(pos, base_scale),
            base_scale,
            scale: base_scale,
            jump_impulse,
            visual_lerp,
            sprite,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Apply one contact event. Grounded tracking runs even while disabled.
    pub fn on_contact(&mut self, event: ContactEvent) -> Option<LoseReason> {
        match event {
            ContactEvent::Begin(Collider::Ground) => {
                self.grounded = true;
                None
            }
            ContactEvent::End(Collider::Ground) => {
                self.grounded = false;
                None
            }
            ContactEvent::Begin(Collider::Obstacle(id)) => {
                if !self.enabled {
                    return None;
                }
                log::debug!("Player hit obstacle {}", id);
                Some(LoseReason::HitObstacle)
            }
            ContactEvent::End(Collider::Obstacle(_)) => None,
        }
    }

    pub fn update(&mut self, ctx: &SimContext) -> Option<LoseReason> {
        if !self.enabled || !ctx.is_playing() {
            return None;
        }

        if ctx.input.jump && self.grounded {
            self.body.vel = Vec2::new(0.0, self.jump_impulse);
        }

        let loss = (self.body.pos.y < FALL_LIMIT_Y).then_some(LoseReason::FellOffStage);

        let target = if self.grounded {
            self.base_scale
        } else if self.body.vel.y > RISING_THRESHOLD {
            self.base_scale * RISING_SCALE
        } else {
            self.base_scale * FALLING_SCALE
        };
        self.scale = self.scale.lerp(target, lerp_factor(self.visual_lerp, ctx.dt));

        loss
    }
}
