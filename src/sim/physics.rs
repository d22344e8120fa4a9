//! Minimal box physics and contact events
//!
//! Just enough to drive the runner: one dynamic body under gravity, a static
//! ground box, kinematic obstacle boxes, and begin/end contact events that
//! the next tick consumes.

use std::collections::{BTreeSet, VecDeque};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance for resting contact
const CONTACT_SLOP: f32 = 0.01;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Horizontal extents overlap
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half.x + other.half.x
    }

    /// Boxes overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other)
            && (self.center.y - other.center.y).abs() < self.half.y + other.half.y
    }
}

/// Something the player can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collider {
    Ground,
    Obstacle(u32),
}

/// Discrete contact notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEvent {
    Begin(Collider),
    End(Collider),
}

/// Inbound contact events, drained once per tick
#[derive(Debug, Clone, Default)]
pub struct ContactQueue {
    events: VecDeque<ContactEvent>,
}

impl ContactQueue {
    pub fn push(&mut self, event: ContactEvent) {
        self.events.push_back(event);
    }

    /// Take all pending events in arrival order
    pub fn drain(&mut self) -> Vec<ContactEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Static ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub bounds: Aabb,
}

impl Ground {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Aabb::from_center_size(center, size),
        }
    }

    pub fn top(&self) -> f32 {
        self.bounds.max().y
    }
}

/// Dynamic body affected by gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collider size
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    /// Integrate one step and resolve against the ground.
    /// Returns true if the body rests on the ground afterwards.
    pub fn step(&mut self, ground: &Ground, gravity: f32, dt: f32) -> bool {
        let prev_bottom = self.bounds().min().y;

        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;

        let bounds = self.bounds();
        let top = ground.top();
        let landed = self.vel.y <= 0.0
            && bounds.overlaps_x(&ground.bounds)
            && prev_bottom >= top - CONTACT_SLOP
            && bounds.min().y <= top + CONTACT_SLOP;

        if landed {
            self.pos.y = top + self.size.y * 0.5;
            self.vel.y = 0.0;
        }
        landed
    }
}

/// Remembers what was touching last step and reports changes
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: BTreeSet<Collider>,
}

impl ContactTracker {
    /// Diff the current contact set against the previous one
    pub fn update(&mut self, now: BTreeSet<Collider>, queue: &mut ContactQueue) {
        for ended in self.touching.difference(&now) {
            queue.push(ContactEvent::End(*ended));
        }
        for began in now.difference(&self.touching) {
            queue.push(ContactEvent::Begin(*began));
        }
        self.touching = now;
    }

    pub fn is_touching(&self, collider: Collider) -> bool {
        self.touching.contains(&collider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Ground {
        Ground::new(Vec2::new(0.0, -2.5), Vec2::new(42.0, 1.2))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::from_center_size(Vec2::new(0.9, 0.0), Vec2::ONE);
        let c = Aabb::from_center_size(Vec2::new(1.0, 0.0), Vec2::ONE);
        assert!(a.overlaps(&b));
        // Touching edges only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_body_lands_on_ground() {
        let ground = ground();
        let mut body = Body::new(Vec2::new(-6.0, -1.25), Vec2::new(1.0, 1.2));

        let mut landed = false;
        for _ in 0..60 {
            landed = body.step(&ground, -30.0, 1.0 / 60.0);
        }
        assert!(landed);
        assert!((body.bounds().min().y - ground.top()).abs() < 1e-4);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_body_leaves_ground_when_launched() {
        let ground = ground();
        let mut body = Body::new(Vec2::new(-6.0, ground.top() + 0.6), Vec2::new(1.0, 1.2));
        assert!(body.step(&ground, -30.0, 1.0 / 60.0));

        body.vel.y = 11.0;
        assert!(!body.step(&ground, -30.0, 1.0 / 60.0));
        assert!(body.pos.y > ground.top() + 0.6);
    }

    #[test]
    fn test_body_falls_past_ground_edge() {
        let ground = ground();
        let mut body = Body::new(Vec2::new(30.0, 0.0), Vec2::new(1.0, 1.2));
        for _ in 0..120 {
            assert!(!body.step(&ground, -30.0, 1.0 / 60.0));
        }
        assert!(body.pos.y < -8.0);
    }

    #[test]
    fn test_tracker_emits_begin_and_end() {
        let mut tracker = ContactTracker::default();
        let mut queue = ContactQueue::default();

        tracker.update([Collider::Ground].into_iter().collect(), &mut queue);
        assert_eq!(queue.drain(), vec![ContactEvent::Begin(Collider::Ground)]);

        // Unchanged set emits nothing
        tracker.update([Collider::Ground].into_iter().collect(), &mut queue);
        assert!(queue.is_empty());

        tracker.update([Collider::Obstacle(4)].into_iter().collect(), &mut queue);
        assert_eq!(
            queue.drain(),
            vec![
                ContactEvent::End(Collider::Ground),
                ContactEvent::Begin(Collider::Obstacle(4)),
            ]
        );
        assert!(tracker.is_touching(Collider::Obstacle(4)));
    }
}
