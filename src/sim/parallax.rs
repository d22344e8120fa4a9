//! Background parallax strips

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::SimContext;
use crate::assets::{SpriteHandle, SpriteProvider, SpriteRequest};
use crate::settings::{LayerSpec, StarField};

/// A background strip scrolling at a fraction of world speed.
///
/// Scrolls even outside of a run. When `x <= wrap_at_x` it snaps to `reset_to_x`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxScroller {
    pub pos: Vec2,
    pub speed_multiplier: f32,
    pub wrap_at_x: f32,
    pub reset_to_x: f32,
    pub sprite: SpriteHandle,
}

impl ParallaxScroller {
    pub fn new(pos: Vec2, speed_multiplier: f32, wrap_at_x: f32, reset_to_x: f32, sprite: SpriteHandle) -> Self {
        Self {
            pos,
            speed_multiplier,
            wrap_at_x,
            reset_to_x,
            sprite,
        }
    }

    /// Scroll one tick. Returns true if the strip wrapped.
    pub fn update(&mut self, ctx: &SimContext) -> bool {
        self.pos.x -= ctx.world_speed() * self.speed_multiplier * ctx.dt;

        if self.pos.x <= self.wrap_at_x {
            self.pos.x = self.reset_to_x;
            return true;
        }
        false
    }

    /// Seconds between wraps at a steady world speed
    pub fn period(&self, world_speed: f32) -> f32 {
        (self.reset_to_x - self.wrap_at_x) / (world_speed * self.speed_multiplier)
    }
}

/// Uniform in `lo..hi`, or `lo` when the range is empty
fn scatter(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if lo < hi && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Build the hill strips and a scattered star field
pub fn build_layers(
    hills: &[LayerSpec],
    stars: &StarField,
    rng: &mut impl Rng,
    sprites: &mut impl SpriteProvider,
) -> Vec<ParallaxScroller> {
    let mut layers = Vec::with_capacity(hills.len() + stars.count as usize);

    for i in 0..stars.count as usize {
        let pos = Vec2::new(
            scatter(rng, stars.min.x, stars.max.x),
            scatter(rng, stars.min.y, stars.max.y),
        );
        let speed = stars.speeds[i % 2];
        layers.push(ParallaxScroller::new(
            pos,
            speed,
            stars.wrap_at_x,
            stars.reset_to_x,
            sprites.sprite(SpriteRequest::Star),
        ));
    }

    for hill in hills {
        layers.push(ParallaxScroller::new(
            hill.pos,
            hill.speed,
            hill.wrap_at_x,
            hill.reset_to_x,
            sprites.sprite(SpriteRequest::Solid(hill.color)),
        ));
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteCatalog;
    use crate::sim::{DifficultyLevel, GamePhase, GameSession, TickInput};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_speed_without_session() {
        let session = GameSession::default();
        let input = TickInput::default();
        let ctx = SimContext::new(&session, &input, 1.0);

        let mut layer = ParallaxScroller::new(Vec2::ZERO, 0.2, -22.0, 22.0, SpriteHandle(0));
        layer.update(&ctx);
        // 5.0 * 0.2 * 1.0
        assert!((layer.pos.x + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scrolls_after_game_over() {
        let session = GameSession {
            phase: GamePhase::GameOver,
            difficulty: Some(DifficultyLevel::Hard),
            ..Default::default()
        };
        let input = TickInput::default();
        let ctx = SimContext::new(&session, &input, 1.0);

        let mut layer = ParallaxScroller::new(Vec2::ZERO, 0.5, -22.0, 22.0, SpriteHandle(0));
        layer.update(&ctx);
        assert!((layer.pos.x + 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_to_reset() {
        let session = GameSession::default();
        let input = TickInput::default();
        let ctx = SimContext::new(&session, &input, 0.1);

        let mut layer = ParallaxScroller::new(Vec2::new(-19.9, 1.0), 1.0, -20.0, 20.0, SpriteHandle(0));
        assert!(layer.update(&ctx));
        assert_eq!(layer.pos.x, 20.0);
        assert_eq!(layer.pos.y, 1.0);
    }

    #[test]
    fn test_period() {
        let layer = ParallaxScroller::new(Vec2::ZERO, 0.12, -20.0, 20.0, SpriteHandle(0));
        // 40 / (5 * 0.12)
        assert!((layer.period(5.0) - 66.666_67).abs() < 1e-3);
    }

    #[test]
    fn test_build_layers() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sprites = SpriteCatalog::new();
        let config = crate::settings::RunnerConfig::default();
        let layers = build_layers(&config.hills, &config.stars, &mut rng, &mut sprites);

        assert_eq!(layers.len(), 22);
        let stars = &layers[..18];
        assert!(stars.iter().all(|s| s.pos.x >= -10.0 && s.pos.x < 12.0));
        assert!(stars.iter().all(|s| s.pos.y >= 0.5 && s.pos.y < 5.0));
        assert_eq!(stars[0].speed_multiplier, 0.04);
        assert_eq!(stars[1].speed_multiplier, 0.07);
        // One star sprite + two hill colors
        assert_eq!(sprites.len(), 3);
    }

    #[test]
    fn test_build_layers_empty_star_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut sprites = SpriteCatalog::new();
        let stars = StarField {
            count: 3,
            min: Vec2::new(0.0, 1.0),
            max: Vec2::new(0.0, 2.0),
            ..Default::default()
        };
        let layers = build_layers(&[], &stars, &mut rng, &mut sprites);

        assert_eq!(layers.len(), 3);
        assert!(layers.iter().all(|s| s.pos.x == 0.0));
        assert!(layers.iter().all(|s| s.pos.y >= 1.0 && s.pos.y < 2.0));
    }
}
