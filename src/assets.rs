//! Sprite handle contract
//!
//! The simulation asks for visuals by meaning ("obstacle variant 2") and gets
//! back an opaque handle. Pixel generation happens outside the simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Semantic sprite request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteRequest {
    Ground,
    Player,
    Obstacle(u8),
    Star,
    /// Flat color, 8-bit RGB
    Solid([u8; 3]),
}

/// Opaque visual handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

pub trait SpriteProvider {
    fn sprite(&mut self, request: SpriteRequest) -> SpriteHandle;
}

/// Interns requests so identical requests share a handle
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    handles: HashMap<SpriteRequest, SpriteHandle>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl SpriteProvider for SpriteCatalog {
    fn sprite(&mut self, request: SpriteRequest) -> SpriteHandle {
        let next = SpriteHandle(self.handles.len() as u32);
        *self.handles.entry(request).or_insert(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_interns() {
        let mut catalog = SpriteCatalog::new();
        let a = catalog.sprite(SpriteRequest::Obstacle(1));
        let b = catalog.sprite(SpriteRequest::Obstacle(2));
        let c = catalog.sprite(SpriteRequest::Obstacle(1));
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(catalog.len(), 2);
    }
}
