//! Collision detection
//!
//! Everything in Barrage collides as an axis-aligned rectangle. Pairings are
//! tested exhaustively each tick; entity counts stay in the low hundreds so
//! no broad phase is needed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left corner + size, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test - rectangles that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Anything that takes part in collision resolution
pub trait Collider {
    fn bounds(&self) -> Aabb;
    fn is_active(&self) -> bool;
}

/// Collision between two participants: both must be active and overlapping
#[inline]
pub fn collides<A: Collider + ?Sized, B: Collider + ?Sized>(a: &A, b: &B) -> bool {
    a.is_active() && b.is_active() && a.bounds().overlaps(&b.bounds())
}
