//! Axis-aligned box collision
//!
//! Every collision in the game (bullet vs actor, actor vs player) reduces to
//! an overlap test between two boxes placed in world space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision box relative to an entity's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Offset from the entity position to the box's top-left corner
    pub offset: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            size: Vec2::new(w.max(0.0), h.max(0.0)),
        }
    }

    /// Hitbox covering a whole `w` x `h` sprite
    pub fn sprite(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    /// Place this hitbox at an entity position
    #[inline]
    pub fn at(&self, pos: Vec2) -> Aabb {
        Aabb {
            min: pos + self.offset,
            size: self.size,
        }
    }
}

/// World-space axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True if the boxes share interior area.
    ///
    /// Boxes that only touch along an edge are separated: the test rejects as
    /// soon as one box starts at or beyond the other's far edge on either axis.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        boxes_overlap(self, other)
    }
}

/// Separating-axis overlap test for two boxes. Symmetric in its arguments.
#[inline]
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    !(b.min.x >= a_max.x || a.min.x >= b_max.x || b.min.y >= a_max.y || a.min.y >= b_max.y)
}

/// Overlap test for two hitboxes at their owners' positions
#[inline]
pub fn hitboxes_overlap(pos_a: Vec2, a: &Hitbox, pos_b: Vec2, b: &Hitbox) -> bool {
    a.at(pos_a).overlaps(&b.at(pos_b))
}
