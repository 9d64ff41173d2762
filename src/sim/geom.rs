//! Axis-aligned box geometry
//!
//! Every collision in the game is an AABB test. The ball is treated as its
//! enclosing square.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size (y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box enclosing a circle
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap: touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Penetration depths of `self` into `other`, measured from each side of `other`
    pub fn penetration(&self, other: &Aabb) -> Penetration {
        Penetration {
            top: (self.bottom() - other.top()).abs(),
            bottom: (self.top() - other.bottom()).abs(),
            left: (self.right() - other.left()).abs(),
            right: (self.left() - other.right()).abs(),
        }
    }
}

/// Collision axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Distances from the four sides of a box to the opposing edges of an intruder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Penetration {
    /// Axis whose side has the shallowest penetration.
    ///
    /// Ties between a vertical and a horizontal side resolve to vertical.
    pub fn min_axis(&self) -> Axis {
        let min = self.top.min(self.bottom).min(self.left).min(self.right);
        if min == self.top || min == self.bottom {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

/// Arena bounds; origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
