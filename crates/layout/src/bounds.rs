//! Axis-aligned rectangles.
//!
//! [`Bounds`] is used for every rectangle the editor handles: node rects in
//! layout and world space (Y up), reprojected rects in surface pixels (Y up),
//! and overlay rects in workspace pixels (Y down). The type does not care
//! which way Y points, only that `min <= max` on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Extent below which a rectangle is treated as having no area.
pub const DEGENERATE_EPSILON: f32 = 1e-4;

/// An axis-aligned rectangle represented by minimum and maximum points.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Unordered input is kept as is; see [`Bounds::from_corners`].
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Creates bounds from two corner points, automatically ordering them
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when either extent is (nearly) zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= DEGENERATE_EPSILON || self.height() <= DEGENERATE_EPSILON
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Corners in the order bottom-left, top-left, top-right, bottom-right
    /// (for a Y-up space).
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.min.x, self.max.y),
            self.max,
            Vec2::new(self.max.x, self.min.y),
        ]
    }
}
