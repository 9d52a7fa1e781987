//! Axis-aligned bounding box in world coordinates.
//!
//! [`Bounds`] is used for camera fields of view, the union of all camera
//! coverage, and the world region a layer wants refreshed.
//!
//! ```rust
//! use drishti::core::{Bounds, WorldPoint};
//!
//! // Corners may come in any order
//! let fov = Bounds::from_corners(WorldPoint::new(2.0, -1.0), WorldPoint::new(-2.0, 1.0));
//! assert_eq!(fov.width(), 4.0);
//! assert!(fov.contains(WorldPoint::new(0.0, 0.0)));
//!
//! let mut region = Bounds::empty();
//! region.expand_to_include(WorldPoint::new(5.0, 5.0));
//! assert_eq!(region.union(&fov).max, WorldPoint::new(5.0, 5.0));
//! ```

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner (smallest x and y values).
    pub min: WorldPoint,
    /// Maximum corner (largest x and y values).
    pub max: WorldPoint,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// Create bounds from two opposite corners given in any order.
    #[inline]
    pub fn from_corners(a: WorldPoint, b: WorldPoint) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty bounds has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: WorldPoint::new(f32::INFINITY, f32::INFINITY),
            max: WorldPoint::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Check if the bounds are empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Width of the bounding box (x extent).
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the bounding box (y extent).
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check if a point is inside the bounding box (edges included).
    #[inline]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this bounds intersects with another.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Compute the union of two bounds (smallest box containing both).
    #[inline]
    pub fn union(&self, other: &Bounds) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: WorldPoint) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}
