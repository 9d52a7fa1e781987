//! Types used by grid storage.

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;

/// Grid dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
}

impl GridSize {
    /// Create a new grid size
    #[inline]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Per-axis maximum of two sizes.
    #[inline]
    pub fn max(self, other: GridSize) -> GridSize {
        GridSize::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Per-axis minimum of two sizes.
    #[inline]
    pub fn min(self, other: GridSize) -> GridSize {
        GridSize::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Does this size fit inside `other` on both axes?
    #[inline]
    pub fn fits_in(&self, other: &GridSize) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

/// Rectangle of cells, half-open: `[min_x, max_x) x [min_y, max_y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CellRegion {
    /// First column
    pub min_x: usize,
    /// First row
    pub min_y: usize,
    /// One past the last column
    pub max_x: usize,
    /// One past the last row
    pub max_y: usize,
}

impl CellRegion {
    /// Create a new region
    #[inline]
    pub fn new(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Every cell of a grid
    #[inline]
    pub fn full(size: GridSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Region with no cells?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Number of cells covered
    #[inline]
    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_x - self.min_x) * (self.max_y - self.min_y)
        }
    }

    /// Clip to a grid of the given size.
    #[inline]
    pub fn clamp_to(&self, size: GridSize) -> Self {
        Self::new(
            self.min_x.min(size.width),
            self.min_y.min(size.height),
            self.max_x.min(size.width),
            self.max_y.min(size.height),
        )
    }

    /// Cells in both regions.
    #[inline]
    pub fn intersect(&self, other: &CellRegion) -> Self {
        Self::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }

    /// Cells in row-major order.
    pub fn coords(self) -> impl Iterator<Item = GridCoord> {
        let Self {
            min_x,
            min_y,
            max_x,
            max_y,
        } = self;
        (min_y..max_y)
            .flat_map(move |y| (min_x..max_x).map(move |x| GridCoord::new(x as i32, y as i32)))
    }
}

/// Cell counts by type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    /// Unknown cells (not yet observed).
    pub unknown: usize,
    /// Free cells.
    pub free: usize,
    /// Occupied cells.
    pub occupied: usize,
}

impl CellCounts {
    /// Total known cells.
    pub fn known(&self) -> usize {
        self.free + self.occupied
    }

    /// Total cells.
    pub fn total(&self) -> usize {
        self.unknown + self.known()
    }
}
