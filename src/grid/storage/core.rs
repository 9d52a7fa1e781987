//! Occupancy grid storage.

use crate::core::{Bounds, CellType, GridCoord, WorldPoint};

use super::types::{CellCounts, CellRegion, GridSize};

/// Row-major occupancy grid.
///
/// The grid uses a coordinate system where:
/// - (0, 0) is at `origin` in world coordinates
/// - Positive X is to the right
/// - Positive Y is up
/// - Cell (x, y) covers the area from (origin + x*resolution) to (origin + (x+1)*resolution)
///
/// Cells are stored as `CellType` discriminants, `index = y * width + x`.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Vec<u8>,
    size: GridSize,
    resolution: f32,
    /// Pre-computed 1.0 / resolution for faster world-to-grid conversion.
    inv_resolution: f32,
    origin: WorldPoint,
}

impl OccupancyGrid {
    /// Create an all-unknown grid.
    pub fn new(size: GridSize, resolution: f32, origin: WorldPoint) -> Self {
        Self {
            cells: vec![CellType::Unknown as u8; size.cell_count()],
            size,
            resolution,
            inv_resolution: 1.0 / resolution,
            origin,
        }
    }

    /// Empty grid with the same geometry.
    pub fn same_geometry(&self) -> Self {
        Self::new(self.size, self.resolution, self.origin)
    }

    // === Basic Properties ===

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Grid dimensions.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Resolution in meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World coordinates of the corner of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Move the grid in the world. Cell contents stay where they are in the array.
    pub fn set_origin(&mut self, origin: WorldPoint) {
        self.origin = origin;
    }

    /// Has the host placed this grid in the world?
    ///
    /// An origin of exactly (0, 0) is the "not yet positioned" sentinel, and
    /// a non-finite origin is never valid. A map genuinely anchored at the
    /// world origin is indistinguishable from an unset one.
    #[inline]
    pub fn origin_is_set(&self) -> bool {
        self.origin.is_finite() && self.origin != WorldPoint::ZERO
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// World rectangle covered by the grid.
    pub fn bounds(&self) -> Bounds {
        let max = WorldPoint::new(
            self.origin.x + self.size.width as f32 * self.resolution,
            self.origin.y + self.size.height as f32 * self.resolution,
        );
        Bounds::new(self.origin, max)
    }

    /// Same size, resolution and origin?
    pub fn matches_geometry(&self, other: &OccupancyGrid) -> bool {
        self.size == other.size && self.resolution == other.resolution && self.origin == other.origin
    }

    // === Coordinate Conversion ===

    /// Convert world coordinates to grid coordinates.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        let x = ((point.x - self.origin.x) * self.inv_resolution).floor() as i32;
        let y = ((point.y - self.origin.y) * self.inv_resolution).floor() as i32;
        GridCoord::new(x, y)
    }

    /// Convert grid coordinates to world coordinates (cell center).
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.size.width
            && (coord.y as usize) < self.size.height
    }

    /// Convert grid coordinates to flat array index.
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.size.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates.
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new(
            (index % self.size.width) as i32,
            (index / self.size.width) as i32,
        )
    }

    /// Cells touched by a world rectangle, clipped to the grid.
    ///
    /// Empty bounds, or bounds entirely off the grid, give an empty region.
    pub fn region_for(&self, bounds: &Bounds) -> CellRegion {
        if bounds.is_empty() || !bounds.min.is_finite() || !bounds.max.is_finite() {
            return CellRegion::default();
        }

        let lo = self.world_to_grid(bounds.min);
        let hi = self.world_to_grid(bounds.max);
        let clamp = |v: i32, limit: usize| v.clamp(0, limit as i32) as usize;

        CellRegion::new(
            clamp(lo.x, self.size.width),
            clamp(lo.y, self.size.height),
            clamp(hi.x.saturating_add(1), self.size.width),
            clamp(hi.y.saturating_add(1), self.size.height),
        )
    }

    // === Cell Access ===

    /// Cell state, `Unknown` outside the grid.
    #[inline]
    pub fn get_type(&self, coord: GridCoord) -> CellType {
        self.coord_to_index(coord)
            .map(|i| CellType::from_u8(self.cells[i]))
            .unwrap_or(CellType::Unknown)
    }

    /// Cell state at a world point, `Unknown` outside the grid.
    #[inline]
    pub fn get_type_world(&self, point: WorldPoint) -> CellType {
        self.get_type(self.world_to_grid(point))
    }

    /// Overwrite a cell. Returns false outside the grid.
    #[inline]
    pub fn set_type(&mut self, coord: GridCoord, cell_type: CellType) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                self.cells[i] = cell_type as u8;
                true
            }
            None => false,
        }
    }

    /// Write a cell only if nobody has observed it yet.
    ///
    /// Returns true if the cell changed. Writing `Unknown` is a no-op.
    #[inline]
    pub fn set_type_if_unknown(&mut self, coord: GridCoord, cell_type: CellType) -> bool {
        match self.coord_to_index(coord) {
            Some(i) if self.cells[i] == CellType::Unknown as u8 && cell_type.is_known() => {
                self.cells[i] = cell_type as u8;
                true
            }
            _ => false,
        }
    }

    /// Reset every cell to unknown.
    pub fn clear(&mut self) {
        self.cells.fill(CellType::Unknown as u8);
    }

    /// Reset the cells of a region to unknown.
    pub fn clear_region(&mut self, region: CellRegion) {
        let region = region.clamp_to(self.size);
        if region.is_empty() {
            return;
        }
        for y in region.min_y..region.max_y {
            let row = y * self.size.width;
            self.cells[row + region.min_x..row + region.max_x].fill(CellType::Unknown as u8);
        }
    }

    /// Iterate all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, CellType)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.index_to_coord(i), CellType::from_u8(v)))
    }

    /// Raw storage (row-major `CellType` discriminants).
    #[inline]
    pub fn cell_types_raw(&self) -> &[u8] {
        &self.cells
    }

    /// Whole grid as nav2 cost values, row-major.
    pub fn to_costmap(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|&v| CellType::from_u8(v).to_cost())
            .collect()
    }

    /// Count cells by type.
    pub fn count_by_type(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell_type in &self.cells {
            match CellType::from_u8(cell_type) {
                CellType::Unknown => counts.unknown += 1,
                CellType::Free => counts.free += 1,
                CellType::Occupied => counts.occupied += 1,
            }
        }
        counts
    }

    // === Resizing ===

    /// Change the grid size, keeping origin and resolution.
    ///
    /// Cells that exist in both sizes keep their value; new cells are unknown.
    /// Returns false if the size did not change.
    pub fn resize(&mut self, size: GridSize) -> bool {
        if size == self.size {
            return false;
        }

        let mut cells = vec![CellType::Unknown as u8; size.cell_count()];
        let keep_width = self.size.width.min(size.width);
        let keep_height = self.size.height.min(size.height);

        for y in 0..keep_height {
            let old_row_start = y * self.size.width;
            let new_row_start = y * size.width;
            cells[new_row_start..new_row_start + keep_width]
                .copy_from_slice(&self.cells[old_row_start..old_row_start + keep_width]);
        }

        self.cells = cells;
        self.size = size;
        true
    }
}
