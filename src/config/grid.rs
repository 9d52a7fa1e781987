//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::grid::{GridSize, OccupancyGrid};

use super::defaults;

/// Grid configuration section, used when this crate hosts the map itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Initial grid width (cells)
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Initial grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Maximum grid width in cells (to limit memory)
    #[serde(default = "defaults::max_grid_size")]
    pub max_width: usize,

    /// Maximum grid height in cells (to limit memory)
    #[serde(default = "defaults::max_grid_size")]
    pub max_height: usize,

    /// World X of cell (0, 0)
    #[serde(default = "defaults::origin")]
    pub origin_x: f32,

    /// World Y of cell (0, 0)
    #[serde(default = "defaults::origin")]
    pub origin_y: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            resolution: 0.05,
            width: 200,
            height: 200,
            max_width: defaults::max_grid_size(),
            max_height: defaults::max_grid_size(),
            origin_x: -5.0,
            origin_y: -5.0,
        }
    }
}

impl GridSection {
    /// Build the initial all-unknown grid.
    pub fn to_grid(&self) -> OccupancyGrid {
        OccupancyGrid::new(
            GridSize::new(self.width, self.height),
            self.resolution,
            WorldPoint::new(self.origin_x, self.origin_y),
        )
    }

    /// Largest size the map may grow to.
    pub fn max_size(&self) -> GridSize {
        GridSize::new(self.max_width, self.max_height)
    }
}
