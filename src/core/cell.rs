//! Cell types for the occupancy grid.
//!
//! Cells carry one of three states. The costmap values used when exporting to
//! a nav2-style costmap are kept next to the enum so the two never drift.

use serde::{Deserialize, Serialize};

/// Costmap value for a traversable cell.
pub const FREE_SPACE: u8 = 0;

/// Costmap value for an occupied cell.
pub const LETHAL_OBSTACLE: u8 = 254;

/// Costmap value for a cell nobody has observed.
pub const NO_INFORMATION: u8 = 255;

/// Occupancy state of a single grid cell.
///
/// - `Unknown` - no source has observed the cell
/// - `Free` - observed, nothing there
/// - `Occupied` - observed, obstacle present
///
/// `Unknown` is the only state a fusion pass may overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellType {
    /// Cell has never been observed
    #[default]
    Unknown = 0,

    /// Observed free space
    Free = 1,

    /// Observed obstacle
    Occupied = 2,
}

impl CellType {
    /// Has this cell been observed?
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellType::Unknown
    }

    /// Convert from u8 (storage representation)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellType::Free,
            2 => CellType::Occupied,
            _ => CellType::Unknown,
        }
    }

    /// Costmap value (nav2 convention)
    #[inline]
    pub fn to_cost(self) -> u8 {
        match self {
            CellType::Unknown => NO_INFORMATION,
            CellType::Free => FREE_SPACE,
            CellType::Occupied => LETHAL_OBSTACLE,
        }
    }
}
