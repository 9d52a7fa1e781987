//! Grid storage for the fused occupancy map.
//!
//! ## Key Types
//!
//! - [`OccupancyGrid`]: row-major cell array with coordinate conversion,
//!   the write-if-unknown priority rule and data-preserving resize
//! - [`GridSize`]: dimensions in cells
//! - [`CellRegion`]: half-open rectangle of cells an update is limited to
//! - [`CellCounts`]: statistics for each cell type

mod core;
mod types;

pub use self::core::OccupancyGrid;
pub use types::{CellCounts, CellRegion, GridSize};
