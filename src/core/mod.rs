//! Core types shared by the camera model, the grid and the fusion engine.
//!
//! - [`WorldPoint`]: map-frame coordinates in meters
//! - [`GridCoord`]: integer cell indices
//! - [`PixelCoord`]: image-plane pixel indices (rows grow downward)
//! - [`Bounds`]: axis-aligned world rectangle (fields of view, update regions)
//! - [`CellType`]: Unknown / Free / Occupied with nav2 cost values
//!
//! World frame follows ROS REP-103: X forward, Y left. Image rows grow
//! downward, so camera projections flip the Y axis.

mod bounds;
mod cell;
mod point;

pub use bounds::Bounds;
pub use cell::{CellType, FREE_SPACE, LETHAL_OBSTACLE, NO_INFORMATION};
pub use point::{GridCoord, PixelCoord, WorldPoint};
