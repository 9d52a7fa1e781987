//! # Drishti
//!
//! Overhead camera occupancy fusion for 2D grid maps.
//!
//! ## Overview
//!
//! Fixed cameras looking straight down at the floor see obstacles the robot's
//! own sensors cannot reach. Drishti projects their per-pixel classification
//! onto the ground plane and merges it into a shared occupancy grid:
//!
//! - **Unknown** - Not yet observed by any camera
//! - **Free** - Observed, nothing there
//! - **Occupied** - Observed obstacle
//!
//! ## Features
//!
//! - **Pinhole projection**: pixel ↔ world conversion and cached ground footprint
//! - **Frame handoff**: lock-free newest-frame-wins channel per camera
//! - **Priority fusion**: only unknown cells are written, first camera wins
//! - **Coverage sizing**: grid size needed to hold every footprint
//! - **Layer interface**: two-phase bounds/costs updates for a costmap host
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{DrishtiConfig, LayeredMap};
//!
//! let config = DrishtiConfig::load_default()?;
//! let layer = config.build_layer("overhead")?;
//! let sender = layer.sender("ceiling_north")?;
//!
//! let mut map = LayeredMap::new(config.to_grid());
//! map.add_layer(layer);
//!
//! // From the camera thread
//! sender.send_resized(image)?;
//!
//! // From the map thread
//! let report = map.update();
//! println!("Wrote {} cells", report.total().cells_written());
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward
//! - Y: Left
//! - Image rows grow downward, so projection flips the Y axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Camera model and observations
pub mod camera;

// Grid storage and fusion
pub mod grid;

// Coverage sizing
pub mod coverage;

// Costmap layer interface
pub mod layer;

// Unified configuration
pub mod config;

// Map export and frame loading
pub mod io;

// Re-export commonly used types
pub use crate::core::{Bounds, CellType, GridCoord, PixelCoord, WorldPoint};

pub use error::{CameraError, Error, FrameError, Result};

pub use camera::{
    CameraIntrinsics, CameraPose, CameraProjector, CameraRegistry, ClassifiedFrame,
    ClassifierConfig, FrameSender, ImageSize, ObservationBuffer, OverheadCamera, PixelLabel,
};

pub use grid::{
    CellCounts, CellRegion, FusionConfig, FusionEngine, FusionMode, FusionResult, GridSize,
    OccupancyGrid, SkipReason,
};

pub use coverage::required_extent;

pub use layer::{
    DEFAULT_MAX_GRID_DIMENSION, LayerReport, LayeredMap, MapLayer, OverheadCameraLayer,
    UpdateReport,
};

pub use config::{ConfigLoadError, DrishtiConfig};
