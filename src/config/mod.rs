//! Configuration loading for Drishti.
//!
//! Loads everything from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::config::DrishtiConfig;
//!
//! // Load from default path (configs/drishti.yaml)
//! let config = DrishtiConfig::load_default()?;
//!
//! // Build the fusion layer and the initial grid
//! let layer = config.build_layer("overhead")?;
//! let grid = config.to_grid();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`FusionSection`] | Merge mode, occupancy threshold, lookup window |
//! | [`GridSection`] | Initial map size, resolution, origin |
//! | [`CameraSection`] | One camera: id, source, pose, optional model |
//!
//! ## Example YAML
//!
//! ```yaml
//! enabled: true
//! fusion:
//!   mode: first_writer        # or "refresh"
//!   occupied_threshold: 128
//!   neighborhood_radius: 0
//! grid:
//!   resolution: 0.05
//!   origin_x: -5.0
//!   origin_y: -5.0
//! cameras:
//!   - id: ceiling_north
//!     topic: /overhead/north/image
//!     pose: { x: 0.0, y: 2.5, height: 3.0 }
//!     intrinsics: { focal_x: 381.362, focal_y: 381.362, principal_x: 320.5, principal_y: 240.5 }
//!     image: { width: 640, height: 480 }
//! ```
//!
//! ## Legacy Parameters
//!
//! The flat nav2 plugin form is still accepted and appended after `cameras`:
//!
//! ```yaml
//! num_overhead_cameras: 2
//! overhead_topics: [/overhead_cam_1/image_raw, /overhead_cam_2/image_raw]
//! camera_poses: "[[0.0, 0.0, 3.0], [5.0, 0.0, 3.0]]"
//! ```

mod camera;
mod defaults;
mod drishti;
mod fusion;
mod grid;

// Re-export main types
pub use crate::error::ConfigLoadError;
pub use drishti::DrishtiConfig;

// Re-export section types
pub use camera::{CameraSection, parse_pose_list};
pub use fusion::FusionSection;
pub use grid::GridSection;
