//! Map export and frame loading.
//!
//! - **ROS export**: map_server compatible PGM + YAML of the fused grid
//! - **Frames**: decode classified camera images from disk
//!
//! ```rust,ignore
//! use drishti::io::{export_ros_map, load_frame};
//! use std::path::Path;
//!
//! // Creates fused.pgm and fused.yaml
//! export_ros_map(map.grid(), Path::new("fused"))?;
//!
//! let image = load_frame(Path::new("frames/cam0.png"))?;
//! sender.send_resized(image)?;
//! ```

pub mod frames;
pub mod pgm;

pub use frames::{load_classified_frame, load_frame};
pub use pgm::{MapMetadata, export_pgm, export_ros_map, export_yaml, load_ros_map, write_pgm};
