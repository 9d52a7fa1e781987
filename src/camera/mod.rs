//! Overhead camera model and observation handling.
//!
//! - [`CameraProjector`]: pinhole projection between pixels and the ground plane
//! - [`ObservationBuffer`]: newest classified frame per camera
//! - [`FrameSender`]: thread-safe producer handle feeding a buffer
//! - [`CameraRegistry`]: cameras keyed by id, in fusion priority order

mod model;
mod observation;
mod projector;
mod registry;

pub use model::{CameraIntrinsics, CameraPose, ImageSize};
pub use observation::{ClassifiedFrame, ClassifierConfig, FrameSender, ObservationBuffer, PixelLabel};
pub use projector::{CameraProjector, PIXEL_SNAP};
pub use registry::{CameraRegistry, OverheadCamera};
