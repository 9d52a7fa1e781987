//! Shared occupancy grid and camera fusion.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Overhead cameras (any number)               │
//! │   FrameSender ──▶ ObservationBuffer    CameraProjector       │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │ newest frame + geometry
//!                               ▼
//!                     ┌───────────────────────┐
//!                     │     FusionEngine      │
//!                     │ (write-if-unknown,    │
//!                     │  registry priority)   │
//!                     └───────────┬───────────┘
//!                                 ▼
//!                     ┌───────────────────────┐
//!                     │     OccupancyGrid     │
//!                     └───────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`OccupancyGrid`]: row-major cell storage with world/grid conversion
//! - [`FusionEngine`]: merges every updated camera into the grid
//! - [`FusionMode`]: direct first-writer fusion or per-camera refresh layers
//! - [`FusionResult`]: per-pass statistics and skip reason

mod fusion;
mod storage;

pub use fusion::{FusionConfig, FusionEngine, FusionMode, FusionResult, SkipReason};
pub use storage::{CellCounts, CellRegion, GridSize, OccupancyGrid};
