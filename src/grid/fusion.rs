//! Multi-camera fusion into the shared occupancy grid.
//!
//! Each pass visits the cameras in registry order. Only cameras with a new
//! frame contribute. For every cell of the update region inside a camera's
//! field of view, the cell centre is projected into the image and the pixel
//! label is written, but only into cells that are still unknown:
//!
//! ```text
//! for camera in registry (priority order):
//!     if !camera.consume_update(): continue
//!     for cell in region ∩ fov(camera):
//!         centre = grid_to_world(cell)
//!         (pixel, ok) = world_to_pixel(centre)
//!         if ok and cell is Unknown:
//!             cell = label_at(pixel)
//! ```
//!
//! A known cell is never changed within a pass, so the first camera to see a
//! cell owns it and later cameras cannot flip it.
//!
//! Nothing is written while the grid origin is unset. Such a pass is skipped
//! without consuming pending frames, so the next pass still fuses them.

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraProjector, CameraRegistry, ObservationBuffer};
use crate::core::{CellType, GridCoord};

use super::storage::{CellRegion, OccupancyGrid};

/// How a camera's observation reaches the shared grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    /// Write labels straight into unknown cells of the shared grid.
    #[default]
    FirstWriter,
    /// Rebuild a private per-camera grid from the newest frame each pass,
    /// then merge it into unknown cells of the shared grid.
    Refresh,
}

/// Fusion engine settings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FusionConfig {
    /// Merge strategy
    pub mode: FusionMode,
}

/// Why a pass wrote nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Grid origin is still at the (0, 0) sentinel or not finite.
    OriginNotSet,
    /// The update region has no cells.
    EmptyRegion,
    /// The layer is switched off.
    Disabled,
}

/// Statistics from a fusion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FusionResult {
    /// Cells newly marked free
    pub cells_free: usize,
    /// Cells newly marked occupied
    pub cells_occupied: usize,
    /// Cells inside a footprint that were already known
    pub cells_already_known: usize,
    /// Cells inside a footprint whose centre fell outside the image
    pub cells_rejected: usize,
    /// Cameras that had a new frame and were fused
    pub cameras_fused: usize,
    /// Set when the pass did not run
    pub skipped: Option<SkipReason>,
}

impl FusionResult {
    /// Result of a pass that did not run.
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Default::default()
        }
    }

    /// Cells written to the shared grid.
    #[inline]
    pub fn cells_written(&self) -> usize {
        self.cells_free + self.cells_occupied
    }

    /// Did the pass run?
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }

    /// Merge another result into this one.
    ///
    /// Counters add up; the skip reason is kept only if both were skipped.
    pub fn merge(&mut self, other: &FusionResult) {
        self.cells_free += other.cells_free;
        self.cells_occupied += other.cells_occupied;
        self.cells_already_known += other.cells_already_known;
        self.cells_rejected += other.cells_rejected;
        self.cameras_fused += other.cameras_fused;
        if other.skipped.is_none() {
            self.skipped = None;
        }
    }

    fn record_write(&mut self, cell_type: CellType) {
        match cell_type {
            CellType::Free => self.cells_free += 1,
            CellType::Occupied => self.cells_occupied += 1,
            CellType::Unknown => {}
        }
    }
}

/// Fuses camera observations into a shared grid.
#[derive(Debug, Default)]
pub struct FusionEngine {
    config: FusionConfig,
    /// Private per-camera grids, keyed by camera id (refresh mode only).
    layers: HashMap<String, OccupancyGrid>,
    /// Origin has been unset since the last warning.
    origin_outage: bool,
    origin_warnings: usize,
}

impl FusionEngine {
    /// Create an engine.
    pub fn new(config: FusionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Current settings
    pub fn config(&self) -> FusionConfig {
        self.config
    }

    /// Switch merge strategy. Private layers are dropped.
    pub fn set_mode(&mut self, mode: FusionMode) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.layers.clear();
        }
    }

    /// Number of "origin not set" warnings emitted so far.
    pub fn origin_warning_count(&self) -> usize {
        self.origin_warnings
    }

    /// Private grid of a camera, populated in refresh mode.
    pub fn camera_layer(&self, id: &str) -> Option<&OccupancyGrid> {
        self.layers.get(id)
    }

    /// Forget private layers and outage state.
    pub fn reset(&mut self) {
        self.layers.clear();
        self.origin_outage = false;
    }

    /// Run one fusion pass over `region` of `grid`.
    pub fn update(
        &mut self,
        cameras: &mut CameraRegistry,
        grid: &mut OccupancyGrid,
        region: CellRegion,
    ) -> FusionResult {
        if !grid.origin_is_set() {
            if self.origin_outage {
                debug!("Map origin still not set, skipping camera fusion");
            } else {
                warn!("Map origin not set yet, skipping camera fusion");
                self.origin_outage = true;
                self.origin_warnings += 1;
            }
            return FusionResult::skipped(SkipReason::OriginNotSet);
        }
        self.origin_outage = false;

        let region = region.clamp_to(grid.size());
        if region.is_empty() {
            trace!("Empty update region, skipping camera fusion");
            return FusionResult::skipped(SkipReason::EmptyRegion);
        }

        // Drop layers of cameras that left the registry
        self.layers.retain(|id, _| cameras.contains(id));

        let mut result = FusionResult::default();
        for camera in cameras.iter_mut() {
            if !camera.buffer_mut().consume_update() {
                trace!("Camera '{}': no new frame", camera.id());
                continue;
            }

            let footprint = region.intersect(&grid.region_for(&camera.fov()));
            let camera_result = match self.config.mode {
                FusionMode::FirstWriter => {
                    fuse_first_writer(camera.projector(), camera.buffer(), grid, footprint)
                }
                FusionMode::Refresh => {
                    let layer = self
                        .layers
                        .entry(camera.id().to_string())
                        .or_insert_with(|| grid.same_geometry());
                    if !layer.matches_geometry(grid) {
                        *layer = grid.same_geometry();
                    }
                    fuse_refresh(
                        camera.projector(),
                        camera.buffer(),
                        layer,
                        grid,
                        region,
                        footprint,
                    )
                }
            };

            debug!(
                "Camera '{}': {} free, {} occupied, {} already known, {} rejected",
                camera.id(),
                camera_result.cells_free,
                camera_result.cells_occupied,
                camera_result.cells_already_known,
                camera_result.cells_rejected
            );

            result.merge(&camera_result);
            result.cameras_fused += 1;
        }

        result
    }
}

/// Label for a world cell as seen by one camera, `None` if it cannot see it.
#[inline]
fn observe_cell(
    projector: &CameraProjector,
    buffer: &ObservationBuffer,
    grid: &OccupancyGrid,
    coord: GridCoord,
) -> Option<CellType> {
    let (pixel, in_bounds) = projector.world_to_pixel(grid.grid_to_world(coord));
    if !in_bounds {
        return None;
    }
    buffer.label_at(pixel.x, pixel.y).map(CellType::from)
}

fn fuse_first_writer(
    projector: &CameraProjector,
    buffer: &ObservationBuffer,
    grid: &mut OccupancyGrid,
    footprint: CellRegion,
) -> FusionResult {
    let mut result = FusionResult::default();

    for coord in footprint.coords() {
        if grid.get_type(coord).is_known() {
            result.cells_already_known += 1;
            continue;
        }
        match observe_cell(projector, buffer, grid, coord) {
            Some(cell_type) => {
                if grid.set_type_if_unknown(coord, cell_type) {
                    result.record_write(cell_type);
                }
            }
            None => result.cells_rejected += 1,
        }
    }

    result
}

fn fuse_refresh(
    projector: &CameraProjector,
    buffer: &ObservationBuffer,
    layer: &mut OccupancyGrid,
    grid: &mut OccupancyGrid,
    region: CellRegion,
    footprint: CellRegion,
) -> FusionResult {
    let mut result = FusionResult::default();

    // Everything outside the current footprint reverts to unknown
    layer.clear_region(region);
    for coord in footprint.coords() {
        match observe_cell(projector, buffer, layer, coord) {
            Some(cell_type) => {
                layer.set_type(coord, cell_type);
            }
            None => result.cells_rejected += 1,
        }
    }

    for coord in footprint.coords() {
        let cell_type = layer.get_type(coord);
        if !cell_type.is_known() {
            continue;
        }
        if grid.set_type_if_unknown(coord, cell_type) {
            result.record_write(cell_type);
        } else {
            result.cells_already_known += 1;
        }
    }

    result
}
