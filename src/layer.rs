//! Costmap-style layers and a minimal host that drives them.
//!
//! A host owns the master grid and calls every layer in two phases per tick:
//!
//! 1. `update_bounds`: each layer grows the world region it wants refreshed
//!    and may ask for a bigger grid. The host applies the largest request,
//!    keeping existing cells, up to its maximum size.
//! 2. `update_costs`: each layer writes into the clipped cell region.
//!
//! [`OverheadCameraLayer`] is the camera fusion layer. [`LayeredMap`] is a
//! small host for tools and tests; a robot stack would supply its own.

use log::{debug, info, warn};

use crate::camera::{CameraRegistry, FrameSender, OverheadCamera};
use crate::core::{Bounds, WorldPoint};
use crate::coverage;
use crate::error::CameraError;
use crate::grid::{
    CellRegion, FusionConfig, FusionEngine, FusionResult, GridSize, OccupancyGrid, SkipReason,
};

/// A plugin that contributes to the master grid.
pub trait MapLayer {
    /// Layer name, unique per host.
    fn name(&self) -> &str;

    /// Disabled layers request nothing and write nothing.
    fn enabled(&self) -> bool;

    /// Grow `bounds` by the world region this layer will update.
    ///
    /// Returns a grid size if the layer needs the grid to be at least that big.
    fn update_bounds(&mut self, grid: &OccupancyGrid, bounds: &mut Bounds) -> Option<GridSize>;

    /// Write this layer's data into `region` of the grid.
    fn update_costs(&mut self, grid: &mut OccupancyGrid, region: CellRegion) -> FusionResult;

    /// Drop any cached state.
    fn reset(&mut self);
}

/// Fuses overhead cameras into the master grid.
#[derive(Debug)]
pub struct OverheadCameraLayer {
    name: String,
    enabled: bool,
    cameras: CameraRegistry,
    engine: FusionEngine,
    /// Last coverage requirement and the geometry it was computed for.
    desired: Option<DesiredSize>,
    cameras_changed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DesiredSize {
    size: Option<GridSize>,
    origin: WorldPoint,
    resolution: f32,
}

impl OverheadCameraLayer {
    /// Layer without cameras.
    pub fn new(name: impl Into<String>, config: FusionConfig) -> Self {
        Self::with_cameras(name, CameraRegistry::new(), config)
    }

    /// Layer over an existing registry.
    pub fn with_cameras(
        name: impl Into<String>,
        cameras: CameraRegistry,
        config: FusionConfig,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            cameras,
            engine: FusionEngine::new(config),
            desired: None,
            cameras_changed: true,
        }
    }

    /// Switch the layer on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Register another camera at the lowest priority.
    pub fn add_camera(&mut self, camera: OverheadCamera) -> Result<(), CameraError> {
        self.cameras.insert(camera)?;
        self.cameras_changed = true;
        Ok(())
    }

    /// Unregister a camera.
    pub fn remove_camera(&mut self, id: &str) -> Result<OverheadCamera, CameraError> {
        let camera = self.cameras.remove(id)?;
        self.cameras_changed = true;
        Ok(camera)
    }

    /// Registered cameras
    pub fn cameras(&self) -> &CameraRegistry {
        &self.cameras
    }

    /// Mutable access to a camera. Coverage is recomputed on the next tick.
    pub fn camera_mut(&mut self, id: &str) -> Option<&mut OverheadCamera> {
        self.cameras_changed = true;
        self.cameras.get_mut(id)
    }

    /// Producer handle for a camera's frames.
    pub fn sender(&self, id: &str) -> Result<FrameSender, CameraError> {
        self.cameras.sender(id)
    }

    /// Fusion engine (warning counters, refresh layers)
    pub fn engine(&self) -> &FusionEngine {
        &self.engine
    }

    /// Grid size needed to cover every camera from the given geometry.
    pub fn desired_size(&mut self, origin: WorldPoint, resolution: f32) -> Option<GridSize> {
        let current = DesiredSize {
            size: None,
            origin,
            resolution,
        };
        let stale = match self.desired {
            Some(d) => d.origin != origin || d.resolution != resolution,
            None => true,
        };

        if stale || self.cameras_changed {
            let size = coverage::required_extent(self.cameras.fov_bounds(), origin, resolution);
            let changed = self.desired.map(|d| d.size) != Some(size);
            if changed {
                match size {
                    Some(s) => info!(
                        "Layer '{}': {} cameras need a {}x{} grid",
                        self.name,
                        self.cameras.len(),
                        s.width,
                        s.height
                    ),
                    None => debug!("Layer '{}': no coverage requirement", self.name),
                }
            }
            self.desired = Some(DesiredSize { size, ..current });
            self.cameras_changed = false;
        }

        self.desired.and_then(|d| d.size)
    }
}

impl MapLayer for OverheadCameraLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn update_bounds(&mut self, grid: &OccupancyGrid, bounds: &mut Bounds) -> Option<GridSize> {
        if !self.enabled {
            return None;
        }

        for fov in self.cameras.fov_bounds() {
            *bounds = bounds.union(&fov);
        }

        let desired = self.desired_size(grid.origin(), grid.resolution())?;
        if desired.fits_in(&grid.size()) {
            None
        } else {
            Some(desired.max(grid.size()))
        }
    }

    fn update_costs(&mut self, grid: &mut OccupancyGrid, region: CellRegion) -> FusionResult {
        if !self.enabled {
            return FusionResult::skipped(SkipReason::Disabled);
        }
        self.engine.update(&mut self.cameras, grid, region)
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.desired = None;
    }
}

/// Outcome of one layer in a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerReport {
    /// Layer name
    pub name: String,
    /// What the layer wrote
    pub result: FusionResult,
}

/// Outcome of one [`LayeredMap::update`] tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateReport {
    /// New grid size, if a layer asked for a resize
    pub resized_to: Option<GridSize>,
    /// Size the layers asked for, if it was over the host's maximum
    pub capped_request: Option<GridSize>,
    /// World region the layers asked to refresh
    pub bounds: Bounds,
    /// Cells handed to `update_costs`
    pub region: CellRegion,
    /// Per-layer results, in layer order
    pub layers: Vec<LayerReport>,
}

impl UpdateReport {
    /// All layer results merged. Skipped only if every layer skipped.
    pub fn total(&self) -> FusionResult {
        let mut results = self.layers.iter().map(|l| l.result);
        let Some(mut total) = results.next() else {
            return FusionResult::default();
        };
        for result in results {
            total.merge(&result);
        }
        total
    }
}

/// Largest grid [`LayeredMap::new`] grows to, per axis (cells).
pub const DEFAULT_MAX_GRID_DIMENSION: usize = 4000;

/// Minimal host: a master grid plus an ordered list of layers.
pub struct LayeredMap {
    grid: OccupancyGrid,
    layers: Vec<Box<dyn MapLayer + Send>>,
    /// Growth limit (to limit memory)
    max_size: GridSize,
    /// Last over-limit request, warned once until it changes
    capped_request: Option<GridSize>,
}

impl LayeredMap {
    /// Host over an existing grid, growing up to
    /// [`DEFAULT_MAX_GRID_DIMENSION`] cells per axis.
    pub fn new(grid: OccupancyGrid) -> Self {
        let max = GridSize::new(DEFAULT_MAX_GRID_DIMENSION, DEFAULT_MAX_GRID_DIMENSION);
        Self::with_max_size(grid, max)
    }

    /// Host over an existing grid with an explicit growth limit.
    ///
    /// Layer requests beyond `max_size` are clamped to it. The grid never
    /// shrinks, so a grid already larger than `max_size` stays as it is.
    pub fn with_max_size(grid: OccupancyGrid, max_size: GridSize) -> Self {
        Self {
            grid,
            layers: Vec::new(),
            max_size,
            capped_request: None,
        }
    }

    /// Growth limit
    pub fn max_size(&self) -> GridSize {
        self.max_size
    }

    /// Append a layer. Layers run in insertion order.
    pub fn add_layer<L>(&mut self, layer: L)
    where
        L: MapLayer + Send + 'static,
    {
        info!("Added layer '{}'", layer.name());
        self.layers.push(Box::new(layer));
    }

    /// Master grid
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Mutable master grid
    pub fn grid_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.grid
    }

    /// Place the master grid in the world.
    pub fn set_origin(&mut self, origin: WorldPoint) {
        info!("Map origin set to ({:.2}, {:.2})", origin.x, origin.y);
        self.grid.set_origin(origin);
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&(dyn MapLayer + Send)> {
        self.layers
            .iter()
            .find(|l| l.name() == name)
            .map(|l| l.as_ref())
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Reset every layer and clear the master grid.
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
        self.grid.clear();
    }

    /// Run one bounds + costs cycle over all layers.
    pub fn update(&mut self) -> UpdateReport {
        let mut bounds = Bounds::empty();
        let mut target = self.grid.size();
        for layer in self.layers.iter_mut().filter(|l| l.enabled()) {
            if let Some(size) = layer.update_bounds(&self.grid, &mut bounds) {
                target = target.max(size);
            }
        }

        let previous = self.grid.size();
        let requested = target;
        let capped_request = if requested.fits_in(&self.max_size.max(previous)) {
            None
        } else {
            target = requested.min(self.max_size).max(previous);
            Some(requested)
        };
        if capped_request.is_some() && capped_request != self.capped_request {
            warn!(
                "Layers asked for a {}x{} grid, over the {}x{} limit; clamped to {}x{}",
                requested.width,
                requested.height,
                self.max_size.width,
                self.max_size.height,
                target.width,
                target.height
            );
        }
        self.capped_request = capped_request;

        let resized_to = if self.grid.resize(target) {
            info!(
                "Resized map from {}x{} to {}x{} (existing cells kept)",
                previous.width, previous.height, target.width, target.height
            );
            Some(target)
        } else {
            None
        };

        let region = self.grid.region_for(&bounds);
        let layers = self
            .layers
            .iter_mut()
            .map(|layer| LayerReport {
                name: layer.name().to_string(),
                result: layer.update_costs(&mut self.grid, region),
            })
            .collect();

        UpdateReport {
            resized_to,
            capped_request,
            bounds,
            region,
            layers,
        }
    }
}
