//! Cameras owned by the fusion layer, in priority order.

use log::info;

use crate::core::Bounds;
use crate::error::CameraError;

use super::model::{CameraIntrinsics, CameraPose};
use super::observation::{ClassifierConfig, FrameSender, ObservationBuffer};
use super::projector::CameraProjector;

/// One camera: geometry plus its latest observation.
#[derive(Debug)]
pub struct OverheadCamera {
    projector: CameraProjector,
    buffer: ObservationBuffer,
    topic: Option<String>,
}

impl OverheadCamera {
    /// Pair a projector with an empty buffer sized to its image.
    pub fn new(projector: CameraProjector) -> Self {
        Self::with_classifier(projector, ClassifierConfig::default())
    }

    /// Same as [`OverheadCamera::new`] with a custom classifier.
    pub fn with_classifier(projector: CameraProjector, classifier: ClassifierConfig) -> Self {
        let buffer = ObservationBuffer::with_classifier(projector.image_size(), classifier);
        Self {
            projector,
            buffer,
            topic: None,
        }
    }

    /// Attach the image source name.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Camera id
    #[inline]
    pub fn id(&self) -> &str {
        self.projector.id()
    }

    /// Image source name, if configured
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Camera geometry
    #[inline]
    pub fn projector(&self) -> &CameraProjector {
        &self.projector
    }

    /// Observation buffer
    #[inline]
    pub fn buffer(&self) -> &ObservationBuffer {
        &self.buffer
    }

    /// Mutable observation buffer
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut ObservationBuffer {
        &mut self.buffer
    }

    /// Producer handle for this camera's frames.
    pub fn sender(&self) -> FrameSender {
        self.buffer.sender()
    }

    /// Move the camera.
    pub fn set_pose(&mut self, pose: CameraPose) -> Result<(), CameraError> {
        self.projector.set_pose(pose)
    }

    /// Replace the intrinsics.
    pub fn set_intrinsics(&mut self, intrinsics: CameraIntrinsics) -> Result<(), CameraError> {
        self.projector.set_intrinsics(intrinsics)
    }

    /// Ground footprint
    #[inline]
    pub fn fov(&self) -> Bounds {
        self.projector.world_fov()
    }
}

/// Cameras keyed by id.
///
/// Iteration follows registration order, which is also fusion priority: the
/// first camera to observe a cell owns it.
#[derive(Debug, Default)]
pub struct CameraRegistry {
    cameras: Vec<OverheadCamera>,
}

impl CameraRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a camera at the lowest priority. Ids must be unique.
    pub fn insert(&mut self, camera: OverheadCamera) -> Result<(), CameraError> {
        if self.contains(camera.id()) {
            return Err(CameraError::DuplicateId(camera.id().to_string()));
        }

        let fov = camera.fov();
        info!(
            "Registered camera '{}' (priority {}), FOV [{:.2}, {:.2}] x [{:.2}, {:.2}]",
            camera.id(),
            self.cameras.len(),
            fov.min.x,
            fov.max.x,
            fov.min.y,
            fov.max.y
        );
        self.cameras.push(camera);
        Ok(())
    }

    /// Remove a camera by id.
    pub fn remove(&mut self, id: &str) -> Result<OverheadCamera, CameraError> {
        let index = self
            .position(id)
            .ok_or_else(|| CameraError::UnknownId(id.to_string()))?;
        Ok(self.cameras.remove(index))
    }

    /// Is this id registered?
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Look up a camera
    pub fn get(&self, id: &str) -> Option<&OverheadCamera> {
        self.cameras.iter().find(|c| c.id() == id)
    }

    /// Look up a camera mutably
    pub fn get_mut(&mut self, id: &str) -> Option<&mut OverheadCamera> {
        self.cameras.iter_mut().find(|c| c.id() == id)
    }

    /// Producer handle for a camera.
    pub fn sender(&self, id: &str) -> Result<FrameSender, CameraError> {
        self.get(id)
            .map(OverheadCamera::sender)
            .ok_or_else(|| CameraError::UnknownId(id.to_string()))
    }

    /// Cameras in priority order
    pub fn iter(&self) -> impl Iterator<Item = &OverheadCamera> {
        self.cameras.iter()
    }

    /// Cameras in priority order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OverheadCamera> {
        self.cameras.iter_mut()
    }

    /// Footprint of every camera, in priority order.
    pub fn fov_bounds(&self) -> impl Iterator<Item = Bounds> + '_ {
        self.cameras.iter().map(OverheadCamera::fov)
    }

    /// Number of cameras
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// No cameras registered?
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cameras.iter().position(|c| c.id() == id)
    }
}
