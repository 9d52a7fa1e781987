//! Main DrishtiConfig and conversion methods.

use std::collections::HashSet;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::camera::CameraRegistry;
use crate::error::{CameraError, ConfigLoadError};
use crate::grid::{FusionConfig, OccupancyGrid};
use crate::layer::{LayeredMap, OverheadCameraLayer};

use super::camera::{CameraSection, parse_pose_list};
use super::defaults;
use super::fusion::FusionSection;
use super::grid::GridSection;

/// Full Drishti configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrishtiConfig {
    /// Layer on/off
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Fusion settings
    #[serde(default)]
    pub fusion: FusionSection,

    /// Initial map geometry
    #[serde(default)]
    pub grid: GridSection,

    /// Cameras in priority order
    #[serde(default)]
    pub cameras: Vec<CameraSection>,

    /// Legacy: number of cameras in `overhead_topics` / `camera_poses`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_overhead_cameras: Option<usize>,

    /// Legacy: image topic per camera
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overhead_topics: Vec<String>,

    /// Legacy: `"[[x, y, height], ...]"` per camera
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_poses: Option<String>,
}

impl Default for DrishtiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fusion: FusionSection::default(),
            grid: GridSection::default(),
            cameras: Vec::new(),
            num_overhead_cameras: None,
            overhead_topics: Vec::new(),
            camera_poses: None,
        }
    }
}

impl DrishtiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/drishti.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/drishti.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let resolution = self.grid.resolution;
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConfigLoadError::Invalid(format!(
                "grid.resolution must be > 0, got {}",
                resolution
            )));
        }
        if !self.grid.origin_x.is_finite() || !self.grid.origin_y.is_finite() {
            return Err(ConfigLoadError::Invalid(
                "grid origin must be finite".to_string(),
            ));
        }
        if self.grid.max_width == 0 || self.grid.max_height == 0 {
            return Err(ConfigLoadError::Invalid(format!(
                "grid.max_width and grid.max_height must be > 0, got {}x{}",
                self.grid.max_width, self.grid.max_height
            )));
        }
        Ok(())
    }

    /// Every configured camera, structured entries first, then legacy ones.
    ///
    /// Legacy entries are paired by index. If the counts disagree, a warning
    /// is logged and only the cameras with both a topic and a pose are kept.
    /// Ids must be unique across both forms.
    pub fn camera_descriptors(&self) -> Result<Vec<CameraSection>, ConfigLoadError> {
        let mut descriptors = self.cameras.clone();
        descriptors.extend(self.legacy_cameras()?);

        let mut seen = HashSet::new();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.id.as_str()) {
                return Err(CameraError::DuplicateId(descriptor.id.clone()).into());
            }
        }
        Ok(descriptors)
    }

    fn legacy_cameras(&self) -> Result<Vec<CameraSection>, ConfigLoadError> {
        let poses = parse_pose_list(self.camera_poses.as_deref().unwrap_or(""))?;
        let topics = &self.overhead_topics;
        if self.num_overhead_cameras.is_none() && topics.is_empty() && poses.is_empty() {
            return Ok(Vec::new());
        }

        let count = self.num_overhead_cameras.unwrap_or(topics.len());
        if topics.len() != count {
            warn!(
                "Number of overhead cameras ({}) doesn't match overhead topics ({})",
                count,
                topics.len()
            );
        }
        if poses.len() != count {
            warn!(
                "Number of overhead cameras ({}) doesn't match camera poses ({})",
                count,
                poses.len()
            );
        }

        let usable = count.min(topics.len()).min(poses.len());
        Ok(topics
            .iter()
            .zip(poses)
            .take(usable)
            .enumerate()
            .map(|(index, (topic, pose))| CameraSection {
                id: format!("cam {}", index + 1),
                topic: Some(topic.clone()),
                pose,
                intrinsics: None,
                image: None,
            })
            .collect())
    }

    /// Validate every camera and register them in priority order.
    pub fn build_registry(&self) -> Result<CameraRegistry, ConfigLoadError> {
        let classifier = self.fusion.to_classifier_config();
        let mut registry = CameraRegistry::new();
        for descriptor in self.camera_descriptors()? {
            registry.insert(descriptor.to_camera(classifier)?)?;
        }
        Ok(registry)
    }

    /// Build the camera fusion layer.
    pub fn build_layer(&self, name: &str) -> Result<OverheadCameraLayer, ConfigLoadError> {
        let mut layer =
            OverheadCameraLayer::with_cameras(name, self.build_registry()?, self.to_fusion_config());
        layer.set_enabled(self.enabled);
        Ok(layer)
    }

    /// Convert to FusionConfig
    pub fn to_fusion_config(&self) -> FusionConfig {
        self.fusion.to_fusion_config()
    }

    /// Build the initial grid
    pub fn to_grid(&self) -> OccupancyGrid {
        self.grid.to_grid()
    }

    /// Empty host over the initial grid, capped at the configured maximum.
    pub fn to_layered_map(&self) -> LayeredMap {
        LayeredMap::with_max_size(self.to_grid(), self.grid.max_size())
    }
}
