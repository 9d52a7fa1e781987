//! Camera configuration: structured descriptors and the legacy flat form.

use serde::{Deserialize, Serialize};

use crate::camera::{
    CameraIntrinsics, CameraPose, CameraProjector, ClassifierConfig, ImageSize, OverheadCamera,
};
use crate::error::{CameraError, ConfigLoadError};

/// One camera
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSection {
    /// Unique camera id
    pub id: String,

    /// Image source (topic name, device or file pattern)
    #[serde(default)]
    pub topic: Option<String>,

    /// Mounting position
    pub pose: CameraPose,

    /// Pinhole intrinsics (default: 640x480 simulated camera)
    #[serde(default)]
    pub intrinsics: Option<CameraIntrinsics>,

    /// Image size (default 640x480)
    #[serde(default)]
    pub image: Option<ImageSize>,
}

impl CameraSection {
    /// Validate and build the camera.
    pub fn to_camera(&self, classifier: ClassifierConfig) -> Result<OverheadCamera, CameraError> {
        let projector = CameraProjector::with_model(
            self.id.clone(),
            self.pose,
            self.intrinsics.unwrap_or_default(),
            self.image.unwrap_or_default(),
        )?;
        let camera = OverheadCamera::with_classifier(projector, classifier);
        Ok(match &self.topic {
            Some(topic) => camera.with_topic(topic.clone()),
            None => camera,
        })
    }
}

/// Parse a nav2-style pose list: `"[[x, y, z], [x, y, z]]"`.
///
/// The value is a YAML flow sequence of `[x, y, height]` triples. An empty
/// string is an empty list.
pub fn parse_pose_list(input: &str) -> Result<Vec<CameraPose>, ConfigLoadError> {
    let text = input.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let triples: Vec<[f32; 3]> = serde_yaml::from_str(text)
        .map_err(|e| ConfigLoadError::PoseList(format!("'{}': {}", input, e)))?;
    Ok(triples
        .into_iter()
        .map(|[x, y, height]| CameraPose::new(x, y, height))
        .collect())
}
