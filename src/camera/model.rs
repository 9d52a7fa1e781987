//! Camera pose and pinhole parameters.

use serde::{Deserialize, Serialize};

/// Position of a downward-looking camera in the map frame.
///
/// The optical axis points straight down at the ground plane (z = 0), so only
/// the ground position and the mounting height matter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// X position in meters
    pub x: f32,
    /// Y position in meters
    pub y: f32,
    /// Height above the ground plane in meters (> 0)
    pub height: f32,
}

impl CameraPose {
    /// Create a new camera pose
    #[inline]
    pub fn new(x: f32, y: f32, height: f32) -> Self {
        Self { x, y, height }
    }
}

/// Pinhole intrinsics in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length along image columns
    pub focal_x: f32,
    /// Focal length along image rows
    pub focal_y: f32,
    /// Principal point column
    pub principal_x: f32,
    /// Principal point row
    pub principal_y: f32,
}

impl Default for CameraIntrinsics {
    /// Intrinsics of the simulated 640x480 overhead camera.
    fn default() -> Self {
        Self {
            focal_x: 381.362,
            focal_y: 381.362,
            principal_x: 320.5,
            principal_y: 240.5,
        }
    }
}

impl CameraIntrinsics {
    /// Create intrinsics from focal lengths and principal point
    pub fn new(focal_x: f32, focal_y: f32, principal_x: f32, principal_y: f32) -> Self {
        Self {
            focal_x,
            focal_y,
            principal_x,
            principal_y,
        }
    }

    /// First invalid parameter, if any.
    pub(crate) fn invalid_reason(&self) -> Option<String> {
        let values = [
            ("focal_x", self.focal_x),
            ("focal_y", self.focal_y),
            ("principal_x", self.principal_x),
            ("principal_y", self.principal_y),
        ];
        values
            .iter()
            .find(|(_, v)| !v.is_finite() || *v <= 0.0)
            .map(|(name, v)| format!("{} must be positive, got {}", name, v))
    }
}

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width (columns)
    pub width: u32,
    /// Height (rows)
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl ImageSize {
    /// Create a new image size
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let intrinsics = CameraIntrinsics::default();
        assert_eq!(intrinsics.focal_x, 381.362);
        assert_eq!(intrinsics.principal_y, 240.5);
        assert!(intrinsics.invalid_reason().is_none());

        let size = ImageSize::default();
        assert_eq!(size.pixel_count(), 640 * 480);
    }

    #[test]
    fn test_invalid_intrinsics() {
        let intrinsics = CameraIntrinsics::new(381.0, 0.0, 320.5, 240.5);
        let reason = intrinsics.invalid_reason().unwrap();
        assert!(reason.contains("focal_y"));

        let intrinsics = CameraIntrinsics::new(f32::NAN, 381.0, 320.5, 240.5);
        assert!(intrinsics.invalid_reason().unwrap().contains("focal_x"));
    }
}
