//! Pinhole projection between the ground plane and a camera image.
//!
//! With the camera looking straight down from a known height, every ground
//! point lies at the same depth, so the pinhole model reduces to an affine map
//! in both directions:
//!
//! ```text
//! world -> pixel:  px =  (wx - pose.x) * fx / h + cx
//!                  py = -(wy - pose.y) * fy / h + cy
//!
//! pixel -> world:  wx =  (px - cx) * h / fx + pose.x
//!                  wy = -(py - cy) * h / fy + pose.y
//! ```
//!
//! Image rows grow downward while world Y grows up, hence the sign flip on Y.
//!
//! Pixel space is half-open: a pixel is in bounds when `0 <= px < width` and
//! `0 <= py < height`. The field of view is the projection of the outer image
//! corners, so its edges map to `px == width` / `py == height`, which are
//! outside the pixel grid.

use crate::core::{Bounds, PixelCoord, WorldPoint};
use crate::error::CameraError;

use super::model::{CameraIntrinsics, CameraPose, ImageSize};

/// One overhead camera's geometry with its cached ground footprint.
#[derive(Clone, Debug)]
pub struct CameraProjector {
    id: String,
    pose: CameraPose,
    intrinsics: CameraIntrinsics,
    image_size: ImageSize,
    /// Ground rectangle seen by the camera; refreshed by every setter.
    fov: Bounds,
}

impl CameraProjector {
    /// Create a camera with the default 640x480 intrinsics.
    pub fn new(id: impl Into<String>, pose: CameraPose) -> Result<Self, CameraError> {
        Self::with_model(id, pose, CameraIntrinsics::default(), ImageSize::default())
    }

    /// Create a camera with explicit intrinsics and image size.
    pub fn with_model(
        id: impl Into<String>,
        pose: CameraPose,
        intrinsics: CameraIntrinsics,
        image_size: ImageSize,
    ) -> Result<Self, CameraError> {
        let id = id.into();
        validate_pose(&id, &pose)?;
        validate_intrinsics(&id, &intrinsics)?;
        validate_image_size(&id, &image_size)?;

        let mut projector = Self {
            id,
            pose,
            intrinsics,
            image_size,
            fov: Bounds::empty(),
        };
        projector.fov = projector.compute_fov();
        Ok(projector)
    }

    /// Camera identifier
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Camera pose
    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Pinhole intrinsics
    #[inline]
    pub fn intrinsics(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    /// Image dimensions
    #[inline]
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    /// Move the camera. The field of view is recomputed.
    pub fn set_pose(&mut self, pose: CameraPose) -> Result<(), CameraError> {
        validate_pose(&self.id, &pose)?;
        self.pose = pose;
        self.fov = self.compute_fov();
        Ok(())
    }

    /// Replace the intrinsics. The field of view is recomputed.
    pub fn set_intrinsics(&mut self, intrinsics: CameraIntrinsics) -> Result<(), CameraError> {
        validate_intrinsics(&self.id, &intrinsics)?;
        self.intrinsics = intrinsics;
        self.fov = self.compute_fov();
        Ok(())
    }

    /// Change the image size. The field of view is recomputed.
    pub fn set_image_size(&mut self, image_size: ImageSize) -> Result<(), CameraError> {
        validate_image_size(&self.id, &image_size)?;
        self.image_size = image_size;
        self.fov = self.compute_fov();
        Ok(())
    }

    /// Project a pixel onto the ground plane.
    ///
    /// Returns the world point and whether it lies inside the field of view.
    #[inline]
    pub fn pixel_to_world(&self, px: f32, py: f32) -> (WorldPoint, bool) {
        let point = self.project(px, py);
        (point, self.fov.contains(point))
    }

    /// Project a ground point into the image.
    ///
    /// The pixel is truncated toward zero and saturated at 0. The flag is
    /// false when the un-truncated position falls outside `[0, width) x [0, height)`.
    /// Positions within [`PIXEL_SNAP`] of a whole pixel are snapped to it
    /// first, so projected pixel corners map back to their own pixel.
    #[inline]
    pub fn world_to_pixel(&self, point: WorldPoint) -> (PixelCoord, bool) {
        let CameraIntrinsics {
            focal_x,
            focal_y,
            principal_x,
            principal_y,
        } = self.intrinsics;
        let h = f64::from(self.pose.height);

        let px = (f64::from(point.x) - f64::from(self.pose.x)) * f64::from(focal_x) / h
            + f64::from(principal_x);
        let py = -(f64::from(point.y) - f64::from(self.pose.y)) * f64::from(focal_y) / h
            + f64::from(principal_y);
        let (px, py) = (snap_to_pixel(px), snap_to_pixel(py));

        let in_bounds = px >= 0.0
            && py >= 0.0
            && px < f64::from(self.image_size.width)
            && py < f64::from(self.image_size.height);

        // `as u32` truncates and saturates negatives and NaN to 0
        (PixelCoord::new(px as u32, py as u32), in_bounds)
    }

    /// Ground rectangle covered by the image.
    #[inline]
    pub fn world_fov(&self) -> Bounds {
        self.fov
    }

    /// Does the field of view contain this ground point? Edges included.
    #[inline]
    pub fn covers_world(&self, point: WorldPoint) -> bool {
        self.fov.contains(point)
    }

    /// Unchecked inverse projection.
    #[inline]
    fn project(&self, px: f32, py: f32) -> WorldPoint {
        let CameraIntrinsics {
            focal_x,
            focal_y,
            principal_x,
            principal_y,
        } = self.intrinsics;
        let h = f64::from(self.pose.height);

        let wx = (f64::from(px) - f64::from(principal_x)) * h / f64::from(focal_x)
            + f64::from(self.pose.x);
        let wy = -(f64::from(py) - f64::from(principal_y)) * h / f64::from(focal_y)
            + f64::from(self.pose.y);
        WorldPoint::new(wx as f32, wy as f32)
    }

    /// Project the bottom-left and top-right image corners.
    fn compute_fov(&self) -> Bounds {
        let width = self.image_size.width as f32;
        let height = self.image_size.height as f32;

        let bottom_left = self.project(0.0, height);
        let top_right = self.project(width, 0.0);
        Bounds::from_corners(bottom_left, top_right)
    }
}

/// Snap a pixel position to the nearest whole pixel when this close to it.
///
/// Covers the f32 rounding of world coordinates, which is far below a
/// thousandth of a pixel for any sane camera height and focal length.
pub const PIXEL_SNAP: f64 = 1e-3;

#[inline]
fn snap_to_pixel(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < PIXEL_SNAP {
        nearest
    } else {
        value
    }
}

fn validate_pose(id: &str, pose: &CameraPose) -> Result<(), CameraError> {
    if !pose.x.is_finite() || !pose.y.is_finite() {
        return Err(CameraError::InvalidPose { id: id.to_string() });
    }
    if !pose.height.is_finite() || pose.height <= 0.0 {
        return Err(CameraError::InvalidHeight {
            id: id.to_string(),
            height: pose.height,
        });
    }
    Ok(())
}

fn validate_intrinsics(id: &str, intrinsics: &CameraIntrinsics) -> Result<(), CameraError> {
    match intrinsics.invalid_reason() {
        Some(reason) => Err(CameraError::InvalidIntrinsics {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn validate_image_size(id: &str, size: &ImageSize) -> Result<(), CameraError> {
    if size.width == 0 || size.height == 0 {
        return Err(CameraError::InvalidImageSize {
            id: id.to_string(),
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}
