//! Loading classified frames from image files.

use std::path::Path;

use image::GrayImage;

use crate::camera::{ClassifiedFrame, ImageSize};
use crate::error::{FrameError, Result};

/// Decode an image file as grey levels (any format the `image` crate reads).
pub fn load_frame(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)?.into_luma8())
}

/// Decode an image file that must already have the camera's size.
pub fn load_classified_frame(path: &Path, expected: ImageSize) -> Result<ClassifiedFrame> {
    let image = load_frame(path)?;
    if image.width() != expected.width || image.height() != expected.height {
        return Err(FrameError::DimensionMismatch {
            expected_width: expected.width,
            expected_height: expected.height,
            actual_width: image.width(),
            actual_height: image.height(),
        }
        .into());
    }
    Ok(ClassifiedFrame::new(image))
}
