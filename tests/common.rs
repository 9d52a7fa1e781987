//! Test utilities for Drishti integration tests.
//!
//! Helpers for building cameras, grids and classified frames.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use drishti::{
    CameraPose, CameraProjector, CellRegion, ClassifiedFrame, GridSize, OccupancyGrid,
    OverheadCamera, WorldPoint,
};
use image::{GrayImage, Luma};

/// Image size of the default camera model.
pub const IMAGE_WIDTH: u32 = 640;
pub const IMAGE_HEIGHT: u32 = 480;

/// Grey value well above the default threshold.
pub const OBSTACLE: u8 = 255;
/// Grey value of empty floor.
pub const FLOOR: u8 = 0;

/// Default 640x480 camera mounted 3 m above (x, y).
pub fn ceiling_camera(id: &str, x: f32, y: f32) -> OverheadCamera {
    let projector = CameraProjector::new(id, CameraPose::new(x, y, 3.0)).unwrap();
    OverheadCamera::new(projector)
}

/// All-unknown grid spanning [min, max) on both axes.
pub fn grid_over(min: WorldPoint, max: WorldPoint, resolution: f32) -> OccupancyGrid {
    let width = ((max.x - min.x) / resolution).round() as usize;
    let height = ((max.y - min.y) / resolution).round() as usize;
    OccupancyGrid::new(GridSize::new(width, height), resolution, min)
}

/// Region covering the whole grid.
pub fn full_region(grid: &OccupancyGrid) -> CellRegion {
    CellRegion::full(grid.size())
}

/// Default-size frame with every pixel at `value`.
pub fn uniform_frame(value: u8) -> ClassifiedFrame {
    ClassifiedFrame::filled(IMAGE_WIDTH, IMAGE_HEIGHT, value)
}

/// Default-size floor frame with an obstacle block over pixels [x0, x1) x [y0, y1).
pub fn frame_with_block(x0: u32, y0: u32, x1: u32, y1: u32) -> ClassifiedFrame {
    let image = GrayImage::from_fn(IMAGE_WIDTH, IMAGE_HEIGHT, |x, y| {
        if x >= x0 && x < x1 && y >= y0 && y < y1 {
            Luma([OBSTACLE])
        } else {
            Luma([FLOOR])
        }
    });
    ClassifiedFrame::new(image)
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
