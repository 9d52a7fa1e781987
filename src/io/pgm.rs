//! ROS map_server format: a PGM image plus a YAML metadata file.
//!
//! Image row 0 is the top of the map (largest Y), so rows are flipped against
//! grid rows. Pixel values follow map_saver: free 254, occupied 0, unknown 205.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{CellType, GridCoord, WorldPoint};
use crate::error::{ConfigLoadError, Result};
use crate::grid::{GridSize, OccupancyGrid};

const PIXEL_FREE: u8 = 254;
const PIXEL_OCCUPIED: u8 = 0;
const PIXEL_UNKNOWN: u8 = 205;

/// Map metadata from YAML file (ROS standard format)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    /// PGM image filename (relative to YAML file)
    pub image: String,

    /// Map resolution in meters per pixel
    pub resolution: f32,

    /// Origin of map [x, y, yaw] - world coordinates of bottom-left pixel
    pub origin: [f32; 3],

    /// Non-zero inverts the grey scale
    #[serde(default)]
    pub negate: u8,

    /// Occupancy probability above which a pixel is occupied
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f32,

    /// Occupancy probability below which a pixel is free
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f32,
}

fn default_occupied_thresh() -> f32 {
    0.65
}

fn default_free_thresh() -> f32 {
    0.196
}

/// Render the grid as a map_saver style grey image.
pub fn write_pgm(grid: &OccupancyGrid) -> GrayImage {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    GrayImage::from_fn(width, height, |px, py| {
        let coord = GridCoord::new(px as i32, (height - 1 - py) as i32);
        let value = match grid.get_type(coord) {
            CellType::Free => PIXEL_FREE,
            CellType::Occupied => PIXEL_OCCUPIED,
            CellType::Unknown => PIXEL_UNKNOWN,
        };
        Luma([value])
    })
}

/// Write the grid image to `path` as binary PGM.
pub fn export_pgm(grid: &OccupancyGrid, path: &Path) -> Result<()> {
    write_pgm(grid).save_with_format(path, ImageFormat::Pnm)?;
    Ok(())
}

/// Write map_server metadata for a grid whose image is `image_name`.
pub fn export_yaml(grid: &OccupancyGrid, image_name: &str, path: &Path) -> Result<()> {
    let origin = grid.origin();
    let metadata = MapMetadata {
        image: image_name.to_string(),
        resolution: grid.resolution(),
        origin: [origin.x, origin.y, 0.0],
        negate: 0,
        occupied_thresh: default_occupied_thresh(),
        free_thresh: default_free_thresh(),
    };
    let yaml = serde_yaml::to_string(&metadata).map_err(ConfigLoadError::from)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export `<base>.pgm` and `<base>.yaml`. Returns the YAML path.
pub fn export_ros_map(grid: &OccupancyGrid, base: &Path) -> Result<PathBuf> {
    let pgm_path = base.with_extension("pgm");
    let yaml_path = base.with_extension("yaml");
    let image_name = pgm_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map.pgm".to_string());

    export_pgm(grid, &pgm_path)?;
    export_yaml(grid, &image_name, &yaml_path)?;

    let counts = grid.count_by_type();
    info!(
        "Saved {}x{} map to {} ({} free, {} occupied, {} unknown)",
        grid.width(),
        grid.height(),
        yaml_path.display(),
        counts.free,
        counts.occupied,
        counts.unknown
    );
    Ok(yaml_path)
}

/// Load a map_server YAML + image pair into a grid.
pub fn load_ros_map(yaml_path: &Path) -> Result<OccupancyGrid> {
    let yaml = std::fs::read_to_string(yaml_path)?;
    let metadata: MapMetadata = serde_yaml::from_str(&yaml).map_err(ConfigLoadError::from)?;
    if !metadata.resolution.is_finite() || metadata.resolution <= 0.0 {
        return Err(ConfigLoadError::Invalid(format!(
            "map resolution must be > 0, got {}",
            metadata.resolution
        ))
        .into());
    }

    let yaml_dir = yaml_path.parent().unwrap_or(Path::new("."));
    let image = image::open(yaml_dir.join(&metadata.image))?.into_luma8();

    let (width, height) = image.dimensions();
    let mut grid = OccupancyGrid::new(
        GridSize::new(width as usize, height as usize),
        metadata.resolution,
        WorldPoint::new(metadata.origin[0], metadata.origin[1]),
    );

    for (px, py, pixel) in image.enumerate_pixels() {
        let value = pixel.0[0];
        let value = if metadata.negate != 0 { 255 - value } else { value };
        let occupancy = (255 - value) as f32 / 255.0;

        let cell_type = if occupancy > metadata.occupied_thresh {
            CellType::Occupied
        } else if occupancy < metadata.free_thresh {
            CellType::Free
        } else {
            continue;
        };
        grid.set_type(GridCoord::new(px as i32, (height - 1 - py) as i32), cell_type);
    }

    Ok(grid)
}
