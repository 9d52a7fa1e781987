//! End-to-end fusion scenarios with the default overhead camera model.

mod common;

use approx::assert_relative_eq;
use common::*;
use drishti::{
    Bounds, CameraRegistry, CellType, FusionConfig, FusionEngine, FusionMode, GridSize,
    OccupancyGrid, PixelCoord, SkipReason, WorldPoint, required_extent,
};

/// Bounds shrunk by `margin` on every side.
fn shrink(bounds: Bounds, margin: f32) -> Bounds {
    Bounds::new(
        WorldPoint::new(bounds.min.x + margin, bounds.min.y + margin),
        WorldPoint::new(bounds.max.x - margin, bounds.max.y - margin),
    )
}

/// Bounds grown by `margin` on every side.
fn grow(bounds: Bounds, margin: f32) -> Bounds {
    shrink(bounds, -margin)
}

#[test]
fn test_pixel_near_principal_point_projects_to_origin() {
    let camera = ceiling_camera("cam", 0.0, 0.0);
    let (point, in_bounds) = camera.projector().pixel_to_world(320.0, 240.0);

    assert!(in_bounds);
    assert_relative_eq!(point.x, -0.004, epsilon = 1e-3);
    assert_relative_eq!(point.y, 0.004, epsilon = 1e-3);
}

#[test]
fn test_round_trip_returns_same_pixel() {
    let camera = ceiling_camera("cam", 1.5, -2.0);
    let projector = camera.projector();

    // Image edges included: column 0, row 0 and the last row/column
    let columns = (0..IMAGE_WIDTH).step_by(41).chain([IMAGE_WIDTH - 1]);
    for px in columns {
        let rows = (0..IMAGE_HEIGHT).step_by(37).chain([IMAGE_HEIGHT - 1]);
        for py in rows {
            let (world, _) = projector.pixel_to_world(px as f32, py as f32);
            let (pixel, in_bounds) = projector.world_to_pixel(world);

            assert!(in_bounds, "pixel ({}, {}) left the image", px, py);
            assert_eq!(pixel, PixelCoord::new(px, py));
        }
    }
}

#[test]
fn test_point_outside_fov_is_not_written() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("cam", 0.0, 0.0)).unwrap();
    registry
        .get_mut("cam")
        .unwrap()
        .buffer_mut()
        .set_from_classified_image(uniform_frame(OBSTACLE))
        .unwrap();

    let outside = WorldPoint::new(4.0, 3.0);
    let (_, in_bounds) = registry.get("cam").unwrap().projector().world_to_pixel(outside);
    assert!(!in_bounds);

    let mut grid = grid_over(WorldPoint::new(-5.0, -5.0), WorldPoint::new(5.0, 5.0), 0.1);
    let mut engine = FusionEngine::default();
    let region = full_region(&grid);
    engine.update(&mut registry, &mut grid, region);

    assert_eq!(grid.get_type_world(outside), CellType::Unknown);
    assert_eq!(grid.get_type_world(WorldPoint::new(0.0, 0.0)), CellType::Occupied);
}

#[test]
fn test_disjoint_cameras_cover_exactly_their_footprints() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("west", -4.0, 0.0)).unwrap();
    registry.insert(ceiling_camera("east", 4.0, 0.0)).unwrap();
    registry
        .get_mut("west")
        .unwrap()
        .buffer_mut()
        .set_from_classified_image(uniform_frame(OBSTACLE))
        .unwrap();
    registry
        .get_mut("east")
        .unwrap()
        .buffer_mut()
        .set_from_classified_image(uniform_frame(FLOOR))
        .unwrap();

    let west = registry.get("west").unwrap().fov();
    let east = registry.get("east").unwrap().fov();
    assert!(!west.intersects(&east));

    let mut grid = grid_over(WorldPoint::new(-8.0, -4.0), WorldPoint::new(8.0, 4.0), 0.1);
    let mut engine = FusionEngine::default();
    let region = full_region(&grid);
    let result = engine.update(&mut registry, &mut grid, region);
    assert_eq!(result.cameras_fused, 2);

    let margin = 0.01;
    for (coord, cell) in grid.iter() {
        let centre = grid.grid_to_world(coord);
        if shrink(west, margin).contains(centre) {
            assert_eq!(cell, CellType::Occupied, "west cell {:?}", coord);
        } else if shrink(east, margin).contains(centre) {
            assert_eq!(cell, CellType::Free, "east cell {:?}", coord);
        } else if !grow(west, margin).contains(centre) && !grow(east, margin).contains(centre) {
            assert_eq!(cell, CellType::Unknown, "uncovered cell {:?}", coord);
        }
    }

    let counts = grid.count_by_type();
    assert_eq!(counts.occupied, result.cells_occupied);
    assert_eq!(counts.free, result.cells_free);
}

#[test]
fn test_overlap_keeps_first_camera() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("first", 0.0, 0.0)).unwrap();
    registry.insert(ceiling_camera("second", 1.0, 0.0)).unwrap();
    registry
        .get_mut("first")
        .unwrap()
        .buffer_mut()
        .set_from_classified_image(uniform_frame(OBSTACLE))
        .unwrap();
    registry
        .get_mut("second")
        .unwrap()
        .buffer_mut()
        .set_from_classified_image(uniform_frame(FLOOR))
        .unwrap();

    let mut grid = grid_over(WorldPoint::new(-4.0, -3.0), WorldPoint::new(5.0, 3.0), 0.1);
    let mut engine = FusionEngine::default();
    let region = full_region(&grid);
    let result = engine.update(&mut registry, &mut grid, region);

    // Both cameras see (0.5, 0); the first one in the registry owns it
    assert_eq!(grid.get_type_world(WorldPoint::new(0.5, 0.0)), CellType::Occupied);
    assert_eq!(grid.get_type_world(WorldPoint::new(3.0, 0.0)), CellType::Free);
    assert!(result.cells_already_known > 0);
}

#[test]
fn test_occupied_cell_survives_later_passes() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("cam", 0.0, 0.0)).unwrap();
    let sender = registry.sender("cam").unwrap();

    let mut grid = grid_over(WorldPoint::new(-3.0, -3.0), WorldPoint::new(3.0, 3.0), 0.1);
    let mut engine = FusionEngine::default();

    // Obstacle block around the principal point
    sender.send(frame_with_block(300, 220, 340, 260)).unwrap();
    let region = full_region(&grid);
    engine.update(&mut registry, &mut grid, region);
    let centre = WorldPoint::new(0.0, 0.0);
    assert_eq!(grid.get_type_world(centre), CellType::Occupied);
    assert_eq!(grid.get_type_world(WorldPoint::new(1.0, 1.0)), CellType::Free);

    // Obstacle gone in the next frame: known cells are kept
    sender.send(uniform_frame(FLOOR)).unwrap();
    let region = full_region(&grid);
    let result = engine.update(&mut registry, &mut grid, region);
    assert_eq!(grid.get_type_world(centre), CellType::Occupied);
    assert_eq!(result.cells_written(), 0);
}

#[test]
fn test_idle_cameras_contribute_nothing() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("a", -2.0, 0.0)).unwrap();
    registry.insert(ceiling_camera("b", 2.0, 0.0)).unwrap();
    registry
        .sender("b")
        .unwrap()
        .send(uniform_frame(OBSTACLE))
        .unwrap();

    let mut grid = grid_over(WorldPoint::new(-5.0, -3.0), WorldPoint::new(5.0, 3.0), 0.1);
    let mut engine = FusionEngine::default();
    let region = full_region(&grid);
    let result = engine.update(&mut registry, &mut grid, region);

    assert_eq!(result.cameras_fused, 1);
    assert_eq!(grid.get_type_world(WorldPoint::new(-2.5, 0.0)), CellType::Unknown);
    assert_eq!(grid.get_type_world(WorldPoint::new(2.5, 0.0)), CellType::Occupied);
}

#[test]
fn test_coverage_of_ten_meter_square() {
    let fov = Bounds::new(WorldPoint::new(-5.0, -5.0), WorldPoint::new(5.0, 5.0));
    let size = required_extent([fov], WorldPoint::ZERO, 0.1).unwrap();
    assert_eq!(size, GridSize::new(100, 100));
}

#[test]
fn test_unset_origin_skips_with_one_warning() {
    let mut registry = CameraRegistry::new();
    registry.insert(ceiling_camera("cam", 0.0, 0.0)).unwrap();
    registry
        .sender("cam")
        .unwrap()
        .send(uniform_frame(OBSTACLE))
        .unwrap();

    let mut grid = OccupancyGrid::new(GridSize::new(60, 60), 0.1, WorldPoint::ZERO);
    let mut engine = FusionEngine::default();

    for _ in 0..5 {
        let region = full_region(&grid);
        let result = engine.update(&mut registry, &mut grid, region);
        assert_eq!(result.skipped, Some(SkipReason::OriginNotSet));
        assert_eq!(result.cells_written(), 0);
    }
    assert_eq!(engine.origin_warning_count(), 1);
    assert_eq!(grid.count_by_type().known(), 0);
}

#[test]
fn test_refresh_mode_fuses_like_first_writer() {
    let run = |mode: FusionMode| {
        let mut registry = CameraRegistry::new();
        registry.insert(ceiling_camera("a", 0.0, 0.0)).unwrap();
        registry.insert(ceiling_camera("b", 1.0, 1.0)).unwrap();
        registry
            .sender("a")
            .unwrap()
            .send(frame_with_block(100, 100, 200, 200))
            .unwrap();
        registry
            .sender("b")
            .unwrap()
            .send(uniform_frame(OBSTACLE))
            .unwrap();

        let mut grid = grid_over(WorldPoint::new(-4.0, -4.0), WorldPoint::new(4.0, 4.0), 0.05);
        let mut engine = FusionEngine::new(FusionConfig { mode });
        let region = full_region(&grid);
        engine.update(&mut registry, &mut grid, region);
        grid
    };

    let first_writer = run(FusionMode::FirstWriter);
    let refresh = run(FusionMode::Refresh);
    assert_eq!(first_writer.cell_types_raw(), refresh.cell_types_raw());
    assert!(first_writer.count_by_type().occupied > 0);
}
