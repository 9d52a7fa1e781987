//! Layer host: frame handoff across threads, grid growth and map export.

mod common;

use std::thread;

use common::*;
use drishti::io::{export_ros_map, load_ros_map};
use drishti::{
    CameraRegistry, CellType, FusionConfig, GridSize, LayeredMap, OccupancyGrid,
    OverheadCameraLayer, SkipReason, WorldPoint,
};
use tempfile::tempdir;

fn single_camera_layer() -> OverheadCameraLayer {
    let mut cameras = CameraRegistry::new();
    cameras.insert(ceiling_camera("ceiling", 0.0, 0.0)).unwrap();
    OverheadCameraLayer::with_cameras("overhead", cameras, FusionConfig::default())
}

fn small_grid(origin: WorldPoint) -> OccupancyGrid {
    OccupancyGrid::new(GridSize::new(10, 10), 0.1, origin)
}

#[test]
fn test_frame_from_camera_thread_reaches_grid() {
    let layer = single_camera_layer();
    let sender = layer.sender("ceiling").unwrap();

    let mut map = LayeredMap::new(small_grid(WorldPoint::new(-3.0, -3.0)));
    map.add_layer(layer);

    thread::spawn(move || sender.send(uniform_frame(OBSTACLE)).unwrap())
        .join()
        .unwrap();

    let report = map.update();

    // Footprint [-2.52, 2.51] x [-1.88, 1.89] plus the origin corner
    assert_eq!(report.resized_to, Some(GridSize::new(55, 49)));
    assert_eq!(map.grid().size(), GridSize::new(55, 49));

    let total = report.total();
    assert_eq!(total.cameras_fused, 1);
    assert!(total.cells_occupied > 0);
    assert_eq!(map.grid().count_by_type().occupied, total.cells_occupied);
    assert_eq!(
        map.grid().get_type_world(WorldPoint::new(0.0, 0.0)),
        CellType::Occupied
    );

    // Nothing new was sent
    let report = map.update();
    assert_eq!(report.resized_to, None);
    assert_eq!(report.total().cameras_fused, 0);
}

#[test]
fn test_newest_frame_wins() {
    let layer = single_camera_layer();
    let sender = layer.sender("ceiling").unwrap();

    let mut map = LayeredMap::new(small_grid(WorldPoint::new(-3.0, -3.0)));
    map.add_layer(layer);

    let senders: Vec<_> = (0..4)
        .map(|_| {
            let sender = sender.clone();
            thread::spawn(move || sender.send(uniform_frame(OBSTACLE)).unwrap())
        })
        .collect();
    for handle in senders {
        handle.join().unwrap();
    }
    sender.send(uniform_frame(FLOOR)).unwrap();

    map.update();
    let counts = map.grid().count_by_type();
    assert_eq!(counts.occupied, 0);
    assert!(counts.free > 0);
}

#[test]
fn test_unset_origin_holds_frames_until_placed() {
    let layer = single_camera_layer();
    let sender = layer.sender("ceiling").unwrap();

    let mut map = LayeredMap::new(small_grid(WorldPoint::ZERO));
    map.add_layer(layer);
    sender.send(uniform_frame(OBSTACLE)).unwrap();

    let report = map.update();
    assert_eq!(report.total().skipped, Some(SkipReason::OriginNotSet));
    assert_eq!(map.grid().count_by_type().known(), 0);

    map.set_origin(WorldPoint::new(-3.0, -3.0));
    let report = map.update();
    assert!(!report.total().is_skipped());
    assert!(report.total().cells_occupied > 0);
}

#[test]
fn test_disabled_layer_leaves_map_alone() {
    let mut layer = single_camera_layer();
    layer.set_enabled(false);
    layer
        .sender("ceiling")
        .unwrap()
        .send(uniform_frame(OBSTACLE))
        .unwrap();

    let mut map = LayeredMap::new(small_grid(WorldPoint::new(-3.0, -3.0)));
    map.add_layer(layer);

    let report = map.update();
    assert_eq!(report.resized_to, None);
    assert_eq!(report.total().skipped, Some(SkipReason::Disabled));
    assert!(!map.layer("overhead").unwrap().enabled());
    assert_eq!(map.grid().count_by_type().known(), 0);
}

#[test]
fn test_far_camera_growth_stops_at_limit() {
    let mut cameras = CameraRegistry::new();
    cameras.insert(ceiling_camera("far", 5000.0, 5000.0)).unwrap();
    let layer = OverheadCameraLayer::with_cameras("overhead", cameras, FusionConfig::default());
    let sender = layer.sender("far").unwrap();

    let grid = OccupancyGrid::new(GridSize::new(200, 200), 0.05, WorldPoint::new(-5.0, -5.0));
    let limit = GridSize::new(1000, 800);
    let mut map = LayeredMap::with_max_size(grid, limit);
    map.add_layer(layer);

    sender.send(uniform_frame(OBSTACLE)).unwrap();
    let report = map.update();

    // Unclamped this would be about 100k x 100k cells
    let requested = report.capped_request.unwrap();
    assert!(requested.width > 100_000 && requested.height > 100_000);
    assert_eq!(report.resized_to, Some(limit));
    assert_eq!(map.grid().size(), limit);
    assert_eq!(report.total().cells_written(), 0);
    assert_eq!(map.grid().count_by_type().known(), 0);

    let report = map.update();
    assert_eq!(report.resized_to, None);
    assert_eq!(map.grid().size(), limit);
}

#[test]
fn test_export_and_reload() {
    let layer = single_camera_layer();
    layer
        .sender("ceiling")
        .unwrap()
        .send(frame_with_block(300, 220, 340, 260))
        .unwrap();

    let mut map = LayeredMap::new(small_grid(WorldPoint::new(-3.0, -3.0)));
    map.add_layer(layer);
    map.update();

    let dir = tempdir().unwrap();
    let yaml_path = export_ros_map(map.grid(), &dir.path().join("fused")).unwrap();
    assert!(dir.path().join("fused.pgm").exists());

    let loaded = load_ros_map(&yaml_path).unwrap();
    assert_eq!(loaded.size(), map.grid().size());
    assert_eq!(loaded.origin(), map.grid().origin());
    assert_eq!(loaded.cell_types_raw(), map.grid().cell_types_raw());

    let counts = loaded.count_by_type();
    assert!(counts.occupied > 0);
    assert!(counts.free > counts.occupied);
    assert!(counts.unknown > 0);
}
