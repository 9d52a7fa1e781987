//! Benchmark camera projection and fusion passes.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use drishti::{
    CameraPose, CameraProjector, CameraRegistry, CellRegion, ClassifiedFrame, FusionConfig,
    FusionEngine, FusionMode, GridSize, OccupancyGrid, OverheadCamera, WorldPoint,
};

/// Default 640x480 cameras, 3 m up, spaced `spacing` apart along x.
fn camera_row(count: usize, spacing: f32) -> CameraRegistry {
    let mut registry = CameraRegistry::new();
    for i in 0..count {
        let id = format!("overhead_camera_{}", i);
        let pose = CameraPose::new(i as f32 * spacing, 0.0, 3.0);
        let projector = CameraProjector::new(id, pose).unwrap();
        registry.insert(OverheadCamera::new(projector)).unwrap();
    }
    registry
}

/// Floor with a few obstacle stripes.
fn striped_frame() -> ClassifiedFrame {
    let image = image::GrayImage::from_fn(640, 480, |x, _| {
        if x % 80 < 8 {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    });
    ClassifiedFrame::new(image)
}

fn bench_projection(c: &mut Criterion) {
    let projector = CameraProjector::new("cam", CameraPose::new(1.0, 2.0, 3.0)).unwrap();

    c.bench_function("world_to_pixel_10k", |b| {
        b.iter(|| {
            let mut inside = 0usize;
            for i in 0..10_000 {
                let point = WorldPoint::new((i % 100) as f32 * 0.05, (i / 100) as f32 * 0.05);
                let (_, in_bounds) = projector.world_to_pixel(black_box(point));
                inside += in_bounds as usize;
            }
            black_box(inside)
        })
    });
}

fn bench_fusion_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion_pass");
    let frame = striped_frame();

    for mode in [FusionMode::FirstWriter, FusionMode::Refresh] {
        for cameras in [1usize, 4] {
            let mut registry = camera_row(cameras, 4.0);
            let senders: Vec<_> = registry.iter().map(|c| c.sender()).collect();
            let mut engine = FusionEngine::new(FusionConfig { mode });
            let mut grid = OccupancyGrid::new(
                GridSize::new(400, 100),
                0.05,
                WorldPoint::new(-3.0, -2.5),
            );
            let region = CellRegion::full(grid.size());

            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), cameras),
                &cameras,
                |b, _| {
                    b.iter(|| {
                        for sender in &senders {
                            sender.send(frame.clone()).unwrap();
                        }
                        grid.clear();
                        let result = engine.update(&mut registry, &mut grid, black_box(region));
                        black_box(result)
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_projection, bench_fusion_pass);
criterion_main!(benches);
