//! Map size needed to hold every camera footprint.

use log::debug;

use crate::core::{Bounds, WorldPoint};
use crate::grid::GridSize;

/// Smallest grid, in cells, spanning the union of `fovs` and `origin`.
///
/// Each axis is `|extent| / resolution` rounded to the nearest cell. Returns
/// `None` when there are no footprints or the resolution is not positive.
pub fn required_extent<I>(fovs: I, origin: WorldPoint, resolution: f32) -> Option<GridSize>
where
    I: IntoIterator<Item = Bounds>,
{
    if resolution.is_nan() || resolution <= 0.0 {
        return None;
    }

    let mut extent = fovs
        .into_iter()
        .filter(|fov| !fov.is_empty())
        .reduce(|acc, fov| acc.union(&fov))?;
    extent.expand_to_include(origin);

    let cells = |length: f32| (length / resolution).abs().round() as usize;
    let size = GridSize::new(cells(extent.width()), cells(extent.height()));

    debug!(
        "Camera coverage [{:.2}, {:.2}] x [{:.2}, {:.2}] needs {}x{} cells",
        extent.min.x, extent.max.x, extent.min.y, extent.max.y, size.width, size.height
    );
    Some(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f32, max: f32) -> Bounds {
        Bounds::new(WorldPoint::new(min, min), WorldPoint::new(max, max))
    }

    #[test]
    fn test_single_fov_around_origin() {
        let size = required_extent([square(-5.0, 5.0)], WorldPoint::ZERO, 0.1).unwrap();
        assert_eq!(size, GridSize::new(100, 100));
    }

    #[test]
    fn test_union_of_fovs() {
        let fovs = [square(-1.0, 1.0), square(3.0, 5.0)];
        let size = required_extent(fovs, WorldPoint::ZERO, 0.5).unwrap();
        assert_eq!(size, GridSize::new(12, 12));
    }

    #[test]
    fn test_origin_extends_extent() {
        // Footprint at (10..12), origin far below
        let size = required_extent([square(10.0, 12.0)], WorldPoint::new(0.0, 0.0), 1.0).unwrap();
        assert_eq!(size, GridSize::new(12, 12));
    }

    #[test]
    fn test_rounds_to_nearest() {
        let fov = Bounds::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(1.04, 1.06));
        let size = required_extent([fov], WorldPoint::ZERO, 0.1).unwrap();
        assert_eq!(size, GridSize::new(10, 11));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(required_extent(Vec::new(), WorldPoint::ZERO, 0.1).is_none());
        assert!(required_extent([square(-1.0, 1.0)], WorldPoint::ZERO, 0.0).is_none());
        assert!(required_extent([square(-1.0, 1.0)], WorldPoint::ZERO, -0.1).is_none());
        assert!(required_extent([square(-1.0, 1.0)], WorldPoint::ZERO, f32::NAN).is_none());
    }
}
