//! Default value functions for serde deserialization.

pub fn enabled() -> bool {
    true
}

pub fn occupied_threshold() -> u8 {
    128
}

pub fn resolution() -> f32 {
    0.05
}

pub fn grid_size() -> usize {
    200
}

pub fn max_grid_size() -> usize {
    crate::layer::DEFAULT_MAX_GRID_DIMENSION
}

pub fn origin() -> f32 {
    -5.0
}
