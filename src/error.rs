//! Error types for Drishti

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Camera construction or registry error
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// Frame rejected at the ingestion boundary
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid camera parameters or registry misuse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// Mounting height must be strictly positive
    #[error("Camera '{id}': height must be > 0, got {height}")]
    InvalidHeight {
        /// Camera id
        id: String,
        /// Offending height
        height: f32,
    },

    /// Focal lengths and principal point must be positive and finite
    #[error("Camera '{id}': invalid intrinsics ({reason})")]
    InvalidIntrinsics {
        /// Camera id
        id: String,
        /// Which value is wrong
        reason: String,
    },

    /// Image must be at least one pixel on each axis
    #[error("Camera '{id}': invalid image size {width}x{height}")]
    InvalidImageSize {
        /// Camera id
        id: String,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// Pose components must be finite
    #[error("Camera '{id}': pose is not finite")]
    InvalidPose {
        /// Camera id
        id: String,
    },

    /// Two cameras share an id
    #[error("Duplicate camera id: {0}")]
    DuplicateId(String),

    /// Lookup of an id that was never registered
    #[error("Unknown camera id: {0}")]
    UnknownId(String),
}

/// A classified frame that cannot be accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Frame size differs from the camera's configured image size
    #[error("Frame is {actual_width}x{actual_height}, camera expects {expected_width}x{expected_height}")]
    DimensionMismatch {
        /// Configured width
        expected_width: u32,
        /// Configured height
        expected_height: u32,
        /// Received width
        actual_width: u32,
        /// Received height
        actual_height: u32,
    },

    /// Raw pixel buffer length does not match width * height
    #[error("Pixel buffer has {actual} values, expected {expected}")]
    BufferLength {
        /// width * height
        expected: usize,
        /// Received length
        actual: usize,
    },
}

/// Config load error
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Camera pose list string could not be parsed
    #[error("Invalid camera pose list: {0}")]
    PoseList(String),

    /// A camera descriptor failed validation
    #[error("Invalid camera: {0}")]
    Camera(#[from] CameraError),
}
