use thiserror::Error;

/// Coarse classification of [`OrientationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad construction parameter or input shape. Fatal to the computation.
    InvalidArgument,
    /// Query outside the image. The field stays valid.
    OutOfRange,
    /// The computation was abandoned through its cancel flag.
    Cancelled,
}

/// Errors raised while building or querying an orientation field.
#[derive(Debug, Error)]
pub enum OrientationError {
    #[error("Block size must be positive, got {block_size}")]
    InvalidBlockSize { block_size: usize },

    #[error("Epsilon must be finite and non-negative, got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },

    #[error("Sample step must be positive, got {step}")]
    InvalidStep { step: usize },

    #[error("Image {width}x{height} is too small, both sides must exceed {min}")]
    ImageTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("Buffer holds {actual} bytes, {expected} required")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Gradient grids differ in shape: {gx_width}x{gx_height} vs {gy_width}x{gy_height}")]
    DimensionMismatch {
        gx_width: usize,
        gx_height: usize,
        gy_width: usize,
        gy_height: usize,
    },

    #[error("Failed to parse orientation config: {0}")]
    Config(#[from] serde_yml::Error),

    #[error("Point ({x}, {y}) is outside the {width}x{height} image")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Orientation computation cancelled")]
    Cancelled,
}

impl OrientationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrientationError::OutOfRange { .. } => ErrorKind::OutOfRange,
            OrientationError::Cancelled => ErrorKind::Cancelled,
            OrientationError::InvalidBlockSize { .. }
            | OrientationError::InvalidEpsilon { .. }
            | OrientationError::InvalidStep { .. }
            | OrientationError::ImageTooSmall { .. }
            | OrientationError::InvalidBuffer { .. }
            | OrientationError::DimensionMismatch { .. }
            | OrientationError::Config(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrientationError>;
