//! Error types for tilt-shift operations.

use thiserror::Error;

/// Error type for tilt-shift operations.
///
/// Every check runs before any pixel is touched, so an `Err` never comes with
/// a partially processed image.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Empty image, non power-of-two FFT grid, or band fractions that leave
    /// no middle band.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The pipeline was invoked without a source image.
    #[error("no source image")]
    MissingSource,

    /// A numeric parameter is outside its accepted range.
    #[error("parameter `{name}` out of range: {value} (expected {expected})")]
    ParameterOutOfRange {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable accepted range
        expected: &'static str,
    },

    /// Image buffer error from tilt-core.
    #[error(transparent)]
    Core(#[from] tilt_core::Error),

    /// Preset could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Preset file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpsError {
    /// Creates a [`OpsError::ParameterOutOfRange`].
    pub fn out_of_range(name: &'static str, value: impl Into<f64>, expected: &'static str) -> Self {
        Self::ParameterOutOfRange {
            name,
            value: value.into(),
            expected,
        }
    }

    /// Creates an [`OpsError::InvalidDimensions`] for an image with no pixels.
    pub fn empty_image(width: u32, height: u32) -> Self {
        Self::InvalidDimensions(format!("image is empty ({width}x{height})"))
    }
}

/// Result type for tilt-shift operations.
pub type OpsResult<T> = Result<T, OpsError>;
