//! Error types for tilt-math.

use thiserror::Error;

/// Result type for math operations that validate their inputs.
pub type MathResult<T> = Result<T, MathError>;

/// Errors from spline evaluation and scanline resampling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    /// A Catmull-Rom spline needs at least four knots.
    #[error("too few knots in spline: need at least {needed}, got {got}")]
    TooFewKnots {
        /// Minimum knot count
        needed: usize,
        /// Knots supplied
        got: usize,
    },

    /// X and Y knot arrays have different lengths.
    #[error("knot arrays differ in length: {x_len} x knots vs {y_len} y knots")]
    KnotLengthMismatch {
        /// Number of x knots
        x_len: usize,
        /// Number of y knots
        y_len: usize,
    },

    /// A scanline buffer is too short for the requested length/offset/stride.
    #[error("scanline buffer too short: {buffer} needs {needed} entries, has {len}")]
    ScanlineTooShort {
        /// Which buffer was short
        buffer: &'static str,
        /// Entries required
        needed: usize,
        /// Entries available
        len: usize,
    },

    /// The output edge map must be finite and strictly increasing.
    #[error("output edge map is not strictly increasing at index {index}")]
    NonMonotonicMap {
        /// First offending entry
        index: usize,
    },
}
