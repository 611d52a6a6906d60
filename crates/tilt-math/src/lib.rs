//! # tilt-math
//!
//! Scalar and color math used by the tilt-shift pipeline.
//!
//! - Floor modulo and angle folding ([`modulo`], [`polygon_sector_angle`])
//! - Interpolation and curve shaping ([`lerp`], [`smooth_step`], [`gain`])
//! - Packed ARGB helpers ([`mix_colors`], [`bilinear_interpolate`], [`brightness_ntsc`])
//! - Catmull-Rom splines ([`spline`], [`color_spline`])
//! - Fant scanline resampling ([`resample`])
//!
//! # Usage
//!
//! ```rust
//! use tilt_math::{modulo, polygon_sector_angle};
//! use std::f64::consts::PI;
//!
//! assert_eq!(modulo(-1.0, 3.0), 2.0);
//!
//! // A pentagon vertex sits half a sector away from an edge midpoint.
//! let a = polygon_sector_angle(0.0, 5);
//! assert!((a + PI / 5.0).abs() < 1e-12);
//! ```
//!
//! # Used By
//!
//! - `tilt-ops` - aperture kernel synthesis

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod error;
mod interp;
mod modulo;
mod resample;
mod spline;

pub use color::*;
pub use error::*;
pub use interp::*;
pub use modulo::*;
pub use resample::*;
pub use spline::*;
