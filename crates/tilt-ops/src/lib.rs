//! # tilt-ops
//!
//! Tilt-shift image operations.
//!
//! A tilt-shift pass keeps a horizontal band in focus and blurs the rows
//! above and below it through a simulated lens aperture, after an optional
//! hue/saturation/brightness tweak.
//!
//! # Modules
//!
//! - [`color`] - HSB adjustment
//! - [`fft`] - 2D FFT over power-of-two grids, FFT shift
//! - [`aperture`] - Disc and polygon aperture kernels
//! - [`lens_blur`] - Tiled frequency-domain lens blur with bloom
//! - [`bands`] - Band layout, split and merge
//! - [`config`] - [`TiltShiftConfig`] and YAML presets
//! - [`pipeline`] - Entry points
//!
//! # Example
//!
//! ```rust
//! use tilt_core::{Image, pixel::pack_rgb};
//! use tilt_ops::{process, TiltShiftConfig};
//!
//! let image = Image::filled(64, 48, pack_rgb(90, 120, 200));
//! let config = TiltShiftConfig { radius: 4.0, ..TiltShiftConfig::default() };
//! let out = process(Some(&image), &config).unwrap();
//! assert_eq!(out.dimensions(), (64, 48));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - render blur tiles and color rows with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod aperture;
pub mod bands;
pub mod color;
pub mod config;
pub mod fft;
pub mod lens_blur;
pub mod pipeline;

pub use aperture::Aperture;
pub use config::TiltShiftConfig;
pub use error::{OpsError, OpsResult};
pub use pipeline::{adjust_color, apply_tilt_shift, process};
