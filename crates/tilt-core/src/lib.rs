//! # tilt-core
//!
//! Core types for the tilt-shift image pipeline.
//!
//! - [`Image`] - Owned, row-major buffer of packed ARGB pixels
//! - [`pixel`] - Pack/unpack helpers for `0xAARRGGBB` words
//! - [`Rect`] - Signed-origin rectangle used for tile and band geometry
//! - [`Error`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! tilt-core (this crate)
//!    ^
//!    |
//!    +-- tilt-math (scalar and color math)
//!    +-- tilt-ops (color adjust, FFT, lens blur, band pipeline)
//!    +-- tilt-cli (file I/O front end)
//! ```
//!
//! Decoding and encoding files is not part of this crate: callers hand in a
//! decoded buffer and get one back.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;

pub use error::{Error, Result};
pub use image::Image;
pub use rect::Rect;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{pack_argb, pack_rgb, unpack_argb};
    pub use crate::rect::Rect;
}
