//! Packed ARGB pixel helpers.
//!
//! Every pixel is a single `u32` laid out as `0xAARRGGBB`:
//!
//! ```text
//! bits 31..24  alpha
//! bits 23..16  red
//! bits 15..8   green
//! bits  7..0   blue
//! ```
//!
//! # Usage
//!
//! ```rust
//! use tilt_core::pixel::{pack_argb, unpack_argb, red};
//!
//! let px = pack_argb(255, 200, 100, 50);
//! assert_eq!(px, 0xFFC86432);
//! assert_eq!(red(px), 200);
//! assert_eq!(unpack_argb(px), [255, 200, 100, 50]);
//! ```

/// Fully transparent black.
pub const TRANSPARENT: u32 = 0x0000_0000;

/// Packs four 8-bit channels into an ARGB word.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Packs an opaque RGB triple.
#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    pack_argb(255, r, g, b)
}

/// Splits an ARGB word into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(argb: u32) -> [u8; 4] {
    [alpha(argb), red(argb), green(argb), blue(argb)]
}

/// Alpha channel.
#[inline]
pub const fn alpha(argb: u32) -> u8 {
    (argb >> 24) as u8
}

/// Red channel.
#[inline]
pub const fn red(argb: u32) -> u8 {
    (argb >> 16) as u8
}

/// Green channel.
#[inline]
pub const fn green(argb: u32) -> u8 {
    (argb >> 8) as u8
}

/// Blue channel.
#[inline]
pub const fn blue(argb: u32) -> u8 {
    argb as u8
}

/// Rounds a float channel to the nearest integer and clamps it to `[0, 255]`.
///
/// NaN maps to 0.
#[inline]
pub fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Packs four float channels, rounding and clamping each to `[0, 255]`.
#[inline]
pub fn pack_argb_f32(a: f32, r: f32, g: f32, b: f32) -> u32 {
    pack_argb(
        clamp_channel(a),
        clamp_channel(r),
        clamp_channel(g),
        clamp_channel(b),
    )
}
