//! Interpolation and luma on packed ARGB pixels.
//!
//! These operate channel-wise on `0xAARRGGBB` words from [`tilt_core::pixel`].

use crate::lerp_i32;
use tilt_core::pixel::{pack_argb, unpack_argb};

/// Linearly interpolates two ARGB colors channel by channel.
///
/// ```rust
/// use tilt_math::mix_colors;
///
/// assert_eq!(mix_colors(0.5, 0xFF000000, 0xFF0000FF), 0xFF00007F);
/// ```
pub fn mix_colors(t: f32, argb1: u32, argb2: u32) -> u32 {
    let c1 = unpack_argb(argb1);
    let c2 = unpack_argb(argb2);
    let ch = |i: usize| lerp_i32(c1[i] as i32, c2[i] as i32, t).clamp(0, 255) as u8;
    pack_argb(ch(0), ch(1), ch(2), ch(3))
}

/// Bilinear interpolation of four ARGB values given as `[nw, ne, sw, se]`.
///
/// `x` and `y` are the fractional positions in `[0, 1]` inside the cell.
pub fn bilinear_interpolate(x: f32, y: f32, corners: [u32; 4]) -> u32 {
    let [nw, ne, sw, se] = corners.map(unpack_argb);
    let cx = 1.0 - x;
    let cy = 1.0 - y;
    let ch = |i: usize| {
        let top = cx * nw[i] as f32 + x * ne[i] as f32;
        let bottom = cx * sw[i] as f32 + x * se[i] as f32;
        (cy * top + y * bottom) as u8
    };
    pack_argb(ch(0), ch(1), ch(2), ch(3))
}

/// NTSC (Rec. 601) gray level of an ARGB pixel, in `[0, 255]`.
///
/// ```rust
/// use tilt_math::brightness_ntsc;
///
/// assert_eq!(brightness_ntsc(0xFFFFFFFF), 255);
/// assert_eq!(brightness_ntsc(0xFF000000), 0);
/// ```
pub fn brightness_ntsc(argb: u32) -> u8 {
    let [_, r, g, b] = unpack_argb(argb);
    (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114)
        .round()
        .min(255.0) as u8
}
