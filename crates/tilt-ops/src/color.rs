//! Hue/saturation/brightness adjustment.
//!
//! Each pixel goes RGB -> HSB, every HSB component `c` becomes
//! `clamp(c + c * gain, 0, 1)`, and the result goes back to RGB. A gain of
//! 0 leaves the component alone, -1 zeroes it, +1 doubles it.
//!
//! The conversions use the hexcone model with hue in `[0, 1)` and round to
//! the nearest 8-bit level on the way back, so a zero-gain pass drifts by at
//! most one level per channel. Alpha passes through untouched.
//!
//! # Example
//!
//! ```rust
//! use tilt_core::{Image, pixel::pack_rgb};
//! use tilt_ops::color::{adjust_hsb, HsbGains};
//!
//! let img = Image::filled(2, 2, pack_rgb(200, 40, 40));
//! let gray = adjust_hsb(&img, &HsbGains { saturation: -1.0, ..HsbGains::default() });
//! assert_eq!(gray.pixel(0, 0), pack_rgb(200, 200, 200));
//! ```

use serde::{Deserialize, Serialize};
use tilt_core::Image;
use tilt_core::pixel::{pack_argb, unpack_argb};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Converts 8-bit RGB to `[hue, saturation, brightness]`, each in `[0, 1]`.
///
/// ```rust
/// use tilt_ops::color::rgb_to_hsb;
///
/// assert_eq!(rgb_to_hsb(255, 0, 0), [0.0, 1.0, 1.0]);
/// assert_eq!(rgb_to_hsb(0, 0, 0), [0.0, 0.0, 0.0]);
/// ```
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> [f32; 3] {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let brightness = cmax as f32 / 255.0;
    let saturation = if cmax == 0 {
        0.0
    } else {
        (cmax - cmin) as f32 / cmax as f32
    };
    if saturation == 0.0 {
        return [0.0, saturation, brightness];
    }

    let range = (cmax - cmin) as f32;
    let redc = (cmax - r) as f32 / range;
    let greenc = (cmax - g) as f32 / range;
    let bluec = (cmax - b) as f32 / range;
    let sector = if r == cmax {
        bluec - greenc
    } else if g == cmax {
        2.0 + redc - bluec
    } else {
        4.0 + greenc - redc
    };
    let mut hue = sector / 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }
    [hue, saturation, brightness]
}

/// Converts hue, saturation and brightness back to 8-bit RGB.
///
/// Hue wraps, so `1.0` is red again.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [u8; 3] {
    let level = |v: f32| (v * 255.0 + 0.5) as u8;
    if saturation == 0.0 {
        let v = level(brightness);
        return [v, v, v];
    }
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    [level(r), level(g), level(b)]
}

/// Multiplicative gains for the three HSB components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsbGains {
    /// Saturation gain; -1 desaturates fully.
    pub saturation: f32,
    /// Hue gain.
    pub hue: f32,
    /// Brightness gain.
    pub luminance: f32,
}

impl HsbGains {
    /// Gains of zero change nothing beyond conversion rounding.
    pub fn is_identity(&self) -> bool {
        self.saturation == 0.0 && self.hue == 0.0 && self.luminance == 0.0
    }

    /// Adjusts one ARGB pixel, keeping its alpha.
    #[inline]
    pub fn apply(&self, argb: u32) -> u32 {
        let [a, r, g, b] = unpack_argb(argb);
        let [h, s, v] = rgb_to_hsb(r, g, b);
        let gain = |c: f32, k: f32| (c + c * k).clamp(0.0, 1.0);
        let [r, g, b] = hsb_to_rgb(
            gain(h, self.hue),
            gain(s, self.saturation),
            gain(v, self.luminance),
        );
        pack_argb(a, r, g, b)
    }
}

/// Applies `gains` to every pixel, returning a new image.
pub fn adjust_hsb(image: &Image, gains: &HsbGains) -> Image {
    trace!(
        width = image.width(),
        height = image.height(),
        saturation = gains.saturation,
        hue = gains.hue,
        luminance = gains.luminance,
        "adjust_hsb"
    );
    let mut out = image.clone();
    apply_rows(out.data_mut(), image.width() as usize, gains);
    out
}

#[cfg(feature = "parallel")]
fn apply_rows(data: &mut [u32], width: usize, gains: &HsbGains) {
    if width == 0 {
        return;
    }
    data.par_chunks_mut(width).for_each(|row| {
        for p in row.iter_mut() {
            *p = gains.apply(*p);
        }
    });
}

#[cfg(not(feature = "parallel"))]
fn apply_rows(data: &mut [u32], _width: usize, gains: &HsbGains) {
    for p in data.iter_mut() {
        *p = gains.apply(*p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt_core::pixel::{alpha, blue, green, pack_rgb, red};

    fn sample_image() -> Image {
        Image::from_fn(32, 16, |x, y| {
            pack_argb((x * 8) as u8, (x * 8) as u8, (y * 16) as u8, ((x + y) * 5) as u8)
        })
    }

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsb(0, 255, 0), [1.0 / 3.0, 1.0, 1.0]);
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsb_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsb_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsb_to_rgb(1.0, 1.0, 1.0), [255, 0, 0]);
    }

    #[test]
    fn test_zero_gain_round_trip() {
        let img = sample_image();
        let out = adjust_hsb(&img, &HsbGains::default());
        for (a, b) in out.data().iter().zip(img.data()) {
            assert_eq!(alpha(*a), alpha(*b));
            for (ca, cb) in [(red(*a), red(*b)), (green(*a), green(*b)), (blue(*a), blue(*b))] {
                assert!((ca as i32 - cb as i32).abs() <= 1, "{ca} vs {cb}");
            }
        }
    }

    #[test]
    fn test_full_desaturation_is_gray() {
        let out = adjust_hsb(&sample_image(), &HsbGains { saturation: -1.0, ..HsbGains::default() });
        for &p in out.data() {
            assert_eq!(red(p), green(p));
            assert_eq!(green(p), blue(p));
        }
    }

    #[test]
    fn test_luminance_gain() {
        let img = Image::filled(1, 1, pack_rgb(100, 50, 20));
        let dark = adjust_hsb(&img, &HsbGains { luminance: -1.0, ..HsbGains::default() });
        assert_eq!(dark.pixel(0, 0), pack_rgb(0, 0, 0));
        let bright = adjust_hsb(&img, &HsbGains { luminance: 1.0, ..HsbGains::default() });
        assert_eq!(red(bright.pixel(0, 0)), 200);
        // Brightness clamps at 1.
        let white = Image::filled(1, 1, pack_rgb(200, 200, 200));
        let out = adjust_hsb(&white, &HsbGains { luminance: 1.0, ..HsbGains::default() });
        assert_eq!(out.pixel(0, 0), pack_rgb(255, 255, 255));
    }

    #[test]
    fn test_identity_flag() {
        assert!(HsbGains::default().is_identity());
        assert!(!HsbGains { hue: 0.1, ..HsbGains::default() }.is_identity());
    }
}
