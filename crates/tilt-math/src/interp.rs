//! Scalar shaping and interpolation functions.
//!
//! - Linear interpolation ([`lerp`], [`lerp_i32`])
//! - Clamping ([`clamp`], [`clamp_i32`], [`saturate`])
//! - Steps and pulses ([`step`], [`pulse`], [`smooth_step`], [`smooth_pulse`])
//! - Curve shaping ([`bias`], [`gain`], [`circle_up`], [`circle_down`], [`triangle`])
//!
//! # Usage
//!
//! ```rust
//! use tilt_math::{lerp, clamp, smooth_step};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
//! assert_eq!(smooth_step(0.0, 1.0, 0.5), 0.5);
//! ```

use crate::modulo_f32;

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// ```rust
/// use tilt_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Integer linear interpolation, truncating toward zero.
#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    (a as f32 + t * (b - a) as f32) as i32
}

/// Clamps a value to the range [min, max].
///
/// ```rust
/// use tilt_math::clamp;
///
/// assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps an integer to the range [min, max].
#[inline]
pub fn clamp_i32(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Returns 0 for `x < edge`, 1 otherwise.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Returns 1 for `x` in `[a, b)`, 0 otherwise.
#[inline]
pub fn pulse(a: f32, b: f32, x: f32) -> f32 {
    if x < a || x >= b { 0.0 } else { 1.0 }
}

/// Cubic (Hermite) step between two thresholds.
#[inline]
pub fn smooth_step(a: f32, b: f32, x: f32) -> f32 {
    if x < a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    t * t * (3.0 - 2.0 * t)
}

/// A pulse whose rising edge is smoothed over `[a1, a2]` and falling edge
/// over `[b1, b2]`.
#[inline]
pub fn smooth_pulse(a1: f32, a2: f32, b1: f32, b2: f32, x: f32) -> f32 {
    if x < a1 || x >= b2 {
        return 0.0;
    }
    if x >= a2 {
        if x < b1 {
            return 1.0;
        }
        let t = (x - b1) / (b2 - b1);
        return 1.0 - t * t * (3.0 - 2.0 * t);
    }
    let t = (x - a1) / (a2 - a1);
    t * t * (3.0 - 2.0 * t)
}

/// Schlick's bias: moves values in the unit interval toward 0 or 1.
///
/// `b = 0.5` is the identity; smaller values bias toward 0.
///
/// ```rust
/// use tilt_math::bias;
///
/// assert!((bias(0.3, 0.5) - 0.3).abs() < 1e-6);
/// assert!(bias(0.5, 0.25) < 0.5);
/// ```
#[inline]
pub fn bias(x: f32, b: f32) -> f32 {
    x / ((1.0 / b - 2.0) * (1.0 - x) + 1.0)
}

/// Schlick's gain: an S-shaped contrast curve built from two biases.
///
/// `g = 0.5` is the identity; values above 0.5 pull the curve toward the
/// midpoint, values below push it away.
#[inline]
pub fn gain(x: f32, g: f32) -> f32 {
    let c = (1.0 / g - 2.0) * (1.0 - 2.0 * x);
    if x < 0.5 {
        x / (c + 1.0)
    } else {
        (c - x) / (c - 1.0)
    }
}

/// Quarter-circle rising curve: `y` on the unit circle for `1 - x`.
#[inline]
pub fn circle_up(x: f32) -> f32 {
    let x = 1.0 - x;
    (1.0 - x * x).sqrt()
}

/// Quarter-circle falling curve: `1 - y` on the unit circle for `x`.
#[inline]
pub fn circle_down(x: f32) -> f32 {
    1.0 - (1.0 - x * x).sqrt()
}

/// Repeating triangle wave in `[0, 1]` with wavelength 1.
#[inline]
pub fn triangle(x: f32) -> f32 {
    let r = modulo_f32(x, 1.0);
    2.0 * if r < 0.5 { r } else { 1.0 - r }
}
