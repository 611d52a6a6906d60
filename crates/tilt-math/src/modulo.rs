//! Floor-consistent modulo and angle wrapping.
//!
//! Rust's `%` truncates toward zero, so `-1.0 % 3.0 == -1.0`. Kernel
//! synthesis needs the floored form, which always lands in `[0, b)`.
//!
//! ```rust
//! use tilt_math::{modulo, modulo_i32};
//!
//! assert_eq!(-1.0 % 3.0, -1.0);
//! assert_eq!(modulo(-1.0, 3.0), 2.0);
//! assert_eq!(modulo_i32(-7, 3), 2);
//! ```

use std::f64::consts::TAU;

/// `a mod b` for `f64`, in `[0, b)` for positive `b`.
#[inline]
pub fn modulo(a: f64, b: f64) -> f64 {
    let n = (a / b).trunc();
    let r = a - n * b;
    if r < 0.0 { r + b } else { r }
}

/// `a mod b` for `f32`, in `[0, b)` for positive `b`.
#[inline]
pub fn modulo_f32(a: f32, b: f32) -> f32 {
    let n = (a / b).trunc();
    let r = a - n * b;
    if r < 0.0 { r + b } else { r }
}

/// `a mod b` for `i32`, in `[0, b)` for positive `b`.
///
/// # Panics
///
/// Panics if `b == 0`.
#[inline]
pub fn modulo_i32(a: i32, b: i32) -> i32 {
    let r = a % b;
    if r < 0 { r + b } else { r }
}

/// Wraps an angle in radians into `[0, 2π)`.
#[inline]
pub fn wrap_angle(radians: f64) -> f64 {
    modulo(radians, TAU)
}

/// Folds an angle into one sector of a regular polygon with `sides` edges.
///
/// The result lies in `[-π/sides, π/sides)`: zero means the direction points
/// at the middle of an edge, the extremes point at vertices.
///
/// ```rust
/// use std::f64::consts::PI;
/// use tilt_math::polygon_sector_angle;
///
/// // Square with a vertex on the +X axis: 45 degrees is the middle of an edge.
/// assert!(polygon_sector_angle(PI / 4.0, 4).abs() < 1e-12);
/// assert!((polygon_sector_angle(0.0, 4) + PI / 4.0).abs() < 1e-12);
/// ```
#[inline]
pub fn polygon_sector_angle(radians: f64, sides: u32) -> f64 {
    let half = std::f64::consts::PI / sides as f64;
    modulo(radians, half * 2.0) - half
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_modulo_positive() {
        assert_abs_diff_eq!(modulo(7.5, 2.0), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(modulo_f32(7.5, 2.0), 1.5, epsilon = 1e-6);
        assert_eq!(modulo_i32(7, 3), 1);
    }

    #[test]
    fn test_modulo_negative() {
        assert_abs_diff_eq!(modulo(-0.5, 2.0), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(modulo_f32(-4.25, 2.0), 1.75, epsilon = 1e-6);
        assert_eq!(modulo_i32(-1, 5), 4);
        assert_eq!(modulo_i32(-10, 5), 0);
    }

    #[test]
    fn test_modulo_range() {
        for i in -100..100 {
            let a = i as f64 * 0.37;
            let r = modulo(a, 1.3);
            assert!((0.0..1.3).contains(&r), "{a} -> {r}");
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert_abs_diff_eq!(wrap_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(5.0 * PI), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_polygon_sector_angle_edge_midpoint() {
        // Pentagon sectors are 72 degrees wide; the sector centre maps to 0.
        let sector = 2.0 * PI / 5.0;
        assert_abs_diff_eq!(polygon_sector_angle(sector / 2.0, 5), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            polygon_sector_angle(3.0 * sector + sector / 2.0, 5),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_polygon_sector_angle_bounds() {
        let half = PI / 6.0;
        for i in -50..50 {
            let a = polygon_sector_angle(i as f64 * 0.173, 6);
            assert!(a >= -half - 1e-12 && a < half + 1e-12);
        }
    }
}
