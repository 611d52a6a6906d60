//! Catmull-Rom splines over scalar and ARGB knots.
//!
//! Two knot layouts are supported:
//!
//! - uniform: `x` in `[0, 1]` is spread evenly over the interior spans
//! - variable: explicit x positions, as used by tone curves
//!
//! Every form needs at least four knots; the first and last only shape the
//! end tangents.
//!
//! ```rust
//! use tilt_math::spline;
//!
//! // Evenly spaced linear data stays linear between the interior knots.
//! let y = spline(0.5, &[0.0, 1.0, 2.0, 3.0]).unwrap();
//! assert!((y - 1.5).abs() < 1e-6);
//! ```

use crate::{MathError, MathResult, saturate};

/// Catmull-Rom basis, rows give the cubic, quadratic, linear and constant
/// coefficients.
const BASIS: [[f32; 4]; 4] = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

const MIN_KNOTS: usize = 4;

#[inline]
fn catmull_rom(t: f32, k: [f32; 4]) -> f32 {
    let coef = |row: &[f32; 4]| row[0] * k[0] + row[1] * k[1] + row[2] * k[2] + row[3] * k[3];
    let c3 = coef(&BASIS[0]);
    let c2 = coef(&BASIS[1]);
    let c1 = coef(&BASIS[2]);
    let c0 = coef(&BASIS[3]);
    ((c3 * t + c2) * t + c1) * t + c0
}

fn check_len(len: usize) -> MathResult<()> {
    if len < MIN_KNOTS {
        return Err(MathError::TooFewKnots {
            needed: MIN_KNOTS,
            got: len,
        });
    }
    Ok(())
}

/// Span index and local parameter for uniformly spaced knots.
fn uniform_span(x: f32, len: usize) -> (usize, f32) {
    let spans = len - 3;
    let x = saturate(x) * spans as f32;
    let span = (x as usize).min(len - 4);
    (span, x - span as f32)
}

/// Span index and local parameter for explicitly positioned knots.
fn variable_span(x: f32, xknots: &[i32]) -> (usize, f32) {
    let spans = xknots.len() - 3;
    let mut span = 0;
    while span < spans && xknots[span + 1] as f32 <= x {
        span += 1;
    }
    let dx = (xknots[span + 1] - xknots[span]) as f32;
    let t = if dx == 0.0 {
        0.0
    } else {
        (x - xknots[span] as f32) / dx
    };
    match span.checked_sub(1) {
        Some(s) => (s, t),
        None => (0, 0.0),
    }
}

#[inline]
fn window(values: &[f32], span: usize) -> [f32; 4] {
    [values[span], values[span + 1], values[span + 2], values[span + 3]]
}

/// Evaluates a uniform Catmull-Rom spline at `x` in `[0, 1]`.
pub fn spline(x: f32, knots: &[f32]) -> MathResult<f32> {
    check_len(knots.len())?;
    let (span, t) = uniform_span(x, knots.len());
    Ok(catmull_rom(t, window(knots, span)))
}

/// Evaluates a Catmull-Rom spline through knots at explicit x positions.
///
/// `xknots` must be non-decreasing.
///
/// ```rust
/// use tilt_math::spline_knots;
///
/// let y = spline_knots(127.5, &[0, 0, 255, 255], &[0, 0, 255, 255]).unwrap();
/// assert!((y - 127.5).abs() < 1e-3);
/// ```
pub fn spline_knots(x: f32, xknots: &[i32], yknots: &[i32]) -> MathResult<f32> {
    check_len(xknots.len())?;
    if xknots.len() != yknots.len() {
        return Err(MathError::KnotLengthMismatch {
            x_len: xknots.len(),
            y_len: yknots.len(),
        });
    }
    let (span, t) = variable_span(x, xknots);
    let k = [
        yknots[span] as f32,
        yknots[span + 1] as f32,
        yknots[span + 2] as f32,
        yknots[span + 3] as f32,
    ];
    Ok(catmull_rom(t, k))
}

/// Evaluates a spline per channel of ARGB knots, clamping each to `[0, 255]`.
fn color_eval(t: f32, knots: [u32; 4]) -> u32 {
    let mut out = 0u32;
    for shift in [0u32, 8, 16, 24] {
        let k = knots.map(|c| ((c >> shift) & 0xFF) as f32);
        let n = (catmull_rom(t, k) as i32).clamp(0, 255) as u32;
        out |= n << shift;
    }
    out
}

/// Uniform Catmull-Rom spline over ARGB knots.
///
/// ```rust
/// use tilt_math::color_spline;
///
/// let gray = color_spline(0.0, &[0xFF000000, 0xFF404040, 0xFF808080, 0xFFC0C0C0]).unwrap();
/// assert_eq!(gray, 0xFF404040);
/// ```
pub fn color_spline(x: f32, knots: &[u32]) -> MathResult<u32> {
    check_len(knots.len())?;
    let (span, t) = uniform_span(x, knots.len());
    Ok(color_eval(
        t,
        [knots[span], knots[span + 1], knots[span + 2], knots[span + 3]],
    ))
}

/// Catmull-Rom spline over ARGB knots at explicit x positions.
pub fn color_spline_knots(x: i32, xknots: &[i32], yknots: &[u32]) -> MathResult<u32> {
    check_len(xknots.len())?;
    if xknots.len() != yknots.len() {
        return Err(MathError::KnotLengthMismatch {
            x_len: xknots.len(),
            y_len: yknots.len(),
        });
    }
    let (span, t) = variable_span(x as f32, xknots);
    Ok(color_eval(
        t,
        [yknots[span], yknots[span + 1], yknots[span + 2], yknots[span + 3]],
    ))
}
