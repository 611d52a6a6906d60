//! 2D complex FFT over power-of-two grids.
//!
//! Rows are transformed first, then columns through a gather buffer. The
//! forward pass is unnormalized; the inverse scales by `1 / (width * height)`
//! so `inverse(forward(x)) == x`.
//!
//! # Example
//!
//! ```rust
//! use tilt_ops::fft::Fft2d;
//! use rustfft::num_complex::Complex;
//!
//! let fft = Fft2d::new(8, 4).unwrap();
//! let mut buf = vec![Complex::new(1.0f32, 0.0); 32];
//! fft.forward(&mut buf);
//! // All energy lands in the DC term.
//! assert!((buf[0].re - 32.0).abs() < 1e-4);
//! fft.inverse(&mut buf);
//! assert!((buf[5].re - 1.0).abs() < 1e-5);
//! ```

use crate::{OpsError, OpsResult};
use rustfft::{Fft, FftPlanner, num_complex::Complex};
use std::sync::Arc;
use tracing::trace;

/// Planned forward and inverse transforms for one `width x height` grid.
///
/// Plans are immutable and `Send + Sync`, so one `Fft2d` can be shared by
/// every tile worker; scratch space is allocated per call.
#[derive(Clone)]
pub struct Fft2d {
    width: usize,
    height: usize,
    row_forward: Arc<dyn Fft<f32>>,
    row_inverse: Arc<dyn Fft<f32>>,
    col_forward: Arc<dyn Fft<f32>>,
    col_inverse: Arc<dyn Fft<f32>>,
}

impl std::fmt::Debug for Fft2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft2d")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn check_power_of_two(name: &str, n: usize) -> OpsResult<()> {
    if n == 0 || !n.is_power_of_two() {
        return Err(OpsError::InvalidDimensions(format!(
            "FFT {name} must be a non-zero power of two, got {n}"
        )));
    }
    Ok(())
}

impl Fft2d {
    /// Plans transforms for a `width x height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidDimensions`] unless both sides are non-zero
    /// powers of two.
    pub fn new(width: usize, height: usize) -> OpsResult<Self> {
        check_power_of_two("width", width)?;
        check_power_of_two("height", height)?;
        trace!(width, height, "Fft2d::new");

        let mut planner = FftPlanner::new();
        Ok(Self {
            width,
            height,
            row_forward: planner.plan_fft_forward(width),
            row_inverse: planner.plan_fft_inverse(width),
            col_forward: planner.plan_fft_forward(height),
            col_inverse: planner.plan_fft_inverse(height),
        })
    }

    /// Grid width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a planned grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Unnormalized forward transform in place.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len() != self.len()`.
    pub fn forward(&self, buf: &mut [Complex<f32>]) {
        self.transform(buf, &self.row_forward, &self.col_forward);
    }

    /// Inverse transform in place, scaled by `1 / (width * height)`.
    ///
    /// # Panics
    ///
    /// Panics if `buf.len() != self.len()`.
    pub fn inverse(&self, buf: &mut [Complex<f32>]) {
        self.transform(buf, &self.row_inverse, &self.col_inverse);
        let scale = 1.0 / self.len() as f32;
        for c in buf.iter_mut() {
            *c *= scale;
        }
    }

    fn transform(&self, buf: &mut [Complex<f32>], rows: &Arc<dyn Fft<f32>>, cols: &Arc<dyn Fft<f32>>) {
        assert_eq!(buf.len(), self.len(), "FFT buffer does not match grid");
        let (w, h) = (self.width, self.height);

        let scratch_len = rows
            .get_inplace_scratch_len()
            .max(cols.get_inplace_scratch_len());
        let mut scratch = vec![Complex::new(0.0f32, 0.0); scratch_len];

        // Every row in one call: rustfft processes consecutive chunks.
        rows.process_with_scratch(buf, &mut scratch[..rows.get_inplace_scratch_len()]);

        let mut col_buf = vec![Complex::new(0.0f32, 0.0); h];
        for x in 0..w {
            for y in 0..h {
                col_buf[y] = buf[y * w + x];
            }
            cols.process_with_scratch(&mut col_buf, &mut scratch[..cols.get_inplace_scratch_len()]);
            for y in 0..h {
                buf[y * w + x] = col_buf[y];
            }
        }
    }
}

/// In-place 2D transform of split real/imaginary planes.
///
/// `forward = true` is the unnormalized forward DFT; `false` is the inverse
/// scaled by `1 / (width * height)`.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if a side is not a power of two or
/// a plane's length is not `width * height`.
///
/// ```rust
/// use tilt_ops::fft::transform_2d;
///
/// let mut re = vec![0.0f32; 16];
/// let mut im = vec![0.0f32; 16];
/// re[0] = 1.0;
/// transform_2d(&mut re, &mut im, 4, 4, true).unwrap();
/// // An impulse has a flat spectrum.
/// assert!(re.iter().all(|v| (v - 1.0).abs() < 1e-6));
/// ```
pub fn transform_2d(
    re: &mut [f32],
    im: &mut [f32],
    width: usize,
    height: usize,
    forward: bool,
) -> OpsResult<()> {
    let fft = Fft2d::new(width, height)?;
    let n = fft.len();
    if re.len() != n || im.len() != n {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {n} values per plane, got {} real and {} imaginary",
            re.len(),
            im.len()
        )));
    }

    let mut buf: Vec<Complex<f32>> = re
        .iter()
        .zip(im.iter())
        .map(|(&r, &i)| Complex::new(r, i))
        .collect();
    if forward {
        fft.forward(&mut buf);
    } else {
        fft.inverse(&mut buf);
    }
    for ((r, i), c) in re.iter_mut().zip(im.iter_mut()).zip(buf) {
        *r = c.re;
        *i = c.im;
    }
    Ok(())
}

/// Index of the cell swapped with `i` by an FFT shift along an axis of
/// power-of-two length `n`.
///
/// Moving by `n / 2` modulo `n` only flips the top bit, so the shift is an
/// XOR and is its own inverse.
///
/// ```rust
/// use tilt_ops::fft::fft_shift_index;
///
/// assert_eq!(fft_shift_index(0, 8), 4);
/// assert_eq!(fft_shift_index(5, 8), 1);
/// ```
#[inline]
pub const fn fft_shift_index(i: usize, n: usize) -> usize {
    i ^ (n >> 1)
}

/// Swaps the quadrants of a `width x height` grid so the zero-frequency cell
/// moves to the centre (and back, when applied twice).
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if a side is not a power of two or
/// `buf.len() != width * height`.
pub fn fft_shift<T: Copy>(buf: &mut [T], width: usize, height: usize) -> OpsResult<()> {
    check_power_of_two("width", width)?;
    check_power_of_two("height", height)?;
    if buf.len() != width * height {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} cells, got {}",
            width * height,
            buf.len()
        )));
    }
    let src = buf.to_vec();
    for y in 0..height {
        let sy = fft_shift_index(y, height);
        for x in 0..width {
            buf[y * width + x] = src[sy * width + fft_shift_index(x, width)];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(Fft2d::new(12, 8).is_err());
        assert!(Fft2d::new(8, 0).is_err());
        let mut re = vec![0.0; 8];
        let mut im = vec![0.0; 7];
        assert!(transform_2d(&mut re, &mut im, 4, 2, true).is_err());
    }

    #[test]
    fn test_forward_inverse_identity() {
        let (w, h) = (16, 8);
        let fft = Fft2d::new(w, h).unwrap();
        let original: Vec<Complex<f32>> = (0..w * h)
            .map(|i| Complex::new((i % 7) as f32 * 10.0, (i % 3) as f32))
            .collect();
        let mut buf = original.clone();
        fft.forward(&mut buf);
        fft.inverse(&mut buf);
        for (a, b) in buf.iter().zip(&original) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-3);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_split_planes_match_complex() {
        let (w, h) = (4, 8);
        let mut re: Vec<f32> = (0..w * h).map(|i| i as f32).collect();
        let mut im = vec![0.0f32; w * h];
        let fft = Fft2d::new(w, h).unwrap();
        let mut buf: Vec<Complex<f32>> = re.iter().map(|&r| Complex::new(r, 0.0)).collect();
        fft.forward(&mut buf);
        transform_2d(&mut re, &mut im, w, h, true).unwrap();
        for i in 0..w * h {
            assert_abs_diff_eq!(re[i], buf[i].re, epsilon = 1e-4);
            assert_abs_diff_eq!(im[i], buf[i].im, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_single_frequency() {
        // cos(2*pi*x/8) puts half its energy in bins 1 and 7 of row 0.
        let (w, h) = (8, 2);
        let mut re: Vec<f32> = (0..w * h)
            .map(|i| (2.0 * std::f32::consts::PI * (i % w) as f32 / w as f32).cos())
            .collect();
        let mut im = vec![0.0; w * h];
        transform_2d(&mut re, &mut im, w, h, true).unwrap();
        assert_abs_diff_eq!(re[1], 8.0, epsilon = 1e-4);
        assert_abs_diff_eq!(re[7], 8.0, epsilon = 1e-4);
        assert_abs_diff_eq!(re[0], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(re[w + 1], 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_shift_is_involution() {
        let (w, h) = (8, 4);
        let original: Vec<u32> = (0..(w * h) as u32).collect();
        let mut buf = original.clone();
        fft_shift(&mut buf, w, h).unwrap();
        assert_eq!(buf[0], original[2 * w + 4]);
        assert_ne!(buf, original);
        fft_shift(&mut buf, w, h).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn test_shift_index_degenerate_axis() {
        assert_eq!(fft_shift_index(0, 1), 0);
        assert_eq!(fft_shift_index(1, 2), 0);
    }
}
