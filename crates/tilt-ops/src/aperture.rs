//! Lens aperture parameters and kernel synthesis.
//!
//! The aperture is either a disc (`sides == 0`) or a regular polygon. Its
//! footprint becomes a flat, normalized convolution kernel laid out on the
//! FFT grid with its centre at `(width / 2, height / 2)`.
//!
//! # Example
//!
//! ```rust
//! use tilt_ops::aperture::{Aperture, ApertureKernel};
//!
//! let aperture = Aperture { radius: 4.0, ..Aperture::default() };
//! let kernel = ApertureKernel::synthesize(&aperture, 16, 16);
//! assert!((kernel.sum() - 1.0).abs() < 1e-5);
//! ```

use crate::fft::Fft2d;
use crate::{OpsError, OpsResult};
use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tilt_math::polygon_sector_angle;
use tracing::debug;

/// Largest accepted blur radius in pixels.
pub const MAX_RADIUS: f32 = 1024.0;

/// Shape and highlight response of the simulated lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aperture {
    /// Blur radius in pixels.
    pub radius: f32,
    /// Gain applied to channels above `bloom_threshold` before convolution.
    pub bloom: f32,
    /// Channel level (0..=255) above which bloom applies.
    pub bloom_threshold: f32,
    /// 0 for a disc, otherwise the polygon side count (3 or more).
    pub sides: u32,
    /// Polygon rotation in radians.
    pub angle: f32,
}

impl Default for Aperture {
    fn default() -> Self {
        Self {
            radius: 10.0,
            bloom: 2.0,
            bloom_threshold: 192.0,
            sides: 5,
            angle: 0.0,
        }
    }
}

impl Aperture {
    /// A circular aperture with bloom disabled.
    pub fn disc(radius: f32) -> Self {
        Self {
            radius,
            bloom: 1.0,
            sides: 0,
            ..Self::default()
        }
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::ParameterOutOfRange`] naming the first bad field.
    pub fn validate(&self) -> OpsResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 || self.radius > MAX_RADIUS {
            return Err(OpsError::out_of_range("radius", self.radius, "0..=1024"));
        }
        if !self.bloom.is_finite() || self.bloom < 1.0 {
            return Err(OpsError::out_of_range("bloom", self.bloom, ">= 1"));
        }
        if !(0.0..=255.0).contains(&self.bloom_threshold) {
            return Err(OpsError::out_of_range(
                "bloom_threshold",
                self.bloom_threshold,
                "0..=255",
            ));
        }
        if matches!(self.sides, 1 | 2) {
            return Err(OpsError::out_of_range("sides", self.sides, "0 or >= 3"));
        }
        if !self.angle.is_finite() {
            return Err(OpsError::out_of_range("angle", self.angle, "finite radians"));
        }
        Ok(())
    }

    /// Radius rounded up to whole pixels: the padding every tile needs.
    #[inline]
    pub fn pixel_radius(&self) -> u32 {
        self.radius.ceil() as u32
    }

    /// Applies bloom to one channel value.
    #[inline]
    pub fn bloom_channel(&self, v: f32) -> f32 {
        if v > self.bloom_threshold { v * self.bloom } else { v }
    }

    /// Whether the cell at offset `(dx, dy)` from the centre lies inside.
    fn covers(&self, dx: f64, dy: f64) -> bool {
        let radius = self.radius as f64;
        let d2 = dx * dx + dy * dy;
        if d2 >= radius * radius {
            return false;
        }
        let scale = if self.sides == 0 {
            1.0
        } else {
            let half = PI / self.sides as f64;
            let a = polygon_sector_angle(dy.atan2(dx) + self.angle as f64, self.sides);
            a.cos() / half.cos()
        };
        scale * d2.sqrt() < radius
    }
}

/// Flat aperture kernel on a `width x height` grid, summing to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ApertureKernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
    inside: usize,
}

impl ApertureKernel {
    /// Rasterizes `aperture` onto a grid centred at `(width / 2, height / 2)`.
    ///
    /// Covered cells share equal weight. When no cell is covered (radius 0)
    /// the centre cell alone gets weight 1, giving an identity kernel.
    pub fn synthesize(aperture: &Aperture, width: usize, height: usize) -> Self {
        let (cx, cy) = (width / 2, height / 2);
        let mut weights = vec![0.0f32; width * height];
        let mut inside = 0usize;
        for y in 0..height {
            let dy = y as f64 - cy as f64;
            for x in 0..width {
                if aperture.covers(x as f64 - cx as f64, dy) {
                    weights[y * width + x] = 1.0;
                    inside += 1;
                }
            }
        }

        if inside == 0 {
            if let Some(w) = weights.get_mut(cy * width + cx) {
                *w = 1.0;
            }
            inside = 1;
        } else {
            let norm = 1.0 / inside as f32;
            for w in weights.iter_mut() {
                *w *= norm;
            }
        }
        debug!(width, height, inside, sides = aperture.sides, "aperture kernel");

        Self {
            width,
            height,
            weights,
            inside,
        }
    }

    /// Grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid cell holding the kernel centre.
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of cells with non-zero weight.
    pub fn inside_count(&self) -> usize {
        self.inside
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Non-zero taps as `(dx, dy, weight)` offsets from the centre.
    pub fn taps(&self) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        let (cx, cy) = self.center();
        self.weights.iter().enumerate().filter(|(_, w)| **w != 0.0).map(move |(i, &w)| {
            let x = (i % self.width) as i64 - cx as i64;
            let y = (i / self.width) as i64 - cy as i64;
            (x, y, w)
        })
    }

    /// Forward transform of the kernel, ready for pointwise multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidDimensions`] if `fft` was planned for a
    /// different grid.
    pub fn spectrum(&self, fft: &Fft2d) -> OpsResult<Vec<Complex<f32>>> {
        if fft.width() != self.width || fft.height() != self.height {
            return Err(OpsError::InvalidDimensions(format!(
                "kernel grid {}x{} does not match FFT grid {}x{}",
                self.width,
                self.height,
                fft.width(),
                fft.height()
            )));
        }
        let mut buf: Vec<Complex<f32>> = self.weights.iter().map(|&w| Complex::new(w, 0.0)).collect();
        fft.forward(&mut buf);
        Ok(buf)
    }
}
