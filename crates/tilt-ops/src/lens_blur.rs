//! Frequency-domain lens blur with a polygonal aperture and bloom.
//!
//! The image is cut into overlapping power-of-two tiles. Each tile is read
//! with edge-clamped padding of `r = ceil(radius)` pixels, bloomed, taken to
//! the frequency domain, multiplied by the kernel spectrum and brought back.
//! Only the inner block, `r` pixels in from every tile edge, is kept, so
//! neighbouring tiles meet without seams.
//!
//! Channels travel in pairs as complex numbers: alpha + i*red and
//! green + i*blue. The kernel is real, so the pairs never mix.
//!
//! When the `parallel` feature is enabled, tiles are rendered with rayon.
//!
//! # Example
//!
//! ```rust
//! use tilt_core::{Image, pixel::pack_rgb};
//! use tilt_ops::{aperture::Aperture, lens_blur::lens_blur};
//!
//! let gray = Image::filled(48, 32, pack_rgb(128, 128, 128));
//! let out = lens_blur(&gray, &Aperture::disc(4.0)).unwrap();
//! assert_eq!(out, gray);
//! ```

use crate::aperture::{Aperture, ApertureKernel};
use crate::fft::{Fft2d, fft_shift_index};
use crate::{OpsError, OpsResult};
use rustfft::num_complex::Complex;
use tilt_core::pixel::{pack_argb_f32, unpack_argb};
use tilt_core::{Image, Rect};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tile cap for radii below [`LARGE_RADIUS`].
const SMALL_TILE: usize = 128;
/// Tile cap from [`LARGE_RADIUS`] up.
const LARGE_TILE: usize = 256;
const LARGE_RADIUS: usize = 32;

/// Tile geometry for one blur call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Padding on every tile edge, `ceil(radius)`.
    pub pad: u32,
    /// FFT grid width (power of two).
    pub tile_width: usize,
    /// FFT grid height (power of two).
    pub tile_height: usize,
}

impl TileGrid {
    /// Chooses tile sizes for an image of `width x height` and a blur of
    /// `pad` whole pixels.
    ///
    /// ```rust
    /// use tilt_ops::lens_blur::TileGrid;
    ///
    /// let grid = TileGrid::new(1000, 40, 10);
    /// assert_eq!((grid.tile_width, grid.tile_height), (128, 64));
    /// assert_eq!(grid.step_x(), 108);
    /// ```
    pub fn new(width: u32, height: u32, pad: u32) -> Self {
        Self {
            pad,
            tile_width: tile_side(width as usize, pad as usize),
            tile_height: tile_side(height as usize, pad as usize),
        }
    }

    /// Horizontal distance between tile origins.
    #[inline]
    pub fn step_x(&self) -> usize {
        self.tile_width - 2 * self.pad as usize
    }

    /// Vertical distance between tile origins.
    #[inline]
    pub fn step_y(&self) -> usize {
        self.tile_height - 2 * self.pad as usize
    }

    /// Top-left corners of every tile, in image coordinates, row by row.
    ///
    /// The first tile starts `pad` pixels above and left of the image.
    pub fn origins(&self, width: u32, height: u32) -> Vec<(i64, i64)> {
        let pad = self.pad as i64;
        let mut out = Vec::new();
        let mut y = -pad;
        while y < height as i64 {
            let mut x = -pad;
            while x < width as i64 {
                out.push((x, y));
                x += self.step_x() as i64;
            }
            y += self.step_y() as i64;
        }
        out
    }

    /// Destination block written by the tile at `origin`, clipped to the image.
    pub fn inner_rect(&self, origin: (i64, i64), bounds: &Rect) -> Option<Rect> {
        Rect::new(
            origin.0,
            origin.1,
            self.tile_width as u32,
            self.tile_height as u32,
        )
        .inset(self.pad)?
        .intersect(bounds)
    }
}

/// Power-of-two tile side for one axis.
///
/// The step between tiles, `side - 2 * pad`, is always positive: radii too
/// large for the capped size get a grid of up to `4 * pad`.
fn tile_side(dim: usize, pad: usize) -> usize {
    let cap = if pad < LARGE_RADIUS { SMALL_TILE } else { LARGE_TILE };
    let padded = dim + 2 * pad;
    let side = cap.min(padded).next_power_of_two();
    if side > 2 * pad {
        side
    } else {
        (4 * pad).min(padded).next_power_of_two()
    }
}

/// Blurs `source` through `aperture`.
///
/// Returns an image of the same size. Bloom may push intermediate values past
/// 255; every output channel is rounded and clamped to `[0, 255]`.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] if `source` is empty
/// - [`OpsError::ParameterOutOfRange`] if `aperture` fails validation
pub fn lens_blur(source: &Image, aperture: &Aperture) -> OpsResult<Image> {
    let (width, height) = source.dimensions();
    trace!(
        width,
        height,
        radius = aperture.radius,
        bloom = aperture.bloom,
        threshold = aperture.bloom_threshold,
        sides = aperture.sides,
        "lens_blur"
    );
    if source.is_empty() {
        return Err(OpsError::empty_image(width, height));
    }
    aperture.validate()?;

    let grid = TileGrid::new(width, height, aperture.pixel_radius());
    let fft = Fft2d::new(grid.tile_width, grid.tile_height)?;
    let kernel = ApertureKernel::synthesize(aperture, grid.tile_width, grid.tile_height);
    let spectrum = kernel.spectrum(&fft)?;
    let origins = grid.origins(width, height);
    debug!(
        tile_width = grid.tile_width,
        tile_height = grid.tile_height,
        pad = grid.pad,
        tiles = origins.len(),
        "lens blur tiling"
    );

    let job = TileJob {
        source,
        aperture,
        grid,
        fft: &fft,
        spectrum: &spectrum,
    };
    let blocks = render_tiles(&job, &origins);

    let mut dst = Image::new(width, height);
    for (rect, data) in blocks.into_iter().flatten() {
        let block = Image::from_data(rect.width, rect.height, data)?;
        dst.paste(rect.x as u32, rect.y as u32, &block)?;
    }
    Ok(dst)
}

#[cfg(feature = "parallel")]
fn render_tiles(job: &TileJob<'_>, origins: &[(i64, i64)]) -> Vec<Option<(Rect, Vec<u32>)>> {
    origins.par_iter().map(|&origin| job.render(origin)).collect()
}

#[cfg(not(feature = "parallel"))]
fn render_tiles(job: &TileJob<'_>, origins: &[(i64, i64)]) -> Vec<Option<(Rect, Vec<u32>)>> {
    origins.iter().map(|&origin| job.render(origin)).collect()
}

/// Read-only state shared by every tile of one call.
struct TileJob<'a> {
    source: &'a Image,
    aperture: &'a Aperture,
    grid: TileGrid,
    fft: &'a Fft2d,
    spectrum: &'a [Complex<f32>],
}

impl TileJob<'_> {
    /// Convolves one tile and returns its clipped inner block.
    fn render(&self, origin: (i64, i64)) -> Option<(Rect, Vec<u32>)> {
        let rect = self.grid.inner_rect(origin, &self.source.bounds())?;
        let (w, h) = (self.grid.tile_width, self.grid.tile_height);
        let (ox, oy) = origin;

        let mut ar = Vec::with_capacity(w * h);
        let mut gb = Vec::with_capacity(w * h);
        for gy in 0..h as i64 {
            for gx in 0..w as i64 {
                let [a, r, g, b] = unpack_argb(self.source.pixel_clamped(ox + gx, oy + gy));
                let bloom = |c: u8| self.aperture.bloom_channel(c as f32);
                ar.push(Complex::new(a as f32, bloom(r)));
                gb.push(Complex::new(bloom(g), bloom(b)));
            }
        }

        for plane in [&mut ar, &mut gb] {
            self.fft.forward(plane);
            for (v, k) in plane.iter_mut().zip(self.spectrum) {
                *v *= *k;
            }
            self.fft.inverse(plane);
        }

        // The kernel sits at the grid centre, so results come out shifted by
        // half a grid on each axis.
        let mut block = Vec::with_capacity(rect.area() as usize);
        for iy in rect.y..rect.bottom() {
            let sy = fft_shift_index((iy - oy) as usize, h);
            for ix in rect.x..rect.right() {
                let i = sy * w + fft_shift_index((ix - ox) as usize, w);
                block.push(pack_argb_f32(ar[i].re, ar[i].im, gb[i].re, gb[i].im));
            }
        }
        Some((rect, block))
    }
}
