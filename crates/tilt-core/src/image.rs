//! Packed ARGB image buffer.
//!
//! [`Image`] owns a single contiguous row-major buffer of `u32` pixels in
//! `0xAARRGGBB` order (see [`crate::pixel`]).
//!
//! # Memory Layout
//!
//! ```text
//! Memory: [ARGB ARGB ARGB ...]  ← Row 0
//!         [ARGB ARGB ARGB ...]  ← Row 1
//!         ...
//! ```
//!
//! Images are value-like: operations in this workspace take `&Image` and
//! return a new `Image`. A zero-height image is representable so that an
//! empty band can flow through split/merge, but pipeline entry points reject
//! empty sources.
//!
//! # Usage
//!
//! ```rust
//! use tilt_core::{Image, Rect};
//!
//! let mut img = Image::filled(4, 3, 0xFF808080);
//! img.set_pixel(1, 1, 0xFFFF0000);
//!
//! let middle = img.copy_region(Rect::new(0, 1, 4, 1)).unwrap();
//! assert_eq!(middle.pixel(1, 0), 0xFFFF0000);
//! ```

use crate::{Error, Rect, Result};

/// Owned ARGB image buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    /// Pixel buffer, `width * height` entries, row-major.
    data: Vec<u32>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl Image {
    /// Creates a transparent black image.
    ///
    /// ```rust
    /// use tilt_core::Image;
    ///
    /// let img = Image::new(16, 8);
    /// assert_eq!(img.dimensions(), (16, 8));
    /// assert!(img.data().iter().all(|&p| p == 0));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, crate::pixel::TRANSPARENT)
    }

    /// Creates an image where every pixel is `argb`.
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            data: vec![argb; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    ///
    /// ```rust
    /// use tilt_core::Image;
    ///
    /// assert!(Image::from_data(2, 2, vec![0; 4]).is_ok());
    /// assert!(Image::from_data(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Raw pixel buffer.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable raw pixel buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.data[self.index(x, y)]
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = self.index(x, y);
        self.data[idx] = argb;
    }

    /// Samples with edge clamping: coordinates outside the image read the
    /// nearest edge pixel.
    ///
    /// The image must not be empty.
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> u32 {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.data[self.index(cx, cy)]
    }

    /// Row `y` as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Row `y` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = self.index(0, y);
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Copies a region into a new image.
    ///
    /// A zero-height or zero-width region inside the bounds yields an empty image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region is not fully inside the image.
    pub fn copy_region(&self, region: Rect) -> Result<Image> {
        if !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }
        let x0 = region.x as usize;
        let w = region.width as usize;
        let mut data = Vec::with_capacity(w * region.height as usize);
        for y in region.y as u32..region.bottom() as u32 {
            let row = self.row(y);
            data.extend_from_slice(&row[x0..x0 + w]);
        }
        Ok(Image {
            data,
            width: region.width,
            height: region.height,
        })
    }

    /// Copies `count` full-width rows starting at `y`.
    pub fn copy_rows(&self, y: u32, count: u32) -> Result<Image> {
        self.copy_region(Rect::new(0, y as i64, self.width, count))
    }

    /// Writes `src` into this image with its top-left corner at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `src` does not fit.
    pub fn paste(&mut self, x: u32, y: u32, src: &Image) -> Result<()> {
        let region = Rect::new(x as i64, y as i64, src.width, src.height);
        if !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }
        let x0 = x as usize;
        let w = src.width as usize;
        for sy in 0..src.height {
            let dst_row = self.row_mut(y + sy);
            dst_row[x0..x0 + w].copy_from_slice(src.row(sy));
        }
        Ok(())
    }

    /// Stacks images top to bottom.
    ///
    /// Empty (zero-height) parts contribute no rows. All parts must share the
    /// same width.
    ///
    /// ```rust
    /// use tilt_core::Image;
    ///
    /// let a = Image::filled(3, 2, 1);
    /// let b = Image::filled(3, 0, 2);
    /// let c = Image::filled(3, 1, 3);
    /// let out = Image::stack_vertical(&[&a, &b, &c]).unwrap();
    /// assert_eq!(out.dimensions(), (3, 3));
    /// assert_eq!(out.pixel(0, 2), 3);
    /// ```
    pub fn stack_vertical(parts: &[&Image]) -> Result<Image> {
        let Some(first) = parts.first() else {
            return Err(Error::invalid_dimensions(0, 0, "nothing to stack"));
        };
        let width = first.width;
        let mut height = 0u32;
        for part in parts {
            if part.width != width {
                return Err(Error::dimension_mismatch(
                    first.dimensions(),
                    part.dimensions(),
                ));
            }
            height = height
                .checked_add(part.height)
                .ok_or_else(|| Error::invalid_dimensions(width, u32::MAX, "stacked height overflows"))?;
        }
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for part in parts {
            data.extend_from_slice(&part.data);
        }
        Ok(Image {
            data,
            width,
            height,
        })
    }
}
