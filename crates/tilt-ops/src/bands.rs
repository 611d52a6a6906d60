//! Horizontal band split and merge.
//!
//! An image is cut into top, middle and bottom bands by two height
//! fractions. Band heights are `round(height * top)` and
//! `round(height * bottom)`; the bottom band always ends at the last row and
//! the middle band takes what is left, so the three bands tile the image
//! exactly.

use crate::{OpsError, OpsResult};
use tilt_core::Image;
use tracing::debug;

/// Row counts of the three bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandLayout {
    /// Rows in the top band.
    pub top: u32,
    /// Rows in the middle (in-focus) band.
    pub middle: u32,
    /// Rows in the bottom band.
    pub bottom: u32,
}

impl BandLayout {
    /// Computes band heights for an image `height` rows tall.
    ///
    /// # Errors
    ///
    /// - [`OpsError::ParameterOutOfRange`] if a fraction is NaN or outside `[0, 1)`
    /// - [`OpsError::InvalidDimensions`] if the fractions leave no middle band
    ///
    /// ```rust
    /// use tilt_ops::bands::BandLayout;
    ///
    /// let layout = BandLayout::compute(256, 0.3, 0.3).unwrap();
    /// assert_eq!((layout.top, layout.middle, layout.bottom), (77, 102, 77));
    /// ```
    pub fn compute(height: u32, top: f32, bottom: f32) -> OpsResult<Self> {
        check_fractions(top, bottom)?;
        let top_rows = (height as f32 * top).round() as u32;
        let bottom_rows = (height as f32 * bottom).round() as u32;
        let middle = height
            .checked_sub(top_rows.saturating_add(bottom_rows))
            .filter(|&m| m > 0)
            .ok_or_else(|| {
                OpsError::InvalidDimensions(format!(
                    "no middle band left in {height} rows with top {top} and bottom {bottom}"
                ))
            })?;

        let layout = Self {
            top: top_rows,
            middle,
            bottom: bottom_rows,
        };
        debug!(height, top = layout.top, middle = layout.middle, bottom = layout.bottom, "band layout");
        Ok(layout)
    }

    /// Total rows.
    pub fn height(&self) -> u32 {
        self.top + self.middle + self.bottom
    }

    /// First row of the middle band.
    pub fn middle_start(&self) -> u32 {
        self.top
    }

    /// First row of the bottom band.
    pub fn bottom_start(&self) -> u32 {
        self.top + self.middle
    }
}

/// Checks a pair of band fractions independently of any image height.
///
/// # Errors
///
/// - [`OpsError::ParameterOutOfRange`] if a fraction is NaN or outside `[0, 1)`
/// - [`OpsError::InvalidDimensions`] if `top + bottom >= 1`
pub fn check_fractions(top: f32, bottom: f32) -> OpsResult<()> {
    check_fraction("top_percent", top)?;
    check_fraction("bottom_percent", bottom)?;
    if top + bottom >= 1.0 {
        return Err(OpsError::InvalidDimensions(format!(
            "top ({top}) + bottom ({bottom}) must be below 1"
        )));
    }
    Ok(())
}

fn check_fraction(name: &'static str, v: f32) -> OpsResult<()> {
    if !(0.0..1.0).contains(&v) {
        return Err(OpsError::out_of_range(name, v, "0 <= fraction < 1"));
    }
    Ok(())
}

/// Three independent bands cut from one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSet {
    /// Top band; may have zero rows.
    pub top: Image,
    /// Middle band.
    pub middle: Image,
    /// Bottom band; may have zero rows.
    pub bottom: Image,
}

/// Copies the three bands described by `layout` out of `image`.
///
/// The layout is trusted; [`BandLayout::compute`] is where it is checked.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if the layout height differs from
/// the image height.
pub fn split(image: &Image, layout: &BandLayout) -> OpsResult<BandSet> {
    if layout.height() != image.height() {
        return Err(OpsError::InvalidDimensions(format!(
            "band layout covers {} rows, image has {}",
            layout.height(),
            image.height()
        )));
    }
    Ok(BandSet {
        top: image.copy_rows(0, layout.top)?,
        middle: image.copy_rows(layout.middle_start(), layout.middle)?,
        bottom: image.copy_rows(layout.bottom_start(), layout.bottom)?,
    })
}

/// Stacks the bands top to bottom into one image.
///
/// # Errors
///
/// Returns [`OpsError::Core`] if the bands differ in width.
pub fn merge(bands: &BandSet) -> OpsResult<Image> {
    Ok(Image::stack_vertical(&[&bands.top, &bands.middle, &bands.bottom])?)
}
