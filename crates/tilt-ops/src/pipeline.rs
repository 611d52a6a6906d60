//! The tilt-shift pipeline and its entry points.
//!
//! ```text
//! image -> [HSB adjust] -> split(top, middle, bottom)
//!                              |       |        |
//!                           blur    as is     blur
//!                              |       |        |
//!                              +---- merge -----+-> image
//! ```
//!
//! Every check runs before any pixel work, so a call either returns a
//! complete image or an error.

use crate::aperture::Aperture;
use crate::bands::{BandLayout, merge, split};
use crate::color::{HsbGains, adjust_hsb};
use crate::config::TiltShiftConfig;
use crate::lens_blur::lens_blur;
use crate::{OpsError, OpsResult};
use tilt_core::Image;
use tracing::{debug, trace};

fn require_pixels(image: &Image) -> OpsResult<()> {
    if image.is_empty() {
        return Err(OpsError::empty_image(image.width(), image.height()));
    }
    Ok(())
}

/// Runs the stages enabled in `config` over `image`.
///
/// # Errors
///
/// - [`OpsError::MissingSource`] if `image` is `None`
/// - [`OpsError::InvalidDimensions`] for an empty image or degenerate bands
/// - [`OpsError::ParameterOutOfRange`] for any bad config field
///
/// ```rust
/// use tilt_ops::{process, OpsError, TiltShiftConfig};
///
/// let err = process(None, &TiltShiftConfig::default()).unwrap_err();
/// assert!(matches!(err, OpsError::MissingSource));
/// ```
pub fn process(image: Option<&Image>, config: &TiltShiftConfig) -> OpsResult<Image> {
    let image = image.ok_or(OpsError::MissingSource)?;
    trace!(
        width = image.width(),
        height = image.height(),
        color_adjust = config.color_adjust,
        blur = config.blur,
        "process"
    );
    require_pixels(image)?;
    config.validate()?;

    let adjusted = if config.color_adjust {
        adjust_hsb(image, &config.gains())
    } else {
        image.clone()
    };
    if !config.blur {
        return Ok(adjusted);
    }
    blur_bands(
        &adjusted,
        &config.aperture(),
        config.top_percent,
        config.bottom_percent,
    )
}

/// Splits `image` into bands, blurs the outer two and merges them back.
///
/// Zero-row bands are passed through untouched.
///
/// # Errors
///
/// As [`BandLayout::compute`] and [`lens_blur`].
pub fn blur_bands(image: &Image, aperture: &Aperture, top: f32, bottom: f32) -> OpsResult<Image> {
    require_pixels(image)?;
    aperture.validate()?;
    let layout = BandLayout::compute(image.height(), top, bottom)?;
    let mut bands = split(image, &layout)?;

    for (name, band) in [("top", &mut bands.top), ("bottom", &mut bands.bottom)] {
        if band.is_empty() {
            debug!(band = name, "empty band, skipping blur");
            continue;
        }
        *band = lens_blur(band, aperture)?;
    }
    merge(&bands)
}

/// HSB adjustment of a whole image.
///
/// # Errors
///
/// - [`OpsError::InvalidDimensions`] for an empty image
/// - [`OpsError::ParameterOutOfRange`] for a non-finite gain
pub fn adjust_color(image: &Image, saturation: f32, hue: f32, luminance: f32) -> OpsResult<Image> {
    require_pixels(image)?;
    let gains = HsbGains {
        saturation,
        hue,
        luminance,
    };
    for (name, v) in [("saturation", saturation), ("hue", hue), ("luminance", luminance)] {
        if !v.is_finite() {
            return Err(OpsError::out_of_range(name, v, "finite gain"));
        }
    }
    Ok(adjust_hsb(image, &gains))
}

/// Band blur of a whole image with an explicit aperture.
///
/// `aperture_angle` is in radians.
///
/// # Errors
///
/// As [`blur_bands`].
#[allow(clippy::too_many_arguments)]
pub fn apply_tilt_shift(
    image: &Image,
    radius: f32,
    top_percent: f32,
    bottom_percent: f32,
    bloom: f32,
    bloom_threshold: f32,
    aperture_sides: u32,
    aperture_angle: f32,
) -> OpsResult<Image> {
    let aperture = Aperture {
        radius,
        bloom,
        bloom_threshold,
        sides: aperture_sides,
        angle: aperture_angle,
    };
    blur_bands(image, &aperture, top_percent, bottom_percent)
}
