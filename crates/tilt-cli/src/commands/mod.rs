//! CLI command implementations

pub mod apply;
pub mod blur;
pub mod color;
pub mod preset;

use crate::{ApertureArgs, GainArgs, OutputArgs};
use anyhow::{Context, Result, bail};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tilt_core::Image;
use tilt_core::pixel::{pack_argb, unpack_argb};
use tilt_ops::TiltShiftConfig;
use tracing::debug;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    let rgba = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgba8();
    Ok(from_rgba(&rgba))
}

/// Save image to path. JPEG output uses `quality`; other formats follow
/// the extension with their defaults.
pub fn save_image(path: &Path, image: &Image, quality: u8) -> Result<()> {
    let rgba = to_rgba(image);
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Unknown output format: {}", path.display()))?;
    debug!(path = %path.display(), ?format, quality, "saving");

    if format == ImageFormat::Jpeg {
        let file = File::create(path)
            .with_context(|| format!("Failed to create: {}", path.display()))?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
        // JPEG has no alpha channel.
        image::DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .write_with_encoder(encoder)
            .with_context(|| format!("Failed to save: {}", path.display()))
    } else {
        rgba.save_with_format(path, format)
            .with_context(|| format!("Failed to save: {}", path.display()))
    }
}

fn from_rgba(buf: &RgbaImage) -> Image {
    Image::from_fn(buf.width(), buf.height(), |x, y| {
        let [r, g, b, a] = buf.get_pixel(x, y).0;
        pack_argb(a, r, g, b)
    })
}

fn to_rgba(image: &Image) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [a, r, g, b] = unpack_argb(image.pixel(x, y));
        image::Rgba([r, g, b, a])
    })
}

/// First free path among `name.ext`, `name (1).ext`, `name (2).ext`, ...
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    (1u32..)
        .map(|n| {
            let name = match &ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Picks the file a command writes to.
///
/// An explicit file is used as given. A directory, or `--in-place-dir`,
/// gets the source file name made unique within it.
pub fn resolve_output(input: &Path, args: &OutputArgs) -> Result<PathBuf> {
    let Some(name) = input.file_name() else {
        bail!("Input has no file name: {}", input.display());
    };
    match &args.target.output {
        Some(dir) if dir.is_dir() => Ok(unique_path(&dir.join(name))),
        Some(file) => Ok(file.clone()),
        None => Ok(unique_path(input)),
    }
}

/// Applies the gain flags that were given on top of `config`.
pub fn override_gains(config: &mut TiltShiftConfig, gains: &GainArgs) {
    if let Some(v) = gains.saturation {
        config.saturation = v;
    }
    if let Some(v) = gains.hue {
        config.hue = v;
    }
    if let Some(v) = gains.luminance {
        config.luminance = v;
    }
}

/// Applies the aperture flags that were given on top of `config`.
/// The angle flag is in degrees.
pub fn override_aperture(config: &mut TiltShiftConfig, aperture: &ApertureArgs) {
    if let Some(v) = aperture.radius {
        config.radius = v;
    }
    if let Some(v) = aperture.bloom {
        config.bloom = v;
    }
    if let Some(v) = aperture.threshold {
        config.bloom_threshold = v;
    }
    if let Some(v) = aperture.sides {
        config.aperture_sides = v;
    }
    if let Some(v) = aperture.angle {
        config.aperture_angle = v.to_radians();
    }
}
