//! Apply command
//!
//! Runs the whole tilt-shift pipeline. Settings come from the defaults, or
//! from a YAML preset, with individual flags layered on top.

use crate::ApplyArgs;
use anyhow::{Context, Result};
use tilt_ops::{TiltShiftConfig, process};
use tracing::{info, trace};

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "apply::run");

    let mut config = match &args.config {
        Some(path) => TiltShiftConfig::from_file(path)
            .with_context(|| format!("Failed to read preset: {}", path.display()))?,
        None => TiltShiftConfig::default(),
    };
    super::override_gains(&mut config, &args.gains);
    super::override_aperture(&mut config, &args.aperture);
    if let Some(top) = args.top {
        config.top_percent = top;
    }
    if let Some(bottom) = args.bottom {
        config.bottom_percent = bottom;
    }
    config.color_adjust &= !args.no_color;
    config.blur &= !args.no_blur;

    let image = super::load_image(&args.input)?;
    info!(
        w = image.width(),
        h = image.height(),
        radius = config.radius,
        top = config.top_percent,
        bottom = config.bottom_percent,
        "Applying tilt-shift"
    );

    let output = process(Some(&image), &config)?;
    let path = super::resolve_output(&args.input, &args.output)?;
    super::save_image(&path, &output, args.output.quality)?;

    if verbose > 0 {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
