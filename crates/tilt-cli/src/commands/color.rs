//! Color command
//!
//! HSB adjustment of the whole image.

use crate::ColorArgs;
use anyhow::Result;
use tilt_ops::{TiltShiftConfig, adjust_color};
use tracing::{info, trace};

pub fn run(args: ColorArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "color::run");

    let mut config = TiltShiftConfig::default();
    super::override_gains(&mut config, &args.gains);

    let image = super::load_image(&args.input)?;
    info!(
        saturation = config.saturation,
        hue = config.hue,
        luminance = config.luminance,
        "Adjusting color"
    );

    let output = adjust_color(&image, config.saturation, config.hue, config.luminance)?;
    let path = super::resolve_output(&args.input, &args.output)?;
    super::save_image(&path, &output, args.output.quality)?;

    if verbose > 0 {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
