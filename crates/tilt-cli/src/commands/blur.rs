//! Blur command
//!
//! Lens blur over the whole frame, no bands.

use crate::BlurArgs;
use anyhow::Result;
use tilt_ops::TiltShiftConfig;
use tilt_ops::lens_blur::lens_blur;
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "blur::run");

    let mut config = TiltShiftConfig::default();
    super::override_aperture(&mut config, &args.aperture);
    let aperture = config.aperture();

    let image = super::load_image(&args.input)?;
    info!(
        radius = aperture.radius,
        sides = aperture.sides,
        bloom = aperture.bloom,
        w = image.width(),
        h = image.height(),
        "Applying lens blur"
    );

    let output = lens_blur(&image, &aperture)?;
    let path = super::resolve_output(&args.input, &args.output)?;
    super::save_image(&path, &output, args.output.quality)?;

    if verbose > 0 {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
