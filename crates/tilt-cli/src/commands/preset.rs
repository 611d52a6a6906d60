//! Preset command
//!
//! Prints the default settings as a YAML preset to edit and pass back with
//! `apply --config`.

use anyhow::Result;
use tilt_ops::TiltShiftConfig;

pub fn run() -> Result<()> {
    print!("{}", TiltShiftConfig::default().to_yaml_string()?);
    Ok(())
}
