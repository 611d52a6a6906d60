//! Pipeline configuration and YAML presets.
//!
//! [`TiltShiftConfig`] carries every knob of one pipeline run. It is a plain
//! value: build it, validate it, hand it to [`process`](crate::pipeline::process).
//!
//! # Example
//!
//! ```rust
//! use tilt_ops::TiltShiftConfig;
//!
//! let config = TiltShiftConfig::from_yaml_str("radius: 20\ncolor_adjust: false\n").unwrap();
//! assert_eq!(config.radius, 20.0);
//! assert!(!config.color_adjust);
//! // Unset fields keep their defaults.
//! assert_eq!(config.aperture_sides, 5);
//! ```

use crate::aperture::Aperture;
use crate::bands::check_fractions;
use crate::color::HsbGains;
use crate::{OpsError, OpsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Smallest middle band, as a fraction of the height, kept by the slider
/// helpers.
pub const BAND_MARGIN: f32 = 0.01;

/// Everything one tilt-shift run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltShiftConfig {
    /// Run the HSB adjustment over the whole image first.
    pub color_adjust: bool,
    /// Blur the top and bottom bands.
    pub blur: bool,
    /// Saturation gain.
    pub saturation: f32,
    /// Hue gain.
    pub hue: f32,
    /// Brightness gain.
    pub luminance: f32,
    /// Blur radius in pixels.
    pub radius: f32,
    /// Fraction of the height blurred at the top.
    pub top_percent: f32,
    /// Fraction of the height blurred at the bottom.
    pub bottom_percent: f32,
    /// Highlight gain applied before blurring.
    pub bloom: f32,
    /// Level above which bloom applies.
    pub bloom_threshold: f32,
    /// Aperture side count, 0 for a disc.
    pub aperture_sides: u32,
    /// Aperture rotation in radians.
    pub aperture_angle: f32,
}

impl Default for TiltShiftConfig {
    fn default() -> Self {
        let aperture = Aperture::default();
        Self {
            color_adjust: true,
            blur: true,
            saturation: 0.8,
            hue: 0.0,
            luminance: 0.0,
            radius: aperture.radius,
            top_percent: 0.3,
            bottom_percent: 0.3,
            bloom: aperture.bloom,
            bloom_threshold: aperture.bloom_threshold,
            aperture_sides: aperture.sides,
            aperture_angle: aperture.angle,
        }
    }
}

impl TiltShiftConfig {
    /// Parses a YAML preset and validates it. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Config`] on malformed YAML, or the validation
    /// error of the first bad field.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML preset from disk.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::Io`] if the file cannot be read, otherwise as
    /// [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading preset");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serializes to a YAML preset.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The color stage parameters.
    pub fn gains(&self) -> HsbGains {
        HsbGains {
            saturation: self.saturation,
            hue: self.hue,
            luminance: self.luminance,
        }
    }

    /// The blur stage parameters.
    pub fn aperture(&self) -> Aperture {
        Aperture {
            radius: self.radius,
            bloom: self.bloom,
            bloom_threshold: self.bloom_threshold,
            sides: self.aperture_sides,
            angle: self.aperture_angle,
        }
    }

    /// Checks every field, stages enabled or not.
    ///
    /// # Errors
    ///
    /// [`OpsError::ParameterOutOfRange`] or [`OpsError::InvalidDimensions`]
    /// for the first bad field.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, v) in [
            ("saturation", self.saturation),
            ("hue", self.hue),
            ("luminance", self.luminance),
        ] {
            if !v.is_finite() {
                return Err(OpsError::out_of_range(name, v, "finite gain"));
            }
        }
        self.aperture().validate()?;
        check_fractions(self.top_percent, self.bottom_percent)
    }

    /// Moves the top edge, keeping at least [`BAND_MARGIN`] of middle band.
    ///
    /// Returns the value actually stored.
    ///
    /// ```rust
    /// use tilt_ops::TiltShiftConfig;
    ///
    /// let mut config = TiltShiftConfig::default();
    /// let top = config.set_top_percent(0.9);
    /// assert!((top - 0.69).abs() < 1e-6);
    /// ```
    pub fn set_top_percent(&mut self, value: f32) -> f32 {
        self.top_percent = fit_fraction(value, self.bottom_percent, self.top_percent);
        self.top_percent
    }

    /// Moves the bottom edge, keeping at least [`BAND_MARGIN`] of middle band.
    ///
    /// Returns the value actually stored.
    pub fn set_bottom_percent(&mut self, value: f32) -> f32 {
        self.bottom_percent = fit_fraction(value, self.top_percent, self.bottom_percent);
        self.bottom_percent
    }
}

fn fit_fraction(value: f32, other: f32, current: f32) -> f32 {
    if value.is_nan() {
        return current;
    }
    let max = (1.0 - other - BAND_MARGIN).max(0.0);
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRESET: &str = r#"
color_adjust: false
blur: true
saturation: -0.5
radius: 24.5
top_percent: 0.2
bottom_percent: 0.4
bloom: 1.5
bloom_threshold: 220
aperture_sides: 0
aperture_angle: 0.3
"#;

    #[test]
    fn test_defaults_match_initial_state() {
        let c = TiltShiftConfig::default();
        assert!(c.color_adjust && c.blur);
        assert_eq!((c.saturation, c.hue, c.luminance), (0.8, 0.0, 0.0));
        assert_eq!(c.radius, 10.0);
        assert_eq!((c.top_percent, c.bottom_percent), (0.3, 0.3));
        assert_eq!((c.bloom, c.bloom_threshold), (2.0, 192.0));
        assert_eq!((c.aperture_sides, c.aperture_angle), (5, 0.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_parse_preset() {
        let c = TiltShiftConfig::from_yaml_str(PRESET).unwrap();
        assert!(!c.color_adjust);
        assert_eq!(c.saturation, -0.5);
        assert_eq!(c.radius, 24.5);
        assert_eq!(c.bloom_threshold, 220.0);
        assert_eq!(c.aperture().sides, 0);
        assert_eq!(c.gains().saturation, -0.5);
        // Not in the preset.
        assert_eq!(c.hue, 0.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let c = TiltShiftConfig::from_yaml_str(PRESET).unwrap();
        let yaml = c.to_yaml_string().unwrap();
        assert_eq!(TiltShiftConfig::from_yaml_str(&yaml).unwrap(), c);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(
            TiltShiftConfig::from_yaml_str("radius: [1, 2]"),
            Err(OpsError::Config(_))
        ));
        assert!(matches!(
            TiltShiftConfig::from_yaml_str("top_percent: 0.6\nbottom_percent: 0.5"),
            Err(OpsError::InvalidDimensions(_))
        ));
        assert!(matches!(
            TiltShiftConfig::from_yaml_str("bloom_threshold: 300"),
            Err(OpsError::ParameterOutOfRange { name: "bloom_threshold", .. })
        ));
        assert!(matches!(
            TiltShiftConfig::from_yaml_str("radius: -2"),
            Err(OpsError::ParameterOutOfRange { name: "radius", .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PRESET.as_bytes()).unwrap();
        let c = TiltShiftConfig::from_file(file.path()).unwrap();
        assert_eq!(c.radius, 24.5);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            TiltShiftConfig::from_file(missing),
            Err(OpsError::Io(_))
        ));
    }

    #[test]
    fn test_slider_helpers_keep_margin() {
        let mut c = TiltShiftConfig::default();
        c.set_bottom_percent(0.95);
        assert!(c.top_percent + c.bottom_percent <= 1.0 - BAND_MARGIN + 1e-6);
        assert!(c.validate().is_ok());
        assert_eq!(c.set_top_percent(-1.0), 0.0);
        assert_eq!(c.set_top_percent(f32::NAN), 0.0);
        assert_eq!(c.set_top_percent(0.1), 0.1);
    }
}
