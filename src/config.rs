//! Mosaic configuration.
//!
//! Handles loading, validating, and merging `mosaic.toml`. Stock defaults are
//! overridden by a `mosaic.toml` placed in the source photo directory, which
//! in turn is overridden by command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width_cm = 60.0           # Printed width
//! height_cm = 90.0          # Printed height
//! dpi = 300.0               # Print resolution
//! background = [255, 255, 255]
//!
//! [output]
//! quality = 90              # JPEG quality (1-100)
//!
//! [layout]
//! # seed = 42               # Fixed shuffle seed (omit for a new order each run)
//! skip_unreadable = false   # Skip images that fail to decode instead of aborting
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the source directory.
pub const CONFIG_FILE_NAME: &str = "mosaic.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Mosaic configuration loaded from `mosaic.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MosaicConfig {
    /// Physical size, resolution and fill colour of the output.
    pub canvas: CanvasConfig,
    /// Encoding settings for the output file.
    pub output: OutputConfig,
    /// Ordering and error-tolerance settings for the layout pass.
    pub layout: LayoutConfig,
}

impl MosaicConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("canvas.width_cm", self.canvas.width_cm),
            ("canvas.height_cm", self.canvas.height_cm),
            ("canvas.dpi", self.canvas.dpi),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a positive number, got {value}"
                )));
            }
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }
}

/// Canvas geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width_cm: f64,
    pub height_cm: f64,
    pub dpi: f64,
    /// RGB fill for space no image covers.
    pub background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width_cm: 60.0,
            height_cm: 90.0,
            dpi: 300.0,
            background: [255, 255, 255],
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Layout pass behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Shuffle seed. When absent, every run uses a fresh random order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Skip images that fail to decode instead of aborting the run.
    pub skip_unreadable: bool,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MosaicConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `mosaic.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `mosaic.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config for a source directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<MosaicConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: MosaicConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `mosaic.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Mosaic Configuration
# ==========================
# Place this file as `mosaic.toml` in the photo directory.
# All settings are optional. Values shown below are the defaults.
# Command-line flags override anything set here.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# Printed size in centimetres. Pixel size is round(cm / 2.54 * dpi).
width_cm = 60.0
height_cm = 90.0

# Print resolution in dots per inch.
dpi = 300.0

# Fill colour for space not covered by photos, as [r, g, b].
background = [255, 255, 255]

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Fixed shuffle seed for a reproducible arrangement.
# Omit to get a different arrangement on every run.
# seed = 42

# Skip photos that cannot be decoded instead of aborting the whole run.
skip_unreadable = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = MosaicConfig::default();
        assert_eq!(config.canvas.width_cm, 60.0);
        assert_eq!(config.canvas.height_cm, 90.0);
        assert_eq!(config.canvas.dpi, 300.0);
        assert_eq!(config.canvas.background, [255, 255, 255]);
        assert_eq!(config.output.quality, 90);
        assert_eq!(config.layout.seed, None);
        assert!(!config.layout.skip_unreadable);
    }

    #[test]
    fn parse_partial_config() {
        let config: MosaicConfig = toml::from_str(
            r#"
[canvas]
dpi = 150.0
"#,
        )
        .unwrap();
        assert_eq!(config.canvas.dpi, 150.0);
        assert_eq!(config.canvas.width_cm, 60.0);
        assert_eq!(config.output.quality, 90);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<MosaicConfig, _> = toml::from_str(
            r#"
[canvas]
widht_cm = 30.0
"#,
        );
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), MosaicConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[canvas]
width_cm = 30.0
background = [0, 0, 0]

[layout]
seed = 1234
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.canvas.width_cm, 30.0);
        assert_eq!(config.canvas.background, [0, 0, 0]);
        assert_eq!(config.layout.seed, Some(1234));
        // Unspecified values keep their defaults
        assert_eq!(config.canvas.height_cm, 90.0);
        assert_eq!(config.output.quality, 90);
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[canvas\nwidth_cm = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[canvas]\nheight_cm = -5.0\n",
        )
        .unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("canvas.height_cm"));
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(MosaicConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_dpi() {
        let mut config = MosaicConfig::default();
        config.canvas.dpi = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_width() {
        let mut config = MosaicConfig::default();
        config.canvas.width_cm = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_quality_bounds() {
        let mut config = MosaicConfig::default();
        config.output.quality = 100;
        assert!(config.validate().is_ok());
        config.output.quality = 0;
        assert!(config.validate().is_err());
        config.output.quality = 101;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // merge / stock config
    // =========================================================================

    #[test]
    fn merge_toml_overlays_nested_keys() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[output]\nquality = 70\n").unwrap();
        let merged: MosaicConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(merged.output.quality, 70);
        assert_eq!(merged.canvas, CanvasConfig::default());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: MosaicConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, MosaicConfig::default());
    }
}
