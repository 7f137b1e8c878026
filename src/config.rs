//! Trim configuration module.
//!
//! Handles loading, validating, and merging `trimpng.toml`. Stock defaults
//! are overridden by the config file, and command-line flags override both.
//!
//! ## Config File Location
//!
//! `trimpng.toml` in the current directory, or any file passed with
//! `--config`. A missing default file is not an error; a missing explicit
//! file is.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! padding = 0               # Pixels added around the opaque box (any real number)
//! edge_mode = "exclusive"   # "exclusive" keeps the last opaque column/row,
//!                           # "legacy" drops it like older trims did
//! on_empty = "report"       # Fully transparent images: "report" an error,
//!                           # or "passthrough" with zero distances
//!
//! [scan]
//! recursive = false         # Expand directories recursively
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! max_pixels = 100000000    # Refuse larger images (omit for no limit)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{EdgeMode, EmptyPolicy, Padding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "trimpng.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Trim configuration loaded from `trimpng.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrimConfig {
    /// Margin added on every side of the opaque box.
    pub padding: Padding,
    /// How inclusive opaque extents map to crop edges.
    pub edge_mode: EdgeMode,
    /// Outcome for fully transparent images.
    pub on_empty: EmptyPolicy,
    /// Input resolution settings.
    pub scan: ScanConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl TrimConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        if self.processing.max_pixels == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_pixels must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Input resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Expand directories recursively instead of only their direct children.
    pub recursive: bool,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
    /// Largest image (width × height) that will be decoded.
    pub max_pixels: Option<u64>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(TrimConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<TrimConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: TrimConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<TrimConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// Returns a fully-commented stock `trimpng.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# trimpng configuration
# =====================
#
# Every key is optional. Values shown are the defaults.
# Command-line flags override anything set here.

# Pixels added around the opaque bounding box on every side, then clamped to
# the image. Any real number: fractions round to the nearest pixel, negative
# values shrink the box.
padding = 0

# How the last opaque column/row maps to the crop edge.
#   "exclusive"  keep the whole opaque region
#   "legacy"     drop the last opaque column and row, matching older trims
edge_mode = "exclusive"

# What to do with fully transparent images. The file is never modified.
#   "report"       report an error for the image
#   "passthrough"  report a full-canvas result with zero distances
on_empty = "report"

[scan]
# Expand directories recursively instead of only their direct children.
recursive = false

[processing]
# Maximum number of images processed in parallel.
# Omit for one worker per CPU core. Larger values are capped at the core count.
# max_processes = 4

# Refuse to decode images with more pixels than this (width * height).
# max_pixels = 100000000
"##
}
