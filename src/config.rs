//! Configuration file support
//!
//! Settings load from `./paperdeck.toml` or the user config directory
//! and merge with command-line arguments, CLI taking precedence. Every
//! field has a default, so a missing or partial file is fine.

use crate::detect::{LINE_BREAK_THRESHOLD, MAX_CAPTION_LEN, SAME_ROW_TOLERANCE};
use crate::render::DEFAULT_SCALE;
use crate::slide::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched in the working directory
const LOCAL_CONFIG: &str = "paperdeck.toml";

/// Config file path under the user config directory
const USER_CONFIG: &str = "paperdeck/config.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Caption detection tunables
    #[serde(default)]
    pub detect: DetectConfig,

    /// Page rendering settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Slide composition settings
    #[serde(default)]
    pub slide: SlideConfig,
}

/// Detection tunables. The tolerances are heuristics calibrated for
/// typical two-column academic layouts; unusual layouts may need
/// different values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Vertical tolerance for sorting fragments as one row
    #[serde(default = "default_row_tolerance")]
    pub same_row_tolerance: f64,

    /// Vertical drop that starts a new text line
    #[serde(default = "default_line_break")]
    pub line_break_threshold: f64,

    /// Caption length cap in characters
    #[serde(default = "default_caption_len")]
    pub max_caption_len: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            same_row_tolerance: SAME_ROW_TOLERANCE,
            line_break_threshold: LINE_BREAK_THRESHOLD,
            max_caption_len: MAX_CAPTION_LEN,
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Render scale factor relative to 72 DPI
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

/// Slide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideConfig {
    /// Output width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// TTF font file for slide text
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font: None,
        }
    }
}

fn default_row_tolerance() -> f64 {
    SAME_ROW_TOLERANCE
}

fn default_line_break() -> f64 {
    LINE_BREAK_THRESHOLD
}

fn default_caption_len() -> usize {
    MAX_CAPTION_LEN
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Config {
    /// Load from the default locations: `./paperdeck.toml`, then the
    /// user config directory. Returns defaults when neither exists.
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::load_from_path(&local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join(USER_CONFIG);
            if user.exists() {
                return Self::load_from_path(&user);
            }
        }
        Ok(Self::default())
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Merge with CLI arguments. CLI values win only when explicitly
    /// set, so the config file can provide defaults without clap's
    /// defaults clobbering them.
    pub fn merge_with_cli(mut self, overrides: &CliOverrides) -> Self {
        if let Some(scale) = overrides.scale {
            self.render.scale = scale;
        }
        if let Some(width) = overrides.width {
            self.slide.width = width;
        }
        if let Some(height) = overrides.height {
            self.slide.height = height;
        }
        if let Some(font) = &overrides.font {
            self.slide.font = Some(font.clone());
        }
        self
    }
}

/// Explicitly-set CLI values that override the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scale: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font: Option<PathBuf>,
}

impl CliOverrides {
    /// Create an empty set of overrides
    pub fn new() -> Self {
        Self::default()
    }
}
