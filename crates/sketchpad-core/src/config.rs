//! Editor configuration.

use crate::color::Color;
use crate::storage::DEFAULT_DRAWING_KEY;
use crate::tools::{DEFAULT_STROKE_WIDTH, ToolKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 900;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS_DIM: u32 = 8192;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Editor configuration.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Blank canvas color, also used by the eraser.
    pub background: Color,
    /// Storage key the drawing is saved under.
    pub storage_key: String,
    /// Tool selected at startup.
    pub tool: ToolKind,
    /// Stroke color at startup.
    pub color: Color,
    /// Stroke width at startup.
    pub stroke_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background: Color::WHITE,
            storage_key: DEFAULT_DRAWING_KEY.to_string(),
            tool: ToolKind::Pencil,
            color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} exceeds {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM}",
                self.width, self.height
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "stroke_width must be positive, got {}",
                self.stroke_width
            )));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}
