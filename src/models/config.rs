use crate::error::AppError;
use mvq_core::Quantizer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file when `--config` is not given
pub const CONFIG_ENV: &str = "MVQ_CONFIG";

/// How the quantized image is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Truecolor PNG holding the remapped colors
    #[default]
    Rgb,
    /// Palette PNG (PLTE + per-pixel indices)
    Indexed,
}

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MvqConfig {
    /// Color budget for pruning (1..=256)
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    /// Output PNG layout
    #[serde(default)]
    pub output: OutputMode,

    /// Re-compress written PNGs with oxipng
    #[serde(default = "default_optimize")]
    pub optimize: bool,
}

fn default_max_colors() -> usize {
    256
}

fn default_optimize() -> bool {
    true
}

impl MvqConfig {
    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate configuration from a file the user named
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            max_colors = config.max_colors,
            output = ?config.output,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file is missing, unreadable or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=256).contains(&self.max_colors) {
            return Err(AppError::Config(format!(
                "max_colors must be between 1 and 256, got {}",
                self.max_colors
            )));
        }
        Ok(())
    }

    /// Build a quantizer with this configuration's color budget
    pub fn quantizer(&self) -> Result<Quantizer, AppError> {
        Ok(Quantizer::new().try_max_colors(self.max_colors)?)
    }
}

impl Default for MvqConfig {
    fn default() -> Self {
        Self {
            max_colors: default_max_colors(),
            output: OutputMode::default(),
            optimize: default_optimize(),
        }
    }
}
