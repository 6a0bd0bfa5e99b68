//! Configuration types for a complete run: image loading, evolution and output.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{EvolutionConfig, EvolutionConfigError};

/// Default grid edge length (the target is resized to `20x20`).
fn default_grid() -> usize {
    20
}

/// Default gray level above which a pixel becomes a 1 bit.
fn default_threshold() -> u8 {
    128
}

fn default_render_interval() -> usize {
    10
}

/// Top-level run configuration, as read by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Target image settings.
    #[serde(default)]
    pub image: ImageConfig,
    /// Genetic algorithm parameters.
    #[serde(default)]
    pub evolution: EvolutionConfig,
    /// Draw the best chromosome every this many generations. 0 disables drawing.
    #[serde(default = "default_render_interval")]
    pub render_interval: usize,
    /// Where to write the JSON result, if anywhere.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Where to write the best chromosome as a PBM image, if anywhere.
    #[serde(default)]
    pub evolved_image: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            evolution: EvolutionConfig::default(),
            render_interval: default_render_interval(),
            output: None,
            evolved_image: None,
        }
    }
}

/// How the target image is loaded and binarised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Path to the target image (PNG, JPEG, Netpbm, ...). May be supplied on the command line instead.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Width of the resized grid in cells.
    #[serde(default = "default_grid")]
    pub width: usize,
    /// Height of the resized grid in cells.
    #[serde(default = "default_grid")]
    pub height: usize,
    /// Pixels strictly brighter than this become 1.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            path: None,
            width: default_grid(),
            height: default_grid(),
            threshold: default_threshold(),
        }
    }
}

impl ImageConfig {
    /// Number of bits the resized target holds.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.width * self.height
    }
}

impl RunConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image.width == 0 || self.image.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        self.evolution.validate_for_target(self.image.bit_count())?;
        Ok(())
    }
}

/// Run configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Evolution config validation failed: {0}")]
    Evolution(#[from] EvolutionConfigError),
}
