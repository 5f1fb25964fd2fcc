//! TOML configuration for a full regenerate pass.
//!
//! ```toml
//! mask_threshold = 0.5
//!
//! [packed]
//! height = 4
//!
//! [adaptive]
//! max_depth = 6
//! full_quad_policy = "stop"
//! leaf_quads = "empty"
//!
//! [marching_squares]
//! source = "samples"
//! threshold = 0.5
//! interpolate_power = 1.0
//! cell_size = 1.0
//! origin = [0.0, 0.0]
//! close_border = true
//! ```
//!
//! Every field is optional; missing ones take the defaults below.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::adaptive::{AdaptiveTreeConfig, FullQuadPolicy, LeafSelection};
use crate::constants::{MAX_ADAPTIVE_DEPTH, MAX_PACKED_HEIGHT};
use crate::error::MaskMeshError;
use crate::marching_squares::MarchingSquaresConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config TOML")]
  Parse(#[from] toml::de::Error),

  #[error("invalid config: {0}")]
  Invalid(#[from] MaskMeshError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Root configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
  /// Samples strictly above this become mask cells.
  pub mask_threshold: f32,
  /// Force the outermost ring of mask cells to 0 so every shape is closed.
  pub mask_clear_border: bool,
  /// Packed sum tree over the mask; omitted = not built.
  pub packed: Option<PackedSection>,
  pub adaptive: AdaptiveSection,
  pub marching_squares: MarchingSection,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      mask_threshold: 0.5,
      mask_clear_border: false,
      packed: None,
      adaptive: AdaptiveSection::default(),
      marching_squares: MarchingSection::default(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackedSection {
  /// Tree height (levels, root included).
  pub height: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptiveSection {
  /// Deepest split; defaults to reaching unit cells.
  pub max_depth: Option<u32>,
  pub max_cells_per_quad: Option<usize>,
  pub full_quad_policy: FullQuadPolicy,
  /// Emit coarse quads for these leaves; omitted = no quads.
  pub leaf_quads: Option<LeafSelection>,
}

/// Field the extractor walks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
  /// Raw float samples (smooth contours).
  #[default]
  Samples,
  /// Thresholded 0/1 mask.
  Mask,
  /// Adaptive tree occupancy.
  Adaptive,
  /// No extraction.
  Disabled,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarchingSection {
  pub source: FieldSource,
  pub threshold: f32,
  pub interpolate_power: f32,
  pub cell_size: f32,
  pub origin: [f32; 2],
  pub close_border: bool,
}

impl Default for MarchingSection {
  fn default() -> Self {
    let defaults = MarchingSquaresConfig::default();
    Self {
      source: FieldSource::default(),
      threshold: defaults.threshold,
      interpolate_power: defaults.interpolate_power,
      cell_size: defaults.cell_size,
      origin: defaults.origin.to_array(),
      close_border: defaults.close_border,
    }
  }
}

// =============================================================================
// Loading
// =============================================================================

impl GeneratorConfig {
  /// Load and validate a TOML file.
  pub fn load(path: &Path) -> ConfigResult<Self> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content)
  }

  /// Parse and validate TOML text.
  pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
    let config: GeneratorConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), MaskMeshError> {
    if !(0.0..=1.0).contains(&self.mask_threshold) {
      return Err(MaskMeshError::ParameterOutOfRange {
        name: "mask_threshold",
        value: self.mask_threshold,
      });
    }
    if let Some(packed) = &self.packed {
      if packed.height == 0 {
        return Err(MaskMeshError::ZeroHeight);
      }
      if packed.height > MAX_PACKED_HEIGHT {
        return Err(MaskMeshError::HeightTooLarge {
          height: packed.height,
          max: MAX_PACKED_HEIGHT,
        });
      }
    }
    if let Some(depth) = self.adaptive.max_depth {
      if depth > MAX_ADAPTIVE_DEPTH {
        return Err(MaskMeshError::DepthTooLarge {
          depth,
          max: MAX_ADAPTIVE_DEPTH,
        });
      }
    }
    self.marching_squares_config().validate()
  }

  /// Adaptive tree parameters for a root of side `size`.
  pub fn adaptive_config(&self, size: f32) -> AdaptiveTreeConfig {
    let mut config = AdaptiveTreeConfig::new(size).with_full_quad_policy(self.adaptive.full_quad_policy);
    if let Some(depth) = self.adaptive.max_depth {
      config = config.with_max_depth(depth);
    }
    if let Some(max_cells) = self.adaptive.max_cells_per_quad {
      config = config.with_max_cells_per_quad(max_cells);
    }
    config
  }

  pub fn marching_squares_config(&self) -> MarchingSquaresConfig {
    let section = &self.marching_squares;
    MarchingSquaresConfig::new()
      .with_threshold(section.threshold)
      .with_interpolate_power(section.interpolate_power)
      .with_cell_size(section.cell_size)
      .with_origin(Vec2::from_array(section.origin))
      .with_close_border(section.close_border)
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
