//! Single regenerate pass.

use glam::Vec2;
use web_time::Instant;

use crate::adaptive::AdaptiveQuadTree;
use crate::config::{FieldSource, GeneratorConfig};
use crate::error::Result;
use crate::marching_squares::{self, MarchStats};
use crate::mesh_data::{Mesh, MeshData};
use crate::packed::PackedQuadTree;
use crate::types::Grid;

/// Per-stage wall time of one pass, in microseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationTiming {
  pub mask_us: u64,
  pub tree_us: u64,
  pub march_us: u64,
  pub finalize_us: u64,
  pub total_us: u64,
}

/// Everything one pass produced.
#[derive(Debug, Clone)]
pub struct Generated {
  pub mask: Grid<i32>,
  /// Present when the config has a `[packed]` section.
  pub packed: Option<PackedQuadTree>,
  pub tree: AdaptiveQuadTree,
  /// Marching-squares contour mesh.
  pub mesh: Mesh,
  pub march_stats: MarchStats,
  /// Coarse leaf quads in lattice units, when `leaf_quads` is set.
  pub quad_mesh: Option<Mesh>,
  pub timing: GenerationTiming,
}

/// Adaptive tree side for a grid: the smallest power of two covering both
/// dimensions.
pub fn tree_side(width: u32, height: u32) -> u32 {
  width.max(height).max(1).next_power_of_two()
}

/// Build the mask, trees and meshes for one sample grid.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::regenerate"))]
pub fn regenerate(grid: &Grid<f32>, config: &GeneratorConfig) -> Result<Generated> {
  config.validate()?;
  let start = Instant::now();
  let mut timing = GenerationTiming::default();

  // Stage 1: Mask
  let stage = Instant::now();
  let mut mask = grid.to_mask(config.mask_threshold);
  if config.mask_clear_border {
    mask.fill_border(0);
  }
  timing.mask_us = stage.elapsed().as_micros() as u64;

  // Stage 2: Trees
  let stage = Instant::now();
  let packed = match &config.packed {
    Some(section) => {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("packed_tree").entered();

      let mut packed = PackedQuadTree::new(Vec2::ZERO, mask.width() as f32, section.height)?;
      packed.insert_values_from_map(&mask)?;
      Some(packed)
    }
    None => None,
  };
  let side = tree_side(mask.width(), mask.height());
  let tree = AdaptiveQuadTree::new(mask.occupied_cells(), &config.adaptive_config(side as f32))?;
  timing.tree_us = stage.elapsed().as_micros() as u64;

  // Stage 3: Extraction
  let stage = Instant::now();
  let march_config = config.marching_squares_config();
  let mut contour = MeshData::new();
  let march_stats = match config.marching_squares.source {
    FieldSource::Samples => marching_squares::march(grid, &march_config, &mut contour)?,
    FieldSource::Mask => marching_squares::march(&mask, &march_config, &mut contour)?,
    FieldSource::Adaptive => marching_squares::march(&tree, &march_config, &mut contour)?,
    FieldSource::Disabled => MarchStats::default(),
  };
  let quads = config.adaptive.leaf_quads.map(|selection| {
    let mut quads = MeshData::new();
    tree.emit_leaf_quads(selection, &mut quads);
    quads
  });
  timing.march_us = stage.elapsed().as_micros() as u64;

  // Stage 4: Finalize
  let stage = Instant::now();
  let mesh = contour.finalize();
  let quad_mesh = quads.map(MeshData::finalize);
  timing.finalize_us = stage.elapsed().as_micros() as u64;

  timing.total_us = start.elapsed().as_micros() as u64;

  #[cfg(feature = "tracing")]
  tracing::debug!(
    width = grid.width(),
    height = grid.height(),
    triangles = mesh.triangle_count(),
    dropped_cells = tree.dropped_cells(),
    total_us = timing.total_us,
    "regenerate complete"
  );

  Ok(Generated {
    mask,
    packed,
    tree,
    mesh,
    march_stats,
    quad_mesh,
    timing,
  })
}

#[cfg(test)]
#[path = "process_test.rs"]
mod process_test;
