//! Marching-squares extraction of a thresholded scalar field into triangles.
//!
//! # Algorithm Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          MARCHING SQUARES                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  for each 2×2 window (x, y):                                            │
//! │                                                                         │
//! │   1. corners  = weights at (x,y) (x+1,y) (x+1,y+1) (x,y+1)              │
//! │                 (outside the field = 0)                                 │
//! │   2. case     = bit i set when corner i > threshold                     │
//! │   3. edges    = t = (threshold - v0) / (v1 - v0), midpoint if v0 == v1  │
//! │                 t' = 0.5 + (t - 0.5) * interpolate_power                │
//! │   4. triangles from TRIANGLES[case]                                     │
//! │   5. emit     = position origin + (x + lx, y + ly) * cell_size          │
//! │                 uv       (x + lx, y + ly) / (width - 1, height - 1)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `close_border` the window range grows by one on every side, so
//! shapes touching the field edge are closed against the zero-weight
//! outside.
//!
//! # Module Structure
//!
//! - [`case_table`]: compile-time edge masks and per-case triangles
//! - [`tile_index`]: window sampling and case classification
//! - [`interpolate`]: edge crossing fraction and midpoint blend
//! - [`field`]: the [`ScalarField`] trait and its implementations

pub mod case_table;
pub mod field;
pub mod interpolate;
pub mod tile_index;

pub use field::ScalarField;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::error::{MaskMeshError, Result};
use crate::mesh_data::MeshData;

// =============================================================================
// Configuration
// =============================================================================

/// Extraction parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MarchingSquaresConfig {
  /// Corners strictly above this are inside. Range [0, 1].
  pub threshold: f32,
  /// 1 = linear edge interpolation, 0 = edge midpoints. Range [0, 1].
  pub interpolate_power: f32,
  /// World size of one lattice step.
  pub cell_size: f32,
  /// World position of lattice point (0, 0).
  pub origin: Vec2,
  /// Extend the window range past the field edge to close shapes.
  pub close_border: bool,
}

impl Default for MarchingSquaresConfig {
  fn default() -> Self {
    Self {
      threshold: 0.5,
      interpolate_power: 1.0,
      cell_size: 1.0,
      origin: Vec2::ZERO,
      close_border: false,
    }
  }
}

impl MarchingSquaresConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_threshold(mut self, threshold: f32) -> Self {
    self.threshold = threshold;
    self
  }

  pub fn with_interpolate_power(mut self, power: f32) -> Self {
    self.interpolate_power = power;
    self
  }

  pub fn with_cell_size(mut self, cell_size: f32) -> Self {
    self.cell_size = cell_size;
    self
  }

  pub fn with_origin(mut self, origin: Vec2) -> Self {
    self.origin = origin;
    self
  }

  pub fn with_close_border(mut self, close_border: bool) -> Self {
    self.close_border = close_border;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if !(0.0..=1.0).contains(&self.threshold) {
      return Err(MaskMeshError::ParameterOutOfRange {
        name: "threshold",
        value: self.threshold,
      });
    }
    if !(0.0..=1.0).contains(&self.interpolate_power) {
      return Err(MaskMeshError::ParameterOutOfRange {
        name: "interpolate_power",
        value: self.interpolate_power,
      });
    }
    if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
      return Err(MaskMeshError::ParameterOutOfRange {
        name: "cell_size",
        value: self.cell_size,
      });
    }
    Ok(())
  }
}

/// Counters from one extraction run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarchStats {
  /// Windows visited
  pub windows: usize,
  /// Case 0 windows
  pub empty: usize,
  /// Case 15 windows
  pub full: usize,
  /// Case 5 and 10 windows
  pub saddles: usize,
  /// Triangles appended to the mesh
  pub triangles: usize,
}

// =============================================================================
// Extraction
// =============================================================================

/// Local triangle list of one window, in window units [0, 1]².
pub type WindowTriangles = SmallVec<[[Vec2; 3]; 4]>;

/// Triangulate one window from its corner weights.
pub fn triangulate_window(corners: &[f32; 4], threshold: f32, power: f32) -> WindowTriangles {
  let case = tile_index::tile_index(corners, threshold);
  let triangles = case_table::TRIANGLES[case as usize];
  if triangles.is_empty() {
    return SmallVec::new();
  }

  let crossing = |edge: usize| {
    let [c0, c1] = case_table::EDGE_CORNERS[edge];
    interpolate::crossing(corners[c0 as usize], corners[c1 as usize], threshold, power)
  };

  // Indexed by point id: corners A B C D, then edge points S E N W.
  let points = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(crossing(0), 0.0),
    Vec2::new(1.0, crossing(1)),
    Vec2::new(crossing(2), 1.0),
    Vec2::new(0.0, crossing(3)),
  ];

  triangles
    .iter()
    .map(|tri| tri.map(|p| points[p as usize]))
    .collect()
}

/// Walk every window of `field` and append its triangles to `mesh`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marching_squares::march"))]
pub fn march<F: ScalarField + ?Sized>(
  field: &F,
  config: &MarchingSquaresConfig,
  mesh: &mut MeshData,
) -> Result<MarchStats> {
  config.validate()?;

  let width = field.width() as i64;
  let height = field.height() as i64;
  let mut stats = MarchStats::default();

  if width == 0 || height == 0 {
    return Ok(stats);
  }

  let (lo, x_end, y_end) = if config.close_border {
    (-1, width, height)
  } else {
    (0, width - 1, height - 1)
  };

  // Texture space spans the sampled lattice.
  let uv_extent = Vec2::new((width - 1).max(1) as f32, (height - 1).max(1) as f32);

  for y in lo..y_end {
    for x in lo..x_end {
      let corners = tile_index::window_corners(field, x, y);
      let case = tile_index::tile_index(&corners, config.threshold);

      stats.windows += 1;
      match case {
        0 => {
          stats.empty += 1;
          continue;
        }
        15 => stats.full += 1,
        c if case_table::is_saddle(c) => stats.saddles += 1,
        _ => {}
      }

      let base = Vec2::new(x as f32, y as f32);
      for tri in triangulate_window(&corners, config.threshold, config.interpolate_power) {
        let lattice = tri.map(|p| base + p);
        let positions = lattice.map(|p| lattice_to_world(config, p));
        let uvs = lattice.map(|p| p / uv_extent);
        mesh.push_triangle(positions, uvs);
        stats.triangles += 1;
      }
    }
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(
    windows = stats.windows,
    full = stats.full,
    saddles = stats.saddles,
    triangles = stats.triangles,
    "marching squares pass complete"
  );

  Ok(stats)
}

/// World position of a lattice point on the z = 0 plane.
#[inline]
pub fn lattice_to_world(config: &MarchingSquaresConfig, lattice: Vec2) -> Vec3 {
  (config.origin + lattice * config.cell_size).extend(0.0)
}
