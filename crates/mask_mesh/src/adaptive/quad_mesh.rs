//! Coarse quad emission from adaptive tree leaves.

use glam::Vec2;
use serde::Deserialize;

use super::AdaptiveQuadTree;
use crate::mesh_data::MeshData;

/// Which leaves become quads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafSelection {
  /// Leaves with value 0 (no cells).
  #[default]
  Empty,
  /// Leaves with a non-zero value.
  Occupied,
}

impl LeafSelection {
  #[inline]
  fn matches(self, value: i32) -> bool {
    match self {
      LeafSelection::Empty => value == 0,
      LeafSelection::Occupied => value != 0,
    }
  }
}

impl AdaptiveQuadTree {
  /// Append one quad per selected leaf. UVs map the root square onto
  /// [0, 1]². Returns the number of quads emitted.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "adaptive::emit_leaf_quads"))]
  pub fn emit_leaf_quads(&self, selection: LeafSelection, mesh: &mut MeshData) -> usize {
    let origin = self.origin();
    let inv_size = self.size().recip();
    let mut emitted = 0;

    for leaf in self.leaves().filter(|n| selection.matches(n.value())) {
      let lo = (leaf.origin() - origin) * inv_size;
      let hi = lo + Vec2::splat(leaf.size() * inv_size);
      let uvs = [lo, Vec2::new(hi.x, lo.y), Vec2::new(lo.x, hi.y), hi];
      mesh.push_quad(leaf.x(), leaf.y(), leaf.size(), uvs);
      emitted += 1;
    }

    emitted
  }
}

#[cfg(test)]
#[path = "quad_mesh_test.rs"]
mod quad_mesh_test;
