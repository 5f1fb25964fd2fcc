//! PackedNode - value type stored in the flat packed tree array.
//!
//! Relations between nodes are pure index arithmetic; a node never holds a
//! pointer to its parent or children.

use glam::Vec2;

use crate::constants::QUAD_CHILDREN;
use crate::types::Quadrant;

/// One slot of a [`PackedQuadTree`](super::PackedQuadTree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedNode {
  /// World-space lower-left corner
  pub position: Vec2,
  /// Side length in world units
  pub size: f32,
  /// 0 = root
  pub depth: u32,
  /// Flat index in the node array
  pub index: usize,
  /// Leaf: inserted scalar. Branch: sum of all descendant leaves.
  pub value: i32,
}

impl PackedNode {
  pub fn new(position: Vec2, size: f32, depth: u32, index: usize) -> Self {
    Self {
      position,
      size,
      depth,
      index,
      value: 0,
    }
  }

  /// Child placed in `quadrant`, one level down.
  pub fn child(&self, quadrant: Quadrant) -> Self {
    let half = self.size * 0.5;
    Self::new(
      quadrant.corner(self.position, half),
      half,
      self.depth + 1,
      child_index(self.index, quadrant),
    )
  }

  /// World-space centre of the node.
  #[inline]
  pub fn center(&self) -> Vec2 {
    self.position + Vec2::splat(self.size * 0.5)
  }
}

/// Parent slot of `index`, None for the root.
#[inline(always)]
pub const fn parent_index(index: usize) -> Option<usize> {
  if index == 0 {
    None
  } else {
    Some((index - 1) / QUAD_CHILDREN)
  }
}

/// Child slot of `index` in `quadrant`.
#[inline(always)]
pub const fn child_index(index: usize, quadrant: Quadrant) -> usize {
  QUAD_CHILDREN * index + 1 + quadrant.index()
}

/// Which child slot of its parent `index` occupies, None for the root.
#[inline]
pub const fn quadrant_of(index: usize) -> Option<Quadrant> {
  if index == 0 {
    None
  } else {
    Quadrant::from_index((index - 1) % QUAD_CHILDREN)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
