//! Pointer-based quadtree built from a sparse cell list.
//!
//! # Construction
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       AdaptiveQuadTree::new                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   node(cells, origin, size, depth)                                      │
//! │     full  = cells.len() >= size²                                        │
//! │     split = cells.len() > 1 && depth < max_depth && !full (Stop)        │
//! │                                                                         │
//! │     leaf   → value = full ? 1 : cells.len()                             │
//! │     branch → value = full ? 1 : 0                                       │
//! │              bucket each cell into the first quadrant (LL, LR, UL, UR)  │
//! │              whose half-open box holds it; unmatched cells are dropped  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cells are placed by their integer corner `(x, y)` in the same space as the
//! tree origin. Uniform regions collapse into single leaves, which
//! [`AdaptiveQuadTree::emit_leaf_quads`] turns into coarse mesh quads.

mod iter;
mod node;
mod quad_mesh;

use glam::Vec2;
pub use iter::Iter;
pub use node::{AdaptiveNode, NodeKind};
pub use quad_mesh::LeafSelection;
use serde::Deserialize;

use crate::constants::{LOOKUP_DEPTH_LIMIT, MAX_ADAPTIVE_DEPTH};
use crate::error::{MaskMeshError, Result};
use crate::types::{Cell, Quadrant};

// =============================================================================
// Configuration
// =============================================================================

/// What to do with a node whose cell count already covers its area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullQuadPolicy {
  /// Full nodes become leaves with value 1.
  #[default]
  Stop,
  /// Full nodes keep splitting; fullness only sets the value.
  Subdivide,
}

/// Adaptive tree construction parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveTreeConfig {
  /// World-space lower-left corner of the root
  pub origin: Vec2,
  /// Root side length
  pub size: f32,
  /// Deepest level a split may produce
  pub max_depth: u32,
  /// Accepted for API compatibility; the split predicate does not use it.
  pub max_cells_per_quad: usize,
  pub full_quad_policy: FullQuadPolicy,
}

impl AdaptiveTreeConfig {
  /// Root at the origin with depth enough to reach unit cells.
  pub fn new(size: f32) -> Self {
    let max_depth = if size > 1.0 {
      (size.log2().ceil() as u32).min(MAX_ADAPTIVE_DEPTH)
    } else {
      0
    };
    Self {
      origin: Vec2::ZERO,
      size,
      max_depth,
      max_cells_per_quad: 1,
      full_quad_policy: FullQuadPolicy::Stop,
    }
  }

  pub fn with_origin(mut self, origin: Vec2) -> Self {
    self.origin = origin;
    self
  }

  pub fn with_max_depth(mut self, max_depth: u32) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn with_max_cells_per_quad(mut self, max_cells_per_quad: usize) -> Self {
    self.max_cells_per_quad = max_cells_per_quad;
    self
  }

  pub fn with_full_quad_policy(mut self, policy: FullQuadPolicy) -> Self {
    self.full_quad_policy = policy;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.max_depth > MAX_ADAPTIVE_DEPTH {
      return Err(MaskMeshError::DepthTooLarge {
        depth: self.max_depth,
        max: MAX_ADAPTIVE_DEPTH,
      });
    }
    if !(self.size.is_finite() && self.size > 0.0) {
      return Err(MaskMeshError::ParameterOutOfRange {
        name: "size",
        value: self.size,
      });
    }
    Ok(())
  }
}

// =============================================================================
// Tree
// =============================================================================

/// Owned adaptive quadtree plus the tree-wide quantities nodes need.
#[derive(Clone, Debug)]
pub struct AdaptiveQuadTree {
  root: AdaptiveNode,
  dropped_cells: usize,
}

impl AdaptiveQuadTree {
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "adaptive::new"))]
  pub fn new(cells: Vec<Cell>, config: &AdaptiveTreeConfig) -> Result<Self> {
    config.validate()?;

    let cell_count = cells.len();
    let mut builder = node::Builder { config, dropped: 0 };
    let root = builder.build(cells, config.origin, config.size, 0, None);
    let dropped_cells = builder.dropped;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      cells = cell_count,
      dropped = dropped_cells,
      height = root.node_height(),
      "adaptive quadtree built"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = cell_count;

    Ok(Self { root, dropped_cells })
  }

  #[inline]
  pub fn root(&self) -> &AdaptiveNode {
    &self.root
  }

  #[inline]
  pub fn origin(&self) -> Vec2 {
    self.root.origin()
  }

  #[inline]
  pub fn size(&self) -> f32 {
    self.root.size()
  }

  /// Height of the root: the deepest leaf's depth.
  #[inline]
  pub fn tree_height(&self) -> u32 {
    self.root.node_height()
  }

  /// Cells that fell outside every quadrant during construction.
  #[inline]
  pub fn dropped_cells(&self) -> usize {
    self.dropped_cells
  }

  /// Finest-level cells along one side of `node`: 2^(tree_height - depth).
  pub fn cells_per_side(&self, node: &AdaptiveNode) -> u64 {
    1u64 << self.tree_height().saturating_sub(node.depth()).min(63)
  }

  /// Lazy pre-order traversal. Each call starts over from the root.
  pub fn iter(&self) -> Iter<'_> {
    Iter::new(&self.root)
  }

  pub fn leaves(&self) -> impl Iterator<Item = &AdaptiveNode> + '_ {
    self.iter().filter(|n| n.is_leaf())
  }

  // ===========================================================================
  // Position lookup
  // ===========================================================================

  /// Deepest node containing `(x, y)`.
  ///
  /// Fails when the point is outside the root. Returns `Ok(None)` once the
  /// descent passes [`LOOKUP_DEPTH_LIMIT`] levels.
  pub fn node_at_position(&self, x: f32, y: f32) -> Result<Option<&AdaptiveNode>> {
    let point = Vec2::new(x, y);
    if !self.root.contains(point) {
      return Err(MaskMeshError::OutOfBounds { x, y, size: self.size() });
    }

    let mut node = &self.root;
    loop {
      if node.depth() > LOOKUP_DEPTH_LIMIT {
        return Ok(None);
      }
      let Some(children) = node.children() else {
        return Ok(Some(node));
      };
      let half = node.size() * 0.5;
      match Quadrant::locate(node.origin(), half, point) {
        Some(q) => node = &children[q.index()],
        None => return Ok(None),
      }
    }
  }

  /// Value of the node containing `(x, y)`; see
  /// [`node_at_position`](Self::node_at_position).
  pub fn value_at_position(&self, x: f32, y: f32) -> Result<Option<i32>> {
    Ok(self.node_at_position(x, y)?.map(AdaptiveNode::value))
  }
}

impl<'a> IntoIterator for &'a AdaptiveQuadTree {
  type Item = &'a AdaptiveNode;
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}
