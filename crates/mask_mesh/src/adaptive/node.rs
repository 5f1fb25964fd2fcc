//! AdaptiveNode - one square region of the adaptive tree.
//!
//! A node is either a leaf holding the cells that landed in it, or a branch
//! that exclusively owns four children in [`Quadrant::ALL`] order.

use glam::Vec2;

use super::{AdaptiveTreeConfig, FullQuadPolicy};
use crate::types::{Cell, Quadrant};

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
  Leaf { cells: Vec<Cell> },
  Branch { children: Box<[AdaptiveNode; 4]> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveNode {
  origin: Vec2,
  size: f32,
  depth: u32,
  quadrant: Option<Quadrant>,
  value: i32,
  node_height: u32,
  kind: NodeKind,
}

impl AdaptiveNode {
  #[inline]
  pub fn origin(&self) -> Vec2 {
    self.origin
  }

  #[inline]
  pub fn x(&self) -> f32 {
    self.origin.x
  }

  #[inline]
  pub fn y(&self) -> f32 {
    self.origin.y
  }

  #[inline]
  pub fn size(&self) -> f32 {
    self.size
  }

  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  /// Slot in the parent, None for the root.
  #[inline]
  pub fn quadrant(&self) -> Option<Quadrant> {
    self.quadrant
  }

  /// 1 when the node was full, otherwise the leaf cell count (0 for a
  /// non-full branch).
  #[inline]
  pub fn value(&self) -> i32 {
    self.value
  }

  /// 0 for leaves, `1 + max(child heights)` for branches.
  #[inline]
  pub fn node_height(&self) -> u32 {
    self.node_height
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf { .. })
  }

  #[inline]
  pub fn kind(&self) -> &NodeKind {
    &self.kind
  }

  pub fn children(&self) -> Option<&[AdaptiveNode; 4]> {
    match &self.kind {
      NodeKind::Branch { children } => Some(children),
      NodeKind::Leaf { .. } => None,
    }
  }

  /// Cells stored directly in this node; empty for branches.
  pub fn cells(&self) -> &[Cell] {
    match &self.kind {
      NodeKind::Leaf { cells } => cells,
      NodeKind::Branch { .. } => &[],
    }
  }

  /// Half-open containment: `[origin, origin + size)` on both axes.
  #[inline]
  pub fn contains(&self, point: Vec2) -> bool {
    let max = self.origin + Vec2::splat(self.size);
    point.x >= self.origin.x && point.x < max.x && point.y >= self.origin.y && point.y < max.y
  }

  /// Occupancy of the unit cell whose corner is `point`, for a leaf that
  /// contains it. Full leaves are occupied everywhere.
  pub(crate) fn occupancy_at(&self, point: Vec2) -> f32 {
    if self.is_full() {
      return 1.0;
    }
    let hit = self.cells().iter().any(|c| c.value != 0 && c.corner() == point);
    if hit {
      1.0
    } else {
      0.0
    }
  }

  /// Number of stored cells reaches the node area.
  fn is_full(&self) -> bool {
    is_full_count(self.cells().len(), self.size)
  }
}

#[inline]
fn is_full_count(cells: usize, size: f32) -> bool {
  cells as f64 >= (size as f64) * (size as f64)
}

// =============================================================================
// Construction
// =============================================================================

/// Recursive build state shared by every level of one construction.
pub(super) struct Builder<'a> {
  pub config: &'a AdaptiveTreeConfig,
  pub dropped: usize,
}

impl Builder<'_> {
  pub fn build(
    &mut self,
    cells: Vec<Cell>,
    origin: Vec2,
    size: f32,
    depth: u32,
    quadrant: Option<Quadrant>,
  ) -> AdaptiveNode {
    let full = is_full_count(cells.len(), size);
    let stop_at_full = full && self.config.full_quad_policy == FullQuadPolicy::Stop;
    let split = cells.len() > 1 && depth < self.config.max_depth && !stop_at_full;

    if !split {
      let value = if full { 1 } else { cells.len() as i32 };
      return AdaptiveNode {
        origin,
        size,
        depth,
        quadrant,
        value,
        node_height: 0,
        kind: NodeKind::Leaf { cells },
      };
    }

    let half = size * 0.5;
    let mut buckets: [Vec<Cell>; 4] = Default::default();
    for cell in cells {
      match Quadrant::locate(origin, half, cell.corner()) {
        Some(q) => buckets[q.index()].push(cell),
        None => {
          self.dropped += 1;
          #[cfg(feature = "tracing")]
          tracing::warn!(x = cell.x, y = cell.y, depth, "cell outside every quadrant, dropped");
        }
      }
    }

    let children: Box<[AdaptiveNode; 4]> = Box::new(std::array::from_fn(|i| {
      let q = Quadrant::ALL[i];
      self.build(std::mem::take(&mut buckets[i]), q.corner(origin, half), half, depth + 1, Some(q))
    }));
    let node_height = 1 + children.iter().map(|c| c.node_height).max().unwrap_or(0);

    AdaptiveNode {
      origin,
      size,
      depth,
      quadrant,
      value: i32::from(full),
      node_height,
      kind: NodeKind::Branch { children },
    }
  }
}
