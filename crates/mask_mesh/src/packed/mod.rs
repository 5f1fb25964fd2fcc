//! Complete quadtree stored as a flat array with a sum aggregate.
//!
//! # Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PackedQuadTree (H = 3)                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   nodes: [ root │ d1 d1 d1 d1 │ d2 d2 ... d2 ]                          │
//! │            0      1 .. 4        5 .. 20                                 │
//! │                                 └─ leaf_start = 5                       │
//! │                                                                         │
//! │   insert_value(v, leaf)                                                 │
//! │     leaf.value = v                                                      │
//! │     every ancestor.value += (v - old)                                   │
//! │                                                                         │
//! │   => branch.value == Σ descendant leaf values                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Leaves are stored in quadrant (Z) order, so a leaf's `position` follows
//! its quadrant path from the root. [`PackedQuadTree::coordinate_of_leaf`]
//! decodes the leaf offset row-major (`y = offset / side`, `x = offset %
//! side`), which is not the spatial order once H ≥ 3. Map insertion places
//! each block through [`PackedQuadTree::leaf_covering`] instead, so every
//! branch sums exactly the map area under its square.
//!
//! Fullness is measured in map cells: after [`insert_values_from_map`] each
//! leaf holds up to `block²` cells, before it each leaf holds one.
//!
//! [`insert_values_from_map`]: PackedQuadTree::insert_values_from_map

mod node;

use glam::Vec2;
pub use node::{child_index, parent_index, quadrant_of, PackedNode};

use crate::constants::{cells_below, cells_per_side_below, packed_node_count, MAX_PACKED_HEIGHT};
use crate::error::{MaskMeshError, Result};
use crate::types::{Grid, Quadrant};

/// Flat complete quadtree with incremental sum propagation.
#[derive(Clone, Debug)]
pub struct PackedQuadTree {
  nodes: Vec<PackedNode>,
  height: u32,
  leaf_start: usize,
  /// Map cells summed into one leaf
  leaf_area: u64,
}

impl PackedQuadTree {
  /// Allocate every node of a tree with `height` levels covering the square
  /// `[origin, origin + size)`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "packed::new"))]
  pub fn new(origin: Vec2, size: f32, height: u32) -> Result<Self> {
    if height == 0 {
      return Err(MaskMeshError::ZeroHeight);
    }
    if height > MAX_PACKED_HEIGHT {
      return Err(MaskMeshError::HeightTooLarge {
        height,
        max: MAX_PACKED_HEIGHT,
      });
    }
    let node_count = packed_node_count(height).ok_or(MaskMeshError::HeightTooLarge {
      height,
      max: MAX_PACKED_HEIGHT,
    })?;
    let leaf_start = node_count - cells_below(height - 1);

    // Parents always precede their children, so one forward pass suffices.
    let mut nodes = Vec::with_capacity(node_count);
    nodes.push(PackedNode::new(origin, size, 0, 0));
    for index in 0..leaf_start {
      let parent = nodes[index];
      for quadrant in Quadrant::ALL {
        nodes.push(parent.child(quadrant));
      }
    }
    debug_assert_eq!(nodes.len(), node_count);

    #[cfg(feature = "tracing")]
    tracing::debug!(height, node_count, leaf_start, "packed quadtree allocated");

    Ok(Self {
      nodes,
      height,
      leaf_start,
      leaf_area: 1,
    })
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn nodes(&self) -> &[PackedNode] {
    &self.nodes
  }

  #[inline]
  pub fn root(&self) -> &PackedNode {
    &self.nodes[0]
  }

  pub fn node(&self, index: usize) -> Result<&PackedNode> {
    self.nodes.get(index).ok_or(MaskMeshError::NodeIndexOutOfRange {
      index,
      len: self.nodes.len(),
    })
  }

  /// First leaf index.
  #[inline]
  pub fn leaf_start(&self) -> usize {
    self.leaf_start
  }

  /// Trailing leaf slice.
  #[inline]
  pub fn leaf_nodes(&self) -> &[PackedNode] {
    &self.nodes[self.leaf_start..]
  }

  /// Map cells summed into each leaf: 1 until a map is inserted, then
  /// `block²`.
  #[inline]
  pub fn leaf_area(&self) -> u64 {
    self.leaf_area
  }

  /// Leaves along one side of the root (2^(H-1)).
  #[inline]
  pub fn leaves_per_side(&self) -> usize {
    cells_per_side_below(self.height - 1)
  }

  // ===========================================================================
  // Relations
  // ===========================================================================

  pub fn parent(&self, index: usize) -> Result<Option<&PackedNode>> {
    self.node(index)?;
    Ok(parent_index(index).map(|p| &self.nodes[p]))
  }

  /// The four children in quadrant order, or an empty slice for a leaf.
  pub fn children(&self, index: usize) -> Result<&[PackedNode]> {
    let node = self.node(index)?;
    if self.is_leaf(node) {
      return Ok(&[]);
    }
    let first = child_index(index, Quadrant::LowerLeft);
    Ok(&self.nodes[first..first + Quadrant::ALL.len()])
  }

  /// Lazy ancestor chain, immediate parent first.
  pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
    Ancestors {
      nodes: &self.nodes,
      next: if index < self.nodes.len() {
        parent_index(index)
      } else {
        None
      },
    }
  }

  /// Every strict ancestor, immediate parent first and root last. The chain
  /// length equals the node's depth.
  pub fn all_parent_nodes(&self, index: usize) -> Result<Vec<PackedNode>> {
    self.node(index)?;
    Ok(self.ancestors(index).copied().collect())
  }

  // ===========================================================================
  // Predicates
  // ===========================================================================

  #[inline]
  pub fn is_leaf(&self, node: &PackedNode) -> bool {
    node.depth + 1 == self.height
  }

  /// Value has reached the node's capacity in map cells.
  #[inline]
  pub fn is_full(&self, node: &PackedNode) -> bool {
    node.value as i64 >= self.capacity(node) as i64
  }

  #[inline]
  pub fn is_empty(&self, node: &PackedNode) -> bool {
    node.value == 0
  }

  /// `value / (number_of_cells * leaf_area)`, in [0, 1] for 0/1 maps.
  #[inline]
  pub fn normalized_value(&self, node: &PackedNode) -> f32 {
    node.value as f32 / self.capacity(node) as f32
  }

  #[inline]
  fn capacity(&self, node: &PackedNode) -> u64 {
    self.number_of_cells(node) as u64 * self.leaf_area
  }

  /// Leaves under the node (4^(H-1-depth)).
  #[inline]
  pub fn number_of_cells(&self, node: &PackedNode) -> usize {
    cells_below(self.levels_below(node))
  }

  /// Leaves along one side of the node (2^(H-1-depth)).
  #[inline]
  pub fn number_of_cells_per_side(&self, node: &PackedNode) -> usize {
    cells_per_side_below(self.levels_below(node))
  }

  #[inline]
  fn levels_below(&self, node: &PackedNode) -> u32 {
    self.height.saturating_sub(node.depth + 1)
  }

  // ===========================================================================
  // Leaf coordinates
  // ===========================================================================

  /// Row-major (x, y) of a leaf within the leaf grid.
  pub fn coordinate_of_leaf(&self, index: usize) -> Result<(u32, u32)> {
    let node = self.node(index)?;
    if !self.is_leaf(node) {
      return Err(self.not_a_leaf(node));
    }
    let side = self.leaves_per_side();
    let offset = index - self.leaf_start;
    Ok(((offset % side) as u32, (offset / side) as u32))
  }

  /// Leaf index for a row-major leaf coordinate. Inverse of
  /// [`coordinate_of_leaf`](Self::coordinate_of_leaf).
  pub fn leaf_at_coordinate(&self, x: u32, y: u32) -> Result<usize> {
    let side = self.leaves_per_side();
    let index = self.leaf_start + y as usize * side + x as usize;
    if x as usize >= side || y as usize >= side {
      return Err(MaskMeshError::NodeIndexOutOfRange {
        index,
        len: self.nodes.len(),
      });
    }
    Ok(index)
  }

  /// Leaf whose square covers cell `(x, y)` of the leaf grid, found by
  /// following the quadrant path from the root.
  pub fn leaf_covering(&self, x: u32, y: u32) -> Result<usize> {
    let side = self.leaves_per_side();
    if x as usize >= side || y as usize >= side {
      return Err(MaskMeshError::NodeIndexOutOfRange {
        index: self.leaf_start + y as usize * side + x as usize,
        len: self.nodes.len(),
      });
    }

    // Bit `level` of x picks left/right, of y lower/upper.
    let mut index = 0;
    for level in (0..self.height - 1).rev() {
      let slot = ((x >> level) & 1) | (((y >> level) & 1) << 1);
      index = child_index(index, Quadrant::ALL[slot as usize]);
    }
    Ok(index)
  }

  // ===========================================================================
  // Insertion
  // ===========================================================================

  /// Set a leaf's value and add the change to every ancestor.
  ///
  /// On a fresh leaf (value 0) every ancestor grows by exactly `value`.
  pub fn insert_value(&mut self, value: i32, leaf_index: usize) -> Result<()> {
    let node = *self.node(leaf_index)?;
    if !self.is_leaf(&node) {
      return Err(self.not_a_leaf(&node));
    }

    let delta = value - node.value;
    self.nodes[leaf_index].value = value;

    let mut current = parent_index(leaf_index);
    while let Some(index) = current {
      self.nodes[index].value += delta;
      current = parent_index(index);
    }
    Ok(())
  }

  /// Sum each `block × block` region of a square power-of-two map and insert
  /// it at the leaf covering that region.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "packed::insert_values_from_map"))]
  pub fn insert_values_from_map(&mut self, map: &Grid<i32>) -> Result<()> {
    if !map.is_square() {
      return Err(MaskMeshError::NonSquareGrid {
        width: map.width(),
        height: map.height(),
      });
    }
    let side = map.width();
    if !side.is_power_of_two() {
      return Err(MaskMeshError::NonPowerOfTwoSide { side });
    }
    let leaves_per_side = self.leaves_per_side() as u32;
    if side < leaves_per_side {
      return Err(MaskMeshError::GridTooSmall { side, leaves_per_side });
    }

    // Both are powers of two, so blocks tile the map exactly.
    let block = side / leaves_per_side;
    let data = map.as_slice();

    for by in 0..leaves_per_side {
      for bx in 0..leaves_per_side {
        let mut sum = 0i32;
        for y in by * block..(by + 1) * block {
          let row = map.index(bx * block, y);
          sum += data[row..row + block as usize].iter().sum::<i32>();
        }
        let leaf = self.leaf_covering(bx, by)?;
        self.insert_value(sum, leaf)?;
      }
    }
    self.leaf_area = u64::from(block) * u64::from(block);

    #[cfg(feature = "tracing")]
    tracing::debug!(side, block, total = self.root().value, "map inserted");

    Ok(())
  }

  fn not_a_leaf(&self, node: &PackedNode) -> MaskMeshError {
    MaskMeshError::NotALeaf {
      index: node.index,
      depth: node.depth,
      height: self.height,
    }
  }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
  nodes: &'a [PackedNode],
  next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
  type Item = &'a PackedNode;

  fn next(&mut self) -> Option<Self::Item> {
    let index = self.next?;
    self.next = parent_index(index);
    self.nodes.get(index)
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
