//! Tree sizing limits and marching-squares layout constants.
//!
//! # Packed Tree Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PACKED QUADTREE (height H = 3)                       │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Index:   0 │ 1  2  3  4 │ 5  6  7  8  9 ... 20                         │
//! │           │   │            │                                            │
//! │  Depth:   0 │ 1            │ 2 (leaves)                                 │
//! │                                                                         │
//! │  parent(i)   = (i - 1) / 4                                              │
//! │  children(i) = 4i + 1 ..= 4i + 4                                        │
//! │  nodes       = 4^0 + 4^1 + ... + 4^(H-1)                                │
//! │  leaves      = 4^(H-1), stored last                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Node count grows as 4^H, so heights are capped at [`MAX_PACKED_HEIGHT`].
//!
//! # Window Corners
//!
//! ```text
//!   3 ──── 2        +Y
//!   │      │         │
//!   │      │         │
//!   0 ──── 1         └───── +X
//! ```
//!
//! Corners are numbered around the perimeter, so the saddle cases are the
//! diagonal masks 5 (0b0101) and 10 (0b1010).

/// Number of children of every branch node.
pub const QUAD_CHILDREN: usize = 4;

/// Largest supported packed tree height (5 592 405 nodes).
pub const MAX_PACKED_HEIGHT: u32 = 12;

/// Largest supported adaptive tree depth.
pub const MAX_ADAPTIVE_DEPTH: u32 = 24;

/// Position lookups give up after this many levels, whatever the tree depth.
pub const LOOKUP_DEPTH_LIMIT: u32 = 10;

/// Edge fraction used when an edge has no usable crossing.
pub const NEUTRAL_EDGE_FRACTION: f32 = 0.5;

/// Sample offsets of the 4 window corners relative to the window origin.
pub const CORNER_OFFSETS: [(i64, i64); 4] = [
  (0, 0), // corner 0
  (1, 0), // corner 1
  (1, 1), // corner 2
  (0, 1), // corner 3
];

/// Number of nodes in a complete quadtree of the given height.
///
/// Returns None when the count does not fit in `usize`.
pub const fn packed_node_count(height: u32) -> Option<usize> {
  let mut total = 0usize;
  let mut level = 1usize;
  let mut depth = 0;

  while depth < height {
    total = match total.checked_add(level) {
      Some(t) => t,
      None => return None,
    };
    depth += 1;
    if depth < height {
      level = match level.checked_mul(QUAD_CHILDREN) {
        Some(l) => l,
        None => return None,
      };
    }
  }

  Some(total)
}

/// Number of cells under a node `levels_below` levels above the leaves
/// (4^levels_below).
#[inline(always)]
pub const fn cells_below(levels_below: u32) -> usize {
  1usize << (2 * levels_below)
}

/// Number of cells per side under a node `levels_below` levels above the
/// leaves (2^levels_below).
#[inline(always)]
pub const fn cells_per_side_below(levels_below: u32) -> usize {
  1usize << levels_below
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
