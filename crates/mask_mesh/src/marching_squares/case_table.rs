//! Triangulation table for the 16 marching-squares cases.
//!
//! # Window Topology
//!
//! ```text
//!   D(3) ──── N ──── C(2)       +Y
//!    │                │          │
//!    W                E          │
//!    │                │          └───+X
//!   A(0) ──── S ──── B(1)
//! ```
//!
//! Corners are numbered around the perimeter; bit `i` of the case index is
//! set when corner `i` is above the threshold.
//!
//! # Edge Layout
//!
//! ```text
//!   Edge 0 (S): [0,1]  along +X at y = 0
//!   Edge 1 (E): [1,2]  along +Y at x = 1
//!   Edge 2 (N): [3,2]  along +X at y = 1
//!   Edge 3 (W): [0,3]  along +Y at x = 0
//! ```
//!
//! Each edge runs from its first corner to its second, so the crossing
//! fraction `t` is measured along +X or +Y.
//!
//! # Triangles
//!
//! Every triangle winds clockwise seen from +z, matching
//! [`MeshData::add_quad`](crate::mesh_data::MeshData::add_quad). Case 15 is
//! split on the A–C diagonal. The saddles fan the connected hexagon from one
//! corner: case 5 from A, case 10 from B.

/// Corner and edge point identifiers used by the table.
pub mod point {
  pub const A: u8 = 0;
  pub const B: u8 = 1;
  pub const C: u8 = 2;
  pub const D: u8 = 3;
  pub const S: u8 = 4;
  pub const E: u8 = 5;
  pub const N: u8 = 6;
  pub const W: u8 = 7;
}

use point::*;

/// Edge endpoint corner indices, in edge order S, E, N, W.
pub const EDGE_CORNERS: [[u8; 2]; 4] = [
  [0, 1], // Edge 0: S
  [1, 2], // Edge 1: E
  [3, 2], // Edge 2: N
  [0, 3], // Edge 3: W
];

/// Edge crossing mask per case: bit `e` set when edge `e` straddles the
/// threshold.
pub const EDGE_MASK: [u8; 16] = generate_edge_mask();

const fn generate_edge_mask() -> [u8; 16] {
  let mut table = [0u8; 16];
  let mut case = 0;
  while case < 16 {
    let mut mask = 0u8;
    let mut edge = 0;
    while edge < 4 {
      let a = (case >> EDGE_CORNERS[edge][0] as usize) & 1;
      let b = (case >> EDGE_CORNERS[edge][1] as usize) & 1;
      if a != b {
        mask |= 1 << edge;
      }
      edge += 1;
    }
    table[case] = mask;
    case += 1;
  }
  table
}

/// Clockwise triangles per case, as point identifiers.
pub const TRIANGLES: [&[[u8; 3]]; 16] = [
  /* 0  */ &[],
  /* 1  */ &[[A, W, S]],
  /* 2  */ &[[B, S, E]],
  /* 3  */ &[[A, E, B], [A, W, E]],
  /* 4  */ &[[C, E, N]],
  /* 5  */ &[[A, E, S], [A, C, E], [A, N, C], [A, W, N]],
  /* 6  */ &[[B, N, C], [B, S, N]],
  /* 7  */ &[[A, C, B], [A, N, C], [A, W, N]],
  /* 8  */ &[[D, N, W]],
  /* 9  */ &[[A, N, S], [A, D, N]],
  /* 10 */ &[[B, N, E], [B, D, N], [B, W, D], [B, S, W]],
  /* 11 */ &[[A, E, B], [A, N, E], [A, D, N]],
  /* 12 */ &[[C, W, D], [C, E, W]],
  /* 13 */ &[[A, E, S], [A, C, E], [A, D, C]],
  /* 14 */ &[[B, D, C], [B, W, D], [B, S, W]],
  /* 15 */ &[[A, C, B], [A, D, C]],
];

/// True for the two ambiguous diagonal cases.
#[inline(always)]
pub const fn is_saddle(case: u8) -> bool {
  case == 5 || case == 10
}

#[cfg(test)]
#[path = "case_table_test.rs"]
mod case_table_test;
