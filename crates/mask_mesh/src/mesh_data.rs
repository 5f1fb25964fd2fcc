//! Triangle accumulation and one-shot finalization into an immutable mesh.
//!
//! A generation pass threads a single `&mut MeshData` through every
//! recursive call and consumes it exactly once with [`MeshData::finalize`].
//!
//! # Quad Layout
//!
//! ```text
//!   c(x, y+s) ──── d(x+s, y+s)
//!      │  ╲            │
//!      │     ╲         │        triangles: (a, c, d), (a, d, b)
//!      │        ╲      │        indices:   (0, 2, 3), (0, 3, 1)
//!      │           ╲   │
//!   a(x, y) ─────── b(x+s, y)
//! ```
//!
//! Both quad triangles wind clockwise seen from +z. Every triangle this crate
//! emits uses the same winding, so finalized normals face -z.

use glam::{Vec2, Vec3, Vec3A};

use crate::error::{MaskMeshError, Result};
use crate::types::MinMaxAABB;

/// Default UVs for [`MeshData::add_triangle`].
pub const DEFAULT_TRIANGLE_UVS: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)];

/// Default UVs for [`MeshData::add_quad`], in a, b, c, d order.
pub const DEFAULT_QUAD_UVS: [Vec2; 4] = [
  Vec2::new(0.0, 0.0),
  Vec2::new(1.0, 0.0),
  Vec2::new(0.0, 1.0),
  Vec2::new(1.0, 1.0),
];

/// Quad triangle indices relative to the first quad vertex.
const QUAD_TRIANGLES: [u32; 6] = [0, 2, 3, 0, 3, 1];

// =============================================================================
// MeshData
// =============================================================================

/// Growable vertex/UV/index buffers with a running vertex counter.
///
/// No welding: every call allocates fresh vertices even when they coincide
/// with existing ones.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
  vertices: Vec<Vec3>,
  uvs: Vec<Vec2>,
  triangles: Vec<u32>,
  vertex_count: u32,
}

impl MeshData {
  pub fn new() -> Self {
    Self::default()
  }

  /// Pre-allocate for a known number of triangles.
  pub fn with_triangle_capacity(triangles: usize) -> Self {
    Self {
      vertices: Vec::with_capacity(triangles * 3),
      uvs: Vec::with_capacity(triangles * 3),
      triangles: Vec::with_capacity(triangles * 3),
      vertex_count: 0,
    }
  }

  /// Append one triangle. `uvs` must hold exactly 3 entries when given.
  pub fn add_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, uvs: Option<&[Vec2]>) -> Result<()> {
    let uvs = match uvs {
      Some(uvs) => <[Vec2; 3]>::try_from(uvs).map_err(|_| MaskMeshError::UvCountMismatch {
        expected: 3,
        actual: uvs.len(),
      })?,
      None => DEFAULT_TRIANGLE_UVS,
    };
    self.push_triangle([a, b, c], uvs);
    Ok(())
  }

  /// Append an axis-aligned square with corner (x, y) and side `size` on the
  /// z = 0 plane. `uvs` must hold exactly 4 entries (a, b, c, d) when given.
  pub fn add_quad(&mut self, x: f32, y: f32, size: f32, uvs: Option<&[Vec2]>) -> Result<()> {
    let uvs = match uvs {
      Some(uvs) => <[Vec2; 4]>::try_from(uvs).map_err(|_| MaskMeshError::UvCountMismatch {
        expected: 4,
        actual: uvs.len(),
      })?,
      None => DEFAULT_QUAD_UVS,
    };
    self.push_quad(x, y, size, uvs);
    Ok(())
  }

  /// Infallible triangle append for callers that already hold 3 UVs.
  #[inline]
  pub fn push_triangle(&mut self, points: [Vec3; 3], uvs: [Vec2; 3]) {
    let base = self.vertex_count;
    self.vertices.extend_from_slice(&points);
    self.uvs.extend_from_slice(&uvs);
    self.triangles.extend_from_slice(&[base, base + 1, base + 2]);
    self.vertex_count += 3;
  }

  /// Infallible quad append for callers that already hold 4 UVs.
  #[inline]
  pub fn push_quad(&mut self, x: f32, y: f32, size: f32, uvs: [Vec2; 4]) {
    let base = self.vertex_count;
    self.vertices.extend_from_slice(&[
      Vec3::new(x, y, 0.0),
      Vec3::new(x + size, y, 0.0),
      Vec3::new(x, y + size, 0.0),
      Vec3::new(x + size, y + size, 0.0),
    ]);
    self.uvs.extend_from_slice(&uvs);
    self.triangles.extend(QUAD_TRIANGLES.iter().map(|&i| base + i));
    self.vertex_count += 4;
  }

  #[inline]
  pub fn vertices(&self) -> &[Vec3] {
    &self.vertices
  }

  #[inline]
  pub fn uvs(&self) -> &[Vec2] {
    &self.uvs
  }

  #[inline]
  pub fn triangles(&self) -> &[u32] {
    &self.triangles
  }

  #[inline]
  pub fn vertex_count(&self) -> u32 {
    self.vertex_count
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.triangles.len() / 3
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  /// Drop all geometry, keeping allocations.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.uvs.clear();
    self.triangles.clear();
    self.vertex_count = 0;
  }

  /// Consume the accumulator and build the immutable mesh with recomputed
  /// normals and bounds.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesh_data::finalize"))]
  pub fn finalize(self) -> Mesh {
    let normals = angle_weighted_normals(&self.vertices, &self.triangles);

    let mut bounds = MinMaxAABB::empty();
    for &v in &self.vertices {
      bounds.encapsulate(v);
    }

    Mesh {
      positions: self.vertices,
      normals,
      uvs: self.uvs,
      indices: self.triangles,
      bounds,
    }
  }
}

// =============================================================================
// Mesh
// =============================================================================

/// Finalized, read-only mesh handed to an external renderer.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
  positions: Vec<Vec3>,
  normals: Vec<Vec3>,
  uvs: Vec<Vec2>,
  indices: Vec<u32>,
  bounds: MinMaxAABB,
}

impl Mesh {
  #[inline]
  pub fn positions(&self) -> &[Vec3] {
    &self.positions
  }

  #[inline]
  pub fn normals(&self) -> &[Vec3] {
    &self.normals
  }

  #[inline]
  pub fn uvs(&self) -> &[Vec2] {
    &self.uvs
  }

  #[inline]
  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  #[inline]
  pub fn bounds(&self) -> MinMaxAABB {
    self.bounds
  }

  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  /// Approximate heap footprint of the buffers.
  pub fn memory_bytes(&self) -> usize {
    self.positions.len() * std::mem::size_of::<Vec3>() * 2
      + self.uvs.len() * std::mem::size_of::<Vec2>()
      + self.indices.len() * std::mem::size_of::<u32>()
  }
}

// =============================================================================
// Normals
// =============================================================================

/// Angle-weighted ("mean weighted by angle") vertex normals.
///
/// Each face contributes its unit normal scaled by the interior angle at the
/// vertex. Degenerate faces contribute nothing; vertices with no usable face
/// fall back to -z, the facing of every triangle this crate emits.
fn angle_weighted_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
  let mut accum = vec![Vec3A::ZERO; positions.len()];

  for tri in indices.chunks_exact(3) {
    let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

    let p0 = Vec3A::from(positions[i0]);
    let p1 = Vec3A::from(positions[i1]);
    let p2 = Vec3A::from(positions[i2]);

    let e01 = p1 - p0;
    let e02 = p2 - p0;
    let e12 = p2 - p1;

    let face_normal = e01.cross(e02);
    let face_len_sq = face_normal.length_squared();
    if face_len_sq < 1e-12 {
      continue;
    }
    let unit = face_normal * face_len_sq.sqrt().recip();

    accum[i0] += unit * vertex_angle(e01, e02);
    accum[i1] += unit * vertex_angle(-e01, e12);
    accum[i2] += unit * vertex_angle(-e02, -e12);
  }

  accum
    .into_iter()
    .map(|n| {
      let len_sq = n.length_squared();
      if len_sq < 1e-12 {
        Vec3::NEG_Z
      } else {
        Vec3::from(n * len_sq.sqrt().recip())
      }
    })
    .collect()
}

/// Angle between two edge vectors in radians.
#[inline]
fn vertex_angle(e1: Vec3A, e2: Vec3A) -> f32 {
  let len1_sq = e1.length_squared();
  let len2_sq = e2.length_squared();

  if len1_sq < 1e-12 || len2_sq < 1e-12 {
    return 0.0;
  }

  let cos_angle = e1.dot(e2) / (len1_sq.sqrt() * len2_sq.sqrt());
  cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
#[path = "mesh_data_test.rs"]
mod mesh_data_test;
