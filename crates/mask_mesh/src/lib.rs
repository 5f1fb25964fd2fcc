//! mask_mesh - Engine independent quadtree and marching-squares meshing
//!
//! This crate turns 2D sample grids into spatial indexes and triangle meshes.
//! A grid is thresholded into a binary mask, indexed by quadtrees, and
//! contoured with marching squares into a mesh ready for rendering.
//!
//! # Features
//!
//! - **Packed quadtree**: complete tree in one flat array with arithmetic
//!   parent/child navigation and subtree occupancy sums
//! - **Adaptive quadtree**: subdivides only where occupied cells are, stops on
//!   full or single-cell regions
//! - **Marching squares**: 16-case contouring with linear edge interpolation
//!   and ambiguous saddle handling
//! - **Mesh accumulation**: `MeshData` builder finalized into a `Mesh` with
//!   normals and bounds
//!
//! # Example
//!
//! ```ignore
//! use mask_mesh::{regenerate, GeneratorConfig, Grid};
//!
//! let grid = Grid::from_fn(32, 32, |x, y| {
//!     let d = ((x as f32 - 16.0).powi(2) + (y as f32 - 16.0).powi(2)).sqrt();
//!     (1.0 - d / 16.0).clamp(0.0, 1.0)
//! });
//!
//! let generated = regenerate(&grid, &GeneratorConfig::default())?;
//! println!("Generated {} vertices, {} triangles",
//!     generated.mesh.vertex_count(), generated.mesh.triangle_count());
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{CORNER_OFFSETS, MAX_ADAPTIVE_DEPTH, MAX_PACKED_HEIGHT};
pub use error::{MaskMeshError, Result};
pub use types::{Cell, Grid, MaskGrid, MinMaxAABB, Quadrant, SampleGrid};

// Mesh accumulation and finalization
pub mod mesh_data;
pub use mesh_data::{Mesh, MeshData};

// Flat complete quadtree
pub mod packed;
pub use packed::{PackedNode, PackedQuadTree};

// Pointer-based adaptive quadtree
pub mod adaptive;
pub use adaptive::{AdaptiveNode, AdaptiveQuadTree, AdaptiveTreeConfig, FullQuadPolicy, LeafSelection};

// Contour extraction
pub mod marching_squares;
pub use marching_squares::{march, MarchStats, MarchingSquaresConfig, ScalarField};

// TOML generator settings
pub mod config;
pub use config::{ConfigError, FieldSource, GeneratorConfig};

// Regenerate pass and batch processing
pub mod pipeline;
pub use pipeline::{regenerate, regenerate_batch, Generated};

// Runtime-toggled pass metrics
pub mod metrics;
