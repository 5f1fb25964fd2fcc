//! Precondition errors raised by tree construction, insertion and meshing.
//!
//! These are programmer errors: a pass that hits one stops and propagates it
//! with `?`. Nothing here is retried.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MaskMeshError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaskMeshError {
  #[error("tree height must be at least 1")]
  ZeroHeight,

  #[error("tree height {height} exceeds the supported maximum of {max}")]
  HeightTooLarge { height: u32, max: u32 },

  #[error("max depth {depth} exceeds the supported maximum of {max}")]
  DepthTooLarge { depth: u32, max: u32 },

  #[error("node {index} at depth {depth} is not a leaf of a tree with height {height}")]
  NotALeaf { index: usize, depth: u32, height: u32 },

  #[error("node index {index} is out of range for {len} nodes")]
  NodeIndexOutOfRange { index: usize, len: usize },

  #[error("grid must be square, got {width}x{height}")]
  NonSquareGrid { width: u32, height: u32 },

  #[error("grid side {side} is not a power of two")]
  NonPowerOfTwoSide { side: u32 },

  #[error("grid side {side} is smaller than {leaves_per_side} leaves per side")]
  GridTooSmall { side: u32, leaves_per_side: u32 },

  #[error("grid data has {len} samples, expected {width}x{height}")]
  GridSizeMismatch { width: u32, height: u32, len: usize },

  #[error("position ({x}, {y}) is out of bounds for a tree of size {size}")]
  OutOfBounds { x: f32, y: f32, size: f32 },

  #[error("{name} = {value} is out of range")]
  ParameterOutOfRange { name: &'static str, value: f32 },

  #[error("expected {expected} uvs, got {actual}")]
  UvCountMismatch { expected: usize, actual: usize },
}
