//! Core data types: sample grids, mask cells and mesh bounds.

use glam::{Vec2, Vec3};

use crate::error::{MaskMeshError, Result};

/// Float sample field, typically grayscale intensity in [0, 1].
pub type SampleGrid = Grid<f32>;

/// Integer occupancy mask, 1 = occupied, 0 = empty.
pub type MaskGrid = Grid<i32>;

// =============================================================================
// Grid
// =============================================================================

/// Row-major 2D field.
///
/// ```text
/// index = y * width + x
///
///   y=1 │ 3  4  5
///   y=0 │ 0  1  2
///       └─────────
///         x=0 1 2
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
  width: u32,
  height: u32,
  data: Vec<T>,
}

impl<T> Grid<T> {
  /// Wrap row-major data. Fails when `data.len() != width * height`.
  pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
    if data.len() != width as usize * height as usize {
      return Err(MaskMeshError::GridSizeMismatch {
        width,
        height,
        len: data.len(),
      });
    }
    Ok(Self { width, height, data })
  }

  /// Build a grid by evaluating `f(x, y)` for every cell.
  pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
      for x in 0..width {
        data.push(f(x, y));
      }
    }
    Self { width, height, data }
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  pub fn is_square(&self) -> bool {
    self.width == self.height
  }

  /// Row-major linear index.
  #[inline(always)]
  pub fn index(&self, x: u32, y: u32) -> usize {
    y as usize * self.width as usize + x as usize
  }

  /// Sample at (x, y), or None outside the grid.
  #[inline]
  pub fn get(&self, x: i64, y: i64) -> Option<&T> {
    if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
      return None;
    }
    self.data.get(self.index(x as u32, y as u32))
  }

  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.data
  }

  pub fn into_vec(self) -> Vec<T> {
    self.data
  }
}

impl Grid<f32> {
  /// Threshold samples into a 0/1 mask. Only samples strictly above
  /// `threshold` become 1.
  pub fn to_mask(&self, threshold: f32) -> Grid<i32> {
    Grid {
      width: self.width,
      height: self.height,
      data: self.data.iter().map(|&v| i32::from(v > threshold)).collect(),
    }
  }
}

impl<T: Copy> Grid<T> {
  /// Overwrite the one-cell frame (first and last row and column) with
  /// `value`.
  pub fn fill_border(&mut self, value: T) {
    let (w, h) = (self.width as usize, self.height as usize);
    if w == 0 || h == 0 {
      return;
    }
    self.data[..w].fill(value);
    self.data[(h - 1) * w..].fill(value);
    for row in self.data.chunks_exact_mut(w) {
      row[0] = value;
      row[w - 1] = value;
    }
  }
}

impl Grid<i32> {
  /// Non-zero mask entries as cells, in row-major order.
  ///
  /// Cell side is the grid width, so this is only meaningful for square
  /// masks.
  pub fn occupied_cells(&self) -> Vec<Cell> {
    let side = self.width;
    self
      .data
      .iter()
      .enumerate()
      .filter(|&(_, &v)| v != 0)
      .map(|(i, &v)| Cell::new(i as u32 % side, i as u32 / side, side, v))
      .collect()
  }

  /// Number of non-zero entries.
  pub fn occupied_count(&self) -> usize {
    self.data.iter().filter(|&&v| v != 0).count()
  }
}

// =============================================================================
// Cell
// =============================================================================

/// A single mask cell: integer coordinate within a square grid of `side`
/// cells, plus its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
  pub x: u32,
  pub y: u32,
  pub side: u32,
  pub value: i32,
}

impl Cell {
  #[inline]
  pub const fn new(x: u32, y: u32, side: u32, value: i32) -> Self {
    Self { x, y, side, value }
  }

  /// Flat row-major index.
  #[inline]
  pub const fn index(&self) -> usize {
    self.y as usize * self.side as usize + self.x as usize
  }

  /// Cell centre relative to the grid centre.
  pub fn position(&self) -> Vec2 {
    let half = (self.side / 2) as f32;
    Vec2::new(self.x as f32 - half + 0.5, self.y as f32 - half + 0.5)
  }

  /// Cell corner as a float coordinate, used for tree placement.
  #[inline]
  pub fn corner(&self) -> Vec2 {
    Vec2::new(self.x as f32, self.y as f32)
  }
}

// =============================================================================
// Quadrant
// =============================================================================

/// Child slot of a quadtree node.
///
/// Discriminants give both the child order and the packed child offset
/// (`4 * parent + 1 + quadrant`).
///
/// ```text
///   ┌────┬────┐
///   │ UL │ UR │   UL = 2, UR = 3
///   ├────┼────┤
///   │ LL │ LR │   LL = 0, LR = 1
///   └────┴────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
  LowerLeft = 0,
  LowerRight = 1,
  UpperLeft = 2,
  UpperRight = 3,
}

/// Unit offset of each quadrant's corner, indexed by `Quadrant as usize`.
const QUADRANT_OFFSETS: [Vec2; 4] = [
  Vec2::new(0.0, 0.0),
  Vec2::new(1.0, 0.0),
  Vec2::new(0.0, 1.0),
  Vec2::new(1.0, 1.0),
];

impl Quadrant {
  /// Fixed iteration order used for splitting and child storage.
  pub const ALL: [Quadrant; 4] = [
    Quadrant::LowerLeft,
    Quadrant::LowerRight,
    Quadrant::UpperLeft,
    Quadrant::UpperRight,
  ];

  #[inline(always)]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Quadrant for a child slot in 0..4.
  pub const fn from_index(index: usize) -> Option<Self> {
    match index {
      0 => Some(Quadrant::LowerLeft),
      1 => Some(Quadrant::LowerRight),
      2 => Some(Quadrant::UpperLeft),
      3 => Some(Quadrant::UpperRight),
      _ => None,
    }
  }

  pub const fn short_name(self) -> &'static str {
    match self {
      Quadrant::LowerLeft => "LL",
      Quadrant::LowerRight => "LR",
      Quadrant::UpperLeft => "UL",
      Quadrant::UpperRight => "UR",
    }
  }

  /// Corner offset in units of the child size.
  #[inline(always)]
  pub fn offset(self) -> Vec2 {
    QUADRANT_OFFSETS[self.index()]
  }

  /// Corner of this quadrant inside a parent at `origin` with child size
  /// `half`.
  #[inline]
  pub fn corner(self, origin: Vec2, half: f32) -> Vec2 {
    origin + self.offset() * half
  }

  /// Half-open containment test: `[x0, x0 + half) × [y0, y0 + half)`.
  #[inline]
  pub fn contains(self, origin: Vec2, half: f32, point: Vec2) -> bool {
    let min = self.corner(origin, half);
    point.x >= min.x && point.x < min.x + half && point.y >= min.y && point.y < min.y + half
  }

  /// First quadrant in [`Quadrant::ALL`] order whose box holds `point`.
  pub fn locate(origin: Vec2, half: f32, point: Vec2) -> Option<Self> {
    Self::ALL.into_iter().find(|q| q.contains(origin, half, point))
  }
}

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: Vec3,
  pub max: Vec3,
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: Vec3::splat(f32::INFINITY),
      max: Vec3::splat(f32::NEG_INFINITY),
    }
  }

  pub fn new(min: Vec3, max: Vec3) -> Self {
    Self { min, max }
  }

  /// Expand to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// True once at least one point was encapsulated.
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  pub fn contains(&self, point: Vec3) -> bool {
    self.min.cmple(point).all() && point.cmple(self.max).all()
  }

  pub fn size(&self) -> Vec3 {
    if self.is_valid() {
      self.max - self.min
    } else {
      Vec3::ZERO
    }
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
