//! Scalar fields the extractor can walk.

use glam::Vec2;

use crate::adaptive::AdaptiveQuadTree;
use crate::types::Grid;

/// A width × height lattice of scalar samples.
pub trait ScalarField {
  fn width(&self) -> u32;

  fn height(&self) -> u32;

  /// Sample at an in-bounds lattice point.
  fn sample(&self, x: u32, y: u32) -> f32;

  /// Sample at any lattice point; points outside the field weigh 0.
  #[inline]
  fn weight(&self, x: i64, y: i64) -> f32 {
    if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
      0.0
    } else {
      self.sample(x as u32, y as u32)
    }
  }
}

impl ScalarField for Grid<f32> {
  #[inline]
  fn width(&self) -> u32 {
    Grid::width(self)
  }

  #[inline]
  fn height(&self) -> u32 {
    Grid::height(self)
  }

  #[inline]
  fn sample(&self, x: u32, y: u32) -> f32 {
    self.as_slice()[self.index(x, y)]
  }
}

impl ScalarField for Grid<i32> {
  #[inline]
  fn width(&self) -> u32 {
    Grid::width(self)
  }

  #[inline]
  fn height(&self) -> u32 {
    Grid::height(self)
  }

  #[inline]
  fn sample(&self, x: u32, y: u32) -> f32 {
    self.as_slice()[self.index(x, y)] as f32
  }
}

/// Occupancy of the unit cell at `origin + (x, y)`: 1 inside full leaves or
/// on a stored cell, 0 elsewhere. Points past the lookup depth limit read
/// as 0.
impl ScalarField for AdaptiveQuadTree {
  #[inline]
  fn width(&self) -> u32 {
    self.size().ceil() as u32
  }

  #[inline]
  fn height(&self) -> u32 {
    self.size().ceil() as u32
  }

  fn sample(&self, x: u32, y: u32) -> f32 {
    let point = self.origin() + Vec2::new(x as f32, y as f32);
    match self.node_at_position(point.x, point.y) {
      Ok(Some(leaf)) => leaf.occupancy_at(point),
      _ => 0.0,
    }
  }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
