//! Window sampling and case classification.

use super::field::ScalarField;
use crate::constants::CORNER_OFFSETS;

/// Corner weights of the window whose lower-left sample is `(x, y)`, in
/// perimeter order. Samples outside the field weigh 0.
#[inline]
pub fn window_corners<F: ScalarField + ?Sized>(field: &F, x: i64, y: i64) -> [f32; 4] {
  CORNER_OFFSETS.map(|(dx, dy)| field.weight(x + dx, y + dy))
}

/// 4-bit case index: bit `i` set when corner `i` is strictly above
/// `threshold`.
#[inline]
pub fn tile_index(corners: &[f32; 4], threshold: f32) -> u8 {
  corners
    .iter()
    .enumerate()
    .fold(0u8, |mask, (i, &v)| mask | (u8::from(v > threshold) << i))
}

#[cfg(test)]
#[path = "tile_index_test.rs"]
mod tile_index_test;
