//! Threshold crossing along a window edge.

use crate::constants::NEUTRAL_EDGE_FRACTION;

/// Fraction along `v0 → v1` where the field crosses `threshold`.
///
/// Not clamped: for the edges a case actually uses, `v0` and `v1` lie on
/// opposite sides of the threshold and the result is already in [0, 1].
/// Equal endpoints (or any non-finite result) fall back to the midpoint.
#[inline]
pub fn edge_fraction(v0: f32, v1: f32, threshold: f32) -> f32 {
  let denom = v1 - v0;
  if denom == 0.0 {
    return NEUTRAL_EDGE_FRACTION;
  }
  let t = (threshold - v0) / denom;
  if t.is_finite() {
    t
  } else {
    NEUTRAL_EDGE_FRACTION
  }
}

/// Pull a fraction toward the midpoint.
///
/// `power = 1` keeps the linear estimate, `power = 0` always returns the
/// midpoint (blocky contours).
#[inline]
pub fn blend(t: f32, power: f32) -> f32 {
  NEUTRAL_EDGE_FRACTION + (t - NEUTRAL_EDGE_FRACTION) * power
}

/// [`edge_fraction`] followed by [`blend`].
#[inline]
pub fn crossing(v0: f32, v1: f32, threshold: f32, power: f32) -> f32 {
  blend(edge_fraction(v0, v1, threshold), power)
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
