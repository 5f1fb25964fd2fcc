//! Parallel regenerate over independent grids.

use rayon::prelude::*;

use super::process::{regenerate, Generated};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::types::Grid;

/// Regenerate several grids in parallel using rayon.
///
/// Results keep input order. One failing grid does not stop the others.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::regenerate_batch"))]
pub fn regenerate_batch(grids: &[Grid<f32>], config: &GeneratorConfig) -> Vec<Result<Generated>> {
  if grids.is_empty() {
    return Vec::new();
  }

  grids.par_iter().map(|grid| regenerate(grid, config)).collect()
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;
