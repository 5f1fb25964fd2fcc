use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::adaptive::LeafSelection;
use crate::config::PackedSection;
use crate::error::MaskMeshError;

fn half_filled(side: u32) -> Grid<f32> {
  Grid::from_fn(side, side, |x, _| if x < side / 2 { 1.0 } else { 0.0 })
}

#[test]
fn test_full_grid_default_config() {
  let grid = Grid::new(4, 4, vec![1.0f32; 16]).unwrap();
  let generated = regenerate(&grid, &GeneratorConfig::default()).unwrap();

  assert_eq!(generated.mask.occupied_count(), 16);
  assert!(generated.tree.root().is_leaf());
  assert_eq!(generated.tree.root().value(), 1);
  assert_eq!(generated.march_stats.full, 9);
  assert_eq!(generated.mesh.triangle_count(), 18);
  assert!(generated.packed.is_none());
  assert!(generated.quad_mesh.is_none());
}

#[test]
fn test_packed_tree_sums_mask() {
  let mut rng = StdRng::seed_from_u64(21);
  let grid = Grid::from_fn(8, 8, |_, _| rng.random::<f32>());
  let config = GeneratorConfig {
    packed: Some(PackedSection { height: 3 }),
    ..Default::default()
  };
  let generated = regenerate(&grid, &config).unwrap();
  let packed = generated.packed.as_ref().unwrap();

  assert_eq!(packed.root().value as usize, generated.mask.occupied_count());
  assert_eq!(packed.leaf_nodes().len(), 16);
}

#[test]
fn test_packed_tree_requires_power_of_two() {
  let grid = Grid::new(6, 6, vec![0.0f32; 36]).unwrap();
  let config = GeneratorConfig {
    packed: Some(PackedSection { height: 2 }),
    ..Default::default()
  };
  assert_eq!(
    regenerate(&grid, &config).unwrap_err(),
    MaskMeshError::NonPowerOfTwoSide { side: 6 }
  );
}

#[test]
fn test_leaf_quads_for_empty_regions() {
  let mut config = GeneratorConfig::default();
  config.adaptive.leaf_quads = Some(LeafSelection::Empty);
  let generated = regenerate(&half_filled(8), &config).unwrap();

  // Left half collapses into two full leaves, right half into two empty ones.
  let quads = generated.quad_mesh.unwrap();
  assert_eq!(quads.triangle_count(), 4);
  assert_eq!(quads.bounds().min.x, 4.0);
  assert_eq!(quads.bounds().max.x, 8.0);
}

#[test]
fn test_field_sources_agree_on_masks() {
  let grid = half_filled(16);
  let mut config = GeneratorConfig::default();

  config.marching_squares.source = FieldSource::Mask;
  let from_mask = regenerate(&grid, &config).unwrap();
  config.marching_squares.source = FieldSource::Adaptive;
  let from_tree = regenerate(&grid, &config).unwrap();

  assert_eq!(from_mask.march_stats, from_tree.march_stats);
  assert_eq!(from_mask.mesh.positions(), from_tree.mesh.positions());
}

#[test]
fn test_disabled_extraction() {
  let mut config = GeneratorConfig::default();
  config.marching_squares.source = FieldSource::Disabled;
  let generated = regenerate(&half_filled(4), &config).unwrap();

  assert!(generated.mesh.is_empty());
  assert_eq!(generated.march_stats, MarchStats::default());
}

#[test]
fn test_rejects_invalid_config() {
  let config = GeneratorConfig {
    mask_threshold: 2.0,
    ..Default::default()
  };
  assert!(matches!(
    regenerate(&half_filled(4), &config),
    Err(MaskMeshError::ParameterOutOfRange { name: "mask_threshold", .. })
  ));
}

#[test]
fn test_non_square_grid_without_packed_tree() {
  let grid = Grid::from_fn(6, 3, |x, y| if x + y > 3 { 1.0 } else { 0.0 });
  let generated = regenerate(&grid, &GeneratorConfig::default()).unwrap();

  assert_eq!(generated.tree.size(), 8.0);
  assert_eq!(generated.march_stats.windows, 5 * 2);
  assert!(generated.mesh.indices().iter().all(|&i| (i as usize) < generated.mesh.vertex_count()));
}

#[test]
fn test_tree_side() {
  assert_eq!(tree_side(0, 0), 1);
  assert_eq!(tree_side(5, 3), 8);
  assert_eq!(tree_side(16, 16), 16);
}

#[test]
fn test_mask_clear_border_closes_full_grid() {
  let grid = Grid::new(6, 6, vec![1.0f32; 36]).unwrap();
  let config = GeneratorConfig {
    mask_clear_border: true,
    ..Default::default()
  };
  let generated = regenerate(&grid, &config).unwrap();

  assert_eq!(generated.mask.occupied_count(), 16);
  assert_eq!(generated.mask.get(0, 3), Some(&0));
  assert_eq!(generated.mask.get(5, 5), Some(&0));
  assert_eq!(generated.mask.get(2, 2), Some(&1));
  // Only the occupied interior feeds the adaptive tree.
  assert_eq!(generated.tree.leaves().map(|n| n.cells().len()).sum::<usize>(), 16);
}
