use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

fn tree(height: u32) -> PackedQuadTree {
  PackedQuadTree::new(Vec2::ZERO, 128.0, height).unwrap()
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn test_node_and_leaf_counts() {
  for height in 1..=6 {
    let t = tree(height);
    let expected: usize = (0..height).map(|i| 4usize.pow(i)).sum();
    assert_eq!(t.node_count(), expected, "Node count at height {}", height);
    assert_eq!(t.leaf_nodes().len(), 4usize.pow(height - 1), "Leaf count at height {}", height);
    assert!(t.leaf_nodes().iter().all(|n| t.is_leaf(n)));
  }
}

#[test]
fn test_zero_height_rejected() {
  assert_eq!(
    PackedQuadTree::new(Vec2::ZERO, 128.0, 0).unwrap_err(),
    MaskMeshError::ZeroHeight
  );
}

#[test]
fn test_excessive_height_rejected() {
  let err = PackedQuadTree::new(Vec2::ZERO, 128.0, MAX_PACKED_HEIGHT + 1).unwrap_err();
  assert!(matches!(err, MaskMeshError::HeightTooLarge { .. }));
}

#[test]
fn test_node_geometry() {
  let t = PackedQuadTree::new(Vec2::new(-64.0, -64.0), 128.0, 3).unwrap();

  for node in t.nodes() {
    let expected_size = 128.0 / 2f32.powi(node.depth as i32);
    assert_eq!(node.size, expected_size);
    assert_eq!(t.nodes()[node.index].index, node.index);
  }

  // Node 4 is the upper-right quadrant of the root.
  assert_eq!(t.nodes()[4].position, Vec2::new(0.0, 0.0));
  // Node 20 is the upper-right quadrant of node 4.
  assert_eq!(t.nodes()[20].position, Vec2::new(32.0, 32.0));
  assert_eq!(t.nodes()[20].size, 32.0);
}

#[test]
fn test_cell_counts_per_depth() {
  let t = tree(3);
  let expect = [(0, 16, 4), (4, 4, 2), (20, 1, 1)];
  for (index, cells, per_side) in expect {
    let node = t.node(index).unwrap();
    assert_eq!(t.number_of_cells(node), cells);
    assert_eq!(t.number_of_cells_per_side(node), per_side);
  }
}

// =========================================================================
// Relations
// =========================================================================

#[test]
fn test_children_and_parent() {
  let t = tree(3);
  let children: Vec<usize> = t.children(0).unwrap().iter().map(|n| n.index).collect();
  assert_eq!(children, vec![1, 2, 3, 4]);
  assert!(t.children(20).unwrap().is_empty());
  assert_eq!(t.parent(20).unwrap().map(|n| n.index), Some(4));
  assert_eq!(t.parent(0).unwrap(), None);
  assert!(t.children(21).is_err());
}

#[test]
fn test_all_parent_nodes_order() {
  let t = tree(3);
  let last = t.node_count() - 1;
  let parents = t.all_parent_nodes(last).unwrap();

  assert_eq!(parents.len(), 2);
  assert_eq!(parents[0].index, 4, "Immediate parent first");
  assert_eq!(parents[1].index, 0, "Root last");
}

#[test]
fn test_ancestor_chain_length_equals_depth() {
  let t = tree(4);
  for node in t.nodes() {
    assert_eq!(t.ancestors(node.index).count(), node.depth as usize);
  }
  assert_eq!(t.ancestors(10_000).count(), 0);
}

// =========================================================================
// Insertion
// =========================================================================

#[test]
fn test_insert_last_leaf_height_two() {
  let mut t = tree(2);
  let last = t.node_count() - 1;
  t.insert_value(1, last).unwrap();

  let leaf = *t.node(4).unwrap();
  assert_eq!(leaf.value, 1);
  assert!(t.is_full(&leaf));

  // The root sums its leaves but is only a quarter loaded.
  let root = *t.root();
  assert_eq!(root.value, 1);
  assert!(!t.is_full(&root));
  assert_eq!(t.normalized_value(&root), 0.25);
}

#[test]
fn test_normalized_values_height_three() {
  let mut t = tree(3);
  for leaf in 17..=20 {
    t.insert_value(1, leaf).unwrap();
  }

  assert_eq!(t.normalized_value(t.node(20).unwrap()), 1.0);
  assert_eq!(t.normalized_value(t.node(4).unwrap()), 1.0);
  assert_eq!(t.normalized_value(t.root()), 0.25);
  assert!(t.is_empty(t.node(1).unwrap()));
}

#[test]
fn test_insert_rejects_branch() {
  let mut t = tree(3);
  let err = t.insert_value(1, 4).unwrap_err();
  assert_eq!(
    err,
    MaskMeshError::NotALeaf {
      index: 4,
      depth: 1,
      height: 3
    }
  );
  assert_eq!(t.root().value, 0, "Failed insert must not mutate");
}

#[test]
fn test_insert_rejects_out_of_range() {
  let mut t = tree(2);
  assert!(matches!(
    t.insert_value(1, 5),
    Err(MaskMeshError::NodeIndexOutOfRange { index: 5, len: 5 })
  ));
}

#[test]
fn test_reinsert_replaces_leaf_value() {
  let mut t = tree(2);
  t.insert_value(2, 3).unwrap();
  t.insert_value(5, 3).unwrap();
  assert_eq!(t.node(3).unwrap().value, 5);
  assert_eq!(t.root().value, 5);
}

#[test]
fn test_branch_values_are_leaf_sums() {
  let mut rng = StdRng::seed_from_u64(7);
  let mut t = tree(4);
  for leaf in t.leaf_start()..t.node_count() {
    t.insert_value(rng.random_range(0..10), leaf).unwrap();
  }

  for index in 0..t.leaf_start() {
    let sum: i32 = t.children(index).unwrap().iter().map(|c| c.value).sum();
    assert_eq!(t.nodes()[index].value, sum, "Node {} is not the sum of its children", index);
  }
}

// =========================================================================
// Leaf coordinates
// =========================================================================

#[test]
fn test_coordinate_of_last_leaf() {
  let expect = [(1, (0, 0)), (2, (1, 1)), (3, (3, 3))];
  for (height, coord) in expect {
    let t = tree(height);
    let last = t.node_count() - 1;
    assert_eq!(t.coordinate_of_leaf(last).unwrap(), coord, "Height {}", height);
  }
}

#[test]
fn test_coordinate_roundtrip() {
  let t = tree(4);
  for leaf in t.leaf_start()..t.node_count() {
    let (x, y) = t.coordinate_of_leaf(leaf).unwrap();
    assert_eq!(t.leaf_at_coordinate(x, y).unwrap(), leaf);
  }
  assert!(t.leaf_at_coordinate(8, 0).is_err());
  assert!(t.coordinate_of_leaf(0).is_err());
}

// =========================================================================
// Map insertion
// =========================================================================

#[test]
fn test_insert_values_from_map_block_sums() {
  #[rustfmt::skip]
  let map = Grid::new(4, 4, vec![
    1, 1, 0, 0,
    1, 0, 0, 0,
    0, 0, 1, 1,
    0, 0, 1, 1,
  ]).unwrap();

  let mut t = tree(2);
  t.insert_values_from_map(&map).unwrap();

  let leaf_values: Vec<i32> = t.leaf_nodes().iter().map(|n| n.value).collect();
  assert_eq!(leaf_values, vec![3, 0, 0, 4]);
  assert_eq!(t.root().value, 7);
}

#[test]
fn test_insert_values_from_map_total_is_preserved() {
  let mut rng = StdRng::seed_from_u64(42);
  let map = Grid::from_fn(16, 16, |_, _| i32::from(rng.random::<bool>()));

  let mut t = tree(3);
  t.insert_values_from_map(&map).unwrap();
  assert_eq!(t.root().value as usize, map.occupied_count());
}

#[test]
fn test_insert_values_from_map_rejects_bad_grids() {
  let mut t = tree(3);

  let non_square = Grid::new(4, 2, vec![0; 8]).unwrap();
  assert_eq!(
    t.insert_values_from_map(&non_square).unwrap_err(),
    MaskMeshError::NonSquareGrid { width: 4, height: 2 }
  );

  let non_pow2 = Grid::new(6, 6, vec![0; 36]).unwrap();
  assert_eq!(
    t.insert_values_from_map(&non_pow2).unwrap_err(),
    MaskMeshError::NonPowerOfTwoSide { side: 6 }
  );

  let too_small = Grid::new(2, 2, vec![0; 4]).unwrap();
  assert_eq!(
    t.insert_values_from_map(&too_small).unwrap_err(),
    MaskMeshError::GridTooSmall {
      side: 2,
      leaves_per_side: 4
    }
  );
}

/// Sum of map cells inside the node's square, for a tree whose world size
/// equals the map side.
fn map_sum_under(map: &Grid<i32>, node: &PackedNode) -> i32 {
  let lo = node.position.as_uvec2();
  let side = node.size as u32;
  let mut sum = 0;
  for y in lo.y..lo.y + side {
    for x in lo.x..lo.x + side {
      sum += map.get(x as i64, y as i64).copied().unwrap_or(0);
    }
  }
  sum
}

#[test]
fn test_leaf_covering_follows_quadrants() {
  let t = PackedQuadTree::new(Vec2::ZERO, 8.0, 3).unwrap();
  assert_eq!(t.leaf_covering(0, 0).unwrap(), 5);
  assert_eq!(t.leaf_covering(2, 0).unwrap(), 9);
  assert_eq!(t.leaf_covering(3, 3).unwrap(), 20);

  for y in 0..4 {
    for x in 0..4 {
      let leaf = t.node(t.leaf_covering(x, y).unwrap()).unwrap();
      assert_eq!(leaf.position, Vec2::new(x as f32 * 2.0, y as f32 * 2.0));
    }
  }
  assert!(t.leaf_covering(4, 0).is_err());
}

#[test]
fn test_map_quadrant_lands_under_matching_branch() {
  let map = Grid::from_fn(8, 8, |x, y| i32::from(x < 4 && y < 4));
  let mut t = PackedQuadTree::new(Vec2::ZERO, 8.0, 3).unwrap();
  t.insert_values_from_map(&map).unwrap();

  let lower_left = *t.node(1).unwrap();
  assert_eq!(lower_left.value, 16);
  assert!(t.is_full(&lower_left));
  for index in 2..=4 {
    assert!(t.is_empty(t.node(index).unwrap()), "Node {} should be empty", index);
  }
}

#[test]
fn test_every_node_sums_the_map_under_it() {
  let mut rng = StdRng::seed_from_u64(11);
  let map = Grid::from_fn(16, 16, |_, _| i32::from(rng.random_bool(0.4)));
  let mut t = PackedQuadTree::new(Vec2::ZERO, 16.0, 4).unwrap();
  t.insert_values_from_map(&map).unwrap();

  for node in t.nodes() {
    assert_eq!(node.value, map_sum_under(&map, node), "Node {} at {}", node.index, node.position);
  }
}

#[test]
fn test_fullness_counts_map_cells_per_leaf() {
  // Each leaf sums a 2x2 block; the lower-left block is only half set.
  #[rustfmt::skip]
  let map = Grid::new(4, 4, vec![
    1, 1, 1, 1,
    0, 0, 1, 1,
    0, 0, 0, 0,
    0, 0, 0, 0,
  ]).unwrap();
  let mut t = PackedQuadTree::new(Vec2::ZERO, 4.0, 2).unwrap();
  t.insert_values_from_map(&map).unwrap();
  assert_eq!(t.leaf_area(), 4);

  let lower_left = *t.node(1).unwrap();
  assert_eq!(lower_left.value, 2);
  assert!(!t.is_full(&lower_left));
  assert_eq!(t.normalized_value(&lower_left), 0.5);

  let lower_right = *t.node(2).unwrap();
  assert!(t.is_full(&lower_right));
  assert_eq!(t.normalized_value(&lower_right), 1.0);
  assert_eq!(t.normalized_value(t.root()), 6.0 / 16.0);
}
