use std::collections::HashSet;

use glam::{Vec2, Vec3};

use super::*;

// Grid tests
#[test]
fn test_grid_rejects_wrong_length() {
  let err = Grid::new(3, 2, vec![0.0f32; 5]).unwrap_err();
  assert_eq!(
    err,
    MaskMeshError::GridSizeMismatch {
      width: 3,
      height: 2,
      len: 5
    }
  );
}

#[test]
fn test_grid_row_major_index() {
  let grid = Grid::from_fn(3, 2, |x, y| (y * 10 + x) as i32);
  assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
  assert_eq!(grid.index(2, 1), 5);
  assert_eq!(grid.get(1, 1), Some(&11));
}

#[test]
fn test_grid_get_out_of_bounds() {
  let grid = Grid::from_fn(2, 2, |_, _| 1.0f32);
  assert_eq!(grid.get(-1, 0), None);
  assert_eq!(grid.get(0, 2), None);
  assert_eq!(grid.get(2, 0), None);
}

#[test]
fn test_to_mask_is_strict() {
  let grid = Grid::new(4, 1, vec![0.2, 0.5, 0.50001, 1.0]).unwrap();
  let mask = grid.to_mask(0.5);
  assert_eq!(mask.as_slice(), &[0, 0, 1, 1]);
}

#[test]
fn test_occupied_cells_row_major() {
  let mask = Grid::new(2, 2, vec![1, 0, 0, 1]).unwrap();
  let cells = mask.occupied_cells();
  assert_eq!(cells.len(), 2);
  assert_eq!((cells[0].x, cells[0].y), (0, 0));
  assert_eq!((cells[1].x, cells[1].y), (1, 1));
  assert_eq!(cells[1].index(), 3);
  assert_eq!(mask.occupied_count(), 2);
}

// Cell tests
#[test]
fn test_cell_index_is_row_major() {
  let cell = Cell::new(3, 2, 8, 1);
  assert_eq!(cell.index(), 2 * 8 + 3);
}

#[test]
fn test_cell_position_is_centred() {
  // 4x4 grid: cell (0,0) centre sits at (-1.5, -1.5)
  assert_eq!(Cell::new(0, 0, 4, 1).position(), Vec2::new(-1.5, -1.5));
  assert_eq!(Cell::new(3, 3, 4, 1).position(), Vec2::new(1.5, 1.5));
}

#[test]
fn test_cell_as_set_key() {
  let mut visited = HashSet::new();
  assert!(visited.insert(Cell::new(1, 1, 4, 1)));
  assert!(!visited.insert(Cell::new(1, 1, 4, 1)));
  assert!(visited.insert(Cell::new(1, 2, 4, 1)));
  assert_eq!(visited.len(), 2);
}

// Quadrant tests
#[test]
fn test_quadrant_order_and_offsets() {
  let offsets: Vec<Vec2> = Quadrant::ALL.iter().map(|q| q.offset()).collect();
  assert_eq!(
    offsets,
    vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)]
  );
  for (i, q) in Quadrant::ALL.iter().enumerate() {
    assert_eq!(Quadrant::from_index(i), Some(*q));
  }
  assert_eq!(Quadrant::from_index(4), None);
}

#[test]
fn test_quadrant_locate_half_open() {
  let origin = Vec2::new(10.0, 20.0);
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(10.0, 20.0)), Some(Quadrant::LowerLeft));
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(12.0, 20.0)), Some(Quadrant::LowerRight));
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(11.9, 22.0)), Some(Quadrant::UpperLeft));
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(13.0, 23.0)), Some(Quadrant::UpperRight));
  // Upper edge is exclusive.
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(14.0, 20.0)), None);
  assert_eq!(Quadrant::locate(origin, 2.0, Vec2::new(9.0, 20.0)), None);
}

// Bounds tests
#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::empty();
  assert!(!aabb.is_valid());
  aabb.encapsulate(Vec3::new(1.0, 2.0, 3.0));
  aabb.encapsulate(Vec3::new(-1.0, -2.0, -3.0));

  assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
  assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
  assert!(aabb.is_valid());
  assert!(aabb.contains(Vec3::ZERO));
  assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
}

#[test]
fn test_empty_aabb_has_zero_size() {
  assert_eq!(MinMaxAABB::default().size(), Vec3::ZERO);
}

#[test]
fn test_fill_border_clears_frame_only() {
  let mut mask = Grid::new(4, 3, vec![1; 12]).unwrap();
  mask.fill_border(0);
  #[rustfmt::skip]
  assert_eq!(mask.as_slice(), &[
    0, 0, 0, 0,
    0, 1, 1, 0,
    0, 0, 0, 0,
  ]);

  let mut single = Grid::new(1, 1, vec![7]).unwrap();
  single.fill_border(0);
  assert_eq!(single.as_slice(), &[0]);
}
