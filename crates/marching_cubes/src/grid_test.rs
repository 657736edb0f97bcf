use super::*;

fn unit_grid(cells: usize) -> Grid<f64> {
  Grid::cube(cells, 1, 0.0, 1.0).unwrap()
}

#[test]
fn test_rejects_invalid_grids() {
  let min = Vec3::splat(0.0f32);
  let max = Vec3::splat(1.0f32);

  assert!(matches!(
    Grid::new([0, 4, 4], 1, min, max),
    Err(MeshError::InvalidGrid(_))
  ));
  assert!(matches!(
    Grid::new([4, 4, 4], 0, min, max),
    Err(MeshError::InvalidGrid(_))
  ));
  assert!(matches!(
    Grid::new([4, 4, 4], 1, max, min),
    Err(MeshError::InvalidGrid(_))
  ));
  assert!(matches!(
    Grid::new([4, 4, 4], 1, min, Vec3::new(1.0, f32::NAN, 1.0)),
    Err(MeshError::InvalidGrid(_))
  ));
}

#[test]
fn test_dims_and_size() {
  let grid = Grid::new([2, 3, 4], 1, Vec3::splat(0.0f64), Vec3::splat(1.0)).unwrap();
  assert_eq!(grid.cells(), [2, 3, 4]);
  assert_eq!(grid.padding(), 1);
  assert_eq!(grid.dims(), [4, 5, 6]);
  assert_eq!(grid.size(), 120);
}

#[test]
fn test_index_is_row_major_k_fastest() {
  let grid = Grid::new([2, 3, 4], 1, Vec3::splat(0.0f64), Vec3::splat(1.0)).unwrap();
  assert_eq!(grid.index(-1, -1, -1), 0);
  assert_eq!(grid.index(-1, -1, 0), 1);
  assert_eq!(grid.index(-1, 0, -1), 6);
  assert_eq!(grid.index(0, -1, -1), 30);
  assert_eq!(grid.index(0, 0, 0), 37);
  assert_eq!(grid.index(2, 3, 4), grid.size() - 1);
}

#[test]
fn test_contains() {
  let shape = LatticeShape::new([2, 2, 2], 1);
  assert!(shape.contains(-1, -1, -1));
  assert!(shape.contains(2, 2, 2));
  assert!(!shape.contains(-2, 0, 0));
  assert!(!shape.contains(0, 3, 0));
}

#[test]
fn test_for_each_point_visits_in_index_order() {
  let shape = LatticeShape::new([1, 2, 1], 1);
  let mut expected = 0;
  shape.for_each_point(|i, j, k| {
    assert_eq!(shape.index(i, j, k), expected);
    expected += 1;
  });
  assert_eq!(expected, shape.size());
}

#[test]
fn test_positions_are_cell_centred() {
  let grid = unit_grid(4);
  assert_eq!(grid.dx(), Vec3::splat(0.25));
  assert!(grid.position(0, 0, 0).approx_eq(Vec3::splat(0.125)));
  assert!(grid.position(3, 1, 2).approx_eq(Vec3::new(0.875, 0.375, 0.625)));
  assert!(grid.position(-1, 4, 0).approx_eq(Vec3::new(-0.125, 1.125, 0.125)));
}

#[test]
fn test_anisotropic_spacing() {
  let grid = Grid::new(
    [2, 4, 8],
    2,
    Vec3::new(-1.0f64, 0.0, 0.0),
    Vec3::new(1.0, 2.0, 1.0),
  )
  .unwrap();
  assert!(grid.dx().approx_eq(Vec3::new(1.0, 0.5, 0.125)));
  assert!(grid.position(0, 0, 0).approx_eq(Vec3::new(-0.5, 0.25, 0.0625)));
}

#[test]
fn test_ranges() {
  let grid = unit_grid(4);
  assert_eq!(grid.working_range(0), 0..4);
  assert_eq!(grid.lattice_range(1), -1..5);
  // Cube origins from -pad to cells + pad - 2 inclusive
  assert_eq!(grid.cube_range(2), -1..4);
  assert_eq!(grid.cube_count(), 125);

  // Outermost ghost layer is not sampled
  assert_eq!(grid.sampled_range(0), 0..4);
  let wide = Grid::cube(4, 2, 0.0, 1.0).unwrap();
  assert_eq!(wide.sampled_range(1), -1..5);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_rejects_points_outside_lattice() {
  // k = 5 would alias the next j row without the check
  let shape = LatticeShape::new([4, 4, 4], 1);
  shape.index(0, 0, 5);
}

#[test]
fn test_cube_vertex_ids_follow_corner_offsets() {
  let grid = unit_grid(4);
  let ids = grid.cube_vertex_ids(1, 2, 0);

  for (corner, [di, dj, dk]) in CORNER_OFFSETS.iter().enumerate() {
    assert_eq!(
      ids[corner],
      grid.index(1 + *di as isize, 2 + *dj as isize, *dk as isize)
    );
  }
}

#[test]
fn test_cube_corners_gathers_fields() {
  let grid = unit_grid(3);
  let shape = grid.shape();
  let scalars = ScalarField::from_fn(shape, |i, j, k| (i * 100 + j * 10 + k) as f64);
  let normals = NormalField::from_fn(shape, |i, j, k| Vec3::new(i as f64, j as f64, k as f64));

  let corners = grid.cube_corners(0, 1, 2, &scalars, &normals);

  assert_eq!(corners.scalars[0], 12.0);
  assert_eq!(corners.scalars[6], 123.0);
  assert_eq!(corners.normals[3], Vec3::new(0.0, 2.0, 2.0));
  assert!(corners.positions[5].approx_eq(grid.position(1, 1, 3)));
}
