use std::collections::HashMap;

use super::*;
use crate::field::{compute_normals, FieldShape, NormalOrientation};
use crate::vec3::Vec3;

struct Scene {
  grid: Grid<f64>,
  scalars: ScalarField<f64>,
  normals: NormalField<f64>,
}

fn scene(cells: usize, shape: FieldShape<f64>, orientation: NormalOrientation) -> Scene {
  let grid = Grid::cube(cells, 1, 0.0, 1.0).unwrap();
  let scalars = ScalarField::from_shape(&grid, &shape);
  let normals = compute_normals(&grid, &scalars, orientation).unwrap();
  Scene {
    grid,
    scalars,
    normals,
  }
}

fn sphere_scene(cells: usize) -> Scene {
  scene(cells, FieldShape::unit_sphere(), NormalOrientation::Ascending)
}

fn extract(scene: &Scene, config: &MeshConfig<f64>) -> Mesh<f64> {
  polygonize(&scene.grid, &scene.scalars, &scene.normals, config).unwrap()
}

fn serial() -> MeshConfig<f64> {
  MeshConfig::new().with_parallel(false)
}

/// Number of triangles using each undirected edge.
fn edge_use_counts<T>(triangles: &[Triangle<T>]) -> HashMap<(EdgeId, EdgeId), usize> {
  let mut edges = HashMap::new();
  for triangle in triangles {
    let [a, b, c] = triangle.vertex_ids;
    for (p, q) in [(a, b), (b, c), (c, a)] {
      *edges.entry((p.min(q), p.max(q))).or_default() += 1;
    }
  }
  edges
}

fn is_closed<T>(mesh: &Mesh<T>) -> bool {
  edge_use_counts(&mesh.triangles).values().all(|&count| count == 2)
}

#[test]
fn test_iso_outside_range_is_empty() {
  let scene = sphere_scene(8);

  for iso in [-1.0, 10.0] {
    let mesh = extract(&scene, &serial().with_iso_value(iso));
    assert!(mesh.is_empty());
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.stats.active_cubes, 0);
    assert_eq!(mesh.stats.cubes_scanned, scene.grid.cube_count() as u64);
  }
}

#[test]
fn test_serial_and_parallel_match() {
  let scene = sphere_scene(16);
  let a = extract(&scene, &serial());
  let b = extract(&scene, &serial().with_parallel(true));

  assert_eq!(a.vertices, b.vertices);
  assert_eq!(a.triangles, b.triangles);

  let (mut sa, mut sb) = (a.stats.clone(), b.stats.clone());
  sa.elapsed_us = 0;
  sb.elapsed_us = 0;
  assert_eq!(sa, sb);
}

#[test]
fn test_triangle_count_matches_per_cube_sum() {
  let mesh = extract(&sphere_scene(12), &MeshConfig::new());

  assert!(!mesh.is_empty());
  assert_eq!(mesh.triangle_count() as u64, mesh.stats.triangles);
  for (n, triangle) in mesh.triangles.iter().enumerate() {
    assert_eq!(triangle.id, n);
  }
}

#[test]
fn test_vertex_bounds_and_dedup_counters() {
  let mesh = extract(&sphere_scene(12), &MeshConfig::new());
  let stats = &mesh.stats;

  assert!(mesh.vertex_count() as u64 <= 12 * stats.active_cubes);
  assert_eq!(stats.unique_vertices, mesh.vertex_count() as u64);
  assert_eq!(stats.vertex_records, 3 * stats.triangles);
  assert_eq!(
    stats.unique_vertices + stats.duplicate_vertices,
    stats.vertex_records
  );
  assert!(stats.sharing_ratio() > 0.5);
}

#[test]
fn test_export_ids_follow_edge_id_order() {
  let mesh = extract(&sphere_scene(8), &MeshConfig::new());

  let mut previous = 0;
  for (n, (&id, vertex)) in mesh.vertices.iter().enumerate() {
    assert_eq!(vertex.id, id);
    assert_eq!(vertex.export_id, n + 1);
    assert!(id > previous || n == 0);
    previous = id;
  }
}

#[test]
fn test_averaged_normals_are_unit() {
  let mesh = extract(&sphere_scene(16), &MeshConfig::new());

  for vertex in mesh.vertices.values() {
    assert!(vertex.shared_triangles > 0);
    let length = vertex.normal.magnitude();
    assert!((length - 1.0).abs() < 1e-4, "normal length {}", length);
  }
}

#[test]
fn test_interpolated_normals_are_normalized_without_averaging() {
  let mesh = extract(&sphere_scene(10), &MeshConfig::new().with_average_normals(false));

  for vertex in mesh.vertices.values() {
    assert_eq!(vertex.shared_triangles, 0);
    assert!((vertex.normal.magnitude() - 1.0).abs() < 1e-4);
  }
}

#[test]
fn test_sphere_is_closed_genus_zero() {
  for cells in [8, 10, 16] {
    let mesh = extract(&sphere_scene(cells), &MeshConfig::new());
    let v = mesh.vertex_count();
    let f = mesh.triangle_count();
    assert_eq!(f, 2 * v - 4, "{} cells: V = {}, F = {}", cells, v, f);
    assert!(is_closed(&mesh));
  }
}

#[test]
fn test_sphere_in_single_precision() {
  let grid = Grid::<f32>::cube(16, 1, 0.0, 1.0).unwrap();
  let scalars = ScalarField::from_shape(&grid, &FieldShape::unit_sphere());
  let normals = compute_normals(&grid, &scalars, NormalOrientation::Ascending).unwrap();
  let mesh = polygonize(&grid, &scalars, &normals, &MeshConfig::new()).unwrap();

  let v = mesh.vertex_count();
  let f = mesh.triangle_count();
  assert!(v > 0);
  assert_eq!(f, 2 * v - 4, "V = {}, F = {}", v, f);
  assert!(is_closed(&mesh));

  let center = Vec3::splat(0.5f32);
  for vertex in mesh.vertices.values() {
    assert!((vertex.normal.magnitude() - 1.0).abs() < 1e-4);
    assert!(vertex.normal.dot((vertex.position - center).normalize()) > 0.9);
  }

  // Same topology as the double precision run
  let double = extract(&sphere_scene(16), &MeshConfig::new());
  assert_eq!(v, double.vertex_count());
  assert_eq!(f, double.triangle_count());
}

#[test]
fn test_sphere_normals_point_outward() {
  let mesh = extract(&sphere_scene(16), &MeshConfig::new());
  let center = Vec3::splat(0.5);

  for vertex in mesh.vertices.values() {
    let radial = (vertex.position - center).normalize();
    assert!(vertex.normal.dot(radial) > 0.9);
  }
}

#[test]
fn test_sphere_vertices_lie_near_surface() {
  let mesh = extract(&sphere_scene(16), &MeshConfig::new());
  let center = Vec3::splat(0.5);

  for vertex in mesh.vertices.values() {
    let r = (vertex.position - center).magnitude();
    assert!((r - 0.25).abs() < 1.0 / 16.0, "vertex at radius {}", r);
  }
}

#[test]
fn test_winding_faces_decreasing_scalar() {
  // Inside of the sphere holds the lower values
  let mesh = extract(&sphere_scene(10), &MeshConfig::new());
  let indexed = mesh.to_indexed();
  let center = glam::Vec3::splat(0.5);

  for n in 0..indexed.triangle_count() {
    let tri = &indexed.indices[n * 3..n * 3 + 3];
    let centroid = tri
      .iter()
      .map(|&i| glam::Vec3::from_array(indexed.positions[i as usize]))
      .sum::<glam::Vec3>()
      / 3.0;
    assert!(indexed.face_normal(n).dot(centroid - center) < 0.0);
  }
}

#[test]
fn test_default_orientation_agrees_with_winding() {
  // Both face the lower scalar side: into the sphere
  let scene = scene(16, FieldShape::unit_sphere(), NormalOrientation::default());
  let indexed = extract(&scene, &MeshConfig::new()).to_indexed();
  let center = glam::Vec3::splat(0.5);

  for (position, normal) in indexed.positions.iter().zip(&indexed.normals) {
    let radial = (glam::Vec3::from_array(*position) - center).normalize();
    assert!(glam::Vec3::from_array(*normal).dot(radial) < -0.9);
  }
  for n in 0..indexed.triangle_count() {
    let tri = &indexed.indices[n * 3..n * 3 + 3];
    let centroid = tri
      .iter()
      .map(|&i| glam::Vec3::from_array(indexed.positions[i as usize]))
      .sum::<glam::Vec3>()
      / 3.0;
    assert!(indexed.face_normal(n).dot(centroid - center) < 0.0);
  }
}

#[test]
fn test_dam_break_column_is_closed() {
  // The column touches three domain walls; the zero outer ghost layer caps it
  let scene = scene(10, FieldShape::unit_dam(), NormalOrientation::Descending);
  let config = MeshConfig::new().with_iso_value(0.5);
  let mesh = extract(&scene, &config);

  assert_eq!(mesh.vertex_count(), 32);
  assert_eq!(mesh.triangle_count(), 60);
  assert!(is_closed(&mesh));

  // A step field crosses every edge halfway
  let bounds = mesh.to_indexed().bounds;
  assert!(bounds.max[0] <= 0.2 + 1e-6);
  assert!(bounds.max[1] <= 0.3 + 1e-6);
  assert!(bounds.min.iter().all(|&c| c.abs() < 1e-6));

  let serial = extract(&scene, &config.with_parallel(false));
  assert_eq!(mesh.triangles, serial.triangles);
}

#[test]
fn test_field_size_mismatch() {
  let scene = sphere_scene(8);
  let other = Grid::cube(9, 1, 0.0, 1.0).unwrap();

  let err = polygonize(&other, &scene.scalars, &scene.normals, &MeshConfig::new()).unwrap_err();
  assert!(matches!(
    err,
    crate::error::MeshError::FieldSizeMismatch { field: "scalar", .. }
  ));

  let normals = NormalField::new(other.shape());
  let err = polygonize(&scene.grid, &scene.scalars, &normals, &MeshConfig::new()).unwrap_err();
  assert!(matches!(
    err,
    crate::error::MeshError::FieldSizeMismatch { field: "normal", .. }
  ));
}

#[test]
fn test_assembler_dedups_shared_edges() {
  use crate::cube::CubeCorners;
  use crate::tables::CORNER_OFFSETS;

  let positions = CORNER_OFFSETS.map(|[x, y, z]| Vec3::new(x as f64, y as f64, z as f64));
  let corners = CubeCorners {
    positions,
    normals: [Vec3::new(0.0, 1.0, 0.0); 8],
    scalars: [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0],
  };

  let mut assembler = MeshAssembler::new();
  let first = march_cube(&corners, &std::array::from_fn(|e| e), 0, 0.5);
  assembler.add_cube(first);
  assert_eq!(assembler.next_triangle_id(), 2);

  // Same edge ids again: every vertex already exists
  let second = march_cube(&corners, &std::array::from_fn(|e| e), 2, 0.5);
  assembler.add_cube(second);
  assert_eq!(assembler.stats().duplicate_vertices, 2 + 6);

  let mesh = assembler.finish(true);
  assert_eq!(mesh.vertex_count(), 4);
  assert_eq!(mesh.triangle_count(), 4);
  assert_eq!(mesh.stats.unique_vertices, 4);
}

#[test]
fn test_merge_slab_offsets_ids() {
  let scene = sphere_scene(8);
  let resolver = EdgeIdResolver::new(scene.grid.size(), scene.grid.size()).unwrap();

  let slabs: Vec<Slab<f64>> = scene
    .grid
    .cube_range(0)
    .map(|i| scan_slab(&scene.grid, &scene.scalars, &scene.normals, &resolver, 0.0, i))
    .collect();

  let mut assembler = MeshAssembler::new();
  let mut expected_start = 0;
  for slab in slabs {
    assert_eq!(assembler.next_triangle_id(), expected_start);
    if let Some(first) = slab.cubes.first() {
      assert_eq!(first.triangles[0].id, 0);
    }
    expected_start += slab.triangle_count();
    assembler.merge_slab(slab);
  }

  let mesh = assembler.finish(true);
  assert_eq!(mesh.triangle_count(), expected_start);
}

#[test]
#[should_panic(expected = "triangle list and id counter diverged")]
fn test_finish_detects_counter_drift() {
  let mut assembler = MeshAssembler::<f64>::new();
  assembler.triangle_counter = 3;
  assembler.finish(true);
}
