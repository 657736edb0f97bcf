use super::*;

fn quad_mesh() -> Mesh<f32> {
  // Two triangles covering the unit square in the z = 0 plane
  let corners = [
    (4usize, [0.0f32, 0.0, 0.0]),
    (9, [1.0, 0.0, 0.0]),
    (17, [1.0, 1.0, 0.0]),
    (30, [0.0, 1.0, 0.0]),
  ];
  let up = vec3::Vec3::new(0.0, 0.0, 1.0);

  let mut vertices = BTreeMap::new();
  for (export_id, (id, p)) in corners.iter().enumerate() {
    let mut vertex = Vertex::new(*id, vec3::Vec3::from_array(*p), up);
    vertex.export_id = export_id + 1;
    vertices.insert(*id, vertex);
  }

  let triangles = vec![
    Triangle {
      id: 0,
      vertex_ids: [4, 9, 17],
      normal: up,
    },
    Triangle {
      id: 1,
      vertex_ids: [4, 17, 30],
      normal: up,
    },
  ];

  Mesh {
    vertices,
    triangles,
    stats: PolygonizeStats::default(),
  }
}

#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::empty();
  assert!(!aabb.is_valid());

  aabb.encapsulate([1.0, 2.0, 3.0]);
  aabb.encapsulate([-1.0, -2.0, -3.0]);

  assert!(aabb.is_valid());
  assert_eq!(aabb.min, [-1.0, -2.0, -3.0]);
  assert_eq!(aabb.max, [1.0, 2.0, 3.0]);
  assert_eq!(aabb.center(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_mesh_config_builder() {
  let config = MeshConfig::<f64>::new()
    .with_iso_value(0.5)
    .with_parallel(false)
    .with_average_normals(false);

  assert_eq!(config.iso_value, 0.5);
  assert!(!config.parallel);
  assert!(!config.average_normals);

  let default = MeshConfig::<f32>::default();
  assert_eq!(default.iso_value, 0.0);
  assert!(default.parallel);
  assert!(default.average_normals);
}

#[test]
fn test_vertex_starts_unassigned() {
  let v = Vertex::new(7, vec3::Vec3::splat(1.0f32), vec3::Vec3::ZERO);
  assert_eq!(v.id, 7);
  assert_eq!(v.export_id, 0);
  assert_eq!(v.shared_triangles, 0);
}

#[test]
fn test_mesh_export_ids() {
  let mesh = quad_mesh();
  assert_eq!(mesh.vertex_count(), 4);
  assert_eq!(mesh.triangle_count(), 2);
  assert!(!mesh.is_empty());

  assert_eq!(mesh.export_ids(&mesh.triangles[0]), Some([1, 2, 3]));
  assert_eq!(mesh.export_ids(&mesh.triangles[1]), Some([1, 3, 4]));
  assert_eq!(mesh.vertex(17).map(|v| v.export_id), Some(3));
  assert!(mesh.vertex(5).is_none());
}

#[test]
fn test_to_indexed() {
  let indexed = quad_mesh().to_indexed();

  assert!(!indexed.is_empty());
  assert_eq!(indexed.positions.len(), 4);
  assert_eq!(indexed.normals.len(), 4);
  assert_eq!(indexed.indices, vec![0, 1, 2, 0, 2, 3]);
  assert_eq!(indexed.triangle_count(), 2);

  assert_eq!(indexed.bounds.min, [0.0, 0.0, 0.0]);
  assert_eq!(indexed.bounds.max, [1.0, 1.0, 0.0]);

  // Counter-clockwise seen from +z
  assert!(indexed.face_normal(0).z > 0.0);
  assert!(indexed.face_normal(1).z > 0.0);
  assert!((indexed.area() - 1.0).abs() < 1e-6);
}

#[test]
fn test_empty_mesh_to_indexed() {
  let mesh = Mesh::<f32> {
    vertices: BTreeMap::new(),
    triangles: Vec::new(),
    stats: PolygonizeStats::default(),
  };
  assert!(mesh.is_empty());

  let indexed = mesh.to_indexed();
  assert!(indexed.is_empty());
  assert_eq!(indexed.triangle_count(), 0);
  assert_eq!(indexed.area(), 0.0);
}
