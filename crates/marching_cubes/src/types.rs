//! Core data types for marching cubes meshing.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::metrics::PolygonizeStats;
use crate::vec3::{self, Scalar};

/// Row-major linear index of one lattice point of the padded grid.
pub type GridVertexId = usize;

/// Identifier of one lattice edge, shared by every cube touching it.
pub type EdgeId = usize;

/// Surface vertex placed on a crossed lattice edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex<T> {
  /// Id of the lattice edge this vertex sits on.
  pub id: EdgeId,

  /// 1-based dense index used for export. 0 until the assembler assigns it.
  pub export_id: usize,

  pub position: vec3::Vec3<T>,

  pub normal: vec3::Vec3<T>,

  /// Number of triangles that contributed to `normal` in the averaging pass.
  pub shared_triangles: u32,
}

impl<T: Scalar> Vertex<T> {
  pub fn new(id: EdgeId, position: vec3::Vec3<T>, normal: vec3::Vec3<T>) -> Self {
    Self {
      id,
      export_id: 0,
      position,
      normal,
      shared_triangles: 0,
    }
  }
}

/// Surface triangle referencing its vertices by edge id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle<T> {
  pub id: usize,

  pub vertex_ids: [EdgeId; 3],

  /// Mean of the three interpolated vertex normals at creation time.
  pub normal: vec3::Vec3<T>,
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }

  pub fn center(&self) -> [f32; 3] {
    ((Vec3::from_array(self.min) + Vec3::from_array(self.max)) * 0.5).to_array()
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Globally assembled isosurface.
#[derive(Clone, Debug)]
pub struct Mesh<T> {
  /// Deduplicated vertices keyed by edge id, iterated in ascending id order.
  pub vertices: BTreeMap<EdgeId, Vertex<T>>,

  /// Triangles in scan order; `triangles[n].id == n`.
  pub triangles: Vec<Triangle<T>>,

  pub stats: PolygonizeStats,
}

impl<T: Scalar> Mesh<T> {
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len()
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }

  pub fn vertex(&self, id: EdgeId) -> Option<&Vertex<T>> {
    self.vertices.get(&id)
  }

  /// 1-based export ids of a triangle's corners.
  pub fn export_ids(&self, triangle: &Triangle<T>) -> Option<[usize; 3]> {
    let a = self.vertices.get(&triangle.vertex_ids[0])?.export_id;
    let b = self.vertices.get(&triangle.vertex_ids[1])?.export_id;
    let c = self.vertices.get(&triangle.vertex_ids[2])?.export_id;
    Some([a, b, c])
  }

  /// Flatten into render buffers ordered by export id.
  pub fn to_indexed(&self) -> IndexedMesh {
    let mut output = IndexedMesh::default();
    output.positions.reserve(self.vertices.len());
    output.normals.reserve(self.vertices.len());
    output.indices.reserve(self.triangles.len() * 3);

    for vertex in self.vertices.values() {
      let position = vertex.position.map(T::to_f32).to_array();
      output.positions.push(position);
      output.normals.push(vertex.normal.map(T::to_f32).to_array());
      output.bounds.encapsulate(position);
    }

    for triangle in &self.triangles {
      if let Some(ids) = self.export_ids(triangle) {
        output
          .indices
          .extend(ids.iter().map(|&export_id| (export_id - 1) as u32));
      }
    }

    output
  }
}

/// Render-ready mesh: positions, normals and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct IndexedMesh {
  pub positions: Vec<[f32; 3]>,

  /// Unit vertex normals (parallel to `positions`).
  pub normals: Vec<[f32; 3]>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl IndexedMesh {
  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Unnormalized geometric normal of triangle `n` from its winding.
  pub fn face_normal(&self, n: usize) -> Vec3 {
    let tri = &self.indices[n * 3..n * 3 + 3];
    let p0 = Vec3::from_array(self.positions[tri[0] as usize]);
    let p1 = Vec3::from_array(self.positions[tri[1] as usize]);
    let p2 = Vec3::from_array(self.positions[tri[2] as usize]);
    (p1 - p0).cross(p2 - p0)
  }

  /// Total surface area.
  pub fn area(&self) -> f32 {
    (0..self.triangle_count())
      .map(|n| self.face_normal(n).length() * 0.5)
      .sum()
  }
}

/// Configuration for isosurface extraction.
#[derive(Clone, Debug)]
pub struct MeshConfig<T> {
  /// Iso-value whose level set is extracted.
  pub iso_value: T,

  /// Classify cubes on the rayon pool, one x-slab per task.
  pub parallel: bool,

  /// Replace interpolated vertex normals with the average of the normals of
  /// the triangles sharing each vertex.
  pub average_normals: bool,
}

impl<T: Scalar> Default for MeshConfig<T> {
  fn default() -> Self {
    Self {
      iso_value: T::ZERO,
      parallel: true,
      average_normals: true,
    }
  }
}

impl<T: Scalar> MeshConfig<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_iso_value(mut self, iso_value: T) -> Self {
    self.iso_value = iso_value;
    self
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn with_average_normals(mut self, average_normals: bool) -> Self {
    self.average_normals = average_normals;
    self
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
