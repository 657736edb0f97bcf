//! Smooth vertex normals from the triangles sharing each vertex.

use std::collections::BTreeMap;

use crate::types::{EdgeId, Triangle, Vertex};
use crate::vec3::{Scalar, Vec3};

/// Replace every vertex normal with the normalized sum of the normals of the
/// triangles that reference it.
///
/// Runs in three passes: reset, accumulate, normalize. A vertex no triangle
/// references keeps a zero normal and a zero count.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mc::average_normals"))]
pub fn average_vertex_normals<T: Scalar>(
  vertices: &mut BTreeMap<EdgeId, Vertex<T>>,
  triangles: &[Triangle<T>],
) {
  for vertex in vertices.values_mut() {
    vertex.normal = Vec3::ZERO;
    vertex.shared_triangles = 0;
  }

  for triangle in triangles {
    for id in &triangle.vertex_ids {
      if let Some(vertex) = vertices.get_mut(id) {
        vertex.normal += triangle.normal;
        vertex.shared_triangles += 1;
      }
    }
  }

  for vertex in vertices.values_mut() {
    if vertex.shared_triangles > 0 {
      vertex.normal = vertex.normal.normalize();
    }
  }
}

/// Normalize vertex normals in place without averaging.
pub fn normalize_vertex_normals<T: Scalar>(vertices: &mut BTreeMap<EdgeId, Vertex<T>>) {
  for vertex in vertices.values_mut() {
    vertex.normal = vertex.normal.normalize();
  }
}

#[cfg(test)]
#[path = "normals_test.rs"]
mod normals_test;
