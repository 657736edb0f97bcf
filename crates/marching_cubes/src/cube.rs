//! Per-cube classification and triangulation.
//!
//! A cube is processed in isolation: its 8 corner samples are classified
//! against the iso-value, crossed edges are looked up in [`EDGE_TABLE`], a
//! vertex is interpolated on every crossed edge and [`TRI_TABLE`] groups those
//! vertices into triangles. Nothing here touches shared state, so cubes can be
//! marched on any number of workers.
//!
//! [`TRI_TABLE`]: crate::tables::TRI_TABLE

use smallvec::SmallVec;

use crate::tables::{self, EDGE_CORNERS, EDGE_TABLE};
use crate::types::{EdgeId, Triangle, Vertex};
use crate::vec3::{Scalar, Vec3};

/// Maximum triangles one configuration of the table produces.
pub const MAX_TRIANGLES_PER_CUBE: usize = 5;

/// Samples, positions and normals at the 8 corners of one cube, in
/// [`crate::tables::CORNER_OFFSETS`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeCorners<T> {
  pub positions: [Vec3<T>; 8],
  pub normals: [Vec3<T>; 8],
  pub scalars: [T; 8],
}

/// Triangles and vertex records produced by one cube.
///
/// One vertex record is emitted per triangle corner, so records repeat when
/// triangles share an edge. Deduplication happens during assembly.
#[derive(Clone, Debug, Default)]
pub struct CubeMesh<T> {
  pub triangles: SmallVec<[Triangle<T>; MAX_TRIANGLES_PER_CUBE]>,
  pub vertices: SmallVec<[Vertex<T>; MAX_TRIANGLES_PER_CUBE * 3]>,
}

impl<T> CubeMesh<T> {
  pub fn is_empty(&self) -> bool {
    self.triangles.is_empty()
  }
}

/// Build the 8-bit configuration mask.
///
/// Bit i is set when corner i lies strictly below the iso-value. Samples equal
/// to the iso-value count as outside.
#[inline]
pub fn corner_mask<T: Scalar>(scalars: &[T; 8], iso_value: T) -> u8 {
  let mut mask = 0u8;
  for (i, &s) in scalars.iter().enumerate() {
    if s < iso_value {
      mask |= 1 << i;
    }
  }
  mask
}

/// Fraction along edge `a -> b` where the iso-value is crossed.
///
/// Near-ties snap to an endpoint and a flat edge snaps to `a`, so the result
/// is always finite.
#[inline]
pub fn edge_intersection_weight<T: Scalar>(s_a: T, s_b: T, iso_value: T) -> T {
  if (iso_value - s_a).abs() < T::ISO_EPSILON {
    return T::ZERO;
  }
  if (iso_value - s_b).abs() < T::ISO_EPSILON {
    return T::ONE;
  }
  if (s_a - s_b).abs() < T::ISO_EPSILON {
    return T::ZERO;
  }
  (iso_value - s_a) / (s_b - s_a)
}

/// Classify and triangulate one cube.
///
/// `edge_ids` are the cube's 12 global edge identities (see
/// [`crate::edge_ids::vertex_to_edge_ids`]). Triangles are numbered
/// sequentially from `triangle_start_id`; keeping those ids globally unique is
/// the caller's job.
pub fn march_cube<T: Scalar>(
  corners: &CubeCorners<T>,
  edge_ids: &[EdgeId; 12],
  triangle_start_id: usize,
  iso_value: T,
) -> CubeMesh<T> {
  let mut output = CubeMesh::default();

  let config = corner_mask(&corners.scalars, iso_value);
  let edge_mask = EDGE_TABLE[config as usize];
  if edge_mask == 0 {
    return output;
  }

  // Interpolate once per crossed edge
  let mut edge_points = [(Vec3::<T>::ZERO, Vec3::<T>::ZERO); 12];
  for (edge, &[a, b]) in EDGE_CORNERS.iter().enumerate() {
    if edge_mask & (1 << edge) == 0 {
      continue;
    }
    let (a, b) = (a as usize, b as usize);
    let f = edge_intersection_weight(corners.scalars[a], corners.scalars[b], iso_value);
    edge_points[edge] = (
      corners.positions[a].lerp(corners.positions[b], f),
      corners.normals[a].lerp(corners.normals[b], f),
    );
  }

  for (n, tri) in tables::triangles(config).enumerate() {
    let mut normal = Vec3::ZERO;
    for &edge in &tri {
      let (position, vertex_normal) = edge_points[edge];
      normal += vertex_normal;
      output
        .vertices
        .push(Vertex::new(edge_ids[edge], position, vertex_normal));
    }

    output.triangles.push(Triangle {
      id: triangle_start_id + n,
      vertex_ids: tri.map(|edge| edge_ids[edge]),
      normal: normal * T::ONE_THIRD,
    });
  }

  output
}

#[cfg(test)]
#[path = "cube_test.rs"]
mod cube_test;
