//! Edge identity resolution.
//!
//! Neighbouring cubes must agree on which vertex sits on a shared lattice
//! edge. Every edge is pinned to its lower endpoint's lattice index and
//! shifted into a per-axis namespace:
//!
//! ```text
//! EdgeId = vertex_ids[base] + axis + axis * offset
//!
//!   axis 0 (X): [0, N)
//!   axis 1 (Y): [offset + 1, offset + 1 + N)
//!   axis 2 (Z): [2 * offset + 2, 2 * offset + 2 + N)
//! ```
//!
//! With `offset >= N` (the lattice vertex count) the three namespaces are
//! disjoint, so equal ids always denote the same physical edge.

use crate::error::{MeshError, Result};
use crate::tables::{EDGE_AXIS, EDGE_BASE_CORNER};
use crate::types::{EdgeId, GridVertexId};

/// Compute the 12 edge ids of one cube from its 8 corner lattice indices.
///
/// Corner order follows [`crate::tables::CORNER_OFFSETS`]. The caller must
/// guarantee `offset >= lattice vertex count`; see [`EdgeIdResolver`] for the
/// checked form.
#[inline]
pub fn vertex_to_edge_ids(offset: usize, vertex_ids: &[GridVertexId; 8]) -> [EdgeId; 12] {
  std::array::from_fn(|edge| {
    let base = vertex_ids[EDGE_BASE_CORNER[edge] as usize];
    let axis = EDGE_AXIS[edge] as usize;
    base + axis + axis * offset
  })
}

/// [`vertex_to_edge_ids`] with its offset validated once up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeIdResolver {
  offset: usize,
}

impl EdgeIdResolver {
  pub fn new(offset: usize, vertex_count: usize) -> Result<Self> {
    if offset < vertex_count {
      return Err(MeshError::EdgeIdOffsetTooSmall {
        offset,
        vertex_count,
      });
    }
    Ok(Self { offset })
  }

  /// Resolver using the smallest valid offset for a lattice.
  pub fn for_vertex_count(vertex_count: usize) -> Self {
    Self {
      offset: vertex_count,
    }
  }

  pub fn offset(&self) -> usize {
    self.offset
  }

  #[inline]
  pub fn resolve(&self, vertex_ids: &[GridVertexId; 8]) -> [EdgeId; 12] {
    vertex_to_edge_ids(self.offset, vertex_ids)
  }
}

#[cfg(test)]
#[path = "edge_ids_test.rs"]
mod edge_ids_test;
