//! Error types for isosurface extraction.

use thiserror::Error;

/// Errors raised while building grids, fields or meshes.
#[derive(Error, Debug)]
pub enum MeshError {
  /// The edge id offset is smaller than the number of lattice points, so the
  /// axis namespaces of edge ids would overlap.
  #[error("edge id offset {offset} must be at least the lattice vertex count {vertex_count}")]
  EdgeIdOffsetTooSmall { offset: usize, vertex_count: usize },

  /// A field was sized for a different grid.
  #[error("{field} field has {actual} samples, grid expects {expected}")]
  FieldSizeMismatch {
    field: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("invalid grid: {0}")]
  InvalidGrid(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = MeshError> = std::result::Result<T, E>;
