//! marching_cubes - Table-driven isosurface extraction
//!
//! Extracts the level set `s = iso` of a scalar field sampled on a regular,
//! padded, cell-centred grid and returns a deduplicated triangle mesh with
//! smooth vertex normals.
//!
//! # Features
//!
//! - **Classic marching cubes**: 256-case edge and triangle tables, linear
//!   edge interpolation of positions and normals
//! - **Shared vertices**: every vertex is keyed by the lattice edge it lies
//!   on, so neighbouring cubes reuse it
//! - **Parallel scan**: x-slabs marched on the rayon pool and merged in order,
//!   producing exactly the serial result
//! - **Generic precision**: `f32` or `f64` through [`Scalar`]
//!
//! # Example
//!
//! ```ignore
//! use marching_cubes::{compute_normals, polygonize, FieldShape, Grid, MeshConfig};
//! use marching_cubes::{NormalOrientation, ScalarField};
//!
//! let grid = Grid::<f64>::cube(32, 1, 0.0, 1.0)?;
//! let scalars = ScalarField::from_shape(&grid, &FieldShape::unit_sphere());
//! let normals = compute_normals(&grid, &scalars, NormalOrientation::Ascending)?;
//!
//! let mesh = polygonize(&grid, &scalars, &normals, &MeshConfig::new())?;
//! marching_cubes::save_obj(&mesh, "sphere.obj")?;
//! ```

pub mod cube;
pub mod edge_ids;
pub mod error;
pub mod field;
pub mod grid;
pub mod mesh;
pub mod metrics;
pub mod normals;
pub mod obj;
pub mod tables;
pub mod types;
pub mod vec3;

// Re-export commonly used items
pub use cube::{corner_mask, edge_intersection_weight, march_cube, CubeCorners, CubeMesh};
pub use edge_ids::{vertex_to_edge_ids, EdgeIdResolver};
pub use error::{MeshError, Result};
pub use field::{compute_normals, Field, FieldShape, NormalField, NormalOrientation, ScalarField};
pub use grid::{Grid, LatticeShape};
pub use mesh::{polygonize, MeshAssembler};
pub use metrics::PolygonizeStats;
pub use normals::average_vertex_normals;
pub use obj::{save_obj, write_obj};
pub use tables::{CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
pub use types::{
  EdgeId, GridVertexId, IndexedMesh, Mesh, MeshConfig, MinMaxAABB, Triangle, Vertex,
};
pub use vec3::{Scalar, Vec3};
