//! Global mesh assembly.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Scan: every cube origin in (i, j, k) order                       │
//! │   corners  = grid.cube_corners(i, j, k)                          │
//! │   edge ids = vertex_to_edge_ids(grid.size(), corner ids)         │
//! │   cube     = march_cube(corners, edge ids, running counter, iso) │
//! │                                                                  │
//! │   serial:   cubes merged as they are produced                    │
//! │   parallel: one x-slab per rayon task, slab-local triangle ids,  │
//! │             merged in slab order (running counter = prefix sum)  │
//! └──────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Merge: triangles appended, vertices inserted if the edge id is   │
//! │        not yet present (first writer wins)                       │
//! └──────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Finish: export ids 1..=V in ascending edge id order, then        │
//! │         normal averaging over all triangles                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both modes produce identical meshes.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rayon::prelude::*;
use web_time::Instant;

use crate::cube::{march_cube, CubeMesh};
use crate::edge_ids::EdgeIdResolver;
use crate::error::Result;
use crate::field::{NormalField, ScalarField};
use crate::grid::Grid;
use crate::metrics::PolygonizeStats;
use crate::normals::{average_vertex_normals, normalize_vertex_normals};
use crate::types::{EdgeId, Mesh, MeshConfig, Triangle, Vertex};
use crate::vec3::Scalar;

/// Marched cubes of one x-slab, with triangle ids starting at 0.
#[derive(Clone, Debug, Default)]
pub struct Slab<T> {
  /// Non-empty cubes in scan order.
  pub cubes: Vec<CubeMesh<T>>,
  pub stats: PolygonizeStats,
}

impl<T> Slab<T> {
  pub fn triangle_count(&self) -> usize {
    self.stats.triangles as usize
  }
}

/// March every cube whose origin has x index `i`.
pub fn scan_slab<T: Scalar>(
  grid: &Grid<T>,
  scalars: &ScalarField<T>,
  normals: &NormalField<T>,
  resolver: &EdgeIdResolver,
  iso_value: T,
  i: isize,
) -> Slab<T> {
  let mut slab = Slab {
    cubes: Vec::new(),
    stats: PolygonizeStats::new(),
  };
  let mut next_id = 0;

  for j in grid.cube_range(1) {
    for k in grid.cube_range(2) {
      let corners = grid.cube_corners(i, j, k, scalars, normals);
      let edge_ids = resolver.resolve(&grid.cube_vertex_ids(i, j, k));
      let cube = march_cube(&corners, &edge_ids, next_id, iso_value);

      slab.stats.record_cube(cube.triangles.len(), cube.vertices.len());
      if !cube.is_empty() {
        next_id += cube.triangles.len();
        slab.cubes.push(cube);
      }
    }
  }

  slab
}

/// Accumulates cube output into one deduplicated mesh.
#[derive(Clone, Debug)]
pub struct MeshAssembler<T> {
  vertices: BTreeMap<EdgeId, Vertex<T>>,
  triangles: Vec<Triangle<T>>,
  triangle_counter: usize,
  stats: PolygonizeStats,
}

impl<T: Scalar> Default for MeshAssembler<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Scalar> MeshAssembler<T> {
  pub fn new() -> Self {
    Self {
      vertices: BTreeMap::new(),
      triangles: Vec::new(),
      triangle_counter: 0,
      stats: PolygonizeStats::new(),
    }
  }

  /// Id the next cube's first triangle must carry.
  pub fn next_triangle_id(&self) -> usize {
    self.triangle_counter
  }

  pub fn stats(&self) -> &PolygonizeStats {
    &self.stats
  }

  /// Append a cube marched with `triangle_start_id == next_triangle_id()`.
  ///
  /// Vertices are inserted only if their edge id is new. Per-cube counters
  /// are recorded by the scan, not here.
  pub fn add_cube(&mut self, cube: CubeMesh<T>) {
    self.triangle_counter += cube.triangles.len();
    self.triangles.extend(cube.triangles);

    for vertex in cube.vertices {
      match self.vertices.entry(vertex.id) {
        Entry::Vacant(slot) => {
          slot.insert(vertex);
        }
        Entry::Occupied(_) => self.stats.duplicate_vertices += 1,
      }
    }
  }

  /// Append a slab, shifting its local triangle ids past everything merged
  /// so far.
  pub fn merge_slab(&mut self, slab: Slab<T>) {
    let offset = self.triangle_counter;
    self.stats.merge(&slab.stats);

    for mut cube in slab.cubes {
      for triangle in &mut cube.triangles {
        triangle.id += offset;
      }
      self.add_cube(cube);
    }
  }

  /// Assign export ids and finalize normals.
  ///
  /// # Panics
  ///
  /// If the triangle list and the running counter disagree. That can only
  /// happen through a bug in the assembly and the mesh would be corrupt.
  pub fn finish(mut self, average_normals: bool) -> Mesh<T> {
    assert_eq!(
      self.triangles.len(),
      self.triangle_counter,
      "triangle list and id counter diverged"
    );
    debug_assert!(self.triangles.iter().enumerate().all(|(n, t)| t.id == n));

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("export_ids").entered();
      for (n, vertex) in self.vertices.values_mut().enumerate() {
        vertex.export_id = n + 1;
      }
    }

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("normals").entered();
      if average_normals {
        average_vertex_normals(&mut self.vertices, &self.triangles);
      } else {
        normalize_vertex_normals(&mut self.vertices);
      }
    }

    self.stats.unique_vertices = self.vertices.len() as u64;

    Mesh {
      vertices: self.vertices,
      triangles: self.triangles,
      stats: self.stats,
    }
  }
}

/// Extract the `config.iso_value` level set of `scalars` on `grid`.
///
/// `normals` supplies the per-lattice-point normals interpolated onto surface
/// vertices (see [`crate::field::compute_normals`]). Both fields must have been
/// built for `grid`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mc::polygonize"))]
pub fn polygonize<T: Scalar>(
  grid: &Grid<T>,
  scalars: &ScalarField<T>,
  normals: &NormalField<T>,
  config: &MeshConfig<T>,
) -> Result<Mesh<T>> {
  scalars.check_shape(grid, "scalar")?;
  normals.check_shape(grid, "normal")?;
  let resolver = EdgeIdResolver::new(grid.size(), grid.size())?;

  let start = Instant::now();
  let iso_value = config.iso_value;
  let mut assembler = MeshAssembler::new();

  if config.parallel {
    let slabs: Vec<Slab<T>> = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("scan").entered();
      grid
        .cube_range(0)
        .into_par_iter()
        .map(|i| scan_slab(grid, scalars, normals, &resolver, iso_value, i))
        .collect()
    };

    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("merge").entered();
    for slab in slabs {
      assembler.merge_slab(slab);
    }
  } else {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("scan").entered();
    for i in grid.cube_range(0) {
      assembler.merge_slab(scan_slab(grid, scalars, normals, &resolver, iso_value, i));
    }
  }

  let mut mesh = assembler.finish(config.average_normals);
  mesh.stats.record_timing(start.elapsed().as_micros() as u64);

  #[cfg(feature = "tracing")]
  tracing::info!(
    vertices = mesh.vertex_count(),
    triangles = mesh.triangle_count(),
    active_cubes = mesh.stats.active_cubes,
    "polygonized"
  );

  Ok(mesh)
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
