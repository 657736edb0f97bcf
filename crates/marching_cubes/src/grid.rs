//! Cell-centred sampling lattice with ghost padding.
//!
//! ```text
//!   ghost │ working cells          │ ghost
//!   ──●───┼──●──────●──────●───────┼──●──
//!    -1   │  0      1      2       │  3        (cells = 3, padding = 1)
//!         min                      max
//!            └ min + (i + ½)·dx
//! ```
//!
//! Lattice indices are signed: `-padding..cells + padding` on every axis. The
//! flat index is row-major with k (z) varying fastest.

use std::ops::Range;

use crate::cube::CubeCorners;
use crate::error::{MeshError, Result};
use crate::field::{NormalField, ScalarField};
use crate::tables::CORNER_OFFSETS;
use crate::types::GridVertexId;
use crate::vec3::{Scalar, Vec3};

/// Dimensions of a padded lattice, shared by grids and fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LatticeShape {
  /// Working cells per axis (excluding padding).
  pub cells: [usize; 3],
  pub padding: usize,
}

impl LatticeShape {
  pub fn new(cells: [usize; 3], padding: usize) -> Self {
    Self { cells, padding }
  }

  /// Lattice points per axis including padding on both sides.
  #[inline]
  pub fn dims(&self) -> [usize; 3] {
    self.cells.map(|n| n + 2 * self.padding)
  }

  /// Total number of lattice points.
  #[inline]
  pub fn size(&self) -> usize {
    self.dims().iter().product()
  }

  #[inline]
  pub fn contains(&self, i: isize, j: isize, k: isize) -> bool {
    let pad = self.padding as isize;
    let dims = self.dims();
    [i, j, k]
      .iter()
      .zip(dims)
      .all(|(&c, n)| c >= -pad && c < n as isize - pad)
  }

  /// Flat index of a lattice point.
  ///
  /// # Panics
  ///
  /// If the point lies outside the padded lattice.
  #[inline]
  pub fn index(&self, i: isize, j: isize, k: isize) -> GridVertexId {
    assert!(self.contains(i, j, k), "lattice point ({i}, {j}, {k}) out of range");
    let pad = self.padding as isize;
    let [_, ny, nz] = self.dims();
    let (i, j, k) = ((i + pad) as usize, (j + pad) as usize, (k + pad) as usize);
    (i * ny + j) * nz + k
  }

  /// Signed lattice index range of one axis, ghosts included.
  #[inline]
  pub fn lattice_range(&self, axis: usize) -> Range<isize> {
    let pad = self.padding as isize;
    -pad..self.cells[axis] as isize + pad
  }

  /// Visit every lattice point in flat-index order.
  pub fn for_each_point(&self, mut f: impl FnMut(isize, isize, isize)) {
    for i in self.lattice_range(0) {
      for j in self.lattice_range(1) {
        for k in self.lattice_range(2) {
          f(i, j, k);
        }
      }
    }
  }
}

/// Regular grid over the box `[min, max]` with `cells` working cells per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
  shape: LatticeShape,
  min: Vec3<T>,
  max: Vec3<T>,
  dx: Vec3<T>,
}

impl<T: Scalar> Grid<T> {
  pub fn new(cells: [usize; 3], padding: usize, min: Vec3<T>, max: Vec3<T>) -> Result<Self> {
    if cells.iter().any(|&n| n == 0) {
      return Err(MeshError::InvalidGrid(format!(
        "cell counts must be positive, got {:?}",
        cells
      )));
    }
    if padding == 0 {
      return Err(MeshError::InvalidGrid(
        "padding must be at least 1 for central differences".to_string(),
      ));
    }
    for axis in 0..3 {
      // Negated so NaN bounds are rejected too
      if !(min[axis] < max[axis]) {
        return Err(MeshError::InvalidGrid(format!(
          "min {} must be below max {} on axis {}",
          min[axis], max[axis], axis
        )));
      }
    }

    let dx = Vec3::new(
      (max.x - min.x) / T::from_f64(cells[0] as f64),
      (max.y - min.y) / T::from_f64(cells[1] as f64),
      (max.z - min.z) / T::from_f64(cells[2] as f64),
    );

    Ok(Self {
      shape: LatticeShape::new(cells, padding),
      min,
      max,
      dx,
    })
  }

  /// Cubic grid over `[min, max]^3`.
  pub fn cube(cells: usize, padding: usize, min: T, max: T) -> Result<Self> {
    Self::new([cells; 3], padding, Vec3::splat(min), Vec3::splat(max))
  }

  #[inline]
  pub fn shape(&self) -> LatticeShape {
    self.shape
  }

  pub fn cells(&self) -> [usize; 3] {
    self.shape.cells
  }

  pub fn padding(&self) -> usize {
    self.shape.padding
  }

  pub fn min(&self) -> Vec3<T> {
    self.min
  }

  pub fn max(&self) -> Vec3<T> {
    self.max
  }

  /// Cell spacing per axis.
  pub fn dx(&self) -> Vec3<T> {
    self.dx
  }

  pub fn dims(&self) -> [usize; 3] {
    self.shape.dims()
  }

  /// Total lattice point count, ghosts included. Also the edge id offset.
  #[inline]
  pub fn size(&self) -> usize {
    self.shape.size()
  }

  #[inline]
  pub fn index(&self, i: isize, j: isize, k: isize) -> GridVertexId {
    self.shape.index(i, j, k)
  }

  /// World-space position of a lattice point (cell centre).
  #[inline]
  pub fn position(&self, i: isize, j: isize, k: isize) -> Vec3<T> {
    let offset = |c: isize| T::from_f64(c as f64) + T::HALF;
    self.min + Vec3::new(offset(i), offset(j), offset(k)).mul_elem(self.dx)
  }

  /// Index range of the working cells on one axis.
  pub fn working_range(&self, axis: usize) -> Range<isize> {
    0..self.shape.cells[axis] as isize
  }

  pub fn lattice_range(&self, axis: usize) -> Range<isize> {
    self.shape.lattice_range(axis)
  }

  /// Lattice range without the outermost ghost layer.
  pub fn sampled_range(&self, axis: usize) -> Range<isize> {
    let range = self.lattice_range(axis);
    range.start + 1..range.end - 1
  }

  /// Origins of every cube whose 8 corners lie on the lattice.
  pub fn cube_range(&self, axis: usize) -> Range<isize> {
    let range = self.lattice_range(axis);
    range.start..range.end - 1
  }

  /// Number of cubes the assembler visits.
  pub fn cube_count(&self) -> usize {
    (0..3).map(|axis| self.cube_range(axis).len()).product()
  }

  /// Flat indices of the 8 corners of the cube at origin `(i, j, k)`.
  #[inline]
  pub fn cube_vertex_ids(&self, i: isize, j: isize, k: isize) -> [GridVertexId; 8] {
    CORNER_OFFSETS.map(|[di, dj, dk]| {
      self
        .shape
        .index(i + di as isize, j + dj as isize, k + dk as isize)
    })
  }

  /// Gather positions, normals and samples at the corners of one cube.
  #[inline]
  pub fn cube_corners(
    &self,
    i: isize,
    j: isize,
    k: isize,
    scalars: &ScalarField<T>,
    normals: &NormalField<T>,
  ) -> CubeCorners<T> {
    let ids = self.cube_vertex_ids(i, j, k);
    let positions = CORNER_OFFSETS
      .map(|[di, dj, dk]| self.position(i + di as isize, j + dj as isize, k + dk as isize));

    CubeCorners {
      positions,
      normals: ids.map(|id| normals[id]),
      scalars: ids.map(|id| scalars[id]),
    }
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
