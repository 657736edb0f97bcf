//! Dense per-lattice-point fields and the built-in scalar shapes.

use std::ops::{Index, IndexMut};

use crate::error::{MeshError, Result};
use crate::grid::{Grid, LatticeShape};
use crate::types::GridVertexId;
use crate::vec3::{Scalar, Vec3};

/// One value per lattice point, stored in flat-index order.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<V> {
  shape: LatticeShape,
  data: Vec<V>,
}

/// Samples the isosurface is extracted from.
pub type ScalarField<T> = Field<T>;

/// Per-lattice-point normals interpolated onto surface vertices.
pub type NormalField<T> = Field<Vec3<T>>;

impl<V: Copy + Default> Field<V> {
  /// Field filled with `V::default()`.
  pub fn new(shape: LatticeShape) -> Self {
    Self {
      shape,
      data: vec![V::default(); shape.size()],
    }
  }

  /// Evaluate `f` at every lattice point, ghosts included.
  pub fn from_fn(shape: LatticeShape, mut f: impl FnMut(isize, isize, isize) -> V) -> Self {
    let mut data = Vec::with_capacity(shape.size());
    shape.for_each_point(|i, j, k| data.push(f(i, j, k)));
    Self { shape, data }
  }

  /// Wrap existing samples laid out in flat-index order.
  pub fn from_vec(shape: LatticeShape, data: Vec<V>) -> Result<Self> {
    if data.len() != shape.size() {
      return Err(MeshError::FieldSizeMismatch {
        field: "input",
        expected: shape.size(),
        actual: data.len(),
      });
    }
    Ok(Self { shape, data })
  }

  pub fn shape(&self) -> LatticeShape {
    self.shape
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn as_slice(&self) -> &[V] {
    &self.data
  }

  #[inline]
  pub fn get(&self, i: isize, j: isize, k: isize) -> V {
    self.data[self.shape.index(i, j, k)]
  }

  #[inline]
  pub fn set(&mut self, i: isize, j: isize, k: isize, value: V) {
    let index = self.shape.index(i, j, k);
    self.data[index] = value;
  }

  /// Check that the field was built for `grid`'s lattice.
  pub fn check_shape<T: Scalar>(&self, grid: &Grid<T>, field: &'static str) -> Result<()> {
    if self.shape != grid.shape() {
      return Err(MeshError::FieldSizeMismatch {
        field,
        expected: grid.size(),
        actual: self.len(),
      });
    }
    Ok(())
  }
}

impl<V> Index<GridVertexId> for Field<V> {
  type Output = V;

  #[inline]
  fn index(&self, index: GridVertexId) -> &V {
    &self.data[index]
  }
}

impl<V> IndexMut<GridVertexId> for Field<V> {
  #[inline]
  fn index_mut(&mut self, index: GridVertexId) -> &mut V {
    &mut self.data[index]
  }
}

/// Analytic scalar fields used by the driver and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldShape<T> {
  /// Squared distance to `center` minus `radius²`: negative inside.
  Sphere { center: Vec3<T>, radius: T },

  /// 1 inside the box `[-inf, extent]` on every axis, 0 elsewhere.
  Dam { extent: Vec3<T> },
}

impl<T: Scalar> FieldShape<T> {
  /// Sphere of radius 0.25 centred in the unit cube.
  pub fn unit_sphere() -> Self {
    Self::Sphere {
      center: Vec3::splat(T::HALF),
      radius: T::from_f64(0.25),
    }
  }

  /// Water column in the low corner of the unit cube.
  pub fn unit_dam() -> Self {
    Self::Dam {
      extent: Vec3::new(T::from_f64(0.2), T::from_f64(0.25), T::from_f64(0.2)),
    }
  }

  #[inline]
  pub fn evaluate(&self, p: Vec3<T>) -> T {
    match *self {
      Self::Sphere { center, radius } => {
        let d = p - center;
        d.dot(d) - radius * radius
      }
      Self::Dam { extent } => {
        if p.x <= extent.x && p.y <= extent.y && p.z <= extent.z {
          T::ONE
        } else {
          T::ZERO
        }
      }
    }
  }
}

impl<T: Scalar> ScalarField<T> {
  /// Sample `shape` on `grid`.
  ///
  /// The outermost ghost layer is left at zero, so shapes touching the domain
  /// walls still produce a closed surface. Iso-values above zero see that
  /// layer as inside.
  pub fn from_shape(grid: &Grid<T>, shape: &FieldShape<T>) -> Self {
    let mut field = Self::new(grid.shape());
    for i in grid.sampled_range(0) {
      for j in grid.sampled_range(1) {
        for k in grid.sampled_range(2) {
          field.set(i, j, k, shape.evaluate(grid.position(i, j, k)));
        }
      }
    }
    field
  }
}

/// Direction surface normals point relative to the scalar gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalOrientation {
  /// `-∇s`: away from the side of increasing scalar.
  #[default]
  Descending,

  /// `+∇s`: toward increasing scalar.
  Ascending,
}

impl NormalOrientation {
  #[inline]
  fn sign<T: Scalar>(self) -> T {
    match self {
      Self::Descending => -T::ONE,
      Self::Ascending => T::ONE,
    }
  }
}

/// Central-difference gradient of `scalars`, oriented by `orientation`.
///
/// Only working points get a normal; ghost points stay zero. Results are not
/// normalized.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mc::normals_field"))]
pub fn compute_normals<T: Scalar>(
  grid: &Grid<T>,
  scalars: &ScalarField<T>,
  orientation: NormalOrientation,
) -> Result<NormalField<T>> {
  scalars.check_shape(grid, "scalar")?;

  let mut normals = NormalField::new(grid.shape());
  let scale = Vec3::splat(T::HALF).div_elem(grid.dx()) * orientation.sign::<T>();

  for i in grid.working_range(0) {
    for j in grid.working_range(1) {
      for k in grid.working_range(2) {
        let gradient = Vec3::new(
          scalars.get(i + 1, j, k) - scalars.get(i - 1, j, k),
          scalars.get(i, j + 1, k) - scalars.get(i, j - 1, k),
          scalars.get(i, j, k + 1) - scalars.get(i, j, k - 1),
        );
        normals.set(i, j, k, gradient.mul_elem(scale));
      }
    }
  }

  Ok(normals)
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
