//! Small three-component vector used for positions, normals and lattice
//! coordinates.
//!
//! `Vec3<T>` is generic over its element type. Arithmetic that only needs the
//! `std::ops` traits works for integers as well (`Vec3<i32>` lattice
//! coordinates), while magnitude and normalization require a [`Scalar`]
//! floating point element.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub};

/// Floating point element type the meshing core is generic over.
///
/// Implemented for `f32` and `f64`.
pub trait Scalar:
  Copy
  + Debug
  + Display
  + Default
  + PartialOrd
  + Send
  + Sync
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
  + Neg<Output = Self>
  + AddAssign
  + 'static
{
  const ZERO: Self;
  const ONE: Self;
  const HALF: Self;
  const ONE_THIRD: Self;

  /// Tolerance used for iso-value ties and degenerate edges.
  const ISO_EPSILON: Self;

  fn abs(self) -> Self;
  fn sqrt(self) -> Self;
  fn from_f64(value: f64) -> Self;
  fn to_f64(self) -> f64;
  fn to_f32(self) -> f32;
}

macro_rules! impl_scalar {
  ($t:ty) => {
    impl Scalar for $t {
      const ZERO: Self = 0.0;
      const ONE: Self = 1.0;
      const HALF: Self = 0.5;
      const ONE_THIRD: Self = 1.0 / 3.0;
      const ISO_EPSILON: Self = 1e-5;

      #[inline(always)]
      fn abs(self) -> Self {
        <$t>::abs(self)
      }

      #[inline(always)]
      fn sqrt(self) -> Self {
        <$t>::sqrt(self)
      }

      #[inline(always)]
      fn from_f64(value: f64) -> Self {
        value as $t
      }

      #[inline(always)]
      fn to_f64(self) -> f64 {
        self as f64
      }

      #[inline(always)]
      fn to_f32(self) -> f32 {
        self as f32
      }
    }
  };
}

impl_scalar!(f32);
impl_scalar!(f64);

/// Approximate scalar equality with the crate-wide iso tolerance.
#[inline]
pub fn is_equal<T: Scalar>(a: T, b: T) -> bool {
  (a - b).abs() < T::ISO_EPSILON
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3<T> {
  pub x: T,
  pub y: T,
  pub z: T,
}

impl<T> Vec3<T> {
  #[inline(always)]
  pub const fn new(x: T, y: T, z: T) -> Self {
    Self { x, y, z }
  }
}

impl<T: Copy> Vec3<T> {
  #[inline(always)]
  pub const fn splat(v: T) -> Self {
    Self { x: v, y: v, z: v }
  }

  #[inline(always)]
  pub fn from_array(a: [T; 3]) -> Self {
    Self::new(a[0], a[1], a[2])
  }

  #[inline(always)]
  pub fn to_array(self) -> [T; 3] {
    [self.x, self.y, self.z]
  }

  /// Apply `f` to every component.
  #[inline]
  pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Vec3<U> {
    Vec3::new(f(self.x), f(self.y), f(self.z))
  }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
  /// Component-wise product.
  #[inline]
  pub fn mul_elem(self, rhs: Self) -> Self {
    Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
  }
}

impl<T: Copy + Div<Output = T>> Vec3<T> {
  /// Component-wise quotient.
  #[inline]
  pub fn div_elem(self, rhs: Self) -> Self {
    Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
  }
}

impl<T: Copy + PartialOrd> Vec3<T> {
  /// Smallest component.
  pub fn min_element(self) -> T {
    let m = if self.y < self.x { self.y } else { self.x };
    if self.z < m {
      self.z
    } else {
      m
    }
  }

  /// Largest component.
  pub fn max_element(self) -> T {
    let m = if self.y > self.x { self.y } else { self.x };
    if self.z > m {
      self.z
    } else {
      m
    }
  }
}

impl<T: Scalar> Vec3<T> {
  pub const ZERO: Self = Self::new(T::ZERO, T::ZERO, T::ZERO);

  #[inline]
  pub fn dot(self, rhs: Self) -> T {
    self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
  }

  #[inline]
  pub fn cross(self, rhs: Self) -> Self {
    Self::new(
      self.y * rhs.z - self.z * rhs.y,
      self.z * rhs.x - self.x * rhs.z,
      self.x * rhs.y - self.y * rhs.x,
    )
  }

  #[inline]
  pub fn magnitude(self) -> T {
    self.dot(self).sqrt()
  }

  /// Unit vector in the same direction. The zero vector is returned
  /// unchanged.
  #[inline]
  pub fn normalize(self) -> Self {
    let magnitude = self.magnitude();
    if magnitude > T::ZERO {
      self / magnitude
    } else {
      self
    }
  }

  /// Linear interpolation `(1 - f) * self + f * rhs`.
  #[inline]
  pub fn lerp(self, rhs: Self, f: T) -> Self {
    self * (T::ONE - f) + rhs * f
  }

  /// Component-wise equality within [`Scalar::ISO_EPSILON`].
  pub fn approx_eq(self, rhs: Self) -> bool {
    is_equal(self.x, rhs.x) && is_equal(self.y, rhs.y) && is_equal(self.z, rhs.z)
  }
}

impl<T> Index<usize> for Vec3<T> {
  type Output = T;

  #[inline(always)]
  fn index(&self, axis: usize) -> &T {
    match axis {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      _ => panic!("Vec3 axis {} out of range", axis),
    }
  }
}

impl<T> IndexMut<usize> for Vec3<T> {
  #[inline(always)]
  fn index_mut(&mut self, axis: usize) -> &mut T {
    match axis {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      _ => panic!("Vec3 axis {} out of range", axis),
    }
  }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
  type Output = Self;

  #[inline(always)]
  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl<T: AddAssign> AddAssign for Vec3<T> {
  #[inline(always)]
  fn add_assign(&mut self, rhs: Self) {
    self.x += rhs.x;
    self.y += rhs.y;
    self.z += rhs.z;
  }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
  type Output = Self;

  #[inline(always)]
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec3<T> {
  type Output = Self;

  #[inline(always)]
  fn mul(self, rhs: T) -> Self {
    Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vec3<T> {
  type Output = Self;

  #[inline(always)]
  fn div(self, rhs: T) -> Self {
    Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
  }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
  type Output = Self;

  #[inline(always)]
  fn neg(self) -> Self {
    Self::new(-self.x, -self.y, -self.z)
  }
}

impl From<Vec3<f32>> for glam::Vec3 {
  fn from(v: Vec3<f32>) -> Self {
    glam::Vec3::new(v.x, v.y, v.z)
  }
}

impl From<glam::Vec3> for Vec3<f32> {
  fn from(v: glam::Vec3) -> Self {
    Vec3::new(v.x, v.y, v.z)
  }
}

impl From<Vec3<f64>> for glam::DVec3 {
  fn from(v: Vec3<f64>) -> Self {
    glam::DVec3::new(v.x, v.y, v.z)
  }
}

impl From<glam::DVec3> for Vec3<f64> {
  fn from(v: glam::DVec3) -> Self {
    Vec3::new(v.x, v.y, v.z)
  }
}

#[cfg(test)]
#[path = "vec3_test.rs"]
mod vec3_test;
