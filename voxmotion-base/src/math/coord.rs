//! Numeric types used for coordinates and related quantities.

use euclid::{Point3D, Vector3D};

use crate::math::Cube;

/// Coordinates that are locked to the cube grid.
pub type GridCoordinate = i32;

/// Positions that are locked to the cube grid.
pub type GridPoint = Point3D<GridCoordinate, Cube>;

/// Vectors that are locked to the cube grid.
pub type GridVector = Vector3D<GridCoordinate, Cube>;

/// Coordinates that are not locked to the cube grid.
///
/// Note: Because `GridCoordinate = i32` and `FreeCoordinate = f64`, which has
/// more than 32 bits of mantissa, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Positions that are not locked to the cube grid but may interact with it.
pub type FreePoint = Point3D<FreeCoordinate, Cube>;

/// Vectors that are not locked to the cube grid but may interact with it.
pub type FreeVector = Vector3D<FreeCoordinate, Cube>;

/// Squared length of the horizontal (X and Z) part of `v`.
///
/// ```
/// # extern crate voxmotion_base as voxmotion;
/// use voxmotion::math::{horizontal_length_squared, FreeVector};
///
/// assert_eq!(horizontal_length_squared(FreeVector::new(3.0, 100.0, 4.0)), 25.0);
/// ```
#[inline]
pub fn horizontal_length_squared(v: FreeVector) -> FreeCoordinate {
    v.x * v.x + v.z * v.z
}

/// Returns whether every component of `v` is finite.
#[inline]
pub fn is_finite_vector(v: FreeVector) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
