use crate::math::{FreePoint, FreeVector};

use super::Raycaster;

/// A ray; a half-infinite line segment (sometimes used as finite by the length of the
/// direction vector).
#[allow(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The sole endpoint of the ray.
    pub origin: FreePoint,

    /// The direction in which the ray extends infinitely.
    ///
    /// The meaning, if any, of the magnitude of this vector depends on context;
    /// a body's displacement for one tick is a common one.
    pub direction: FreeVector,
}

impl Ray {
    /// Constructs a [`Ray`] from convertible types (e.g. tuples or 3-element arrays).
    /// Other than the use of [`Into`], this is equivalent to a struct literal.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::euclid::{point3, vec3};
    /// use voxmotion::raycast::Ray;
    ///
    /// assert_eq!(
    ///     Ray::new([1., 2., 3.], [4., 5., 6.]),
    ///     Ray {
    ///         origin: point3(1., 2., 3.),
    ///         direction: vec3(4., 5., 6.),
    ///     }
    /// );
    /// ```
    #[allow(clippy::missing_inline_in_public_items)] // is generic already
    pub fn new(origin: impl Into<FreePoint>, direction: impl Into<FreeVector>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Prepares a [`Raycaster`] that will iterate over cubes intersected by this ray.
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn cast(&self) -> Raycaster {
        Raycaster::new(self.origin, self.direction)
    }

    /// Prepares a [`Raycaster`] that will iterate over cubes intersected by the line
    /// segment from [`Self::origin`] to [`Self::unit_endpoint()`].
    #[must_use]
    #[inline]
    pub fn cast_segment(&self) -> Raycaster {
        self.cast().until(1.0)
    }

    /// Return `self.origin + self.direction`, the “far end” of the ray.
    ///
    /// This only makes sense in contexts which are specifically using the length of the
    /// direction vector as a distance.
    #[must_use]
    #[inline]
    pub fn unit_endpoint(self) -> FreePoint {
        self.origin + self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Cube;
    use alloc::vec::Vec;
    use euclid::point3;

    #[test]
    fn segment_ends_at_unit_endpoint() {
        let ray = Ray::new([0.5, 0.5, 0.5], [0.0, 0.0, 2.0]);
        assert_eq!(ray.unit_endpoint(), point3(0.5, 0.5, 2.5));
        let cubes: Vec<Cube> = ray.cast_segment().map(|s| s.cube_ahead()).collect();
        assert_eq!(
            cubes,
            vec![Cube::new(0, 0, 0), Cube::new(0, 0, 1), Cube::new(0, 0, 2)]
        );
    }
}
