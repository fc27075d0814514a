use core::fmt;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{
    Aab, FreeCoordinate, FreePoint, FreeVector, GridCoordinate, GridPoint, GridVector,
};
use crate::util::ConciseDebug;

/// “A cube”, in this documentation, is a unit cube whose corners' coordinates are integers.
/// This type identifies such a cube by the coordinates of its most negative corner.
///
/// The world is a grid of these cells; each holds one block state and at most one
/// fluid state.
///
/// Considered in continuous space (real, or floating-point, coordinates), the ranges of
/// coordinates a cube contains are half-open intervals: lower inclusive and upper exclusive.
///
/// # Representation
///
/// This struct is guaranteed to be three `i32` without padding, and so may be reinterpreted
/// as any type of identical layout such as `[i32; 3]`.
#[derive(Clone, Copy, Eq, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs, clippy::exhaustive_structs)]
#[repr(C)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl core::hash::Hash for Cube {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // Hashers work on 64-bit quantities.
        // Therefore, it may be more efficient to provide fewer inputs by packing the data into
        // chunks of at most 64 bits.
        (u64::from(self.x.cast_unsigned()) ^ (u64::from(self.y.cast_unsigned()) << 32)).hash(state);
        self.z.hash(state);
    }
}

impl Cube {
    /// Equal to `Cube::new(0, 0, 0)`.
    ///
    /// Note that this is not a box _centered_ on the coordinate origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Construct `Cube { x, y, z }` from the given coordinates.
    #[inline]
    pub const fn new(x: GridCoordinate, y: GridCoordinate, z: GridCoordinate) -> Self {
        Self { x, y, z }
    }

    /// Convert a point in space to the unit cube that encloses it.
    ///
    /// Such cubes are defined to be half-open intervals on each axis; that is,
    /// an integer coordinate is counted as part of the cube extending positively
    /// from that coordinate.
    ///
    /// If the point coordinates are outside of the numeric range of [`GridCoordinate`],
    /// returns [`None`].
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{FreePoint, Cube};
    ///
    /// assert_eq!(Cube::containing(FreePoint::new(1.0, 1.5, -2.5)), Some(Cube::new(1, 1, -3)));
    /// ```
    #[inline]
    pub fn containing(point: FreePoint) -> Option<Self> {
        #[cold]
        const fn unlikely_none() -> Option<Cube> {
            None
        }
        const MIN_INCLUSIVE: FreeCoordinate = GridCoordinate::MIN as FreeCoordinate;
        const MAX_EXCLUSIVE: FreeCoordinate = GridCoordinate::MAX as FreeCoordinate + 1.0;

        let FreePoint { x, y, z, .. } = point;

        // No short-circuiting because, assuming success is likely, all tests will need to run.
        if (MIN_INCLUSIVE <= x)
            & (MIN_INCLUSIVE <= y)
            & (MIN_INCLUSIVE <= z)
            & (x < MAX_EXCLUSIVE)
            & (y < MAX_EXCLUSIVE)
            & (z < MAX_EXCLUSIVE)
        {
            Some(Self {
                x: x.floor() as GridCoordinate,
                y: y.floor() as GridCoordinate,
                z: z.floor() as GridCoordinate,
            })
        } else {
            unlikely_none()
        }
    }

    /// Returns the corner of this cube with the most negative coordinates.
    #[inline] // trivial arithmetic
    pub fn lower_bounds(self) -> GridPoint {
        self.into()
    }

    /// Returns the center of this cube.
    #[inline] // trivial arithmetic
    pub fn center(self) -> FreePoint {
        let Self { x, y, z } = self;
        FreePoint::new(
            FreeCoordinate::from(x) + 0.5,
            FreeCoordinate::from(y) + 0.5,
            FreeCoordinate::from(z) + 0.5,
        )
    }

    /// Squared distance from `point` to the center of this cube.
    #[inline]
    pub fn center_distance_squared(self, point: FreePoint) -> FreeCoordinate {
        (self.center() - point).square_length()
    }

    /// Returns the bounding box in floating-point coordinates containing this cube.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Aab, Cube};
    ///
    /// assert_eq!(
    ///     Cube::new(10, 20, -30).aab(),
    ///     Aab::new(10.0, 11.0, 20.0, 21.0, -30.0, -29.0)
    /// );
    /// ```
    #[inline]
    pub fn aab(self) -> Aab {
        let lower = GridPoint::from(self).map(FreeCoordinate::from);
        Aab::from_lower_upper(lower, lower + FreeVector::new(1.0, 1.0, 1.0))
    }

    /// Returns the offset from the coordinate origin to this cube's lower corner,
    /// for translating cube-local shapes into world coordinates.
    #[inline]
    pub fn offset(self) -> FreeVector {
        self.lower_bounds().to_vector().map(FreeCoordinate::from)
    }

    /// Returns the cube with the same X and Z but the given Y coordinate.
    #[must_use]
    #[inline]
    pub const fn with_y(self, y: GridCoordinate) -> Self {
        Self { y, ..self }
    }
}

impl fmt::Debug for Cube {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { x, y, z } = self;
        write!(f, "({x:+.3?}, {y:+.3?}, {z:+.3?})")
    }
}
impl manyfmt::Fmt<ConciseDebug> for Cube {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

mod arithmetic {
    use super::*;
    use crate::math::Axis;
    use core::ops;

    impl ops::Add<GridVector> for Cube {
        type Output = Self;
        #[inline]
        fn add(self, rhs: GridVector) -> Self::Output {
            Self::from(self.lower_bounds() + rhs)
        }
    }
    impl ops::Sub<GridVector> for Cube {
        type Output = Self;
        #[inline]
        fn sub(self, rhs: GridVector) -> Self::Output {
            Self::from(self.lower_bounds() - rhs)
        }
    }
    impl ops::Sub<Cube> for Cube {
        type Output = GridVector;
        #[inline]
        fn sub(self, rhs: Cube) -> Self::Output {
            self.lower_bounds() - rhs.lower_bounds()
        }
    }

    impl ops::Index<Axis> for Cube {
        type Output = GridCoordinate;
        #[inline]
        fn index(&self, index: Axis) -> &Self::Output {
            match index {
                Axis::X => &self.x,
                Axis::Y => &self.y,
                Axis::Z => &self.z,
            }
        }
    }
    impl ops::IndexMut<Axis> for Cube {
        #[inline]
        fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
            match index {
                Axis::X => &mut self.x,
                Axis::Y => &mut self.y,
                Axis::Z => &mut self.z,
            }
        }
    }
}

mod conversion {
    use super::*;

    impl From<Cube> for [GridCoordinate; 3] {
        #[inline]
        fn from(Cube { x, y, z }: Cube) -> [GridCoordinate; 3] {
            [x, y, z]
        }
    }
    impl From<Cube> for GridPoint {
        #[inline]
        fn from(Cube { x, y, z }: Cube) -> GridPoint {
            GridPoint::new(x, y, z)
        }
    }

    impl From<[GridCoordinate; 3]> for Cube {
        #[inline]
        fn from([x, y, z]: [GridCoordinate; 3]) -> Self {
            Self { x, y, z }
        }
    }
    impl From<GridPoint> for Cube {
        #[inline]
        fn from(GridPoint { x, y, z, _unit }: GridPoint) -> Self {
            Self { x, y, z }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point3, vec3};

    #[test]
    fn containing_simple() {
        assert_eq!(
            Cube::containing(point3(1.5, -2.0, -3.5)),
            Some(Cube::new(1, -2, -4))
        );
    }

    #[test]
    fn containing_inf() {
        assert_eq!(
            Cube::containing(point3(FreeCoordinate::INFINITY, 0., 0.)),
            None
        );
        assert_eq!(
            Cube::containing(point3(-FreeCoordinate::INFINITY, 0., 0.)),
            None
        );
    }

    #[test]
    fn containing_nan() {
        assert_eq!(Cube::containing(point3(0., 0., FreeCoordinate::NAN)), None);
    }

    #[test]
    fn containing_in_and_out_of_range() {
        let fmax = FreeCoordinate::from(GridCoordinate::MAX);
        let fmin = FreeCoordinate::from(GridCoordinate::MIN);

        assert_eq!(Cube::containing(point3(0., 0., fmin - 0.001)), None);
        assert_eq!(
            Cube::containing(point3(0., 0., fmin + 0.001,)),
            Some(Cube::new(0, 0, GridCoordinate::MIN))
        );
        assert_eq!(
            Cube::containing(point3(fmax + 0.999, 0., 0.)),
            Some(Cube::new(GridCoordinate::MAX, 0, 0))
        );
        assert_eq!(Cube::containing(point3(fmax + 1.001, 0., 0.)), None);
    }

    #[test]
    fn center_distance() {
        let cube = Cube::new(0, -1, 0);
        assert_eq!(cube.center_distance_squared(point3(0.5, 0.0, 0.5)), 0.25);
        assert_eq!(cube.offset(), vec3(0.0, -1.0, 0.0));
    }

    #[test]
    fn arithmetic() {
        let cube = Cube::new(1, 2, 3);
        assert_eq!(cube + vec3(0, -1, 0), Cube::new(1, 1, 3));
        assert_eq!(cube - Cube::ORIGIN, vec3(1, 2, 3));
        assert_eq!(cube.with_y(-7), Cube::new(1, -7, 3));
    }
}
