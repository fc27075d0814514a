//! Axis-aligned integer-coordinate box volumes ([`GridAab`]).

use core::fmt;
use core::ops::Range;

use manyfmt::Refmt as _;

use crate::math::{
    Aab, Axis, Cube, FreeCoordinate, GridCoordinate, GridIter, GridPoint,
};
use crate::util::ConciseDebug;

/// An axis-aligned box with integer coordinates.
///
/// [`GridAab`]s are used to specify which cells of the world a query covers;
/// the cells an [`Aab`] touches are found with [`Aab::round_up_to_grid()`].
///
/// The upper bounds are always greater than or equal to the lower bounds.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct GridAab {
    lower_bounds: GridPoint,
    /// Constructor checks ensure this is not smaller than `lower_bounds`.
    upper_bounds: GridPoint,
}

impl GridAab {
    /// Box of zero size at `[0, 0, 0]`.
    ///
    /// Use this box as the canonical placeholder “nothing” value when it is necessary to
    /// have *some* box.
    pub const ORIGIN_EMPTY: GridAab = GridAab {
        lower_bounds: GridPoint::new(0, 0, 0),
        upper_bounds: GridPoint::new(0, 0, 0),
    };

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// For example, if on one axis the lower bound is 5 and the upper bound is 10,
    /// then the positions where blocks can exist are numbered 5 through 9
    /// (inclusive) and the occupied volume (from a perspective of continuous
    /// rather than discrete coordinates) spans 5 to 10.
    ///
    /// Returns [`Err`] if any of the `upper_bounds` are less than the `lower_bounds`.
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn checked_from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Result<Self, GridOverflowError> {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        if upper_bounds.x < lower_bounds.x
            || upper_bounds.y < lower_bounds.y
            || upper_bounds.z < lower_bounds.z
        {
            return Err(GridOverflowError {
                lower_bounds,
                upper_bounds,
            });
        }

        Ok(GridAab {
            lower_bounds,
            upper_bounds,
        })
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// Panics if any of the `upper_bounds` are less than the `lower_bounds`.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> GridAab {
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Ok(aab) => aab,
            Err(error) => panic!("GridAab::from_lower_upper: {error}"),
        }
    }

    /// Returns whether the box contains no cubes (its volume is zero).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower_bounds.x == self.upper_bounds.x
            || self.lower_bounds.y == self.upper_bounds.y
            || self.lower_bounds.z == self.upper_bounds.z
    }

    /// Inclusive lower bounds on cube coordinates, or the most negative corner of the
    /// box.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cube coordinates, or the most positive corner of the
    /// box.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// The range of X coordinates for unit cubes within the box.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::X)
    }

    /// The range of Y coordinates for unit cubes within the box.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Y)
    }

    /// The range of Z coordinates for unit cubes within the box.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.axis_range(Axis::Z)
    }

    /// The range of coordinates for cubes within the box along the given axis.
    #[inline]
    pub fn axis_range(&self, axis: Axis) -> Range<GridCoordinate> {
        (self.lower_bounds()[axis])..(self.upper_bounds()[axis])
    }

    /// Iterate over all cubes that this contains.
    ///
    /// Cubes are produced with X as the outermost loop and Z as the innermost.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Cube, GridAab};
    ///
    /// let b = GridAab::from_lower_upper([10, 20, 30], [12, 21, 32]);
    /// assert_eq!(
    ///     b.interior_iter().collect::<Vec<Cube>>(),
    ///     &[
    ///         Cube::new(10, 20, 30),
    ///         Cube::new(10, 20, 31),
    ///         Cube::new(11, 20, 30),
    ///         Cube::new(11, 20, 31),
    ///     ])
    /// ```
    #[inline]
    pub fn interior_iter(self) -> GridIter {
        GridIter::new(self)
    }

    /// Returns whether the box includes the given cube position in its volume.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{GridAab, Cube};
    ///
    /// let b = GridAab::from_lower_upper([4, 4, 4], [10, 10, 10]);
    /// assert!(!b.contains_cube([3, 5, 5].into()));
    /// assert!(b.contains_cube([4, 5, 5].into()));
    /// assert!(b.contains_cube([9, 5, 5].into()));
    /// assert!(!b.contains_cube([10, 5, 5].into()));
    /// ```
    #[inline]
    pub fn contains_cube(&self, cube: Cube) -> bool {
        let cube_lower = cube.lower_bounds();
        Axis::ALL.into_iter().all(|axis| {
            cube_lower[axis] >= self.lower_bounds[axis] && cube_lower[axis] < self.upper_bounds[axis]
        })
    }

    /// Converts this box to floating-point coordinates.
    #[inline]
    pub fn to_free(self) -> Aab {
        Aab::from_lower_upper(
            self.lower_bounds.map(FreeCoordinate::from),
            self.upper_bounds.map(FreeCoordinate::from),
        )
    }
}

impl fmt::Debug for GridAab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GridAab")
            .field(&self.x_range())
            .field(&self.y_range())
            .field(&self.z_range())
            .finish()
    }
}

impl From<GridAab> for Aab {
    #[inline]
    fn from(value: GridAab) -> Self {
        value.to_free()
    }
}

/// Error when a [`GridAab`] cannot be constructed from the given input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GridOverflowError {
    lower_bounds: GridPoint,
    upper_bounds: GridPoint,
}

impl fmt::Display for GridOverflowError {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GridAab's lower bounds {} were greater than upper bounds {}",
            self.lower_bounds.refmt(&ConciseDebug),
            self.upper_bounds.refmt(&ConciseDebug)
        )
    }
}

impl core::error::Error for GridOverflowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use alloc::vec::Vec;
    use euclid::point3;

    #[test]
    fn zero_is_valid() {
        assert!(GridAab::ORIGIN_EMPTY.is_empty());
        assert_eq!(GridAab::ORIGIN_EMPTY.interior_iter().count(), 0);
    }

    #[test]
    fn inverted_error_message() {
        let error = GridAab::checked_from_lower_upper([1, 0, 0], [0, 1, 1]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "GridAab's lower bounds (+1, +0, +0) were greater than upper bounds (+0, +1, +1)"
        );
    }

    #[test]
    fn unit_box_contains_only_its_cube() {
        let cube = Cube::new(-3, 4, 5);
        let aab = GridAab::from_lower_upper([-3, 4, 5], [-2, 5, 6]);
        assert!(aab.contains_cube(cube));
        assert_eq!(aab.interior_iter().collect::<Vec<_>>(), vec![cube]);
        assert_eq!(aab.to_free(), cube.aab());
    }

    #[test]
    fn debug() {
        let b = GridAab::from_lower_upper(point3(1, 2, 3), point3(10, 20, 30));
        assert_eq!(format!("{b:?}"), "GridAab(1..10, 2..20, 3..30)");
    }
}
