use core::cmp::Ordering;
use core::fmt;
use core::ops::Range;

use euclid::{Point3D, Size3D, Vector3D};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{Axis, Cube, FreeCoordinate, FreePoint, FreeVector, GridAab, GridCoordinate};

/// Axis-Aligned Box data type.
///
/// Note that this has continuous coordinates, and a discrete analogue exists as
/// [`GridAab`].
///
/// Bodies, collision shapes, and query regions are all expressed as [`Aab`]s.
/// The coordinates may be infinite (world border shapes extend forever) but never NaN.
#[derive(Copy, Clone, PartialEq)]
pub struct Aab {
    lower_bounds: FreePoint,
    upper_bounds: FreePoint,
}

impl Aab {
    /// The [`Aab`] of zero size at the origin.
    pub const ZERO: Aab = Aab {
        lower_bounds: Point3D::new(0., 0., 0.),
        upper_bounds: Point3D::new(0., 0., 0.),
    };

    /// The [`Aab`] of the cube whose lower corner is the origin; a full block's shape.
    pub const UNIT_CUBE: Aab = Aab {
        lower_bounds: Point3D::new(0., 0., 0.),
        upper_bounds: Point3D::new(1., 1., 1.),
    };

    /// Constructs an [`Aab`] from individual coordinates.
    #[inline]
    #[track_caller]
    pub fn new(
        lx: FreeCoordinate,
        hx: FreeCoordinate,
        ly: FreeCoordinate,
        hy: FreeCoordinate,
        lz: FreeCoordinate,
        hz: FreeCoordinate,
    ) -> Self {
        Self::from_lower_upper(Point3D::new(lx, ly, lz), Point3D::new(hx, hy, hz))
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Panics if the points are not in the proper order or if they are NaN.
    #[inline]
    #[track_caller]
    pub fn from_lower_upper(
        lower_bounds: impl Into<FreePoint>,
        upper_bounds: impl Into<FreePoint>,
    ) -> Self {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into();
        match Self::checked_from_lower_upper(lower_bounds, upper_bounds) {
            Some(aab) => aab,
            None => panic!(
                "invalid AAB points that are misordered or NaN: \
                lower {lower_bounds:?} upper {upper_bounds:?}"
            ),
        }
    }

    /// Constructs an [`Aab`] from most-negative and most-positive corner points.
    ///
    /// Returns [`None`] if the points are not in the proper order or if they are NaN.
    #[inline]
    pub fn checked_from_lower_upper(
        lower_bounds: FreePoint,
        upper_bounds: FreePoint,
    ) -> Option<Self> {
        if lower_bounds.x <= upper_bounds.x
            && lower_bounds.y <= upper_bounds.y
            && lower_bounds.z <= upper_bounds.z
        {
            Some(Self {
                lower_bounds,
                upper_bounds,
            })
        } else {
            None
        }
    }

    /// Constructs the box of the given size whose bottom face is centered on `foot`.
    ///
    /// This is how a body's box is derived from its position.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Aab, FreePoint};
    ///
    /// assert_eq!(
    ///     Aab::from_foot(FreePoint::new(1.0, 2.0, 3.0), 0.5, 2.0),
    ///     Aab::new(0.75, 1.25, 2.0, 4.0, 2.75, 3.25),
    /// );
    /// ```
    #[inline]
    #[track_caller]
    pub fn from_foot(foot: FreePoint, width: FreeCoordinate, height: FreeCoordinate) -> Self {
        let half = width / 2.0;
        Self::new(
            foot.x - half,
            foot.x + half,
            foot.y,
            foot.y + height,
            foot.z - half,
            foot.z + half,
        )
    }

    /// The most negative corner of the box, as a [`Point3D`].
    #[inline]
    pub const fn lower_bounds_p(&self) -> FreePoint {
        self.lower_bounds
    }

    /// The most positive corner of the box, as a [`Point3D`].
    #[inline]
    pub const fn upper_bounds_p(&self) -> FreePoint {
        self.upper_bounds
    }

    /// The range of coordinates the box covers on the given axis.
    #[inline]
    pub fn axis_range(&self, axis: Axis) -> Range<FreeCoordinate> {
        self.lower_bounds[axis]..self.upper_bounds[axis]
    }

    /// Size of the box in each axis; equivalent to
    /// `self.upper_bounds() - self.lower_bounds()`.
    ///
    /// Note that due to floating-point rounding, translating one corner point by the size
    /// does not necessarily exactly reach the opposite corner.
    /// Therefore, in cases where exact comparisons matter, take care to prefer the corner
    /// points over calculating with the size.
    #[inline]
    pub fn size(&self) -> Size3D<FreeCoordinate, Cube> {
        Size3D::from(self.upper_bounds - self.lower_bounds)
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Aab, FreePoint};
    ///
    /// let aab = Aab::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    /// assert_eq!(aab.center(), FreePoint::new(1.5, 3.5, 5.5));
    /// ```
    #[inline]
    pub fn center(&self) -> FreePoint {
        (self.lower_bounds + self.upper_bounds.to_vector()) * 0.5
    }

    /// Returns whether this AAB, including the boundary, intersects the other AAB.
    #[inline]
    pub fn intersects(&self, other: Aab) -> bool {
        for axis in Axis::ALL {
            let intersection_min = self.lower_bounds[axis].max(other.lower_bounds[axis]);
            let intersection_max = self.upper_bounds[axis].min(other.upper_bounds[axis]);
            match intersection_min.partial_cmp(&intersection_max) {
                Some(Ordering::Less | Ordering::Equal) => {}
                _ => return false,
            }
        }
        true
    }

    /// Returns whether the interiors of the two boxes overlap; that is, whether they
    /// share some volume, not merely a face, edge, or corner.
    ///
    /// This is the test collision uses: a body resting exactly on a surface does not
    /// overlap it.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::Aab;
    ///
    /// let floor = Aab::new(0.0, 1.0, -1.0, 0.0, 0.0, 1.0);
    /// let resting = Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
    /// assert!(resting.intersects(floor));
    /// assert!(!resting.overlaps(floor));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: Aab) -> bool {
        Axis::ALL.into_iter().all(|axis| self.overlaps_on_axis(other, axis))
    }

    /// Returns whether the open ranges of the two boxes on `axis` overlap.
    #[inline]
    pub fn overlaps_on_axis(&self, other: Aab, axis: Axis) -> bool {
        self.lower_bounds[axis] < other.upper_bounds[axis]
            && other.lower_bounds[axis] < self.upper_bounds[axis]
    }

    /// Translate this box by the specified offset.
    ///
    /// Note that due to rounding error, the result may not have the same size.
    #[inline]
    #[must_use]
    #[track_caller] // in case of NaN
    pub fn translate(self, offset: FreeVector) -> Self {
        Self::from_lower_upper(self.lower_bounds + offset, self.upper_bounds + offset)
    }

    /// Enlarges the AAB by moving each face outward by the specified distance (or inward
    /// if negative).
    ///
    /// If this would result in a negative or NaN size, produces a zero size AAB located
    /// at the center point of `self`.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::Aab;
    ///
    /// assert_eq!(
    ///     Aab::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).expand(0.25),
    ///     Aab::new(0.75, 2.25, 2.75, 4.25, 4.75, 6.25)
    /// );
    /// ````
    #[must_use]
    #[inline]
    pub fn expand(self, distance: FreeCoordinate) -> Self {
        let distance_vec = Vector3D::splat(distance);
        match Self::checked_from_lower_upper(
            self.lower_bounds - distance_vec,
            self.upper_bounds + distance_vec,
        ) {
            Some(aab) => aab,
            None => {
                let center = self.center();
                Aab::from_lower_upper(center, center)
            }
        }
    }

    /// Extends the box in the direction of `motion`, so that it covers every position
    /// the box would pass through while moving by `motion`.
    ///
    /// Only the faces facing along `motion` move; the opposite faces stay put.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Aab, FreeVector};
    ///
    /// assert_eq!(
    ///     Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0).expand_towards(FreeVector::new(0.5, -2.0, 0.0)),
    ///     Aab::new(0.0, 1.5, -2.0, 1.0, 0.0, 1.0),
    /// );
    /// ```
    #[must_use]
    #[inline]
    #[track_caller] // in case of NaN
    pub fn expand_towards(self, motion: FreeVector) -> Self {
        let mut lower = self.lower_bounds;
        let mut upper = self.upper_bounds;
        for axis in Axis::ALL {
            let d = motion[axis];
            if d < 0.0 {
                lower[axis] += d;
            } else if d > 0.0 {
                upper[axis] += d;
            }
        }
        Self::from_lower_upper(lower, upper)
    }

    /// Construct the [`GridAab`] containing all cubes this [`Aab`] intersects.
    ///
    /// Grid cubes are considered to be half-open ranges, so, for example, an [`Aab`] with
    /// exact integer bounds on some axis will convert exactly as one might intuitively
    /// expect, while non-integer bounds will be rounded outward:
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::{Aab, GridAab};
    ///
    /// let grid_aab = Aab::from_lower_upper([3.0, 0.5, 0.0], [5.0, 1.5, 1.0])
    ///     .round_up_to_grid();
    /// assert_eq!(grid_aab, GridAab::from_lower_upper([3, 0, 0], [5, 2, 1]));
    ///
    /// assert!(grid_aab.contains_cube([4, 1, 0].into()));
    /// assert!(!grid_aab.contains_cube([5, 1, 0].into()));
    /// ```
    ///
    /// If the floating-point coordinates are out of [`GridCoordinate`]'s numeric range,
    /// then they will be clamped.
    #[inline]
    pub fn round_up_to_grid(self) -> GridAab {
        GridAab::from_lower_upper(
            self.lower_bounds.map(|c| c.floor() as GridCoordinate),
            self.upper_bounds.map(|c| c.ceil() as GridCoordinate),
        )
    }
}

impl fmt::Debug for Aab {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Aab {
            lower_bounds: l,
            upper_bounds: u,
        } = *self;
        f.debug_tuple("Aab")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// [`Aab`] rejects NaN values, so it can implement [`Eq`]
/// even though it contains floats.
impl Eq for Aab {}
