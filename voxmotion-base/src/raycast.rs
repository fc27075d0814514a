//! Traversal of the cube grid along rays and line segments.

use euclid::Vector3D;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{Axis, Cube, FreeCoordinate, FreePoint, FreeVector, GridCoordinate, GridPoint};

mod ray;
pub use ray::Ray;

// -------------------------------------------------------------------------------------------------

/// Vector unit type for units of "t" (ray-length).
enum Tc {}

/// Iterator over grid positions that intersect a given ray.
///
/// The grid is of unit cubes which are identified by the integer coordinates of
/// their most negative corners, the same definition used by [`Cube`].
//
//---
//
// Implementation notes:
//
// From "A Fast Voxel Traversal Algorithm for Ray Tracing"
// by John Amanatides and Andrew Woo, 1987
// <http://www.cse.yorku.ca/~amana/research/grid.pdf>
//
// The foundation of this algorithm is a parameterized representation of
// the provided ray,
//                    origin + t * direction,
// except that t is not actually stored; rather, at any given point in the
// traversal, we keep track of the *greater* t values which we would have
// if we took a step sufficient to cross a cube boundary along that axis
// (i.e. change the integer part of the coordinate) in the components of
// t_max.
#[derive(Clone, Debug, PartialEq)]
pub struct Raycaster {
    /// Which way to increment `cube` when stepping; signum of the ray’s direction’s components.
    step: Vector3D<GridCoordinate, Cube>,

    /// Each component of this is the change in t when taking a full grid step along a given axis.
    /// Each is always positive, and infinite if the ray direction is perpendicular to that axis.
    t_delta: Vector3D<FreeCoordinate, Tc>,

    /// `t_max` stores the t-value at which we would next cross a cube boundary,
    /// for each axis in which we could move. Thus, the least element of `t_max`
    /// is the next intersection between the grid and the ray.
    t_max: Vector3D<FreeCoordinate, Tc>,

    /// Cube we're in; always the next cube to return from the iterator.
    cube: GridPoint,

    /// Axis crossed to reach `cube`, or [`None`] if `cube` contains the origin.
    last_axis: Option<Axis>,

    /// The `t_max` value used in the previous step; thus, the position along the
    /// ray where we entered `cube`.
    last_t_distance: FreeCoordinate,

    /// Steps whose `t_distance` is greater than this are not produced.
    t_limit: FreeCoordinate,

    ended: bool,
}

impl Raycaster {
    /// Construct a [`Raycaster`] for a ray with the given `origin` and `direction` vector.
    ///
    /// The magnitude of `direction` has no effect on the sequence of cubes traversed
    /// but may affect calculation precision, so should not be especially large or small.
    /// It also appears as the scale of the output field [`RaycastStep::t_distance()`].
    ///
    /// Note that this is an infinite iterator by default. Use [`.until()`](Self::until)
    /// to restrict it.
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::Cube;
    /// use voxmotion::raycast::Raycaster;
    ///
    /// let mut r = Raycaster::new([0.5, 0.5, 0.5], [1.0, 0.5, 0.0]);
    /// let mut next = || r.next().unwrap();
    ///
    /// // The cube containing the origin point is always the first cube reported.
    /// assert_eq!(next().cube_ahead(), Cube::new(0, 0, 0));
    /// assert_eq!(next().cube_ahead(), Cube::new(1, 0, 0));
    /// assert_eq!(next().cube_ahead(), Cube::new(1, 1, 0));
    /// assert_eq!(next().cube_ahead(), Cube::new(2, 1, 0));
    /// ```
    #[must_use]
    #[allow(clippy::missing_inline_in_public_items, reason = "is generic already")]
    pub fn new(origin: impl Into<FreePoint>, direction: impl Into<FreeVector>) -> Self {
        Self::new_impl(origin.into(), direction.into())
    }

    fn new_impl(origin: FreePoint, mut direction: FreeVector) -> Self {
        // A ray whose direction vector is infinite or very large cannot be processed
        // correctly because we rely on discriminating between different `t` values.
        // Treat it as no stepping.
        if !(direction.x.abs() < 1e100 && direction.y.abs() < 1e100 && direction.z.abs() < 1e100)
        {
            direction = Vector3D::zero();
        }

        let Some(cube) = Cube::containing(origin) else {
            // No enclosing cube means there is nothing meaningful to report.
            return Self {
                step: Vector3D::zero(),
                t_delta: Vector3D::splat(FreeCoordinate::INFINITY),
                t_max: Vector3D::splat(FreeCoordinate::INFINITY),
                cube: GridPoint::origin(),
                last_axis: None,
                last_t_distance: 0.0,
                t_limit: FreeCoordinate::INFINITY,
                ended: true,
            };
        };

        Self {
            step: direction.map(signum_101),
            t_delta: direction.map(|x| x.abs().recip()).cast_unit(),
            t_max: origin
                .to_vector()
                .zip(direction, scale_to_integer_step)
                .cast_unit(),
            cube: cube.lower_bounds(),
            last_axis: None,
            last_t_distance: 0.0,
            t_limit: FreeCoordinate::INFINITY,
            ended: false,
        }
    }

    /// Restrict the cubes iterated over to those which the ray enters at or before
    /// `t_limit` multiples of its direction vector.
    ///
    /// With a limit of `1.0`, this visits exactly the cubes touched by the line segment
    /// from the origin to the ray's [unit endpoint](Ray::unit_endpoint).
    ///
    /// ```
    /// # extern crate voxmotion_base as voxmotion;
    /// use voxmotion::math::Cube;
    /// use voxmotion::raycast::Raycaster;
    ///
    /// let cubes: Vec<Cube> = Raycaster::new([0.5, 3.5, 0.5], [0.0, -2.0, 0.0])
    ///     .until(1.0)
    ///     .map(|step| step.cube_ahead())
    ///     .collect();
    /// assert_eq!(cubes, [Cube::new(0, 3, 0), Cube::new(0, 2, 0), Cube::new(0, 1, 0)]);
    /// ```
    #[must_use]
    #[inline]
    pub fn until(mut self, t_limit: FreeCoordinate) -> Self {
        self.t_limit = self.t_limit.min(t_limit);
        self
    }

    /// Returns whether a [`Self::step()`] will be able to make forward progress
    /// (rather than leaving the state unchanged because the ray points in no direction
    /// or the state is no longer numerically valid).
    fn valid_for_stepping(&self) -> bool {
        let t_max: [FreeCoordinate; 3] = self.t_max.into();
        self.step != Vector3D::zero()
            && !t_max.iter().any(|t| t.is_nan())
            && t_max.iter().any(|t| t.is_finite())
    }

    /// Determine the axis to step on and move in the appropriate direction along that axis.
    ///
    /// If this step would overflow the [`GridCoordinate`] range, returns [`Err`].
    fn step(&mut self) -> Result<(), ()> {
        // t_max stores the t-value at which we cross a cube boundary along each axis.
        // Therefore, choosing the least t_max axis chooses the closest cube boundary.
        let axis: Axis = if self.t_max.x < self.t_max.y {
            if self.t_max.x < self.t_max.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else {
            if self.t_max.y < self.t_max.z {
                Axis::Y
            } else {
                Axis::Z
            }
        };

        self.last_t_distance = self.t_max[axis];
        self.cube[axis] = self.cube[axis]
            .checked_add(self.step[axis])
            .ok_or(())?;
        self.t_max[axis] += self.t_delta[axis];
        self.last_axis = Some(axis);

        Ok(())
    }
}

impl Iterator for Raycaster {
    type Item = RaycastStep;

    #[inline]
    fn next(&mut self) -> Option<RaycastStep> {
        if self.ended || self.last_t_distance > self.t_limit {
            self.ended = true;
            return None;
        }

        let item = RaycastStep {
            cube: Cube::from(self.cube),
            axis: self.last_axis,
            t_distance: self.last_t_distance,
        };

        if !self.valid_for_stepping() || self.step().is_err() {
            // Can't make progress, so stop rather than accidentally looping infinitely.
            self.ended = true;
        }
        Some(item)
    }
}

impl core::iter::FusedIterator for Raycaster {}

/// Describes a ray crossing into a cube as defined by [`Raycaster`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastStep {
    cube: Cube,
    axis: Option<Axis>,
    t_distance: FreeCoordinate,
}

impl RaycastStep {
    /// Returns the cube which the raycaster has just found the ray to intersect.
    ///
    /// Note that the cube containing the origin of the ray, if any, will be included.
    #[inline]
    pub fn cube_ahead(&self) -> Cube {
        self.cube
    }

    /// Returns the axis perpendicular to the face the ray crossed to enter
    /// [`Self::cube_ahead()`], or [`None`] if the ray started within that cube.
    #[inline]
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// The distance traversed so far, as measured in multiples of the ray's direction vector.
    #[inline]
    #[mutants::skip] // trivial, but modifying it can cause test hangs
    pub fn t_distance(&self) -> FreeCoordinate {
        self.t_distance
    }
}

// -------------------------------------------------------------------------------------------------

/// 3-valued signum (zero produces zero) rather than the 2-valued one Rust gives,
/// and with an integer result.
fn signum_101(x: FreeCoordinate) -> GridCoordinate {
    if x == 0.0 {
        0
    } else {
        x.signum() as GridCoordinate
    }
}

/// Find the smallest positive `t` such that `s + t * ds` is an integer.
///
/// If `ds` is zero, returns positive infinity; this is a useful answer because
/// it means that the less-than comparisons in the raycast algorithm will never pick
/// the corresponding axis. If any input is NaN, returns NaN.
fn scale_to_integer_step(mut s: FreeCoordinate, mut ds: FreeCoordinate) -> FreeCoordinate {
    if ds == 0.0 && !s.is_nan() {
        // Explicitly handle zero case.
        // This almost could be implicit, but it is possible for the below division to
        // return NaN instead of +inf, in the case where (1.0 - s) rounds down to zero.
        return FreeCoordinate::INFINITY;
    } else if ds < 0.0 {
        // Simplify to positive case only.
        // Note that the previous condition eliminated the case of negative zero.
        s = -s;
        ds = -ds;
    }

    let s = s - s.floor();
    // problem is now s + t * ds = 1
    (1.0 - s) / ds
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;

    fn cubes_of(r: Raycaster) -> Vec<Cube> {
        r.map(|step| step.cube_ahead()).collect()
    }

    #[test]
    fn zero_direction_yields_only_origin_cube() {
        assert_eq!(
            cubes_of(Raycaster::new([0.5, 0.5, 0.5], [0.0, 0.0, 0.0])),
            vec![Cube::new(0, 0, 0)]
        );
    }

    #[test]
    fn nan_origin_yields_nothing() {
        assert_eq!(
            cubes_of(Raycaster::new([FreeCoordinate::NAN, 0.5, 0.5], [1.0, 0.0, 0.0])),
            vec![]
        );
    }

    #[test]
    fn segment_negative_direction() {
        assert_eq!(
            cubes_of(Raycaster::new([2.5, 0.5, 0.5], [-1.2, 0.0, 0.0]).until(1.0)),
            vec![Cube::new(2, 0, 0), Cube::new(1, 0, 0)]
        );
    }

    #[test]
    fn step_axes_are_reported() {
        let steps: Vec<Option<Axis>> = Raycaster::new([0.5, 0.5, 0.5], [0.0, 1.0, 1.0])
            .until(1.0)
            .map(|step| step.axis())
            .collect();
        // Exactly diagonal; ties go to Z.
        assert_eq!(steps, vec![None, Some(Axis::Z), Some(Axis::Y)]);
    }

    #[test]
    fn scale_to_integer_step_basics() {
        assert_eq!(scale_to_integer_step(1.5, 0.5), 1.0);
        assert_eq!(scale_to_integer_step(1.5, -0.5), 1.0);
        assert_eq!(scale_to_integer_step(0.0, 2.0), 0.5);
        assert_eq!(scale_to_integer_step(0.25, 0.0), FreeCoordinate::INFINITY);
    }
}
