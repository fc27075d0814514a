//! Collision shapes made of unions of boxes.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use euclid::Vector3D;
use itertools::Itertools as _;
use manyfmt::Refmt as _;

use crate::math::{Aab, Axis, FreeCoordinate, FreeVector};
use crate::util::ConciseDebug;

/// Boxes whose faces are closer than this are considered touching, and displacements
/// smaller than this are considered to be no movement at all.
pub(crate) const COLLISION_EPSILON: FreeCoordinate = 1e-7;

/// The solid part of something, such as a block, as a union of boxes in its own
/// local coordinates.
///
/// Blocks' shapes are given relative to the lower corner of the cube they occupy,
/// so [`Shape::UnitCube`] is a full block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Shape {
    /// Nothing to collide with.
    #[default]
    Empty,
    /// The box from `(0, 0, 0)` to `(1, 1, 1)`.
    UnitCube,
    /// Any union of boxes.
    Boxes(Arc<[Aab]>),
}

static UNIT_CUBE_BOXES: [Aab; 1] = [Aab::UNIT_CUBE];

impl Shape {
    /// Returns the boxes making up this shape.
    pub fn boxes(&self) -> &[Aab] {
        match self {
            Shape::Empty => &[],
            Shape::UnitCube => &UNIT_CUBE_BOXES,
            Shape::Boxes(boxes) => boxes,
        }
    }

    /// Returns whether this shape has no boxes to collide with.
    pub fn is_empty(&self) -> bool {
        self.boxes().is_empty()
    }
}

impl From<Aab> for Shape {
    fn from(aab: Aab) -> Self {
        Shape::Boxes(Arc::from([aab]))
    }
}

impl From<Vec<Aab>> for Shape {
    fn from(boxes: Vec<Aab>) -> Self {
        if boxes.is_empty() {
            Shape::Empty
        } else {
            Shape::Boxes(boxes.into())
        }
    }
}

/// A [`Shape`] placed somewhere in the world, against which moving boxes are swept.
///
/// Collision volumes are gathered fresh for each query and dropped afterward;
/// they describe the world as it was when they were made.
#[derive(Clone, PartialEq)]
pub struct CollisionVolume {
    shape: Shape,
    offset: FreeVector,
}

impl CollisionVolume {
    /// Places `shape` with its local origin at `offset`.
    pub fn new(shape: impl Into<Shape>, offset: FreeVector) -> Self {
        Self {
            shape: shape.into(),
            offset,
        }
    }

    /// A volume consisting of one box, in world coordinates.
    pub fn from_aab(aab: Aab) -> Self {
        Self::new(aab, Vector3D::zero())
    }

    /// Moves the volume by `offset`.
    #[must_use]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            shape: self.shape,
            offset: self.offset + offset,
        }
    }

    /// Returns whether there is nothing solid in this volume.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Returns the boxes of this volume, in world coordinates.
    pub fn boxes(&self) -> impl Iterator<Item = Aab> + '_ {
        self.shape.boxes().iter().map(|aab| aab.translate(self.offset))
    }

    /// Returns whether any box of this volume intersects `query`, boundaries included.
    pub fn intersects(&self, query: Aab) -> bool {
        self.boxes().any(|aab| aab.intersects(query))
    }

    /// Returns whether any box of this volume shares some volume with `query`.
    pub fn overlaps(&self, query: Aab) -> bool {
        self.boxes().any(|aab| aab.overlaps(query))
    }

    /// Returns the positions along `axis` of every face of this volume perpendicular to
    /// that axis, sorted ascending without duplicates.
    ///
    /// ```
    /// use voxmotion::math::{Aab, Axis};
    /// use voxmotion::shape::CollisionVolume;
    ///
    /// let slab = CollisionVolume::from_aab(Aab::new(0.0, 1.0, 0.0, 0.5, 0.0, 1.0));
    /// assert_eq!(slab.coords(Axis::Y), vec![0.0, 0.5]);
    /// ```
    pub fn coords(&self, axis: Axis) -> Vec<FreeCoordinate> {
        self.boxes()
            .flat_map(|aab| {
                let range = aab.axis_range(axis);
                [range.start, range.end]
            })
            .sorted_by(FreeCoordinate::total_cmp)
            .dedup()
            .collect()
    }

    /// Reduces the displacement `d` along `axis`, so that `moving` translated by it does
    /// not pass into any box of this volume.
    ///
    /// Only boxes that `moving` overlaps on the other two axes, and that lie ahead of it
    /// along `axis`, can stop it; boxes it already penetrates are ignored. The result
    /// has the same sign as `d` and no greater magnitude, and is exactly zero if the
    /// permitted movement is negligible.
    ///
    /// ```
    /// use voxmotion::math::{Aab, Axis};
    /// use voxmotion::shape::CollisionVolume;
    ///
    /// let wall = CollisionVolume::from_aab(Aab::new(2.0, 3.0, 0.0, 1.0, 0.0, 1.0));
    /// let moving = Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
    /// assert_eq!(wall.clip(Axis::X, moving, 5.0), 1.0);
    /// assert_eq!(wall.clip(Axis::X, moving, 0.5), 0.5);
    /// assert_eq!(wall.clip(Axis::X, moving, -5.0), -5.0);
    /// ```
    pub fn clip(&self, axis: Axis, moving: Aab, mut d: FreeCoordinate) -> FreeCoordinate {
        if d.abs() < COLLISION_EPSILON {
            return 0.0;
        }
        let [other_1, other_2] = [axis.increment(), axis.decrement()];
        let moving_range = moving.axis_range(axis);
        for aab in self.boxes() {
            if !overlaps_within_epsilon(moving, aab, other_1)
                || !overlaps_within_epsilon(moving, aab, other_2)
            {
                continue;
            }
            let range = aab.axis_range(axis);
            if d > 0.0 && moving_range.end <= range.start + COLLISION_EPSILON {
                d = d.min((range.start - moving_range.end).max(0.0));
            } else if d < 0.0 && moving_range.start >= range.end - COLLISION_EPSILON {
                d = d.max((range.end - moving_range.start).min(0.0));
            }
            if d.abs() < COLLISION_EPSILON {
                return 0.0;
            }
        }
        d
    }
}

/// Like [`Aab::overlaps_on_axis`], but boxes must overlap by more than
/// [`COLLISION_EPSILON`], so that a box resting on a surface with rounding error
/// still slides along it.
fn overlaps_within_epsilon(a: Aab, b: Aab, axis: Axis) -> bool {
    let a = a.axis_range(axis);
    let b = b.axis_range(axis);
    a.start + COLLISION_EPSILON < b.end && b.start + COLLISION_EPSILON < a.end
}

impl fmt::Debug for CollisionVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { shape, offset } = self;
        f.debug_struct("CollisionVolume")
            .field("shape", shape)
            .field("offset", &offset.refmt(&ConciseDebug))
            .finish()
    }
}
