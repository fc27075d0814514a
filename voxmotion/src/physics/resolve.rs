use crate::math::{Aab, Axis, FreeCoordinate, FreeVector};
use crate::shape::CollisionVolume;

/// Reduces `desired`, the displacement a box would like to make, to the largest
/// displacement along the same path that does not pass into any of `volumes`.
///
/// The displacement is resolved one axis at a time, moving the box after each:
/// Y first, then whichever horizontal axis has the larger magnitude, then the other.
/// Consequently, a box sliding diagonally into a wall keeps its movement along the wall,
/// and a falling box lands before it is moved sideways.
///
/// Each component of the result has the same sign as the corresponding component of
/// `desired` (or is zero) and no greater magnitude.
///
/// ```
/// use voxmotion::math::{Aab, FreeVector};
/// use voxmotion::physics::resolve;
/// use voxmotion::shape::CollisionVolume;
///
/// let floor = CollisionVolume::from_aab(Aab::new(-5.0, 5.0, -1.0, 0.0, -5.0, 5.0));
/// let body = Aab::new(0.0, 1.0, 0.5, 2.5, 0.0, 1.0);
/// assert_eq!(
///     resolve(FreeVector::new(0.25, -1.0, 0.0), body, &[floor]),
///     FreeVector::new(0.25, -0.5, 0.0),
/// );
/// ```
pub fn resolve(desired: FreeVector, moving: Aab, volumes: &[CollisionVolume]) -> FreeVector {
    if volumes.is_empty() {
        return desired;
    }

    let mut moving = moving;
    let mut resolved = FreeVector::zero();

    let y = if desired.y != 0.0 {
        clip_all(Axis::Y, moving, desired.y, volumes)
    } else {
        0.0
    };
    resolved.y = y;
    if y != 0.0 {
        moving = moving.translate(FreeVector::new(0.0, y, 0.0));
    }

    let (first, second) = if desired.x.abs() < desired.z.abs() {
        (Axis::Z, Axis::X)
    } else {
        (Axis::X, Axis::Z)
    };

    let d = clip_all(first, moving, desired[first], volumes);
    resolved[first] = d;
    if d != 0.0 {
        let mut offset = FreeVector::zero();
        offset[first] = d;
        moving = moving.translate(offset);
    }

    resolved[second] = clip_all(second, moving, desired[second], volumes);

    resolved
}

/// Clips the displacement `d` along `axis` against every volume in turn.
fn clip_all(
    axis: Axis,
    moving: Aab,
    mut d: FreeCoordinate,
    volumes: &[CollisionVolume],
) -> FreeCoordinate {
    for volume in volumes {
        if d == 0.0 {
            break;
        }
        d = volume.clip(axis, moving, d);
    }
    d
}
