use alloc::vec::Vec;

use itertools::Itertools as _;

use crate::math::{Aab, Axis, FreeCoordinate, FreeVector, horizontal_length_squared};
use crate::physics::{Body, collect, resolve};
use crate::shape::CollisionVolume;
use crate::world::World;

/// Extra depth below the body included in the step-up query when it is standing still
/// vertically, so that the surface it stands on contributes a candidate height.
const GROUND_PROBE_DEPTH: FreeCoordinate = 1e-5;

/// Given that `desired` was reduced to `resolved` by [`resolve()`], tries to find a
/// small upward offset which lets the body climb over whatever blocked it.
///
/// This is attempted only if the body can step at all, is grounded or has just landed,
/// and was blocked horizontally. Candidate heights are the tops and bottoms of nearby
/// shapes no higher than the body's step height; the lowest one which lets the body
/// travel farther horizontally than `resolved` is used. If none does, `resolved` is
/// returned unchanged.
///
/// `entity_volumes` are the other bodies' shapes, as passed to [`collect()`] when
/// `resolved` was computed.
pub fn try_step_up(
    world: &dyn World,
    body: &Body,
    desired: FreeVector,
    resolved: FreeVector,
    entity_volumes: &[CollisionVolume],
) -> FreeVector {
    let max_step = body.max_step_height();
    let blocked_x = desired.x != resolved.x;
    let blocked_z = desired.z != resolved.z;
    let landed = desired.y != resolved.y && desired.y < 0.0;
    if !(max_step > 0.0 && (landed || body.is_grounded()) && (blocked_x || blocked_z)) {
        return resolved;
    }

    let bounding_box = body.bounding_box();
    let base = if landed {
        bounding_box.translate(FreeVector::new(0.0, resolved.y, 0.0))
    } else {
        bounding_box
    };
    let mut probe = base.expand_towards(FreeVector::new(desired.x, max_step, desired.z));
    if !landed {
        probe = probe.expand_towards(FreeVector::new(0.0, -GROUND_PROBE_DEPTH, 0.0));
    }
    let volumes = collect(world, Some(body), probe, entity_volumes);

    let resolved_horizontal = horizontal_length_squared(resolved);
    for height in candidate_heights(base, &volumes, max_step, resolved.y) {
        let attempt = resolve(FreeVector::new(desired.x, height, desired.z), base, &volumes);
        if horizontal_length_squared(attempt) > resolved_horizontal {
            log::trace!(
                "{} stepped up {height} to move {attempt:?} instead of {resolved:?}",
                body.id()
            );
            let base_offset = base.lower_bounds_p().y - bounding_box.lower_bounds_p().y;
            return attempt + FreeVector::new(0.0, base_offset, 0.0);
        }
    }
    resolved
}

/// Returns the heights, relative to the bottom of `base`, of the horizontal faces of
/// `volumes` that a body could step up to, in ascending order.
///
/// `skip` (the vertical movement already found) is excluded, and so is `max_step` itself
/// unless it is the only candidate.
fn candidate_heights(
    base: Aab,
    volumes: &[CollisionVolume],
    max_step: FreeCoordinate,
    skip: FreeCoordinate,
) -> Vec<FreeCoordinate> {
    let bottom = base.lower_bounds_p().y;
    let mut heights: Vec<FreeCoordinate> = volumes
        .iter()
        .flat_map(|volume| volume.coords(Axis::Y))
        .map(|y| y - bottom)
        .filter(|&h| (0.0..=max_step).contains(&h) && h != skip)
        .sorted_by(FreeCoordinate::total_cmp)
        .dedup()
        .collect();
    if heights.len() > 1 {
        heights.retain(|&h| h != max_step);
    }
    heights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GridAab;
    use crate::physics::BodyId;
    use crate::shape::Shape;
    use crate::world::{BlockState, MemoryWorld};
    use euclid::vec3;
    use pretty_assertions::assert_eq;

    fn curb_world(curb_height: f64) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.fill(
            GridAab::from_lower_upper([-2, -1, -2], [4, 0, 3]),
            &BlockState::solid("stone"),
        );
        world.set_block(
            [1, 0, 0],
            BlockState::with_shape("curb", Aab::new(0.0, 1.0, 0.0, curb_height, 0.0, 1.0)),
        );
        world
    }

    /// Body standing on the floor with its front face touching the curb.
    fn walker() -> Body {
        let mut body =
            Body::new(BodyId(1), [0.5, 0.0, 0.5], 1.0, 1.0).with_max_step_height(0.6);
        body.on_ground = true;
        body
    }

    fn step(world: &MemoryWorld, body: &Body, desired: FreeVector) -> FreeVector {
        let query = body.bounding_box().expand_towards(desired);
        let volumes = collect(world, Some(body), query, &[]);
        let resolved = resolve(desired, body.bounding_box(), &volumes);
        try_step_up(world, body, desired, resolved, &[])
    }

    #[test]
    fn steps_onto_low_curb() {
        let world = curb_world(0.3);
        let stepped = step(&world, &walker(), vec3(0.5, -0.1, 0.0));
        assert_eq!(stepped.x, 0.5);
        assert!((stepped.y - 0.3).abs() < 1e-9, "{stepped:?}");
        assert_eq!(stepped.z, 0.0);
    }

    #[test]
    fn does_not_step_onto_tall_curb() {
        let world = curb_world(0.75);
        assert_eq!(
            step(&world, &walker(), vec3(0.5, -0.1, 0.0)),
            vec3(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn not_attempted_while_airborne() {
        let world = curb_world(0.3);
        let mut body = walker();
        body.on_ground = false;
        // Moving up, so not landing either.
        assert_eq!(
            step(&world, &body, vec3(0.5, 0.1, 0.0)),
            vec3(0.0, 0.1, 0.0)
        );
    }

    #[test]
    fn not_attempted_without_step_height() {
        let world = curb_world(0.3);
        let mut body = Body::new(BodyId(1), [0.5, 0.0, 0.5], 1.0, 1.0);
        body.on_ground = true;
        assert_eq!(
            step(&world, &body, vec3(0.5, -0.1, 0.0)),
            vec3(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn candidates_exclude_skip_and_max() {
        let base = Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let volumes = [
            CollisionVolume::new(Shape::UnitCube, vec3(0.0, -1.0, 0.0)),
            CollisionVolume::from_aab(Aab::new(1.0, 2.0, 0.0, 0.25, 0.0, 1.0)),
            CollisionVolume::from_aab(Aab::new(1.0, 2.0, 0.5, 0.75, 0.0, 1.0)),
        ];
        assert_eq!(candidate_heights(base, &volumes, 0.5, 0.0), vec![0.25]);
        assert_eq!(
            candidate_heights(base, &volumes, 1.0, 0.0),
            vec![0.25, 0.5, 0.75]
        );
        // The maximum is kept when it is all there is.
        assert_eq!(candidate_heights(base, &volumes[..1], 0.0, -1.0), vec![0.0]);
    }
}
