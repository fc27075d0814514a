use core::cmp::Ordering;

use crate::math::{Aab, Cube, FreePoint, FreeVector};
use crate::physics::Body;
use crate::world::{World, block_collisions_in};

/// What a body is standing on, as determined after its last move.
///
/// A body may be grounded without any block supporting it, for example when standing
/// on another body; [`SupportingBlock::no_support_blocks()`] distinguishes that from
/// not being grounded at all.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SupportingBlock {
    cube: Option<Cube>,
    no_support_blocks: bool,
}

impl SupportingBlock {
    pub(crate) const fn new(cube: Option<Cube>, no_support_blocks: bool) -> Self {
        Self {
            cube,
            no_support_blocks,
        }
    }

    /// The cube of the block the body is standing on.
    pub fn cube(&self) -> Option<Cube> {
        self.cube
    }

    /// Whether the body was grounded but no block under it could be found.
    pub fn no_support_blocks(&self) -> bool {
        self.no_support_blocks
    }
}

/// Updates the record of which block `body` is standing on.
///
/// If `grounded`, the blocks just below the body are searched, and the one whose
/// center is nearest the body's position is chosen. When nothing is found there and
/// the body has just moved by `movement`, the search is repeated where the body was
/// before it moved horizontally, since a body that walked off an edge this tick is
/// still supported by the block it left.
pub fn update_supporting_block(
    body: &mut Body,
    world: &dyn World,
    grounded: bool,
    movement: Option<FreeVector>,
) {
    if !grounded {
        body.support = SupportingBlock::default();
        return;
    }

    let bounding_box = body.bounding_box();
    let lower = bounding_box.lower_bounds_p();
    let upper = bounding_box.upper_bounds_p();
    let probe = Aab::new(
        lower.x,
        upper.x,
        lower.y - world.physics().support_probe_thickness,
        lower.y,
        lower.z,
        upper.z,
    );

    let position = body.position();
    let mut found = find_supporting_block(world, probe, position);
    let cube = if found.is_some() || body.support.no_support_blocks {
        found
    } else if let Some(movement) = movement {
        found = find_supporting_block(
            world,
            probe.translate(FreeVector::new(-movement.x, 0.0, -movement.z)),
            position,
        );
        found
    } else {
        body.support.cube
    };
    body.support = SupportingBlock::new(cube, found.is_none());
}

/// Returns the cube of the block overlapping `probe` that is nearest to `position`.
///
/// Ties are broken by lowest Y, then Z, then X, so that the choice is stable.
fn find_supporting_block(
    world: &dyn World,
    probe: Aab,
    position: FreePoint,
) -> Option<Cube> {
    block_collisions_in(world, probe)
        .filter(|(_, volume)| volume.overlaps(probe))
        .map(|(cube, _)| cube)
        .min_by(|a, b| {
            a.center_distance_squared(position)
                .total_cmp(&b.center_distance_squared(position))
                .then_with(|| tie_break(*a, *b))
        })
}

fn tie_break(a: Cube, b: Cube) -> Ordering {
    (a.y, a.z, a.x).cmp(&(b.y, b.z, b.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyId;
    use crate::world::{BlockState, MemoryWorld};
    use euclid::{point3, vec3};
    use pretty_assertions::assert_eq;

    fn two_blocks() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.set_block([0, 0, 0], BlockState::solid("a"));
        world.set_block([1, 0, 0], BlockState::solid("b"));
        world
    }

    fn body_at(x: f64) -> Body {
        Body::new(BodyId(1), [x, 1.0, 0.5], 0.6, 1.8)
    }

    #[test]
    fn not_grounded_clears() {
        let world = two_blocks();
        let mut body = body_at(0.5);
        body.support = SupportingBlock::new(Some(Cube::ORIGIN), true);
        update_supporting_block(&mut body, &world, false, None);
        assert_eq!(body.supporting_block(), SupportingBlock::default());
    }

    #[test]
    fn nearest_block_is_chosen() {
        let world = two_blocks();
        let mut body = body_at(1.1);
        update_supporting_block(&mut body, &world, true, None);
        assert_eq!(body.supporting_block().cube(), Some(Cube::new(1, 0, 0)));
        assert!(!body.supporting_block().no_support_blocks());
        assert!(body.is_supported_by(Cube::new(1, 0, 0)));
    }

    #[test]
    fn equidistant_tie_is_stable() {
        let world = two_blocks();
        let mut body = body_at(1.0);
        update_supporting_block(&mut body, &world, true, None);
        assert_eq!(body.supporting_block().cube(), Some(Cube::new(0, 0, 0)));
    }

    #[test]
    fn retries_where_the_body_came_from() {
        let world = two_blocks();
        // Just walked off the +X edge of block b.
        let mut body = body_at(2.5);
        update_supporting_block(&mut body, &world, true, Some(vec3(0.5, 0.0, 0.0)));
        assert_eq!(body.supporting_block().cube(), Some(Cube::new(1, 0, 0)));
        assert!(!body.supporting_block().no_support_blocks());
    }

    #[test]
    fn without_hint_keeps_previous_cube() {
        let world = two_blocks();
        let mut body = body_at(0.5);
        update_supporting_block(&mut body, &world, true, None);
        body.set_position(point3(5.5, 1.0, 0.5));
        update_supporting_block(&mut body, &world, true, None);
        assert_eq!(
            body.supporting_block(),
            SupportingBlock::new(Some(Cube::ORIGIN), true)
        );
        // Once known to be unsupported, the search result is used as is.
        update_supporting_block(&mut body, &world, true, None);
        assert_eq!(body.supporting_block(), SupportingBlock::new(None, true));
    }
}
