use alloc::vec::Vec;

use crate::math::Aab;
use crate::physics::Body;
use crate::shape::CollisionVolume;
use crate::world::{World, block_collisions_in};

/// Gathers every collision volume that a box sweeping through `query` might hit.
///
/// The result contains, in order:
///
/// 1. `entity_volumes`, which the caller usually obtains from
///    [`World::entity_collisions()`] once and reuses for repeated queries;
/// 2. the world border, if `body` is near it;
/// 3. the shapes of all blocks that intersect `query`.
///
/// Volumes that merely touch `query` are included, since a box resting against a face
/// must still be stopped by it.
pub fn collect(
    world: &dyn World,
    body: Option<&Body>,
    query: Aab,
    entity_volumes: &[CollisionVolume],
) -> Vec<CollisionVolume> {
    let mut volumes: Vec<CollisionVolume> = Vec::with_capacity(entity_volumes.len() + 8);
    volumes.extend_from_slice(entity_volumes);
    if let Some(body) = body
        && world.is_near_border(body, query)
    {
        volumes.push(world.border_volume());
    }
    volumes.extend(block_collisions_in(world, query).map(|(_, volume)| volume));
    volumes
}

/// Returns whether anything solid occupies part of `query`.
///
/// Unlike [`collect()`], this ignores volumes that only touch the query's faces, so a
/// body standing on the floor has no collision at its own position.
pub fn has_collision(world: &dyn World, body: Option<&Body>, query: Aab) -> bool {
    block_collisions_in(world, query).any(|(_, volume)| volume.overlaps(query))
        || world
            .entity_collisions(body, query)
            .iter()
            .any(|volume| volume.overlaps(query))
        || body.is_some_and(|body| {
            world.is_near_border(body, query) && world.border_volume().overlaps(query)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GridAab;
    use crate::physics::BodyId;
    use crate::world::{BlockState, MemoryWorld, WorldBorder};

    fn world_with_floor() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.fill(
            GridAab::from_lower_upper([-2, -1, -2], [2, 0, 2]),
            &BlockState::solid("stone"),
        );
        world
    }

    #[test]
    fn empty_region_is_empty() {
        let world = MemoryWorld::new();
        let query = Aab::new(0.0, 1.0, 5.0, 6.0, 0.0, 1.0);
        assert!(collect(&world, None, query, &[]).is_empty());
        assert!(!has_collision(&world, None, query));
    }

    #[test]
    fn entities_come_first_then_blocks() {
        let world = world_with_floor();
        let entity = CollisionVolume::from_aab(Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
        let query = Aab::new(0.2, 0.8, -0.5, 1.5, 0.2, 0.8);
        let volumes = collect(&world, None, query, core::slice::from_ref(&entity));
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0], entity);
    }

    #[test]
    fn touching_is_collected_but_not_a_collision() {
        let world = world_with_floor();
        let standing = Aab::new(0.2, 0.8, 0.0, 1.8, 0.2, 0.8);
        assert_eq!(collect(&world, None, standing, &[]).len(), 1);
        assert!(!has_collision(&world, None, standing));
        assert!(has_collision(
            &world,
            None,
            standing.translate(euclid::vec3(0.0, -0.1, 0.0))
        ));
    }

    #[test]
    fn border_included_only_near_it() {
        let mut world = MemoryWorld::new();
        world.set_border(WorldBorder::square(0.0, 0.0, 10.0));
        let near = Body::new(BodyId(1), [4.5, 0.0, 0.0], 0.6, 1.8);
        let far = Body::new(BodyId(2), [0.0, 0.0, 0.0], 0.6, 1.8);
        assert_eq!(
            collect(&world, Some(&near), near.bounding_box(), &[]),
            vec![world.border_volume()]
        );
        assert!(collect(&world, Some(&far), far.bounding_box(), &[]).is_empty());
        assert!(collect(&world, None, near.bounding_box(), &[]).is_empty());
    }
}
