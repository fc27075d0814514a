//! The world that bodies move through, as seen by movement code.
//!
//! Storage of blocks, fluids, and other bodies belongs to the caller; movement only
//! needs to ask questions about it, through [`World`], and to announce side effects,
//! through [`Effects`]. [`MemoryWorld`] and [`EffectLog`] are simple implementations
//! of those traits.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::{fmt, ops};

use arcstr::ArcStr;
use hashbrown::HashMap as HbHashMap;
use manyfmt::Refmt as _;

use crate::math::{Aab, Cube, FreeCoordinate, FreePoint, FreeVector, GridAab};
use crate::physics::{Body, BodyId, PhysicsConfig, ReactionError};
use crate::shape::{COLLISION_EPSILON, CollisionVolume, Shape};
use crate::util::ConciseDebug;

#[cfg(doc)]
use crate::physics::move_body;

// -------------------------------------------------------------------------------------------------

bitflags::bitflags! {
    /// Properties of a block that movement treats specially.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct BlockFlags: u8 {
        /// Passing through this block cancels accumulated fall distance (e.g. cobwebs).
        const FALL_DAMAGE_RESETTING = 1 << 0;
        /// Bodies overlapping this block keep burning (e.g. fire).
        const BURNING = 1 << 1;
        /// A column of rising bubbles, which puts out burning bodies.
        const BUBBLE_COLUMN = 1 << 2;
        /// Powder snow: slows bodies inside it and puts out burning bodies.
        const POWDER_SNOW = 1 << 3;
        /// Ladders and the like; vertical movement on them counts toward step sounds.
        const CLIMBABLE = 1 << 4;
    }
}

/// Everything movement needs to know about the block occupying one cube.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct BlockState {
    /// Name of the block, for diagnostics and step sounds.
    pub name: ArcStr,
    /// Solid part of the block, relative to the cube's lower corner.
    pub collision: Shape,
    /// Fraction of horizontal velocity kept each tick by a body standing on this block.
    pub friction: FreeCoordinate,
    /// Multiplier applied to horizontal velocity of bodies in or on this block.
    pub speed_factor: FreeCoordinate,
    /// Multiplier applied to jumps made from this block.
    pub jump_factor: FreeCoordinate,
    /// If set, bodies inside this block have their next movement scaled by this.
    pub stuck_multiplier: Option<FreeVector>,
    /// Fraction of downward velocity reflected when a body lands on this block.
    /// Zero means the body stops.
    pub bounce: FreeCoordinate,
    /// Special properties.
    pub flags: BlockFlags,
}

/// The block of empty space.
pub static AIR: BlockState = BlockState {
    name: arcstr::literal!("air"),
    collision: Shape::Empty,
    friction: 0.6,
    speed_factor: 1.0,
    jump_factor: 1.0,
    stuck_multiplier: None,
    bounce: 0.0,
    flags: BlockFlags::empty(),
};

impl BlockState {
    /// A full, solid cube with ordinary friction.
    pub fn solid(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            collision: Shape::UnitCube,
            ..AIR.clone()
        }
    }

    /// A block with the given collision shape and otherwise ordinary properties.
    pub fn with_shape(name: impl Into<ArcStr>, collision: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            collision: collision.into(),
            ..AIR.clone()
        }
    }

    /// Returns whether this is [`AIR`].
    pub fn is_air(&self) -> bool {
        self.name == AIR.name
    }

    /// Returns this block with the given flags added.
    #[must_use]
    pub fn flags(mut self, flags: BlockFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Returns this block with the given [`speed_factor`](Self::speed_factor).
    #[must_use]
    pub fn speed_factor(mut self, speed_factor: FreeCoordinate) -> Self {
        self.speed_factor = speed_factor;
        self
    }

    /// Returns this block with the given [`jump_factor`](Self::jump_factor).
    #[must_use]
    pub fn jump_factor(mut self, jump_factor: FreeCoordinate) -> Self {
        self.jump_factor = jump_factor;
        self
    }

    /// Returns this block with the given [`friction`](Self::friction).
    #[must_use]
    pub fn friction(mut self, friction: FreeCoordinate) -> Self {
        self.friction = friction;
        self
    }

    /// Returns this block with the given [`stuck_multiplier`](Self::stuck_multiplier).
    #[must_use]
    pub fn stuck_multiplier(mut self, multiplier: FreeVector) -> Self {
        self.stuck_multiplier = Some(multiplier);
        self
    }

    /// Returns this block with the given [`bounce`](Self::bounce).
    #[must_use]
    pub fn bounce(mut self, bounce: FreeCoordinate) -> Self {
        self.bounce = bounce;
        self
    }

    /// Returns this block's collision shape placed in the given cube, or [`None`] if it
    /// has none.
    pub fn collision_at(&self, cube: Cube) -> Option<CollisionVolume> {
        if self.collision.is_empty() {
            None
        } else {
            Some(CollisionVolume::new(self.collision.clone(), cube.offset()))
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// The kinds of fluid that push bodies around.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[expect(clippy::exhaustive_enums)]
pub enum FluidKind {
    #[expect(missing_docs)]
    Water = 0,
    #[expect(missing_docs)]
    Lava = 1,
}

impl FluidKind {
    /// All fluid kinds, in the order [`FluidBuoyancy`](crate::physics::update_fluids)
    /// processes them.
    pub const ALL: [Self; 2] = [Self::Water, Self::Lava];

    /// Returns whether being in this fluid puts out a burning body.
    pub const fn extinguishes_fire(self) -> bool {
        match self {
            FluidKind::Water => true,
            FluidKind::Lava => false,
        }
    }

    /// Returns whether being in this fluid sets a body on fire.
    pub const fn is_burning(self) -> bool {
        match self {
            FluidKind::Water => false,
            FluidKind::Lava => true,
        }
    }
}

/// A value for each [`FluidKind`], stored without any hashing.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[expect(clippy::exhaustive_structs)]
pub struct FluidMap<T> {
    #[expect(missing_docs)]
    pub water: T,
    #[expect(missing_docs)]
    pub lava: T,
}

impl<T> FluidMap<T> {
    /// Constructs a [`FluidMap`] by calling `f` for each kind.
    pub fn from_fn(mut f: impl FnMut(FluidKind) -> T) -> Self {
        Self {
            water: f(FluidKind::Water),
            lava: f(FluidKind::Lava),
        }
    }

    /// Returns an iterator over kinds and references to their values.
    pub fn iter(&self) -> impl Iterator<Item = (FluidKind, &T)> {
        [(FluidKind::Water, &self.water), (FluidKind::Lava, &self.lava)].into_iter()
    }
}

impl<T> ops::Index<FluidKind> for FluidMap<T> {
    type Output = T;
    fn index(&self, kind: FluidKind) -> &T {
        match kind {
            FluidKind::Water => &self.water,
            FluidKind::Lava => &self.lava,
        }
    }
}

impl<T> ops::IndexMut<FluidKind> for FluidMap<T> {
    fn index_mut(&mut self, kind: FluidKind) -> &mut T {
        match kind {
            FluidKind::Water => &mut self.water,
            FluidKind::Lava => &mut self.lava,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FluidMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Fluid occupying one cube.
#[derive(Clone, Copy, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct FluidState {
    /// What the fluid is.
    pub kind: FluidKind,
    /// Height of the fluid's surface above the cube's lower face, from 0 to 1.
    pub height: FreeCoordinate,
    /// Direction and speed of the current, which pushes bodies in it.
    pub flow: FreeVector,
}

impl FluidState {
    /// Still fluid filling the whole cube.
    pub fn full(kind: FluidKind) -> Self {
        Self {
            kind,
            height: 1.0,
            flow: FreeVector::zero(),
        }
    }
}

impl fmt::Debug for FluidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { kind, height, flow } = self;
        f.debug_struct("FluidState")
            .field("kind", kind)
            .field("height", height)
            .field("flow", &flow.refmt(&ConciseDebug))
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// The horizontal limits of the world, which bodies collide with when close to them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBorder {
    min_x: FreeCoordinate,
    max_x: FreeCoordinate,
    min_z: FreeCoordinate,
    max_z: FreeCoordinate,
}

impl WorldBorder {
    /// A border infinitely far away in every direction.
    pub const UNBOUNDED: Self = Self {
        min_x: FreeCoordinate::NEG_INFINITY,
        max_x: FreeCoordinate::INFINITY,
        min_z: FreeCoordinate::NEG_INFINITY,
        max_z: FreeCoordinate::INFINITY,
    };

    /// A square border of side length `size` centered on the given horizontal position.
    pub fn square(center_x: FreeCoordinate, center_z: FreeCoordinate, size: FreeCoordinate) -> Self {
        let half = size / 2.0;
        Self {
            min_x: center_x - half,
            max_x: center_x + half,
            min_z: center_z - half,
            max_z: center_z + half,
        }
    }

    /// Horizontal distance from `point` to the nearest edge of the border;
    /// negative if the point is outside.
    pub fn distance_to(&self, point: FreePoint) -> FreeCoordinate {
        (point.x - self.min_x)
            .min(self.max_x - point.x)
            .min(point.z - self.min_z)
            .min(self.max_z - point.z)
    }

    /// Returns whether a body at `position` which is querying `query` is close enough to
    /// the border that the border's [`collision_volume()`](Self::collision_volume)
    /// must be included.
    pub fn is_near(&self, position: FreePoint, query: Aab) -> bool {
        let size = query.size();
        let margin = size.width.max(size.depth).max(1.0);
        self.distance_to(position) < margin * 2.0
            && position.x >= self.min_x - margin
            && position.x < self.max_x + margin
            && position.z >= self.min_z - margin
            && position.z < self.max_z + margin
    }

    /// Returns the solid region outside the border, as four slabs extending to infinity.
    pub fn collision_volume(&self) -> CollisionVolume {
        const INF: FreeCoordinate = FreeCoordinate::INFINITY;
        let Self {
            min_x,
            max_x,
            min_z,
            max_z,
        } = *self;
        let slabs = [
            Aab::new(-INF, min_x, -INF, INF, -INF, INF),
            Aab::new(max_x, INF, -INF, INF, -INF, INF),
            Aab::new(-INF, INF, -INF, INF, -INF, min_z),
            Aab::new(-INF, INF, -INF, INF, max_z, INF),
        ];
        CollisionVolume::new(Shape::Boxes(Arc::new(slabs)), FreeVector::zero())
    }
}

impl Default for WorldBorder {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

// -------------------------------------------------------------------------------------------------

/// Read access to the world, for movement.
///
/// All queries are synchronous and expected to be cheap; they are made many times per
/// moving body per tick.
pub trait World {
    /// Returns the block occupying `cube`; [`AIR`] where there is nothing.
    fn block(&self, cube: Cube) -> &BlockState;

    /// Returns the fluid occupying `cube`, if any.
    fn fluid(&self, cube: Cube) -> Option<FluidState>;

    /// Returns the collision shapes of other bodies, such as boats, that intersect
    /// `query`. `requester`'s own shape, if it has one, must be excluded.
    fn entity_collisions(&self, requester: Option<&Body>, query: Aab) -> Vec<CollisionVolume>;

    /// Returns the border of the world.
    fn border(&self) -> &WorldBorder;

    /// Returns the physics parameters in effect.
    fn physics(&self) -> &PhysicsConfig;

    /// Returns whether rain is falling on `cube`.
    fn is_raining_at(&self, cube: Cube) -> bool {
        _ = cube;
        false
    }

    /// Returns the collision shapes of all blocks that intersect `query`.
    fn block_collisions(&self, query: Aab) -> Vec<CollisionVolume> {
        block_collisions_in(self, query)
            .map(|(_, volume)| volume)
            .collect()
    }

    /// Returns whether `requester`, querying `query`, is close enough to the world border
    /// to collide with it.
    fn is_near_border(&self, requester: &Body, query: Aab) -> bool {
        self.border().is_near(requester.position(), query)
    }

    /// Returns the collision volume of the world border.
    fn border_volume(&self) -> CollisionVolume {
        self.border().collision_volume()
    }
}

/// Iterates over the cubes whose blocks' collision shapes intersect `query`, along with
/// those shapes in world coordinates.
///
/// Blocks one cube below the query are included, since some shapes (such as fences)
/// extend above their own cube.
pub(crate) fn block_collisions_in<W: World + ?Sized>(
    world: &W,
    query: Aab,
) -> impl Iterator<Item = (Cube, CollisionVolume)> + '_ {
    let grid = query.expand(COLLISION_EPSILON).round_up_to_grid();
    let lower = grid.lower_bounds();
    let grid = GridAab::from_lower_upper(
        [lower.x, lower.y.saturating_sub(1), lower.z],
        grid.upper_bounds(),
    );
    grid.interior_iter().filter_map(move |cube| {
        let volume = world.block(cube).collision_at(cube)?;
        volume.intersects(query).then_some((cube, volume))
    })
}

// -------------------------------------------------------------------------------------------------

/// Sounds that movement asks to be played.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Sound {
    /// A footstep on the named block.
    Step {
        /// Cube the step landed on.
        cube: Cube,
        /// Name of the block stepped on.
        block: ArcStr,
    },
    /// A swimming stroke.
    Swim,
    /// Falling into water.
    Splash,
    /// A burning body being put out.
    FireExtinguished,
}

/// Events that movement reports to listeners such as sensors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GameEvent {
    /// A body took a step.
    Step,
    /// A body swam a stroke.
    Swim,
}

/// Receives the side effects of movement.
///
/// Sounds and events are fire-and-forget. The block reactions may fail, in which case
/// [`move_body()`] stops and reports a [`CrashReport`](crate::physics::CrashReport).
///
/// Every method does nothing by default, and `()` implements this trait that way.
pub trait Effects {
    /// A sound should be played at `body`'s position.
    fn sound(&mut self, body: &Body, sound: Sound) {
        _ = (body, sound);
    }

    /// An event happened at `body`'s position.
    fn game_event(&mut self, body: &Body, event: GameEvent) {
        _ = (body, event);
    }

    /// `body` just landed on `block` at `cube`, after falling `fall_distance`.
    fn landed_on(
        &mut self,
        body: &mut Body,
        cube: Cube,
        block: &BlockState,
        fall_distance: FreeCoordinate,
    ) -> Result<(), ReactionError> {
        _ = (body, cube, block, fall_distance);
        Ok(())
    }

    /// `body` is standing on `block` at `cube`, which it was not standing on last tick.
    fn stepped_on(
        &mut self,
        body: &mut Body,
        cube: Cube,
        block: &BlockState,
    ) -> Result<(), ReactionError> {
        _ = (body, cube, block);
        Ok(())
    }

    /// `body` overlaps `block` at `cube` after moving.
    fn inside_block(
        &mut self,
        body: &mut Body,
        cube: Cube,
        block: &BlockState,
    ) -> Result<(), ReactionError> {
        _ = (body, cube, block);
        Ok(())
    }
}

impl Effects for () {}

/// An [`Effects`] which records sounds, events, and landings, for tests and tools.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectLog {
    sounds: Vec<(BodyId, Sound)>,
    events: Vec<(BodyId, GameEvent)>,
    landings: Vec<(BodyId, Cube, FreeCoordinate)>,
}

impl EffectLog {
    /// Constructs an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds played so far.
    pub fn sounds(&self) -> &[(BodyId, Sound)] {
        &self.sounds
    }

    /// Events reported so far.
    pub fn events(&self) -> &[(BodyId, GameEvent)] {
        &self.events
    }

    /// Landings so far, with the fall distance of each.
    pub fn landings(&self) -> &[(BodyId, Cube, FreeCoordinate)] {
        &self.landings
    }

    /// Forgets everything recorded.
    pub fn clear(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.landings.clear();
    }
}

impl Effects for EffectLog {
    fn sound(&mut self, body: &Body, sound: Sound) {
        self.sounds.push((body.id(), sound));
    }

    fn game_event(&mut self, body: &Body, event: GameEvent) {
        self.events.push((body.id(), event));
    }

    fn landed_on(
        &mut self,
        body: &mut Body,
        cube: Cube,
        _: &BlockState,
        fall_distance: FreeCoordinate,
    ) -> Result<(), ReactionError> {
        self.landings.push((body.id(), cube, fall_distance));
        Ok(())
    }
}

// -------------------------------------------------------------------------------------------------

/// A [`World`] stored in hash maps, with a fixed set of entity shapes.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorld {
    blocks: HbHashMap<Cube, BlockState>,
    fluids: HbHashMap<Cube, FluidState>,
    entities: Vec<(Option<BodyId>, CollisionVolume)>,
    border: WorldBorder,
    physics: PhysicsConfig,
    raining: bool,
}

impl MemoryWorld {
    /// Constructs a world containing only air, with default physics and no border.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `block` at `cube`. Placing [`AIR`] removes whatever was there.
    pub fn set_block(&mut self, cube: impl Into<Cube>, block: BlockState) {
        let cube = cube.into();
        if block.is_air() {
            self.blocks.remove(&cube);
        } else {
            self.blocks.insert(cube, block);
        }
    }

    /// Places `block` in every cube of `region`.
    pub fn fill(&mut self, region: GridAab, block: &BlockState) {
        for cube in region.interior_iter() {
            self.set_block(cube, block.clone());
        }
    }

    /// Places or removes fluid at `cube`.
    pub fn set_fluid(&mut self, cube: impl Into<Cube>, fluid: Option<FluidState>) {
        let cube = cube.into();
        match fluid {
            Some(fluid) => {
                self.fluids.insert(cube, fluid);
            }
            None => {
                self.fluids.remove(&cube);
            }
        }
    }

    /// Adds a solid box that belongs to another body. The `owner` does not collide with
    /// its own box.
    pub fn add_entity_box(&mut self, owner: Option<BodyId>, aab: Aab) {
        self.entities.push((owner, CollisionVolume::from_aab(aab)));
    }

    /// Replaces the world border.
    pub fn set_border(&mut self, border: WorldBorder) {
        self.border = border;
    }

    /// Replaces the physics parameters.
    pub fn set_physics(&mut self, physics: PhysicsConfig) {
        self.physics = physics;
    }

    /// Sets whether it is raining everywhere.
    pub fn set_raining(&mut self, raining: bool) {
        self.raining = raining;
    }
}

impl World for MemoryWorld {
    fn block(&self, cube: Cube) -> &BlockState {
        self.blocks.get(&cube).unwrap_or(&AIR)
    }

    fn fluid(&self, cube: Cube) -> Option<FluidState> {
        self.fluids.get(&cube).copied()
    }

    fn entity_collisions(&self, requester: Option<&Body>, query: Aab) -> Vec<CollisionVolume> {
        let requester = requester.map(Body::id);
        self.entities
            .iter()
            .filter(|(owner, volume)| {
                (owner.is_none() || *owner != requester) && volume.intersects(query)
            })
            .map(|(_, volume)| volume.clone())
            .collect()
    }

    fn border(&self) -> &WorldBorder {
        &self.border
    }

    fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    fn is_raining_at(&self, _: Cube) -> bool {
        self.raining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point3;
    use pretty_assertions::assert_eq;

    #[test]
    fn air_is_default_and_removable() {
        let mut world = MemoryWorld::new();
        assert!(world.block(Cube::ORIGIN).is_air());
        world.set_block([0, 0, 0], BlockState::solid("stone"));
        assert_eq!(world.block(Cube::ORIGIN).name.as_str(), "stone");
        world.set_block([0, 0, 0], AIR.clone());
        assert!(world.block(Cube::ORIGIN).is_air());
    }

    #[test]
    fn block_collisions_include_touching_and_tall_blocks() {
        let mut world = MemoryWorld::new();
        world.set_block([0, 0, 0], BlockState::solid("stone"));
        world.set_block(
            [3, -1, 0],
            BlockState::with_shape("fence", Aab::new(0.25, 0.75, 0.0, 1.5, 0.25, 0.75)),
        );
        world.set_block([10, 0, 0], BlockState::solid("far"));

        // Touches the top of the stone and pokes into the fence, which is in the cube below.
        let query = Aab::new(0.0, 4.0, 1.0, 2.0, 0.0, 1.0);
        let cubes: Vec<Cube> = block_collisions_in(&world, query).map(|(c, _)| c).collect();
        assert_eq!(cubes, vec![Cube::new(0, 0, 0)]);

        let query = Aab::new(0.0, 4.0, 0.25, 2.0, 0.0, 1.0);
        let cubes: Vec<Cube> = block_collisions_in(&world, query).map(|(c, _)| c).collect();
        assert_eq!(cubes, vec![Cube::new(0, 0, 0), Cube::new(3, -1, 0)]);
        assert_eq!(world.block_collisions(query).len(), 2);
    }

    #[test]
    fn entity_collisions_exclude_owner() {
        let mut world = MemoryWorld::new();
        let body = Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8);
        world.add_entity_box(Some(BodyId(1)), Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
        world.add_entity_box(Some(BodyId(2)), Aab::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
        world.add_entity_box(None, Aab::new(5.0, 6.0, 0.0, 1.0, 0.0, 1.0));
        let query = Aab::new(-10.0, 10.0, -10.0, 10.0, -10.0, 10.0);
        assert_eq!(world.entity_collisions(Some(&body), query).len(), 2);
        assert_eq!(world.entity_collisions(None, query).len(), 3);
    }

    #[test]
    fn border_nearness() {
        let border = WorldBorder::square(0.0, 0.0, 20.0);
        let query = Aab::new(-0.3, 0.3, 0.0, 1.8, -0.3, 0.3);
        assert!(!border.is_near(point3(0.0, 0.0, 0.0), query));
        assert!(border.is_near(point3(9.0, 0.0, 0.0), query));
        assert!(border.is_near(point3(0.0, 0.0, -10.5), query));
        assert!(!border.is_near(point3(0.0, 0.0, -12.0), query));
        assert!(!WorldBorder::UNBOUNDED.is_near(point3(1e9, 0.0, 0.0), query));
    }

    #[test]
    fn border_volume_stops_movement() {
        let border = WorldBorder::square(0.0, 0.0, 20.0);
        let body = Aab::new(8.0, 9.0, 0.0, 1.0, 0.0, 1.0);
        let volume = border.collision_volume();
        assert_eq!(volume.clip(crate::math::Axis::X, body, 5.0), 1.0);
        assert_eq!(volume.clip(crate::math::Axis::Y, body, -5.0), -5.0);
        assert!(!volume.overlaps(body));
    }

    #[test]
    fn fluid_map_indexing() {
        let mut map = FluidMap::from_fn(|kind| kind as u8);
        map[FluidKind::Lava] += 10;
        assert_eq!(map, FluidMap { water: 0, lava: 11 });
        assert_eq!(format!("{map:?}"), "{Water: 0, Lava: 11}");
    }

    #[test]
    fn fluid_kind_all_is_exhaustive() {
        use exhaust::Exhaust as _;
        assert_eq!(FluidKind::exhaust().collect::<Vec<_>>(), FluidKind::ALL.to_vec());
    }

    #[test]
    fn effect_log_records() {
        let body = Body::new(BodyId(4), [0.0, 0.0, 0.0], 1.0, 1.0);
        let mut log = EffectLog::new();
        log.sound(&body, Sound::Splash);
        log.game_event(&body, GameEvent::Swim);
        assert_eq!(log.sounds(), &[(BodyId(4), Sound::Splash)]);
        assert_eq!(log.events(), &[(BodyId(4), GameEvent::Swim)]);
        log.clear();
        assert_eq!(log, EffectLog::new());
    }
}
