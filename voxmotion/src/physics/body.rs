use alloc::sync::Arc;
use core::fmt;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use manyfmt::{Fmt, Refmt as _};

use crate::math::{
    Aab, Cube, FreeCoordinate, FreePoint, FreeVector, GridCoordinate, is_finite_vector,
};
use crate::physics::{BodyKind, PistonBudget, PlainKind, SupportingBlock};
use crate::util::ConciseDebug;
use crate::world::{AIR, BlockState, FluidKind, FluidMap, World};

#[cfg(doc)]
use crate::physics::{move_body, update_fluids};

/// Offset below a body's position of the block whose friction and speed factor apply
/// to it.
const MOVEMENT_AFFECTING_OFFSET: FreeCoordinate = 0.500001;

/// Identifies a body, for excluding its own shape from collision queries and for
/// diagnostics.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[expect(clippy::exhaustive_structs)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An object with a position, velocity, and box-shaped collision volume, which moves
/// through a [`World`] by [`move_body()`].
///
/// The bounding box is always derived from the position and the body's dimensions:
/// it is centered horizontally on the position and extends upward from it.
#[derive(Clone)]
#[non_exhaustive]
pub struct Body {
    id: BodyId,
    kind: Arc<dyn BodyKind>,

    position: FreePoint,
    velocity: FreeVector,
    width: FreeCoordinate,
    height: FreeCoordinate,
    eye_height: FreeCoordinate,
    max_step_height: FreeCoordinate,

    /// Is this body not subject to collision? If so, moves are applied unchanged.
    pub no_physics: bool,
    /// Is this body riding another? Passengers make no step sounds.
    pub passenger: bool,
    /// Is this body swimming? Swimmers make no step sounds.
    pub swimming: bool,

    pub(crate) on_ground: bool,
    pub(crate) horizontal_collision: bool,
    pub(crate) minor_horizontal_collision: bool,
    pub(crate) vertical_collision: bool,
    pub(crate) vertical_collision_below: bool,
    pub(crate) support: SupportingBlock,
    /// Cube below the body when it was last grounded, for detecting stepping onto a new one.
    pub(crate) stepped_cube: Option<Cube>,

    pub(crate) piston_budget: PistonBudget,

    pub(crate) fluid_heights: FluidMap<FreeCoordinate>,
    pub(crate) eye_fluid: Option<FluidKind>,
    pub(crate) was_touching_water: bool,
    pub(crate) fluids_updated: bool,

    stuck_speed_multiplier: FreeVector,
    pub(crate) in_powder_snow: bool,

    fall_distance: FreeCoordinate,
    pub(crate) walk_distance: FreeCoordinate,
    pub(crate) move_distance: FreeCoordinate,
    pub(crate) next_step: FreeCoordinate,

    fire_ticks: i32,

    /// Cache of the block at the position; cleared whenever the position changes.
    in_block_state: Option<BlockState>,
    // When adding a field, don't forget to expand the Debug impl.
}

impl Body {
    /// Constructs a [`Body`] of [`PlainKind`] at rest.
    ///
    /// Its eye height is 85% of its height, and it cannot step up.
    #[track_caller]
    pub fn new(
        id: BodyId,
        position: impl Into<FreePoint>,
        width: FreeCoordinate,
        height: FreeCoordinate,
    ) -> Self {
        assert!(
            width >= 0.0 && height >= 0.0,
            "body dimensions must be non-negative, not {width} × {height}"
        );
        let position = position.into();
        Self {
            id,
            kind: Arc::new(PlainKind),
            position: if position.to_vector().square_length().is_finite() {
                position
            } else {
                FreePoint::origin()
            },
            velocity: FreeVector::zero(),
            width,
            height,
            eye_height: height * 0.85,
            max_step_height: 0.0,
            no_physics: false,
            passenger: false,
            swimming: false,
            on_ground: false,
            horizontal_collision: false,
            minor_horizontal_collision: false,
            vertical_collision: false,
            vertical_collision_below: false,
            support: SupportingBlock::default(),
            stepped_cube: None,
            piston_budget: PistonBudget::default(),
            fluid_heights: FluidMap::default(),
            eye_fluid: None,
            was_touching_water: false,
            fluids_updated: false,
            stuck_speed_multiplier: FreeVector::zero(),
            in_powder_snow: false,
            fall_distance: 0.0,
            walk_distance: 0.0,
            move_distance: 0.0,
            next_step: 1.0,
            fire_ticks: 0,
            in_block_state: None,
        }
    }

    /// Replaces the body's capabilities.
    #[must_use]
    pub fn with_kind(mut self, kind: Arc<dyn BodyKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the highest obstacle the body can walk up onto without jumping.
    #[must_use]
    pub fn with_max_step_height(mut self, max_step_height: FreeCoordinate) -> Self {
        self.max_step_height = max_step_height.max(0.0);
        self
    }

    /// Sets the height of the body's eyes above its position.
    #[must_use]
    pub fn with_eye_height(mut self, eye_height: FreeCoordinate) -> Self {
        self.eye_height = eye_height;
        self
    }

    /// Identity of this body.
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Capabilities of this body.
    pub fn kind(&self) -> &dyn BodyKind {
        &*self.kind
    }

    /// Position of the body: the center of the bottom face of its box.
    pub fn position(&self) -> FreePoint {
        self.position
    }

    /// Moves the body to the given position, without collision.
    ///
    /// Non-finite positions are ignored.
    pub fn set_position(&mut self, position: FreePoint) {
        if !position.to_vector().square_length().is_finite() {
            log::warn!(
                "ignoring non-finite position {:?} for body {}",
                position,
                self.id
            );
            return;
        }
        self.position = position;
        self.in_block_state = None;
    }

    /// Velocity of the body, in cubes per tick.
    pub fn velocity(&self) -> FreeVector {
        self.velocity
    }

    /// Replaces the body's velocity.
    ///
    /// Non-finite velocities are ignored.
    pub fn set_velocity(&mut self, velocity: FreeVector) {
        if !is_finite_vector(velocity) {
            log::warn!(
                "ignoring non-finite velocity {:?} for body {}",
                velocity,
                self.id
            );
            return;
        }
        self.velocity = velocity;
    }

    /// Width of the body along X and Z.
    pub fn width(&self) -> FreeCoordinate {
        self.width
    }

    /// Height of the body.
    pub fn height(&self) -> FreeCoordinate {
        self.height
    }

    /// The Y coordinate of the body's eyes.
    pub fn eye_y(&self) -> FreeCoordinate {
        self.position.y + self.eye_height
    }

    /// The highest obstacle the body can walk up onto without jumping.
    pub fn max_step_height(&self) -> FreeCoordinate {
        self.max_step_height
    }

    /// The body's collision box in world coordinates.
    pub fn bounding_box(&self) -> Aab {
        Aab::from_foot(self.position, self.width, self.height)
    }

    /// Returns whether the body's last move ended with it standing on something.
    pub fn is_grounded(&self) -> bool {
        self.on_ground
    }

    /// Returns whether the last move was blocked horizontally.
    pub fn horizontal_collision(&self) -> bool {
        self.horizontal_collision
    }

    /// Returns whether the last horizontal collision was only a glancing one, as judged
    /// by the body's [kind](BodyKind::is_horizontal_collision_minor).
    pub fn minor_horizontal_collision(&self) -> bool {
        self.minor_horizontal_collision
    }

    /// Returns whether the last move was blocked vertically.
    pub fn vertical_collision(&self) -> bool {
        self.vertical_collision
    }

    /// Returns whether the last move was blocked while moving downward.
    pub fn vertical_collision_below(&self) -> bool {
        self.vertical_collision_below
    }

    /// The cube the body is standing on, if any, and whether it is grounded without one.
    pub fn supporting_block(&self) -> SupportingBlock {
        self.support
    }

    /// Returns whether `cube` is the block this body is standing on.
    ///
    /// A body that is grounded without any supporting block, such as one standing on
    /// another body, is not supported by any cube.
    pub fn is_supported_by(&self, cube: Cube) -> bool {
        self.support.cube() == Some(cube)
    }

    /// This tick's piston movement budget.
    pub fn piston_budget(&self) -> &PistonBudget {
        &self.piston_budget
    }

    /// How deep, from the bottom of its box, the body is in the given fluid, as of the
    /// last [`update_fluids()`].
    pub fn fluid_height(&self, kind: FluidKind) -> FreeCoordinate {
        self.fluid_heights[kind]
    }

    /// Returns whether the body was in the given fluid as of the last [`update_fluids()`].
    pub fn is_in_fluid(&self, kind: FluidKind) -> bool {
        self.fluid_heights[kind] > 0.0
    }

    /// Returns which fluid, if any, covered the body's eyes as of the last
    /// [`update_fluids()`].
    pub fn eye_in_fluid(&self) -> Option<FluidKind> {
        self.eye_fluid
    }

    /// Distance fallen since the body last stood on something.
    pub fn fall_distance(&self) -> FreeCoordinate {
        self.fall_distance
    }

    /// Sets the distance fallen.
    pub fn set_fall_distance(&mut self, fall_distance: FreeCoordinate) {
        self.fall_distance = fall_distance;
    }

    /// Ticks of burning remaining; negative values are a cool-down during which the
    /// body cannot catch fire.
    pub fn fire_ticks(&self) -> i32 {
        self.fire_ticks
    }

    /// Sets the ticks of burning remaining.
    pub fn set_fire_ticks(&mut self, fire_ticks: i32) {
        self.fire_ticks = fire_ticks;
    }

    /// Returns whether the body is burning.
    pub fn is_on_fire(&self) -> bool {
        self.fire_ticks > 0
    }

    /// Scales the body's next move by `multiplier`, and stops it. This is how blocks like
    /// cobwebs slow bodies inside them.
    pub fn make_stuck(&mut self, multiplier: FreeVector) {
        self.fall_distance = 0.0;
        self.stuck_speed_multiplier = multiplier;
    }

    /// The pending multiplier set by [`Body::make_stuck()`], or zero.
    pub fn stuck_speed_multiplier(&self) -> FreeVector {
        self.stuck_speed_multiplier
    }

    pub(crate) fn take_stuck_speed_multiplier(&mut self) -> Option<FreeVector> {
        let multiplier = self.stuck_speed_multiplier;
        if multiplier.square_length() > 1e-7 {
            self.stuck_speed_multiplier = FreeVector::zero();
            Some(multiplier)
        } else {
            None
        }
    }

    /// Returns whether the body was in powder snow after its last move.
    pub fn in_powder_snow(&self) -> bool {
        self.in_powder_snow
    }

    /// Horizontal distance walked, scaled for step sounds.
    pub fn walk_distance(&self) -> FreeCoordinate {
        self.walk_distance
    }

    /// Total distance moved, scaled for step sounds.
    pub fn move_distance(&self) -> FreeCoordinate {
        self.move_distance
    }

    /// Returns the cube considered to be under the body, `y_offset` below its position.
    ///
    /// If the body has a supporting block, that block's column is used, so that a body
    /// hanging over an edge still counts as being on the block it is standing on.
    pub fn on_pos(&self, y_offset: FreeCoordinate) -> Cube {
        let y = (self.position.y - y_offset).floor() as GridCoordinate;
        match self.support.cube() {
            Some(supporting) if y_offset <= 1e-5 => supporting,
            Some(supporting) => supporting.with_y(y),
            None => Cube::new(
                self.position.x.floor() as GridCoordinate,
                y,
                self.position.z.floor() as GridCoordinate,
            ),
        }
    }

    /// Returns the cube whose block's friction and speed factor affect this body.
    pub fn block_pos_below_that_affects_movement(&self) -> Cube {
        self.on_pos(MOVEMENT_AFFECTING_OFFSET)
    }

    /// Returns the cube containing the body's position.
    pub fn cube(&self) -> Cube {
        Cube::containing(self.position).unwrap_or(Cube::ORIGIN)
    }

    /// Returns the block at the body's position, reading it from `world` only if the
    /// body has moved since the last call.
    pub fn in_block_state(&mut self, world: &dyn World) -> &BlockState {
        let cube = Cube::containing(self.position);
        self.in_block_state.get_or_insert_with(|| match cube {
            Some(cube) => world.block(cube).clone(),
            None => AIR.clone(),
        })
    }

    /// Returns the multiplier for jumps made by this body: that of the block it is in,
    /// or if that has none, of the block it is walking on.
    pub fn block_jump_factor(&mut self, world: &dyn World) -> FreeCoordinate {
        let factor = self.in_block_state(world).jump_factor;
        if factor == 1.0 {
            world
                .block(self.block_pos_below_that_affects_movement())
                .jump_factor
        } else {
            factor
        }
    }

    pub(crate) fn set_velocity_unchecked(&mut self, velocity: FreeVector) {
        self.velocity = velocity;
    }

    pub(crate) fn reset_fall_distance(&mut self) {
        self.fall_distance = 0.0;
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            id,
            kind,
            position,
            velocity,
            width,
            height,
            eye_height,
            max_step_height,
            no_physics,
            passenger,
            swimming,
            on_ground,
            horizontal_collision,
            minor_horizontal_collision,
            vertical_collision,
            vertical_collision_below,
            support,
            stepped_cube,
            piston_budget,
            fluid_heights,
            eye_fluid,
            was_touching_water,
            fluids_updated,
            stuck_speed_multiplier,
            in_powder_snow,
            fall_distance,
            walk_distance,
            move_distance,
            next_step,
            fire_ticks,
            in_block_state: _, // cache
        } = self;
        fmt.debug_struct("Body")
            .field("id", id)
            .field("kind", kind)
            .field("position", &position.refmt(&ConciseDebug))
            .field("velocity", &velocity.refmt(&ConciseDebug))
            .field("width", width)
            .field("height", height)
            .field("eye_height", eye_height)
            .field("max_step_height", max_step_height)
            .field("no_physics", no_physics)
            .field("passenger", passenger)
            .field("swimming", swimming)
            .field("on_ground", on_ground)
            .field("horizontal_collision", horizontal_collision)
            .field("minor_horizontal_collision", minor_horizontal_collision)
            .field("vertical_collision", vertical_collision)
            .field("vertical_collision_below", vertical_collision_below)
            .field("support", support)
            .field("stepped_cube", stepped_cube)
            .field("piston_budget", piston_budget)
            .field("fluid_heights", fluid_heights)
            .field("eye_fluid", eye_fluid)
            .field("was_touching_water", was_touching_water)
            .field("fluids_updated", fluids_updated)
            .field(
                "stuck_speed_multiplier",
                &stuck_speed_multiplier.refmt(&ConciseDebug),
            )
            .field("in_powder_snow", in_powder_snow)
            .field("fall_distance", fall_distance)
            .field("walk_distance", walk_distance)
            .field("move_distance", move_distance)
            .field("next_step", next_step)
            .field("fire_ticks", fire_ticks)
            .finish_non_exhaustive()
    }
}

/// Omits most state, for one-line log messages.
impl Fmt<ConciseDebug> for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        write!(
            fmt,
            "{} at {} moving {}",
            self.id,
            self.position.refmt(fopt),
            self.velocity.refmt(fopt),
        )?;
        if self.on_ground {
            write!(fmt, " grounded")?;
        }
        if self.no_physics {
            write!(fmt, " no-physics")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use crate::shape::Shape;
    use crate::world::MemoryWorld;
    use euclid::{point3, vec3};
    use pretty_assertions::assert_eq;

    fn test_body() -> Body {
        Body::new(BodyId(1), [0.5, 2.0, 0.5], 0.6, 1.8)
    }

    #[test]
    fn bounding_box_follows_position() {
        let mut body = test_body();
        assert_eq!(body.bounding_box(), Aab::new(0.2, 0.8, 2.0, 3.8, 0.2, 0.8));
        body.set_position(point3(10.0, 0.0, 0.0));
        assert_eq!(body.bounding_box(), Aab::new(9.7, 10.3, 0.0, 1.8, -0.3, 0.3));
    }

    #[test]
    fn non_finite_setters_are_ignored() {
        let mut body = test_body();
        body.set_position(point3(f64::NAN, 0.0, 0.0));
        body.set_velocity(vec3(0.0, f64::INFINITY, 0.0));
        assert_eq!(body.position(), point3(0.5, 2.0, 0.5));
        assert_eq!(body.velocity(), FreeVector::zero());
    }

    #[test]
    fn on_pos_without_support() {
        let body = test_body();
        assert_eq!(body.on_pos(0.2), Cube::new(0, 1, 0));
        assert_eq!(body.block_pos_below_that_affects_movement(), Cube::new(0, 1, 0));
        assert_eq!(body.on_pos(0.0), Cube::new(0, 2, 0));
    }

    #[test]
    fn on_pos_with_support_uses_its_column() {
        let mut body = test_body();
        body.support = SupportingBlock::new(Some(Cube::new(1, 1, 0)), false);
        assert_eq!(body.on_pos(0.0), Cube::new(1, 1, 0));
        assert_eq!(body.on_pos(0.2), Cube::new(1, 1, 0));
        assert_eq!(body.on_pos(1.5), Cube::new(1, 0, 0));
        assert!(body.is_supported_by(Cube::new(1, 1, 0)));
        assert!(!body.is_supported_by(Cube::new(0, 1, 0)));
    }

    #[test]
    fn jump_factor_prefers_block_inside() {
        let mut world = MemoryWorld::new();
        world.set_block([0, 1, 0], BlockState::solid("honey").jump_factor(0.5));
        let mut body = test_body();
        assert_eq!(body.block_jump_factor(&world), 0.5);

        world.set_block(
            [0, 2, 0],
            BlockState::with_shape("syrup", Shape::Empty).jump_factor(0.25),
        );
        let mut body = test_body();
        assert_eq!(body.block_jump_factor(&world), 0.25);
    }

    #[test]
    fn in_block_state_is_cached_until_moved() {
        let mut world = MemoryWorld::new();
        world.set_block([0, 2, 0], BlockState::solid("water-ish"));
        let mut body = test_body();
        assert_eq!(body.in_block_state(&world).name.as_str(), "water-ish");

        // The cache is not invalidated by world changes, only by moving.
        world.set_block([0, 2, 0], AIR.clone());
        assert_eq!(body.in_block_state(&world).name.as_str(), "water-ish");
        body.set_position(point3(0.5, 2.5, 0.5));
        assert!(body.in_block_state(&world).is_air());
    }

    #[test]
    fn stuck_multiplier_is_taken_once() {
        let mut body = test_body();
        body.set_fall_distance(3.0);
        body.make_stuck(vec3(0.25, 0.05, 0.25));
        assert_eq!(body.fall_distance(), 0.0);
        assert_eq!(body.take_stuck_speed_multiplier(), Some(vec3(0.25, 0.05, 0.25)));
        assert_eq!(body.take_stuck_speed_multiplier(), None);
    }

    #[test]
    fn concise_format() {
        let mut body = test_body();
        body.on_ground = true;
        assert_eq!(
            body.refmt(&ConciseDebug).to_string(),
            "#1 at (+0.500, +2.000, +0.500) moving (+0.000, +0.000, +0.000) grounded"
        );
    }
}
