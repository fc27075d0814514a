use core::fmt;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{FreeCoordinate, FreeVector, horizontal_length_squared};
use crate::physics::{Body, has_collision};
use crate::world::World;

#[cfg(doc)]
use crate::physics::move_body;

/// Why a body is being moved, which affects how [`move_body()`] treats the move.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[expect(clippy::exhaustive_enums)]
pub enum MotionKind {
    /// The body moving under its own velocity.
    SelfMotion,
    /// Movement directly controlled by a player.
    Player,
    /// Being pushed by a piston; limited per tick by the body's [`PistonBudget`].
    ///
    /// [`PistonBudget`]: crate::physics::PistonBudget
    Piston,
    /// Being pushed by an opening shulker box lid.
    ShulkerBox,
    /// Being pushed by a shulker's shell.
    Shulker,
}

impl MotionKind {
    /// Returns whether this is the body's own movement, as opposed to being pushed.
    pub const fn is_self_propelled(self) -> bool {
        matches!(self, Self::SelfMotion | Self::Player)
    }
}

/// Which kinds of notification a body's movement produces.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[expect(clippy::exhaustive_enums)]
pub enum MovementEmission {
    /// The body moves silently and unnoticed.
    None,
    /// Step and swim sounds only.
    Sounds,
    /// Game events only, which other things may listen for.
    Events,
    /// Both sounds and events.
    #[default]
    All,
}

impl MovementEmission {
    #[allow(missing_docs)]
    pub const fn emits_anything(self) -> bool {
        !matches!(self, Self::None)
    }
    #[allow(missing_docs)]
    pub const fn emits_sounds(self) -> bool {
        matches!(self, Self::Sounds | Self::All)
    }
    #[allow(missing_docs)]
    pub const fn emits_events(self) -> bool {
        matches!(self, Self::Events | Self::All)
    }
}

/// Behavior of a kind of body, where kinds differ in how they move.
///
/// Every method has a default suitable for an inanimate object, so implementations
/// override only what they need. A body's kind is chosen when it is constructed, with
/// [`Body::with_kind()`].
pub trait BodyKind: fmt::Debug + Send + Sync {
    /// Adjusts a move before collision, for bodies that avoid walking off ledges.
    ///
    /// The default returns `desired` unchanged.
    fn back_off_from_edge(
        &self,
        body: &Body,
        world: &dyn World,
        desired: FreeVector,
        motion: MotionKind,
    ) -> FreeVector {
        let _ = (body, world, motion);
        desired
    }

    /// Which notifications this body's movement produces.
    fn movement_emission(&self) -> MovementEmission {
        MovementEmission::All
    }

    /// Given that a move was blocked horizontally, decides whether the collision was
    /// only a glancing one, which callers may choose not to treat as hitting a wall.
    fn is_horizontal_collision_minor(
        &self,
        body: &Body,
        desired: FreeVector,
        resolved: FreeVector,
    ) -> bool {
        let _ = (body, desired, resolved);
        false
    }

    /// Whether the averaged flow of fluids this body is in is normalized before being
    /// scaled, so that the body is pushed at a fixed rate however fast the fluid flows.
    fn normalizes_fluid_flow(&self) -> bool {
        false
    }

    /// Whether fluid currents push this body at all.
    fn is_pushed_by_fluid(&self) -> bool {
        true
    }

    /// How many ticks the body is immune to catching fire after leaving a fire.
    fn fire_immune_ticks(&self) -> i32 {
        1
    }
}

/// The default kind: an object with no special movement behavior.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct PlainKind;

impl BodyKind for PlainKind {}

/// A creature that will not walk off a ledge taller than it can step down, and which
/// treats brushing past a wall at a shallow angle as a minor collision.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct CautiousWalker;

impl CautiousWalker {
    /// Amount by which a move toward a ledge is shortened, repeatedly, until it is safe.
    const BACK_OFF_STEP: FreeCoordinate = 0.05;

    /// Largest angle, in radians, between the intended and actual horizontal directions
    /// of a blocked move for it to count as minor. (8 degrees.)
    const MINOR_COLLISION_ANGLE: FreeCoordinate = 0.13962634;

    /// Returns whether there is something under the body within its step height.
    fn is_above_ground(body: &Body, world: &dyn World) -> bool {
        let max_step = body.max_step_height();
        body.is_grounded()
            || (body.fall_distance() < max_step
                && has_collision(
                    world,
                    Some(body),
                    body.bounding_box()
                        .translate(FreeVector::new(0.0, body.fall_distance() - max_step, 0.0)),
                ))
    }
}

impl BodyKind for CautiousWalker {
    fn back_off_from_edge(
        &self,
        body: &Body,
        world: &dyn World,
        desired: FreeVector,
        motion: MotionKind,
    ) -> FreeVector {
        if !motion.is_self_propelled() || desired.y > 0.0 || !Self::is_above_ground(body, world)
        {
            return desired;
        }

        let max_step = body.max_step_height();
        let bounding_box = body.bounding_box();
        let no_floor = |dx: FreeCoordinate, dz: FreeCoordinate| {
            !has_collision(
                world,
                Some(body),
                bounding_box.translate(FreeVector::new(dx, -max_step, dz)),
            )
        };

        let mut x = desired.x;
        let mut z = desired.z;
        while x != 0.0 && no_floor(x, 0.0) {
            x = approach_zero(x, Self::BACK_OFF_STEP);
        }
        while z != 0.0 && no_floor(0.0, z) {
            z = approach_zero(z, Self::BACK_OFF_STEP);
        }
        while x != 0.0 && z != 0.0 && no_floor(x, z) {
            x = approach_zero(x, Self::BACK_OFF_STEP);
            z = approach_zero(z, Self::BACK_OFF_STEP);
        }
        if x != desired.x || z != desired.z {
            log::trace!(
                "{} backed off from edge: x {} -> {x}, z {} -> {z}",
                body.id(),
                desired.x,
                desired.z
            );
        }
        FreeVector::new(x, desired.y, z)
    }

    fn is_horizontal_collision_minor(
        &self,
        _body: &Body,
        desired: FreeVector,
        resolved: FreeVector,
    ) -> bool {
        let desired_sq = horizontal_length_squared(desired);
        let resolved_sq = horizontal_length_squared(resolved);
        if desired_sq < 1e-5 || resolved_sq < 1e-5 {
            return false;
        }
        let dot = desired.x * resolved.x + desired.z * resolved.z;
        let cosine = (dot / (desired_sq * resolved_sq).sqrt()).clamp(-1.0, 1.0);
        cosine.acos() < Self::MINOR_COLLISION_ANGLE
    }

    fn fire_immune_ticks(&self) -> i32 {
        20
    }
}

/// Moves `value` toward zero by `step`, stopping at zero.
fn approach_zero(value: FreeCoordinate, step: FreeCoordinate) -> FreeCoordinate {
    if value.abs() < step {
        0.0
    } else {
        value - step.copysign(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::GridAab;
    use crate::physics::BodyId;
    use crate::world::{BlockState, MemoryWorld};
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use euclid::vec3;
    use exhaust::Exhaust as _;

    fn floor_world() -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.fill(
            GridAab::from_lower_upper([0, 0, 0], [4, 1, 4]),
            &BlockState::solid("stone"),
        );
        world
    }

    fn walker_at(x: f64, z: f64) -> Body {
        let mut body = Body::new(BodyId(1), [x, 1.0, z], 0.6, 1.8)
            .with_kind(Arc::new(CautiousWalker))
            .with_max_step_height(0.6);
        body.on_ground = true;
        body
    }

    #[test]
    fn motion_kinds_self_propelled() {
        let propelled: Vec<MotionKind> = MotionKind::exhaust()
            .filter(|m| m.is_self_propelled())
            .collect();
        assert_eq!(propelled, vec![MotionKind::SelfMotion, MotionKind::Player]);
    }

    #[test]
    fn emission_flags() {
        assert!(!MovementEmission::None.emits_anything());
        assert!(MovementEmission::Sounds.emits_sounds());
        assert!(!MovementEmission::Sounds.emits_events());
        assert!(MovementEmission::default().emits_events());
    }

    #[test]
    fn plain_kind_does_not_back_off() {
        let world = floor_world();
        let body = Body::new(BodyId(1), [3.5, 1.0, 2.0], 0.6, 1.8);
        let desired = vec3(2.0, 0.0, 0.0);
        assert_eq!(
            PlainKind.back_off_from_edge(&body, &world, desired, MotionKind::SelfMotion),
            desired
        );
    }

    #[test]
    fn walker_stops_short_of_edge() {
        let world = floor_world();
        let body = walker_at(3.5, 2.0);
        let adjusted = CautiousWalker.back_off_from_edge(
            &body,
            &world,
            vec3(1.0, 0.0, 0.0),
            MotionKind::SelfMotion,
        );
        // The box (half-width 0.3) may overhang the edge but must not leave the floor.
        assert!(adjusted.x > 0.7 && adjusted.x < 0.8 + 1e-9, "{adjusted:?}");
        assert_eq!(adjusted.z, 0.0);
    }

    #[test]
    fn walker_ignores_edge_when_pushed_or_jumping() {
        let world = floor_world();
        let body = walker_at(3.5, 2.0);
        let desired = vec3(1.0, 0.0, 0.0);
        assert_eq!(
            CautiousWalker.back_off_from_edge(&body, &world, desired, MotionKind::Piston),
            desired
        );
        let jumping = vec3(1.0, 0.4, 0.0);
        assert_eq!(
            CautiousWalker.back_off_from_edge(&body, &world, jumping, MotionKind::Player),
            jumping
        );
    }

    #[test]
    fn minor_collision_is_shallow_angle() {
        let body = walker_at(1.0, 1.0);
        assert!(CautiousWalker.is_horizontal_collision_minor(
            &body,
            vec3(1.0, 0.0, 0.1),
            vec3(1.0, 0.0, 0.0)
        ));
        assert!(!CautiousWalker.is_horizontal_collision_minor(
            &body,
            vec3(1.0, 0.0, 1.0),
            vec3(1.0, 0.0, 0.0)
        ));
        assert!(!CautiousWalker.is_horizontal_collision_minor(
            &body,
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn approach_zero_stops_at_zero() {
        assert_eq!(approach_zero(0.75, 0.25), 0.5);
        assert_eq!(approach_zero(-0.125, 0.25), 0.0);
        assert_eq!(approach_zero(-1.5, 0.25), -1.25);
    }
}
