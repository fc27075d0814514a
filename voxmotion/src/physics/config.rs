use core::fmt;

use crate::math::{FreeCoordinate, NotNan, notnan};
use crate::world::FluidMap;

#[cfg(doc)]
use crate::world::World;

// -------------------------------------------------------------------------------------------------

/// Tunable constants of body movement, shared by every body in a [`World`].
///
/// All distances are in cubes and all rates are per tick.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct PhysicsConfig {
    /// Downward velocity added to falling bodies each tick.
    ///
    /// Movement itself never applies gravity; this is for the caller's velocity update.
    pub gravity: NotNan<FreeCoordinate>,

    /// Fraction of vertical velocity a body keeps each tick.
    pub vertical_drag: FreeCoordinate,

    /// Factor, applied on top of the supporting block's friction, by which horizontal
    /// velocity is multiplied each tick.
    pub horizontal_drag: FreeCoordinate,

    /// How strongly each kind of fluid's current pushes bodies.
    pub fluid_push: FluidMap<FreeCoordinate>,

    /// The smallest push a fluid gives a body that is almost at rest, so that bodies
    /// do not hover at the edge of a current.
    pub minimum_fluid_push: FreeCoordinate,

    /// Horizontal speed below which [`minimum_fluid_push`](Self::minimum_fluid_push)
    /// applies.
    pub minimum_fluid_push_speed: FreeCoordinate,

    /// How far pistons may push a body along each axis within one tick.
    pub piston_limit: FreeCoordinate,

    /// Piston pushes smaller than this are dropped.
    pub piston_epsilon: FreeCoordinate,

    /// Moves whose squared length is no more than this do not change the body's position.
    pub movement_threshold_squared: FreeCoordinate,

    /// Multiplier converting distance moved into distance counted toward step sounds.
    pub step_distance_scale: FreeCoordinate,

    /// Thickness of the box, below a grounded body, searched for its supporting block.
    pub support_probe_thickness: FreeCoordinate,
}

impl PhysicsConfig {
    /// The default configuration.
    pub const DEFAULT: Self = Self {
        gravity: notnan!(0.08),
        vertical_drag: 0.98,
        horizontal_drag: 0.91,
        fluid_push: FluidMap {
            water: 0.014,
            lava: 0.0023333333333333335,
        },
        minimum_fluid_push: 0.0045,
        minimum_fluid_push_speed: 0.003,
        piston_limit: 0.51,
        piston_epsilon: 1e-5,
        movement_threshold_squared: 1e-7,
        step_distance_scale: 0.6,
        support_probe_thickness: 1e-6,
    };
}

impl fmt::Debug for PhysicsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            gravity,
            vertical_drag,
            horizontal_drag,
            fluid_push,
            minimum_fluid_push,
            minimum_fluid_push_speed,
            piston_limit,
            piston_epsilon,
            movement_threshold_squared,
            step_distance_scale,
            support_probe_thickness,
        } = self;
        f.debug_struct("PhysicsConfig")
            .field("gravity", &gravity.into_inner())
            .field("vertical_drag", vertical_drag)
            .field("horizontal_drag", horizontal_drag)
            .field("fluid_push", fluid_push)
            .field("minimum_fluid_push", minimum_fluid_push)
            .field("minimum_fluid_push_speed", minimum_fluid_push_speed)
            .field("piston_limit", piston_limit)
            .field("piston_epsilon", piston_epsilon)
            .field("movement_threshold_squared", movement_threshold_squared)
            .field("step_distance_scale", step_distance_scale)
            .field("support_probe_thickness", support_probe_thickness)
            .finish()
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
