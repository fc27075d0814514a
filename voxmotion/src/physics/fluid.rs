/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use crate::math::{Cube, FreeCoordinate, FreeVector, GridCoordinate};
use crate::physics::{Body, PhysicsConfig};
use crate::world::{Effects, FluidKind, FluidMap, Sound, World};

#[cfg(doc)]
use crate::physics::move_body;

/// Distance by which the body's box is shrunk before looking for fluid, so that fluid
/// merely touching a face does not count.
const FLUID_DEFLATE: FreeCoordinate = 0.001;

/// Depth of fluid at which its current pushes a body at full strength; shallower fluid
/// pushes proportionally less.
const FULL_PUSH_DEPTH: FreeCoordinate = 0.4;

/// Distance below the eyes at which the eyes are considered to be under the surface.
const EYE_SURFACE_OFFSET: FreeCoordinate = 0.11111111;

/// Samples the fluids `body` is in, records how deep it is in each, and adds their
/// currents to its velocity.
///
/// This runs once per tick before [`move_body()`], which then moves the body by the
/// updated velocity. Water also extinguishes the body, cancels its fall, and makes a
/// splash when entered.
pub fn update_fluids(body: &mut Body, world: &dyn World, effects: &mut dyn Effects) {
    let config = world.physics();
    let mut heights = FluidMap::<FreeCoordinate>::default();
    let mut touching = FluidMap::<bool>::default();
    for kind in FluidKind::ALL {
        let (depth, touches) = push_by_fluid(body, world, config, kind);
        heights[kind] = depth;
        touching[kind] = touches;
    }
    body.fluid_heights = heights;

    if touching[FluidKind::Water] {
        if !body.was_touching_water && body.fluids_updated {
            effects.sound(body, Sound::Splash);
        }
        body.reset_fall_distance();
        body.was_touching_water = true;
        body.set_fire_ticks(0);
    } else {
        body.was_touching_water = false;
    }

    body.eye_fluid = fluid_at_eyes(body, world);
    body.fluids_updated = true;
}

/// Measures how deep `body` is in fluid of `kind`, and pushes it by the fluid's current.
///
/// Returns the depth, measured up from the bottom of the body's box, and whether any
/// such fluid was touched at all.
fn push_by_fluid(
    body: &mut Body,
    world: &dyn World,
    config: &PhysicsConfig,
    kind: FluidKind,
) -> (FreeCoordinate, bool) {
    let bounding_box = body.bounding_box().expand(-FLUID_DEFLATE);
    let bottom = bounding_box.lower_bounds_p().y;
    let pushed = body.kind().is_pushed_by_fluid();

    let mut depth: FreeCoordinate = 0.0;
    let mut touching = false;
    let mut flow_sum = FreeVector::zero();
    let mut flow_count: u32 = 0;
    for cube in bounding_box.round_up_to_grid().interior_iter() {
        let Some(fluid) = world.fluid(cube) else {
            continue;
        };
        if fluid.kind != kind {
            continue;
        }
        let surface = FreeCoordinate::from(cube.y) + fluid.height;
        if surface < bottom {
            continue;
        }
        touching = true;
        depth = depth.max(surface - bottom);
        if pushed {
            let mut flow = fluid.flow;
            if depth < FULL_PUSH_DEPTH {
                flow *= depth;
            }
            flow_sum += flow;
            flow_count += 1;
        }
    }

    if flow_sum.length() > 0.0 {
        let mut push = flow_sum / FreeCoordinate::from(flow_count);
        if body.kind().normalizes_fluid_flow() {
            push = push.normalize();
        }
        push *= config.fluid_push[kind];
        let velocity = body.velocity();
        if push.length() > 0.0
            && velocity.x.abs() < config.minimum_fluid_push_speed
            && velocity.z.abs() < config.minimum_fluid_push_speed
            && push.length() < config.minimum_fluid_push
        {
            push = push.normalize() * config.minimum_fluid_push;
        }
        body.set_velocity_unchecked(velocity + push);
    }

    (depth, touching)
}

/// Returns the kind of fluid whose surface is above the body's eyes, if any.
fn fluid_at_eyes(body: &Body, world: &dyn World) -> Option<FluidKind> {
    let eye_y = body.eye_y() - EYE_SURFACE_OFFSET;
    let position = body.position();
    let cube = Cube::new(
        position.x.floor() as GridCoordinate,
        eye_y.floor() as GridCoordinate,
        position.z.floor() as GridCoordinate,
    );
    let fluid = world.fluid(cube)?;
    (FreeCoordinate::from(cube.y) + fluid.height > eye_y).then_some(fluid.kind)
}
