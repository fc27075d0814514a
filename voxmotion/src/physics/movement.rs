use core::fmt;

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

use manyfmt::{Fmt, Refmt as _};

use crate::math::{Aab, Cube, FreeCoordinate, FreePoint, FreeVector, approx_eq, is_finite_vector};
use crate::physics::{
    Body, CrashReport, MotionKind, Reaction, ReactionError, collect, limit_piston_movement,
    resolve, try_step_up, update_supporting_block,
};
use crate::raycast::Ray;
use crate::time::Tick;
use crate::util::{ConciseDebug, ErrorChain};
use crate::world::{BlockFlags, BlockState, Effects, FluidKind, GameEvent, Sound, World};

#[cfg(doc)]
use crate::physics::update_fluids;

/// Offset below the body's position of the block that it is considered to be walking on,
/// for landing, stepping, and step sounds.
const ON_POS_OFFSET: FreeCoordinate = 0.2;

/// Amount by which the body's box is shrunk when finding the blocks it is inside.
const INSIDE_DEFLATE: FreeCoordinate = 1e-5;

/// Amount by which the body's box is shrunk when checking whether it is in a fire.
const FIRE_DEFLATE: FreeCoordinate = 1e-6;

/// Moves `body` by up to `desired`, stopping at obstacles, and updates everything that
/// depends on where it ended up.
///
/// In order, this:
///
/// 1. Limits piston pushes, if `motion` is [`MotionKind::Piston`], to the body's
///    budget for `tick`.
/// 2. Applies and clears the body's [stuck multiplier](Body::make_stuck).
/// 3. Lets the body's kind [back off from ledges](crate::physics::BodyKind::back_off_from_edge).
/// 4. Collides with blocks, other bodies, and the world border, and steps up over low
///    obstacles if the body can.
/// 5. Updates the body's position, collision flags, and supporting block.
/// 6. Reports landing on and stepping onto blocks, and accumulates fall distance.
/// 7. Stops the body's velocity along blocked axes.
/// 8. Accumulates walked distance and emits step or swim sounds and events.
/// 9. Reports the blocks the body is inside.
/// 10. Applies the speed factor of the block the body is in or on.
/// 11. Updates whether the body is on fire.
///
/// Gravity and drag are not applied; the caller is expected to update the velocity
/// (and call [`update_fluids()`]) before passing it, scaled, as `desired`.
///
/// # Errors
///
/// If one of the block reactions in `effects` fails, returns a [`CrashReport`]
/// describing where it happened. The body has then moved, but the steps after the
/// failed reaction have not happened.
pub fn move_body(
    body: &mut Body,
    world: &dyn World,
    effects: &mut dyn Effects,
    motion: MotionKind,
    desired: FreeVector,
    tick: Tick,
) -> Result<MoveDetails, CrashReport> {
    if !is_finite_vector(desired) {
        log::warn!(
            "rejecting non-finite movement {:?} of {}",
            desired,
            body.refmt(&ConciseDebug)
        );
        return Ok(MoveDetails::Rejected);
    }

    if body.no_physics {
        body.set_position(body.position() + desired);
        return Ok(MoveDetails::Bypassed);
    }

    let config = world.physics();
    let mut desired = desired;
    if motion == MotionKind::Piston {
        desired = limit_piston_movement(body, config, desired, tick);
        if desired == FreeVector::zero() {
            log::trace!("{} is out of piston budget for {tick}", body.id());
            return Ok(MoveDetails::PistonBlocked);
        }
    }

    let was_on_fire = body.is_on_fire();

    if let Some(multiplier) = body.take_stuck_speed_multiplier() {
        desired = desired.component_mul(multiplier);
        body.set_velocity_unchecked(FreeVector::zero());
    }

    desired = body
        .kind()
        .back_off_from_edge(body, world, desired, motion);

    let (resolved, stepped_up) = collide(body, world, desired);

    // Position
    let movement_length_squared = resolved.square_length();
    if movement_length_squared > config.movement_threshold_squared {
        if body.fall_distance() != 0.0
            && movement_length_squared >= 1.0
            && crosses_fall_resetting(world, body.position(), resolved)
        {
            body.reset_fall_distance();
        }
        body.set_position(body.position() + resolved);
    }

    // Collision flags
    let blocked_x = !approx_eq(desired.x, resolved.x);
    let blocked_z = !approx_eq(desired.z, resolved.z);
    body.horizontal_collision = blocked_x || blocked_z;
    body.vertical_collision = desired.y != resolved.y;
    body.vertical_collision_below = body.vertical_collision && desired.y < 0.0;
    body.minor_horizontal_collision = body.horizontal_collision
        && body
            .kind()
            .is_horizontal_collision_minor(body, desired, resolved);
    let was_grounded = body.on_ground;
    let grounded = body.vertical_collision_below;
    body.on_ground = grounded;
    update_supporting_block(body, world, grounded, Some(resolved));

    // Landing and stepping
    let on_cube = body.on_pos(ON_POS_OFFSET);
    let on_block = world.block(on_cube);
    if grounded {
        if !was_grounded {
            let fall_distance = body.fall_distance();
            effects
                .landed_on(body, on_cube, on_block, fall_distance)
                .map_err(|error| crash(body, on_cube, on_block, Reaction::LandedOn, error))?;
        }
        body.reset_fall_distance();
        if body.stepped_cube != Some(on_cube) {
            body.stepped_cube = Some(on_cube);
            effects
                .stepped_on(body, on_cube, on_block)
                .map_err(|error| crash(body, on_cube, on_block, Reaction::SteppedOn, error))?;
        }
    } else {
        body.stepped_cube = None;
        if resolved.y < 0.0 {
            body.set_fall_distance(body.fall_distance() - resolved.y);
        }
    }

    // Velocity
    let mut velocity = body.velocity();
    if blocked_x {
        velocity.x = 0.0;
    }
    if blocked_z {
        velocity.z = 0.0;
    }
    if body.vertical_collision {
        if on_block.bounce > 0.0 {
            if velocity.y < 0.0 {
                velocity.y = -velocity.y * on_block.bounce;
            }
        } else {
            velocity.y = 0.0;
        }
    }
    body.set_velocity_unchecked(velocity);

    emit_movement(body, effects, config.step_distance_scale, resolved, on_cube, on_block);

    visit_blocks_inside(body, world, effects)?;

    // Speed factor
    let speed_factor = block_speed_factor(body, world);
    let velocity = body.velocity();
    body.set_velocity_unchecked(FreeVector::new(
        velocity.x * speed_factor,
        velocity.y,
        velocity.z * speed_factor,
    ));

    update_fire(body, world, effects, was_on_fire);

    let details = MoveDetails::Moved {
        desired,
        resolved,
        stepped_up,
    };
    log::trace!(
        "{}: {}",
        body.refmt(&ConciseDebug),
        details.refmt(&ConciseDebug)
    );
    Ok(details)
}

/// Resolves `desired` against everything near `body`, then tries stepping up.
///
/// Returns the resolved displacement and whether stepping up changed it.
fn collide(body: &Body, world: &dyn World, desired: FreeVector) -> (FreeVector, bool) {
    if desired == FreeVector::zero() {
        return (desired, false);
    }
    let bounding_box = body.bounding_box();
    let query = bounding_box.expand_towards(desired);
    let entity_volumes = world.entity_collisions(Some(body), query);
    let volumes = collect(world, Some(body), query, &entity_volumes);
    let resolved = resolve(desired, bounding_box, &volumes);
    let stepped = try_step_up(world, body, desired, resolved, &entity_volumes);
    (stepped, stepped != resolved)
}

/// Returns whether the straight path from `start` by `movement` passes through a block
/// which resets fall distance, or through water.
fn crosses_fall_resetting(world: &dyn World, start: FreePoint, movement: FreeVector) -> bool {
    Ray::new(start, movement).cast_segment().any(|step| {
        let cube = step.cube_ahead();
        world
            .block(cube)
            .flags
            .contains(BlockFlags::FALL_DAMAGE_RESETTING)
            || world
                .fluid(cube)
                .is_some_and(|fluid| fluid.kind == FluidKind::Water)
    })
}

/// Accumulates distance moved and, each time it passes the next whole step, plays a
/// step or swim sound and reports the matching event. Swimming bodies still count
/// their distance but emit nothing.
fn emit_movement(
    body: &mut Body,
    effects: &mut dyn Effects,
    scale: FreeCoordinate,
    resolved: FreeVector,
    on_cube: Cube,
    on_block: &BlockState,
) {
    let emission = body.kind().movement_emission();
    if !emission.emits_anything() || body.passenger {
        return;
    }

    let climbing = on_block
        .flags
        .intersects(BlockFlags::CLIMBABLE | BlockFlags::POWDER_SNOW);
    let counted = if climbing {
        resolved
    } else {
        FreeVector::new(resolved.x, 0.0, resolved.z)
    };
    body.walk_distance += resolved.x.hypot(resolved.z) * scale;
    body.move_distance += counted.length() * scale;

    if body.move_distance <= body.next_step || on_block.is_air() {
        return;
    }
    body.next_step = body.move_distance.floor() + 1.0;
    if body.swimming {
        return;
    }

    let (sound, event) = if body.is_in_fluid(FluidKind::Water) {
        (Sound::Swim, GameEvent::Swim)
    } else {
        (
            Sound::Step {
                cube: on_cube,
                block: on_block.name.clone(),
            },
            GameEvent::Step,
        )
    };
    if emission.emits_sounds() {
        effects.sound(body, sound);
    }
    if emission.emits_events() {
        effects.game_event(body, event);
    }
}

/// Reports every block the body's box is inside, and applies the blocks' stuck
/// multipliers and powder snow.
fn visit_blocks_inside(
    body: &mut Body,
    world: &dyn World,
    effects: &mut dyn Effects,
) -> Result<(), CrashReport> {
    body.in_powder_snow = false;
    let cells = body
        .bounding_box()
        .expand(-INSIDE_DEFLATE)
        .round_up_to_grid();
    for cube in cells.interior_iter() {
        let block = world.block(cube);
        if block.is_air() {
            continue;
        }
        if let Some(multiplier) = block.stuck_multiplier {
            body.make_stuck(multiplier);
        }
        if block.flags.contains(BlockFlags::POWDER_SNOW) {
            body.in_powder_snow = true;
        }
        effects
            .inside_block(body, cube, block)
            .map_err(|error| crash(body, cube, block, Reaction::InsideBlock, error))?;
    }
    Ok(())
}

/// Returns the factor by which the body's horizontal velocity is multiplied, from the
/// block it is in or, if that one has no effect, the block it is walking on.
fn block_speed_factor(body: &mut Body, world: &dyn World) -> FreeCoordinate {
    let in_water = world
        .fluid(body.cube())
        .is_some_and(|fluid| fluid.kind == FluidKind::Water);
    let in_block = body.in_block_state(world);
    let factor = in_block.speed_factor;
    if in_water || in_block.flags.contains(BlockFlags::BUBBLE_COLUMN) || factor != 1.0 {
        factor
    } else {
        world
            .block(body.block_pos_below_that_affects_movement())
            .speed_factor
    }
}

/// Starts the body's fire immunity once it is out of fire, and puts it out if it is in
/// something that extinguishes fire.
fn update_fire(body: &mut Body, world: &dyn World, effects: &mut dyn Effects, was_on_fire: bool) {
    let immune_ticks = body.kind().fire_immune_ticks();
    let extinguishing = is_in_extinguishing_medium(body, world);
    if !touches_burning(world, body.bounding_box().expand(-FIRE_DEFLATE)) {
        if body.fire_ticks() <= 0 {
            body.set_fire_ticks(-immune_ticks);
        }
        if was_on_fire && extinguishing {
            effects.sound(body, Sound::FireExtinguished);
        }
    }
    if body.is_on_fire() && extinguishing {
        body.set_fire_ticks(-immune_ticks);
    }
}

fn touches_burning(world: &dyn World, region: Aab) -> bool {
    region.round_up_to_grid().interior_iter().any(|cube| {
        world.block(cube).flags.contains(BlockFlags::BURNING)
            || world
                .fluid(cube)
                .is_some_and(|fluid| fluid.kind.is_burning())
    })
}

fn is_in_extinguishing_medium(body: &mut Body, world: &dyn World) -> bool {
    body.in_powder_snow
        || world.is_raining_at(body.cube())
        || body
            .in_block_state(world)
            .flags
            .contains(BlockFlags::BUBBLE_COLUMN)
        || FluidKind::ALL
            .into_iter()
            .any(|kind| kind.extinguishes_fire() && body.is_in_fluid(kind))
}

/// Builds the report for a failed block reaction, and logs it.
fn crash(
    body: &Body,
    cube: Cube,
    block: &BlockState,
    reaction: Reaction,
    error: ReactionError,
) -> CrashReport {
    let report = CrashReport::new(
        body.id(),
        body.position(),
        cube,
        block.name.clone(),
        reaction,
        error,
    );
    log::error!("{}", ErrorChain(&report));
    report
}

// -------------------------------------------------------------------------------------------------

/// What [`move_body()`] did, for diagnostics.
///
/// The exact contents of this type are unstable; use only [`Debug`] formatting or
/// [`ConciseDebug`] to examine them unless you have a specific need for one of the values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum MoveDetails {
    /// The movement was not finite, so nothing was done.
    Rejected,
    /// The body has [`no_physics`](Body::no_physics) set, so it was moved without
    /// collision.
    Bypassed,
    /// The body was pushed by a piston but had no budget left for this tick.
    PistonBlocked,
    /// The body moved normally.
    Moved {
        /// The movement after adjustment by piston limits, stuck multipliers, and
        /// ledge avoidance.
        desired: FreeVector,
        /// The movement actually made.
        resolved: FreeVector,
        /// Whether the body stepped up onto something.
        stepped_up: bool,
    },
}

impl Fmt<ConciseDebug> for MoveDetails {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, fopt: &ConciseDebug) -> fmt::Result {
        match *self {
            MoveDetails::Rejected => write!(fmt, "rejected"),
            MoveDetails::Bypassed => write!(fmt, "bypassed"),
            MoveDetails::PistonBlocked => write!(fmt, "piston blocked"),
            MoveDetails::Moved {
                desired,
                resolved,
                stepped_up,
            } => {
                write!(fmt, "move {}", resolved.refmt(fopt))?;
                if desired != resolved {
                    write!(fmt, " of {}", desired.refmt(fopt))?;
                }
                if stepped_up {
                    write!(fmt, " stepped up")?;
                }
                Ok(())
            }
        }
    }
}
