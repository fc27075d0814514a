//! Worlds and bodies to simulate, and the per-tick velocity update that drives them.

use std::sync::Arc;

use voxmotion::math::{Aab, FreeCoordinate, FreeVector, GridAab};
use voxmotion::physics::{
    Body, BodyId, CautiousWalker, CrashReport, MotionKind, MoveDetails, move_body, update_fluids,
};
use voxmotion::shape::Shape;
use voxmotion::time::Tick;
use voxmotion::world::{
    BlockFlags, BlockState, Effects, FluidKind, FluidState, MemoryWorld, World as _,
};

/// The situations the simulator can set up.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum Scenario {
    /// A box dropped onto a stone floor from a height.
    Landing,
    /// A walker stepping up onto a low platform.
    Curb,
    /// A box pushed toward a wall by several pistons during each tick.
    Piston,
    /// A box floating in a pool of flowing water.
    Current,
    /// A cautious walker approaching the edge of a floor.
    Ledge,
    /// A box falling through a cobweb onto a bouncy block.
    Cobweb,
    /// A walker hopping along a floor that turns to honey partway.
    Jump,
}

/// A world with one body in it, and what that body tries to do each tick.
#[derive(Debug)]
pub(crate) struct Setup {
    pub(crate) world: MemoryWorld,
    pub(crate) body: Body,
    /// Horizontal velocity the body sets for itself each tick, if it walks.
    pub(crate) walk: Option<FreeVector>,
    /// Pushes applied by pistons during each tick, after the body's own movement.
    pub(crate) piston_pushes: Vec<FreeVector>,
    /// Upward velocity the body gives itself whenever it is on the ground, before the
    /// jump factor of the block it stands on.
    pub(crate) jump: Option<FreeCoordinate>,
}

fn stone_floor(world: &mut MemoryWorld, half_size: i32) {
    world.fill(
        GridAab::from_lower_upper([-half_size, -1, -half_size], [half_size, 0, half_size]),
        &BlockState::solid("stone"),
    );
}

impl Scenario {
    pub(crate) fn setup(self) -> Setup {
        let mut world = MemoryWorld::new();
        let mut walk = None;
        let mut piston_pushes = Vec::new();
        let mut jump = None;
        let body = match self {
            Scenario::Landing => {
                stone_floor(&mut world, 4);
                Body::new(BodyId(1), [0.5, 4.0, 0.5], 0.6, 1.8)
            }
            Scenario::Curb => {
                stone_floor(&mut world, 16);
                let curb = BlockState::with_shape("curb", Aab::new(0.0, 1.0, 0.0, 0.3, 0.0, 1.0));
                world.fill(GridAab::from_lower_upper([2, 0, -16], [16, 1, 16]), &curb);
                walk = Some(FreeVector::new(0.2, 0.0, 0.05));
                Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8).with_max_step_height(0.6)
            }
            Scenario::Piston => {
                stone_floor(&mut world, 8);
                world.fill(
                    GridAab::from_lower_upper([4, 0, -8], [5, 2, 8]),
                    &BlockState::solid("wall"),
                );
                piston_pushes = vec![FreeVector::new(0.3, 0.0, 0.0); 3];
                Body::new(BodyId(1), [0.5, 0.0, 0.5], 1.0, 1.0)
            }
            Scenario::Current => {
                stone_floor(&mut world, 8);
                for cube in GridAab::from_lower_upper([-8, 0, -8], [8, 1, 8]).interior_iter() {
                    world.set_fluid(
                        cube,
                        Some(FluidState {
                            kind: FluidKind::Water,
                            height: 0.875,
                            flow: FreeVector::new(0.5, 0.0, 0.25),
                        }),
                    );
                }
                Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8)
            }
            Scenario::Ledge => {
                stone_floor(&mut world, 3);
                walk = Some(FreeVector::new(0.15, 0.0, 0.0));
                Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8)
                    .with_kind(Arc::new(CautiousWalker))
                    .with_max_step_height(0.6)
            }
            Scenario::Cobweb => {
                world.set_block([0, -1, 0], BlockState::solid("slime").bounce(0.8));
                world.set_block(
                    [0, 3, 0],
                    BlockState::with_shape("cobweb", Shape::Empty)
                        .flags(BlockFlags::FALL_DAMAGE_RESETTING)
                        .stuck_multiplier(FreeVector::new(0.25, 0.05, 0.25)),
                );
                Body::new(BodyId(1), [0.5, 8.0, 0.5], 0.6, 0.6)
            }
            Scenario::Jump => {
                stone_floor(&mut world, 8);
                world.fill(
                    GridAab::from_lower_upper([4, -1, -8], [8, 0, 8]),
                    &BlockState::solid("honey").jump_factor(0.5),
                );
                walk = Some(FreeVector::new(0.1, 0.0, 0.0));
                jump = Some(0.42);
                Body::new(BodyId(1), [0.5, 0.0, 0.5], 0.6, 1.8)
            }
        };
        Setup {
            world,
            body,
            walk,
            piston_pushes,
            jump,
        }
    }
}

impl Setup {
    /// Advances the simulation by one tick.
    ///
    /// The body's velocity is updated for fluids, walking, jumping and gravity, it moves
    /// by that velocity, pistons push it, and then drag slows it down. Gravity applies even to a grounded
    /// body, so that it keeps colliding with the ground and stays grounded.
    pub(crate) fn step(
        &mut self,
        effects: &mut dyn Effects,
        tick: Tick,
    ) -> Result<MoveDetails, CrashReport> {
        let Self {
            world,
            body,
            walk,
            piston_pushes,
            jump,
        } = self;
        let world = &*world;
        let physics = world.physics().clone();

        update_fluids(body, world, effects);

        let mut velocity = body.velocity();
        if let Some(walk) = *walk {
            velocity.x = walk.x;
            velocity.z = walk.z;
        }
        if let Some(jump) = *jump {
            if body.is_grounded() {
                velocity.y = jump * body.block_jump_factor(world);
            }
        }
        velocity.y -= physics.gravity.into_inner();
        body.set_velocity(velocity);

        let details = move_body(body, world, effects, MotionKind::SelfMotion, velocity, tick)?;

        for &push in piston_pushes.iter() {
            move_body(body, world, effects, MotionKind::Piston, push, tick)?;
        }

        let friction = if body.is_grounded() {
            world
                .block(body.block_pos_below_that_affects_movement())
                .friction
        } else {
            1.0
        };
        let horizontal = friction * physics.horizontal_drag;
        let velocity = body.velocity();
        body.set_velocity(FreeVector::new(
            velocity.x * horizontal,
            velocity.y * physics.vertical_drag,
            velocity.z * horizontal,
        ));

        Ok(details)
    }
}
