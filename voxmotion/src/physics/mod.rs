//! Moving bodies through the world: collision, step-up, and fluid push.
//!
//! The entry point is [`move_body()`], which runs once per body per tick. It uses the
//! other components in this order:
//!
//! 1. [`limit_piston_movement()`], only for [`MotionKind::Piston`] moves.
//! 2. [`collect()`] gathers the shapes near the body.
//! 3. [`resolve()`] clips the displacement against those shapes.
//! 4. [`try_step_up()`] looks for a way over a low obstacle, if one blocked the body.
//! 5. [`update_supporting_block()`] records what the body is standing on.
//!
//! [`update_fluids()`] is a separate phase that adds fluid currents to the body's
//! velocity, which the next tick's move will consume.

mod body;
pub use body::*;
mod collect;
pub use collect::*;
mod config;
pub use config::*;
mod error;
pub use error::*;
mod fluid;
pub use fluid::*;
mod kind;
pub use kind::*;
mod movement;
pub use movement::*;
mod piston;
pub use piston::*;
mod resolve;
pub use resolve::*;
mod step_up;
pub use step_up::*;
mod support;
pub use support::*;
