//! voxmotion moves bodies through worlds made of axis-aligned boxes, one tick at a time.
//!
//! Given a body's box and the displacement it would like to make this tick,
//! [`physics::move_body()`] works out how far it may actually go, which axes were
//! blocked, whether it can climb over a low obstacle, and what it is now standing on.
//! [`physics::update_fluids()`] separately samples the fluid cells a body overlaps and
//! adds their current to its velocity.
//!
//! The world itself is not stored here. Block and entity shapes, fluids, and the world
//! border are read through the [`world::World`] trait, and side effects such as step
//! sounds go out through [`world::Effects`]. [`world::MemoryWorld`] is a small in-memory
//! implementation suitable for tests and tools.
//!
//! ## Package features
//!
//! * `std` (enabled by default):
//!   Uses the standard library's floating-point functions in geometry code;
//!   without it, `libm` versions are used.
//! * `serde`:
//!   Adds `serde` implementations for [`physics::PhysicsConfig`] and the small value types
//!   it is built from, so that configurations can be read from files.

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;
#[cfg_attr(test, macro_use)]
extern crate std;

#[macro_use]
pub mod math;

pub mod physics;
pub mod raycast;
pub mod shape;
pub mod time;
pub mod util;
pub mod world;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
