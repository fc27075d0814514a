//! This library is an internal component of [`voxmotion`],
//! which defines the geometric types and functions that the movement code is built on.
//! Do not depend on this library; use only [`voxmotion`] instead.
//!
//! [`voxmotion`]: https://crates.io/crates/voxmotion/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
#![warn(clippy::missing_inline_in_public_items)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;
#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `voxmotion`.
#[macro_use]
pub mod math;

/// Do not use this module directly; its contents are re-exported from `voxmotion`.
pub mod raycast;

/// Do not use this module directly; its contents are re-exported from `voxmotion`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
