//! Algorithm for raycasting through voxel grids.
//!
//! This deals purely with the question "which cubes does this ray intersect",
//! and does not concern itself with what might occupy those cubes.

#[doc(inline)]
pub use voxmotion_base::raycast::*;
