//! Mathematical utilities and decisions.

#[doc(inline)]
pub use voxmotion_base::math::*;
#[doc(inline)]
pub use voxmotion_base::notnan;
