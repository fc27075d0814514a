//! Mathematical utilities and decisions.

pub use ordered_float::{FloatIsNan, NotNan};

/// Acts as polyfill for float methods
#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::float::FloatCore as _;

mod aab;
pub use aab::*;
mod axis;
pub use axis::*;
mod coord;
pub use coord::*;
mod cube;
pub use cube::Cube;
mod grid_aab;
pub use grid_aab::*;
mod grid_iter;
pub use grid_iter::*;

// We make an assumption in several places that `usize` is at least 32 bits.
// It's likely that compilation would not succeed anyway, but let's make it explicit.
#[cfg(target_pointer_width = "16")]
compile_error!("voxmotion does not support platforms with less than 32-bit `usize`");

/// Allows writing a [`NotNan`] value as a constant expression (which is not currently
/// a feature provided by the [`ordered_float`] crate itself).
///
/// # Examples
///
/// ```
/// # extern crate voxmotion_base as voxmotion;
/// use voxmotion::{notnan, math::NotNan};
///
/// const X: NotNan<f64> = notnan!(1.234);
/// ```
///
/// If anything other than a floating-point literal is used, the code will not compile:
///
/// ```compile_fail
/// # extern crate voxmotion_base as voxmotion;
/// # use voxmotion::{notnan, math::NotNan};
/// // Not a literal; will not compile
/// const X: NotNan<f64> = notnan!(f64::NAN);
/// ```
///
/// ```compile_fail
/// # extern crate voxmotion_base as voxmotion;
/// # use voxmotion::{notnan, math::NotNan};
/// // Not a float; will not compile
/// const X: NotNan<char> = notnan!('a');
/// ```
#[doc(hidden)] // reexported publicly within the math module by `voxmotion`
#[macro_export]
macro_rules! notnan {
    ($value:literal) => {
        match $value {
            value => {
                // Safety: Only literal values are allowed, which will either be a non-NaN
                // float or (as checked below) a type mismatch.
                let result = unsafe { $crate::math::NotNan::new_unchecked(value) };

                // Ensure that the type is one which could have resulted from a float literal,
                // by requiring type unification with a literal. This prohibits char, &str, etc.
                let _ = if false {
                    // Safety: Statically never NaN, and is also never executed.
                    unsafe { $crate::math::NotNan::new_unchecked(0.0) }
                } else {
                    result
                };

                result
            }
        }
    };
}

/// Tolerance used by [`approx_eq()`].
pub const APPROX_EQ_TOLERANCE: FreeCoordinate = 1e-5;

/// Returns whether `a` and `b` differ by less than [`APPROX_EQ_TOLERANCE`].
///
/// Collision code uses this, rather than `==`, to decide whether a displacement was
/// reduced, so that rounding noise in box arithmetic is not reported as a collision.
///
/// ```
/// # extern crate voxmotion_base as voxmotion;
/// use voxmotion::math::approx_eq;
///
/// assert!(approx_eq(0.5, 0.5 + 1e-9));
/// assert!(!approx_eq(0.5, 0.4));
/// ```
#[inline]
pub fn approx_eq(a: FreeCoordinate, b: FreeCoordinate) -> bool {
    (b - a).abs() < APPROX_EQ_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_is_symmetric_and_tolerant() {
        assert!(approx_eq(1.0, 1.0));
        assert!(approx_eq(1.0, 1.0 + 9e-6));
        assert!(approx_eq(1.0 + 9e-6, 1.0));
        assert!(!approx_eq(1.0, 1.0 + 2e-5));
        assert!(!approx_eq(0.0, FreeCoordinate::NAN));
    }

    #[test]
    fn notnan_macro_is_const() {
        const X: NotNan<f64> = notnan!(0.25);
        assert_eq!(X.into_inner(), 0.25);
    }
}
