//! Numeric aliases shared by the optimizer seam.
//!
//! Everything the adapter hands to `argmin` is an `ndarray` vector over `f64`
//! in the order of [`AlignmentModel::trainable_params`]; the cost is the
//! problem objective, minimized as is.
//!
//! [`AlignmentModel::trainable_params`]: crate::alignment::AlignmentModel::trainable_params
use ndarray::Array1;

/// Parameter vector θ.
pub type Theta = Array1<f64>;

/// Gradient of the cost with respect to θ.
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;
