//! Validation helpers for values crossing the optimizer seam.
//!
//! - [`validate_theta`]: θ has the trainable dimension and finite entries.
//! - [`validate_grad`]: a gradient has the θ dimension and finite entries.
//! - [`validate_cost`]: an objective value is finite.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, Grad, Theta},
};

/// Validate a θ vector against the expected dimension.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] on a dimension mismatch.
/// - [`OptError::InvalidThetaInput`] at the first non-finite entry.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] on a dimension mismatch.
/// - [`OptError::InvalidGradient`] at the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate an objective value.
///
/// # Errors
/// [`OptError::NonFiniteCost`] if `value` is NaN or infinite.
pub fn validate_cost(value: Cost) -> OptResult<Cost> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(value)
}
