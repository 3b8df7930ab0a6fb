//! Validation helpers shared by parameters, intervals, and the model.
//!
//! Each helper checks one numeric contract and returns the matching
//! [`AlignError`] variant, so constructors and setters can validate with `?`
//! and stay free of ad-hoc `if` chains.
use crate::alignment::errors::{AlignError, AlignResult};

/// Validate a `(lower, upper)` bounds pair.
///
/// # Errors
/// [`AlignError::InvalidBounds`] if either bound is NaN or `lower >= upper`.
pub fn validate_bounds(lower: f64, upper: f64) -> AlignResult<()> {
    if lower.is_nan() || upper.is_nan() {
        return Err(AlignError::InvalidBounds { lower, upper, reason: "Bounds must not be NaN." });
    }
    if lower >= upper {
        return Err(AlignError::InvalidBounds {
            lower,
            upper,
            reason: "Lower bound must be smaller than upper bound.",
        });
    }
    Ok(())
}

/// Validate a reference length: non-NaN and strictly positive.
///
/// # Errors
/// [`AlignError::InvalidRefLength`] otherwise.
pub fn validate_ref_length(value: f64) -> AlignResult<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(AlignError::InvalidRefLength { value });
    }
    Ok(())
}

/// Validate an interval length or relative weight: non-NaN and non-negative.
///
/// # Errors
/// [`AlignError::InvalidLength`] otherwise.
pub fn validate_length(value: f64) -> AlignResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(AlignError::InvalidLength { value });
    }
    Ok(())
}

/// Validate min/max length bounds against the live length, if any.
///
/// # Errors
/// - [`AlignError::InvalidMinMaxLengths`] if either bound is NaN or `min >= max`.
/// - [`AlignError::LengthOutsideBounds`] if `current` lies outside `[min, max]`.
pub fn validate_min_max_lengths(min: f64, max: f64, current: Option<f64>) -> AlignResult<()> {
    if min.is_nan() || max.is_nan() {
        return Err(AlignError::InvalidMinMaxLengths {
            min,
            max,
            reason: "Neither length must be NaN.",
        });
    }
    if min >= max {
        return Err(AlignError::InvalidMinMaxLengths {
            min,
            max,
            reason: "Minimum is larger than or equal to maximum.",
        });
    }
    if let Some(length) = current {
        if length < min || length > max {
            return Err(AlignError::LengthOutsideBounds { length, min, max });
        }
    }
    Ok(())
}

/// Validate the query separation margin `gamma_d`.
///
/// # Errors
/// [`AlignError::InvalidMargin`] if the margin is non-finite or negative.
pub fn validate_margin(value: f64) -> AlignResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AlignError::InvalidMargin { value });
    }
    Ok(())
}

/// Resolve an optional value needed for derived geometry.
///
/// # Errors
/// [`AlignError::UnsetValue`] naming the parameter and field when absent.
pub fn require(value: Option<f64>, name: &str, field: &'static str) -> AlignResult<f64> {
    value.ok_or_else(|| AlignError::UnsetValue { name: name.to_string(), field })
}
