//! Parameter — a named, optionally bounded, optionally trainable scalar.
//!
//! Purpose
//! -------
//! Provide the constraint primitive every other component is built on: the
//! reference begin, the query begin/end, and each interval's length-control
//! value are all [`Parameter`]s.
//!
//! Key behaviors
//! -------------
//! - Value and both bounds are optional; an externally driven optimizer fills
//!   and mutates them in place.
//! - [`Parameter::set_bounds`] validates the pair but deliberately does not
//!   re-check the current value; out-of-range values are surfaced by
//!   [`Parameter::is_within_bounds`] instead.
//! - [`Parameter::is_within_bounds`] refuses to answer unless value and both
//!   bounds are present and non-NaN.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bounds set through the public API satisfy `lower < upper`, both non-NaN.
//! - Constant-length intervals collapse bounds to `[v, v]` through a
//!   crate-internal path; that is the only way to obtain equal bounds.
//!
//! Downstream usage
//! ----------------
//! - The optimizer reads `value`/`lower_bound`/`upper_bound` for every
//!   trainable parameter and writes `value` back between evaluations.
use crate::alignment::{
    core::validation::validate_bounds,
    errors::{AlignError, AlignResult},
};

/// A named, bounded, optionally trainable scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: Option<f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    is_trainable: bool,
}

impl Parameter {
    /// Create a trainable parameter with no value and no bounds.
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            value: None,
            lower_bound: None,
            upper_bound: None,
            is_trainable: true,
        }
    }

    /// Builder: set the value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Builder: set validated bounds.
    ///
    /// # Errors
    /// [`AlignError::InvalidBounds`] if either bound is NaN or `lower >= upper`.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> AlignResult<Self> {
        self.set_bounds(lower, upper)?;
        Ok(self)
    }

    /// Builder: mark the parameter as trainable or fixed.
    pub fn trainable(mut self, is_trainable: bool) -> Self {
        self.is_trainable = is_trainable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Overwrite the value. Bounds are not consulted.
    pub fn set_value(&mut self, value: f64) {
        self.value = Some(value);
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> Option<f64> {
        self.upper_bound
    }

    pub fn is_trainable(&self) -> bool {
        self.is_trainable
    }

    pub fn set_trainable(&mut self, is_trainable: bool) {
        self.is_trainable = is_trainable;
    }

    /// `(lower_bound, upper_bound)`.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.lower_bound, self.upper_bound)
    }

    /// Replace both bounds.
    ///
    /// The current value is not checked against the new bounds.
    ///
    /// # Errors
    /// [`AlignError::InvalidBounds`] if either bound is NaN or `lower >= upper`;
    /// the previous bounds are kept.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> AlignResult<()> {
        validate_bounds(lower, upper)?;
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        Ok(())
    }

    /// Pin value and both bounds to `value` in one step.
    pub(crate) fn collapse_to(&mut self, value: f64) {
        self.value = Some(value);
        self.lower_bound = Some(value);
        self.upper_bound = Some(value);
    }

    /// Whether `lower_bound <= value <= upper_bound`.
    ///
    /// # Errors
    /// [`AlignError::IncompleteParameter`] if the value or either bound is
    /// absent or NaN.
    pub fn is_within_bounds(&self) -> AlignResult<bool> {
        let (Some(value), Some(lower), Some(upper)) =
            (self.value, self.lower_bound, self.upper_bound)
        else {
            return Err(AlignError::IncompleteParameter {
                name: self.name.clone(),
                reason: "value and both bounds must be set",
            });
        };
        if value.is_nan() || lower.is_nan() || upper.is_nan() {
            return Err(AlignError::IncompleteParameter {
                name: self.name.clone(),
                reason: "value and bounds must not be NaN",
            });
        }
        Ok(lower <= value && value <= upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bounds validation in `set_bounds` / `with_bounds`.
    // - The deliberate gap between setting bounds and checking the value.
    // - `is_within_bounds` on complete, incomplete and NaN parameters.
    //
    // They intentionally DO NOT cover:
    // - How intervals and the model own parameters (see their modules).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Invalid bounds are rejected and leave the previous bounds intact.
    //
    // Given
    // -----
    // - A parameter with bounds (0, 1).
    //
    // Expect
    // ------
    // - `set_bounds(2, 1)` fails with `InvalidBounds`; bounds stay (0, 1).
    fn set_bounds_rejects_misordered_pair_and_keeps_previous() {
        // Arrange
        let mut p = Parameter::new("x").with_bounds(0.0, 1.0).unwrap();

        // Act
        let err = p.set_bounds(2.0, 1.0).unwrap_err();

        // Assert
        assert!(matches!(
            err,
            AlignError::InvalidBounds { lower, upper, .. } if lower == 2.0 && upper == 1.0
        ));
        assert_eq!(p.bounds(), (Some(0.0), Some(1.0)));
    }

    #[test]
    // Purpose
    // -------
    // Narrowing bounds does not touch the value; the check reports it.
    //
    // Given
    // -----
    // - Value 0.9 with bounds (0, 1), then bounds narrowed to (0, 0.5).
    //
    // Expect
    // ------
    // - `set_bounds` succeeds; `is_within_bounds` returns `Ok(false)`.
    fn set_bounds_defers_value_check() {
        let mut p = Parameter::new("x").with_value(0.9).with_bounds(0.0, 1.0).unwrap();

        p.set_bounds(0.0, 0.5).unwrap();

        assert_eq!(p.value(), Some(0.9));
        assert_eq!(p.is_within_bounds(), Ok(false));
    }

    #[test]
    // Purpose
    // -------
    // `is_within_bounds` is inclusive on both ends.
    fn is_within_bounds_is_inclusive() {
        let lo = Parameter::new("x").with_value(0.0).with_bounds(0.0, 1.0).unwrap();
        let hi = Parameter::new("x").with_value(1.0).with_bounds(0.0, 1.0).unwrap();

        assert_eq!(lo.is_within_bounds(), Ok(true));
        assert_eq!(hi.is_within_bounds(), Ok(true));
    }

    #[test]
    // Purpose
    // -------
    // Missing or NaN components make the check fail rather than answer.
    //
    // Given
    // -----
    // - A parameter without bounds, and one with a NaN value.
    //
    // Expect
    // ------
    // - Both return `IncompleteParameter`.
    fn is_within_bounds_requires_complete_parameter() {
        let unbounded = Parameter::new("x").with_value(0.5);
        let nan = Parameter::new("y").with_value(f64::NAN).with_bounds(0.0, 1.0).unwrap();

        assert!(matches!(
            unbounded.is_within_bounds(),
            Err(AlignError::IncompleteParameter { name, .. }) if name == "x"
        ));
        assert!(matches!(nan.is_within_bounds(), Err(AlignError::IncompleteParameter { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Collapsing pins value and both bounds together.
    fn collapse_to_sets_degenerate_bounds() {
        let mut p = Parameter::new("len");

        p.collapse_to(2.5);

        assert_eq!(p.value(), Some(2.5));
        assert_eq!(p.bounds(), (Some(2.5), Some(2.5)));
        assert_eq!(p.is_within_bounds(), Ok(true));
    }
}
