//! Intervals — one segment of the reference partition and its query length policy.
//!
//! Purpose
//! -------
//! Represent a single interval of an alignment model: how much of the
//! reference span it covers (`ref_length`) and how it determines how much of
//! the query span it consumes.
//!
//! Key behaviors
//! -------------
//! - [`IntervalKind`] is a tagged variant carrying only what each policy needs:
//!   - `Constant`: fixed length; its parameter's bounds collapse to `[l, l]`;
//!     never trainable.
//!   - `MinMax`: trainable length, box-bounded by caller-supplied `[min, max]`
//!     (further constrained by the optimizer's inequality constraints).
//!   - `Relative`: trainable weight `w`; the effective length is
//!     `(w + μ_R) · ρ / Σ ϑ_R`, coupling every relative interval of the model.
//!   - `Flexible`: no parameter; the effective length is ρ, whatever the
//!     constant and min-max intervals leave unclaimed.
//! - Effective lengths are computed against a borrowed [`AlignmentModel`]
//!   on every call; nothing is cached.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ref_length > 0` and non-NaN, enforced on construction and every set.
//! - Stored lengths and relative weights are non-NaN and `>= 0` when set
//!   through this API; the optimizer may later write any value.
//! - Every interval carries a process-unique [`IntervalId`]. Kernels and the
//!   model refer to intervals by id instead of holding references, so an
//!   interval never points back into its model.
//!
//! Conventions
//! -----------
//! - The length-control parameter is named `len` (constant, min-max) or
//!   `rel_len` (relative).
//! - Once an interval is added to a model, mutate it through the model's
//!   `set_interval_*` methods so capacity checks keep holding.
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::alignment::{
    core::{
        parameter::Parameter,
        validation::{require, validate_length, validate_min_max_lengths, validate_ref_length},
    },
    errors::{AlignError, AlignResult},
    models::alignment::AlignmentModel,
};

static NEXT_INTERVAL_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of an interval, independent of its sequence position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(u64);

impl IntervalId {
    fn next() -> Self {
        IntervalId(NEXT_INTERVAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Length policy tag of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalType {
    Constant,
    MinMax,
    Relative,
    Flexible,
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntervalType::Constant => "constant",
            IntervalType::MinMax => "min-max",
            IntervalType::Relative => "relative",
            IntervalType::Flexible => "flexible",
        };
        f.write_str(name)
    }
}

/// Per-policy state of an interval.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalKind {
    Constant { length: Parameter },
    MinMax { length: Parameter },
    Relative { weight: Parameter },
    Flexible,
}

/// One interval of an alignment model.
///
/// Not `Clone`: the id is the interval's identity within a model.
#[derive(Debug, PartialEq)]
pub struct Interval {
    id: IntervalId,
    ref_length: f64,
    kind: IntervalKind,
}

impl Interval {
    fn with_kind(ref_length: f64, kind: IntervalKind) -> AlignResult<Self> {
        validate_ref_length(ref_length)?;
        Ok(Interval { id: IntervalId::next(), ref_length, kind })
    }

    /// A constant-length interval.
    ///
    /// If `length` is given it is validated and the parameter's bounds collapse
    /// to `[length, length]`.
    ///
    /// # Errors
    /// - [`AlignError::InvalidRefLength`] for a NaN or non-positive `ref_length`.
    /// - [`AlignError::InvalidLength`] for a NaN or negative `length`.
    pub fn constant(ref_length: f64, length: Option<f64>) -> AlignResult<Self> {
        let param = Parameter::new("len").trainable(false);
        let mut interval = Self::with_kind(ref_length, IntervalKind::Constant { length: param })?;
        if let Some(length) = length {
            interval.set_length(length)?;
        }
        Ok(interval)
    }

    /// A min-max-length interval with a trainable length.
    ///
    /// `min_max_lengths` are box bounds only; the optimizer is expected to
    /// enforce the actual inequality constraints.
    ///
    /// # Errors
    /// - [`AlignError::InvalidRefLength`] / [`AlignError::InvalidLength`] as for
    ///   [`Interval::constant`].
    /// - [`AlignError::InvalidMinMaxLengths`] / [`AlignError::LengthOutsideBounds`]
    ///   if the bounds are malformed or exclude `length`.
    pub fn min_max(
        ref_length: f64, length: Option<f64>, min_max_lengths: Option<(f64, f64)>,
    ) -> AlignResult<Self> {
        let param = Parameter::new("len").trainable(true);
        let mut interval = Self::with_kind(ref_length, IntervalKind::MinMax { length: param })?;
        if let Some(length) = length {
            interval.set_length(length)?;
        }
        if let Some((min, max)) = min_max_lengths {
            interval.set_min_max_lengths(min, max)?;
        }
        Ok(interval)
    }

    /// A relative-length interval with trainable weight `rel_length`
    /// (default `0.0`).
    ///
    /// # Errors
    /// - [`AlignError::InvalidRefLength`] for a NaN or non-positive `ref_length`.
    /// - [`AlignError::InvalidLength`] for a NaN or negative weight.
    pub fn relative(ref_length: f64, rel_length: Option<f64>) -> AlignResult<Self> {
        let param = Parameter::new("rel_len").trainable(true);
        let mut interval = Self::with_kind(ref_length, IntervalKind::Relative { weight: param })?;
        interval.set_rel_length(rel_length.unwrap_or(0.0))?;
        Ok(interval)
    }

    /// A flexible interval absorbing the unclaimed query length.
    ///
    /// # Errors
    /// [`AlignError::InvalidRefLength`] for a NaN or non-positive `ref_length`.
    pub fn flexible(ref_length: f64) -> AlignResult<Self> {
        Self::with_kind(ref_length, IntervalKind::Flexible)
    }

    pub fn id(&self) -> IntervalId {
        self.id
    }

    pub fn kind(&self) -> &IntervalKind {
        &self.kind
    }

    pub fn interval_type(&self) -> IntervalType {
        match self.kind {
            IntervalKind::Constant { .. } => IntervalType::Constant,
            IntervalKind::MinMax { .. } => IntervalType::MinMax,
            IntervalKind::Relative { .. } => IntervalType::Relative,
            IntervalKind::Flexible => IntervalType::Flexible,
        }
    }

    pub fn ref_length(&self) -> f64 {
        self.ref_length
    }

    /// Replace the reference length.
    ///
    /// For an interval owned by a model use
    /// [`AlignmentModel::set_interval_ref_length`], which also re-checks the
    /// reference capacity.
    ///
    /// # Errors
    /// [`AlignError::InvalidRefLength`] for a NaN or non-positive value.
    pub fn set_ref_length(&mut self, value: f64) -> AlignResult<()> {
        validate_ref_length(value)?;
        self.ref_length = value;
        Ok(())
    }

    /// The length-control parameter, absent for flexible intervals.
    pub fn length_param(&self) -> Option<&Parameter> {
        match &self.kind {
            IntervalKind::Constant { length } | IntervalKind::MinMax { length } => Some(length),
            IntervalKind::Relative { weight } => Some(weight),
            IntervalKind::Flexible => None,
        }
    }

    pub(crate) fn length_param_mut(&mut self) -> Option<&mut Parameter> {
        match &mut self.kind {
            IntervalKind::Constant { length } | IntervalKind::MinMax { length } => Some(length),
            IntervalKind::Relative { weight } => Some(weight),
            IntervalKind::Flexible => None,
        }
    }

    /// Snapshot of the owned parameters (empty for flexible intervals).
    pub fn params(&self) -> Vec<Parameter> {
        self.length_param().cloned().into_iter().collect()
    }

    /// The relative weight, for relative intervals.
    pub fn rel_length(&self) -> Option<f64> {
        match &self.kind {
            IntervalKind::Relative { weight } => weight.value(),
            _ => None,
        }
    }

    /// Current `(min, max)` box bounds, for min-max intervals.
    pub fn min_max_lengths(&self) -> Option<(Option<f64>, Option<f64>)> {
        match &self.kind {
            IntervalKind::MinMax { length } => Some(length.bounds()),
            _ => None,
        }
    }

    /// Assign an explicit length.
    ///
    /// - Constant: value and bounds collapse to `value` atomically.
    /// - MinMax: value only; box bounds are the optimizer's business.
    ///
    /// # Errors
    /// - [`AlignError::InvalidLength`] for a NaN or negative value.
    /// - [`AlignError::UnsupportedMutation`] for relative and flexible
    ///   intervals, whose lengths are derived.
    pub fn set_length(&mut self, value: f64) -> AlignResult<()> {
        let interval_type = self.interval_type();
        match &mut self.kind {
            IntervalKind::Constant { length } => {
                validate_length(value)?;
                length.collapse_to(value);
                Ok(())
            }
            IntervalKind::MinMax { length } => {
                validate_length(value)?;
                length.set_value(value);
                Ok(())
            }
            IntervalKind::Relative { .. } | IntervalKind::Flexible => {
                Err(AlignError::UnsupportedMutation {
                    interval_type,
                    operation: "assigning an explicit length",
                })
            }
        }
    }

    /// Replace the box bounds of a min-max interval.
    ///
    /// # Errors
    /// - [`AlignError::InvalidMinMaxLengths`] if either bound is NaN or
    ///   `min >= max`.
    /// - [`AlignError::LengthOutsideBounds`] if the live length falls outside.
    /// - [`AlignError::UnsupportedMutation`] for any other variant.
    ///
    /// On error the previous bounds are kept.
    pub fn set_min_max_lengths(&mut self, min: f64, max: f64) -> AlignResult<()> {
        let interval_type = self.interval_type();
        match &mut self.kind {
            IntervalKind::MinMax { length } => {
                validate_min_max_lengths(min, max, length.value())?;
                length.set_bounds(min, max)
            }
            _ => Err(AlignError::UnsupportedMutation {
                interval_type,
                operation: "setting min/max lengths",
            }),
        }
    }

    /// Replace the weight of a relative interval.
    ///
    /// # Errors
    /// - [`AlignError::InvalidLength`] for a NaN or negative weight.
    /// - [`AlignError::UnsupportedMutation`] for any other variant.
    pub fn set_rel_length(&mut self, value: f64) -> AlignResult<()> {
        let interval_type = self.interval_type();
        match &mut self.kind {
            IntervalKind::Relative { weight } => {
                validate_length(value)?;
                weight.set_value(value);
                Ok(())
            }
            _ => Err(AlignError::UnsupportedMutation {
                interval_type,
                operation: "setting a relative length",
            }),
        }
    }

    /// The query length this interval takes up under `model`'s current state.
    ///
    /// # Errors
    /// - [`AlignError::UnsetValue`] if a stored length or weight is absent.
    /// - Any error raised while deriving ρ, μ_R or ϑ_R from the model.
    pub fn length(&self, model: &AlignmentModel) -> AlignResult<f64> {
        match &self.kind {
            IntervalKind::Constant { length } | IntervalKind::MinMax { length } => {
                require(length.value(), length.name(), "value")
            }
            IntervalKind::Relative { weight } => {
                let w = require(weight.value(), weight.name(), "value")?;
                let total: f64 = model.vartheta_r()?.iter().sum();
                Ok((w + model.mu_r()?) * model.available_length()? / total)
            }
            IntervalKind::Flexible => model.available_length(),
        }
    }

    /// φ for this interval; see [`AlignmentModel::interval_offset`].
    pub fn offset(&self, model: &AlignmentModel) -> AlignResult<f64> {
        model.interval_offset(self.id)
    }
}
