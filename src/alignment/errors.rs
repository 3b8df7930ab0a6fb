//! Errors for interval alignment models (parameter/bounds validation, interval
//! capacity, partition lookups, derived-geometry state, and ownership checks).
//!
//! This module defines a single error type, [`AlignError`], used by every part
//! of the alignment engine, plus a coarse classification, [`ErrorKind`], that
//! groups the concrete variants into the five failure families callers are
//! expected to react to.
//!
//! ## Conventions
//! - **Indices are 0-based**; interval positions refer to the model's current
//!   sequence order.
//! - Variants carry the offending values so messages are self-describing.
//! - Every failure is a caller contract violation; nothing here is retried
//!   internally. An optimizer driving a model should treat any error as a hard
//!   stop of the current evaluation.
use crate::alignment::core::interval::{IntervalId, IntervalType};

/// Crate-wide result alias for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;

/// Failure family of an [`AlignError`].
///
/// - `Configuration`: malformed bounds, NaN where disallowed, misordered
///   begin/end, invalid lengths, conflicting kernel targets.
/// - `Capacity`: an interval would overrun the reference or query budget, or
///   would be a second flexible interval.
/// - `OutOfRange`: a coordinate or index outside the valid domain.
/// - `IllegalState`: derived geometry requested while invariants are broken, or
///   an unsupported mutation.
/// - `NotFound`: an interval, loss or regularizer that is not owned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Capacity,
    OutOfRange,
    IllegalState,
    NotFound,
}

/// Unified error type for the alignment engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AlignError {
    // ---- Configuration ----
    /// Bounds must be non-NaN with lower < upper.
    InvalidBounds { lower: f64, upper: f64, reason: &'static str },

    /// A bounds check needs a value and both bounds, none of them NaN.
    IncompleteParameter { name: String, reason: &'static str },

    /// Reference lengths must be non-NaN and > 0.
    InvalidRefLength { value: f64 },

    /// Interval lengths (and relative weights) must be non-NaN and >= 0.
    InvalidLength { value: f64 },

    /// Min/max length bounds are malformed.
    InvalidMinMaxLengths { min: f64, max: f64, reason: &'static str },

    /// Proposed min/max bounds would exclude the live length.
    LengthOutsideBounds { length: f64, min: f64, max: f64 },

    /// The reference begin must be concrete and within its bounds.
    InvalidReferenceBegin { reason: &'static str },

    /// Query begin lower bound must precede query end upper bound.
    MisorderedQueryBounds { begin_lower: Option<f64>, end_upper: Option<f64> },

    /// The reference support must be non-NaN with lower < upper.
    InvalidReferenceSupport { lower: f64, upper: f64 },

    /// The separation margin must be finite and >= 0.
    InvalidMargin { value: f64 },

    /// Sampled losses need at least two samples.
    InvalidSampleCount { n_samples: usize },

    /// A multi-reference kernel needs one or more reference indices.
    EmptyReferenceIndexes,

    /// Both kernels of a composite must target the same interval.
    KernelIntervalMismatch { outer: IntervalId, inner: IntervalId },

    /// A kernel for this interval was registered previously.
    DuplicateKernel { interval: IntervalId },

    /// Optimizer vector length does not match the trainable parameter count.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Optimizer vector entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Capacity ----
    /// Adding the interval would overrun the reference span.
    ReferenceCapacityExceeded { available: f64, used: f64, requested: f64, overage: f64 },

    /// Adding the interval would overrun the query support.
    QueryCapacityExceeded { available: f64, claimed: f64, requested: f64 },

    /// A model holds at most one flexible interval.
    DuplicateFlexibleInterval,

    // ---- Out of range ----
    /// Coordinate outside the closed domain `[lower, upper]`.
    CoordinateOutOfRange { x: f64, lower: f64, upper: f64 },

    /// Reference index beyond the current partition.
    ReferenceIndexOutOfRange { index: usize, intervals: usize },

    // ---- Illegal state ----
    /// Query end precedes query begin and no margin is configured.
    BeginAfterEnd { begin: f64, end: f64 },

    /// The variant does not support this mutation.
    UnsupportedMutation { interval_type: IntervalType, operation: &'static str },

    /// A value or bound needed for derived geometry is absent.
    UnsetValue { name: String, field: &'static str },

    /// The model has no intervals to look up.
    EmptyPartition,

    // ---- Not found ----
    /// The interval is not owned by this model.
    IntervalNotFound { id: IntervalId },

    /// The loss is not registered with the problem.
    LossNotFound { name: String },

    /// The regularizer is not registered with the problem.
    RegularizerNotFound { name: String },
}

impl AlignError {
    /// Classify this error into its failure family.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlignError::InvalidBounds { .. }
            | AlignError::IncompleteParameter { .. }
            | AlignError::InvalidRefLength { .. }
            | AlignError::InvalidLength { .. }
            | AlignError::InvalidMinMaxLengths { .. }
            | AlignError::LengthOutsideBounds { .. }
            | AlignError::InvalidReferenceBegin { .. }
            | AlignError::MisorderedQueryBounds { .. }
            | AlignError::InvalidReferenceSupport { .. }
            | AlignError::InvalidMargin { .. }
            | AlignError::InvalidSampleCount { .. }
            | AlignError::EmptyReferenceIndexes
            | AlignError::KernelIntervalMismatch { .. }
            | AlignError::DuplicateKernel { .. }
            | AlignError::ThetaLengthMismatch { .. }
            | AlignError::InvalidThetaInput { .. } => ErrorKind::Configuration,

            AlignError::ReferenceCapacityExceeded { .. }
            | AlignError::QueryCapacityExceeded { .. }
            | AlignError::DuplicateFlexibleInterval => ErrorKind::Capacity,

            AlignError::CoordinateOutOfRange { .. }
            | AlignError::ReferenceIndexOutOfRange { .. } => ErrorKind::OutOfRange,

            AlignError::BeginAfterEnd { .. }
            | AlignError::UnsupportedMutation { .. }
            | AlignError::UnsetValue { .. }
            | AlignError::EmptyPartition => ErrorKind::IllegalState,

            AlignError::IntervalNotFound { .. }
            | AlignError::LossNotFound { .. }
            | AlignError::RegularizerNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl std::error::Error for AlignError {}

impl std::fmt::Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            AlignError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid bounds ({lower}, {upper}): {reason}")
            }
            AlignError::IncompleteParameter { name, reason } => {
                write!(f, "Cannot check bounds of parameter '{name}': {reason}")
            }
            AlignError::InvalidRefLength { value } => {
                write!(f, "The reference length must be greater than 0; got: {value}")
            }
            AlignError::InvalidLength { value } => {
                write!(f, "Length must not be NaN or negative; got: {value}")
            }
            AlignError::InvalidMinMaxLengths { min, max, reason } => {
                write!(f, "Invalid min/max lengths ({min}, {max}): {reason}")
            }
            AlignError::LengthOutsideBounds { length, min, max } => {
                write!(f, "Current length {length} is outside the proposed bounds [{min}, {max}]")
            }
            AlignError::InvalidReferenceBegin { reason } => {
                write!(f, "Invalid reference begin: {reason}")
            }
            AlignError::MisorderedQueryBounds { begin_lower, end_upper } => {
                write!(
                    f,
                    "Begin/end bounds misconfigured: begin lower bound {begin_lower:?} must be \
                     smaller than end upper bound {end_upper:?}"
                )
            }
            AlignError::InvalidReferenceSupport { lower, upper } => {
                write!(f, "The reference support ({lower}, {upper}) is ill-defined")
            }
            AlignError::InvalidMargin { value } => {
                write!(f, "Separation margin gamma_d must be finite and >= 0; got: {value}")
            }
            AlignError::InvalidSampleCount { n_samples } => {
                write!(f, "At least two samples are required; got: {n_samples}")
            }
            AlignError::EmptyReferenceIndexes => {
                write!(f, "Need one or more reference indexes")
            }
            AlignError::KernelIntervalMismatch { outer, inner } => {
                write!(
                    f,
                    "Composite kernels must refer to the same query interval; outer targets \
                     {outer}, inner targets {inner}"
                )
            }
            AlignError::DuplicateKernel { interval } => {
                write!(f, "Another kernel for interval {interval} was added previously")
            }
            AlignError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            AlignError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }

            // ---- Capacity ----
            AlignError::ReferenceCapacityExceeded { available, overage, .. } => {
                write!(
                    f,
                    "Cannot add interval as reference-length would exceed the available length \
                     of {available} by {overage}"
                )
            }
            AlignError::QueryCapacityExceeded { available, claimed, requested } => {
                write!(
                    f,
                    "Cannot add interval as fixed query lengths ({claimed} claimed + {requested} \
                     requested) would exceed the query support of {available}"
                )
            }
            AlignError::DuplicateFlexibleInterval => {
                write!(f, "A model can only have zero to one flexible intervals")
            }

            // ---- Out of range ----
            AlignError::CoordinateOutOfRange { x, lower, upper } => {
                write!(f, "x={x} is out of range, needs to be {lower} <= x <= {upper}")
            }
            AlignError::ReferenceIndexOutOfRange { index, intervals } => {
                write!(f, "Reference index {index} is out of range for {intervals} intervals")
            }

            // ---- Illegal state ----
            AlignError::BeginAfterEnd { begin, end } => {
                write!(
                    f,
                    "Illegal model state, end ({end}) comes before begin ({begin}); check \
                     inequality constraints"
                )
            }
            AlignError::UnsupportedMutation { interval_type, operation } => {
                write!(f, "A {interval_type} interval does not support: {operation}")
            }
            AlignError::UnsetValue { name, field } => {
                write!(f, "Parameter '{name}' has no {field}")
            }
            AlignError::EmptyPartition => {
                write!(f, "The model has no intervals")
            }

            // ---- Not found ----
            AlignError::IntervalNotFound { id } => {
                write!(f, "Interval {id} is not part of this model")
            }
            AlignError::LossNotFound { name } => {
                write!(f, "Loss '{name}' is not registered")
            }
            AlignError::RegularizerNotFound { name } => {
                write!(f, "Regularizer '{name}' is not registered")
            }
        }
    }
}
