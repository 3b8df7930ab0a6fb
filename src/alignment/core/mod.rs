//! alignment::core — the building blocks every model and kernel shares.
//!
//! Purpose
//! -------
//! Collect the primitives of the alignment engine: bounded scalar
//! [`Parameter`]s, the [`Interval`] variants that partition a reference span,
//! caller-supplied [`Signals`], validated options, and the numeric validation
//! helpers used by constructors and setters.
//!
//! Key behaviors
//! -------------
//! - [`parameter`] owns value/bounds/trainability of a single scalar.
//! - [`interval`] defines the four length policies as one tagged enum and
//!   computes effective lengths against a borrowed model.
//! - [`options`] holds [`AlignmentOptions`] (separation margin) and
//!   [`SamplingOptions`] (sample count for sampled losses).
//! - [`validation`] returns typed errors for every numeric contract.
//!
//! Conventions
//! -----------
//! - Nothing in this module caches derived geometry; intervals read the
//!   current state of the model they are asked about.

pub mod interval;
pub mod options;
pub mod parameter;
pub mod signals;
pub mod validation;

pub use self::interval::{Interval, IntervalId, IntervalKind, IntervalType};
pub use self::options::{AlignmentOptions, DEFAULT_N_SAMPLES, SamplingOptions};
pub use self::parameter::Parameter;
pub use self::signals::{SignalFn, Signals};
pub use self::validation::{
    require, validate_bounds, validate_length, validate_margin, validate_min_max_lengths,
    validate_ref_length,
};
