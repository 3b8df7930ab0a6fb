//! alignment — elastic, piecewise-parametric alignment of a query signal to a
//! reference signal.
//!
//! Purpose
//! -------
//! Describe how a query signal is warped onto a reference signal by
//! partitioning the reference span into intervals, giving each interval a
//! query length policy, and mapping each reference sub-interval onto its
//! query sub-interval with a kernel. The parameters of that description are
//! exposed to an external optimizer, which this module does not provide.
//!
//! Key behaviors
//! -------------
//! - [`core`]: [`Parameter`], [`Interval`] (constant, min-max, relative,
//!   flexible), [`Signals`] and validated options.
//! - [`models`]: [`AlignmentModel`], which owns the interval sequence, keeps
//!   the capacity invariants, and derives θ_b, κ(x), β_L/β_U, ρ, μ_R, ϑ_R and
//!   φ on demand.
//! - [`kernels`]: [`Kernel`] mappings from reference to query coordinates.
//! - [`problem`]: [`Loss`] terms and the [`AlignmentProblem`] aggregate.
//! - [`errors`]: [`AlignError`] with its [`ErrorKind`] classification.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sum of interval reference lengths never exceeds the reference span.
//! - A model holds at most one flexible interval; a problem holds at most one
//!   kernel per interval.
//! - Derived geometry is never cached, so parameter writes by an optimizer
//!   are visible on the next read.
//! - Single owner, single thread: nothing here locks.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; optimizer dictionary keys use a 1-based suffix.
//! - Intervals are referred to by [`IntervalId`], never by reference.
//! - The module logs structural mutations through `tracing` and never
//!   installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! 1. Build an [`AlignmentModel`] from [`Signals`], the reference begin and
//!    the query begin/end parameters.
//! 2. Add intervals with [`AlignmentModel::add_interval`].
//! 3. Wrap it in an [`AlignmentProblem`], register one kernel per interval
//!    and the losses.
//! 4. Drive it from an optimizer through θ
//!    ([`AlignmentModel::theta`] / [`AlignmentModel::set_theta`]) or the
//!    argmin adapter in `optimization`.

pub mod core;
pub mod errors;
pub mod kernels;
pub mod models;
pub mod problem;

pub use self::core::{
    AlignmentOptions, Interval, IntervalId, IntervalKind, IntervalType, Parameter, SamplingOptions,
    Signals,
};
pub use self::errors::{AlignError, AlignResult, ErrorKind};
pub use self::kernels::{
    CompositeKernel, IntervalKernel, IntervalPairKernel, Kernel, LinearWarpingKernel,
    MultiReferenceKernel,
};
pub use self::models::AlignmentModel;
pub use self::problem::{AlignmentProblem, Loss, ResidualSumOfSquares};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_timewarp::alignment::prelude::*;
//
// to import the main alignment surface in a single line.

pub mod prelude {
    pub use super::{
        AlignError, AlignResult, AlignmentModel, AlignmentOptions, AlignmentProblem, ErrorKind,
        Interval, IntervalId, IntervalType, Kernel, LinearWarpingKernel, Loss, Parameter,
        ResidualSumOfSquares, SamplingOptions, Signals,
    };
}
