//! rust_timewarp — piecewise-parametric alignment of a query signal onto a
//! reference signal.
//!
//! Purpose
//! -------
//! Serve as the crate root. The reference span is cut into intervals, each
//! interval gets a policy for its length on the query axis, and kernels map
//! reference coordinates into query coordinates interval by interval. The
//! free quantities of that description are `Parameter`s that an external
//! optimizer moves.
//!
//! Key behaviors
//! -------------
//! - `alignment`: parameters, intervals, the alignment model and its derived
//!   geometry, kernels, losses and the problem aggregate.
//! - `optimization`: the `argmin` adapter, θ/cost/gradient validation and the
//!   optimizer-facing error type.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration mistakes and out-of-range queries are returned as typed
//!   errors, never panics.
//! - All derived geometry is recomputed on read; there is no cache to
//!   invalidate.
//!
//! Conventions
//! -----------
//! - The crate emits `tracing` events and leaves subscriber setup to the
//!   binary that links it.
//! - Fallible public functions return `AlignResult<T>` in `alignment` and
//!   `OptResult<T>` in `optimization`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code in each module.
//! - `tests/integration_alignment_pipeline.rs` builds a full problem through
//!   the public API and drives it through the adapter.

pub mod alignment;
pub mod optimization;
