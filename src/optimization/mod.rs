//! optimization — the seam between an alignment problem and `argmin`.
//!
//! Purpose
//! -------
//! Let an external `argmin` solver drive an [`AlignmentProblem`] through a
//! flat parameter vector θ without knowing anything about intervals,
//! kernels or losses. No solver is bundled; callers pick one and run it
//! against [`ArgMinAdapter`].
//!
//! Key behaviors
//! -------------
//! - [`ArgMinAdapter`] implements `CostFunction` (write θ, evaluate the
//!   objective) and `Gradient` (finite differences over the cost, central
//!   with a forward fallback).
//! - Inputs and outputs are checked by `validation`: θ must be finite and of
//!   the trainable length, costs must be finite, gradients must be finite and
//!   of the right length.
//! - Every failure is an [`OptError`]; alignment failures are wrapped in
//!   [`OptError::Alignment`] and argmin's boxed errors are downcast back to
//!   typed variants.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ order is the model's trainable parameter order.
//! - The objective is minimized as is; no sign flip.
//! - After a gradient evaluation the model holds the θ it was called with.
//!
//! Downstream usage
//! ----------------
//! Wrap the problem in a `RefCell`, build an adapter, take
//! [`ArgMinAdapter::initial_theta`] as the starting point and hand the
//! adapter to an argmin `Executor`.
//!
//! [`AlignmentProblem`]: crate::alignment::AlignmentProblem

pub mod adapter;
pub mod errors;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::ArgMinAdapter;
pub use self::errors::{OptError, OptResult};
pub use self::types::{Cost, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_timewarp::optimization::prelude::*;
//
// to import the optimizer seam in a single line.

pub mod prelude {
    pub use super::adapter::ArgMinAdapter;
    pub use super::errors::{OptError, OptResult};
    pub use super::types::{Cost, Grad, Theta};
}
