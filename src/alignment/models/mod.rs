//! alignment::models — the alignment model and its derived views.
//!
//! - [`alignment`]: [`AlignmentModel`] construction, the interval sequence and
//!   capacity-checked mutators.
//! - [`geometry`]: θ_b, κ(x), β_L/β_U, ρ, μ_R, ϑ_R and φ, recomputed on every
//!   call.
//! - [`param_views`]: trainable parameters as ordered dictionaries and
//!   `ndarray` vectors for an external optimizer.

pub mod alignment;
pub mod geometry;
pub mod param_views;

pub use self::alignment::AlignmentModel;
pub use self::param_views::{lower_bounds_as_dict, upper_bounds_as_dict, values_as_dict};
