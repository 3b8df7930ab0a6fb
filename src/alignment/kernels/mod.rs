//! alignment::kernels — coordinate mappings from reference to query.
//!
//! Kernels are bound to one interval of a model by id and evaluated against
//! the model explicitly, so they always see its current geometry.
//!
//! - [`interval_kernel`]: [`IntervalKernel`] / [`IntervalPairKernel`] bases
//!   (query support, reference support, s_b, t_b, t_e, Δt).
//! - [`linear`]: [`LinearWarpingKernel`], the linear remap of a reference
//!   sub-interval onto its query sub-interval.
//! - [`meta`]: [`CompositeKernel`] and [`MultiReferenceKernel`].
//! - [`kernel`]: the [`Kernel`] variant problems store.

pub mod interval_kernel;
pub mod kernel;
pub mod linear;
pub mod meta;

pub use self::interval_kernel::{IntervalKernel, IntervalPairKernel};
pub use self::kernel::Kernel;
pub use self::linear::LinearWarpingKernel;
pub use self::meta::{CompositeKernel, MultiReferenceKernel};
