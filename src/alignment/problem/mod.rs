//! alignment::problem — objectives built on top of a model.
//!
//! - [`loss`]: the [`Loss`] trait shared by losses and regularizers.
//! - [`rss`]: [`ResidualSumOfSquares`], a sampled loss between `f_ref` and a
//!   kernel.
//! - [`alignment_problem`]: [`AlignmentProblem`], the model plus its kernels,
//!   losses and regularizers.

pub mod alignment_problem;
pub mod loss;
pub mod rss;

pub use self::alignment_problem::AlignmentProblem;
pub use self::loss::Loss;
pub use self::rss::ResidualSumOfSquares;
