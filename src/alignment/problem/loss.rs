//! Loss interface shared by losses and regularizers of an alignment problem.
//!
//! A loss reads the current state of an [`AlignmentModel`] (through whatever
//! kernels it holds) and returns a scalar. Losses never mutate the model.
use std::fmt;

use crate::alignment::{
    core::parameter::Parameter, errors::AlignResult, models::alignment::AlignmentModel,
};

/// A scalar objective term over an alignment model.
///
/// Required:
/// - `name()`: label used in logs and not-found errors.
/// - `evaluate(&AlignmentModel) -> AlignResult<f64>`: the term's value,
///   weight included.
///
/// Optional:
/// - `weight()`: the term's weight parameter (`None` means weight 1).
/// - `params()`: parameters the term owns; defaults to the weight, if any.
pub trait Loss: fmt::Debug {
    fn name(&self) -> &str;

    fn evaluate(&self, model: &AlignmentModel) -> AlignResult<f64>;

    fn weight(&self) -> Option<&Parameter> {
        None
    }

    fn params(&self) -> Vec<&Parameter> {
        self.weight().into_iter().collect()
    }
}
