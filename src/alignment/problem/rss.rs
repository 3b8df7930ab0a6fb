//! Residual sum of squares between the reference signal and a kernel.
//!
//! The kernel's reference support `[t_b, t_e]` is sampled at `n_samples`
//! evenly spaced points (both ends included) and the loss is
//!
//! `w · Σ_x (f_ref(x) − k(x))²`
//!
//! with `w` the weight parameter's value, or 1 without a weight. Nothing is
//! interpolated or integrated; every sample calls the signals directly.
use ndarray::Array1;

use crate::alignment::{
    core::{options::SamplingOptions, parameter::Parameter, validation::require},
    errors::AlignResult,
    kernels::kernel::Kernel,
    models::alignment::AlignmentModel,
    problem::loss::Loss,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ResidualSumOfSquares {
    kernel: Kernel,
    options: SamplingOptions,
    weight: Option<Parameter>,
}

impl ResidualSumOfSquares {
    pub fn new(kernel: Kernel, options: SamplingOptions) -> Self {
        ResidualSumOfSquares { kernel, options, weight: None }
    }

    /// Builder: attach a weight parameter.
    pub fn with_weight(mut self, weight: Parameter) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn options(&self) -> &SamplingOptions {
        &self.options
    }
}

impl Loss for ResidualSumOfSquares {
    fn name(&self) -> &str {
        "rss"
    }

    fn weight(&self) -> Option<&Parameter> {
        self.weight.as_ref()
    }

    fn evaluate(&self, model: &AlignmentModel) -> AlignResult<f64> {
        let weight = match &self.weight {
            Some(p) => require(p.value(), p.name(), "value")?,
            None => 1.0,
        };
        let (t_b, t_e) = self.kernel.ref_support(model)?;
        let mut total = 0.0;
        for &x in Array1::linspace(t_b, t_e, self.options.n_samples).iter() {
            // linspace may overshoot the end by rounding.
            let x = x.min(t_e);
            let residual = model.signals().reference(x) - self.kernel.evaluate(model, x)?;
            total += residual * residual;
        }
        Ok(weight * total)
    }
}
