//! Kernel — the closed set of coordinate mappings a problem can register.
//!
//! A tagged variant over the concrete kernels with `match` dispatch. Meta
//! kernels box their children, so arbitrarily nested compositions are plain
//! owned values.
use crate::alignment::{
    core::{interval::IntervalId, parameter::Parameter},
    errors::AlignResult,
    kernels::{
        linear::LinearWarpingKernel,
        meta::{CompositeKernel, MultiReferenceKernel},
    },
    models::alignment::AlignmentModel,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Kernel {
    Linear(LinearWarpingKernel),
    Composite(CompositeKernel),
    MultiReference(MultiReferenceKernel),
}

impl Kernel {
    /// The interval this kernel maps.
    pub fn interval(&self) -> IntervalId {
        match self {
            Kernel::Linear(k) => k.interval(),
            Kernel::Composite(k) => k.interval(),
            Kernel::MultiReference(k) => k.interval(),
        }
    }

    pub fn params(&self) -> Vec<&Parameter> {
        match self {
            Kernel::Linear(k) => k.params(),
            Kernel::Composite(k) => k.params(),
            Kernel::MultiReference(k) => k.params(),
        }
    }

    /// Evaluate at reference coordinate `x`.
    pub fn evaluate(&self, model: &AlignmentModel, x: f64) -> AlignResult<f64> {
        match self {
            Kernel::Linear(k) => k.evaluate(model, x),
            Kernel::Composite(k) => k.evaluate(model, x),
            Kernel::MultiReference(k) => k.evaluate(model, x),
        }
    }

    pub fn ref_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        match self {
            Kernel::Linear(k) => k.ref_support(model),
            Kernel::Composite(k) => k.ref_support(model),
            Kernel::MultiReference(k) => k.ref_support(model),
        }
    }

    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        match self {
            Kernel::Linear(k) => k.qry_support(model),
            Kernel::Composite(k) => k.qry_support(model),
            Kernel::MultiReference(k) => k.qry_support(model),
        }
    }
}

impl From<LinearWarpingKernel> for Kernel {
    fn from(k: LinearWarpingKernel) -> Self {
        Kernel::Linear(k)
    }
}

impl From<CompositeKernel> for Kernel {
    fn from(k: CompositeKernel) -> Self {
        Kernel::Composite(k)
    }
}

impl From<MultiReferenceKernel> for Kernel {
    fn from(k: MultiReferenceKernel) -> Self {
        Kernel::MultiReference(k)
    }
}
