//! Meta kernels that wrap other kernels.
//!
//! - [`CompositeKernel`]: `outer(inner(x))` for two kernels on the same
//!   interval. Parameters are the concatenation of both.
//! - [`MultiReferenceKernel`]: delegates to one kernel and records the
//!   reference indices it corresponds to, for losses that compare against
//!   several reference segments.
use crate::alignment::{
    core::{interval::IntervalId, parameter::Parameter},
    errors::{AlignError, AlignResult},
    kernels::kernel::Kernel,
    models::alignment::AlignmentModel,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeKernel {
    outer: Box<Kernel>,
    inner: Box<Kernel>,
}

impl CompositeKernel {
    /// Compose `outer ∘ inner`.
    ///
    /// # Errors
    /// [`AlignError::KernelIntervalMismatch`] if the kernels target different
    /// intervals.
    pub fn new(outer: Kernel, inner: Kernel) -> AlignResult<Self> {
        if outer.interval() != inner.interval() {
            return Err(AlignError::KernelIntervalMismatch {
                outer: outer.interval(),
                inner: inner.interval(),
            });
        }
        Ok(CompositeKernel { outer: Box::new(outer), inner: Box::new(inner) })
    }

    pub fn outer(&self) -> &Kernel {
        &self.outer
    }

    pub fn inner(&self) -> &Kernel {
        &self.inner
    }

    pub fn interval(&self) -> IntervalId {
        self.outer.interval()
    }

    pub fn params(&self) -> Vec<&Parameter> {
        let mut params = self.outer.params();
        params.extend(self.inner.params());
        params
    }

    pub fn evaluate(&self, model: &AlignmentModel, x: f64) -> AlignResult<f64> {
        let y = self.inner.evaluate(model, x)?;
        self.outer.evaluate(model, y)
    }

    pub fn ref_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.inner.ref_support(model)
    }

    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.outer.qry_support(model)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiReferenceKernel {
    wrapped: Box<Kernel>,
    ref_indexes: Vec<usize>,
}

impl MultiReferenceKernel {
    /// Wrap `kernel` with the reference indices it stands for.
    ///
    /// # Errors
    /// [`AlignError::EmptyReferenceIndexes`] if `ref_indexes` is empty.
    pub fn new(kernel: Kernel, ref_indexes: Vec<usize>) -> AlignResult<Self> {
        if ref_indexes.is_empty() {
            return Err(AlignError::EmptyReferenceIndexes);
        }
        Ok(MultiReferenceKernel { wrapped: Box::new(kernel), ref_indexes })
    }

    pub fn wrapped(&self) -> &Kernel {
        &self.wrapped
    }

    pub fn ref_indexes(&self) -> &[usize] {
        &self.ref_indexes
    }

    pub fn interval(&self) -> IntervalId {
        self.wrapped.interval()
    }

    pub fn params(&self) -> Vec<&Parameter> {
        self.wrapped.params()
    }

    pub fn evaluate(&self, model: &AlignmentModel, x: f64) -> AlignResult<f64> {
        self.wrapped.evaluate(model, x)
    }

    pub fn ref_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.wrapped.ref_support(model)
    }

    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.wrapped.qry_support(model)
    }
}
