//! Interval-bound kernel bases: query-side and reference/query pair geometry.
//!
//! Purpose
//! -------
//! Bind a kernel to one interval of an [`AlignmentModel`] and expose the
//! geometry every warping kernel is built from:
//! - [`IntervalKernel`]: the interval's sequence position and its query
//!   support `(s_b, s_b + length)`.
//! - [`IntervalPairKernel`]: additionally a reference index and its reference
//!   support `(θ_b[ref_idx], θ_b[ref_idx + 1])`.
//!
//! Conventions
//! -----------
//! - Kernels hold an [`IntervalId`], never a reference to the model; every
//!   query takes the model explicitly. Asking a model that does not own the
//!   interval fails with [`AlignError::IntervalNotFound`].
//! - `source_begin` is φ of the interval, which already includes β_L.
use crate::alignment::{
    core::interval::IntervalId,
    errors::{AlignError, AlignResult},
    models::alignment::AlignmentModel,
};

/// Kernel base bound to a single interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalKernel {
    interval: IntervalId,
}

impl IntervalKernel {
    /// Bind to `interval`, which `model` must own.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] if `model` does not own `interval`.
    pub fn new(model: &AlignmentModel, interval: IntervalId) -> AlignResult<Self> {
        model.position_of(interval)?;
        Ok(IntervalKernel { interval })
    }

    pub fn interval(&self) -> IntervalId {
        self.interval
    }

    /// Position of the interval in the model's sequence.
    pub fn qry_idx(&self, model: &AlignmentModel) -> AlignResult<usize> {
        model.position_of(self.interval)
    }

    /// s_b: query coordinate where the interval begins.
    pub fn source_begin(&self, model: &AlignmentModel) -> AlignResult<f64> {
        // Ownership first: φ of a foreign id silently sums everything.
        model.position_of(self.interval)?;
        model.interval_offset(self.interval)
    }

    /// `(s_b, s_b + length)`.
    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        let begin = self.source_begin(model)?;
        Ok((begin, begin + model.interval_length(self.interval)?))
    }
}

/// Kernel base pairing an interval with a reference sub-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalPairKernel {
    base: IntervalKernel,
    ref_idx: usize,
}

impl IntervalPairKernel {
    /// Pair `interval` with reference sub-interval `ref_idx`, defaulting to the
    /// interval's own position.
    ///
    /// The index is checked against the partition lazily, when the reference
    /// support is read.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] if `model` does not own `interval`.
    pub fn new(
        model: &AlignmentModel, interval: IntervalId, ref_idx: Option<usize>,
    ) -> AlignResult<Self> {
        let base = IntervalKernel::new(model, interval)?;
        let ref_idx = match ref_idx {
            Some(idx) => idx,
            None => base.qry_idx(model)?,
        };
        Ok(IntervalPairKernel { base, ref_idx })
    }

    pub fn interval(&self) -> IntervalId {
        self.base.interval()
    }

    pub fn ref_idx(&self) -> usize {
        self.ref_idx
    }

    pub fn qry_idx(&self, model: &AlignmentModel) -> AlignResult<usize> {
        self.base.qry_idx(model)
    }

    pub fn source_begin(&self, model: &AlignmentModel) -> AlignResult<f64> {
        self.base.source_begin(model)
    }

    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.base.qry_support(model)
    }

    /// `(θ_b[ref_idx], θ_b[ref_idx + 1])`.
    ///
    /// # Errors
    /// [`AlignError::ReferenceIndexOutOfRange`] if `ref_idx` is not a valid
    /// interval index of the current partition.
    pub fn ref_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        let theta_b = model.reference_boundaries();
        match (theta_b.get(self.ref_idx), theta_b.get(self.ref_idx + 1)) {
            (Some(&begin), Some(&end)) => Ok((begin, end)),
            _ => Err(AlignError::ReferenceIndexOutOfRange {
                index: self.ref_idx,
                intervals: model.interval_count(),
            }),
        }
    }

    /// t_b.
    pub fn target_begin(&self, model: &AlignmentModel) -> AlignResult<f64> {
        Ok(self.ref_support(model)?.0)
    }

    /// t_e.
    pub fn target_end(&self, model: &AlignmentModel) -> AlignResult<f64> {
        Ok(self.ref_support(model)?.1)
    }

    /// Δt = t_e − t_b.
    pub fn delta_t(&self, model: &AlignmentModel) -> AlignResult<f64> {
        let (begin, end) = self.ref_support(model)?;
        Ok(end - begin)
    }
}
