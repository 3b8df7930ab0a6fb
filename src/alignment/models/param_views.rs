//! Optimizer-facing views of a model's trainable parameters.
//!
//! Purpose
//! -------
//! Expose the trainable parameters of an [`AlignmentModel`] in the two shapes
//! an external optimizer consumes:
//! - ordered dictionaries keyed `{name}_{k}` (1-based position `k` among the
//!   trainable parameters), for setting up box constraints by name, and
//! - flat `ndarray` vectors (θ, lower/upper bounds) in the same order.
//!
//! Conventions
//! -----------
//! - Order: query begin (if trainable), query end (if trainable), then each
//!   interval's trainable length parameter in sequence order.
//! - Absent bounds are `None` in the dictionaries and `∓∞` in the vectors.
//! - [`AlignmentModel::set_theta`] writes values only; bounds are the
//!   optimizer's business and are not enforced here.
use indexmap::IndexMap;
use ndarray::{Array1, ArrayView1};

use crate::alignment::{
    core::{interval::Interval, parameter::Parameter, validation::require},
    errors::{AlignError, AlignResult},
    models::alignment::AlignmentModel,
};

/// Map each parameter's `{name}_{k}` key to its value.
pub fn values_as_dict(params: &[&Parameter]) -> IndexMap<String, Option<f64>> {
    keyed(params, Parameter::value)
}

/// Map each parameter's `{name}_{k}` key to its lower bound.
pub fn lower_bounds_as_dict(params: &[&Parameter]) -> IndexMap<String, Option<f64>> {
    keyed(params, Parameter::lower_bound)
}

/// Map each parameter's `{name}_{k}` key to its upper bound.
pub fn upper_bounds_as_dict(params: &[&Parameter]) -> IndexMap<String, Option<f64>> {
    keyed(params, Parameter::upper_bound)
}

fn keyed(
    params: &[&Parameter], field: impl Fn(&Parameter) -> Option<f64>,
) -> IndexMap<String, Option<f64>> {
    params
        .iter()
        .enumerate()
        .map(|(idx, p)| (format!("{}_{}", p.name(), idx + 1), field(p)))
        .collect()
}

impl AlignmentModel {
    /// Trainable parameters in optimizer order.
    pub fn trainable_params(&self) -> Vec<&Parameter> {
        let mut params = Vec::new();
        if self.qry_begin.is_trainable() {
            params.push(&self.qry_begin);
        }
        if self.qry_end.is_trainable() {
            params.push(&self.qry_end);
        }
        params.extend(
            self.intervals.iter().filter_map(Interval::length_param).filter(|p| p.is_trainable()),
        );
        params
    }

    /// Mutable trainable parameters in optimizer order.
    pub fn trainable_params_mut(&mut self) -> Vec<&mut Parameter> {
        let AlignmentModel { qry_begin, qry_end, intervals, .. } = self;
        let mut params = Vec::new();
        if qry_begin.is_trainable() {
            params.push(qry_begin);
        }
        if qry_end.is_trainable() {
            params.push(qry_end);
        }
        params.extend(
            intervals
                .iter_mut()
                .filter_map(Interval::length_param_mut)
                .filter(|p| p.is_trainable()),
        );
        params
    }

    pub fn trainable_count(&self) -> usize {
        self.trainable_params().len()
    }

    pub fn trainable_params_as_dict(&self) -> IndexMap<String, Option<f64>> {
        values_as_dict(&self.trainable_params())
    }

    pub fn lower_bounds_as_dict(&self) -> IndexMap<String, Option<f64>> {
        lower_bounds_as_dict(&self.trainable_params())
    }

    pub fn upper_bounds_as_dict(&self) -> IndexMap<String, Option<f64>> {
        upper_bounds_as_dict(&self.trainable_params())
    }

    /// Current trainable values as θ.
    ///
    /// # Errors
    /// [`AlignError::UnsetValue`] if a trainable parameter has no value.
    pub fn theta(&self) -> AlignResult<Array1<f64>> {
        let values = self
            .trainable_params()
            .into_iter()
            .map(|p| require(p.value(), p.name(), "value"))
            .collect::<AlignResult<Vec<f64>>>()?;
        Ok(Array1::from(values))
    }

    /// Write θ into the trainable parameters.
    ///
    /// # Errors
    /// - [`AlignError::ThetaLengthMismatch`] if `theta.len()` differs from
    ///   the trainable count.
    /// - [`AlignError::InvalidThetaInput`] at the first non-finite entry.
    ///
    /// Nothing is written on error.
    pub fn set_theta(&mut self, theta: ArrayView1<f64>) -> AlignResult<()> {
        let expected = self.trainable_count();
        if theta.len() != expected {
            return Err(AlignError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(AlignError::InvalidThetaInput { index, value });
        }
        for (param, &value) in self.trainable_params_mut().into_iter().zip(theta.iter()) {
            param.set_value(value);
        }
        Ok(())
    }

    /// Lower bounds in θ order; absent bounds are `-∞`.
    pub fn lower_bounds(&self) -> Array1<f64> {
        self.trainable_params()
            .into_iter()
            .map(|p| p.lower_bound().unwrap_or(f64::NEG_INFINITY))
            .collect()
    }

    /// Upper bounds in θ order; absent bounds are `+∞`.
    pub fn upper_bounds(&self) -> Array1<f64> {
        self.trainable_params()
            .into_iter()
            .map(|p| p.upper_bound().unwrap_or(f64::INFINITY))
            .collect()
    }
}
