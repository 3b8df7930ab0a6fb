//! AlignmentProblem — a model plus the kernels and losses evaluated on it.
//!
//! Purpose
//! -------
//! Aggregate everything an external optimizer needs for one fit: the
//! [`AlignmentModel`], at most one [`Kernel`] per interval, and ordered lists
//! of losses and regularizers whose sum is the objective.
//!
//! Key behaviors
//! -------------
//! - [`AlignmentProblem::add_interval_pair_kernel`] rejects a second kernel for
//!   the same interval; composite and multi-reference kernels are the way to
//!   combine mappings for one interval.
//! - Losses and regularizers are shared handles (`Arc<dyn Loss>`); removal is
//!   by identity, and the getters return snapshots.
//! - [`AlignmentProblem::evaluate`] returns `Σ losses + Σ regularizers` under
//!   the model's current state.
//!
//! Conventions
//! -----------
//! - `trainable_params` order: model, then kernels, then loss weights, then
//!   regularizer weights. Only the model's part is written through θ (see
//!   [`AlignmentModel::set_theta`]); loss weights are reported for
//!   inspection.
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::alignment::{
    core::{interval::IntervalId, parameter::Parameter},
    errors::{AlignError, AlignResult},
    kernels::kernel::Kernel,
    models::{alignment::AlignmentModel, param_views::values_as_dict},
    problem::loss::Loss,
};

#[derive(Debug)]
pub struct AlignmentProblem {
    model: AlignmentModel,
    kernels: Vec<Kernel>,
    losses: Vec<Arc<dyn Loss>>,
    regularizers: Vec<Arc<dyn Loss>>,
}

impl AlignmentProblem {
    pub fn new(model: AlignmentModel) -> Self {
        AlignmentProblem {
            model,
            kernels: Vec::new(),
            losses: Vec::new(),
            regularizers: Vec::new(),
        }
    }

    pub fn model(&self) -> &AlignmentModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AlignmentModel {
        &mut self.model
    }

    pub fn into_model(self) -> AlignmentModel {
        self.model
    }

    pub fn kernels(&self) -> &[Kernel] {
        &self.kernels
    }

    /// The kernel registered for `interval`, if any.
    pub fn kernel_for(&self, interval: IntervalId) -> Option<&Kernel> {
        self.kernels.iter().find(|k| k.interval() == interval)
    }

    /// Register a kernel.
    ///
    /// # Errors
    /// - [`AlignError::IntervalNotFound`] if the model does not own the
    ///   kernel's interval.
    /// - [`AlignError::DuplicateKernel`] if a kernel for that interval is
    ///   already registered.
    pub fn add_interval_pair_kernel(&mut self, kernel: Kernel) -> AlignResult<&mut Self> {
        let interval = kernel.interval();
        self.model.position_of(interval)?;
        if self.kernel_for(interval).is_some() {
            warn!(%interval, "rejected second kernel for interval");
            return Err(AlignError::DuplicateKernel { interval });
        }
        debug!(%interval, "kernel added");
        self.kernels.push(kernel);
        Ok(self)
    }

    pub fn add_loss(&mut self, loss: Arc<dyn Loss>) -> &mut Self {
        debug!(loss = loss.name(), "loss added");
        self.losses.push(loss);
        self
    }

    /// Remove a previously added loss (matched by identity).
    ///
    /// # Errors
    /// [`AlignError::LossNotFound`] if `loss` is not registered.
    pub fn remove_loss(&mut self, loss: &Arc<dyn Loss>) -> AlignResult<&mut Self> {
        let idx = position_by_identity(&self.losses, loss)
            .ok_or_else(|| AlignError::LossNotFound { name: loss.name().to_string() })?;
        self.losses.remove(idx);
        debug!(loss = loss.name(), "loss removed");
        Ok(self)
    }

    pub fn add_regularizer(&mut self, regularizer: Arc<dyn Loss>) -> &mut Self {
        debug!(regularizer = regularizer.name(), "regularizer added");
        self.regularizers.push(regularizer);
        self
    }

    /// Remove a previously added regularizer (matched by identity).
    ///
    /// # Errors
    /// [`AlignError::RegularizerNotFound`] if `regularizer` is not registered.
    pub fn remove_regularizer(&mut self, regularizer: &Arc<dyn Loss>) -> AlignResult<&mut Self> {
        let idx = position_by_identity(&self.regularizers, regularizer).ok_or_else(|| {
            AlignError::RegularizerNotFound { name: regularizer.name().to_string() }
        })?;
        self.regularizers.remove(idx);
        debug!(regularizer = regularizer.name(), "regularizer removed");
        Ok(self)
    }

    /// Snapshot of the registered losses.
    pub fn losses(&self) -> Vec<Arc<dyn Loss>> {
        self.losses.clone()
    }

    /// Snapshot of the registered regularizers.
    pub fn regularizers(&self) -> Vec<Arc<dyn Loss>> {
        self.regularizers.clone()
    }

    /// Objective value: `Σ losses + Σ regularizers`.
    ///
    /// # Errors
    /// The first error raised by any term.
    pub fn evaluate(&self) -> AlignResult<f64> {
        let mut loss_total = 0.0;
        for loss in &self.losses {
            loss_total += loss.evaluate(&self.model)?;
        }
        let mut reg_total = 0.0;
        for reg in &self.regularizers {
            reg_total += reg.evaluate(&self.model)?;
        }
        trace!(loss_total, reg_total, "problem evaluated");
        Ok(loss_total + reg_total)
    }

    /// Every trainable parameter reachable from this problem.
    pub fn trainable_params(&self) -> Vec<&Parameter> {
        let mut params = self.model.trainable_params();
        let owned = self
            .kernels
            .iter()
            .flat_map(Kernel::params)
            .chain(self.losses.iter().flat_map(|l| l.params()))
            .chain(self.regularizers.iter().flat_map(|r| r.params()));
        params.extend(owned.filter(|p| p.is_trainable()));
        params
    }

    pub fn trainable_params_as_dict(&self) -> IndexMap<String, Option<f64>> {
        values_as_dict(&self.trainable_params())
    }
}

fn position_by_identity(items: &[Arc<dyn Loss>], target: &Arc<dyn Loss>) -> Option<usize> {
    items.iter().position(|item| Arc::ptr_eq(item, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{
        core::options::SamplingOptions,
        errors::ErrorKind,
        kernels::{interval_kernel::tests::two_interval_model, linear::LinearWarpingKernel},
        problem::rss::ResidualSumOfSquares,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - One kernel per interval.
    // - Loss/regularizer registration, identity-based removal and snapshots.
    // - The objective sum and the trainable parameter listing.
    // -------------------------------------------------------------------------

    #[derive(Debug)]
    struct ConstantPenalty {
        value: f64,
        weight: Parameter,
    }

    impl Loss for ConstantPenalty {
        fn name(&self) -> &str {
            "constant"
        }

        fn weight(&self) -> Option<&Parameter> {
            Some(&self.weight)
        }

        fn evaluate(&self, _model: &AlignmentModel) -> AlignResult<f64> {
            Ok(self.value * self.weight.value().unwrap_or(1.0))
        }
    }

    fn penalty(value: f64) -> Arc<dyn Loss> {
        Arc::new(ConstantPenalty { value, weight: Parameter::new("reg_w").with_value(1.0) })
    }

    #[test]
    // Purpose
    // -------
    // At most one kernel per interval.
    //
    // Expect
    // ------
    // - A second kernel on the same interval fails with `DuplicateKernel`.
    // - A kernel on the other interval is accepted.
    fn rejects_second_kernel_for_interval() {
        // Arrange
        let (m, ida, idb) = two_interval_model();
        let ka: Kernel = LinearWarpingKernel::new(&m, ida, None).unwrap().into();
        let kb: Kernel = LinearWarpingKernel::new(&m, idb, None).unwrap().into();
        let mut problem = AlignmentProblem::new(m);

        // Act
        problem.add_interval_pair_kernel(ka.clone()).unwrap();
        let err = problem.add_interval_pair_kernel(ka).unwrap_err();
        problem.add_interval_pair_kernel(kb).unwrap();

        // Assert
        assert_eq!(err, AlignError::DuplicateKernel { interval: ida });
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(problem.kernels().len(), 2);
        assert!(problem.kernel_for(idb).is_some());
    }

    #[test]
    // Purpose
    // -------
    // Losses are removed by identity and the getters return snapshots.
    fn losses_are_removed_by_identity() {
        let (m, _, _) = two_interval_model();
        let mut problem = AlignmentProblem::new(m);
        let first = penalty(1.0);
        let twin = penalty(1.0);
        problem.add_loss(first.clone()).add_loss(twin.clone());

        let snapshot = problem.losses();
        problem.remove_loss(&first).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(problem.losses().len(), 1);
        assert!(Arc::ptr_eq(&problem.losses()[0], &twin));
        let err = problem.remove_loss(&first).unwrap_err();
        assert_eq!(err, AlignError::LossNotFound { name: "constant".into() });
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(
            problem.remove_regularizer(&twin),
            Err(AlignError::RegularizerNotFound { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The objective is the sum of all losses and regularizers.
    //
    // Given
    // -----
    // - An RSS loss of 5 (second interval, three samples) and regularizers 0.5
    //   and 0.25.
    //
    // Expect
    // ------
    // - evaluate() = 5.75; trainable params end with both regularizer weights.
    fn evaluate_sums_losses_and_regularizers() {
        // Arrange
        let (m, _, idb) = two_interval_model();
        let k: Kernel = LinearWarpingKernel::new(&m, idb, None).unwrap().into();
        let mut problem = AlignmentProblem::new(m);
        problem.add_interval_pair_kernel(k.clone()).unwrap();
        problem.add_loss(Arc::new(ResidualSumOfSquares::new(k, SamplingOptions::new(3).unwrap())));
        problem.add_regularizer(penalty(0.5)).add_regularizer(penalty(0.25));

        // Act
        let value = problem.evaluate().unwrap();

        // Assert
        assert_relative_eq!(value, 5.75, epsilon = 1e-12);
        let keys: Vec<String> = problem.trainable_params_as_dict().into_keys().collect();
        assert_eq!(keys, vec!["begin_1", "end_2", "rel_len_3", "rel_len_4", "reg_w_5", "reg_w_6"]);
    }

    #[test]
    // Purpose
    // -------
    // The objective follows model mutations.
    fn evaluate_reflects_model_mutation() {
        let (m, ida, idb) = two_interval_model();
        let k: Kernel = LinearWarpingKernel::new(&m, ida, None).unwrap().into();
        let mut problem = AlignmentProblem::new(m);
        problem.add_loss(Arc::new(ResidualSumOfSquares::new(k, SamplingOptions::new(3).unwrap())));
        let before = problem.evaluate().unwrap();

        problem.model_mut().set_interval_rel_length(idb, 1.0).unwrap();

        assert_relative_eq!(before, 0.0, epsilon = 1e-12);
        assert!(problem.evaluate().unwrap() > 0.0);
        let model = problem.into_model();
        assert_eq!(model.relative_lengths(), Ok(vec![1.0, 1.0]));
    }
}
