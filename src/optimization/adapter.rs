//! Adapter that exposes an [`AlignmentProblem`] as an `argmin` problem.
//!
//! The cost at θ is the problem objective after writing θ into the model's
//! trainable parameters. There is no analytic gradient; the gradient is a
//! finite difference of the cost closure, central first with a forward
//! fallback, and the model is put back to θ afterwards.
//!
//! The problem sits behind a `RefCell` because `argmin` evaluates through
//! `&self` while every evaluation writes parameter values.
use std::cell::RefCell;

use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

use crate::{
    alignment::problem::alignment_problem::AlignmentProblem,
    optimization::{
        errors::{OptError, OptResult},
        types::{Cost, Grad, Theta},
        validation::{validate_cost, validate_grad, validate_theta},
    },
};

/// Bridges an [`AlignmentProblem`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone, Copy)]
pub struct ArgMinAdapter<'a> {
    pub problem: &'a RefCell<AlignmentProblem>,
}

impl<'a> ArgMinAdapter<'a> {
    pub fn new(problem: &'a RefCell<AlignmentProblem>) -> Self {
        Self { problem }
    }

    /// The model's current θ, a natural starting point.
    pub fn initial_theta(&self) -> OptResult<Theta> {
        Ok(self.problem.borrow().model().theta()?)
    }

    /// Box constraints in θ order (`∓∞` where unbounded).
    pub fn bounds(&self) -> (Theta, Theta) {
        let problem = self.problem.borrow();
        (problem.model().lower_bounds(), problem.model().upper_bounds())
    }

    /// Write θ and evaluate the objective.
    ///
    /// # Errors
    /// - [`OptError::ThetaLengthMismatch`] / [`OptError::InvalidThetaInput`]
    ///   for malformed θ.
    /// - [`OptError::Alignment`] for any failure inside the problem.
    /// - [`OptError::NonFiniteCost`] if the objective is NaN or infinite.
    pub fn evaluate_at(&self, theta: &Theta) -> OptResult<Cost> {
        let mut problem = self.problem.borrow_mut();
        validate_theta(theta, problem.model().trainable_count())?;
        problem.model_mut().set_theta(theta.view())?;
        validate_cost(problem.evaluate()?)
    }
}

impl CostFunction for ArgMinAdapter<'_> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.evaluate_at(theta)?)
    }
}

impl Gradient for ArgMinAdapter<'_> {
    type Param = Theta;
    type Gradient = Grad;

    /// Finite-difference gradient of the cost at θ.
    ///
    /// - Try *central* differences first.
    /// - If any evaluation of the cost closure failed (captured via
    ///   `closure_err`) or the result is not finite, retry with *forward*
    ///   differences.
    /// - Restore the model to θ before returning.
    ///
    /// The FD closure must return `f64`, so errors cannot use `?` inside it;
    /// the first one is captured in `closure_err` and the closure returns
    /// `NaN`.
    ///
    /// # Errors
    /// - Any error raised by cost evaluations during the forward pass.
    /// - Validation errors if the gradient is still malformed.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
        let cost_func = |theta: &Theta| -> f64 {
            match self.evaluate_at(theta) {
                Ok(val) => val,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };

        let fd_grad = theta.central_diff(&cost_func);
        let result = if closure_err.borrow().is_some() || validate_grad(&fd_grad, dim).is_err() {
            run_forward_diff(theta, &cost_func, &closure_err)
        } else {
            Ok(fd_grad)
        };

        let restored = self.problem.borrow_mut().model_mut().set_theta(theta.view());
        let grad = result?;
        restored.map_err(OptError::from)?;
        Ok(grad)
    }
}

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, returns the first captured
/// error if any, then validates the result.
fn run_forward_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<OptError>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{
        core::options::SamplingOptions,
        errors::{AlignError, AlignResult},
        kernels::{interval_kernel::tests::two_interval_model, linear::LinearWarpingKernel},
        models::alignment::AlignmentModel,
        problem::{loss::Loss, rss::ResidualSumOfSquares},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::sync::Arc;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost evaluation through θ and its validation.
    // - Finite-difference gradients and restoration of the model.
    // - Error propagation out of the FD closure.
    // -------------------------------------------------------------------------

    /// `(β_U − 2)²`: gradient 2(end − 2) along the query end, zero elsewhere.
    #[derive(Debug)]
    struct EndTarget;

    impl Loss for EndTarget {
        fn name(&self) -> &str {
            "end_target"
        }

        fn evaluate(&self, model: &AlignmentModel) -> AlignResult<f64> {
            Ok((model.beta_u()? - 2.0).powi(2))
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Loss for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn evaluate(&self, _model: &AlignmentModel) -> AlignResult<f64> {
            Err(AlignError::EmptyPartition)
        }
    }

    #[derive(Debug)]
    struct NotANumber;

    impl Loss for NotANumber {
        fn name(&self) -> &str {
            "nan"
        }

        fn evaluate(&self, _model: &AlignmentModel) -> AlignResult<f64> {
            Ok(f64::NAN)
        }
    }

    fn problem_with(loss: Arc<dyn Loss>) -> RefCell<AlignmentProblem> {
        let (m, _, _) = two_interval_model();
        let mut problem = AlignmentProblem::new(m);
        problem.add_loss(loss);
        RefCell::new(problem)
    }

    #[test]
    // Purpose
    // -------
    // The cost writes θ into the model before evaluating.
    //
    // Given
    // -----
    // - RSS on the second interval (three samples): 5 at the initial θ.
    //
    // Expect
    // ------
    // - cost(θ₀) = 5; cost at a moved θ differs and leaves θ in the model.
    fn cost_writes_theta_then_evaluates() {
        // Arrange
        let (m, _, idb) = two_interval_model();
        let k = LinearWarpingKernel::new(&m, idb, None).unwrap();
        let mut problem = AlignmentProblem::new(m);
        let options = SamplingOptions::new(3).unwrap();
        problem.add_loss(Arc::new(ResidualSumOfSquares::new(k.into(), options)));
        let cell = RefCell::new(problem);
        let adapter = ArgMinAdapter::new(&cell);
        let theta0 = adapter.initial_theta().unwrap();
        let moved = array![0.0, 4.0, 1.0, 1.0];

        // Act
        let at_start = adapter.cost(&theta0).unwrap();
        let at_moved = adapter.cost(&moved).unwrap();

        // Assert
        assert_eq!(theta0, array![0.0, 4.0, 1.0, 3.0]);
        assert_abs_diff_eq!(at_start, 5.0, epsilon = 1e-12);
        assert!((at_moved - at_start).abs() > 1e-6);
        assert_eq!(cell.borrow().model().theta().unwrap(), moved);
    }

    #[test]
    // Purpose
    // -------
    // Malformed θ and non-finite objectives are rejected with typed errors.
    fn cost_rejects_bad_theta_and_non_finite_value() {
        let cell = problem_with(Arc::new(NotANumber));
        let adapter = ArgMinAdapter::new(&cell);

        let short = OptError::from(adapter.cost(&array![1.0]).unwrap_err());
        let nan = OptError::from(adapter.cost(&array![0.0, 4.0, 1.0, 3.0]).unwrap_err());

        assert_eq!(short, OptError::ThetaLengthMismatch { expected: 4, actual: 1 });
        assert!(matches!(nan, OptError::NonFiniteCost { .. }));
    }

    #[test]
    // Purpose
    // -------
    // The FD gradient matches the analytic gradient and the model is
    // restored to θ afterwards.
    //
    // Given
    // -----
    // - Loss (end − 2)² at end = 4.
    //
    // Expect
    // ------
    // - ∇ ≈ [0, 4, 0, 0]; model θ unchanged.
    fn gradient_matches_analytic_and_restores_theta() {
        // Arrange
        let cell = problem_with(Arc::new(EndTarget));
        let adapter = ArgMinAdapter::new(&cell);
        let theta = adapter.initial_theta().unwrap();

        // Act
        let grad = adapter.gradient(&theta).unwrap();

        // Assert
        assert_eq!(grad.len(), 4);
        assert_abs_diff_eq!(grad[0], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[1], 4.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[2], 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[3], 0.0, epsilon = 1e-5);
        assert_eq!(cell.borrow().model().theta().unwrap(), theta);
    }

    #[test]
    // Purpose
    // -------
    // An error inside the cost closure surfaces from the gradient.
    fn gradient_propagates_closure_errors() {
        let cell = problem_with(Arc::new(Failing));
        let adapter = ArgMinAdapter::new(&cell);
        let theta = adapter.initial_theta().unwrap();

        let err = OptError::from(adapter.gradient(&theta).unwrap_err());

        assert_eq!(err, OptError::Alignment(AlignError::EmptyPartition));
    }

    #[test]
    // Purpose
    // -------
    // Bounds come out in θ order with infinities for unbounded weights.
    fn bounds_follow_theta_order() {
        let cell = problem_with(Arc::new(EndTarget));
        let adapter = ArgMinAdapter::new(&cell);

        let (lower, upper) = adapter.bounds();

        assert_eq!(lower, array![0.0, 0.0, f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert_eq!(upper, array![10.0, 10.0, f64::INFINITY, f64::INFINITY]);
    }
}
