//! Linear warping kernel.
//!
//! Maps the reference sub-interval `[t_b, t_e]` linearly onto the interval's
//! query sub-interval `[s_b, s_b + length]` and samples the query signal
//! there:
//!
//! `k(x) = f_qry(s_b + length · (x − t_b) / Δt)`, for `t_b <= x <= t_e`.
//!
//! The kernel's query support is its reference support: it is evaluated on
//! reference coordinates and returns values comparable with `f_ref`.
use crate::alignment::{
    core::{interval::IntervalId, parameter::Parameter},
    errors::{AlignError, AlignResult},
    kernels::interval_kernel::IntervalPairKernel,
    models::alignment::AlignmentModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearWarpingKernel {
    pair: IntervalPairKernel,
}

impl LinearWarpingKernel {
    /// Bind to `interval`, paired with `ref_idx` (default: its own position).
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] if `model` does not own `interval`.
    pub fn new(
        model: &AlignmentModel, interval: IntervalId, ref_idx: Option<usize>,
    ) -> AlignResult<Self> {
        Ok(LinearWarpingKernel { pair: IntervalPairKernel::new(model, interval, ref_idx)? })
    }

    pub fn pair(&self) -> &IntervalPairKernel {
        &self.pair
    }

    pub fn interval(&self) -> IntervalId {
        self.pair.interval()
    }

    /// A linear warp has no parameters of its own.
    pub fn params(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    pub fn ref_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.pair.ref_support(model)
    }

    /// Same as [`LinearWarpingKernel::ref_support`].
    pub fn qry_support(&self, model: &AlignmentModel) -> AlignResult<(f64, f64)> {
        self.pair.ref_support(model)
    }

    /// Evaluate at reference coordinate `x`.
    ///
    /// # Errors
    /// - [`AlignError::CoordinateOutOfRange`] if `x` lies outside `[t_b, t_e]`.
    /// - Any error deriving s_b or the interval length.
    pub fn evaluate(&self, model: &AlignmentModel, x: f64) -> AlignResult<f64> {
        let (t_b, t_e) = self.pair.ref_support(model)?;
        if !(t_b <= x && x <= t_e) {
            return Err(AlignError::CoordinateOutOfRange { x, lower: t_b, upper: t_e });
        }
        let s_b = self.pair.source_begin(model)?;
        let length = model.interval_length(self.interval())?;
        Ok(model.signals().query(s_b + length * (x - t_b) / (t_e - t_b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{
        core::{
            interval::Interval, options::AlignmentOptions, parameter::Parameter,
            signals::Signals,
        },
        kernels::interval_kernel::tests::two_interval_model,
    };
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Endpoints of the reference support map onto the endpoints of the query
    // sub-interval, and the interior is linear.
    //
    // Given
    // -----
    // - Second interval: t ∈ [0.5, 1], s_b = 1, length 3, identity f_qry.
    //
    // Expect
    // ------
    // - k(0.5) = 1, k(0.75) = 2.5, k(1) = 4.
    fn maps_reference_support_onto_query_interval() {
        // Arrange
        let (m, _, idb) = two_interval_model();
        let k = LinearWarpingKernel::new(&m, idb, None).unwrap();

        // Act / Assert
        assert_relative_eq!(k.evaluate(&m, 0.5).unwrap(), 1.0);
        assert_relative_eq!(k.evaluate(&m, 0.75).unwrap(), 2.5);
        assert_relative_eq!(k.evaluate(&m, 1.0).unwrap(), 4.0);
        assert_eq!(k.qry_support(&m), k.ref_support(&m));
        assert!(k.params().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Coordinates outside the reference support are rejected.
    fn rejects_coordinates_outside_support() {
        let (m, ida, _) = two_interval_model();
        let k = LinearWarpingKernel::new(&m, ida, None).unwrap();

        let err = k.evaluate(&m, 0.6).unwrap_err();

        assert_eq!(err, AlignError::CoordinateOutOfRange { x: 0.6, lower: 0.0, upper: 0.5 });
        assert!(k.evaluate(&m, -0.01).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The kernel follows parameter changes without being rebuilt.
    //
    // Given
    // -----
    // - Weights of the first interval changed from 1 to 3 (lengths 2 and 2).
    //
    // Expect
    // ------
    // - The second interval now starts at 2: k(0.5) = 2.
    fn follows_model_mutation() {
        let (mut m, ida, idb) = two_interval_model();
        let k = LinearWarpingKernel::new(&m, idb, None).unwrap();

        m.set_interval_rel_length(ida, 3.0).unwrap();

        assert_relative_eq!(k.evaluate(&m, 0.5).unwrap(), 2.0);
        assert_relative_eq!(k.evaluate(&m, 1.0).unwrap(), 4.0);
    }

    #[test]
    // Purpose
    // -------
    // With the query window starting away from zero, the query begin is
    // counted once: the last interval ends exactly at β_U.
    //
    // Given
    // -----
    // - qry_begin 1, qry_end 4; two relative intervals of equal weight over
    //   θ_b = [0, 0.5, 1], so ρ = 3 and both lengths are 1.5.
    // - f_qry(y) = y².
    //
    // Expect
    // ------
    // - s_b of the first interval is β_L = 1.
    // - Query support of the second interval is (2.5, 4).
    // - k(t_e) = f_qry(β_U) = 16.
    fn offset_query_window_ends_at_beta_u() {
        // Arrange
        let mut m = AlignmentModel::new(
            Signals::new(|x| x, |y| y * y),
            Parameter::new("ref_begin").with_value(0.0).with_bounds(0.0, 1.0).unwrap(),
            Parameter::new("qry_begin").with_value(1.0).with_bounds(0.0, 10.0).unwrap(),
            Parameter::new("qry_end").with_value(4.0).with_bounds(0.0, 10.0).unwrap(),
            AlignmentOptions::default(),
        )
        .unwrap();
        let a = Interval::relative(0.5, Some(1.0)).unwrap();
        let b = Interval::relative(0.5, Some(1.0)).unwrap();
        let (ida, idb) = (a.id(), b.id());
        m.add_interval(a, None).unwrap().add_interval(b, None).unwrap();

        // Act
        let ka = LinearWarpingKernel::new(&m, ida, None).unwrap();
        let kb = LinearWarpingKernel::new(&m, idb, None).unwrap();
        let (t_b, t_e) = kb.ref_support(&m).unwrap();

        // Assert
        assert_relative_eq!(ka.pair().source_begin(&m).unwrap(), 1.0);
        let (s_lo, s_hi) = kb.pair().qry_support(&m).unwrap();
        assert_relative_eq!(s_lo, 2.5);
        assert_relative_eq!(s_hi, 4.0);
        assert_relative_eq!(s_hi, m.beta_u().unwrap());
        assert_relative_eq!(kb.evaluate(&m, t_b).unwrap(), 6.25);
        assert_relative_eq!(kb.evaluate(&m, t_e).unwrap(), m.signals().query(4.0));
    }
}
