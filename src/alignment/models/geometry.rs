//! Derived geometry of an [`AlignmentModel`].
//!
//! Every quantity here is recomputed from the current parameter values on each
//! call:
//!
//! - θ_b ([`AlignmentModel::reference_boundaries`]): cumulative interval
//!   boundaries in reference coordinates, starting at `ref_begin.value`.
//! - κ(x) ([`AlignmentModel::p_for_x`]): interval index for a reference
//!   coordinate.
//! - β_L / β_U ([`AlignmentModel::beta_l`], [`AlignmentModel::beta_u`]): the
//!   active query begin/end, either read straight from the begin/end values
//!   (no margin) or clamped to keep `gamma_d` apart.
//! - ρ ([`AlignmentModel::available_length`]): query length left after
//!   constant and min-max intervals take their share.
//! - μ_R / ϑ_R ([`AlignmentModel::mu_r`], [`AlignmentModel::vartheta_r`]):
//!   normalization of the relative weights.
//! - φ ([`AlignmentModel::interval_offset`]): query offset of an interval.
//!
//! Reads are O(P); relative lengths are O(P²) across the whole model.
use crate::alignment::{
    core::{
        interval::{IntervalId, IntervalType},
        validation::require,
    },
    errors::{AlignError, AlignResult},
    models::alignment::AlignmentModel,
};

impl AlignmentModel {
    /// θ_b: `[ref_begin, ref_begin + l_0, ref_begin + l_0 + l_1, ...]`, length P+1.
    pub fn reference_boundaries(&self) -> Vec<f64> {
        // Concrete: validated whenever `ref_begin` is assigned.
        let mut boundary = self.ref_begin.value().unwrap_or(f64::NAN);
        let mut theta_b = Vec::with_capacity(self.intervals.len() + 1);
        theta_b.push(boundary);
        for interval in &self.intervals {
            boundary += interval.ref_length();
            theta_b.push(boundary);
        }
        theta_b
    }

    /// κ(x): index `i` with `θ_b[i] <= x < θ_b[i+1]`; the last interval is
    /// closed on the right.
    ///
    /// # Errors
    /// - [`AlignError::EmptyPartition`] if the model has no intervals.
    /// - [`AlignError::CoordinateOutOfRange`] if `x` lies outside
    ///   `[θ_b[0], θ_b[P]]` or is NaN.
    pub fn p_for_x(&self, x: f64) -> AlignResult<usize> {
        if self.intervals.is_empty() {
            return Err(AlignError::EmptyPartition);
        }
        let theta_b = self.reference_boundaries();
        let (lower, upper) = (theta_b[0], theta_b[theta_b.len() - 1]);
        if !(lower <= x && x <= upper) {
            return Err(AlignError::CoordinateOutOfRange { x, lower, upper });
        }

        let last = self.intervals.len() - 1;
        Ok(theta_b.windows(2).take(last).position(|w| w[0] <= x && x < w[1]).unwrap_or(last))
    }

    /// β_L, the active query begin.
    ///
    /// - Without `gamma_d`: `qry_begin.value`.
    /// - With `gamma_d`:
    ///   `min(e.ub − γ, max(b.lb, min(b.value, e.value)))`.
    ///
    /// # Errors
    /// - [`AlignError::BeginAfterEnd`] without `gamma_d` when begin > end.
    /// - [`AlignError::UnsetValue`] if a begin/end value is absent.
    pub fn beta_l(&self) -> AlignResult<f64> {
        let (begin, end) = self.query_values()?;
        match self.options.gamma_d {
            None => Ok(begin),
            Some(gamma_d) => {
                let (begin_lower, end_upper) = self.qry_supp();
                Ok((end_upper - gamma_d).min(begin_lower.max(begin.min(end))))
            }
        }
    }

    /// β_U, the active query end.
    ///
    /// - Without `gamma_d`: `qry_end.value`.
    /// - With `gamma_d`:
    ///   `max(b.lb + γ, min(e.ub, max(b.value, e.value)))`.
    ///
    /// # Errors
    /// As for [`AlignmentModel::beta_l`].
    pub fn beta_u(&self) -> AlignResult<f64> {
        let (begin, end) = self.query_values()?;
        match self.options.gamma_d {
            None => Ok(end),
            Some(gamma_d) => {
                let (begin_lower, end_upper) = self.qry_supp();
                Ok((begin_lower + gamma_d).max(end_upper.min(begin.max(end))))
            }
        }
    }

    /// ρ: `β_U − β_L − Σ constant lengths − Σ min-max lengths`.
    ///
    /// # Errors
    /// Any error of β_L/β_U, or [`AlignError::UnsetValue`] for a constant or
    /// min-max interval without a length.
    pub fn available_length(&self) -> AlignResult<f64> {
        let mut claimed = 0.0;
        for interval in &self.intervals {
            if let IntervalType::Constant | IntervalType::MinMax = interval.interval_type() {
                claimed += interval.length(self)?;
            }
        }
        Ok(self.beta_u()? - self.beta_l()? - claimed)
    }

    /// Raw weights of the relative intervals, in sequence order.
    ///
    /// # Errors
    /// [`AlignError::UnsetValue`] if a weight is absent.
    pub fn relative_lengths(&self) -> AlignResult<Vec<f64>> {
        self.intervals_of(IntervalType::Relative)
            .filter_map(|interval| interval.length_param())
            .map(|weight| require(weight.value(), weight.name(), "value"))
            .collect()
    }

    /// μ_R: `1 / N_r` if the relative weights sum to exactly zero, else `0`.
    ///
    /// A model without relative intervals yields `0`.
    pub fn mu_r(&self) -> AlignResult<f64> {
        let weights = self.relative_lengths()?;
        if weights.is_empty() || weights.iter().sum::<f64>() != 0.0 {
            return Ok(0.0);
        }
        Ok(1.0 / weights.len() as f64)
    }

    /// ϑ_R: each relative weight shifted by μ_R, in sequence order.
    pub fn vartheta_r(&self) -> AlignResult<Vec<f64>> {
        let mu_r = self.mu_r()?;
        Ok(self.relative_lengths()?.into_iter().map(|w| w + mu_r).collect())
    }

    /// φ: `β_L` plus the lengths of every interval preceding `id`.
    ///
    /// An id the model does not own is not an error: the full sum over all
    /// intervals is returned. Use [`AlignmentModel::position_of`] first when
    /// ownership matters.
    pub fn interval_offset(&self, id: IntervalId) -> AlignResult<f64> {
        let mut offset = self.beta_l()?;
        for interval in &self.intervals {
            if interval.id() == id {
                break;
            }
            offset += interval.length(self)?;
        }
        Ok(offset)
    }

    fn query_values(&self) -> AlignResult<(f64, f64)> {
        let begin = require(self.qry_begin.value(), self.qry_begin.name(), "value")?;
        let end = require(self.qry_end.value(), self.qry_end.name(), "value")?;
        if self.options.gamma_d.is_none() && begin > end {
            return Err(AlignError::BeginAfterEnd { begin, end });
        }
        Ok((begin, end))
    }
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use crate::alignment::{
        core::interval::Interval,
        errors::{AlignError, ErrorKind},
        models::alignment::tests::sine_model,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - θ_b and κ(x) including the closed right end of the last interval.
    // - β_L/β_U in both modes (margin unset and set).
    // - ρ, μ_R, ϑ_R and relative/flexible lengths on mixed partitions.
    // - φ offsets tiling the active query span.
    //
    // They intentionally DO NOT cover:
    // - Capacity checks when building the partition (see `models::alignment`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A single relative interval with the default weight takes the whole
    // available length.
    //
    // Given
    // -----
    // - ref_begin 0 in [0, 1]; begin 0, end 3.14; one relative interval with
    //   ref_length 0.8 and weight 0.
    //
    // Expect
    // ------
    // - θ_b = [0, 0.8]; ρ = 3.14; μ_R = 1; ϑ_R = [1]; length = 3.14.
    fn single_relative_interval_spans_available_length() {
        // Arrange
        let mut m = sine_model(None);
        let interval = Interval::relative(0.8, None).unwrap();
        let id = interval.id();
        m.add_interval(interval, None).unwrap();

        // Act
        let theta_b = m.reference_boundaries();

        // Assert
        assert_eq!(theta_b, vec![0.0, 0.8]);
        assert_relative_eq!(m.available_length().unwrap(), 3.14);
        assert_relative_eq!(m.mu_r().unwrap(), 1.0);
        assert_eq!(m.vartheta_r().unwrap(), vec![1.0]);
        assert_relative_eq!(m.interval_length(id).unwrap(), 3.14);
        assert_relative_eq!(m.interval_offset(id).unwrap(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // κ(x) uses half-open intervals except the last one.
    //
    // Given
    // -----
    // - θ_b = [0, 0.25, 0.5, 1.0].
    //
    // Expect
    // ------
    // - Boundaries map to the interval they open; x = 1.0 maps to the last.
    // - Coordinates outside [0, 1] and NaN are out of range.
    fn p_for_x_boundary_convention() {
        let mut m = sine_model(None);
        for ref_length in [0.25, 0.25, 0.5] {
            m.add_interval(Interval::relative(ref_length, None).unwrap(), None).unwrap();
        }

        assert_eq!(m.reference_boundaries(), vec![0.0, 0.25, 0.5, 1.0]);
        assert_eq!(m.p_for_x(0.0), Ok(0));
        assert_eq!(m.p_for_x(0.1), Ok(0));
        assert_eq!(m.p_for_x(0.25), Ok(1));
        assert_eq!(m.p_for_x(0.5), Ok(2));
        assert_eq!(m.p_for_x(1.0), Ok(2));
        assert_eq!(
            m.p_for_x(1.01),
            Err(AlignError::CoordinateOutOfRange { x: 1.01, lower: 0.0, upper: 1.0 })
        );
        assert_eq!(m.p_for_x(-0.1).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert!(m.p_for_x(f64::NAN).is_err());
    }

    #[test]
    // Purpose
    // -------
    // κ(x) on an empty partition is an illegal state.
    fn p_for_x_on_empty_model_fails() {
        let m = sine_model(None);

        assert_eq!(m.p_for_x(0.0), Err(AlignError::EmptyPartition));
        assert_eq!(m.reference_boundaries(), vec![0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Without a margin, begin after end is an illegal state on every
    // derived read that needs β_L/β_U.
    fn begin_after_end_without_margin_fails() {
        let mut m = sine_model(None);
        m.set_qry_begin_value(4.0);

        let err = m.beta_l().unwrap_err();

        assert_eq!(err, AlignError::BeginAfterEnd { begin: 4.0, end: 3.14 });
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        assert!(m.beta_u().is_err());
        assert!(m.available_length().is_err());
    }

    #[test]
    // Purpose
    // -------
    // With a margin, β_L/β_U clamp instead of failing.
    //
    // Given
    // -----
    // - gamma_d = 0.5, query support (0, 5).
    // - Case A: begin 4.8, end 3.14 (swapped).
    // - Case B: begin 4.9, end 4.95 (too close to the upper bound).
    //
    // Expect
    // ------
    // - A: β_L = 3.14, β_U = 4.8.
    // - B: β_L = 4.5, β_U = 4.95.
    fn margin_clamps_begin_and_end() {
        // Arrange
        let mut m = sine_model(Some(0.5));

        // Act / Assert (case A)
        m.set_qry_begin_value(4.8);
        assert_relative_eq!(m.beta_l().unwrap(), 3.14);
        assert_relative_eq!(m.beta_u().unwrap(), 4.8);

        // Act / Assert (case B)
        m.set_qry_begin_value(4.9);
        m.set_qry_end_value(4.95);
        assert_relative_eq!(m.beta_l().unwrap(), 4.5);
        assert_relative_eq!(m.beta_u().unwrap(), 4.95);
    }

    #[test]
    // Purpose
    // -------
    // On a mixed partition, fixed intervals reduce ρ, relative intervals
    // share it by weight, and offsets tile [β_L, β_U].
    //
    // Given
    // -----
    // - begin 0.5, end 3.14 (β_U − β_L = 2.64).
    // - [constant 1.0, relative w=1, min-max 0.5, relative w=3].
    //
    // Expect
    // ------
    // - ρ = 1.14; μ_R = 0; relative lengths 0.285 and 0.855.
    // - Offsets 0.5, 1.5, 1.785, 2.285; last offset + length = β_U.
    fn mixed_partition_lengths_and_offsets() {
        // Arrange
        let mut m = sine_model(None);
        m.set_qry_begin_value(0.5);
        let intervals = [
            Interval::constant(0.25, Some(1.0)).unwrap(),
            Interval::relative(0.25, Some(1.0)).unwrap(),
            Interval::min_max(0.25, Some(0.5), Some((0.1, 1.0))).unwrap(),
            Interval::relative(0.25, Some(3.0)).unwrap(),
        ];
        let ids: Vec<_> = intervals.iter().map(Interval::id).collect();
        for interval in intervals {
            m.add_interval(interval, None).unwrap();
        }

        // Act
        let rho = m.available_length().unwrap();
        let offsets: Vec<f64> = ids.iter().map(|id| m.interval_offset(*id).unwrap()).collect();

        // Assert
        assert_relative_eq!(rho, 1.14, epsilon = 1e-12);
        assert_relative_eq!(m.mu_r().unwrap(), 0.0);
        assert_eq!(m.relative_lengths().unwrap(), vec![1.0, 3.0]);
        assert_relative_eq!(m.interval_length(ids[1]).unwrap(), 0.285, epsilon = 1e-12);
        assert_relative_eq!(m.interval_length(ids[3]).unwrap(), 0.855, epsilon = 1e-12);
        for (got, want) in offsets.iter().zip([0.5, 1.5, 1.785, 2.285]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        let end = offsets[3] + m.interval_length(ids[3]).unwrap();
        assert_relative_eq!(end, m.beta_u().unwrap(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // All-zero relative weights split ρ uniformly; a flexible interval takes
    // ρ as its length.
    fn zero_weights_split_uniformly_and_flexible_takes_rho() {
        let mut m = sine_model(None);
        let a = Interval::relative(0.2, None).unwrap();
        let b = Interval::relative(0.2, None).unwrap();
        let f = Interval::flexible(0.2).unwrap();
        let (ida, idb, idf) = (a.id(), b.id(), f.id());
        m.add_interval(a, None)
            .unwrap()
            .add_interval(b, None)
            .unwrap()
            .add_interval(f, None)
            .unwrap();

        assert_relative_eq!(m.mu_r().unwrap(), 0.5);
        assert_eq!(m.vartheta_r().unwrap(), vec![0.5, 0.5]);
        assert_relative_eq!(m.interval_length(ida).unwrap(), 1.57, epsilon = 1e-12);
        assert_relative_eq!(m.interval_length(idb).unwrap(), 1.57, epsilon = 1e-12);
        assert_relative_eq!(m.interval_length(idf).unwrap(), 3.14, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // φ of an interval the model does not own is the full sum.
    fn offset_of_foreign_interval_is_full_sum() {
        let mut m = sine_model(None);
        m.add_interval(Interval::constant(0.5, Some(1.0)).unwrap(), None).unwrap();
        m.add_interval(Interval::constant(0.5, Some(2.0)).unwrap(), None).unwrap();
        let foreign = Interval::flexible(0.1).unwrap();

        assert_relative_eq!(m.interval_offset(foreign.id()).unwrap(), 3.0);
        assert_relative_eq!(foreign.offset(&m).unwrap(), 3.0);
        assert_relative_eq!(m.mu_r().unwrap(), 0.0);
    }
}
