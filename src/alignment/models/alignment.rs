//! AlignmentModel — owner of the interval partition and the begin/end parameters.
//!
//! Purpose
//! -------
//! Hold everything that defines an alignment between a reference and a query
//! signal: the signals themselves, the reference begin (whose bounds define the
//! reference span), the query begin/end window, the ordered interval sequence,
//! and the optional separation margin `gamma_d`.
//!
//! Key behaviors
//! -------------
//! - Construction validates the reference begin (concrete, within its bounds)
//!   and the query window (`qry_begin.lower_bound < qry_end.upper_bound`).
//! - [`AlignmentModel::add_interval`] is the only way to grow the partition.
//!   It rejects a second flexible interval, any interval that would overrun
//!   the reference span, and any fixed query claim that would overrun the
//!   query support. It returns `&mut Self` for chaining.
//! - Intervals owned by the model are mutated only through the
//!   `set_interval_*` methods, which re-run the relevant capacity checks.
//! - Derived geometry (θ_b, κ, φ, β_L/β_U, ρ, μ_R, ϑ_R) lives in
//!   `models::geometry`; optimizer views live in `models::param_views`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Σ ref_length <= ref_begin.upper_bound − ref_begin.lower_bound` at all
//!   times.
//! - At most one flexible interval.
//! - The reference begin is concrete and its bounds are set; the query begin
//!   lower bound and query end upper bound are set and ordered.
//! - Nothing derived is cached. Every read recomputes from the current
//!   parameter values, so writes by the optimizer are visible immediately.
//!
//! Conventions
//! -----------
//! - The query begin/end parameters are renamed `begin`/`end` on construction.
//! - Intervals and kernels refer back to the model by [`IntervalId`] only; a
//!   kernel evaluated against a model that does not own its interval fails
//!   with a not-found error instead of dangling.
use tracing::{debug, warn};

use crate::alignment::{
    core::{
        interval::{Interval, IntervalId, IntervalKind, IntervalType},
        options::AlignmentOptions,
        parameter::Parameter,
        signals::Signals,
        validation::{validate_margin, validate_ref_length},
    },
    errors::{AlignError, AlignResult},
};

/// Ordered partition of the reference span with per-interval query policies.
#[derive(Debug)]
pub struct AlignmentModel {
    pub(crate) signals: Signals,
    pub(crate) ref_begin: Parameter,
    pub(crate) qry_begin: Parameter,
    pub(crate) qry_end: Parameter,
    pub(crate) intervals: Vec<Interval>,
    pub(crate) options: AlignmentOptions,
}

impl AlignmentModel {
    /// Build a model with an empty partition.
    ///
    /// # Errors
    /// - [`AlignError::InvalidReferenceBegin`] if `ref_begin` has no concrete
    ///   value or lies outside its bounds.
    /// - [`AlignError::IncompleteParameter`] if `ref_begin` lacks bounds.
    /// - [`AlignError::MisorderedQueryBounds`] unless
    ///   `qry_begin.lower_bound < qry_end.upper_bound`.
    pub fn new(
        signals: Signals, ref_begin: Parameter, mut qry_begin: Parameter, mut qry_end: Parameter,
        options: AlignmentOptions,
    ) -> AlignResult<Self> {
        validate_ref_begin(&ref_begin)?;
        if let Some(margin) = options.gamma_d {
            validate_margin(margin)?;
        }

        let begin_lower = qry_begin.lower_bound();
        let end_upper = qry_end.upper_bound();
        match (begin_lower, end_upper) {
            (Some(lower), Some(upper)) if lower < upper => {}
            _ => return Err(AlignError::MisorderedQueryBounds { begin_lower, end_upper }),
        }
        qry_begin.set_name("begin");
        qry_end.set_name("end");

        debug!(
            ref_begin = ?ref_begin.value(),
            ref_supp = ?ref_begin.bounds(),
            qry_supp = ?(begin_lower, end_upper),
            gamma_d = ?options.gamma_d,
            "alignment model created"
        );
        Ok(AlignmentModel {
            signals,
            ref_begin,
            qry_begin,
            qry_end,
            intervals: Vec::new(),
            options,
        })
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    pub fn options(&self) -> &AlignmentOptions {
        &self.options
    }

    pub fn gamma_d(&self) -> Option<f64> {
        self.options.gamma_d
    }

    /// Set or clear the separation margin.
    ///
    /// # Errors
    /// [`AlignError::InvalidMargin`] if the margin is non-finite or negative.
    pub fn set_gamma_d(&mut self, gamma_d: Option<f64>) -> AlignResult<()> {
        self.options = AlignmentOptions::new(gamma_d)?;
        Ok(())
    }

    pub fn ref_begin(&self) -> &Parameter {
        &self.ref_begin
    }

    /// Replace the reference begin.
    ///
    /// # Errors
    /// - As for [`AlignmentModel::new`] on an invalid begin.
    /// - [`AlignError::ReferenceCapacityExceeded`] if the new span cannot hold
    ///   the intervals already present.
    pub fn set_ref_begin(&mut self, ref_begin: Parameter) -> AlignResult<()> {
        validate_ref_begin(&ref_begin)?;
        let (lower, upper) = ref_begin.bounds();
        self.check_span_holds_intervals(upper.unwrap_or(f64::NAN) - lower.unwrap_or(f64::NAN))?;
        debug!(
            ref_begin = ?ref_begin.value(),
            ref_supp = ?ref_begin.bounds(),
            "reference begin replaced"
        );
        self.ref_begin = ref_begin;
        Ok(())
    }

    /// The reference span `(ref_begin.lower_bound, ref_begin.upper_bound)`.
    pub fn ref_supp(&self) -> (f64, f64) {
        // Both bounds are present: validated whenever `ref_begin` is assigned.
        let (lower, upper) = self.ref_begin.bounds();
        (lower.unwrap_or(f64::NAN), upper.unwrap_or(f64::NAN))
    }

    /// Total reference length available to intervals.
    pub fn ref_span(&self) -> f64 {
        let (lower, upper) = self.ref_supp();
        upper - lower
    }

    /// Move the reference span.
    ///
    /// # Errors
    /// - [`AlignError::InvalidReferenceSupport`] if either bound is NaN or
    ///   `lower >= upper`.
    /// - [`AlignError::ReferenceCapacityExceeded`] if the new span is shorter
    ///   than the reference length already claimed.
    pub fn set_ref_supp(&mut self, lower: f64, upper: f64) -> AlignResult<()> {
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(AlignError::InvalidReferenceSupport { lower, upper });
        }
        self.check_span_holds_intervals(upper - lower)?;
        self.ref_begin.set_bounds(lower, upper)?;
        debug!(lower, upper, "reference support moved");
        Ok(())
    }

    pub fn qry_begin(&self) -> &Parameter {
        &self.qry_begin
    }

    pub fn qry_end(&self) -> &Parameter {
        &self.qry_end
    }

    /// Overwrite the query begin value; ordering is checked on derived reads.
    pub fn set_qry_begin_value(&mut self, value: f64) {
        self.qry_begin.set_value(value);
    }

    /// Overwrite the query end value; ordering is checked on derived reads.
    pub fn set_qry_end_value(&mut self, value: f64) {
        self.qry_end.set_value(value);
    }

    /// The query support `(qry_begin.lower_bound, qry_end.upper_bound)`.
    pub fn qry_supp(&self) -> (f64, f64) {
        // Both bounds are present: checked on construction, never replaced.
        (
            self.qry_begin.lower_bound().unwrap_or(f64::NAN),
            self.qry_end.upper_bound().unwrap_or(f64::NAN),
        )
    }

    pub fn is_open_begin(&self) -> bool {
        self.qry_begin.is_trainable()
    }

    pub fn is_open_end(&self) -> bool {
        self.qry_end.is_trainable()
    }

    /// All intervals in sequence order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Intervals of one type, in sequence order.
    pub fn intervals_of(&self, interval_type: IntervalType) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(move |i| i.interval_type() == interval_type)
    }

    /// Number of intervals, P.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    pub fn has_flexible_interval(&self) -> bool {
        self.intervals_of(IntervalType::Flexible).count() == 1
    }

    /// Sequence position of an interval.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] if the model does not own `id`.
    pub fn position_of(&self, id: IntervalId) -> AlignResult<usize> {
        self.intervals
            .iter()
            .position(|i| i.id() == id)
            .ok_or(AlignError::IntervalNotFound { id })
    }

    /// Look up an owned interval.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] if the model does not own `id`.
    pub fn interval(&self, id: IntervalId) -> AlignResult<&Interval> {
        let idx = self.position_of(id)?;
        Ok(&self.intervals[idx])
    }

    /// Effective query length of an owned interval.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`], or any error deriving the length.
    pub fn interval_length(&self, id: IntervalId) -> AlignResult<f64> {
        self.interval(id)?.length(self)
    }

    /// Insert an interval at `idx` (append when `None` or past the end).
    ///
    /// # Errors
    /// - [`AlignError::DuplicateFlexibleInterval`] if a flexible interval is
    ///   already present and `interval` is flexible.
    /// - [`AlignError::ReferenceCapacityExceeded`] if the reference lengths
    ///   would exceed the reference span; the error carries the overage.
    /// - [`AlignError::QueryCapacityExceeded`] if the fixed query claims would
    ///   exceed the query support.
    ///
    /// On error the sequence is unchanged.
    pub fn add_interval(
        &mut self, interval: Interval, idx: Option<usize>,
    ) -> AlignResult<&mut Self> {
        if interval.interval_type() == IntervalType::Flexible && self.has_flexible_interval() {
            warn!(interval = %interval.id(), "rejected second flexible interval");
            return Err(AlignError::DuplicateFlexibleInterval);
        }

        let available = self.ref_span();
        let used = self.used_ref_length();
        let requested = interval.ref_length();
        if used + requested > available {
            let overage = used + requested - available;
            warn!(available, used, requested, overage, "reference capacity exceeded");
            return Err(AlignError::ReferenceCapacityExceeded {
                available,
                used,
                requested,
                overage,
            });
        }

        self.check_query_claim(None, query_claim(&interval))?;

        let position = idx.unwrap_or(self.intervals.len()).min(self.intervals.len());
        debug!(
            interval = %interval.id(),
            interval_type = %interval.interval_type(),
            ref_length = requested,
            position,
            "interval added"
        );
        self.intervals.insert(position, interval);
        Ok(self)
    }

    /// Change the reference length of an owned interval.
    ///
    /// # Errors
    /// - [`AlignError::IntervalNotFound`].
    /// - [`AlignError::InvalidRefLength`] for a NaN or non-positive value.
    /// - [`AlignError::ReferenceCapacityExceeded`] if the new total would
    ///   exceed the reference span.
    pub fn set_interval_ref_length(&mut self, id: IntervalId, value: f64) -> AlignResult<()> {
        let idx = self.position_of(id)?;
        validate_ref_length(value)?;
        let available = self.ref_span();
        let used = self.used_ref_length() - self.intervals[idx].ref_length();
        if used + value > available {
            let overage = used + value - available;
            warn!(
                interval = %id,
                available,
                used,
                requested = value,
                overage,
                "reference capacity exceeded"
            );
            return Err(AlignError::ReferenceCapacityExceeded {
                available,
                used,
                requested: value,
                overage,
            });
        }
        self.intervals[idx].set_ref_length(value)
    }

    /// Assign an explicit length to an owned constant or min-max interval.
    ///
    /// # Errors
    /// - [`AlignError::IntervalNotFound`].
    /// - Any error of [`Interval::set_length`].
    /// - [`AlignError::QueryCapacityExceeded`] if the new fixed claim would
    ///   exceed the query support.
    pub fn set_interval_length(&mut self, id: IntervalId, value: f64) -> AlignResult<()> {
        let idx = self.position_of(id)?;
        let claim = match self.intervals[idx].kind() {
            IntervalKind::Constant { .. } => value,
            IntervalKind::MinMax { length } => length.lower_bound().unwrap_or(value),
            _ => 0.0,
        };
        if !value.is_nan() {
            self.check_query_claim(Some(idx), claim)?;
        }
        self.intervals[idx].set_length(value)
    }

    /// Replace the box bounds of an owned min-max interval.
    ///
    /// # Errors
    /// - [`AlignError::IntervalNotFound`].
    /// - Any error of [`Interval::set_min_max_lengths`].
    /// - [`AlignError::QueryCapacityExceeded`] if the new minimum would exceed
    ///   the query support.
    pub fn set_interval_min_max_lengths(
        &mut self, id: IntervalId, min: f64, max: f64,
    ) -> AlignResult<()> {
        let idx = self.position_of(id)?;
        if self.intervals[idx].interval_type() == IntervalType::MinMax && !min.is_nan() {
            self.check_query_claim(Some(idx), min)?;
        }
        self.intervals[idx].set_min_max_lengths(min, max)
    }

    /// Replace the weight of an owned relative interval.
    ///
    /// # Errors
    /// [`AlignError::IntervalNotFound`] or any error of
    /// [`Interval::set_rel_length`].
    pub fn set_interval_rel_length(&mut self, id: IntervalId, value: f64) -> AlignResult<()> {
        let idx = self.position_of(id)?;
        self.intervals[idx].set_rel_length(value)
    }

    fn used_ref_length(&self) -> f64 {
        self.intervals.iter().map(Interval::ref_length).sum()
    }

    fn check_span_holds_intervals(&self, available: f64) -> AlignResult<()> {
        let used = self.used_ref_length();
        if used > available {
            return Err(AlignError::ReferenceCapacityExceeded {
                available,
                used,
                requested: 0.0,
                overage: used - available,
            });
        }
        Ok(())
    }

    /// Check a fixed query claim against the query support, ignoring the
    /// interval at `replacing` (the one being updated) if any.
    fn check_query_claim(&self, replacing: Option<usize>, requested: f64) -> AlignResult<()> {
        if requested <= 0.0 {
            return Ok(());
        }
        let (lower, upper) = self.qry_supp();
        let available = upper - lower;
        let claimed: f64 = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .map(|(_, interval)| query_claim(interval))
            .sum();
        if claimed + requested > available {
            warn!(available, claimed, requested, "query capacity exceeded");
            return Err(AlignError::QueryCapacityExceeded { available, claimed, requested });
        }
        Ok(())
    }
}

/// Query length an interval claims up front: the constant length, or the
/// minimum (else current) length of a min-max interval.
fn query_claim(interval: &Interval) -> f64 {
    match interval.kind() {
        IntervalKind::Constant { length } => length.value().unwrap_or(0.0),
        IntervalKind::MinMax { length } => {
            length.lower_bound().or(length.value()).unwrap_or(0.0)
        }
        IntervalKind::Relative { .. } | IntervalKind::Flexible => 0.0,
    }
}

fn validate_ref_begin(ref_begin: &Parameter) -> AlignResult<()> {
    match ref_begin.value() {
        Some(v) if !v.is_nan() => {}
        _ => {
            return Err(AlignError::InvalidReferenceBegin {
                reason: "A concrete begin is required.",
            });
        }
    }
    if !ref_begin.is_within_bounds()? {
        return Err(AlignError::InvalidReferenceBegin { reason: "The begin is not within bounds." });
    }
    Ok(())
}
