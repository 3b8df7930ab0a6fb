//! Reference and query signals supplied by the caller.
//!
//! The engine never interpolates or samples these itself beyond what kernels
//! and sampled losses require; they are treated as pure real-to-real maps that
//! may be called any number of times.
use std::{fmt, sync::Arc};

/// A pure real-to-real function.
pub type SignalFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// The pair of signals an alignment model relates.
#[derive(Clone)]
pub struct Signals {
    f_ref: SignalFn,
    f_qry: SignalFn,
}

impl Signals {
    pub fn new<R, Q>(f_ref: R, f_qry: Q) -> Self
    where
        R: Fn(f64) -> f64 + Send + Sync + 'static,
        Q: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Signals { f_ref: Arc::new(f_ref), f_qry: Arc::new(f_qry) }
    }

    /// Sample the reference signal.
    pub fn reference(&self, x: f64) -> f64 {
        (self.f_ref)(x)
    }

    /// Sample the query signal.
    pub fn query(&self, x: f64) -> f64 {
        (self.f_qry)(x)
    }
}

impl fmt::Debug for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signals").finish_non_exhaustive()
    }
}
