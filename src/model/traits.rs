// src/model/traits.rs
//! Reporting interface between a probe and the host simulation loop

use crate::error::MetabolicResult;

/// A quantity sampled by the host at simulation time instants
pub trait Probe: Send + Sync {
    /// Number of values returned by [`Probe::evaluate`]
    fn output_count(&self) -> usize;

    /// One label per output value
    fn output_labels(&self) -> Vec<String>;

    /// Values at `time`; the host must have advanced its model to `time` first
    fn evaluate(&self, time: f64) -> MetabolicResult<Vec<f64>>;
}
