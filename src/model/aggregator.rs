// src/model/aggregator.rs
//! Reduction of per-muscle rates to the whole-body metabolic power

use crate::config::{FloorPolicy, ProbeConfig};
use tracing::warn;

/// Whole-body basal rate Bdot, zero when the basal term is disabled
pub fn basal_rate(config: &ProbeConfig, system_mass: f64) -> f64 {
    if config.basal_rate_on {
        config.basal_coefficient * system_mass.powf(config.basal_exponent)
    } else {
        0.0
    }
}

/// Sum per-muscle totals in slice order and add the basal rate once
///
/// The order of `muscle_totals` is the summation order, so callers must pass
/// them in parameter-set order for reproducible results.
pub fn aggregate(muscle_totals: &[f64], config: &ProbeConfig, system_mass: f64, probe: &str, time: f64) -> f64 {
    let basal = basal_rate(config, system_mass);
    if basal.is_nan() {
        warn!(probe, time, term = "Bdot", "Bdot = NaN");
    }

    let total = muscle_totals.iter().fold(0.0, |sum, edot| sum + edot) + basal;
    apply_floor_policy(total, config, probe, time)
}

/// Apply the configured floor; only active when all muscle terms are enabled
pub fn apply_floor_policy(total: f64, config: &ProbeConfig, probe: &str, time: f64) -> f64 {
    match config.floor_policy {
        FloorPolicy::MinimumTotal { rate } if config.all_muscle_terms_on() && total < rate => {
            warn!(
                probe,
                time,
                total,
                floor = rate,
                "net metabolic energy rate below floor, raising to floor"
            );
            rate
        }
        _ => total,
    }
}
