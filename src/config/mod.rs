// src/config/mod.rs
//! Probe configuration
//!
//! A probe is configured once, before the simulation starts, and is
//! read-only afterwards.

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::ConfigLoader;

use crate::error::MetabolicResult;
use crate::model::parameters::{MuscleParameter, ParameterSet};
use crate::utils::validation::{validate_finite, validate_positive, ValidationError};
use serde::{Deserialize, Serialize};

/// Optional lower bound on the reported total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FloorPolicy {
    /// Report the total as computed
    #[default]
    Disabled,
    /// Raise totals below `rate` (W/kg) to `rate` when the activation-maintenance,
    /// shortening and mechanical-work terms are all enabled
    MinimumTotal { rate: f64 },
}

impl FloorPolicy {
    pub fn minimum_total_default() -> Self {
        FloorPolicy::MinimumTotal {
            rate: output::DEFAULT_MINIMUM_TOTAL_RATE,
        }
    }
}

/// Simulation-wide probe constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "defaults::enabled")]
    pub activation_maintenance_rate_on: bool,

    #[serde(default = "defaults::enabled")]
    pub shortening_rate_on: bool,

    #[serde(default = "defaults::enabled")]
    pub basal_rate_on: bool,

    #[serde(default = "defaults::enabled")]
    pub mechanical_work_rate_on: bool,

    #[serde(default = "defaults::scaling_factor")]
    pub scaling_factor: f64,

    #[serde(default = "defaults::basal_coefficient")]
    pub basal_coefficient: f64,

    #[serde(default = "defaults::basal_exponent")]
    pub basal_exponent: f64,

    /// Compute per-muscle terms on the rayon pool; the sum stays ordered
    #[serde(default)]
    pub parallel_evaluation: bool,

    #[serde(default)]
    pub floor_policy: FloorPolicy,
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::probe;

    pub fn enabled() -> bool { true }
    pub fn scaling_factor() -> f64 { probe::DEFAULT_SCALING_FACTOR }
    pub fn basal_coefficient() -> f64 { probe::DEFAULT_BASAL_COEFFICIENT }
    pub fn basal_exponent() -> f64 { probe::DEFAULT_BASAL_EXPONENT }
    pub fn probe_name() -> String { probe::DEFAULT_PROBE_NAME.to_string() }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            activation_maintenance_rate_on: defaults::enabled(),
            shortening_rate_on: defaults::enabled(),
            basal_rate_on: defaults::enabled(),
            mechanical_work_rate_on: defaults::enabled(),
            scaling_factor: defaults::scaling_factor(),
            basal_coefficient: defaults::basal_coefficient(),
            basal_exponent: defaults::basal_exponent(),
            parallel_evaluation: false,
            floor_policy: FloorPolicy::default(),
        }
    }
}

impl ProbeConfig {
    /// Default constants with explicit term toggles
    pub fn with_terms(
        activation_maintenance_rate_on: bool,
        shortening_rate_on: bool,
        basal_rate_on: bool,
        mechanical_work_rate_on: bool,
    ) -> Self {
        Self {
            activation_maintenance_rate_on,
            shortening_rate_on,
            basal_rate_on,
            mechanical_work_rate_on,
            ..Self::default()
        }
    }

    /// True when every per-muscle term is enabled (basal not considered)
    pub fn all_muscle_terms_on(&self) -> bool {
        self.activation_maintenance_rate_on && self.shortening_rate_on && self.mechanical_work_rate_on
    }

    /// Validate configuration consistency
    pub fn validate_consistency(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("probe.scaling_factor", self.scaling_factor),
            ("probe.basal_coefficient", self.basal_coefficient),
            ("probe.basal_exponent", self.basal_exponent),
        ] {
            if let Err(e) = validate_finite(field, value) {
                errors.push(e);
            }
        }

        if let FloorPolicy::MinimumTotal { rate } = self.floor_policy {
            if let Err(e) = validate_positive("probe.floor_policy.rate", rate) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Complete probe description as stored in a TOML document
///
/// ```toml
/// name = "umberger_2003"
///
/// [probe]
/// basal_rate_on = false
///
/// [[muscles]]
/// name = "soleus"
/// muscle_mass = 0.4
/// slow_twitch_ratio = 0.8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeDescription {
    #[serde(default = "defaults::probe_name")]
    pub name: String,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub muscles: Vec<MuscleParameter>,
}

impl Default for ProbeDescription {
    fn default() -> Self {
        Self {
            name: defaults::probe_name(),
            probe: ProbeConfig::default(),
            muscles: Vec::new(),
        }
    }
}

impl ProbeDescription {
    /// Ordered parameter set; duplicate muscle names are rejected
    pub fn parameter_set(&self) -> MetabolicResult<ParameterSet> {
        ParameterSet::from_parameters(self.muscles.clone())
    }
}
