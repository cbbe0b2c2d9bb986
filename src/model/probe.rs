// src/model/probe.rs
//! Whole-body muscle metabolic power probe

use crate::config::{ProbeConfig, ProbeDescription};
use crate::config::constants::probe::OUTPUT_COUNT;
use crate::error::{serialization_error, MetabolicError, MetabolicResult};
use crate::model::aggregator::{aggregate, basal_rate};
use crate::model::energy::{EnergyRateCalculator, EvaluationContext, MuscleEnergyRates};
use crate::model::parameters::ParameterSet;
use crate::model::resolver::{resolve, MuscleBinding};
use crate::model::state::{MuscleStateProvider, SystemMassProvider};
use crate::model::traits::Probe;
use crate::utils::serde_float;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Reports total metabolic power (W/kg) of a set of muscles
///
/// Muscles are resolved against the model once, in [`MetabolicPowerProbe::new`];
/// each evaluation then reads fresh muscle states and holds no state of its own.
pub struct MetabolicPowerProbe {
    name: String,
    config: ProbeConfig,
    bindings: Vec<MuscleBinding>,
    muscles: Arc<dyn MuscleStateProvider>,
    mass: Arc<dyn SystemMassProvider>,
}

/// Term-level output of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub probe: String,
    pub time: f64,
    pub muscles: Vec<MuscleReport>,
    #[serde(with = "serde_float")]
    pub basal: f64,
    #[serde(with = "serde_float")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleReport {
    pub name: String,
    pub rates: MuscleEnergyRates,
    #[serde(with = "serde_float")]
    pub total: f64,
}

impl ProbeReport {
    /// JSON form; NaN terms are written as `"NaN"` rather than `null`
    pub fn to_json(&self) -> MetabolicResult<String> {
        serde_json::to_string(self).map_err(|e| serialization_error("probe report", e))
    }
}

impl MetabolicPowerProbe {
    pub fn new(
        name: impl Into<String>,
        config: ProbeConfig,
        parameters: &ParameterSet,
        muscles: Arc<dyn MuscleStateProvider>,
        mass: Arc<dyn SystemMassProvider>,
    ) -> MetabolicResult<Self> {
        config.validate_consistency().map_err(MetabolicError::Validation)?;
        let bindings = resolve(parameters, muscles.as_ref())?;

        Ok(Self {
            name: name.into(),
            config,
            bindings,
            muscles,
            mass,
        })
    }

    pub fn from_description(
        description: &ProbeDescription,
        muscles: Arc<dyn MuscleStateProvider>,
        mass: Arc<dyn SystemMassProvider>,
    ) -> MetabolicResult<Self> {
        let parameters = description.parameter_set()?;
        Self::new(description.name.clone(), description.probe.clone(), &parameters, muscles, mass)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn bindings(&self) -> &[MuscleBinding] {
        &self.bindings
    }

    /// Per-muscle terms, in parameter-set order
    ///
    /// On failure the error of the first failing muscle in set order is
    /// returned, with or without `parallel_evaluation`.
    pub fn muscle_rates(&self, time: f64) -> MetabolicResult<Vec<MuscleEnergyRates>> {
        let compute = |binding: &MuscleBinding| {
            let state = self.muscles.muscle_state(binding.handle, time);
            let ctx = EvaluationContext {
                probe: &self.name,
                muscle: binding.name(),
                time,
            };
            EnergyRateCalculator::compute(&binding.parameter, &state, &self.config, &ctx)
        };

        if self.config.parallel_evaluation {
            let results: Vec<MetabolicResult<MuscleEnergyRates>> = self.bindings.par_iter().map(compute).collect();
            results.into_iter().collect()
        } else {
            self.bindings.iter().map(compute).collect()
        }
    }

    /// Total metabolic power at `time`
    pub fn total_rate(&self, time: f64) -> MetabolicResult<f64> {
        let totals: Vec<f64> = self.muscle_rates(time)?.iter().map(MuscleEnergyRates::total).collect();
        Ok(aggregate(&totals, &self.config, self.system_mass(time), &self.name, time))
    }

    /// Total plus every per-muscle term and the basal rate
    pub fn evaluate_breakdown(&self, time: f64) -> MetabolicResult<ProbeReport> {
        let rates = self.muscle_rates(time)?;
        let system_mass = self.system_mass(time);

        let muscles: Vec<MuscleReport> = self
            .bindings
            .iter()
            .zip(rates)
            .map(|(binding, rates)| MuscleReport {
                name: binding.name().to_string(),
                total: rates.total(),
                rates,
            })
            .collect();
        let totals: Vec<f64> = muscles.iter().map(|m| m.total).collect();

        Ok(ProbeReport {
            probe: self.name.clone(),
            time,
            basal: basal_rate(&self.config, system_mass),
            total: aggregate(&totals, &self.config, system_mass, &self.name, time),
            muscles,
        })
    }

    // Mass is only queried when the basal term needs it
    fn system_mass(&self, time: f64) -> f64 {
        if self.config.basal_rate_on {
            self.mass.system_mass(time)
        } else {
            0.0
        }
    }
}

impl Probe for MetabolicPowerProbe {
    fn output_count(&self) -> usize {
        OUTPUT_COUNT
    }

    fn output_labels(&self) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn evaluate(&self, time: f64) -> MetabolicResult<Vec<f64>> {
        Ok(vec![self.total_rate(time)?])
    }
}
