// src/model/parameters.rs
//! Per-muscle physiological parameters

use crate::error::{MetabolicErrorBuilder, MetabolicResult};
use serde::{Deserialize, Serialize};

/// Physiological record for one muscle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleParameter {
    /// Name of the muscle in the external contraction model
    pub name: String,
    /// Muscle mass in kg
    pub muscle_mass: f64,
    /// Fraction of cross-sectional area made of slow-twitch fibers
    pub slow_twitch_ratio: f64,
}

impl MuscleParameter {
    pub fn new(name: impl Into<String>, muscle_mass: f64, slow_twitch_ratio: f64) -> Self {
        Self {
            name: name.into(),
            muscle_mass,
            slow_twitch_ratio,
        }
    }

    pub fn fast_twitch_ratio(&self) -> f64 {
        1.0 - self.slow_twitch_ratio
    }
}

/// Ordered collection of muscle parameters keyed by muscle name
///
/// Declaration order is kept and fixes the summation order of the probe total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    parameters: Vec<MuscleParameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate muscle names
    pub fn from_parameters(parameters: Vec<MuscleParameter>) -> MetabolicResult<Self> {
        let mut set = Self::new();
        for parameter in parameters {
            set.push(parameter)?;
        }
        Ok(set)
    }

    /// Append a parameter; names must be unique
    pub fn push(&mut self, parameter: MuscleParameter) -> MetabolicResult<()> {
        if self.contains(&parameter.name) {
            return Err(MetabolicErrorBuilder::new("parameter_set", "push").configuration(
                "name",
                Some(&parameter.name),
                "muscle listed more than once",
            ));
        }
        self.parameters.push(parameter);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MuscleParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MuscleParameter> {
        self.parameters.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a MuscleParameter;
    type IntoIter = std::slice::Iter<'a, MuscleParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
