// src/model/resolver.rs
//! Binding of muscle parameters to muscles of the external model
//!
//! Static checks (existence, mass, fiber ratio) run here once, when a probe
//! is built, and never again during evaluation.

use crate::error::{MetabolicErrorBuilder, MetabolicResult};
use crate::model::parameters::{MuscleParameter, ParameterSet};
use crate::model::state::{MuscleHandle, MuscleStateProvider};
use crate::utils::validation::{validate_positive, validate_unit_interval};
use tracing::debug;

/// A validated parameter record bound to a live muscle
#[derive(Debug, Clone, PartialEq)]
pub struct MuscleBinding {
    pub parameter: MuscleParameter,
    pub handle: MuscleHandle,
}

impl MuscleBinding {
    pub fn name(&self) -> &str {
        &self.parameter.name
    }
}

/// Check one parameter record against the model
///
/// Checks run in order: the muscle must exist, its mass must be positive,
/// and its slow-twitch ratio must lie in `[0, 1]`.
pub fn check_valid_muscle(
    parameter: &MuscleParameter,
    provider: &dyn MuscleStateProvider,
) -> MetabolicResult<MuscleHandle> {
    let builder =
        || MetabolicErrorBuilder::from_context(crate::error_context!("resolver", "check_valid_muscle"));

    let handle = provider
        .find_muscle(&parameter.name)
        .ok_or_else(|| builder().reference(&parameter.name))?;

    validate_positive("muscle_mass", parameter.muscle_mass).map_err(|_| {
        builder().configuration("mass", Some(&parameter.name), "muscle_mass must be positive")
    })?;

    validate_unit_interval("ratio_slow_twitch_fibers", parameter.slow_twitch_ratio).map_err(|_| {
        builder().configuration(
            "ratio",
            Some(&parameter.name),
            "ratio_slow_twitch_fibers must be between 0 and 1",
        )
    })?;

    Ok(handle)
}

/// Bind every parameter in declaration order
///
/// Fails on the first invalid record; the model is never modified.
pub fn resolve(
    parameters: &ParameterSet,
    provider: &dyn MuscleStateProvider,
) -> MetabolicResult<Vec<MuscleBinding>> {
    let bindings = parameters
        .iter()
        .map(|parameter| {
            check_valid_muscle(parameter, provider).map(|handle| MuscleBinding {
                parameter: parameter.clone(),
                handle,
            })
        })
        .collect::<MetabolicResult<Vec<_>>>()?;

    debug!(muscles = bindings.len(), "resolved metabolic muscle parameters");
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, MetabolicError};
    use crate::model::state::{MuscleState, SnapshotModel};

    fn model() -> SnapshotModel {
        SnapshotModel::new(70.0)
            .with_muscle("soleus", MuscleState::default())
            .with_muscle("gastroc", MuscleState::default())
    }

    #[test]
    fn test_resolve_keeps_parameter_order() {
        let set = ParameterSet::from_parameters(vec![
            MuscleParameter::new("gastroc", 0.3, 0.5),
            MuscleParameter::new("soleus", 0.4, 0.8),
        ])
        .unwrap();

        let bindings = resolve(&set, &model()).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name(), "gastroc");
        assert_eq!(bindings[0].handle, MuscleHandle(1));
        assert_eq!(bindings[1].handle, MuscleHandle(0));
    }

    #[test]
    fn test_missing_muscle_is_reference_error() {
        let set = ParameterSet::from_parameters(vec![MuscleParameter::new("psoas", 0.3, 0.5)]).unwrap();
        let err = resolve(&set, &model()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(err.muscle(), Some("psoas"));
    }

    #[test]
    fn test_non_positive_mass_is_configuration_error() {
        for mass in [0.0, -0.1, f64::NAN] {
            let param = MuscleParameter::new("soleus", mass, 0.5);
            match check_valid_muscle(&param, &model()).unwrap_err() {
                MetabolicError::Configuration { field, .. } => assert_eq!(field, "mass"),
                other => panic!("Expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_ratio_outside_unit_interval_is_configuration_error() {
        for ratio in [-0.01, 1.01] {
            let param = MuscleParameter::new("soleus", 0.4, ratio);
            match check_valid_muscle(&param, &model()).unwrap_err() {
                MetabolicError::Configuration { field, .. } => assert_eq!(field, "ratio"),
                other => panic!("Expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_reference_checked_before_values() {
        let param = MuscleParameter::new("psoas", -1.0, 2.0);
        let err = check_valid_muscle(&param, &model()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
    }
}
