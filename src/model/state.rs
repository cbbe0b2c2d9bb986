// src/model/state.rs
//! Muscle state snapshots and the collaborator interfaces that supply them

use crate::error::{serialization_error, MetabolicError, MetabolicResult};
use crate::utils::serde_float;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Instantaneous fiber kinematics and kinetics of one muscle
///
/// Velocities follow the contraction-model convention: negative while the
/// fiber shortens, positive while it lengthens. Non-finite values survive a
/// JSON round trip as `"NaN"`, `"inf"` or `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleState {
    #[serde(with = "serde_float")]
    pub max_isometric_force: f64,
    #[serde(with = "serde_float")]
    pub max_contraction_velocity: f64,
    #[serde(with = "serde_float")]
    pub activation: f64,
    #[serde(with = "serde_float")]
    pub excitation: f64,
    #[serde(with = "serde_float")]
    pub passive_fiber_force: f64,
    #[serde(with = "serde_float")]
    pub active_fiber_force: f64,
    #[serde(with = "serde_float")]
    pub total_fiber_force: f64,
    #[serde(with = "serde_float")]
    pub normalized_fiber_length: f64,
    #[serde(with = "serde_float")]
    pub fiber_velocity: f64,
    #[serde(with = "serde_float")]
    pub normalized_fiber_velocity: f64,
    #[serde(with = "serde_float")]
    pub force_velocity_multiplier: f64,
}

impl Default for MuscleState {
    /// Resting muscle at optimal length
    fn default() -> Self {
        Self {
            max_isometric_force: 1000.0,
            max_contraction_velocity: 10.0,
            activation: 0.0,
            excitation: 0.0,
            passive_fiber_force: 0.0,
            active_fiber_force: 0.0,
            total_fiber_force: 0.0,
            normalized_fiber_length: 1.0,
            fiber_velocity: 0.0,
            normalized_fiber_velocity: 0.0,
            force_velocity_multiplier: 1.0,
        }
    }
}

/// Opaque reference to a muscle inside a [`MuscleStateProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MuscleHandle(pub usize);

/// Source of muscle states, typically a muscle-contraction model
///
/// The provider must already have advanced to `time` when queried.
pub trait MuscleStateProvider: Send + Sync {
    /// Look up a muscle by name
    fn find_muscle(&self, name: &str) -> Option<MuscleHandle>;

    /// Current state of a previously resolved muscle
    fn muscle_state(&self, handle: MuscleHandle, time: f64) -> MuscleState;
}

/// Source of the whole-model mass in kg
pub trait SystemMassProvider: Send + Sync {
    fn system_mass(&self, time: f64) -> f64;
}

/// Named entry of a serialized snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedMuscleState {
    pub name: String,
    #[serde(flatten)]
    pub state: MuscleState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(with = "serde_float")]
    system_mass: f64,
    #[serde(default)]
    muscles: Vec<NamedMuscleState>,
}

/// In-memory muscle model holding one state per muscle and a fixed mass
///
/// Time is ignored; hosts replace states between evaluations with
/// [`SnapshotModel::set_state`].
pub struct SnapshotModel {
    names: Vec<String>,
    states: RwLock<Vec<MuscleState>>,
    system_mass: RwLock<f64>,
}

impl SnapshotModel {
    pub fn new(system_mass: f64) -> Self {
        Self {
            names: Vec::new(),
            states: RwLock::new(Vec::new()),
            system_mass: RwLock::new(system_mass),
        }
    }

    /// Add a muscle, or replace its state if the name already exists
    pub fn with_muscle(mut self, name: impl Into<String>, state: MuscleState) -> Self {
        let name = name.into();
        match self.names.iter().position(|n| *n == name) {
            Some(index) => self.states.get_mut()[index] = state,
            None => {
                self.names.push(name);
                self.states.get_mut().push(state);
            }
        }
        self
    }

    /// Replace the state of an existing muscle. Returns false for unknown names.
    pub fn set_state(&self, name: &str, state: MuscleState) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.states.write()[index] = state;
                true
            }
            None => false,
        }
    }

    /// Replace the whole-model mass reported to the basal term
    pub fn set_system_mass(&self, mass: f64) {
        *self.system_mass.write() = mass;
    }

    pub fn muscle_names(&self) -> &[String] {
        &self.names
    }

    /// Parse a snapshot of the form
    /// `{"system_mass": 70.0, "muscles": [{"name": "soleus", "activation": 0.2, ...}]}`
    pub fn from_json(json: &str) -> MetabolicResult<Self> {
        let document: SnapshotDocument =
            serde_json::from_str(json).map_err(|e| MetabolicError::Load {
                path: "<snapshot>".to_string(),
                reason: e.to_string(),
            })?;

        Ok(document
            .muscles
            .into_iter()
            .fold(Self::new(document.system_mass), |model, entry| {
                model.with_muscle(entry.name, entry.state)
            }))
    }

    pub fn to_json(&self) -> MetabolicResult<String> {
        let document = SnapshotDocument {
            system_mass: *self.system_mass.read(),
            muscles: self
                .names
                .iter()
                .zip(self.states.read().iter())
                .map(|(name, state)| NamedMuscleState {
                    name: name.clone(),
                    state: *state,
                })
                .collect(),
        };
        serde_json::to_string_pretty(&document).map_err(|e| serialization_error("muscle snapshot", e))
    }
}

impl MuscleStateProvider for SnapshotModel {
    fn find_muscle(&self, name: &str) -> Option<MuscleHandle> {
        self.names.iter().position(|n| n == name).map(MuscleHandle)
    }

    fn muscle_state(&self, handle: MuscleHandle, _time: f64) -> MuscleState {
        self.states.read()[handle.0]
    }
}

impl SystemMassProvider for SnapshotModel {
    fn system_mass(&self, _time: f64) -> f64 {
        *self.system_mass.read()
    }
}
