// src/model/mod.rs
//! Muscle energy model: parameters, state interfaces, calculator and probe

pub mod aggregator;
pub mod energy;
pub mod parameters;
pub mod probe;
pub mod resolver;
pub mod state;
pub mod traits;

pub use aggregator::{aggregate, basal_rate};
pub use energy::{EnergyRateCalculator, EvaluationContext, MuscleEnergyRates};
pub use parameters::{MuscleParameter, ParameterSet};
pub use probe::{MetabolicPowerProbe, MuscleReport, ProbeReport};
pub use resolver::{resolve, MuscleBinding};
pub use state::{MuscleHandle, MuscleState, MuscleStateProvider, SnapshotModel, SystemMassProvider};
pub use traits::Probe;
