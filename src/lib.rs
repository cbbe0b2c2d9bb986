//! Metabolic-Core: whole-body muscle metabolic power estimation
//!
//! This library estimates the instantaneous metabolic power (W/kg) consumed by
//! a set of simulated muscles using the four-term Umberger (2003) model:
//!
//! - Activation and maintenance heat
//! - Shortening and lengthening heat
//! - Mechanical work
//! - Whole-body basal rate
//!
//! Muscle states come from an external contraction model through the
//! [`MuscleStateProvider`] and [`SystemMassProvider`] traits.
//!
//! # Quick Start
//!
//! ```rust
//! use metabolic_core::{MetabolicPowerProbe, MuscleParameter, MuscleState, ParameterSet, Probe, ProbeConfig, SnapshotModel};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = Arc::new(
//!     SnapshotModel::new(70.0).with_muscle("soleus", MuscleState { activation: 0.4, excitation: 0.6, ..Default::default() }),
//! );
//! let parameters = ParameterSet::from_parameters(vec![MuscleParameter::new("soleus", 0.4, 0.8)])?;
//!
//! let probe = MetabolicPowerProbe::new("metabolic_power", ProbeConfig::default(), &parameters, model.clone(), model)?;
//! let total = probe.evaluate(0.0)?;
//! assert_eq!(total.len(), probe.output_count());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod model;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigLoader, FloorPolicy, ProbeConfig, ProbeDescription};
pub use error::{ErrorKind, MetabolicError, MetabolicResult};
pub use model::{
    EnergyRateCalculator, MetabolicPowerProbe, MuscleEnergyRates, MuscleParameter, MuscleState,
    MuscleStateProvider, ParameterSet, Probe, ProbeReport, SnapshotModel, SystemMassProvider,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
