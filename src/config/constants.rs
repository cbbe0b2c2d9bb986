// src/config/constants.rs
//! Model constants for the Umberger (2003) muscle energy model
//!
//! Every coefficient used by the energy-rate calculator lives here so the
//! formulas read as named quantities rather than bare numbers.

/// Probe-level defaults
pub mod probe {
    pub const DEFAULT_SCALING_FACTOR: f64 = 1.0;
    pub const DEFAULT_BASAL_COEFFICIENT: f64 = 1.51;
    pub const DEFAULT_BASAL_EXPONENT: f64 = 1.0;
    pub const DEFAULT_PROBE_NAME: &str = "metabolic_power";

    /// Number of values reported per evaluation
    pub const OUTPUT_COUNT: usize = 1;
}

/// Activation and maintenance heat rate
pub mod activation_maintenance {
    /// W/kg contributed by a fully fast-twitch muscle on top of the base rate
    pub const FAST_TWITCH_RATE: f64 = 128.0;
    /// W/kg common to all fiber types
    pub const BASE_RATE: f64 = 25.0;
    /// Exponent applied to the activation scaling term
    pub const ACTIVATION_EXPONENT: f64 = 0.6;
    /// Share of the unscaled rate independent of isometric force beyond optimal length
    pub const LENGTH_INDEPENDENT_SHARE: f64 = 0.4;
    /// Share of the unscaled rate weighted by isometric force beyond optimal length
    pub const FORCE_DEPENDENT_SHARE: f64 = 0.6;
}

/// Shortening and lengthening heat rate
pub mod shortening {
    /// Fast-twitch fibers slow down Vmax of the slow-twitch fraction by this factor
    pub const FAST_TWITCH_VELOCITY_FACTOR: f64 = 1.5;
    /// Vmax(fast) = ratio * Vmax(slow)
    pub const FAST_TO_SLOW_VELOCITY_RATIO: f64 = 2.5;
    pub const FAST_TWITCH_COEFFICIENT: f64 = 153.0;
    pub const SLOW_TWITCH_COEFFICIENT: f64 = 100.0;
    /// Upper limit of each fiber-type shortening term (W/kg)
    pub const MAX_SHORTENING_RATE: f64 = 100.0;
    /// Lengthening heat is this fraction of the slow-twitch coefficient
    pub const ECCENTRIC_FACTOR: f64 = 0.3;
    /// Exponent on A during concentric contraction
    pub const CONCENTRIC_ACTIVATION_EXPONENT: f64 = 2.0;
}

/// Fiber geometry thresholds
pub mod fiber {
    /// Normalized length at which the contractile element is at optimal length
    pub const OPTIMAL_NORMALIZED_LENGTH: f64 = 1.0;
}

/// Normalized Hill constants (diagnostic only)
pub mod hill {
    pub const A_REL_SLOW_TWITCH: f64 = 0.1;
    pub const A_REL_FAST_TWITCH_INCREMENT: f64 = 0.4;
}

/// Whole-model output policy
pub mod output {
    /// Floor used by `FloorPolicy::minimum_total_default`
    pub const DEFAULT_MINIMUM_TOTAL_RATE: f64 = 1.0;
}

/// Configuration loading
pub mod paths {
    pub const DEFAULT_CONFIG_FILE: &str = "metabolics.toml";
    pub const LOCAL_CONFIG_FILE: &str = "metabolics.local.toml";
    pub const ENV_PREFIX: &str = "METABOLIC_";
}
