// src/model/energy.rs
//! Per-muscle heat and work rates of the Umberger (2003) energy model
//!
//! All rates are in W/kg of muscle. The basal term belongs to the whole body
//! and is added by the aggregator, not here.
//!
//! Velocity convention: `fiber_velocity <= 0` is a concentric (shortening)
//! contraction and `> 0` an eccentric (lengthening) one.

use crate::config::constants::{activation_maintenance, fiber, hill, shortening};
use crate::config::ProbeConfig;
use crate::error::{MetabolicErrorBuilder, MetabolicResult};
use crate::model::parameters::MuscleParameter;
use crate::model::state::MuscleState;
use crate::utils::serde_float;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;
use tracing::{trace, warn};

/// The three per-muscle terms of one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MuscleEnergyRates {
    /// AMdot
    #[serde(with = "serde_float")]
    pub activation_maintenance: f64,
    /// Sdot
    #[serde(with = "serde_float")]
    pub shortening: f64,
    /// Wdot
    #[serde(with = "serde_float")]
    pub mechanical_work: f64,
}

impl MuscleEnergyRates {
    /// Edot for this muscle, basal excluded
    pub fn total(&self) -> f64 {
        self.activation_maintenance + self.shortening + self.mechanical_work
    }
}

/// Identifies the probe, muscle and time in diagnostics
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub probe: &'a str,
    pub muscle: &'a str,
    pub time: f64,
}

/// Activation dependence A: excitation while activation rises, otherwise the mean
pub fn activation_scaling(excitation: f64, activation: f64) -> f64 {
    if excitation > activation {
        excitation
    } else {
        (excitation + activation) / 2.0
    }
}

/// Normalized active force the fiber would develop under isometric conditions
pub fn isometric_force_fraction(state: &MuscleState, ctx: &EvaluationContext<'_>) -> MetabolicResult<f64> {
    let builder = || {
        MetabolicErrorBuilder::from_context(crate::error_context!("energy", "isometric_force_fraction"))
            .at_time(ctx.time)
    };

    if state.max_isometric_force == 0.0 {
        return Err(builder().domain(ctx.muscle, "zero isometric force"));
    }
    if state.force_velocity_multiplier == 0.0 {
        return Err(builder().domain(ctx.muscle, "zero force-velocity multiplier"));
    }

    Ok((state.active_fiber_force / state.force_velocity_multiplier) / state.max_isometric_force)
}

/// Slow-twitch share of the excitation, `ratio * sin(pi/2 * u)`
pub fn slow_twitch_excitation(slow_twitch_ratio: f64, excitation: f64) -> f64 {
    slow_twitch_ratio * (FRAC_PI_2 * excitation).sin()
}

/// Fast-twitch share of the excitation, `(1 - ratio) * (1 - cos(pi/2 * u))`
pub fn fast_twitch_excitation(slow_twitch_ratio: f64, excitation: f64) -> f64 {
    (1.0 - slow_twitch_ratio) * (1.0 - (FRAC_PI_2 * excitation).cos())
}

/// Normalized Hill constant a/F0 for the fiber mix
pub fn hill_a_rel(slow_twitch_ratio: f64) -> f64 {
    hill::A_REL_SLOW_TWITCH + hill::A_REL_FAST_TWITCH_INCREMENT * (1.0 - slow_twitch_ratio)
}

/// Computes the per-muscle terms from parameters, state and probe constants
pub struct EnergyRateCalculator;

impl EnergyRateCalculator {
    pub fn compute(
        parameter: &MuscleParameter,
        state: &MuscleState,
        config: &ProbeConfig,
        ctx: &EvaluationContext<'_>,
    ) -> MetabolicResult<MuscleEnergyRates> {
        let a = activation_scaling(state.excitation, state.activation);
        let f_iso = isometric_force_fraction(state, ctx)?;

        if state.normalized_fiber_length < 0.0 {
            warn!(
                time = ctx.time,
                muscle = ctx.muscle,
                "muscle has negative normalized fiber-length"
            );
        }

        let mut rates = MuscleEnergyRates::default();

        if config.activation_maintenance_rate_on {
            rates.activation_maintenance =
                Self::activation_maintenance_rate(parameter, state, config, a, f_iso);
        }
        if config.shortening_rate_on {
            rates.shortening = Self::shortening_rate(parameter, state, config, a, f_iso, ctx);
        }
        if config.mechanical_work_rate_on {
            rates.mechanical_work = Self::mechanical_work_rate(parameter, state);
        }

        for (term, value) in [
            ("AMdot", rates.activation_maintenance),
            ("Sdot", rates.shortening),
            ("Wdot", rates.mechanical_work),
        ] {
            if value.is_nan() {
                warn!(probe = ctx.probe, muscle = ctx.muscle, term, "{} = NaN", term);
            }
        }

        trace!(
            probe = ctx.probe,
            muscle = ctx.muscle,
            time = ctx.time,
            a,
            f_iso,
            a_rel = hill_a_rel(parameter.slow_twitch_ratio),
            slow_twitch_excitation = slow_twitch_excitation(parameter.slow_twitch_ratio, state.excitation),
            fast_twitch_excitation = fast_twitch_excitation(parameter.slow_twitch_ratio, state.excitation),
            am_dot = rates.activation_maintenance,
            s_dot = rates.shortening,
            w_dot = rates.mechanical_work,
            "muscle energy rates"
        );

        Ok(rates)
    }

    /// AMdot; beyond optimal length part of the rate scales with isometric force
    pub fn activation_maintenance_rate(
        parameter: &MuscleParameter,
        state: &MuscleState,
        config: &ProbeConfig,
        a: f64,
        f_iso: f64,
    ) -> f64 {
        let unscaled = activation_maintenance::FAST_TWITCH_RATE * parameter.fast_twitch_ratio()
            + activation_maintenance::BASE_RATE;
        let activation_term = a.powf(activation_maintenance::ACTIVATION_EXPONENT);

        if state.normalized_fiber_length <= fiber::OPTIMAL_NORMALIZED_LENGTH {
            config.scaling_factor * activation_term * unscaled
        } else {
            config.scaling_factor
                * activation_term
                * (activation_maintenance::LENGTH_INDEPENDENT_SHARE * unscaled
                    + activation_maintenance::FORCE_DEPENDENT_SHARE * unscaled * f_iso)
        }
    }

    /// Sdot, driven by normalized fiber velocity
    pub fn shortening_rate(
        parameter: &MuscleParameter,
        state: &MuscleState,
        config: &ProbeConfig,
        a: f64,
        f_iso: f64,
        ctx: &EvaluationContext<'_>,
    ) -> f64 {
        let slow_ratio = parameter.slow_twitch_ratio;
        let fast_ratio = parameter.fast_twitch_ratio();
        let v_norm = state.normalized_fiber_velocity;

        let vmax_slow = state.max_contraction_velocity
            / (1.0 + shortening::FAST_TWITCH_VELOCITY_FACTOR * fast_ratio);
        let vmax_fast = shortening::FAST_TO_SLOW_VELOCITY_RATIO * vmax_slow;
        let alpha_fast = shortening::FAST_TWITCH_COEFFICIENT / vmax_fast;
        let alpha_slow = shortening::SLOW_TWITCH_COEFFICIENT / vmax_slow;

        let mut rate = if v_norm <= 0.0 {
            let slow_term = Self::limit_shortening_term(alpha_slow * v_norm * slow_ratio, "slow", ctx);
            let fast_term = Self::limit_shortening_term(alpha_fast * v_norm * fast_ratio, "fast", ctx);
            let unscaled = -slow_term - fast_term;
            config.scaling_factor * a.powf(shortening::CONCENTRIC_ACTIVATION_EXPONENT) * unscaled
        } else {
            let unscaled = -shortening::ECCENTRIC_FACTOR * alpha_slow * v_norm;
            config.scaling_factor * a * unscaled
        };

        if state.normalized_fiber_length > fiber::OPTIMAL_NORMALIZED_LENGTH {
            rate *= f_iso;
        }
        rate
    }

    /// Caps a fiber-type term at the maximum shortening rate.
    ///
    /// Concentric terms are non-positive, so the cap only triggers for
    /// unusual inputs (negative Vmax). Kept as-is for parity with published
    /// results.
    fn limit_shortening_term(value: f64, fiber_type: &str, ctx: &EvaluationContext<'_>) -> f64 {
        if value > shortening::MAX_SHORTENING_RATE {
            warn!(
                probe = ctx.probe,
                muscle = ctx.muscle,
                time = ctx.time,
                fiber_type,
                limit = shortening::MAX_SHORTENING_RATE,
                "{}-twitch shortening heat rate exceeds the max value, clamping",
                fiber_type
            );
            shortening::MAX_SHORTENING_RATE
        } else {
            value
        }
    }

    /// Wdot: positive work only, per kg of muscle
    pub fn mechanical_work_rate(parameter: &MuscleParameter, state: &MuscleState) -> f64 {
        let work = if state.fiber_velocity <= 0.0 {
            -state.active_fiber_force * state.fiber_velocity
        } else {
            0.0
        };
        work / parameter.muscle_mass
    }
}
