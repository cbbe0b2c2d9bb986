// tests/probe_integration.rs
//! End-to-end probe evaluation against a snapshot muscle model

use metabolic_core::{
    FloorPolicy, MetabolicPowerProbe, MuscleParameter, MuscleState, ParameterSet, Probe, ProbeConfig,
    SnapshotModel,
};
use std::sync::Arc;

const TOLERANCE: f64 = 1e-9;

/// Analytic value of the single-muscle fixture below:
/// AMdot = 0.8^0.6 * 89, Sdot = 0.64 * 0.70525, Wdot = 50 / 0.5
const FIXTURE_TOTAL: f64 = 178.2987396647614;

fn fixture_state() -> MuscleState {
    MuscleState {
        max_isometric_force: 1000.0,
        max_contraction_velocity: 10.0,
        activation: 0.8,
        excitation: 0.8,
        passive_fiber_force: 0.0,
        active_fiber_force: 500.0,
        total_fiber_force: 500.0,
        normalized_fiber_length: 1.0,
        fiber_velocity: -0.1,
        normalized_fiber_velocity: -0.05,
        force_velocity_multiplier: 1.0,
    }
}

fn build_probe(config: ProbeConfig, model: Arc<SnapshotModel>, params: Vec<MuscleParameter>) -> MetabolicPowerProbe {
    let set = ParameterSet::from_parameters(params).unwrap();
    MetabolicPowerProbe::new("metabolic_power", config, &set, model.clone(), model).unwrap()
}

fn leg_model() -> Arc<SnapshotModel> {
    Arc::new(
        SnapshotModel::new(75.0)
            .with_muscle("soleus", MuscleState {
                activation: 0.35,
                excitation: 0.5,
                active_fiber_force: 1200.0,
                normalized_fiber_length: 1.05,
                fiber_velocity: -0.02,
                normalized_fiber_velocity: -0.1,
                force_velocity_multiplier: 0.9,
                max_isometric_force: 3500.0,
                ..Default::default()
            })
            .with_muscle("gastroc", MuscleState {
                activation: 0.6,
                excitation: 0.3,
                active_fiber_force: 800.0,
                normalized_fiber_length: 0.95,
                fiber_velocity: 0.04,
                normalized_fiber_velocity: 0.2,
                force_velocity_multiplier: 1.2,
                max_isometric_force: 1500.0,
                ..Default::default()
            })
            .with_muscle("tib_ant", MuscleState {
                activation: 0.1,
                excitation: 0.1,
                active_fiber_force: 50.0,
                normalized_fiber_length: 1.0,
                max_isometric_force: 900.0,
                ..Default::default()
            }),
    )
}

fn leg_parameters() -> Vec<MuscleParameter> {
    vec![
        MuscleParameter::new("soleus", 0.6, 0.8),
        MuscleParameter::new("gastroc", 0.35, 0.55),
        MuscleParameter::new("tib_ant", 0.2, 0.73),
    ]
}

#[test]
fn test_single_muscle_fixture() {
    let model = Arc::new(SnapshotModel::new(70.0).with_muscle("soleus", fixture_state()));
    let probe = build_probe(
        ProbeConfig::with_terms(true, true, false, true),
        model,
        vec![MuscleParameter::new("soleus", 0.5, 0.5)],
    );

    let output = probe.evaluate(0.0).unwrap();
    assert_eq!(output.len(), 1);
    assert!((output[0] - FIXTURE_TOTAL).abs() < TOLERANCE, "got {}", output[0]);
}

#[test]
fn test_fixture_with_basal() {
    let model = Arc::new(SnapshotModel::new(70.0).with_muscle("soleus", fixture_state()));
    let probe = build_probe(ProbeConfig::default(), model, vec![MuscleParameter::new("soleus", 0.5, 0.5)]);

    let output = probe.evaluate(0.0).unwrap();
    assert!((output[0] - (FIXTURE_TOTAL + 105.7)).abs() < TOLERANCE);
}

#[test]
fn test_empty_parameter_set_reports_basal_rate() {
    let model = Arc::new(SnapshotModel::new(70.0));
    let probe = build_probe(ProbeConfig::default(), model, vec![]);

    let output = probe.evaluate(0.0).unwrap();
    assert!((output[0] - 105.7).abs() < TOLERANCE);
}

#[test]
fn test_all_terms_disabled_reports_zero() {
    let probe = build_probe(
        ProbeConfig::with_terms(false, false, false, false),
        leg_model(),
        leg_parameters(),
    );

    assert_eq!(probe.evaluate(1.0).unwrap(), vec![0.0]);
}

#[test]
fn test_repeated_evaluation_is_bit_identical() {
    let probe = build_probe(ProbeConfig::default(), leg_model(), leg_parameters());

    let first = probe.evaluate(0.25).unwrap()[0];
    let second = probe.evaluate(0.25).unwrap()[0];
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_parallel_evaluation_matches_sequential() {
    let sequential = build_probe(ProbeConfig::default(), leg_model(), leg_parameters());
    let parallel = build_probe(
        ProbeConfig { parallel_evaluation: true, ..ProbeConfig::default() },
        leg_model(),
        leg_parameters(),
    );

    let a = sequential.evaluate(0.0).unwrap()[0];
    let b = parallel.evaluate(0.0).unwrap()[0];
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_total_is_sum_of_breakdown_in_declaration_order() {
    let probe = build_probe(ProbeConfig::default(), leg_model(), leg_parameters());
    let report = probe.evaluate_breakdown(0.0).unwrap();

    let names: Vec<&str> = report.muscles.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["soleus", "gastroc", "tib_ant"]);

    let expected = report.muscles.iter().fold(0.0, |sum, m| sum + m.total) + report.basal;
    assert_eq!(report.total.to_bits(), expected.to_bits());
}

#[test]
fn test_state_updates_are_read_fresh() {
    let model = Arc::new(SnapshotModel::new(70.0).with_muscle("soleus", fixture_state()));
    let probe = build_probe(
        ProbeConfig::with_terms(false, false, false, true),
        model.clone(),
        vec![MuscleParameter::new("soleus", 0.5, 0.5)],
    );
    assert!((probe.evaluate(0.0).unwrap()[0] - 100.0).abs() < TOLERANCE);

    model.set_state("soleus", MuscleState { fiber_velocity: -0.2, ..fixture_state() });
    assert!((probe.evaluate(0.01).unwrap()[0] - 200.0).abs() < TOLERANCE);
}

#[test]
fn test_floor_policy_is_opt_in() {
    let resting = Arc::new(SnapshotModel::new(70.0).with_muscle("soleus", MuscleState::default()));
    let params = || vec![MuscleParameter::new("soleus", 0.5, 0.5)];

    let unfloored = build_probe(ProbeConfig::with_terms(true, true, false, true), resting.clone(), params());
    assert_eq!(unfloored.evaluate(0.0).unwrap()[0], 0.0);

    let floored = build_probe(
        ProbeConfig {
            floor_policy: FloorPolicy::minimum_total_default(),
            ..ProbeConfig::with_terms(true, true, false, true)
        },
        resting,
        params(),
    );
    assert_eq!(floored.evaluate(0.0).unwrap()[0], 1.0);
}

#[test]
fn test_probe_from_description() {
    let description: metabolic_core::ProbeDescription = toml::from_str(
        r#"
name = "leg_metabolics"

[probe]
basal_rate_on = false

[[muscles]]
name = "soleus"
muscle_mass = 0.5
slow_twitch_ratio = 0.5
"#,
    )
    .unwrap();
    let model = Arc::new(SnapshotModel::new(70.0).with_muscle("soleus", fixture_state()));

    let probe = MetabolicPowerProbe::from_description(&description, model.clone(), model).unwrap();
    assert_eq!(probe.output_labels(), vec!["leg_metabolics".to_string()]);
    assert!((probe.evaluate(0.0).unwrap()[0] - FIXTURE_TOTAL).abs() < TOLERANCE);
}
