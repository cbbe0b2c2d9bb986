// tests/config_loading_tests.rs
//! Probe description loading from layered TOML files and the environment

use metabolic_core::error::ErrorKind;
use metabolic_core::{ConfigLoader, FloorPolicy};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_toml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

const BASE: &str = r#"
name = "gait_metabolics"

[probe]
scaling_factor = 1.5
basal_rate_on = false

[[muscles]]
name = "soleus"
muscle_mass = 0.4
slow_twitch_ratio = 0.8

[[muscles]]
name = "gastroc"
muscle_mass = 0.3
slow_twitch_ratio = 0.5
"#;

#[test]
#[serial]
fn test_load_single_file() {
    let file = write_toml(BASE);
    let mut loader = ConfigLoader::with_paths(vec![file.path().to_path_buf()]);

    let description = loader.load().unwrap();
    assert_eq!(description.name, "gait_metabolics");
    assert_eq!(description.probe.scaling_factor, 1.5);
    assert!(!description.probe.basal_rate_on);
    assert!(description.probe.shortening_rate_on);
    assert_eq!(description.probe.basal_coefficient, 1.51);
    assert_eq!(description.muscles.len(), 2);
    assert_eq!(loader.current(), description);
}

#[test]
#[serial]
fn test_later_files_override_earlier_ones() {
    let base = write_toml(BASE);
    let local = write_toml(
        r#"
[probe]
scaling_factor = 2.0
floor_policy = { mode = "minimum_total", rate = 1.0 }
"#,
    );
    let mut loader = ConfigLoader::with_paths(vec![base.path().to_path_buf(), local.path().to_path_buf()]);

    let description = loader.load().unwrap();
    assert_eq!(description.probe.scaling_factor, 2.0);
    assert!(!description.probe.basal_rate_on);
    assert_eq!(description.probe.floor_policy, FloorPolicy::MinimumTotal { rate: 1.0 });
    assert_eq!(description.muscles.len(), 2);
}

#[test]
#[serial]
fn test_environment_override() {
    let file = write_toml(BASE);
    std::env::set_var("METABOLIC_PROBE__BASAL_EXPONENT", "0.75");
    std::env::set_var("METABOLIC_PROBE__BASAL_RATE_ON", "true");

    let mut loader = ConfigLoader::with_paths(vec![file.path().to_path_buf()]);
    let result = loader.load();

    std::env::remove_var("METABOLIC_PROBE__BASAL_EXPONENT");
    std::env::remove_var("METABOLIC_PROBE__BASAL_RATE_ON");

    let description = result.unwrap();
    assert_eq!(description.probe.basal_exponent, 0.75);
    assert!(description.probe.basal_rate_on);
}

#[test]
#[serial]
fn test_malformed_file_is_load_error() {
    let file = write_toml("[probe\nscaling_factor = ");
    let mut loader = ConfigLoader::with_paths(vec![file.path().to_path_buf()]);

    let err = loader.load().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
}

#[test]
#[serial]
fn test_invalid_floor_rate_is_validation_error() {
    let file = write_toml(
        r#"
[probe]
floor_policy = { mode = "minimum_total", rate = -1.0 }
"#,
    );
    let loader = ConfigLoader::with_paths(vec![]);

    let err = loader.validate_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
#[serial]
fn test_duplicate_muscles_rejected_on_load() {
    let file = write_toml(
        r#"
[[muscles]]
name = "soleus"
muscle_mass = 0.4
slow_twitch_ratio = 0.8

[[muscles]]
name = "soleus"
muscle_mass = 0.5
slow_twitch_ratio = 0.8
"#,
    );
    let loader = ConfigLoader::with_paths(vec![]);

    let err = loader.validate_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
#[serial]
fn test_export_round_trips_through_loader() {
    let source = write_toml(BASE);
    let mut loader = ConfigLoader::with_paths(vec![source.path().to_path_buf()]);
    let loaded = loader.load().unwrap();

    let exported = NamedTempFile::new().unwrap();
    loader.export(exported.path()).unwrap();

    let mut reloaded = ConfigLoader::with_paths(vec![exported.path().to_path_buf()]);
    assert_eq!(reloaded.load().unwrap(), loaded);
}
