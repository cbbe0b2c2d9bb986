// src/config/loader.rs
//! Probe description loader with layered files and environment overrides

use crate::config::{constants::paths, ProbeDescription};
use crate::error::{serialization_error, MetabolicError, MetabolicResult};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a [`ProbeDescription`] from TOML files merged in order of precedence
///
/// Later files override earlier ones key by key. Environment variables with
/// the `METABOLIC_` prefix override single scalar values; nested keys are
/// separated by a double underscore, so `METABOLIC_PROBE__SCALING_FACTOR=1.2`
/// sets `probe.scaling_factor`.
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    current: RwLock<ProbeDescription>,
}

impl ConfigLoader {
    /// Create new loader over the default file locations
    pub fn new() -> Self {
        Self::with_paths(vec![
            PathBuf::from(paths::DEFAULT_CONFIG_FILE),
            PathBuf::from(paths::LOCAL_CONFIG_FILE),
        ])
    }

    /// Create loader with custom paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            current: RwLock::new(ProbeDescription::default()),
        }
    }

    /// Load, merge and validate the probe description
    pub fn load(&mut self) -> MetabolicResult<ProbeDescription> {
        let description = self.load_and_merge()?;
        *self.current.write() = description.clone();
        Ok(description)
    }

    /// Most recently loaded description
    pub fn current(&self) -> ProbeDescription {
        self.current.read().clone()
    }

    /// Validate a single file without loading it
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> MetabolicResult<()> {
        let path = path.as_ref();
        let value = Self::read_file(path)?;
        let description = Self::deserialize(value, path)?;
        Self::validate(&description)
    }

    /// Export current description to file
    pub fn export<P: AsRef<Path>>(&self, path: P) -> MetabolicResult<()> {
        let path = path.as_ref();
        let content =
            toml::to_string_pretty(&self.current()).map_err(|e| serialization_error("probe description", e))?;
        std::fs::write(path, content).map_err(|e| load_error(path, e))
    }

    fn load_and_merge(&self) -> MetabolicResult<ProbeDescription> {
        let defaults = toml::Value::try_from(ProbeDescription::default())
            .map_err(|e| serialization_error("default probe description", e))?;
        let mut merged = toml::Value::Table(toml::value::Table::new());
        merge_values(&mut merged, defaults);

        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "merging probe description");
            merge_values(&mut merged, Self::read_file(path)?);
        }

        apply_environment_overrides(&mut merged, std::env::vars());

        let description = Self::deserialize(merged, Path::new("<merged>"))?;
        Self::validate(&description)?;
        Ok(description)
    }

    fn read_file(path: &Path) -> MetabolicResult<toml::Value> {
        let content = std::fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        toml::from_str(&content).map_err(|e| load_error(path, e))
    }

    fn deserialize(value: toml::Value, origin: &Path) -> MetabolicResult<ProbeDescription> {
        value.try_into().map_err(|e| load_error(origin, e))
    }

    fn validate(description: &ProbeDescription) -> MetabolicResult<()> {
        description
            .probe
            .validate_consistency()
            .map_err(MetabolicError::Validation)?;
        description.parameter_set().map(|_| ())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_error(path: &Path, err: impl std::fmt::Display) -> MetabolicError {
    MetabolicError::Load {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(base_value) => merge_values(base_value, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base_value, overlay_value) => *base_value = overlay_value,
    }
}

fn apply_environment_overrides(config: &mut toml::Value, vars: impl Iterator<Item = (String, String)>) {
    for (key, value) in vars {
        if let Some(stripped) = key.strip_prefix(paths::ENV_PREFIX) {
            let config_key = stripped.to_lowercase().replace("__", ".");
            debug!(key = %config_key, "environment override");
            set_nested_value(config, &config_key, parse_env_value(&value));
        }
    }
}

fn parse_env_value(value: &str) -> toml::Value {
    if let Ok(bool_val) = value.parse::<bool>() {
        toml::Value::Boolean(bool_val)
    } else if let Ok(float_val) = value.parse::<f64>() {
        // Probe constants are all floating point, so integers are widened
        toml::Value::Float(float_val)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn set_nested_value(config: &mut toml::Value, path: &str, value: toml::Value) {
    let mut parts = path.split('.').peekable();
    let mut current = config;

    while let Some(part) = parts.next() {
        let toml::Value::Table(table) = current else {
            return;
        };
        if parts.peek().is_none() {
            table.insert(part.to_string(), value);
            return;
        }
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
    }
}
