//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::overrides::ConfigOverrides;
use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file into a configuration, without validating it.
pub fn read_config_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the effective configuration.
///
/// Starts from the built-in defaults, replaces them with the TOML file named
/// by the overrides (if any), applies the remaining overrides and validates
/// the result.
pub fn load_config(overrides: ConfigOverrides) -> Result<ServerConfig, ConfigError> {
    let base = match overrides.config_file.as_deref() {
        Some(path) => read_config_file(path)?,
        None => ServerConfig::default(),
    };

    let config = overrides.apply(base);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
