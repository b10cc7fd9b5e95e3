//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (worker threads > 0)
//! - Reject labels that would render as empty strings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use tracing_subscriber::EnvFilter;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("runtime.worker_threads must be at least 1")]
    ZeroWorkerThreads,

    #[error("environment label must not be empty")]
    EmptyEnvironment,

    #[error("observability.log_level is not a valid filter: {0}")]
    InvalidLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.runtime.worker_threads == 0 {
        errors.push(ValidationError::ZeroWorkerThreads);
    }

    if config.environment.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvironment);
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
