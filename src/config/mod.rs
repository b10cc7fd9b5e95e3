//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (ServerConfig::default)
//!     → loader.rs (optional TOML file)
//!     → overrides.rs (environment variables / CLI flags)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with the dispatcher and the lifecycle manager
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults, so a missing value is never an error
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod overrides;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use overrides::ConfigOverrides;
pub use schema::{
    LogFormat, ListenerConfig, ObservabilityConfig, RuntimeConfig, SecretsConfig, ServerConfig,
    BIND_ADDRESS, NO_SECRET_PLACEHOLDER,
};
