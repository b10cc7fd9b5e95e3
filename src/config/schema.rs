//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// The server always binds the wildcard address; only the port is configurable.
pub const BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Reported in `/info` when no secret was provisioned.
pub const NO_SECRET_PLACEHOLDER: &str = "No secret found";

/// Root configuration for the diagnostic server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Environment label reported by `/health` and the startup banner.
    pub environment: String,

    /// Listener configuration (port).
    pub listener: ListenerConfig,

    /// Secret values exposed by `/info`.
    pub secrets: SecretsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Async runtime settings.
    pub runtime: RuntimeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            listener: ListenerConfig::default(),
            secrets: SecretsConfig::default(),
            observability: ObservabilityConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Socket address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(BIND_ADDRESS, self.listener.port)
    }

    /// The configured database URL, or the placeholder when unset.
    pub fn database_url(&self) -> &str {
        self.secrets
            .database_url
            .as_deref()
            .unwrap_or(NO_SECRET_PLACEHOLDER)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Secrets provisioned through the environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SecretsConfig {
    /// Database connection string.
    pub database_url: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directives, used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,

    /// Dump all request headers for every request.
    pub log_headers: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "diag_server=info,tower_http=info".to_string(),
            log_format: LogFormat::Pretty,
            log_headers: true,
        }
    }
}

/// Async runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Number of worker threads. `1` selects a current-thread runtime, which
    /// makes a CPU burn stall every other request.
    pub worker_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { worker_threads: 1 }
    }
}
