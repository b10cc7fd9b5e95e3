//! Startup diagnostics.
//!
//! # Responsibilities
//! - Record the effective listening parameters once the socket is bound
//! - Log the startup banner and the endpoint list
//!
//! # Design Decisions
//! - The report is built from the bound socket, not from config, so a
//!   requested port of 0 shows the port actually assigned

use std::net::{IpAddr, SocketAddr};

use crate::config::ServerConfig;
use crate::routing::RouteTable;
use crate::system::RUNTIME_VERSION;

/// Immutable record of how the process came up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub port: u16,
    pub bind_address: IpAddr,
    pub environment: String,
    pub runtime_version: &'static str,
    pub pid: u32,
    pub worker_threads: usize,
    /// `(route, description)` pairs in table order.
    pub endpoints: Vec<(&'static str, &'static str)>,
}

impl StartupReport {
    pub fn new(config: &ServerConfig, routes: &RouteTable, local_addr: SocketAddr) -> Self {
        Self {
            port: local_addr.port(),
            bind_address: local_addr.ip(),
            environment: config.environment.clone(),
            runtime_version: RUNTIME_VERSION,
            pid: std::process::id(),
            worker_threads: config.runtime.worker_threads,
            endpoints: routes
                .entries()
                .iter()
                .map(|e| (e.advertised, e.summary))
                .collect(),
        }
    }

    /// URL an operator on the same host would use.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// Emit the banner.
    pub fn log(&self) {
        tracing::info!(
            url = %self.url(),
            port = self.port,
            bind_address = %self.bind_address,
            environment = %self.environment,
            runtime_version = self.runtime_version,
            pid = self.pid,
            worker_threads = self.worker_threads,
            "Server started"
        );

        for (route, summary) in &self.endpoints {
            tracing::info!(route = *route, "Endpoint available: {summary}");
        }
    }
}
