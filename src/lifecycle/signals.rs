//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT and SIGTERM
//! - Report which one arrived first
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Both signals lead to the same immediate exit

use std::fmt;

/// The external event that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownTrigger {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM, as sent by container runtimes.
    Terminate,
}

impl fmt::Display for ShutdownTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownTrigger::Interrupt => f.write_str("SIGINT"),
            ShutdownTrigger::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Wait for the first termination signal.
///
/// If a handler cannot be installed the failure is logged and that signal
/// is simply never reported.
pub async fn wait_for_shutdown() -> ShutdownTrigger {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => ShutdownTrigger::Interrupt,
        _ = terminate => ShutdownTrigger::Terminate,
    }
}
