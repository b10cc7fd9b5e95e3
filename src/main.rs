//! Diagnostic HTTP Service (v1)
//!
//! Used to exercise a containerized deployment behind a reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                    DIAG SERVER                       │
//!                      │                                                      │
//!   Client Request     │  ┌──────────┐   ┌────────────┐   ┌──────────────┐    │
//!   ───────────────────┼─▶│ request  │──▶│  request   │──▶│    route     │    │
//!                      │  │ id/trace │   │   logger   │   │  dispatcher  │    │
//!                      │  └──────────┘   └────────────┘   └──────┬───────┘    │
//!                      │                                         │            │
//!                      │            ┌────────────────┬───────────┴──┐         │
//!                      │            ▼                ▼              ▼         │
//!                      │     ┌────────────┐   ┌────────────┐  ┌──────────┐    │
//!                      │     │  system    │   │    load    │  │  error   │    │
//!                      │     │  snapshot  │   │ simulator  │  │responder │    │
//!                      │     └────────────┘   └────────────┘  └──────────┘    │
//!   Client Response    │                                                      │
//!   ◀──────────────────┼────────────── JSON envelope ◀─────────────────────     │
//!                      │                                                      │
//!                      │  ┌────────────────────────────────────────────────┐  │
//!                      │  │ Cross-Cutting: config, observability, lifecycle│  │
//!                      │  └────────────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use clap::Parser;
use tokio::net::TcpListener;

use diag_server::config::{load_config, ConfigOverrides, ServerConfig};
use diag_server::http::HttpServer;
use diag_server::lifecycle::{build_runtime, wait_for_shutdown, LifecycleManager, Shutdown};
use diag_server::observability::logging;

#[derive(Parser)]
#[command(name = "diag-server", version)]
#[command(about = "Diagnostic HTTP service: health, host metrics and synthetic load", long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let started_at = Instant::now();
    let cli = Cli::parse();

    let config = load_config(cli.overrides)?;
    logging::init(&config.observability)?;

    tracing::info!(
        bind_address = %config.bind_address(),
        environment = %config.environment,
        worker_threads = config.runtime.worker_threads,
        "Configuration loaded"
    );

    let runtime = build_runtime(&config.runtime)?;
    runtime.block_on(run(config, started_at))
}

async fn run(config: ServerConfig, started_at: Instant) -> Result<(), Box<dyn std::error::Error>> {
    let lifecycle = LifecycleManager::new();

    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let trigger = wait_for_shutdown().await;
        shutdown.trigger(trigger);
    });

    let listener = TcpListener::bind(config.bind_address()).await?;
    let server = HttpServer::with_start_time(config, started_at);

    lifecycle.serve_until(server, listener, signalled).await?;

    // Exit without waiting for in-flight requests.
    lifecycle.terminate()
}
