//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::mpsc;

use diag_server::config::ServerConfig;
use diag_server::http::HttpServer;
use diag_server::lifecycle::{build_runtime, LifecycleManager, Shutdown, ShutdownTrigger};
use tokio::net::TcpListener;

/// A server running on its own thread and runtime, built from the config's
/// `runtime` section exactly as `main` builds it.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger(ShutdownTrigger::Interrupt);
    }
}

/// Start a server on an ephemeral loopback port.
pub fn spawn_server(config: ServerConfig) -> TestServer {
    let (addr_tx, addr_rx) = mpsc::channel();
    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();

    std::thread::spawn(move || {
        let runtime = build_runtime(&config.runtime).unwrap();
        runtime.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            addr_tx.send(listener.local_addr().unwrap()).unwrap();

            let lifecycle = LifecycleManager::new();
            let _ = lifecycle
                .serve_until(HttpServer::new(config), listener, signalled)
                .await;
        });
    });

    TestServer {
        addr: addr_rx.recv().unwrap(),
        shutdown,
    }
}

/// A client that opens a fresh connection per request.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
