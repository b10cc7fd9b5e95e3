//! Diagnostic HTTP service library.
//!
//! Reports health, environment and host metrics, and synthesizes CPU-bound
//! and latency-bound load on demand.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod load;
pub mod observability;
pub mod routing;
pub mod system;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::{LifecycleManager, Shutdown};
