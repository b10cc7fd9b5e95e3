//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (env filter + fmt layer)
//!     → stdout, pretty or JSON
//!
//! Per request:
//!     → x-request-id assigned at the edge
//!     → tower-http TraceLayer span (latency, status)
//!     → request log line and header dump
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through request log, trace span and response header
//! - Nothing is exported to an external collector

pub mod logging;
