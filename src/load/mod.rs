//! Synthetic load generation.
//!
//! # Data Flow
//! ```text
//! /load?delay=..&cpu=..
//!     → LoadParameters::from_query (lenient integer parsing)
//!     → simulator.rs
//!         1. burn_cpu (blocking busy loop, never yields)
//!         2. tokio::time::sleep (yields the worker)
//!     → LoadReport
//! ```
//!
//! # Design Decisions
//! - The CPU phase never yields its worker; on a current-thread runtime
//!   every other request waits for it
//! - The delay phase is a plain future: dropping it cancels the wait
//! - Bad input never fails, it coerces to 0

pub mod simulator;

pub use simulator::{burn_cpu, parse_millis, simulate, LoadParameters, LoadReport};
