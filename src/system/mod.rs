//! Host and process metrics.
//!
//! # Data Flow
//! ```text
//! handler (/, /info)
//!     → snapshot.rs (fresh read through sysinfo / num_cpus)
//!     → SystemSnapshot (raw bytes and seconds)
//!     → format_* helpers (human units for presentation)
//! ```
//!
//! # Design Decisions
//! - Nothing is cached: every call reads the current state
//! - Collection never fails; unavailable metrics become sentinels

pub mod snapshot;

pub use snapshot::{
    format_gib, format_hours, format_minutes, snapshot, ProcessMemory, SystemSnapshot,
    RUNTIME_VERSION, UNKNOWN_HOSTNAME,
};
