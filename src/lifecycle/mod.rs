//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs, runtime.rs):
//!     Load config → Build runtime → Bind listener → Log StartupReport
//!
//! Serving (manager.rs):
//!     Starting → Listening
//!
//! Shutdown (signals.rs, shutdown.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!     → Listening → ShuttingDown → Stopped → process exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then runtime, then listener
//! - Shutdown does not drain: in-flight requests are dropped with the process
//! - State transitions are checked; an illegal one is an error, not a no-op

pub mod manager;
pub mod runtime;
pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use manager::LifecycleManager;
pub use runtime::build_runtime;
pub use shutdown::Shutdown;
pub use signals::{wait_for_shutdown, ShutdownTrigger};
pub use startup::StartupReport;
pub use state::{LifecycleError, LifecycleState};
