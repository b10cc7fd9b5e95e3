//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteTable::standard()
//!     → matcher.rs (compile `/status/:code` style patterns)
//!     → http/server.rs mounts each entry on the Axum router
//!
//! Incoming Request (method, path)
//!     → Axum router dispatches to the handler
//!     → table.rs resolve() names the route and binds raw parameters
//!       into the RequestContext for the request log and handlers
//!     → no match → Error Responder (404)
//! ```
//!
//! # Design Decisions
//! - The table is fixed at compile time; there is no route registration API
//! - Static routes are listed before the parametrized one
//! - First match wins
//! - The same table feeds the 404 body and the startup banner

pub mod matcher;
pub mod table;

pub use matcher::{PathPattern, PathParams};
pub use table::{RouteEntry, RouteKind, RouteMatch, RouteTable};
