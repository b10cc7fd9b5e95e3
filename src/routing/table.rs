//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered route bindings
//! - Look up the matching route for a method and path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over five entries, static patterns first
//! - Explicit no-match rather than silent default

use axum::http::Method;

use crate::routing::matcher::{PathParams, PathPattern};

/// The handler a route is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Root,
    Health,
    Info,
    Status,
    Load,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Root => "root",
            RouteKind::Health => "health",
            RouteKind::Info => "info",
            RouteKind::Status => "status",
            RouteKind::Load => "load",
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (method, pattern) → handler binding.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: PathPattern,
    pub kind: RouteKind,
    /// How the route is advertised to clients, e.g. `GET /status/:code`.
    pub advertised: &'static str,
    /// One-line description for the startup banner.
    pub summary: &'static str,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub kind: RouteKind,
    pub params: PathParams,
}

/// Ordered set of route bindings, evaluated first-match.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// The service's fixed set of routes.
    pub fn standard() -> Self {
        let entry = |pattern: &'static str,
                     kind: RouteKind,
                     advertised: &'static str,
                     summary: &'static str| RouteEntry {
            method: Method::GET,
            pattern: PathPattern::new(pattern),
            kind,
            advertised,
            summary,
        };

        Self {
            entries: vec![
                entry("/", RouteKind::Root, "GET /", "Project information"),
                entry("/health", RouteKind::Health, "GET /health", "Health check"),
                entry("/info", RouteKind::Info, "GET /info", "System information"),
                entry(
                    "/load",
                    RouteKind::Load,
                    "GET /load?delay=1000&cpu=500",
                    "Simulate load (query params: delay, cpu)",
                ),
                // Parametrized routes go last so static routes always win.
                entry(
                    "/status/:code",
                    RouteKind::Status,
                    "GET /status/:code",
                    "Respond with any HTTP status",
                ),
            ],
        }
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Find the first entry matching `method` and `path`.
    ///
    /// `HEAD` is answered by `GET` routes.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.entries
            .iter()
            .filter(|e| e.method == *method || (*method == Method::HEAD && e.method == Method::GET))
            .find_map(|e| {
                e.pattern.matches(path).map(|params| RouteMatch {
                    kind: e.kind,
                    params,
                })
            })
    }

    /// Routes as listed in the 404 body, in documentation order.
    pub fn available_routes(&self) -> Vec<&'static str> {
        let mut routes: Vec<_> = self.entries.iter().map(|e| e.advertised).collect();
        routes.sort_by_key(|r| DOC_ORDER.iter().position(|d| d == r));
        routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

const DOC_ORDER: [&str; 5] = [
    "GET /",
    "GET /health",
    "GET /info",
    "GET /status/:code",
    "GET /load?delay=1000&cpu=500",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_static_routes() {
        let table = RouteTable::standard();
        for (path, kind) in [
            ("/", RouteKind::Root),
            ("/health", RouteKind::Health),
            ("/info", RouteKind::Info),
            ("/load", RouteKind::Load),
        ] {
            let m = table.resolve(&Method::GET, path).unwrap();
            assert_eq!(m.kind, kind, "path {path}");
            assert!(m.params.is_empty());
        }
    }

    #[test]
    fn test_binds_status_code() {
        let table = RouteTable::standard();
        let m = table.resolve(&Method::GET, "/status/503").unwrap();
        assert_eq!(m.kind, RouteKind::Status);
        assert_eq!(m.params, vec![("code", "503".to_string())]);
    }

    #[test]
    fn test_no_match() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve(&Method::GET, "/nope"), None);
        assert_eq!(table.resolve(&Method::POST, "/health"), None);
        assert_eq!(table.resolve(&Method::GET, "/status"), None);
    }

    #[test]
    fn test_trailing_and_doubled_slashes_are_not_routes() {
        let table = RouteTable::standard();
        for path in ["/health/", "//health", "/info/", "/status/", "/status/200/", "//"] {
            assert_eq!(table.resolve(&Method::GET, path), None, "path {path}");
        }
    }

    #[test]
    fn test_head_uses_get_routes() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve(&Method::HEAD, "/health").map(|m| m.kind),
            Some(RouteKind::Health)
        );
    }

    #[test]
    fn test_static_routes_precede_parametrized() {
        let table = RouteTable::standard();
        let first_param = table
            .entries()
            .iter()
            .position(|e| !e.pattern.is_static())
            .unwrap();
        assert!(table.entries()[first_param..]
            .iter()
            .all(|e| !e.pattern.is_static()));
    }

    #[test]
    fn test_available_routes_listing() {
        assert_eq!(RouteTable::standard().available_routes(), DOC_ORDER.to_vec());
    }
}
