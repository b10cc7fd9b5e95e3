//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router from the route table
//! - Wire up middleware (request ID, tracing, request log, panic containment)
//! - Route unmatched requests to the 404 responder
//! - Bind server to listener

use axum::{
    middleware,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::http::middleware::log_request;
use crate::http::request::UuidRequestId;
use crate::http::response::{self, not_found};
use crate::routing::{RouteEntry, RouteKind, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub routes: Arc<RouteTable>,
    /// When the process started serving; process uptime is measured from here.
    pub started_at: Instant,
}

/// HTTP server for the diagnostic service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
    routes: Arc<RouteTable>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_start_time(config, Instant::now())
    }

    /// Create a server whose uptime is counted from `started_at`.
    pub fn with_start_time(config: ServerConfig, started_at: Instant) -> Self {
        let config = Arc::new(config);
        let routes = Arc::new(RouteTable::standard());

        let state = AppState {
            config: config.clone(),
            routes: routes.clone(),
            started_at,
        };

        let router = Self::build_router(&routes, state);
        Self {
            router,
            config,
            routes,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(routes: &RouteTable, state: AppState) -> Router {
        let router = routes
            .entries()
            .iter()
            .fold(Router::new(), |router, entry| {
                router.route(&entry.pattern.axum_path(), method_router(entry))
            });

        router
            .fallback(not_found)
            .layer(CatchPanicLayer::custom(response::panic_response))
            .layer(middleware::from_fn_with_state(state.clone(), log_request))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
            .with_state(state)
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns only if accepting fails; stopping is the lifecycle manager's job.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::debug!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app).await
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

/// Bind a route table entry to its handler. Methods the entry does not
/// accept fall through to the 404 responder, not a 405.
fn method_router(entry: &RouteEntry) -> MethodRouter<AppState> {
    let filter = MethodFilter::try_from(entry.method.clone()).unwrap_or(MethodFilter::GET);

    let router = match entry.kind {
        RouteKind::Root => on(filter, handlers::root),
        RouteKind::Health => on(filter, handlers::health),
        RouteKind::Info => on(filter, handlers::info),
        RouteKind::Status => on(filter, handlers::status),
        RouteKind::Load => on(filter, handlers::load),
    };
    router.fallback(not_found)
}
