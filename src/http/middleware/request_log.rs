//! Request logging middleware.
//! Records every request before it is dispatched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::http::request::RequestContext;
use crate::http::server::AppState;

/// Log the request line and headers, then hand the request on.
///
/// The captured [`RequestContext`] is stored in the request extensions so
/// handlers see the same timestamp, query and path parameters the log line
/// shows.
pub async fn log_request(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let mut ctx = RequestContext::from_request(&req);
    ctx.bind_route(state.routes.resolve(&ctx.method, ctx.path()));

    tracing::info!(
        timestamp = %ctx.timestamp(),
        method = %ctx.method,
        uri = %ctx.path_and_query(),
        client = %ctx.client(),
        route = %ctx.route_name(),
        request_id = %ctx.request_id.as_deref().unwrap_or("-"),
        "Request received"
    );

    if state.config.observability.log_headers {
        tracing::info!(
            request_id = %ctx.request_id.as_deref().unwrap_or("-"),
            headers = %ctx.header_dump(),
            "Request headers"
        );
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
