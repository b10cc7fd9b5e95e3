//! Request capture and identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Capture an immutable RequestContext for logging and handlers
//! - Carry the matched route and its raw path parameters
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The context is captured once by the request logger and reused by
//!   handlers through request extensions

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Query};
use axum::http::{request::Parts, Extensions, HeaderMap, HeaderValue, Method, Request, Uri};
use chrono::{DateTime, SecondsFormat, Utc};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::{PathParams, RouteKind, RouteMatch};

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Assigns a fresh UUID v4 to requests arriving without an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Everything known about a request when it arrives.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub client_addr: Option<SocketAddr>,
    pub received_at: DateTime<Utc>,
    pub request_id: Option<String>,
    /// Route the path resolved to, `None` when no route matched.
    pub route: Option<RouteKind>,
    /// Path parameters as sent, still percent-encoded.
    pub path_params: PathParams,
}

impl RequestContext {
    /// Capture a context from a full request.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::capture(
            request.method(),
            request.uri(),
            request.headers(),
            request.extensions(),
        )
    }

    /// Capture a context from request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::capture(&parts.method, &parts.uri, &parts.headers, &parts.extensions)
    }

    fn capture(method: &Method, uri: &Uri, headers: &HeaderMap, extensions: &Extensions) -> Self {
        let query = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        Self {
            method: method.clone(),
            uri: uri.clone(),
            query,
            headers: headers.clone(),
            client_addr: extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
            received_at: Utc::now(),
            request_id: headers
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            route: None,
            path_params: PathParams::new(),
        }
    }

    /// Record the route table's verdict for this request.
    pub fn bind_route(&mut self, matched: Option<RouteMatch>) {
        match matched {
            Some(m) => {
                self.route = Some(m.kind);
                self.path_params = m.params;
            }
            None => {
                self.route = None;
                self.path_params.clear();
            }
        }
    }

    /// Route name for logs, `unmatched` when no route matched.
    pub fn route_name(&self) -> &'static str {
        self.route.map(|kind| kind.as_str()).unwrap_or("unmatched")
    }

    /// Raw value of a bound path parameter.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Path plus query string, as the client sent it.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| self.uri.path())
    }

    /// Header value as text; header names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Client address for display, `unknown` when not recorded.
    pub fn client(&self) -> String {
        self.client_addr
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn timestamp(&self) -> String {
        self.received_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// All headers as a pretty-printed JSON object with lower-case keys.
    /// Repeated headers are joined with `", "`.
    pub fn header_dump(&self) -> String {
        let mut dump: BTreeMap<&str, String> = BTreeMap::new();
        for (name, value) in &self.headers {
            let value = String::from_utf8_lossy(value.as_bytes());
            dump.entry(name.as_str())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        serde_json::to_string_pretty(&dump).unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| RequestContext::from_parts(parts)))
    }
}
