//! Error envelopes.
//!
//! # Responsibilities
//! - Turn "no route matched" into a 404 listing the available routes
//! - Turn handler faults (errors and panics) into a 500 carrying the raw message
//! - Log faults before the response leaves
//!
//! # Design Decisions
//! - The raw error text is returned to the caller; this is a diagnostic tool
//!   and callers are expected to see what went wrong

use std::any::Any;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

/// Everything a request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Route {uri} does not exist")]
    RouteNotFound {
        uri: String,
        available_routes: Vec<&'static str>,
    },

    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    #[error("{0}")]
    Fault(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidStatusCode(_) | ApiError::Fault(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundBody {
    error: &'static str,
    message: String,
    available_routes: Vec<&'static str>,
}

#[derive(Serialize)]
struct FaultBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match self {
            ApiError::RouteNotFound {
                available_routes, ..
            } => (
                status,
                Json(NotFoundBody {
                    error: "Not Found",
                    message,
                    available_routes,
                }),
            )
                .into_response(),
            ApiError::InvalidStatusCode(_) | ApiError::Fault(_) => {
                tracing::error!(error = %message, "Handler fault");
                (
                    status,
                    Json(FaultBody {
                        error: "Internal Server Error",
                        message,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Fallback for requests no route table entry accepts.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> ApiError {
    let uri = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    ApiError::RouteNotFound {
        uri,
        available_routes: state.routes.available_routes(),
    }
}

/// Convert a handler panic into a fault response.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Fault(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::capture::LogCapture;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn route_not_found_is_404_with_routes() {
        let response = ApiError::RouteNotFound {
            uri: "/nope?x=1".to_string(),
            available_routes: vec!["GET /"],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Route /nope?x=1 does not exist");
        assert_eq!(json["availableRoutes"], serde_json::json!(["GET /"]));
    }

    #[tokio::test]
    async fn faults_are_500_with_raw_message() {
        let response = ApiError::InvalidStatusCode("abc".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal Server Error");
        assert_eq!(json["message"], "Invalid status code: abc");
    }

    #[test]
    fn only_faults_are_logged_as_errors() {
        let (logs, _guard) = LogCapture::install();

        let _ = ApiError::RouteNotFound {
            uri: "/missing".to_string(),
            available_routes: vec![],
        }
        .into_response();
        assert!(!logs.contents().contains("Handler fault"));

        let _ = panic_response(Box::new("disk on fire"));
        let line = logs.line("Handler fault").expect("fault logged");
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("error=disk on fire"), "{line}");
    }

    #[tokio::test]
    async fn panic_payloads_become_messages() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(body_json(response).await["message"], "boom");

        let response = panic_response(Box::new(String::from("kaboom")));
        assert_eq!(body_json(response).await["message"], "kaboom");

        let response = panic_response(Box::new(42_u8));
        assert_eq!(body_json(response).await["message"], "handler panicked");
    }
}
