//! Route handlers.
//!
//! One async function per [`RouteKind`](crate::routing::RouteKind). Handlers
//! read shared state only through [`AppState`]; nothing here mutates it.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::request::RequestContext;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::load::{simulate, LoadParameters, LoadReport};
use crate::system::{self, format_gib, format_hours, format_minutes, ProcessMemory};

const NO_PROXY: &str = "No proxy detected";
const NOT_SET: &str = "Not set";

const CONCEPTS: [&str; 4] = [
    "Containerization with Docker",
    "Reverse proxy with Nginx",
    "Networking between containers",
    "Orchestration with Docker Compose",
];

const NEXT_STEPS: [&str; 4] = [
    "1. Check the logs: docker compose logs -f",
    "2. Inspect the containers: docker ps",
    "3. Try the health check: curl http://localhost/health",
    "4. Edit this code and watch it reload (with volumes)",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub message: &'static str,
    pub project: &'static str,
    pub concepts: [&'static str; 4],
    pub server_info: ServerInfo,
    pub request_info: RequestInfo,
    pub next_steps: [&'static str; 4],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub hostname: String,
    pub platform: &'static str,
    pub runtime_version: &'static str,
    pub pid: u32,
}

/// Headers a fronting reverse proxy is expected to add.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(rename = "realIP")]
    pub real_ip: String,
    pub forwarded_for: String,
    pub forwarded_proto: String,
    pub host: String,
    pub user_agent: String,
}

impl RequestInfo {
    fn from_context(ctx: &RequestContext) -> Self {
        let header = |name: &str, default: &str| ctx.header(name).unwrap_or(default).to_string();
        Self {
            real_ip: header("x-real-ip", NO_PROXY),
            forwarded_for: header("x-forwarded-for", NOT_SET),
            forwarded_proto: header("x-forwarded-proto", NOT_SET),
            host: header("host", NOT_SET),
            user_agent: header("user-agent", NOT_SET),
        }
    }
}

/// `GET /`
pub async fn root(State(state): State<AppState>, ctx: RequestContext) -> Json<RootResponse> {
    let snap = system::snapshot(state.started_at);

    Json(RootResponse {
        message: "Welcome to your first DevOps project!",
        project: "Project 1: Docker + Nginx",
        concepts: CONCEPTS,
        server_info: ServerInfo {
            hostname: snap.hostname,
            platform: snap.platform,
            runtime_version: snap.runtime_version,
            pid: snap.pid,
        },
        request_info: RequestInfo::from_context(&ctx),
        next_steps: NEXT_STEPS,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Process uptime in seconds.
    pub uptime: f64,
    pub environment: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.environment.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub system: HostInfo,
    pub process: ProcessInfo,
    pub secret: SecretInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub hostname: String,
    pub platform: &'static str,
    pub architecture: &'static str,
    pub cpus: usize,
    pub total_memory: String,
    pub free_memory: String,
    pub uptime: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    pub pid: u32,
    pub runtime_version: &'static str,
    pub uptime: String,
    pub memory_usage: ProcessMemory,
}

/// Provisioned secrets, echoed verbatim.
///
/// Returning credentials from a diagnostic endpoint leaks them to anyone who
/// can reach the service. It is kept so that provisioning can be verified
/// end to end; do not expose this route outside a lab network.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretInfo {
    pub database_url: String,
}

/// `GET /info`
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let snap = system::snapshot(state.started_at);

    Json(InfoResponse {
        system: HostInfo {
            hostname: snap.hostname,
            platform: snap.platform,
            architecture: snap.architecture,
            cpus: snap.cpu_count,
            total_memory: format_gib(snap.total_memory_bytes),
            free_memory: format_gib(snap.free_memory_bytes),
            uptime: format_hours(snap.host_uptime_seconds),
        },
        process: ProcessInfo {
            pid: snap.pid,
            runtime_version: snap.runtime_version,
            uptime: format_minutes(snap.process_uptime_seconds),
            memory_usage: snap.process_memory,
        },
        secret: SecretInfo {
            database_url: state.config.database_url().to_string(),
        },
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub requested_status: u16,
    pub message: String,
}

/// Parse a `/status/:code` parameter. Only integers in 100..=599 are accepted.
pub fn parse_status_code(raw: &str) -> Result<StatusCode, ApiError> {
    raw.parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| ApiError::InvalidStatusCode(raw.to_string()))
}

/// `GET /status/:code`
///
/// A segment that does not percent-decode to UTF-8 is reported as the raw
/// segment, so `/status/%FF` is the same fault as `/status/abc`.
///
/// Codes 100..=199 are accepted here, but hyper never sends a 1xx as a
/// final response: over a real connection the client sees a 500 with an
/// empty body. Only callers driving the router in-process observe the
/// 1xx status itself.
pub async fn status(
    ctx: RequestContext,
    code: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let code = match code {
        Ok(Path(code)) => code,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable status segment");
            ctx.path_param("code").unwrap_or_default().to_string()
        }
    };
    let status = parse_status_code(&code)?;

    let body = StatusResponse {
        requested_status: status.as_u16(),
        message: format!("Responding with status code {}", status.as_u16()),
    };
    Ok((status, Json(body)).into_response())
}

/// `GET /load?delay=<ms>&cpu=<ms>`
pub async fn load(ctx: RequestContext) -> Json<LoadReport> {
    let params = LoadParameters::from_query(&ctx.query);
    Json(simulate(params).await)
}
