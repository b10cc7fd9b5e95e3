//! CPU-burn and delayed-response composition.

use std::collections::HashMap;
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Durations requested through the `/load` query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadParameters {
    pub delay_ms: u64,
    pub cpu_ms: u64,
}

impl LoadParameters {
    /// Read `delay` and `cpu` from decoded query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            delay_ms: parse_millis(query.get("delay").map(String::as_str)),
            cpu_ms: parse_millis(query.get("cpu").map(String::as_str)),
        }
    }
}

/// Result echoed back once both phases completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub message: &'static str,
    pub delay: u64,
    pub cpu_time: u64,
}

/// Parse a millisecond count the way an integer-prefix parser would.
///
/// Leading whitespace is skipped, an optional sign and the following digits
/// are read and the rest is ignored. Missing, non-numeric and negative input
/// all yield 0; values past `u64::MAX` saturate.
pub fn parse_millis(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let s = raw.trim_start();

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() || negative {
        return 0;
    }

    digits.parse().unwrap_or(u64::MAX)
}

/// Spin on meaningless floating point work for at least `duration`.
///
/// This never yields: whichever worker runs it is unavailable until it
/// returns.
pub fn burn_cpu(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        black_box(fastrand::f64().sqrt());
    }
}

/// Run the CPU phase, then the delay phase, and report what was done.
pub async fn simulate(params: LoadParameters) -> LoadReport {
    if params.cpu_ms > 0 {
        tracing::debug!(cpu_ms = params.cpu_ms, "Burning CPU");
        burn_cpu(Duration::from_millis(params.cpu_ms));
    }

    if params.delay_ms > 0 {
        tracing::debug!(delay_ms = params.delay_ms, "Delaying response");
        tokio::time::sleep(Duration::from_millis(params.delay_ms)).await;
    }

    LoadReport {
        message: "Load test completed",
        delay: params.delay_ms,
        cpu_time: params.cpu_ms,
    }
}
