//! System snapshot collection.

use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, System};

/// Version string reported as the service runtime.
pub const RUNTIME_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Reported when the host name cannot be read.
pub const UNKNOWN_HOSTNAME: &str = "unknown";

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Resident and virtual memory of the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMemory {
    pub rss: u64,
    pub virtual_memory: u64,
}

/// Point-in-time view of the host and of this process.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub hostname: String,
    pub platform: &'static str,
    pub architecture: &'static str,
    pub cpu_count: usize,
    pub total_memory_bytes: u64,
    pub free_memory_bytes: u64,
    pub host_uptime_seconds: u64,
    pub pid: u32,
    pub runtime_version: &'static str,
    pub process_uptime_seconds: f64,
    pub process_memory: ProcessMemory,
}

/// Read the current host and process state.
///
/// `started_at` is the instant the process began serving; process uptime is
/// measured from it.
pub fn snapshot(started_at: Instant) -> SystemSnapshot {
    let pid = std::process::id();

    let mut sys = System::new();
    sys.refresh_memory();

    let process_memory = if sys.refresh_process(Pid::from_u32(pid)) {
        sys.process(Pid::from_u32(pid))
            .map(|p| ProcessMemory {
                rss: p.memory(),
                virtual_memory: p.virtual_memory(),
            })
            .unwrap_or_default()
    } else {
        ProcessMemory::default()
    };

    SystemSnapshot {
        hostname: System::host_name().unwrap_or_else(|| UNKNOWN_HOSTNAME.to_string()),
        platform: std::env::consts::OS,
        architecture: std::env::consts::ARCH,
        cpu_count: num_cpus::get(),
        total_memory_bytes: sys.total_memory(),
        // Memory the kernel can hand out without swapping, not just idle pages.
        free_memory_bytes: sys.available_memory(),
        host_uptime_seconds: System::uptime(),
        pid,
        runtime_version: RUNTIME_VERSION,
        process_uptime_seconds: started_at.elapsed().as_secs_f64(),
        process_memory,
    }
}

/// Bytes as gibibytes with two decimals, e.g. `"15.54 GB"`.
pub fn format_gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GIB)
}

/// Seconds as hours with two decimals.
pub fn format_hours(seconds: u64) -> String {
    format!("{:.2} hours", seconds as f64 / 3600.0)
}

/// Seconds as minutes with two decimals.
pub fn format_minutes(seconds: f64) -> String {
    format!("{:.2} minutes", seconds / 60.0)
}
