//! Async runtime construction.
//!
//! One worker thread (the default) builds a current-thread runtime. All
//! requests then share a single thread, and a CPU burn in one request
//! stalls every other request until it finishes. More workers build a
//! multi-thread runtime where a burn occupies only its own worker.

use tokio::runtime::{Builder, Runtime};

use crate::config::RuntimeConfig;

pub fn build_runtime(config: &RuntimeConfig) -> std::io::Result<Runtime> {
    if config.worker_threads <= 1 {
        Builder::new_current_thread().enable_all().build()
    } else {
        Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .enable_all()
            .build()
    }
}
