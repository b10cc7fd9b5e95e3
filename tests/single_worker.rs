//! Scheduling behavior of /load on the default single-worker runtime.

use std::time::{Duration, Instant};

use diag_server::config::ServerConfig;

mod common;

#[tokio::test]
async fn test_cpu_burn_blocks_concurrent_health_check() {
    let server = common::spawn_server(ServerConfig::default());
    let client = common::client();

    let start = Instant::now();
    let load = tokio::spawn({
        let client = client.clone();
        let url = server.url("/load?cpu=300");
        async move { client.get(url).send().await.unwrap() }
    });

    // Let the burn begin before asking for health.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let health = client.get(server.url("/health")).send().await.unwrap();
    let health_done = start.elapsed();
    assert_eq!(health.status(), 200);

    let load = load.await.unwrap();
    assert_eq!(load.status(), 200);
    let report: serde_json::Value = load.json().await.unwrap();
    assert_eq!(report["cpuTime"], 300);

    assert!(
        health_done >= Duration::from_millis(300),
        "health finished after {health_done:?}, before the burn ended"
    );
}

#[tokio::test]
async fn test_delay_does_not_block_concurrent_health_check() {
    let server = common::spawn_server(ServerConfig::default());
    let client = common::client();

    let start = Instant::now();
    let load = tokio::spawn({
        let client = client.clone();
        let url = server.url("/load?delay=500&cpu=0");
        async move {
            let res = client.get(url).send().await.unwrap();
            (res, start.elapsed())
        }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let health_start = Instant::now();
    let health = client.get(server.url("/health")).send().await.unwrap();
    let health_elapsed = health_start.elapsed();
    assert_eq!(health.status(), 200);

    let (load, load_elapsed) = load.await.unwrap();
    let report: serde_json::Value = load.json().await.unwrap();
    assert_eq!(report["delay"], 500);
    assert_eq!(report["cpuTime"], 0);

    assert!(load_elapsed >= Duration::from_millis(500));
    assert!(
        health_elapsed < Duration::from_millis(300),
        "health took {health_elapsed:?} while a delayed load was pending"
    );
}

#[tokio::test]
async fn test_zero_load_adds_no_latency() {
    let server = common::spawn_server(ServerConfig::default());
    let client = common::client();

    let start = Instant::now();
    let res = client
        .get(server.url("/load?delay=0&cpu=0"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    let report: serde_json::Value = res.json().await.unwrap();
    assert_eq!(report["delay"], 0);
    assert_eq!(report["cpuTime"], 0);
    assert!(elapsed < Duration::from_millis(200), "took {elapsed:?}");
}
