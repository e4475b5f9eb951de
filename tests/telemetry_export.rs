//! Requests keep being served while spans are exported to a collector that
//! is not running.

use reqwest::StatusCode;
use serde_json::json;
use std::net::{Ipv4Addr, TcpListener};
use std::time::Duration;

use user_service::config::{ObservabilityConfig, TelemetryConfig};
use user_service::observability::{init_logging, Telemetry};

mod common;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An endpoint on a port nothing listens on.
fn absent_collector() -> String {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_requests_complete_without_collector() {
    let telemetry = Telemetry::init(&TelemetryConfig {
        endpoint: absent_collector(),
        export_timeout_secs: 2,
        ..TelemetryConfig::default()
    })
    .unwrap();
    assert!(telemetry.is_enabled());
    init_logging(&ObservabilityConfig::default(), telemetry.tracer()).unwrap();

    let server = common::start_server().await;
    let client = common::client();

    for i in 0..5 {
        let id = format!("otel-{}", i);

        let res = tokio::time::timeout(
            REQUEST_TIMEOUT,
            client
                .post(server.url("/users"))
                .json(&json!({"id": id, "name": "Ada"}))
                .send(),
        )
        .await
        .expect("POST did not complete")
        .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = tokio::time::timeout(
            REQUEST_TIMEOUT,
            client.get(server.url(&format!("/users/{}", id))).send(),
        )
        .await
        .expect("GET did not complete")
        .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    server.stop().await;
    tokio::task::spawn_blocking(move || telemetry.shutdown())
        .await
        .unwrap();
}
