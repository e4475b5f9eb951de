//! End-to-end tests for the user endpoints.

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

fn unique_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[tokio::test]
async fn test_create_then_fetch() {
    let server = common::start_server().await;
    let client = common::client();
    let id = unique_id();

    let res = client
        .post(server.url("/users"))
        .json(&json!({"id": id, "name": "Ada Lovelace"}))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await.unwrap(), "User created");

    let res = client
        .get(server.url(&format!("/users/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["name"], json!("Ada Lovelace"));

    server.stop().await;
}

#[tokio::test]
async fn test_create_without_name_reads_back_null() {
    let server = common::start_server().await;
    let client = common::client();
    let id = unique_id();

    let res = client
        .post(server.url("/users"))
        .json(&json!({"id": id}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = client
        .get(server.url(&format!("/users/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"id": id, "name": null}));

    server.stop().await;
}

#[tokio::test]
async fn test_fetch_unknown_id_is_404() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url(&format!("/users/{}", unique_id())))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "User not found");

    server.stop().await;
}

#[tokio::test]
async fn test_duplicate_id_overwrites() {
    let server = common::start_server().await;
    let client = common::client();
    let id = unique_id();
    let user_url = server.url(&format!("/users/{}", id));

    for name in ["First", "Second"] {
        let res = client
            .post(server.url("/users"))
            .json(&json!({"id": id, "name": name}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: Value = client.get(&user_url).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["name"], json!(name));
    }
    assert_eq!(server.store.len(), 1);

    server.stop().await;
}

#[tokio::test]
async fn test_store_outage_returns_500_without_crashing() {
    let server = common::start_server().await;
    let client = common::client();
    let id = unique_id();

    server.store.set_online(false);

    let res = client
        .post(server.url("/users"))
        .json(&json!({"id": id, "name": "Ada"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "Internal Server Error");

    let res = client
        .get(server.url(&format!("/users/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Same process keeps serving once the store is back.
    server.store.set_online(true);
    let res = client
        .post(server.url("/users"))
        .json(&json!({"id": id, "name": "Ada"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_creates() {
    let server = common::start_server().await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = server.url("/users");
        tasks.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({"id": format!("user-{}", i), "name": format!("Name {}", i)}))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }
    assert_eq!(server.store.len(), 20);

    let body: Value = client
        .get(server.url("/users/user-7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["name"], json!("Name 7"));

    server.stop().await;
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/users/anyone"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    server.stop().await;
}
