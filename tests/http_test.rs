//! HTTP boundary tests against a live server.

use std::time::Duration;

use controller_router::app;
use controller_router::config::DiscoveryConfig;
use controller_router::http::server::{NOT_FOUND_BODY, SERVER_ERROR_BODY};
use controller_router::http::X_REQUEST_ID;

mod common;

#[tokio::test]
async fn test_serves_demo_routes() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let (addr, shutdown) = common::spawn_server(router).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("http://{addr}/user/2")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key(X_REQUEST_ID));
    let user: serde_json::Value = response.json().await.unwrap();
    assert_eq!(user["name"], "Bob");

    let response = client.get(format!("http://{addr}/nope")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.text().await.unwrap(),
        "Route /nope with method GET not found."
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_query_string_is_not_part_of_path() {
    let router = app::bootstrap(&DiscoveryConfig::default()).unwrap();
    let (addr, shutdown) = common::spawn_server(router).await;

    let response = reqwest::get(format!("http://{addr}/user/3?verbose=1")).await.unwrap();
    let user: serde_json::Value = response.json().await.unwrap();
    assert_eq!(user["name"], "Charlie");

    shutdown.trigger();
}

#[tokio::test]
async fn test_errors_map_to_status_codes() {
    let (addr, shutdown) = common::spawn_server(common::blog_router()).await;
    let client = reqwest::Client::new();

    let response = client.post(format!("http://{addr}/submit")).send().await.unwrap();
    assert_eq!(response.status(), 201);
    assert_eq!(response.text().await.unwrap(), "created");

    let response = client.get(format!("http://{addr}/missing")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), NOT_FOUND_BODY);

    let response = client.get(format!("http://{addr}/broken")).send().await.unwrap();
    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), SERVER_ERROR_BODY);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (addr, shutdown) = common::spawn_server(common::blog_router()).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/serial"))
        .header(X_REQUEST_ID, "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()[X_REQUEST_ID], "req-42");

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let (addr, shutdown) = common::spawn_server(common::blog_router()).await;
    assert_eq!(shutdown.trigger(), 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let result = reqwest::Client::new()
        .get(format!("http://{addr}/serial"))
        .timeout(Duration::from_secs(1))
        .send()
        .await;
    assert!(result.is_err());
}
