//! Application router integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use bank_services::api;
use bank_services::config::{Config, ServiceKind};
use serde_json::json;
use tower::util::ServiceExt;

mod common;

fn memory_config(services: &str) -> Config {
    let services = services.to_string();
    Config::from_lookup(move |key| match key {
        "BANK_STORAGE" => Some("memory".to_string()),
        "BANK_SERVICES" => Some(services.clone()),
        "APP_NAME" => Some("bank-test".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = api::build_router(&memory_config("all"), None);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_info_lists_mounted_services() {
    let app = api::build_router(&memory_config("history,account"), None);

    let (status, body) = common::send(&app, "GET", "/info", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "bank-test");
    assert_eq!(body["services"], json!(["history", "account"]));
    assert!(body["startedAt"].is_string());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_only_selected_services_are_mounted() {
    let app = api::build_router(&memory_config("history"), None);

    let (status, _) = common::send(&app, "GET", "/api/history/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = common::send(&app, "GET", "/api/account/details/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_every_service_round_trips_in_memory() {
    let app = api::build_router(&memory_config("all"), None);

    let creates = [
        (ServiceKind::Account, "/details", json!({"passportId": 1})),
        (ServiceKind::AntiFraud, "/suspicious/phone-transfer", json!({"phoneTransferId": 2})),
        (ServiceKind::Authorization, "/users", json!({"role": "USER", "password": "pw"})),
        (ServiceKind::History, "", json!({"transferAuditId": 3})),
        (ServiceKind::PublicInfo, "/branch/create", json!({"city": "Tver"})),
    ];

    for (kind, path, body) in creates {
        let uri = format!("{}{}", kind.context_path(), path);
        let (status, created) = common::send(&app, "POST", &uri, Some(body)).await;
        assert!(status.is_success(), "create failed for {}", kind);
        assert_eq!(created["id"], 1, "unexpected id for {}", kind);
    }
}

#[tokio::test]
async fn test_correlation_id_is_returned() {
    let app = api::build_router(&memory_config("history"), None);
    let correlation_id = "2f1c4d8e-6a3b-4f5e-9c7d-0a1b2c3d4e5f";

    let request = Request::builder()
        .uri("/api/history/1")
        .header("X-Correlation-Id", correlation_id)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-correlation-id"], correlation_id);
}
