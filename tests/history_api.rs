//! History API integration tests

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use bank_services::crud::InMemoryRepository;
use bank_services::history::{self, History, HistoryRepositories};
use serde_json::json;

mod common;

fn history(id: i64, transfer_audit_id: i64) -> History {
    History {
        id: Some(id),
        transfer_audit_id: Some(transfer_audit_id),
        account_audit_id: Some(100 + id),
        ..History::default()
    }
}

fn app(rows: Vec<History>) -> (Arc<InMemoryRepository<History>>, Router) {
    let repository = Arc::new(InMemoryRepository::with_rows(rows));
    let router = Router::new().nest(
        "/api/history",
        history::router(HistoryRepositories {
            history: repository.clone(),
        }),
    );
    (repository, router)
}

#[tokio::test]
async fn test_get_by_id() {
    let (_, app) = app(vec![history(1, 11)]);

    let (status, body) = common::send(&app, "GET", "/api/history/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["transferAuditId"], 11);
    assert_eq!(body["accountAuditId"], 101);
    assert!(body["profileAuditId"].is_null());
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let (_, app) = app(vec![]);

    let (status, body) = common::send(&app, "GET", "/api/history/42", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "not_found");
    assert_eq!(body["details"], "42");
}

#[tokio::test]
async fn test_get_with_non_numeric_id_is_400() {
    let (_, app) = app(vec![]);

    let (status, body) = common::send(&app, "GET", "/api/history/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "malformed_payload");
}

#[tokio::test]
async fn test_find_all_returns_requested_order() {
    let (_, app) = app(vec![history(1, 11), history(2, 22), history(3, 33)]);

    let (status, body) = common::send(&app, "GET", "/api/history?id=3&id=1", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn test_find_all_with_missing_id_is_404() {
    let (_, app) = app(vec![history(1, 11), history(2, 22)]);

    let (status, body) = common::send(&app, "GET", "/api/history?id=1,2,3", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "3");
}

#[tokio::test]
async fn test_find_all_without_id_parameter_is_400() {
    let (_, app) = app(vec![history(1, 11)]);

    let (status, _) = common::send(&app, "GET", "/api/history?ids=1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_assigns_id() {
    let (repository, app) = app(vec![history(1, 11)]);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/history",
        Some(json!({"id": 1, "transferAuditId": 77, "authorizationAuditId": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["transferAuditId"], 77);
    assert_eq!(body["authorizationAuditId"], 5);
    assert_eq!(repository.len(), 2);
    assert_eq!(repository.write_count(), 1);
}

#[tokio::test]
async fn test_create_with_null_body_is_400() {
    let (repository, app) = app(vec![]);

    let status = common::send_raw(&app, "POST", "/api/history", "null").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repository.write_count(), 0);
}

#[tokio::test]
async fn test_create_with_malformed_body_is_400() {
    let (repository, app) = app(vec![]);

    let status = common::send_raw(&app, "POST", "/api/history", "{\"transferAuditId\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repository.write_count(), 0);
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (repository, app) = app(vec![history(1, 11)]);

    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/history/1",
        Some(json!({"id": 500, "profileAuditId": 9})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["profileAuditId"], 9);
    assert_eq!(body["transferAuditId"], 11);
    assert_eq!(repository.write_count(), 1);
}

#[tokio::test]
async fn test_update_unknown_id_is_404_without_write() {
    let (repository, app) = app(vec![]);

    let (status, _) = common::send(
        &app,
        "PUT",
        "/api/history/99",
        Some(json!({"profileAuditId": 9})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(repository.write_count(), 0);
}
