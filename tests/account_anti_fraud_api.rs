//! Account and anti-fraud API integration tests

use std::sync::Arc;

use axum::{http::StatusCode, Router};
use bank_services::account::{self, AccountDetails, AccountRepositories};
use bank_services::anti_fraud::{
    self, AntiFraudRepositories, SuspiciousAccountTransfer, SuspiciousAccountTransferDto,
    SuspiciousAccountTransferMapper, SuspiciousCardTransfer, SuspiciousPhoneTransfer,
};
use bank_services::audit::Audit;
use bank_services::crud::{CrudOperations, CrudService, InMemoryRepository, Repository};
use bank_services::AppError;
use chrono::Utc;
use rust_decimal_macros::dec;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

mod common;

fn account_app(
    details: Vec<AccountDetails>,
    audit: Vec<Audit>,
) -> (Arc<InMemoryRepository<AccountDetails>>, Router) {
    let repository = Arc::new(InMemoryRepository::with_rows(details));
    let router = Router::new().nest(
        "/api/account",
        account::router(AccountRepositories {
            details: repository.clone(),
            audit: Arc::new(InMemoryRepository::with_rows(audit)),
        }),
    );
    (repository, router)
}

fn anti_fraud_app(
    account_transfers: Vec<SuspiciousAccountTransfer>,
) -> (Arc<InMemoryRepository<SuspiciousAccountTransfer>>, Router) {
    let repository = Arc::new(InMemoryRepository::with_rows(account_transfers));
    let router = Router::new().nest(
        "/api/anti-fraud",
        anti_fraud::router(AntiFraudRepositories {
            account_transfers: repository.clone(),
            card_transfers: Arc::new(InMemoryRepository::<SuspiciousCardTransfer>::new()),
            phone_transfers: Arc::new(InMemoryRepository::<SuspiciousPhoneTransfer>::new()),
            audit: Arc::new(InMemoryRepository::<Audit>::new()),
        }),
    );
    (repository, router)
}

// =========================================================================
// Account
// =========================================================================

#[tokio::test]
async fn test_create_account_details() {
    let (repository, app) = account_app(vec![], vec![]);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/account/details",
        Some(json!({"id": null, "passportId": 5, "money": "100.25", "negativeBalance": false})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["passportId"], 5);
    assert_eq!(body["money"], "100.25");

    let stored = assert_ok!(repository.find_by_id(1).await).unwrap();
    assert_eq!(stored.money, Some(dec!(100.25)));
}

#[tokio::test]
async fn test_update_balance_keeps_other_fields() {
    let existing = AccountDetails {
        id: Some(7),
        passport_id: Some(5),
        account_number: Some(123),
        bank_details_id: Some(1),
        money: Some(dec!(10)),
        negative_balance: Some(false),
        profile_id: Some(3),
    };
    let (repository, app) = account_app(vec![existing], vec![]);

    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/account/details/7",
        Some(json!({"money": 42.5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 7);
    assert_eq!(body["money"], "42.5");
    assert_eq!(body["accountNumber"], 123);
    assert_eq!(body["profileId"], 3);
    assert_eq!(repository.write_count(), 1);
}

#[tokio::test]
async fn test_account_audit_is_read_only() {
    let audit = Audit {
        id: Some(1),
        entity_type: Some("account_details".into()),
        operation_type: Some("INSERT".into()),
        created_at: Some(Utc::now()),
        ..Audit::default()
    };
    let (_, app) = account_app(vec![], vec![audit]);

    let (status, body) = common::send(&app, "GET", "/api/account/audit/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entityType"], "account_details");

    let (status, body) = common::send(&app, "GET", "/api/account/audit?id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = common::send(&app, "POST", "/api/account/audit", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =========================================================================
// Anti-fraud
// =========================================================================

#[tokio::test]
async fn test_update_suspicious_reason() {
    let existing = SuspiciousAccountTransfer {
        id: Some(1),
        account_transfer_id: Some(900),
        is_blocked: Some(false),
        is_suspicious: Some(true),
        blocked_reason: None,
        suspicious_reason: Some("A".into()),
    };
    let (_, app) = anti_fraud_app(vec![existing]);

    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/anti-fraud/suspicious/account-transfer/1",
        Some(json!({"suspiciousReason": "B"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["suspiciousReason"], "B");
    assert_eq!(body["isSuspicious"], true);
    assert_eq!(body["accountTransferId"], 900);
}

#[tokio::test]
async fn test_bulk_lookup_is_all_or_nothing() {
    let rows = (1..=2)
        .map(|id| SuspiciousAccountTransfer {
            id: Some(id),
            account_transfer_id: Some(id * 10),
            ..SuspiciousAccountTransfer::default()
        })
        .collect();
    let (_, app) = anti_fraud_app(rows);

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/anti-fraud/suspicious/account-transfer?id=1&id=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = common::send(
        &app,
        "GET",
        "/api/anti-fraud/suspicious/account-transfer?id=1&id=2&id=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "3");
}

#[tokio::test]
async fn test_card_and_phone_routes_are_mounted() {
    let (_, app) = anti_fraud_app(vec![]);

    let (status, body) = common::send(
        &app,
        "POST",
        "/api/anti-fraud/suspicious/card-transfer",
        Some(json!({"cardTransferId": 4, "isBlocked": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cardTransferId"], 4);

    let (status, _) = common::send(
        &app,
        "GET",
        "/api/anti-fraud/suspicious/phone-transfer/1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_update_of_unknown_transfer_fails() {
    let (repository, _) = anti_fraud_app(vec![]);
    let service = CrudService::<SuspiciousAccountTransferMapper>::new(repository.clone());

    let err = assert_err!(service.update(99, None).await);
    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(repository.write_count(), 0);

    let created = assert_ok!(service.save(Some(SuspiciousAccountTransferDto::default())).await);
    assert_eq!(created.id, Some(1));
}
