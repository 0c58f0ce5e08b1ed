//! Anti-fraud service

pub mod model;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::api::routes::{crud_routes, ResourceRoutes};
use crate::audit::{audit_routes, Audit};
use crate::config::ServiceKind;
use crate::crud::{CrudService, InMemoryRepository, PgRepository, Repository, RepositorySet};

pub use model::*;

pub struct AntiFraudRepositories {
    pub account_transfers: Arc<dyn Repository<SuspiciousAccountTransfer>>,
    pub card_transfers: Arc<dyn Repository<SuspiciousCardTransfer>>,
    pub phone_transfers: Arc<dyn Repository<SuspiciousPhoneTransfer>>,
    pub audit: Arc<dyn Repository<Audit>>,
}

impl RepositorySet for AntiFraudRepositories {
    fn postgres(pool: &PgPool) -> Self {
        let schema = ServiceKind::AntiFraud.schema();
        Self {
            account_transfers: Arc::new(PgRepository::<SuspiciousAccountTransfer>::new(
                pool.clone(),
                schema,
            )),
            card_transfers: Arc::new(PgRepository::<SuspiciousCardTransfer>::new(
                pool.clone(),
                schema,
            )),
            phone_transfers: Arc::new(PgRepository::<SuspiciousPhoneTransfer>::new(
                pool.clone(),
                schema,
            )),
            audit: Arc::new(PgRepository::<Audit>::new(pool.clone(), schema)),
        }
    }

    fn in_memory() -> Self {
        Self {
            account_transfers: Arc::new(InMemoryRepository::<SuspiciousAccountTransfer>::new()),
            card_transfers: Arc::new(InMemoryRepository::<SuspiciousCardTransfer>::new()),
            phone_transfers: Arc::new(InMemoryRepository::<SuspiciousPhoneTransfer>::new()),
            audit: Arc::new(InMemoryRepository::<Audit>::new()),
        }
    }
}

pub fn router(repositories: AntiFraudRepositories) -> Router {
    let account = Arc::new(CrudService::<SuspiciousAccountTransferMapper>::new(
        repositories.account_transfers,
    ));
    let card = Arc::new(CrudService::<SuspiciousCardTransferMapper>::new(
        repositories.card_transfers,
    ));
    let phone = Arc::new(CrudService::<SuspiciousPhoneTransferMapper>::new(
        repositories.phone_transfers,
    ));

    Router::new()
        .merge(crud_routes(account, &ResourceRoutes::rest("/suspicious/account-transfer")))
        .merge(crud_routes(card, &ResourceRoutes::rest("/suspicious/card-transfer")))
        .merge(crud_routes(phone, &ResourceRoutes::rest("/suspicious/phone-transfer")))
        .merge(audit_routes(repositories.audit, &ResourceRoutes::rest("/audit")))
}
