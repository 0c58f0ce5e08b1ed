//! Account service
//!
//! Account details CRUD plus the account audit trail.

pub mod model;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::api::routes::{crud_routes, ResourceRoutes};
use crate::audit::{audit_routes, Audit};
use crate::config::ServiceKind;
use crate::crud::{CrudService, InMemoryRepository, PgRepository, Repository, RepositorySet};

pub use model::{AccountDetails, AccountDetailsDto, AccountDetailsMapper};

pub type AccountDetailsService = CrudService<AccountDetailsMapper>;

pub struct AccountRepositories {
    pub details: Arc<dyn Repository<AccountDetails>>,
    pub audit: Arc<dyn Repository<Audit>>,
}

impl RepositorySet for AccountRepositories {
    fn postgres(pool: &PgPool) -> Self {
        let schema = ServiceKind::Account.schema();
        Self {
            details: Arc::new(PgRepository::<AccountDetails>::new(pool.clone(), schema)),
            audit: Arc::new(PgRepository::<Audit>::new(pool.clone(), schema)),
        }
    }

    fn in_memory() -> Self {
        Self {
            details: Arc::new(InMemoryRepository::<AccountDetails>::new()),
            audit: Arc::new(InMemoryRepository::<Audit>::new()),
        }
    }
}

pub fn router(repositories: AccountRepositories) -> Router {
    let details = Arc::new(AccountDetailsService::new(repositories.details));

    Router::new()
        .merge(crud_routes(details, &ResourceRoutes::rest("/details")))
        .merge(audit_routes(repositories.audit, &ResourceRoutes::rest("/audit")))
}
