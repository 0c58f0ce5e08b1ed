//! Authorization service
//!
//! User records with hashed passwords. Nothing here authenticates requests.

pub mod model;
pub mod password;
pub mod service;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use sqlx::PgPool;

use crate::api::routes::{crud_routes, ResourceRoutes};
use crate::audit::{audit_routes, Audit};
use crate::config::ServiceKind;
use crate::crud::{InMemoryRepository, PgRepository, Repository, RepositorySet};

pub use model::{User, UserDto, UserMapper};
pub use service::UserService;

pub struct AuthorizationRepositories {
    pub users: Arc<dyn Repository<User>>,
    pub audit: Arc<dyn Repository<Audit>>,
}

impl RepositorySet for AuthorizationRepositories {
    fn postgres(pool: &PgPool) -> Self {
        let schema = ServiceKind::Authorization.schema();
        Self {
            users: Arc::new(PgRepository::<User>::new(pool.clone(), schema)),
            audit: Arc::new(PgRepository::<Audit>::new(pool.clone(), schema)),
        }
    }

    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            audit: Arc::new(InMemoryRepository::<Audit>::new()),
        }
    }
}

pub fn router(repositories: AuthorizationRepositories) -> Router {
    let users = Arc::new(UserService::new(repositories.users));

    Router::new()
        .merge(crud_routes(
            users,
            &ResourceRoutes::rest("/users").create_status(StatusCode::CREATED),
        ))
        .merge(audit_routes(repositories.audit, &ResourceRoutes::rest("/audit")))
}
