//! API module
//!
//! HTTP surface: per-service routers nested under their context paths, plus
//! health and info endpoints.

pub mod extract;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{extract::State, middleware as axum_middleware, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::account::{self, AccountRepositories};
use crate::anti_fraud::{self, AntiFraudRepositories};
use crate::authorization::{self, AuthorizationRepositories};
use crate::config::{Config, ServiceKind};
use crate::crud::RepositorySet;
use crate::history::{self, HistoryRepositories};
use crate::public_info::{self, PublicInfoRepositories};

/// Process metadata served by `/info`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub started_at: DateTime<Utc>,
    pub services: Vec<String>,
}

impl ServiceInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.app_name.clone(),
            version: config.app_version.clone(),
            environment: config.environment.clone(),
            started_at: Utc::now(),
            services: config.services.iter().map(|s| s.name().to_string()).collect(),
        }
    }
}

/// Router of one service over Postgres, or over in-memory stores when no
/// pool is given.
pub fn service_router(kind: ServiceKind, pool: Option<&PgPool>) -> Router {
    match kind {
        ServiceKind::Account => account::router(AccountRepositories::open(pool)),
        ServiceKind::AntiFraud => anti_fraud::router(AntiFraudRepositories::open(pool)),
        ServiceKind::Authorization => authorization::router(AuthorizationRepositories::open(pool)),
        ServiceKind::History => history::router(HistoryRepositories::open(pool)),
        ServiceKind::PublicInfo => public_info::router(PublicInfoRepositories::open(pool)),
    }
}

/// Build the application router from already constructed service routers
pub fn create_router<I>(services: I, info: ServiceInfo) -> Router
where
    I: IntoIterator<Item = (ServiceKind, Router)>,
{
    let mut api = Router::new();
    for (kind, router) in services {
        tracing::info!(service = %kind, path = kind.context_path(), "Mounting service");
        api = api.nest(kind.context_path(), router);
    }

    // Layers run last-added first: correlation id is set before logging.
    let api = api
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn(middleware::correlation_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(service_info))
        .with_state(Arc::new(info))
        .merge(api)
        .layer(TraceLayer::new_for_http())
}

/// Build the router for every service the configuration selects
pub fn build_router(config: &Config, pool: Option<&PgPool>) -> Router {
    let services = config
        .services
        .iter()
        .map(|kind| (*kind, service_router(*kind, pool)));

    create_router(services, ServiceInfo::from_config(config))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn service_info(State(info): State<Arc<ServiceInfo>>) -> Json<ServiceInfo> {
    Json(info.as_ref().clone())
}
