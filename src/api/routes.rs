//! API Routes
//!
//! Generic resource endpoints. Every resource exposes the same four
//! operations; only the URL shape, the id-list query parameter and the
//! create status differ between services.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::crud::{CrudOperations, ReadOperations};
use crate::error::AppResult;

use super::extract::{parse_ids, ApiJson, ApiPath};

// =========================================================================
// Route shape
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStyle {
    /// `GET /r/:id`, `GET /r?id=`, `POST /r`, `PUT /r/:id`
    Rest,
    /// `GET /r/:id`, `GET /r/read/all?ids=`, `POST /r/create`, `PUT /r/update/:id`
    Verb,
}

/// URL layout of one resource.
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
    base: &'static str,
    style: RouteStyle,
    ids_param: &'static str,
    create_status: StatusCode,
}

impl ResourceRoutes {
    pub fn rest(base: &'static str) -> Self {
        Self {
            base,
            style: RouteStyle::Rest,
            ids_param: "id",
            create_status: StatusCode::OK,
        }
    }

    pub fn verb(base: &'static str) -> Self {
        Self {
            base,
            style: RouteStyle::Verb,
            ids_param: "ids",
            create_status: StatusCode::OK,
        }
    }

    pub fn create_status(mut self, status: StatusCode) -> Self {
        self.create_status = status;
        self
    }

    fn item_path(&self) -> String {
        format!("{}/:id", self.base)
    }

    fn collection_path(&self) -> String {
        match self.style {
            RouteStyle::Rest if self.base.is_empty() => "/".to_string(),
            RouteStyle::Rest => self.base.to_string(),
            RouteStyle::Verb => format!("{}/read/all", self.base),
        }
    }

    fn create_path(&self) -> String {
        match self.style {
            RouteStyle::Rest => self.collection_path(),
            RouteStyle::Verb => format!("{}/create", self.base),
        }
    }

    fn update_path(&self) -> String {
        match self.style {
            RouteStyle::Rest => self.item_path(),
            RouteStyle::Verb => format!("{}/update/:id", self.base),
        }
    }
}

struct ResourceState<S> {
    service: Arc<S>,
    ids_param: &'static str,
    create_status: StatusCode,
}

impl<S> Clone for ResourceState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            ids_param: self.ids_param,
            create_status: self.create_status,
        }
    }
}

impl<S> ResourceState<S> {
    fn new(service: Arc<S>, routes: &ResourceRoutes) -> Self {
        Self {
            service,
            ids_param: routes.ids_param,
            create_status: routes.create_status,
        }
    }
}

// =========================================================================
// Routers
// =========================================================================

/// Read-only endpoints (find by id, find all by ids).
pub fn read_routes<S: ReadOperations>(service: Arc<S>, routes: &ResourceRoutes) -> Router {
    Router::new()
        .route(&routes.item_path(), get(find_by_id::<S>))
        .route(&routes.collection_path(), get(find_all_by_id::<S>))
        .with_state(ResourceState::new(service, routes))
}

/// Read, create and update endpoints.
pub fn crud_routes<S: CrudOperations>(service: Arc<S>, routes: &ResourceRoutes) -> Router {
    Router::new()
        .route(&routes.item_path(), get(find_by_id::<S>))
        .route(&routes.collection_path(), get(find_all_by_id::<S>))
        .route(&routes.create_path(), post(create::<S>))
        .route(&routes.update_path(), put(update::<S>))
        .with_state(ResourceState::new(service, routes))
}

// =========================================================================
// Handlers
// =========================================================================

async fn find_by_id<S: ReadOperations>(
    State(state): State<ResourceState<S>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<S::Dto>> {
    Ok(Json(state.service.find_by_id(id).await?))
}

async fn find_all_by_id<S: ReadOperations>(
    State(state): State<ResourceState<S>>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Vec<S::Dto>>> {
    let ids = parse_ids(query.as_deref(), state.ids_param)?;
    Ok(Json(state.service.find_all_by_id(&ids).await?))
}

async fn create<S: CrudOperations>(
    State(state): State<ResourceState<S>>,
    ApiJson(dto): ApiJson<Option<S::Dto>>,
) -> AppResult<(StatusCode, Json<S::Dto>)> {
    let created = state.service.save(dto).await?;
    Ok((state.create_status, Json(created)))
}

async fn update<S: CrudOperations>(
    State(state): State<ResourceState<S>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(dto): ApiJson<Option<S::Dto>>,
) -> AppResult<Json<S::Dto>> {
    Ok(Json(state.service.update(id, dto).await?))
}
