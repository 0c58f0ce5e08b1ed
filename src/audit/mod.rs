//! Audit trail
//!
//! Every audited schema carries an `audit` table filled by database
//! triggers on insert and update. The API only reads it.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};

use crate::api::routes::{read_routes, ResourceRoutes};
use crate::crud::{CrudService, Repository};

crate::resource! {
    /// Before/after snapshot of one mutation of another entity.
    entity Audit;
    dto AuditDto;
    mapper AuditMapper;
    name "audit";
    table "audit";
    fields {
        entity_type: String,
        operation_type: String,
        created_by: String,
        modified_by: String,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
        new_entity_json: String,
        entity_json: String,
    }
}

pub type AuditService = CrudService<AuditMapper>;

/// Read-only audit endpoints.
pub fn audit_routes(repository: Arc<dyn Repository<Audit>>, routes: &ResourceRoutes) -> Router {
    read_routes(Arc::new(AuditService::new(repository)), routes)
}
