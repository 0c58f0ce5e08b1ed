//! History service
//!
//! A history row ties together the audit ids a single customer operation
//! produced across the other services. The ids are plain values; nothing
//! here resolves them.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::api::routes::{crud_routes, ResourceRoutes};
use crate::config::ServiceKind;
use crate::crud::{CrudService, InMemoryRepository, PgRepository, Repository, RepositorySet};

crate::resource! {
    /// Cross-service audit references for one operation.
    entity History;
    dto HistoryDto;
    mapper HistoryMapper;
    name "history";
    table "history";
    fields {
        transfer_audit_id: i64,
        profile_audit_id: i64,
        account_audit_id: i64,
        anti_fraud_audit_id: i64,
        public_bank_info_audit_id: i64,
        authorization_audit_id: i64,
    }
}

pub type HistoryService = CrudService<HistoryMapper>;

pub struct HistoryRepositories {
    pub history: Arc<dyn Repository<History>>,
}

impl RepositorySet for HistoryRepositories {
    fn postgres(pool: &PgPool) -> Self {
        Self {
            history: Arc::new(PgRepository::<History>::new(
                pool.clone(),
                ServiceKind::History.schema(),
            )),
        }
    }

    fn in_memory() -> Self {
        Self {
            history: Arc::new(InMemoryRepository::<History>::new()),
        }
    }
}

/// Routes sit directly under the service context path.
pub fn router(repositories: HistoryRepositories) -> Router {
    let service = Arc::new(HistoryService::new(repositories.history));
    crud_routes(service, &ResourceRoutes::rest(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_dto_field_names() {
        let dto: HistoryDto = serde_json::from_str(
            r#"{"transferAuditId": 1, "antiFraudAuditId": 2, "publicBankInfoAuditId": 3}"#,
        )
        .unwrap();

        assert_eq!(dto.transfer_audit_id, Some(1));
        assert_eq!(dto.anti_fraud_audit_id, Some(2));
        assert_eq!(dto.public_bank_info_audit_id, Some(3));
        assert_eq!(dto.authorization_audit_id, None);
    }
}
