//! Public bank information service
//!
//! Branches, ATMs, bank details and the license and certificate scans.
//! Routes use the verb layout (`/read/all`, `/create`, `/update/:id`).

pub mod model;
pub mod nested;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::api::routes::{crud_routes, ResourceRoutes};
use crate::audit::{audit_routes, Audit};
use crate::config::ServiceKind;
use crate::crud::{
    CrudService, InMemoryRepository, LinkedRepository, PgRepository, Repository, RepositorySet,
};

pub use model::{BankDetails, BankDetailsDto, BankDetailsMapper, Branch, BranchDto, BranchMapper};
pub use nested::{
    Atm, AtmDto, AtmMapper, Certificate, CertificateDto, CertificateMapper, License, LicenseDto,
    LicenseMapper,
};

pub struct PublicInfoRepositories {
    pub branches: Arc<dyn Repository<Branch>>,
    pub atms: Arc<dyn Repository<Atm>>,
    pub bank_details: Arc<dyn Repository<BankDetails>>,
    pub licenses: Arc<dyn Repository<License>>,
    pub certificates: Arc<dyn Repository<Certificate>>,
    pub audit: Arc<dyn Repository<Audit>>,
}

impl RepositorySet for PublicInfoRepositories {
    fn postgres(pool: &PgPool) -> Self {
        let schema = ServiceKind::PublicInfo.schema();
        Self {
            branches: Arc::new(PgRepository::<Branch>::new(pool.clone(), schema)),
            atms: Arc::new(PgRepository::<Atm>::new(pool.clone(), schema)),
            bank_details: Arc::new(PgRepository::<BankDetails>::new(pool.clone(), schema)),
            licenses: Arc::new(PgRepository::<License>::new(pool.clone(), schema)),
            certificates: Arc::new(PgRepository::<Certificate>::new(pool.clone(), schema)),
            audit: Arc::new(PgRepository::<Audit>::new(pool.clone(), schema)),
        }
    }

    fn in_memory() -> Self {
        Self {
            branches: Arc::new(InMemoryRepository::<Branch>::new()),
            atms: Arc::new(InMemoryRepository::<Atm>::new()),
            bank_details: Arc::new(InMemoryRepository::<BankDetails>::new()),
            licenses: Arc::new(InMemoryRepository::<License>::new()),
            certificates: Arc::new(InMemoryRepository::<Certificate>::new()),
            audit: Arc::new(InMemoryRepository::<Audit>::new()),
        }
    }
}

/// ATM and document writes are checked against the referenced branch or
/// bank details, and reads attach the referenced row.
pub fn router(repositories: PublicInfoRepositories) -> Router {
    let atms = LinkedRepository::new(repositories.atms, repositories.branches.clone());
    let licenses = LinkedRepository::new(repositories.licenses, repositories.bank_details.clone());
    let certificates =
        LinkedRepository::new(repositories.certificates, repositories.bank_details.clone());

    let branches = Arc::new(CrudService::<BranchMapper>::new(repositories.branches));
    let atms = Arc::new(CrudService::<AtmMapper>::new(Arc::new(atms)));
    let bank_details = Arc::new(CrudService::<BankDetailsMapper>::new(repositories.bank_details));
    let licenses = Arc::new(CrudService::<LicenseMapper>::new(Arc::new(licenses)));
    let certificates = Arc::new(CrudService::<CertificateMapper>::new(Arc::new(certificates)));

    Router::new()
        .merge(crud_routes(branches, &ResourceRoutes::verb("/branch")))
        .merge(crud_routes(atms, &ResourceRoutes::verb("/atm")))
        .merge(crud_routes(bank_details, &ResourceRoutes::verb("/bank/details")))
        .merge(crud_routes(licenses, &ResourceRoutes::verb("/license")))
        .merge(crud_routes(certificates, &ResourceRoutes::verb("/certificate")))
        .merge(audit_routes(repositories.audit, &ResourceRoutes::verb("/audit")))
}
