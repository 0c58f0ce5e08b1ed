//! Generic CRUD layer
//!
//! Mapper, repository and service building blocks shared by every banking
//! service. Per-entity code only supplies a field table (see [`resource!`]).
//!
//! [`resource!`]: crate::resource

pub mod linked;
pub mod mapper;
pub mod postgres;
pub mod repository;
mod resource;
pub mod service;

pub use linked::{Linked, LinkedRepository};
pub use mapper::Mapper;
pub use postgres::{PgRepository, Table};
pub use repository::{InMemoryRepository, Repository, RepositoryError};
pub use service::{CrudOperations, CrudService, ReadOperations};

/// The repositories one service needs, backed by Postgres or by memory.
pub trait RepositorySet: Sized {
    fn postgres(pool: &sqlx::PgPool) -> Self;

    fn in_memory() -> Self;

    fn open(pool: Option<&sqlx::PgPool>) -> Self {
        match pool {
            Some(pool) => Self::postgres(pool),
            None => Self::in_memory(),
        }
    }
}

/// A persisted record with a store-assigned surrogate id.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human readable entity name used in diagnostics.
    const NAME: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: Option<i64>);
}
