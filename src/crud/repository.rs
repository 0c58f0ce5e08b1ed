//! Repository abstraction
//!
//! Storage seam for every entity. Services hold an `Arc<dyn Repository<E>>`
//! so the Postgres store and the in-memory store are interchangeable.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::Record;

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Saved row {table}#{id} could not be read back")]
    Vanished { table: &'static str, id: i64 },

    #[error("Referenced {entity}#{id} does not exist")]
    MissingReference { entity: &'static str, id: i64 },

    #[error("Write to {table} references a missing row")]
    ForeignKey { table: &'static str },
}

impl RepositoryError {
    /// Classify a failed write, separating foreign key violations.
    pub fn from_write(table: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::ForeignKey { table }
            }
            _ => RepositoryError::Database(err),
        }
    }

    /// Whether the failure was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RepositoryError::MissingReference { .. } | RepositoryError::ForeignKey { .. }
        )
    }
}

#[async_trait]
pub trait Repository<E: Record>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError>;

    /// Fetch the records whose ids appear in `ids`. Unknown ids are skipped,
    /// result order is unspecified.
    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<E>, RepositoryError>;

    /// Insert when the record has no id, overwrite otherwise. Returns the
    /// stored record with its id assigned.
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;
}

// =========================================================================
// In-memory store
// =========================================================================

struct MemoryState<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

/// Mutex-backed store used by tests and by `BANK_STORAGE=memory`.
pub struct InMemoryRepository<E> {
    state: Mutex<MemoryState<E>>,
    writes: AtomicUsize,
}

impl<E: Record> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seed the store with records that already carry ids. Seeding does not
    /// count as a write.
    pub fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        let repository = Self::new();
        {
            let mut state = repository.lock();
            for row in rows {
                if let Some(id) = row.id() {
                    state.next_id = state.next_id.max(id.saturating_add(1));
                    state.rows.insert(id, row);
                }
            }
        }
        repository
    }

    /// Number of `save` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Record> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Record> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<E>, RepositoryError> {
        let state = self.lock();
        Ok(state
            .rows
            .iter()
            .filter(|(id, _)| ids.contains(*id))
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn save(&self, mut entity: E) -> Result<E, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        let id = match entity.id() {
            Some(id) => id,
            None => state.next_id,
        };
        state.next_id = state.next_id.max(id.saturating_add(1));
        entity.set_id(Some(id));
        state.rows.insert(id, entity.clone());
        Ok(entity)
    }
}
