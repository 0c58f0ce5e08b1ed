//! Records that reference another record
//!
//! The stored row only keeps the reference id. [`LinkedRepository`] checks
//! that the referenced row exists before a write and attaches it on reads
//! when the inner store did not already join it in.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::repository::{Repository, RepositoryError};
use super::Record;

pub trait Linked: Record {
    type Target: Record;

    /// Id of the referenced row, if any.
    fn reference(&self) -> Option<i64>;

    fn is_attached(&self) -> bool;

    fn attach(&mut self, target: Option<Self::Target>);
}

pub struct LinkedRepository<E: Linked> {
    inner: Arc<dyn Repository<E>>,
    targets: Arc<dyn Repository<E::Target>>,
}

impl<E: Linked> LinkedRepository<E> {
    pub fn new(inner: Arc<dyn Repository<E>>, targets: Arc<dyn Repository<E::Target>>) -> Self {
        Self { inner, targets }
    }

    async fn hydrate(&self, mut rows: Vec<E>) -> Result<Vec<E>, RepositoryError> {
        let wanted: Vec<i64> = rows
            .iter()
            .filter(|row| !row.is_attached())
            .filter_map(|row| row.reference())
            .collect();
        if wanted.is_empty() {
            return Ok(rows);
        }

        let targets: HashMap<i64, E::Target> = self
            .targets
            .find_all_by_id(&wanted)
            .await?
            .into_iter()
            .filter_map(|target| target.id().map(|id| (id, target)))
            .collect();

        for row in rows.iter_mut().filter(|row| !row.is_attached()) {
            let target = row.reference().and_then(|id| targets.get(&id).cloned());
            row.attach(target);
        }
        Ok(rows)
    }

    async fn hydrate_one(&self, row: E) -> Result<E, RepositoryError> {
        let id = row.id().unwrap_or_default();
        self.hydrate(vec![row])
            .await?
            .pop()
            .ok_or(RepositoryError::Vanished { table: E::NAME, id })
    }
}

#[async_trait]
impl<E: Linked> Repository<E> for LinkedRepository<E> {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepositoryError> {
        match self.inner.find_by_id(id).await? {
            Some(row) => Ok(Some(self.hydrate_one(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> Result<Vec<E>, RepositoryError> {
        let rows = self.inner.find_all_by_id(ids).await?;
        self.hydrate(rows).await
    }

    async fn save(&self, mut entity: E) -> Result<E, RepositoryError> {
        if let Some(id) = entity.reference() {
            if self.targets.find_by_id(id).await?.is_none() {
                tracing::warn!(entity = E::NAME, referenced = E::Target::NAME, id, "Dangling reference");
                return Err(RepositoryError::MissingReference {
                    entity: E::Target::NAME,
                    id,
                });
            }
        }

        entity.attach(None);
        let saved = self.inner.save(entity).await?;
        self.hydrate_one(saved).await
    }
}
