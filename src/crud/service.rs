//! CRUD service layer
//!
//! Orchestrates mapper and repository: not-found detection, the
//! all-or-nothing bulk lookup and merge-based updates.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Mapper, Record, Repository};
use crate::error::{AppError, AppResult};

/// Read side of a resource service.
#[async_trait]
pub trait ReadOperations: Send + Sync + 'static {
    type Dto: Serialize + DeserializeOwned + Send + Sync + 'static;

    async fn find_by_id(&self, id: i64) -> AppResult<Self::Dto>;

    /// Resolve every requested id or fail with the ids that are missing.
    async fn find_all_by_id(&self, ids: &[i64]) -> AppResult<Vec<Self::Dto>>;
}

/// Full create/read/update surface of a resource service.
#[async_trait]
pub trait CrudOperations: ReadOperations {
    async fn save(&self, dto: Option<Self::Dto>) -> AppResult<Self::Dto>;

    async fn update(&self, id: i64, dto: Option<Self::Dto>) -> AppResult<Self::Dto>;
}

/// Generic service over one mapper and its repository.
pub struct CrudService<M: Mapper> {
    repository: Arc<dyn Repository<M::Entity>>,
    _mapper: PhantomData<fn() -> M>,
}

impl<M: Mapper> CrudService<M> {
    pub fn new(repository: Arc<dyn Repository<M::Entity>>) -> Self {
        Self {
            repository,
            _mapper: PhantomData,
        }
    }
}

/// Drop repeated ids, keeping the first occurrence.
fn distinct(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[async_trait]
impl<M> ReadOperations for CrudService<M>
where
    M: Mapper,
    M::Dto: Serialize + DeserializeOwned,
{
    type Dto = M::Dto;

    async fn find_by_id(&self, id: i64) -> AppResult<M::Dto> {
        let entity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(M::Entity::NAME, vec![id]))?;

        tracing::debug!(entity = M::Entity::NAME, id, "Entity loaded");
        Ok(M::dto(&entity))
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> AppResult<Vec<M::Dto>> {
        let requested = distinct(ids);
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<i64, M::Entity> = self
            .repository
            .find_all_by_id(&requested)
            .await?
            .into_iter()
            .filter_map(|entity| entity.id().map(|id| (id, entity)))
            .collect();

        let mut ordered = Vec::with_capacity(requested.len());
        let mut missing = Vec::new();
        for id in &requested {
            match by_id.remove(id) {
                Some(entity) => ordered.push(entity),
                None => missing.push(*id),
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                entity = M::Entity::NAME,
                requested = requested.len(),
                found = ordered.len(),
                ?missing,
                "Bulk lookup did not resolve every id"
            );
            return Err(AppError::not_found(M::Entity::NAME, missing));
        }

        tracing::debug!(entity = M::Entity::NAME, count = ordered.len(), "Entities loaded");
        Ok(ordered.iter().map(M::dto).collect())
    }
}

#[async_trait]
impl<M> CrudOperations for CrudService<M>
where
    M: Mapper,
    M::Dto: Serialize + DeserializeOwned,
{
    async fn save(&self, dto: Option<M::Dto>) -> AppResult<M::Dto> {
        let dto = dto.ok_or(AppError::NullInput(M::Entity::NAME))?;

        let mut entity = M::entity(&dto);
        entity.set_id(None);
        let saved = self.repository.save(entity).await?;

        tracing::info!(entity = M::Entity::NAME, id = ?saved.id(), "Entity created");
        Ok(M::dto(&saved))
    }

    async fn update(&self, id: i64, dto: Option<M::Dto>) -> AppResult<M::Dto> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(M::Entity::NAME, vec![id]))?;

        let merged = M::merge_to_entity(dto.as_ref(), &existing);
        let saved = self.repository.save(merged).await?;

        tracing::info!(entity = M::Entity::NAME, id, "Entity updated");
        Ok(M::dto(&saved))
    }
}
