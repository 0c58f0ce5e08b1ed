//! User service
//!
//! Generic CRUD with the plaintext password swapped for its hash before the
//! DTO reaches the mapper.

use std::sync::Arc;

use async_trait::async_trait;

use super::model::{User, UserDto, UserMapper};
use super::password::hash_password;
use crate::crud::{CrudOperations, CrudService, ReadOperations, Repository};
use crate::error::{AppError, AppResult};

pub struct UserService {
    users: CrudService<UserMapper>,
}

impl UserService {
    pub fn new(repository: Arc<dyn Repository<User>>) -> Self {
        Self {
            users: CrudService::new(repository),
        }
    }
}

/// Replace a supplied plaintext password with its Argon2 hash.
async fn hash_supplied_password(dto: Option<UserDto>) -> AppResult<Option<UserDto>> {
    let Some(mut dto) = dto else {
        return Ok(None);
    };

    if let Some(plain) = dto.password.take() {
        let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))??;
        dto.password = Some(hash);
    }

    Ok(Some(dto))
}

#[async_trait]
impl ReadOperations for UserService {
    type Dto = UserDto;

    async fn find_by_id(&self, id: i64) -> AppResult<UserDto> {
        self.users.find_by_id(id).await
    }

    async fn find_all_by_id(&self, ids: &[i64]) -> AppResult<Vec<UserDto>> {
        self.users.find_all_by_id(ids).await
    }
}

#[async_trait]
impl CrudOperations for UserService {
    async fn save(&self, dto: Option<UserDto>) -> AppResult<UserDto> {
        let dto = hash_supplied_password(dto).await?;
        self.users.save(dto).await
    }

    async fn update(&self, id: i64, dto: Option<UserDto>) -> AppResult<UserDto> {
        let dto = hash_supplied_password(dto).await?;
        self.users.update(id, dto).await
    }
}
