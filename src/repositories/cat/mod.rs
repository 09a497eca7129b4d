//! Cat Repository Module
//!
//! Persistence layer for cat records behind [`CatRepositoryTrait`].
//!
//! ## Implementations
//!
//! - [`InMemoryCatRepository`]: insertion-ordered in-process storage for
//!   development and testing
//! - [`RedisCatRepository`]: Redis-backed storage for production

mod cat_in_memory;
mod cat_redis;

pub use cat_in_memory::*;
pub use cat_redis::*;

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde_json::{Map, Value};

use crate::models::{CatCreateRequest, CatFilter, CatRepoModel, RepositoryError, SortSpec};
use crate::repositories::CatRepositoryTrait;

/// Enum wrapper for the configured store backend.
#[derive(Debug)]
pub enum CatRepositoryStorage {
    InMemory(InMemoryCatRepository),
    Redis(RedisCatRepository),
}

impl CatRepositoryStorage {
    pub fn new_in_memory() -> Self {
        Self::InMemory(InMemoryCatRepository::new())
    }

    pub fn new_redis(
        connection_manager: Arc<ConnectionManager>,
        key_prefix: String,
    ) -> Result<Self, RepositoryError> {
        Ok(Self::Redis(RedisCatRepository::new(
            connection_manager,
            key_prefix,
        )?))
    }
}

#[async_trait]
impl CatRepositoryTrait for CatRepositoryStorage {
    async fn find(
        &self,
        filter: &CatFilter,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<CatRepoModel>, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.find(filter, sort).await,
            CatRepositoryStorage::Redis(repo) => repo.find(filter, sort).await,
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.find_by_id(id).await,
            CatRepositoryStorage::Redis(repo) => repo.find_by_id(id).await,
        }
    }

    async fn insert(&self, cat: CatCreateRequest) -> Result<CatRepoModel, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.insert(cat).await,
            CatRepositoryStorage::Redis(repo) => repo.insert(cat).await,
        }
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<CatRepoModel, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.find_by_id_and_update(id, fields).await,
            CatRepositoryStorage::Redis(repo) => repo.find_by_id_and_update(id, fields).await,
        }
    }

    async fn find_by_id_and_toggle_hungry(
        &self,
        id: &str,
    ) -> Result<CatRepoModel, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.find_by_id_and_toggle_hungry(id).await,
            CatRepositoryStorage::Redis(repo) => repo.find_by_id_and_toggle_hungry(id).await,
        }
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.find_by_id_and_delete(id).await,
            CatRepositoryStorage::Redis(repo) => repo.find_by_id_and_delete(id).await,
        }
    }

    async fn delete_many(&self, filter: &CatFilter) -> Result<usize, RepositoryError> {
        match self {
            CatRepositoryStorage::InMemory(repo) => repo.delete_many(filter).await,
            CatRepositoryStorage::Redis(repo) => repo.delete_many(filter).await,
        }
    }
}
