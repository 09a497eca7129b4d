//! In-memory implementation of the cat repository.
//!
//! Records live in an insertion-ordered vector behind an async mutex, so
//! store-default order is insertion order and every operation is one
//! critical section. The toggle is atomic by construction: the read and the
//! write happen under the same lock.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::{
    sort_records, CatCreateRequest, CatFilter, CatRepoModel, RepositoryError, SortSpec,
};
use crate::repositories::CatRepositoryTrait;

#[derive(Debug, Default)]
pub struct InMemoryCatRepository {
    store: Mutex<Vec<CatRepoModel>>,
}

impl InMemoryCatRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Vec::new()),
        }
    }

    async fn acquire_lock<T>(lock: &Mutex<T>) -> Result<MutexGuard<T>, RepositoryError> {
        Ok(lock.lock().await)
    }

    fn not_found(id: &str) -> RepositoryError {
        RepositoryError::NotFound(format!("Cat with ID {} not found", id))
    }
}

#[async_trait]
impl CatRepositoryTrait for InMemoryCatRepository {
    async fn find(
        &self,
        filter: &CatFilter,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<CatRepoModel>, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        let mut cats: Vec<CatRepoModel> = store
            .iter()
            .filter(|cat| filter.matches(cat))
            .cloned()
            .collect();
        if let Some(spec) = sort {
            sort_records(&mut cats, spec);
        }
        Ok(cats)
    }

    async fn find_by_id(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        store
            .iter()
            .find(|cat| cat.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn insert(&self, cat: CatCreateRequest) -> Result<CatRepoModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let model = cat.into_model(Uuid::new_v4().to_string());
        store.push(model.clone());
        Ok(model)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<CatRepoModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let slot = store
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let updated = slot.apply_update(&fields)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn find_by_id_and_toggle_hungry(
        &self,
        id: &str,
    ) -> Result<CatRepoModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let slot = store
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        slot.is_hungry = Some(!slot.is_hungry.unwrap_or(false));
        Ok(slot.clone())
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let position = store
            .iter()
            .position(|cat| cat.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        Ok(store.remove(position))
    }

    async fn delete_many(&self, filter: &CatFilter) -> Result<usize, RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        let before = store.len();
        store.retain(|cat| !filter.matches(cat));
        Ok(before - store.len())
    }
}
