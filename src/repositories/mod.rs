//! # Repository Module
//!
//! Implements the record store boundary using the Repository pattern,
//! supporting an in-memory backend and a Redis-backed one.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::models::{CatCreateRequest, CatFilter, CatRepoModel, RepositoryError, SortSpec};

mod cat;
pub use cat::*;

mod redis_base;
pub use redis_base::*;

/// The store primitives the HTTP layer is built on. All calls are async and
/// may fail with a [`RepositoryError`]; absence of a target id is reported
/// as [`RepositoryError::NotFound`].
#[async_trait]
pub trait CatRepositoryTrait {
    /// Returns records matching `filter`, sorted by `sort` when given,
    /// otherwise in store-default (insertion) order.
    async fn find(
        &self,
        filter: &CatFilter,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<CatRepoModel>, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<CatRepoModel, RepositoryError>;

    /// Inserts a new record; the store assigns its identifier.
    async fn insert(&self, cat: CatCreateRequest) -> Result<CatRepoModel, RepositoryError>;

    /// Replaces each given attribute on the record, leaving the rest
    /// unchanged, and returns the post-update record.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<CatRepoModel, RepositoryError>;

    /// Atomically flips `isHungry` (unset counts as false) and returns the
    /// updated record.
    async fn find_by_id_and_toggle_hungry(
        &self,
        id: &str,
    ) -> Result<CatRepoModel, RepositoryError>;

    /// Removes the record and returns its pre-deletion state.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<CatRepoModel, RepositoryError>;

    /// Removes every record matching `filter` and returns how many were
    /// removed. Zero matches is still success.
    async fn delete_many(&self, filter: &CatFilter) -> Result<usize, RepositoryError>;
}
