//! Redis-backed implementation of the cat repository.
//!
//! Records are stored as JSON strings under `{prefix}:cat:{id}`, with an
//! insertion-ordered id list at `{prefix}:cat_index` providing store-default
//! order. Filtering and sorting are evaluated in-process through the query
//! translator, on records batch-fetched with MGET. The hunger toggle runs as
//! a server-side Lua script so the flip is a single atomic store operation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{
    sort_records, CatCreateRequest, CatFilter, CatRepoModel, RepositoryError, SortSpec,
};
use crate::repositories::redis_base::RedisRepository;
use crate::repositories::CatRepositoryTrait;

const CAT_PREFIX: &str = "cat";
const CAT_INDEX_KEY: &str = "cat_index";

/// Flips the `isHungry` attribute of the stored JSON document, treating an
/// absent attribute as false. Returns the updated document, or nil when the
/// key does not exist.
const TOGGLE_HUNGRY_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return nil
end
local doc = cjson.decode(raw)
if doc['isHungry'] == true then
  doc['isHungry'] = false
else
  doc['isHungry'] = true
end
local encoded = cjson.encode(doc)
redis.call('SET', KEYS[1], encoded)
return encoded
"#;

#[derive(Clone)]
pub struct RedisCatRepository {
    pub client: Arc<ConnectionManager>,
    pub key_prefix: String,
}

impl RedisRepository for RedisCatRepository {}

impl RedisCatRepository {
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        key_prefix: String,
    ) -> Result<Self, RepositoryError> {
        if key_prefix.is_empty() {
            return Err(RepositoryError::InvalidData(
                "Redis key prefix cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            client: connection_manager,
            key_prefix,
        })
    }

    /// Key for record data: {prefix}:cat:{cat_id}
    fn cat_key(&self, cat_id: &str) -> String {
        format!("{}:{}:{}", self.key_prefix, CAT_PREFIX, cat_id)
    }

    /// Key for the insertion-ordered list of all cat IDs.
    fn cat_index_key(&self) -> String {
        format!("{}:{}", self.key_prefix, CAT_INDEX_KEY)
    }

    fn not_found(id: &str) -> RepositoryError {
        RepositoryError::NotFound(format!("Cat with ID {} not found", id))
    }

    /// Fetches every record in store-default order. Index entries whose
    /// record key has gone missing are skipped.
    async fn fetch_all(&self) -> Result<Vec<CatRepoModel>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();

        let ids: Vec<String> = conn
            .lrange(self.cat_index_key(), 0, -1)
            .await
            .map_err(|e| self.map_redis_error(e, "fetch_cat_index"))?;

        if ids.is_empty() {
            debug!("Cat index is empty");
            return Ok(vec![]);
        }

        let keys: Vec<String> = ids.iter().map(|id| self.cat_key(id)).collect();
        let values: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|e| self.map_redis_error(e, "batch_fetch_cats"))?;

        let mut cats = Vec::with_capacity(values.len());
        for (i, value) in values.into_iter().enumerate() {
            match value {
                Some(json) => cats.push(self.deserialize_entity::<CatRepoModel>(&json, &ids[i], "cat")?),
                None => warn!("Cat {} is indexed but has no record", ids[i]),
            }
        }
        Ok(cats)
    }

    async fn write_record(&self, cat: &CatRepoModel) -> Result<(), RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let json = self.serialize_entity(cat, &cat.id, "cat")?;
        conn.set::<_, _, ()>(self.cat_key(&cat.id), json)
            .await
            .map_err(|e| self.map_redis_error(e, "write_cat"))?;
        Ok(())
    }

    async fn remove_record(&self, id: &str) -> Result<(), RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        conn.del::<_, ()>(self.cat_key(id))
            .await
            .map_err(|e| self.map_redis_error(e, "delete_cat"))?;
        conn.lrem::<_, _, ()>(self.cat_index_key(), 1, id)
            .await
            .map_err(|e| self.map_redis_error(e, "unindex_cat"))?;
        Ok(())
    }
}

impl fmt::Debug for RedisCatRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCatRepository")
            .field("client", &"<ConnectionManager>")
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

#[async_trait]
impl CatRepositoryTrait for RedisCatRepository {
    async fn find(
        &self,
        filter: &CatFilter,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<CatRepoModel>, RepositoryError> {
        let mut cats: Vec<CatRepoModel> = self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|cat| filter.matches(cat))
            .collect();
        if let Some(spec) = sort {
            sort_records(&mut cats, spec);
        }
        Ok(cats)
    }

    async fn find_by_id(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let value: Option<String> = conn
            .get(self.cat_key(id))
            .await
            .map_err(|e| self.map_redis_error(e, "fetch_cat"))?;
        match value {
            Some(json) => self.deserialize_entity(&json, id, "cat"),
            None => Err(Self::not_found(id)),
        }
    }

    async fn insert(&self, cat: CatCreateRequest) -> Result<CatRepoModel, RepositoryError> {
        let model = cat.into_model(Uuid::new_v4().to_string());
        self.write_record(&model).await?;

        let mut conn = self.client.as_ref().clone();
        conn.rpush::<_, _, ()>(self.cat_index_key(), &model.id)
            .await
            .map_err(|e| self.map_redis_error(e, "index_cat"))?;

        Ok(model)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<CatRepoModel, RepositoryError> {
        let current = self.find_by_id(id).await?;
        let updated = current.apply_update(&fields)?;
        self.write_record(&updated).await?;
        Ok(updated)
    }

    async fn find_by_id_and_toggle_hungry(
        &self,
        id: &str,
    ) -> Result<CatRepoModel, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let updated: Option<String> = redis::Script::new(TOGGLE_HUNGRY_SCRIPT)
            .key(self.cat_key(id))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| self.map_redis_error(e, "toggle_cat_hungry"))?;
        match updated {
            Some(json) => self.deserialize_entity(&json, id, "cat"),
            None => Err(Self::not_found(id)),
        }
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<CatRepoModel, RepositoryError> {
        let cat = self.find_by_id(id).await?;
        self.remove_record(id).await?;
        Ok(cat)
    }

    async fn delete_many(&self, filter: &CatFilter) -> Result<usize, RepositoryError> {
        let matched: Vec<String> = self
            .fetch_all()
            .await?
            .into_iter()
            .filter(|cat| filter.matches(cat))
            .map(|cat| cat.id)
            .collect();

        for id in &matched {
            self.remove_record(id).await?;
        }
        Ok(matched.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::Client;
    use serde_json::json;

    fn create_request(name: &str, hungry: Option<bool>) -> CatCreateRequest {
        CatCreateRequest {
            name: Some(name.to_string()),
            birth_date: None,
            is_hungry: hungry,
            weight: None,
            extra: Map::new(),
        }
    }

    async fn setup_test_repo() -> RedisCatRepository {
        let redis_url = std::env::var("REDIS_TEST_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let client = Client::open(redis_url).expect("Failed to create Redis client");
        let connection_manager = ConnectionManager::new(client)
            .await
            .expect("Failed to create connection manager");

        RedisCatRepository::new(
            Arc::new(connection_manager),
            format!("cat-registry-test:{}", Uuid::new_v4()),
        )
        .expect("Failed to create RedisCatRepository")
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_new_repository_empty_prefix_fails() {
        let repo = setup_test_repo().await;
        let result = RedisCatRepository::new(repo.client.clone(), String::new());
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_key_generation() {
        let repo = setup_test_repo().await;
        assert_eq!(
            repo.cat_key("test-id"),
            format!("{}:cat:test-id", repo.key_prefix)
        );
        assert_eq!(
            repo.cat_index_key(),
            format!("{}:cat_index", repo.key_prefix)
        );
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_insert_and_find_preserves_order() {
        let repo = setup_test_repo().await;
        for name in ["A", "B", "C"] {
            repo.insert(create_request(name, None)).await.unwrap();
        }

        let cats = repo.find(&CatFilter::default(), None).await.unwrap();
        let names: Vec<&str> = cats.iter().filter_map(|c| c.name.as_deref()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_toggle_flips_and_persists() {
        let repo = setup_test_repo().await;
        let cat = repo.insert(create_request("Milo", None)).await.unwrap();

        let toggled = repo.find_by_id_and_toggle_hungry(&cat.id).await.unwrap();
        assert_eq!(toggled.is_hungry, Some(true));

        let stored = repo.find_by_id(&cat.id).await.unwrap();
        assert_eq!(stored.is_hungry, Some(true));
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_update_and_delete() {
        let repo = setup_test_repo().await;
        let cat = repo.insert(create_request("Milo", Some(true))).await.unwrap();

        let mut fields = Map::new();
        fields.insert("weight".to_string(), json!(4.5));
        let updated = repo.find_by_id_and_update(&cat.id, fields).await.unwrap();
        assert_eq!(updated.weight, Some(4.5));
        assert_eq!(updated.name.as_deref(), Some("Milo"));

        let deleted = repo.find_by_id_and_delete(&cat.id).await.unwrap();
        assert_eq!(deleted.id, cat.id);
        let result = repo.find_by_id(&cat.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[actix_web::test]
    #[ignore = "Requires active Redis instance"]
    async fn test_delete_many_fed_only() {
        let repo = setup_test_repo().await;
        repo.insert(create_request("Fed", Some(false))).await.unwrap();
        repo.insert(create_request("Hungry", Some(true))).await.unwrap();
        repo.insert(create_request("Unset", None)).await.unwrap();

        let removed = repo.delete_many(&CatFilter::fed()).await.unwrap();
        assert_eq!(removed, 1);

        let remaining = repo.find(&CatFilter::default(), None).await.unwrap();
        assert_eq!(remaining.len(), 2);
    }
}
