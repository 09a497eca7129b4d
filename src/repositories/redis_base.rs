//! Base Redis repository functionality: serialization helpers and error
//! translation shared by Redis-backed implementations.

use log::{error, warn};
use redis::RedisError;
use serde::{Deserialize, Serialize};

use crate::models::RepositoryError;

pub trait RedisRepository {
    fn serialize_entity<T>(
        &self,
        entity: &T,
        entity_id: &str,
        entity_type: &str,
    ) -> Result<String, RepositoryError>
    where
        T: Serialize,
    {
        serde_json::to_string(entity).map_err(|e| {
            error!("Serialization failed for {} {}: {}", entity_type, entity_id, e);
            RepositoryError::InvalidData(format!(
                "Failed to serialize {} {}: {}",
                entity_type, entity_id, e
            ))
        })
    }

    fn deserialize_entity<T>(
        &self,
        json: &str,
        entity_id: &str,
        entity_type: &str,
    ) -> Result<T, RepositoryError>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_json::from_str(json).map_err(|e| {
            error!(
                "Deserialization failed for {} {}: {}",
                entity_type, entity_id, e
            );
            RepositoryError::InvalidData(format!(
                "Failed to deserialize {} {}: {}",
                entity_type, entity_id, e
            ))
        })
    }

    /// Translates Redis errors into the store error taxonomy.
    fn map_redis_error(&self, error: RedisError, context: &str) -> RepositoryError {
        warn!("Redis operation failed in context '{}': {}", context, error);

        if error.is_connection_refusal() || error.is_io_error() || error.is_timeout() {
            return RepositoryError::ConnectionError(format!(
                "Redis operation '{}' failed: {}",
                context, error
            ));
        }

        match error.kind() {
            redis::ErrorKind::TypeError => RepositoryError::InvalidData(format!(
                "Redis data type error in operation '{}': {}",
                context, error
            )),
            _ => RepositoryError::Other(format!("Redis operation '{}' failed: {}", context, error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestEntity {
        id: String,
        value: i32,
    }

    struct TestRedisRepository;

    impl RedisRepository for TestRedisRepository {}

    #[test]
    fn test_serialize_round_trip() {
        let repo = TestRedisRepository;
        let entity = TestEntity {
            id: "e1".to_string(),
            value: 7,
        };

        let json = repo.serialize_entity(&entity, "e1", "test").unwrap();
        let back: TestEntity = repo.deserialize_entity(&json, "e1", "test").unwrap();
        assert_eq!(back, entity);
    }

    #[test]
    fn test_deserialize_garbage_is_invalid_data() {
        let repo = TestRedisRepository;
        let result: Result<TestEntity, _> = repo.deserialize_entity("not json", "e1", "test");
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }
}
