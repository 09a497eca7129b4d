//! Application state initialization
//!
//! Builds the record store backend selected by the server configuration and
//! wraps it into the shared application state. The store handle is opened
//! once here and lives for the whole process.

use std::sync::Arc;

use actix_web::web;
use color_eyre::Result;
use log::info;

use crate::config::ServerConfig;
use crate::models::AppState;
use crate::repositories::CatRepositoryStorage;

/// Initializes the cat repository from configuration: Redis when a
/// `DATABASE_URL` is set, in-memory otherwise.
pub async fn initialize_repository(config: &ServerConfig) -> Result<CatRepositoryStorage> {
    match &config.database_url {
        Some(url) => {
            let redis_client = redis::Client::open(url.as_str())?;
            let connection_manager = redis::aio::ConnectionManager::new(redis_client).await?;
            info!("Connected to store at {}", url);
            Ok(CatRepositoryStorage::new_redis(
                Arc::new(connection_manager),
                config.redis_key_prefix.clone(),
            )?)
        }
        None => {
            info!("DATABASE_URL not set; using the in-memory store");
            Ok(CatRepositoryStorage::new_in_memory())
        }
    }
}

/// Creates the shared application state handed to every request handler.
pub async fn initialize_app_state(config: &ServerConfig) -> Result<web::ThinData<AppState>> {
    let repository = initialize_repository(config).await?;
    let app_state = AppState {
        cat_repository: Arc::new(repository),
    };
    Ok(web::ThinData(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_in_memory_backend_when_no_database_url() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: None,
            redis_key_prefix: "cat-registry".to_string(),
        };

        let repository = initialize_repository(&config).await.unwrap();
        assert!(matches!(repository, CatRepositoryStorage::InMemory(_)));
    }
}
