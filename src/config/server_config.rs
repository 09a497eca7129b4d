/// Configuration for the server, read from the process environment.
use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
    /// Connection string for the record store. When set, the Redis backend
    /// is used; when unset, records are kept in memory.
    pub database_url: Option<String>,
    /// Namespace prefix for every key the Redis backend writes.
    pub redis_key_prefix: String,
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `PORT` defaults to `3000`.
    /// - `DATABASE_URL` has no default; without it the in-memory store is
    ///   used.
    /// - `REDIS_KEY_PREFIX` defaults to `"cat-registry"`.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").ok(),
            redis_key_prefix: env::var("REDIS_KEY_PREFIX")
                .unwrap_or_else(|_| "cat-registry".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::env;
    use std::sync::Mutex;

    // Use a mutex to ensure tests don't run in parallel when modifying env vars
    lazy_static! {
        static ref ENV_MUTEX: Mutex<()> = Mutex::new(());
    }

    fn setup() {
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("REDIS_KEY_PREFIX");
    }

    #[test]
    fn test_default_values() {
        let _lock = ENV_MUTEX.lock().unwrap();
        setup();

        let config = ServerConfig::from_env();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, None);
        assert_eq!(config.redis_key_prefix, "cat-registry");
    }

    #[test]
    fn test_environment_overrides() {
        let _lock = ENV_MUTEX.lock().unwrap();
        setup();
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "8088");
        env::set_var("DATABASE_URL", "redis://localhost:6379");
        env::set_var("REDIS_KEY_PREFIX", "cats-staging");

        let config = ServerConfig::from_env();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8088);
        assert_eq!(
            config.database_url.as_deref(),
            Some("redis://localhost:6379")
        );
        assert_eq!(config.redis_key_prefix, "cats-staging");

        setup();
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        setup();
        env::set_var("PORT", "not_a_number");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 3000);

        setup();
    }
}
