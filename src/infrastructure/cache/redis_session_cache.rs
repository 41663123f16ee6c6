use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::env;

use crate::application::ports::session_cache::{SessionCache, SessionCacheError};

#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    pub url: String,
    /// Optional expiry applied to session keys on every write; `None` keeps
    /// entries until Redis itself evicts them.
    pub ttl_secs: Option<i64>,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        let url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0);

        Self { url, ttl_secs }
    }
}

/// Redis-backed session cache.
pub struct RedisSessionCache {
    manager: ConnectionManager,
    ttl_secs: Option<i64>,
}

impl RedisSessionCache {
    pub async fn connect(config: RedisCacheConfig) -> Result<Self, SessionCacheError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| SessionCacheError::ConnectionError(e.to_string()))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| SessionCacheError::ConnectionError(e.to_string()))?;

        Ok(Self {
            manager,
            ttl_secs: config.ttl_secs,
        })
    }

    pub async fn from_env() -> Result<Self, SessionCacheError> {
        Self::connect(RedisCacheConfig::default()).await
    }

    async fn touch_expiry(
        &self,
        conn: &mut ConnectionManager,
        key: &str,
    ) -> Result<(), SessionCacheError> {
        if let Some(ttl) = self.ttl_secs {
            let _: bool = conn
                .expire(key, ttl)
                .await
                .map_err(|e| SessionCacheError::OperationError(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn list_append(&self, key: &str, entry: &str) -> Result<(), SessionCacheError> {
        let mut conn = self.manager.clone();

        let _: i64 = conn
            .rpush(key, entry)
            .await
            .map_err(|e| SessionCacheError::OperationError(e.to_string()))?;

        self.touch_expiry(&mut conn, key).await
    }

    async fn list_tail(
        &self,
        key: &str,
        max_entries: usize,
    ) -> Result<Vec<String>, SessionCacheError> {
        if max_entries == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.manager.clone();
        let start = -(max_entries as isize);

        conn.lrange(key, start, -1)
            .await
            .map_err(|e| SessionCacheError::OperationError(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SessionCacheError> {
        let mut conn = self.manager.clone();

        conn.get(key)
            .await
            .map_err(|e| SessionCacheError::OperationError(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionCacheError> {
        let mut conn = self.manager.clone();

        let _: () = conn
            .set(key, value)
            .await
            .map_err(|e| SessionCacheError::OperationError(e.to_string()))?;

        self.touch_expiry(&mut conn, key).await
    }

    async fn delete(&self, key: &str) -> Result<(), SessionCacheError> {
        let mut conn = self.manager.clone();

        let _: i64 = conn
            .del(key)
            .await
            .map_err(|e| SessionCacheError::OperationError(e.to_string()))?;

        Ok(())
    }
}
