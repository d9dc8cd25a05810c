//! `CacheProvider` over Redis string keys.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::traits::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider. Entries are shared by every instance using
/// the same server and key prefix.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Wraps a connected client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
}

/// `EX` rejects zero; sub-second TTLs round up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.connection();
        conn.get(self.client.key(key)).await.map_err(redis_error)
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let mut conn = self.client.connection();
        // SET .. NX EX replies OK when written and nil when the key exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(self.client.key(key))
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds(ttl))
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;
        Ok(reply.is_some())
    }

    async fn health_check(&self) -> AppResult<()> {
        let mut conn = self.client.connection();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(redis_error)?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(AppError::cache(format!("Unexpected PING reply: {pong}")))
        }
    }
}
