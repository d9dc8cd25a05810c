//! Provider selection by configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use storefront_core::config::CacheConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::CacheProvider;

/// The cache provider named by `cache.provider`, behind one handle.
#[derive(Debug, Clone)]
pub struct CacheManager {
    inner: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Builds the configured provider and checks it responds.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let inner: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisCacheProvider::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => Arc::new(crate::memory::MemoryCacheProvider::new(&config.memory)),
            other => {
                return Err(AppError::configuration(format!(
                    "cache.provider '{other}' is not available in this build"
                )));
            }
        };

        inner.health_check().await?;
        info!(provider = %config.provider, "Cache provider ready");
        Ok(Self { inner })
    }

    /// Wraps an already-built provider.
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl CacheProvider for CacheManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.set_if_absent(key, value, ttl).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.inner.health_check().await
    }
}
