//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use foldview_core::config::cache::MemoryCacheConfig;
use foldview_core::result::AppResult;
use foldview_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// Entries live for the shorter of the cache-wide `time_to_live_seconds`
/// and the provider's default TTL.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, String>,
    ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let ttl = Duration::from_secs(config.time_to_live_seconds.min(default_ttl_seconds));
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }

    /// Effective time to live of every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // moka has no key scan; iterate and match the prefix.
        let prefix = pattern.trim_end_matches('*');
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.to_string())
            .collect();

        let mut count = 0u64;
        for key in keys_to_remove {
            self.cache.remove(&key).await;
            count += 1;
        }

        debug!(pattern, count, "Deleted keys matching pattern");
        Ok(count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider.set("key1", "value1").await.unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
        assert_eq!(provider.get("missing").await.unwrap(), None);
    }

    #[test]
    fn test_shorter_ttl_wins() {
        let config = MemoryCacheConfig {
            max_capacity: 10,
            time_to_live_seconds: 600,
        };
        assert_eq!(MemoryCacheProvider::new(&config, 30).ttl(), Duration::from_secs(30));
        assert_eq!(MemoryCacheProvider::new(&config, 900).ttl(), Duration::from_secs(600));
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let provider = make_provider();
        provider.set("foldview:tree:1:a", "x").await.unwrap();
        provider.set("foldview:tree:1:b", "y").await.unwrap();
        provider.set("foldview:tree:10:a", "z").await.unwrap();

        let removed = provider.delete_pattern("foldview:tree:1:*").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(provider.get("foldview:tree:1:a").await.unwrap(), None);
        assert_eq!(
            provider.get("foldview:tree:10:a").await.unwrap(),
            Some("z".to_string())
        );
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let provider = make_provider();
        provider.set_json("nums", &vec![1u64, 2, 3]).await.unwrap();
        let nums: Option<Vec<u64>> = provider.get_json("nums").await.unwrap();
        assert_eq!(nums, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_flush_all() {
        let provider = make_provider();
        provider.set("a", "1").await.unwrap();
        provider.flush_all().await.unwrap();
        assert_eq!(provider.get("a").await.unwrap(), None);
    }
}
