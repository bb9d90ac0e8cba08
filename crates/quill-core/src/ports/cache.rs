use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - abstraction over caching backends.
///
/// Entries may be stored under invalidation tags; dropping a tag drops
/// every entry registered under it. This is the substrate behind the
/// post-mutation revalidation signals.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value in the cache with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Set a value and register it under the given invalidation tags.
    async fn set_tagged(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry registered under `tag`. Returns how many were dropped.
    async fn invalidate_tag(&self, tag: &str) -> Result<usize, CacheError>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> bool;
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
