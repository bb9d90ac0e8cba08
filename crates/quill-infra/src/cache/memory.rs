//! In-memory cache with TTL and tag-based invalidation.
//!
//! Keys map to entries; a second index maps each tag to the keys
//! registered under it, so invalidating a tag is one index lookup instead
//! of a full scan. Expired entries are dropped lazily on read.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
    tags: HashSet<String>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    tag_index: HashMap<String, HashSet<String>>,
}

impl CacheState {
    fn insert(&mut self, key: &str, value: &str, tags: &[&str], ttl: Option<Duration>) {
        // Replacing a key must drop its old tag registrations first.
        self.evict(key);

        for tag in tags {
            self.tag_index
                .entry(tag.to_string())
                .or_default()
                .insert(key.to_string());
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: ttl.map(|d| Instant::now() + d),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        );
    }

    fn evict(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.remove(key) else {
            return false;
        };
        for tag in &entry.tags {
            if let Some(keys) = self.tag_index.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tag_index.remove(tag);
                }
            }
        }
        true
    }
}

/// In-memory cache using a HashMap plus a tag index, behind an async RwLock.
///
/// Note: data is lost on process restart.
pub struct InMemoryCache {
    state: RwLock<CacheState>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
        }
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read().await;
        let entry = state.entries.get(key)?;

        if Self::is_expired(entry) {
            drop(state);
            // Re-check under the write lock; another task may have raced us.
            let mut state = self.state.write().await;
            if state.entries.get(key).is_some_and(Self::is_expired) {
                state.evict(key);
            }
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        self.set_tagged(key, value, &[], ttl).await
    }

    async fn set_tagged(
        &self,
        key: &str,
        value: &str,
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.insert(key, value, tags, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut state = self.state.write().await;
        state.evict(key);
        Ok(())
    }

    async fn invalidate_tag(&self, tag: &str) -> Result<usize, CacheError> {
        let mut state = self.state.write().await;

        let keys: Vec<String> = state
            .tag_index
            .get(tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();

        let mut dropped = 0;
        for key in &keys {
            if state.evict(key) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::debug!(tag, dropped, "Cache tag invalidated");
        }
        Ok(dropped)
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}
