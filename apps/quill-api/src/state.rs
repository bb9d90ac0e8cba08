//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use quill_core::ports::{Cache, PostRepository};
use quill_infra::{HitCounter, InMemoryCache, InMemoryPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub cache: Arc<dyn Cache>,
    pub hits: Arc<HitCounter>,
    pub cache_ttl: Duration,
    pub revalidate_paths: Arc<Vec<String>>,
}

impl AppState {
    /// Build the application state. Everything is in-memory; the post
    /// store starts seeded with the three sample rows.
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!("Application state initialized (in-memory store, seeded)");

        Self {
            posts: Arc::new(InMemoryPostRepository::seeded()),
            cache: Arc::new(InMemoryCache::new()),
            hits: Arc::new(HitCounter::new()),
            cache_ttl: config.cache_ttl,
            revalidate_paths: Arc::new(config.revalidate_paths.clone()),
        }
    }
}
