//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// TTL for the cached post list.
    pub cache_ttl: Duration,
    /// Cache keys dropped after every post mutation, alongside the
    /// `posts` tag. Mirrors path-based revalidation.
    pub revalidate_paths: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cache_ttl: Duration::from_secs(
                env::var("CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            revalidate_paths: Self::parse_revalidate_paths(),
        }
    }

    /// Parse revalidation paths from the environment.
    /// Format: REVALIDATE_PATHS=/api/posts,/feed
    fn parse_revalidate_paths() -> Vec<String> {
        match env::var("REVALIDATE_PATHS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
            Err(_) => vec!["/api/posts".to_string()],
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cache_ttl: Duration::from_secs(60),
            revalidate_paths: vec!["/api/posts".to_string()],
        }
    }
}
