//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// The in-memory backend never produces these, but the port keeps fallible
/// signatures so a durable backend can slot in behind the same trait.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Storage backend unavailable: {0}")]
    Backend(String),

    #[error("Entity not found")]
    NotFound,
}
