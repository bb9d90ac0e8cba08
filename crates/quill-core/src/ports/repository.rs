use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::RepoError;

/// Post repository - the authoritative record of posts.
///
/// Signatures are fallible so a durable backend can implement the same
/// port; the in-memory implementation always succeeds.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, sorted by creation time descending (newest first).
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn get(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Assign the next id, fill defaults, and append a new post.
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Partially update a post. `None` means the post does not exist.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Remove a post. `false` means nothing matched the id.
    async fn remove(&self, id: i64) -> Result<bool, RepoError>;
}
