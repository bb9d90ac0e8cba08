//! In-memory post store.
//!
//! A plain `Vec` plus an id counter behind an async `RwLock`. Data is lost
//! on restart; the store reseeds with three fixed sample rows.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

struct PostTable {
    posts: Vec<Post>,
    next_id: i64,
}

/// In-memory post repository.
///
/// Ids are assigned from a counter that starts above the seeded maximum
/// and only ever moves forward, so deleted ids are never reused.
pub struct InMemoryPostRepository {
    table: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    /// A store pre-populated with the three sample posts.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let posts = vec![
            Post {
                id: 1,
                title: "Hello Quill".to_string(),
                body: "Welcome to the demo API.".to_string(),
                created_at: now - ChronoDuration::minutes(60),
            },
            Post {
                id: 2,
                title: "Server-side data".to_string(),
                body: "Fetched on the server, streamed to the page.".to_string(),
                created_at: now - ChronoDuration::minutes(30),
            },
            Post {
                id: 3,
                title: "Client fetching".to_string(),
                body: "Query and mutate from the browser.".to_string(),
                created_at: now - ChronoDuration::minutes(10),
            },
        ];
        Self::with_posts(posts)
    }

    /// An empty store. Useful in tests that control their own rows.
    pub fn empty() -> Self {
        Self::with_posts(Vec::new())
    }

    fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            table: RwLock::new(PostTable { posts, next_id }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        let mut posts = table.posts.clone();
        // Newest first; ties within the same millisecond break on higher id.
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;

        let post = Post::from_draft(id, draft);
        table.posts.push(post.clone());

        tracing::debug!(id = post.id, title = %post.title, "Post created");
        Ok(post)
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut table = self.table.write().await;
        let Some(post) = table.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.apply(patch);
        tracing::debug!(id, "Post updated");
        Ok(Some(post.clone()))
    }

    async fn remove(&self, id: i64) -> Result<bool, RepoError> {
        let mut table = self.table.write().await;
        let Some(idx) = table.posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        table.posts.remove(idx);
        tracing::debug!(id, "Post removed");
        Ok(true)
    }
}
