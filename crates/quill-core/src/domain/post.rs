use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fallback title for posts created without one.
pub const UNTITLED: &str = "Untitled";

/// Post entity - the sole domain object, a blog-post-like record.
///
/// `created_at` travels as epoch milliseconds on the wire and is immutable
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a post from a draft under a freshly assigned id.
    pub fn from_draft(id: i64, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title.unwrap_or_else(|| UNTITLED.to_string()),
            body: draft.body.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update. Only fields the caller actually supplied
    /// are overwritten; id and created_at never change.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }
}

/// Input for creating a post. Missing fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Partial update. `None` (absent or JSON null) leaves the field alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}
