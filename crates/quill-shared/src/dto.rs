//! Data Transfer Objects - request/response types for the API.
//!
//! Every success payload carries a `ts` field (current epoch ms) so
//! clients can tell a fresh render from a cached one.

use serde::{Deserialize, Deserializer, Serialize};

use quill_core::domain::Post;

/// Field-level leniency: only a JSON string counts as a supplied value.
/// Numbers, null, and other shapes read as absent instead of failing the
/// whole body, so one bad field never swallows a valid sibling.
fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

/// Request body for POST /api/posts. All fields optional; defaults apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub body: Option<String>,
}

/// Request body for PATCH /api/posts/{id}. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "string_or_absent")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_absent")]
    pub body: Option<String>,
}

/// Response for GET /api/posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub ts: i64,
}

/// Response for single-post operations (create, get, update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub ok: bool,
    pub post: Post,
    pub ts: i64,
}

/// Response for DELETE /api/posts/{id}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub ok: bool,
    pub id: i64,
    pub ts: i64,
}

/// Response for GET /api/metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub count: u64,
    pub ts: i64,
}
