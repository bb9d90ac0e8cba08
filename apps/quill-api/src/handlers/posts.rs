//! Post CRUD handlers.
//!
//! Wire format notes, kept stable for demo clients:
//! - every success payload carries `ts` (epoch ms at response time);
//! - malformed or missing JSON bodies behave like `{}` (defaults apply);
//! - the only error body is `{ok:false, error:"Not Found"}` with a 404.

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_shared::dto::{
    CreatePostRequest, DeletedResponse, PostListResponse, PostResponse, UpdatePostRequest,
};
use quill_shared::now_ms;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Cache key for the serialized post list.
const POSTS_CACHE_KEY: &str = "/api/posts";
/// Invalidation tag covering every posts-derived cache entry.
const POSTS_TAG: &str = "posts";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Artificial wait in milliseconds, for serial-vs-parallel fetch
    /// demos. Garbage values parse to 0.
    pub delay: Option<String>,
}

/// GET /api/posts?delay=N
pub async fn list(state: web::Data<AppState>, query: web::Query<ListQuery>) -> AppResult<HttpResponse> {
    let delay_ms = query
        .delay
        .as_deref()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    // Data-cache tier: only the list is cached; ts is stamped per response.
    if let Some(cached) = state.cache.get(POSTS_CACHE_KEY).await {
        if let Ok(posts) = serde_json::from_str::<Vec<Post>>(&cached) {
            tracing::debug!("Serving post list from cache");
            return Ok(HttpResponse::Ok().json(PostListResponse { posts, ts: now_ms() }));
        }
    }

    let posts = state.posts.list().await?;

    let encoded = serde_json::to_string(&posts)
        .map_err(|e| AppError::Internal(format!("Failed to encode post list: {e}")))?;
    state
        .cache
        .set_tagged(POSTS_CACHE_KEY, &encoded, &[POSTS_TAG], Some(state.cache_ttl))
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse { posts, ts: now_ms() }))
}

/// POST /api/posts
pub async fn create(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let req: CreatePostRequest = serde_json::from_slice(&body).unwrap_or_default();

    let post = state
        .posts
        .create(PostDraft {
            title: req.title,
            body: req.body,
        })
        .await?;

    revalidate_posts(&state).await;

    Ok(HttpResponse::Created().json(PostResponse {
        ok: true,
        post,
        ts: now_ms(),
    }))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.get(id).await?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(PostResponse {
        ok: true,
        post,
        ts: now_ms(),
    }))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req: UpdatePostRequest = serde_json::from_slice(&body).unwrap_or_default();

    let post = state
        .posts
        .update(
            id,
            PostPatch {
                title: req.title,
                body: req.body,
            },
        )
        .await?
        .ok_or(AppError::NotFound)?;

    revalidate_posts(&state).await;

    Ok(HttpResponse::Ok().json(PostResponse {
        ok: true,
        post,
        ts: now_ms(),
    }))
}

/// DELETE /api/posts/{id}
pub async fn remove(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    if !state.posts.remove(id).await? {
        return Err(AppError::NotFound);
    }

    revalidate_posts(&state).await;

    Ok(HttpResponse::Ok().json(DeletedResponse {
        ok: true,
        id,
        ts: now_ms(),
    }))
}

/// Non-numeric ids never match a post, so they read as not-found rather
/// than a distinct error class.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

/// Mark posts-derived cache entries stale after a mutation: drop the
/// `posts` tag, then the configured path keys.
async fn revalidate_posts(state: &AppState) {
    match state.cache.invalidate_tag(POSTS_TAG).await {
        Ok(dropped) => tracing::debug!(tag = POSTS_TAG, dropped, "Revalidated tag"),
        Err(err) => tracing::warn!(tag = POSTS_TAG, %err, "Tag invalidation failed"),
    }

    for path in state.revalidate_paths.iter() {
        if let Err(err) = state.cache.delete(path).await {
            tracing::warn!(path = %path, %err, "Path invalidation failed");
        }
    }
}
