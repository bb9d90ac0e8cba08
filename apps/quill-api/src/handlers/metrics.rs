//! Request-count endpoint.
//!
//! Each hit bumps an in-memory counter. A client-side cache or request
//! deduper is visible as a count that stops moving.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::dto::MetricsResponse;
use quill_shared::now_ms;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    /// Zero the counter first when present and non-empty.
    pub reset: Option<String>,
}

/// GET /api/metrics?reset=
pub async fn hit(state: web::Data<AppState>, query: web::Query<MetricsQuery>) -> HttpResponse {
    if query.reset.as_deref().is_some_and(|v| !v.is_empty()) {
        state.hits.reset();
    }

    HttpResponse::Ok().json(MetricsResponse {
        count: state.hits.bump(),
        ts: now_ms(),
    })
}
