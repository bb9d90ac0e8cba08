//! End-to-end API tests: the full actix app wired exactly as the binary
//! runs it, against a fresh seeded state per test.

use actix_web::{App, test, web};
use serde_json::{Value, json};

use quill_api::config::AppConfig;
use quill_api::handlers;
use quill_api::observability::RequestIdMiddleware;
use quill_api::state::AppState;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(AppState::new(&AppConfig::default())))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn create_post_appears_first_in_list() {
    let app = app!();

    let resp = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "A", "body": "B"}))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert!(body["ts"].as_i64().unwrap() > 0);

    let id = body["post"]["id"].as_i64().unwrap();
    assert!(id > 3, "new id must exceed the seeded maximum");
    assert_eq!(body["post"]["title"], "A");
    assert_eq!(body["post"]["body"], "B");

    let resp = test::TestRequest::get()
        .uri("/api/posts")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0]["id"].as_i64().unwrap(), id, "newest entry first");
}

#[actix_web::test]
async fn list_is_sorted_by_created_at_descending() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/posts")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;

    let stamps: Vec<i64> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["createdAt"].as_i64().unwrap())
        .collect();
    assert_eq!(stamps.len(), 3);
    for pair in stamps.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[actix_web::test]
async fn get_single_post() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/posts/1")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["post"]["id"].as_i64().unwrap(), 1);
}

#[actix_web::test]
async fn unknown_and_garbage_ids_are_not_found() {
    let app = app!();

    for uri in ["/api/posts/999", "/api/posts/abc"] {
        let resp = test::TestRequest::get().uri(uri).send_request(&app).await;
        assert_eq!(resp.status(), 404);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"ok": false, "error": "Not Found"}));
    }
}

#[actix_web::test]
async fn patch_updates_only_supplied_fields() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/posts/1")
        .send_request(&app)
        .await;
    let before: Value = test::read_body_json(resp).await;

    let resp = test::TestRequest::patch()
        .uri("/api/posts/1")
        .set_json(json!({"title": "Renamed"}))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let after: Value = test::read_body_json(resp).await;
    assert_eq!(after["post"]["title"], "Renamed");
    assert_eq!(after["post"]["body"], before["post"]["body"]);
    assert_eq!(after["post"]["createdAt"], before["post"]["createdAt"]);
}

#[actix_web::test]
async fn patch_with_non_string_field_still_applies_the_string_one() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/posts/1")
        .send_request(&app)
        .await;
    let before: Value = test::read_body_json(resp).await;

    let resp = test::TestRequest::patch()
        .uri("/api/posts/1")
        .set_json(json!({"title": 123, "body": "x"}))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let after: Value = test::read_body_json(resp).await;
    assert_eq!(after["post"]["body"], "x");
    assert_eq!(after["post"]["title"], before["post"]["title"]);
}

#[actix_web::test]
async fn create_with_non_string_title_falls_back_to_default() {
    let app = app!();

    let resp = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": 42, "body": "b"}))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["title"], "Untitled");
    assert_eq!(body["post"]["body"], "b");
}

#[actix_web::test]
async fn patch_unknown_id_is_not_found() {
    let app = app!();

    let resp = test::TestRequest::patch()
        .uri("/api/posts/999")
        .set_json(json!({"title": "X"}))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn delete_then_delete_again() {
    let app = app!();

    let resp = test::TestRequest::delete()
        .uri("/api/posts/2")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["id"].as_i64().unwrap(), 2);

    let resp = test::TestRequest::get()
        .uri("/api/posts/2")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 404);

    // Second delete fails cleanly, no crash, no side effects.
    let resp = test::TestRequest::delete()
        .uri("/api/posts/2")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 404);

    let resp = test::TestRequest::get()
        .uri("/api/posts")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn malformed_body_behaves_like_empty_object() {
    let app = app!();

    let resp = test::TestRequest::post()
        .uri("/api/posts")
        .set_payload("this is not json")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["title"], "Untitled");
    assert_eq!(body["post"]["body"], "");
}

#[actix_web::test]
async fn garbage_delay_parses_to_zero() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/posts?delay=abc")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn mutation_invalidates_cached_list() {
    let app = app!();

    // Prime the list cache.
    let resp = test::TestRequest::get()
        .uri("/api/posts")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let resp = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "Invalidator"}))
        .send_request(&app)
        .await;
    let created: Value = test::read_body_json(resp).await;
    let id = created["post"]["id"].as_i64().unwrap();

    // A stale cache would still serve the three seeded posts here.
    let resp = test::TestRequest::get()
        .uri("/api/posts")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"][0]["id"].as_i64().unwrap(), id);
}

#[actix_web::test]
async fn metrics_counts_hits_and_resets() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/metrics")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);

    let resp = test::TestRequest::get()
        .uri("/api/metrics")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"].as_u64().unwrap(), 2);

    // Empty reset value is ignored (original truthiness semantics).
    let resp = test::TestRequest::get()
        .uri("/api/metrics?reset=")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"].as_u64().unwrap(), 3);

    let resp = test::TestRequest::get()
        .uri("/api/metrics?reset=1")
        .send_request(&app)
        .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"].as_u64().unwrap(), 1);
}

#[actix_web::test]
async fn request_id_is_generated_or_echoed() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("x-request-id", "corr-123"))
        .send_request(&app)
        .await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "corr-123");

    let resp = test::TestRequest::get()
        .uri("/api/health")
        .send_request(&app)
        .await;
    assert!(!resp.headers().get("x-request-id").unwrap().is_empty());
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();

    let resp = test::TestRequest::get()
        .uri("/api/health")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
