//! Integration tests for the Holocron HTTP API.
//!
//! Uses axum-test to drive the router without binding a socket. The remote
//! API is replaced by a scripted transport and the database by a memory store.

#![allow(clippy::unwrap_used, clippy::panic)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use holocron::api::{
    AppState, FavoritesResponse, HealthResponse, StatusResponse, ToggleResponse, ViewResponse,
    create_router,
};
use holocron::browser::assemble;
use holocron_core::{FetchError, HttpResponse, MemoryStore, Transport};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

const BASE: &str = "https://swapi.test/api";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Serves canned bodies by URL; anything else is a 404.
struct Scripted {
    routes: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl Transport for Scripted {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.routes.get(url) {
            Some(body) => HttpResponse::ok(body.clone()),
            None => HttpResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            },
        })
    }
}

fn create_test_router() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let routes: HashMap<String, String> = [
        (
            format!("{}/people/", BASE),
            json!({"results": [{
                "name": "Luke Skywalker",
                "birth_year": "19BBY",
                "eye_color": "blue",
                "url": "https://swapi.dev/api/people/1/"
            }]})
            .to_string(),
        ),
        (
            format!("{}/people/1/", BASE),
            json!({
                "name": "Luke Skywalker",
                "height": "172",
                "eye_color": "blue",
                "films": ["https://swapi.dev/api/films/1/"],
                "url": "https://swapi.dev/api/people/1/"
            })
            .to_string(),
        ),
        (format!("{}/planets/", BASE), "not json".to_string()),
    ]
    .into_iter()
    .collect();

    let transport = Scripted {
        routes,
        calls: Arc::clone(&calls),
    };
    let browser = assemble(Box::new(MemoryStore::new()), BASE, Box::new(transport));
    (create_router(AppState::new(browser)), calls)
}

fn create_test_server() -> (TestServer, Arc<AtomicUsize>) {
    let (router, calls) = create_test_router();
    (TestServer::new(router).unwrap(), calls)
}

// =============================================================================
// SHELL & HEALTH TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_shell_page() {
    let (server, calls) = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("id=\"navList\""));
    assert!(page.contains("href=\"#/starships\""));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// VIEW ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_view_home_by_default() {
    let (server, _) = create_test_server();

    let view: ViewResponse = server.get("/view").await.json();

    assert!(view.success);
    assert_eq!(view.view, "home");
    assert_eq!(view.route, "#/");
    assert!(view.active_nav.is_none());
    assert!(view.html.contains("home-view"));
}

#[tokio::test]
async fn test_view_list() {
    let (server, _) = create_test_server();

    let response = server
        .get("/view")
        .add_query_param("fragment", "#/people")
        .await;

    response.assert_status_ok();
    let view: ViewResponse = response.json();
    assert_eq!(view.view, "list");
    assert_eq!(view.active_nav.as_deref(), Some("#/people"));
    assert!(view.html.contains("Luke Skywalker"));
    assert!(view.html.contains("Nacimiento: 19BBY"));
    assert!(view.html.contains("glow-hover-blue"));
    assert!(view.html.contains(r##"href="#/people/1""##));
}

#[tokio::test]
async fn test_view_is_cached() {
    let (server, calls) = create_test_server();

    for _ in 0..3 {
        server
            .get("/view")
            .add_query_param("fragment", "#/people/1")
            .await
            .assert_status_ok();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_view_detail_excludes_fields() {
    let (server, _) = create_test_server();

    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/PEOPLE/1")
        .await
        .json();

    assert_eq!(view.view, "detail");
    assert_eq!(view.route, "#/people/1");
    assert_eq!(view.active_nav.as_deref(), Some("#/people"));
    assert!(view.html.contains("height"));
    assert!(view.html.contains("eye color"));
    assert!(!view.html.contains("films"));
    assert!(view.html.contains("favorite-toggle"));
    assert!(!view.html.contains("is-favorite"));
}

#[tokio::test]
async fn test_view_failures_render_in_place() {
    let (server, _) = create_test_server();

    // 404 from the remote API
    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/films")
        .await
        .json();
    assert!(view.success);
    assert!(view.html.contains("Error al cargar datos"));

    // unparsable body
    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/planets")
        .await
        .json();
    assert!(view.html.contains("Error al cargar datos"));
}

#[tokio::test]
async fn test_view_unknown_section() {
    let (server, calls) = create_test_server();

    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/droids")
        .await
        .json();

    assert_eq!(view.view, "unknown");
    assert!(view.active_nav.is_none());
    assert!(view.html.contains("not-found"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// FAVORITES ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_favorites_empty() {
    let (server, _) = create_test_server();

    let response: FavoritesResponse = server.get("/favorites").await.json();

    assert!(response.success);
    assert!(response.favorites.is_empty());
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let (server, _) = create_test_server();
    let body = json!({"category": "people", "id": "1", "name": "Luke Skywalker"});

    let response = server.post("/favorites/toggle").json(&body).await;
    response.assert_status_ok();
    let toggled: ToggleResponse = response.json();
    assert!(toggled.success);
    assert!(toggled.favorite);
    assert!(
        toggled
            .control_html
            .unwrap()
            .contains("favorite-toggle is-favorite")
    );

    let listed: FavoritesResponse = server.get("/favorites").await.json();
    assert_eq!(listed.favorites.len(), 1);
    assert_eq!(listed.favorites[0].name, "Luke Skywalker");

    // The favorites view and a fresh detail render both see the new state.
    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/favorites")
        .await
        .json();
    assert!(view.html.contains("Luke Skywalker"));
    let view: ViewResponse = server
        .get("/view")
        .add_query_param("fragment", "#/people/1")
        .await
        .json();
    assert!(view.html.contains("is-favorite"));

    let toggled: ToggleResponse = server.post("/favorites/toggle").json(&body).await.json();
    assert!(!toggled.favorite);
    let listed: FavoritesResponse = server.get("/favorites").await.json();
    assert!(listed.favorites.is_empty());
}

#[tokio::test]
async fn test_toggle_accepts_numeric_id() {
    let (server, _) = create_test_server();

    let response = server
        .post("/favorites/toggle")
        .json(&json!({"category": "planets", "id": 1, "name": "Tatooine"}))
        .await;

    response.assert_status_ok();
    let toggled: ToggleResponse = response.json();
    assert!(toggled.favorite);
}

#[tokio::test]
async fn test_toggle_rejects_bad_target() {
    let (server, _) = create_test_server();

    for body in [
        json!({"category": "droids", "id": "1", "name": "R2-D2"}),
        json!({"category": "people", "id": "0", "name": "Nobody"}),
        json!({"category": "people", "id": "abc", "name": "Nobody"}),
    ] {
        let response = server.post("/favorites/toggle").json(&body).await;
        response.assert_status_bad_request();
        let toggled: ToggleResponse = response.json();
        assert!(!toggled.success);
        assert!(toggled.error.is_some());
    }

    let listed: FavoritesResponse = server.get("/favorites").await.json();
    assert!(listed.favorites.is_empty());
}

// =============================================================================
// STATUS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_status_counts() {
    let (server, _) = create_test_server();

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.cache_entries, 0);
    assert_eq!(status.favorites, 0);

    server
        .get("/view")
        .add_query_param("fragment", "#/people")
        .await
        .assert_status_ok();
    server
        .post("/favorites/toggle")
        .json(&json!({"category": "people", "id": "1", "name": "Luke Skywalker"}))
        .await
        .assert_status_ok();

    let status: StatusResponse = server.get("/status").await.json();
    assert_eq!(status.cache_entries, 1);
    assert_eq!(status.favorites, 1);
}

// =============================================================================
// MIDDLEWARE STACK TESTS
// =============================================================================

#[tokio::test]
async fn test_cors_preflight_allows_localhost() {
    let (router, calls) = create_test_router();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/view")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let (router, _) = create_test_router();
    let body = json!({"category": "people", "id": "1", "name": "x".repeat(70 * 1024)}).to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/favorites/toggle")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
