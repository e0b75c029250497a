//! Tests for the store module

use super::*;
use crate::auth::{CredentialProvider, NoCredentials, SessionCredentials, StaticToken};
use crate::error::{Error, ErrorKind};
use crate::http::{HttpClient, HttpClientConfig};
use crate::resource::{names, ResourceDef};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Item {
    id: String,
}

// ============================================================================
// Helpers
// ============================================================================

fn client(server: &MockServer, timeout: Duration) -> Arc<HttpClient> {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/api", server.uri()))
        .timeout(timeout)
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn store_with(
    server: &MockServer,
    name: &str,
    credentials: Arc<dyn CredentialProvider>,
) -> PaginatedStore<Item> {
    PaginatedStore::new(
        ResourceDef::builtin(name).unwrap(),
        client(server, Duration::from_secs(5)),
        credentials,
    )
}

fn projects(server: &MockServer) -> PaginatedStore<Item> {
    store_with(server, names::PROJECTS, Arc::new(NoCredentials))
}

fn items(ids: &[&str]) -> Vec<Value> {
    ids.iter().map(|id| json!({ "id": id })).collect()
}

fn ids(state: &StoreState<Item>) -> Vec<String> {
    state.items.iter().map(|i| i.id.clone()).collect()
}

async fn mount_projects_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

// ============================================================================
// fetch_page
// ============================================================================

#[tokio::test]
async fn test_initial_state() {
    let server = MockServer::start().await;
    let state = projects(&server).state();

    assert!(state.items.is_empty());
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_pages, 1);
    assert_eq!(state.page_limit, 4);
    assert!(!state.is_loading);
    assert!(!state.is_loading_more);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_fetch_page_replaces_items() {
    let server = MockServer::start().await;
    mount_projects_page(
        &server,
        1,
        json!({"projects": items(&["A", "B", "C", "D"]), "totalPages": 3}),
    )
    .await;

    let store = projects(&server);
    let outcome = store.try_fetch_page(1, 4).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Loaded { page: 1, items: 4 });
    let state = store.state();
    assert_eq!(ids(&state), vec!["A", "B", "C", "D"]);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_pages, 3);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_fetch_page_sends_page_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["K"]), "totalPages": 5})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(2, 10).await;

    let state = store.state();
    assert_eq!(ids(&state), vec!["K"]);
    assert_eq!(state.current_page, 2);
    assert_eq!(state.page_limit, 10);
}

#[tokio::test]
async fn test_fetch_page_twice_replaces_not_appends() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A", "B"]), "totalPages": 2})).await;
    mount_projects_page(&server, 2, json!({"projects": items(&["C"]), "totalPages": 2})).await;

    let store = projects(&server);
    store.fetch_page(1, 2).await;
    store.fetch_page(2, 2).await;

    let state = store.state();
    assert_eq!(ids(&state), vec!["C"]);
    assert_eq!(state.current_page, 2);
}

#[tokio::test]
async fn test_bare_array_is_single_page() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!(items(&["X", "Y"]))).await;

    let store = projects(&server);
    store.fetch_page(1, 4).await;

    let state = store.state();
    assert_eq!(ids(&state), vec!["X", "Y"]);
    assert_eq!(state.total_pages, 1);
    assert!(!state.has_more());
}

#[tokio::test]
async fn test_current_page_never_exceeds_total_pages() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 4, json!({"projects": [], "totalPages": 2})).await;

    let store = projects(&server);
    store.fetch_page(4, 4).await;

    let state = store.state();
    assert_eq!(state.current_page, 4);
    assert!(state.current_page <= state.total_pages);
}

#[tokio::test]
async fn test_zero_page_and_limit_are_clamped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items(&["A"]))))
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(0, 0).await;

    assert_eq!(ids(&store.state()), vec!["A"]);
}

#[tokio::test]
async fn test_failed_fetch_page_empties_items() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A", "B"]), "totalPages": 3})).await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 2).await;
    assert_eq!(store.state().items.len(), 2);

    let err = store.try_fetch_page(2, 2).await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let state = store.state();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
    let error = state.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Status);
    assert_eq!(error.message, "Failed to load projects. Please try again later.");
}

#[tokio::test]
async fn test_failed_fetch_page_resets_cursor() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 3})).await;

    let store = projects(&server);
    store.fetch_page(1, 1).await;
    assert!(store.state().has_more());

    // page 9 is not mounted: 404
    store.fetch_page(9, 1).await;
    assert!(!store.state().has_more());

    let before = request_count(&server).await;
    assert_eq!(store.try_load_more().await.unwrap(), FetchOutcome::Skipped);
    assert_eq!(request_count(&server).await, before);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"data": []})).await;

    let store = projects(&server);
    store.fetch_page(1, 4).await;

    let state = store.state();
    assert!(state.items.is_empty());
    assert_eq!(state.error.unwrap().kind, ErrorKind::Decode);
}

#[tokio::test]
async fn test_timeout_is_distinct_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(items(&["A"])))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let store = PaginatedStore::<Item>::new(
        ResourceDef::builtin(names::PROJECTS).unwrap(),
        client(&server, Duration::from_millis(50)),
        Arc::new(NoCredentials),
    );
    let err = store.try_fetch_page(1, 4).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));

    let state = store.state();
    assert!(!state.is_loading);
    let error = state.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Timeout);
    assert_eq!(
        error.message,
        "Loading projects timed out. Please try again later."
    );
}

#[tokio::test]
async fn test_next_attempt_clears_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_projects_page(&server, 1, json!(items(&["A"]))).await;

    let store = projects(&server);
    store.fetch_page(1, 4).await;
    assert!(store.state().error.is_some());

    // no automatic retry happened
    assert_eq!(request_count(&server).await, 1);

    store.fetch_page(1, 4).await;
    let state = store.state();
    assert_eq!(state.error, None);
    assert_eq!(ids(&state), vec!["A"]);
}

// ============================================================================
// load_more
// ============================================================================

#[tokio::test]
async fn test_load_more_appends_next_page() {
    let server = MockServer::start().await;
    mount_projects_page(
        &server,
        1,
        json!({"projects": items(&["A", "B", "C", "D"]), "totalPages": 3}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"projects": items(&["E", "F", "G", "H"]), "totalPages": 3}),
        ))
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 4).await;
    let outcome = store.try_load_more().await.unwrap();

    assert_eq!(outcome, FetchOutcome::Loaded { page: 2, items: 4 });
    let state = store.state();
    assert_eq!(ids(&state), vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
    assert_eq!(state.current_page, 2);
    assert_eq!(state.total_pages, 3);
    assert!(!state.is_loading_more);
}

#[tokio::test]
async fn test_load_more_uses_last_limit() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A", "B"]), "totalPages": 2})).await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["C"]), "totalPages": 2})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 2).await;
    store.load_more().await;

    assert_eq!(ids(&store.state()), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_load_more_on_last_page_is_noop() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 1})).await;

    let store = projects(&server);
    store.fetch_page(1, 4).await;
    let before = store.state();
    let requests = request_count(&server).await;

    assert_eq!(store.try_load_more().await.unwrap(), FetchOutcome::Skipped);

    assert_eq!(store.state(), before);
    assert_eq!(request_count(&server).await, requests);
}

#[tokio::test]
async fn test_load_more_before_any_fetch_is_noop() {
    let server = MockServer::start().await;
    let store = projects(&server);

    store.load_more().await;

    assert_eq!(request_count(&server).await, 0);
    assert!(store.state().items.is_empty());
}

#[tokio::test]
async fn test_load_more_until_exhausted() {
    let server = MockServer::start().await;
    for (page, id) in [(1, "A"), (2, "B"), (3, "C")] {
        mount_projects_page(&server, page, json!({"projects": items(&[id]), "totalPages": 3}))
            .await;
    }

    let store = projects(&server);
    store.fetch_page(1, 1).await;
    let mut previous = store.state().items.len();
    while store.state().has_more() {
        store.load_more().await;
        let len = store.state().items.len();
        assert!(len >= previous);
        previous = len;
    }

    let state = store.state();
    assert_eq!(ids(&state), vec!["A", "B", "C"]);
    assert_eq!(state.current_page, 3);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_failed_load_more_keeps_items() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A", "B"]), "totalPages": 3})).await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 2).await;
    let err = store.try_load_more().await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    let state = store.state();
    assert_eq!(ids(&state), vec!["A", "B"]);
    assert_eq!(state.current_page, 1);
    assert!(!state.is_loading_more);
    let error = state.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Status);
    assert_eq!(error.message, "Failed to load more projects. Please try again.");
}

// ============================================================================
// clear_error / reset / refresh
// ============================================================================

#[tokio::test]
async fn test_clear_error() {
    let server = MockServer::start().await;
    let store = projects(&server);

    // nothing mounted: 404
    store.fetch_page(1, 4).await;
    assert!(store.state().error.is_some());
    let requests = request_count(&server).await;

    store.clear_error();
    assert_eq!(store.state().error, None);
    store.clear_error();
    assert_eq!(store.state().error, None);

    assert_eq!(request_count(&server).await, requests);
}

#[tokio::test]
async fn test_refresh_refetches_first_page_with_last_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["A", "B"]), "totalPages": 2})),
        )
        .expect(2)
        .mount(&server)
        .await;
    mount_projects_page(&server, 2, json!({"projects": items(&["C"]), "totalPages": 2})).await;

    let store = projects(&server);
    store.fetch_page(1, 2).await;
    store.load_more().await;
    assert_eq!(store.state().items.len(), 3);

    store.refresh().await;
    let state = store.state();
    assert_eq!(ids(&state), vec!["A", "B"]);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_reset_returns_to_initial_state() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 2})).await;

    let store = projects(&server);
    store.fetch_page(1, 9).await;
    store.reset();

    let state = store.state();
    assert!(state.items.is_empty());
    assert_eq!(state.page_limit, 4);
    assert_eq!(state.total_pages, 1);
}

#[tokio::test]
async fn test_subscribers_see_updates() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 1})).await;

    let store = projects(&server);
    let mut rx = store.subscribe();
    store.fetch_page(1, 4).await;

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(ids(&state), vec!["A"]);
}

#[tokio::test]
async fn test_clones_share_state() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 1})).await;

    let store = projects(&server);
    let view = store.clone();
    store.fetch_page(1, 4).await;

    assert_eq!(ids(&view.state()), vec!["A"]);
}

// ============================================================================
// Overlapping requests
// ============================================================================

#[tokio::test]
async fn test_newer_fetch_supersedes_older() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("limit", "4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["old"]), "totalPages": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["new"]), "totalPages": 1})),
        )
        .mount(&server)
        .await;

    let store = projects(&server);
    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.try_fetch_page(1, 4).await })
    };
    let mut rx = store.subscribe();
    rx.wait_for(|s| s.generation() == 1).await.unwrap();

    let fast = store.try_fetch_page(1, 2).await.unwrap();
    assert_eq!(fast, FetchOutcome::Loaded { page: 1, items: 1 });
    assert_eq!(slow.await.unwrap().unwrap(), FetchOutcome::Superseded);

    let state = store.state();
    assert_eq!(ids(&state), vec!["new"]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_load_more_is_skipped_while_fetch_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["A"]), "totalPages": 3})),
        )
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["B"]), "totalPages": 3}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.try_fetch_page(1, 5).await })
    };
    let mut rx = store.subscribe();
    rx.wait_for(|s| s.is_loading).await.unwrap();

    assert_eq!(store.try_load_more().await.unwrap(), FetchOutcome::Skipped);
    let state = store.state();
    assert!(state.is_loading);
    assert!(!state.is_loading_more);

    slow.await.unwrap().unwrap();
    assert_eq!(ids(&store.state()), vec!["B"]);
}

#[tokio::test]
async fn test_fetch_page_supersedes_load_more() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!({"projects": items(&["A"]), "totalPages": 3})).await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": items(&["B"]), "totalPages": 3}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let store = projects(&server);
    store.fetch_page(1, 1).await;

    let more = {
        let store = store.clone();
        tokio::spawn(async move { store.try_load_more().await })
    };
    let mut rx = store.subscribe();
    rx.wait_for(|s| s.is_loading_more).await.unwrap();

    store.fetch_page(1, 1).await;
    assert_eq!(more.await.unwrap().unwrap(), FetchOutcome::Superseded);

    let state = store.state();
    assert_eq!(ids(&state), vec!["A"]);
    assert_eq!(state.current_page, 1);
    assert!(!state.is_loading_more);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_reset_cancels_in_flight_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(items(&["late"])))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let store = projects(&server);
    let pending = {
        let store = store.clone();
        tokio::spawn(async move { store.try_fetch_page(1, 4).await })
    };
    let mut rx = store.subscribe();
    rx.wait_for(|s| s.is_loading).await.unwrap();

    store.reset();
    assert_eq!(pending.await.unwrap().unwrap(), FetchOutcome::Superseded);

    let state = store.state();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
}

// ============================================================================
// Authenticated resources
// ============================================================================

#[tokio::test]
async fn test_authenticated_resource_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/admin/users"))
        .and(header("Authorization", "Bearer admin-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"users": items(&["u1"]), "totalPages": 1})),
        )
        .mount(&server)
        .await;

    let store = store_with(&server, names::USERS, Arc::new(StaticToken::new("admin-token")));
    store.try_fetch_page(1, 4).await.unwrap();

    assert_eq!(ids(&store.state()), vec!["u1"]);
}

#[tokio::test]
async fn test_anonymous_resource_omits_bearer() {
    let server = MockServer::start().await;
    mount_projects_page(&server, 1, json!(items(&["A"]))).await;

    let store = store_with(&server, names::PROJECTS, Arc::new(StaticToken::new("tok")));
    store.fetch_page(1, 4).await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_unauthorized_triggers_logout_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/admin/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = SessionCredentials::new();
    session.set_token("expired").await;
    let store = store_with(&server, names::USERS, Arc::new(session.clone()));

    let err = store.try_fetch_page(1, 4).await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
    assert_eq!(session.logout_count(), 1);
    assert_eq!(session.token().await, None);

    let state = store.state();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
    let error = state.error.unwrap();
    assert_eq!(error.kind, ErrorKind::SessionExpired);
    assert_eq!(error.message, "Session expired. Please login again.");
}

#[tokio::test]
async fn test_unauthorized_on_anonymous_resource_is_plain_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/active"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = SessionCredentials::new();
    session.set_token("tok").await;
    let store = store_with(&server, names::PROJECTS, Arc::new(session.clone()));
    store.fetch_page(1, 4).await;

    assert_eq!(session.logout_count(), 0);
    assert_eq!(store.state().error.unwrap().kind, ErrorKind::Status);
}

#[tokio::test]
async fn test_missing_token_fails_without_request() {
    let server = MockServer::start().await;

    let store = store_with(&server, names::USERS, Arc::new(SessionCredentials::new()));
    let err = store.try_fetch_page(1, 4).await.unwrap_err();

    assert!(matches!(err, Error::AuthRequired));
    assert_eq!(request_count(&server).await, 0);
    let error = store.state().error.unwrap();
    assert_eq!(error.kind, ErrorKind::AuthRequired);
    assert_eq!(error.message, "Authentication required");
}

/// Provider whose logout takes a while to complete
#[derive(Debug, Default)]
struct SlowLogout {
    started: AtomicBool,
    finished: AtomicBool,
}

#[async_trait]
impl CredentialProvider for SlowLogout {
    async fn token(&self) -> Option<String> {
        Some("expired".to_string())
    }

    async fn session_expired(&self) {
        self.started.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;
        self.finished.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_logout_completes_when_request_is_superseded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/admin/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = Arc::new(SlowLogout::default());
    let store = store_with(&server, names::USERS, provider.clone());

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.try_fetch_page(1, 4).await }
    });
    while !provider.started.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    store.reset();

    let outcome = pending.await.unwrap().unwrap();
    assert_eq!(outcome, FetchOutcome::Superseded);
    assert_eq!(store.state().error, None);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(provider.finished.load(Ordering::SeqCst));
}

// ============================================================================
// Recent and detail stores
// ============================================================================

fn fetcher(server: &MockServer, name: &str) -> ResourceFetcher {
    ResourceFetcher::new(
        ResourceDef::builtin(name).unwrap(),
        client(server, Duration::from_secs(5)),
        Arc::new(NoCredentials),
    )
}

#[tokio::test]
async fn test_recent_store_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/testimonials/recent"))
        .and(query_param("limit", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"testimonials": items(&["t1", "t2", "t3"])})),
        )
        .mount(&server)
        .await;

    let store = RecentStore::<Item>::new(fetcher(&server, names::RECENT_TESTIMONIALS));
    store.fetch(3).await;

    let state = store.state();
    let got: Vec<&str> = state.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(got, vec!["t1", "t2", "t3"]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_recent_store_failure() {
    let server = MockServer::start().await;

    let store = RecentStore::<Item>::new(fetcher(&server, names::RECENT_TESTIMONIALS));
    let err = store.try_fetch(3).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let state = store.state();
    assert!(state.items.is_empty());
    assert_eq!(
        state.error.as_ref().unwrap().message,
        "Failed to load recent testimonials."
    );

    store.clear_error();
    assert_eq!(store.state().error, None);
}

#[tokio::test]
async fn test_detail_store_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/p42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p42"})))
        .mount(&server)
        .await;

    let store = DetailStore::<Item>::new(fetcher(&server, names::PROJECT));
    store.try_fetch("p42").await.unwrap();

    let state = store.state();
    assert_eq!(state.item, Some(Item { id: "p42".into() }));
    assert_eq!(state.requested_id.as_deref(), Some("p42"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_detail_store_failure_clears_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .mount(&server)
        .await;

    let store = DetailStore::<Item>::new(fetcher(&server, names::PROJECT));
    store.fetch("p1").await;
    store.fetch("missing").await;

    let state = store.state();
    assert_eq!(state.item, None);
    assert_eq!(
        state.error.unwrap().message,
        "Failed to load project details. Please try again later."
    );
}

#[test]
fn test_store_error_messages() {
    let e = Error::http_status(500, "");
    assert_eq!(
        StoreError::from_error(&e, "users", Operation::FetchPage).message,
        "Failed to load users. Please try again later."
    );
    assert_eq!(
        StoreError::from_error(&e, "users", Operation::LoadMore).message,
        "Failed to load more users. Please try again."
    );
    let timeout = Error::Timeout { timeout_ms: 1 };
    assert_eq!(
        StoreError::from_error(&timeout, "users", Operation::LoadMore).message,
        "Loading more users timed out. Please try again."
    );
    assert_eq!(
        StoreError::from_error(&Error::SessionExpired, "users", Operation::LoadMore).to_string(),
        "Session expired. Please login again."
    );
}
