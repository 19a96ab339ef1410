mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use shortlink_registry::api::handlers::redirect_handler;
use shortlink_registry::domain::entities::{DIRECT_SOURCE, UNKNOWN_LOCATION};

fn app(state: shortlink_registry::state::AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let (state, store, _rx) = common::create_test_state();
    common::seed_links(
        &store,
        &[common::active_link("redir1", "https://example.com/target")],
    )
    .await;
    let server = app(state);

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 307);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");

    let stored = common::stored_links(&store).await;
    assert_eq!(stored[0].clicks.len(), 1);
    assert_eq!(stored[0].clicks[0].source, DIRECT_SOURCE);
    assert_eq!(stored[0].clicks[0].location, UNKNOWN_LOCATION);
}

#[tokio::test]
async fn test_redirect_records_referer() {
    let (state, store, _rx) = common::create_test_state();
    common::seed_links(&store, &[common::active_link("redir2", "https://example.com")]).await;
    let server = app(state);

    server
        .get("/redir2")
        .add_header("Referer", "https://news.example.org/post")
        .await;
    server.get("/redir2").await;

    let stored = common::stored_links(&store).await;
    assert_eq!(stored[0].clicks.len(), 2);
    assert_eq!(stored[0].clicks[0].source, "https://news.example.org/post");
    assert_eq!(stored[0].clicks[1].source, DIRECT_SOURCE);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _store, _rx) = common::create_test_state();
    let server = app(state);

    let response = server.get("/notfound").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "notfound");
}

#[tokio::test]
async fn test_redirect_expired_is_gone() {
    let (state, store, _rx) = common::create_test_state();
    common::seed_links(&store, &[common::expired_link("old123", "https://example.com")]).await;
    let server = app(state);

    let response = server.get("/old123").await;

    assert_eq!(response.status_code(), 410);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");

    let stored = common::stored_links(&store).await;
    assert!(stored[0].clicks.is_empty());
}
