// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::account_search_test::{relational_service, service_with_backend};
use crate::helpers::{follow, seed_directory, setup_db};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mentionrs::config::settings::IndexSettings;
use mentionrs::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use mentionrs::infrastructure::search::index_backend::IndexBackend;
use mentionrs::presentation::routes::routes;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn app() -> Router {
    let db = setup_db().await;
    seed_directory(&db).await;
    follow(&db, 1, 10).await;
    routes(Arc::new(relational_service(db)))
}

async fn get(app: Router, uri: &str, viewer: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(viewer) = viewer {
        request = request.header("X-Account-Id", viewer);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|account| account["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .await
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_search_returns_accounts() {
    let (status, body) = get(app().await, "/v1/accounts/search?q=%40bob%40example.com&limit=5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["7", "8"]);
    assert_eq!(body[0]["acct"], "bob@example.com");
    assert_eq!(body[0]["display_name"], "Bob Remote");
    assert_eq!(body[0]["followers_count"], 100);
}

#[tokio::test]
async fn test_viewer_header_boosts_followed_accounts() {
    let (status, body) = get(app().await, "/v1/accounts/search?q=ann", Some("1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["10", "12", "11"]);
}

#[tokio::test]
async fn test_following_only_flag() {
    let (status, body) = get(
        app().await,
        "/v1/accounts/search?q=ann&following=true",
        Some("1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["10"]);
}

#[tokio::test]
async fn test_limit_is_applied() {
    let (status, body) = get(app().await, "/v1/accounts/search?q=ann&limit=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["12", "11"]);
}

#[tokio::test]
async fn test_missing_query_returns_empty_list() {
    let (status, body) = get(app().await, "/v1/accounts/search", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_malformed_viewer_header() {
    let (status, body) = get(app().await, "/v1/accounts/search?q=ann", Some("nobody")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid X-Account-Id header");
}

#[tokio::test]
async fn test_malformed_query_string_returns_json_error() {
    for uri in [
        "/v1/accounts/search?q=ann&limit=-1",
        "/v1/accounts/search?q=ann&following=maybe",
    ] {
        let (status, body) = get(app().await, uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "expected JSON error body for {uri}");
    }
}

#[tokio::test]
async fn test_overlong_query_is_rejected() {
    let uri = format!("/v1/accounts/search?q={}", "a".repeat(600));
    let (status, _) = get(app().await, &uri, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let db = setup_db().await;
    seed_directory(&db).await;
    let backend = IndexBackend::new(
        &IndexSettings {
            url: server.uri(),
            index_name: "accounts".to_string(),
            timeout_secs: 1,
        },
        Arc::new(AccountRepositoryImpl::new(db.clone())),
    )
    .unwrap();
    let app = routes(Arc::new(service_with_backend(db, Arc::new(backend))));

    let (status, body) = get(app, "/v1/accounts/search?q=ann", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("Search backend error"));
}
