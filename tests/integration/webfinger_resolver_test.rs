// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{seed_directory, setup_db, LOCAL_DOMAIN};
use mentionrs::config::settings::ResolverSettings;
use mentionrs::domain::services::domain_locality::LocalDomains;
use mentionrs::domain::services::remote_account_resolver::{RemoteAccountResolver, ResolveError};
use mentionrs::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use mentionrs::infrastructure::resolver::WebfingerResolver;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn resolver() -> WebfingerResolver {
    let db = setup_db().await;
    seed_directory(&db).await;

    WebfingerResolver::new(
        &ResolverSettings {
            timeout_secs: 2,
            user_agent: "mentionrs-test".to_string(),
        },
        Arc::new(LocalDomains::new(LOCAL_DOMAIN, None, &[])),
        Arc::new(AccountRepositoryImpl::new(db)),
    )
    .unwrap()
    .with_scheme("http")
}

#[tokio::test]
async fn test_resolves_canonical_subject() {
    let server = MockServer::start().await;
    let host = server.address().to_string();
    Mock::given(method("GET"))
        .and(path("/.well-known/webfinger"))
        .and(query_param("resource", format!("acct:Bob@{}", host)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subject": "acct:bob@example.com",
            "links": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    let resolver = resolver().await;

    let found = resolver
        .resolve(&format!("@Bob@{}", host))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, 7);
}

#[tokio::test]
async fn test_unknown_remote_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/webfinger"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let resolver = resolver().await;

    let found = resolver
        .resolve(&format!("ghost@{}", server.address()))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_subject_not_in_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/webfinger"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subject": "acct:stranger@example.com"
        })))
        .mount(&server)
        .await;
    let resolver = resolver().await;

    let found = resolver
        .resolve(&format!("stranger@{}", server.address()))
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/webfinger"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let resolver = resolver().await;

    let result = resolver
        .resolve(&format!("bob@{}", server.address()))
        .await;

    assert!(matches!(result, Err(ResolveError::Unreachable(_))));
}

#[tokio::test]
async fn test_local_domain_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let resolver = resolver().await;

    let found = resolver.resolve("alice@home.test").await.unwrap().unwrap();
    assert_eq!(found.id, 1);

    let bare = resolver.resolve("bob").await.unwrap().unwrap();
    assert_eq!(bare.id, 3);
}

#[tokio::test]
async fn test_empty_username_is_invalid() {
    let resolver = resolver().await;

    let result = resolver.resolve("@@example.com").await;

    assert!(matches!(result, Err(ResolveError::InvalidAccount(_))));
}
