// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{seed_directory, setup_db};
use mentionrs::config::settings::{IndexSettings, SearchSettings};
use mentionrs::domain::search::backend::{RankedQuery, SearchBackend, SearchError};
use mentionrs::domain::services::relevance_scorer::{CompositeScore, MatchCriteria, MatchField};
use mentionrs::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use mentionrs::infrastructure::search::create_backend;
use mentionrs::infrastructure::search::index_backend::IndexBackend;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> IndexSettings {
    IndexSettings {
        url: server.uri(),
        index_name: "accounts".to_string(),
        timeout_secs: 1,
    }
}

fn ranked(term: &str, restrict_to: Option<Vec<i64>>) -> RankedQuery {
    RankedQuery {
        criteria: MatchCriteria {
            term: term.to_string(),
            fields: vec![MatchField::Handle, MatchField::DisplayName],
            viewer_id: None,
            restrict_to,
            boost: None,
        },
        score: CompositeScore::default(),
        limit: 10,
        offset: 0,
    }
}

fn hits(ids: &[&str]) -> Value {
    let hits: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "_index": "accounts", "_id": id, "_score": 1.0 }))
        .collect();
    json!({ "took": 1, "hits": { "total": { "value": hits.len() }, "hits": hits } })
}

fn index_search(server: &MockServer) -> SearchSettings {
    SearchSettings {
        backend: "index".to_string(),
        index: settings(server),
    }
}

async fn backend(server: &MockServer) -> IndexBackend {
    let db = setup_db().await;
    seed_directory(&db).await;
    IndexBackend::new(&settings(server), Arc::new(AccountRepositoryImpl::new(db))).unwrap()
}

#[tokio::test]
async fn test_results_follow_index_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(&["8", "404", "7", "8"])))
        .expect(1)
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let results = backend.execute(&ranked("bob", None)).await.unwrap();

    let ids: Vec<i64> = results.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![8, 7]);
    assert_eq!(results[1].display_name, "Bob Remote");
}

#[tokio::test]
async fn test_request_body_carries_pagination_and_scoring() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(&[])))
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let mut query = ranked("ann", Some(vec![10, 11]));
    query.offset = 20;
    backend.execute(&query).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["from"], 20);
    assert_eq!(body["size"], 10);
    assert_eq!(body["query"]["function_score"]["boost_mode"], "multiply");
    assert_eq!(
        body["query"]["function_score"]["query"]["bool"]["filter"][0]["terms"]["id"],
        json!([10, 11])
    );
}

#[tokio::test]
async fn test_restriction_is_enforced_on_hits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(&["12", "10", "11"])))
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let results = backend
        .execute(&ranked("ann", Some(vec![10, 11])))
        .await
        .unwrap();

    let ids: Vec<i64> = results.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[tokio::test]
async fn test_engine_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("shard failure"))
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let result = backend.execute(&ranked("bob", None)).await;

    match result {
        Err(SearchError::EngineError(message)) => assert!(message.contains("shard failure")),
        other => panic!("expected engine error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hits(&["not-a-number"])))
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let result = backend.execute(&ranked("bob", None)).await;

    assert!(matches!(result, Err(SearchError::Decode(_))));
}

#[tokio::test]
async fn test_slow_engine_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/_search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hits(&["7"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let backend = backend(&server).await;

    let result = backend.execute(&ranked("bob", None)).await;

    assert!(matches!(result, Err(SearchError::Timeout)));
}

#[tokio::test]
async fn test_factory_uses_index_when_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accounts": {} })))
        .mount(&server)
        .await;
    let db = setup_db().await;

    let backend = create_backend(&index_search(&server), Arc::new(AccountRepositoryImpl::new(db)))
        .await
        .unwrap();

    assert_eq!(backend.name(), "index");
}

#[tokio::test]
async fn test_factory_falls_back_when_index_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let db = setup_db().await;

    let backend = create_backend(&index_search(&server), Arc::new(AccountRepositoryImpl::new(db)))
        .await
        .unwrap();

    assert_eq!(backend.name(), "relational");
}
