use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use scout::api::create_router;
use scout::data_models::{ExtractedDocument, SearchResultItem};
use scout::discovery::SearchProvider;
use scout::extraction::ContentExtractor;
use scout::{Aggregator, Result, ScoutError};

enum Failure {
    None,
    Discovery,
    Config,
}

struct StaticProvider {
    failure: Failure,
}

impl SearchProvider for StaticProvider {
    async fn query_search(&self, _query: &str) -> Result<Vec<SearchResultItem>> {
        match self.failure {
            Failure::None => {}
            Failure::Discovery => {
                return Err(ScoutError::Discovery(
                    "search provider returned status 500".into(),
                ));
            }
            Failure::Config => {
                return Err(ScoutError::Config("search scope is not configured".into()));
            }
        }
        Ok((0..8)
            .map(|i| SearchResultItem::new(format!("https://{i}.test"), format!("T{i}"), String::new()))
            .collect())
    }
}

#[derive(Default)]
struct UpperExtractor {
    seen_timeouts: Arc<Mutex<Vec<Option<u64>>>>,
}

impl ContentExtractor for UpperExtractor {
    async fn extract(&self, url: &str, timeout_seconds: Option<u64>) -> Result<ExtractedDocument> {
        self.seen_timeouts.lock().unwrap().push(timeout_seconds);
        if url == "https://1.test" {
            return Err(ScoutError::extraction(url, "unreachable"));
        }
        Ok(ExtractedDocument {
            title: String::new(),
            description: String::new(),
            url: url.to_string(),
            content: url.to_uppercase(),
            token_usage: 0,
        })
    }
}

fn app(failure: Failure) -> axum::Router {
    app_with_extractor(failure, UpperExtractor::default())
}

fn app_with_extractor(failure: Failure, extractor: UpperExtractor) -> axum::Router {
    create_router(Arc::new(Aggregator::new(
        StaticProvider { failure },
        extractor,
    )))
}

async fn post_search(app: axum::Router, body: Value) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_search_endpoint_returns_response() {
    let (status, body) = post_search(app(Failure::None), json!({"query": "rust"})).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["url"], "https://0.test");
    assert_eq!(data[0]["markdown"], "HTTPS://0.TEST");
    assert_eq!(data[1]["title"], "T1");
    assert_eq!(data[1]["markdown"], "");
}

#[tokio::test]
async fn test_search_endpoint_honours_limit_and_timeout() {
    let extractor = UpperExtractor::default();
    let seen_timeouts = extractor.seen_timeouts.clone();
    let app = app_with_extractor(Failure::None, extractor);

    let (status, body) =
        post_search(app, json!({"query": "rust", "limit": 2, "timeoutSeconds": 3})).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(*seen_timeouts.lock().unwrap(), vec![Some(3), Some(3)]);
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let (status, _) = post_search(app(Failure::None), json!({"query": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_discovery_failure_is_bad_gateway() {
    let (status, body) = post_search(app(Failure::Discovery), json!({"query": "rust"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("discovery failed"));
}

#[tokio::test]
async fn test_config_failure_is_internal_error() {
    let (status, body) = post_search(app(Failure::Config), json!({"query": "rust"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("config error"));
}
