//! Tests for the HTTP module

use super::*;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{path}", server.uri())).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert!(config.timeout.is_none());
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("loadmore/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(10))
        .header("X-Requested-With", "load-more")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(
        config.default_headers.get("X-Requested-With"),
        Some(&"load-more".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_client_rejects_bad_header() {
    let config = HttpClientConfig::builder().header("bad header", "x").build();
    assert!(HttpClient::with_config(config).is_err());
}

#[test]
fn test_fetch_response_success() {
    assert!(FetchResponse::new(200, "").is_success());
    assert!(FetchResponse::new(204, "").is_success());
    assert!(!FetchResponse::new(301, "").is_success());
    assert!(!FetchResponse::new(500, "").is_success());

    assert_eq!(
        FetchResponse::new(200, "<p>ok</p>").into_success().unwrap(),
        "<p>ok</p>"
    );
    let err = FetchResponse::new(503, "down").into_success().unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::HttpStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn test_fetch_returns_body_and_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ul><li>a</li></ul>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client
        .fetch(&url(&mock_server, "/products?page=2"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "<ul><li>a</li></ul>");
}

#[tokio::test]
async fn test_fetch_sends_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("X-Requested-With", "load-more"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Requested-With", "load-more")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let response = client.fetch(&url(&mock_server, "/feed")).await.unwrap();

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_fetch_does_not_fail_or_retry_on_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let response = client.fetch(&url(&mock_server, "/broken")).await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_fetch_transport_failure() {
    // Nothing listens on the discard port
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(2))
            .build(),
    )
    .unwrap();
    let result = client
        .fetch(&Url::parse("http://127.0.0.1:9/").unwrap())
        .await;

    assert!(matches!(result, Err(crate::error::Error::Http(_))));
}
