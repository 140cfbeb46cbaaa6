//! Live-mode client tests against a mock SpyFu server

use serde_json::json;
use spyfu_bulk::client::{ProxyRotator, RequestThrottler, SpyfuClient, USER_AGENT};
use spyfu_bulk::ApiError;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a live-mode client pointed at the mock server
fn live_client(base_url: &str) -> SpyfuClient {
    SpyfuClient::new(base_url)
        .with_api_key(Some("test-key".to_string()))
        .with_sample_data(false)
        .with_throttler(RequestThrottler::new(6000))
}

#[tokio::test]
async fn test_sends_auth_headers_and_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain/stats"))
        .and(query_param("domain", "example.com"))
        .and(query_param("country", "DE"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "estimated_monthly_clicks": 1234,
            "organic_keywords": 56
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Trailing slash on the base URL must not produce a double slash
    let client = live_client(&format!("{}/", mock_server.uri()));
    let stats = client
        .get_domain_stats("example.com", Some("DE"))
        .await
        .expect("Request failed");

    assert_eq!(stats["estimated_monthly_clicks"], 1234);
    assert_eq!(stats["organic_keywords"], 56);
}

#[tokio::test]
async fn test_country_omitted_when_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/competitors/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"domain": "rival.com"},
            {"domain": "other.com"}
        ])))
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let competitors = client.get_top_competitors("example.com", None).await.unwrap();
    assert_eq!(competitors.len(), 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("domain=example.com"));
}

#[tokio::test]
async fn test_non_json_body_becomes_raw_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keywords/newly-ranked"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance window"))
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let items = client
        .get_newly_ranked_keywords("example.com", None)
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"raw": "maintenance window"})]);
}

#[tokio::test]
async fn test_unlabeled_json_body_is_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keywords/most-valuable"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"keyword": "a", "estimated_value": 3}]"#),
        )
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let items = client
        .get_most_valuable_keywords("example.com", None)
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["estimated_value"], 3);
}

#[tokio::test]
async fn test_json_embedded_in_html_is_extracted() {
    let mock_server = MockServer::start().await;

    let html = r#"<html><head><script>window.__STATE__ = {"estimated_monthly_clicks": 77};</script></head><body>SpyFu</body></html>"#;
    Mock::given(method("GET"))
        .and(path("/domain/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let stats = client.get_domain_stats("example.com", None).await.unwrap();
    assert_eq!(stats["estimated_monthly_clicks"], 77);
}

#[tokio::test]
async fn test_error_status_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ads/top"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let err = client.get_top_ads("example.com", None).await.unwrap_err();

    match err {
        ApiError::Status { status, url } => {
            assert_eq!(status, 429);
            assert!(url.ends_with("/ads/top"));
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_stats_with_list_body_is_shape_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/domain/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let client = live_client(&mock_server.uri());
    let err = client.get_domain_stats("example.com", None).await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedShape { .. }));
}

#[tokio::test]
async fn test_sample_mode_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let client = SpyfuClient::new(mock_server.uri())
        .with_api_key(Some("test-key".to_string()))
        .with_sample_data(true);
    let stats = client.get_domain_stats("example.com", None).await.unwrap();

    assert!(stats["estimated_monthly_clicks"].as_f64().unwrap() > 0.0);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

/// Starts a mock server that answers stats requests with a marker value
async fn start_stats_proxy(marker: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domain/stats"))
        .and(query_param("domain", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "estimated_monthly_clicks": marker
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_requests_alternate_between_rotating_proxies() {
    let proxy_a = start_stats_proxy(1).await;
    let proxy_b = start_stats_proxy(2).await;

    // The API host is never resolved; every request goes through a proxy
    let client = live_client("http://api.spyfu.invalid").with_proxies(ProxyRotator::new(vec![
        proxy_a.uri(),
        proxy_b.uri(),
    ]));

    let mut markers = Vec::new();
    for _ in 0..3 {
        let stats = client
            .get_domain_stats("example.com", None)
            .await
            .expect("Proxied request failed");
        markers.push(stats["estimated_monthly_clicks"].as_u64().unwrap());
    }

    assert_eq!(markers, vec![1, 2, 1]);
    assert_eq!(proxy_a.received_requests().await.unwrap().len(), 2);
    assert_eq!(proxy_b.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_live_requests_are_throttled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ads/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&mock_server)
        .await;

    // 600 requests per minute leaves 100ms between calls
    let client = live_client(&mock_server.uri()).with_throttler(RequestThrottler::new(600));

    let start = Instant::now();
    for _ in 0..3 {
        client.get_top_ads("example.com", None).await.unwrap();
    }

    assert!(
        start.elapsed() >= Duration::from_millis(200),
        "three calls finished in {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn test_sample_mode_skips_throttling() {
    let client = SpyfuClient::new("http://api.spyfu.invalid")
        .with_sample_data(true)
        .with_throttler(RequestThrottler::new(1));

    let start = Instant::now();
    for _ in 0..3 {
        client.get_top_ads("example.com", None).await.unwrap();
    }
    assert!(start.elapsed() < Duration::from_secs(30));
}
