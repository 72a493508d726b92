//! RedditSource against a mock Reddit API.

use httpmock::prelude::*;
use serde_json::{json, Value};
use stocksentiment::config::RedditConfig;
use stocksentiment::signal::reddit::RedditSource;
use stocksentiment::signal::PostSource;
use stocksentiment::Error;

fn config(server: &MockServer) -> RedditConfig {
    RedditConfig {
        client_id: "id".into(),
        client_secret: "secret".into(),
        user_agent: "stock-sentiment-tests".into(),
        auth_url: server.base_url(),
        api_url: server.base_url(),
        ..RedditConfig::default()
    }
}

fn source(server: &MockServer) -> RedditSource {
    RedditSource::new(&config(server)).unwrap()
}

fn listing(count: usize, offset: usize, after: Option<&str>) -> Value {
    let children: Vec<Value> = (0..count)
        .map(|i| {
            json!({ "kind": "t3", "data": {
                "title": format!("post {}", offset + i),
                "selftext": format!("body {}", offset + i),
                "score": (offset + i) as i64,
                "created_utc": 1_700_000_000.0 + (offset + i) as f64
            }})
        })
        .collect();
    json!({ "kind": "Listing", "data": { "children": children, "after": after } })
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/access_token")
                .header("authorization", "Basic aWQ6c2VjcmV0")
                .body_contains("grant_type=client_credentials");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "access_token": "tok-123", "token_type": "bearer", "expires_in": 86400 }));
        })
        .await
}

#[tokio::test]
async fn searches_multireddit_with_stock_query() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/r/stocks+investing+wallstreetbets/search")
                .header("authorization", "Bearer tok-123")
                .header("user-agent", "stock-sentiment-tests")
                .query_param("q", "AAPL stock")
                .query_param("restrict_sr", "true")
                .query_param("limit", "3");
            then.status(200).json_body(listing(3, 0, None));
        })
        .await;

    let posts = source(&server).fetch_posts("AAPL", 3).await.unwrap();

    token.assert_async().await;
    search.assert_async().await;
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].title, "post 0");
    assert_eq!(posts[1].body, "body 1");
    assert_eq!(posts[2].score, 2);
    assert_eq!(posts[0].created_at.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn never_returns_more_than_limit() {
    let server = MockServer::start_async().await;
    let _token = mock_token(&server).await;
    // Upstream ignores the requested page size.
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/stocks+investing+wallstreetbets/search");
            then.status(200).json_body(listing(8, 0, Some("t3_more")));
        })
        .await;

    let posts = source(&server).fetch_posts("TSLA", 5).await.unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[4].title, "post 4");
}

#[tokio::test]
async fn pages_through_listing_with_after_cursor() {
    let server = MockServer::start_async().await;
    let _token = mock_token(&server).await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/r/stocks+investing+wallstreetbets/search")
                .query_param("limit", "100");
            then.status(200).json_body(listing(100, 0, Some("t3_page2")));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/r/stocks+investing+wallstreetbets/search")
                .query_param("limit", "50")
                .query_param("after", "t3_page2");
            then.status(200).json_body(listing(30, 100, None));
        })
        .await;

    let posts = source(&server).fetch_posts("NVDA", 150).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(posts.len(), 130);
    assert_eq!(posts[129].title, "post 129");
}

#[tokio::test]
async fn token_is_reused_between_calls() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/stocks+investing+wallstreetbets/search");
            then.status(200).json_body(listing(1, 0, None));
        })
        .await;

    let src = source(&server);
    src.fetch_posts("AAPL", 10).await.unwrap();
    src.fetch_posts("MSFT", 10).await.unwrap();
    token.assert_hits_async(1).await;
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let server = MockServer::start_async().await;
    let _token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/stocks+investing+wallstreetbets/search");
            then.status(200).json_body(listing(0, 0, None));
        })
        .await;

    let posts = source(&server).fetch_posts("ZZZZ", 100).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn rejected_credentials_are_upstream_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(401).json_body(json!({ "message": "Unauthorized", "error": 401 }));
        })
        .await;

    match source(&server).fetch_posts("AAPL", 10).await {
        | Err(Error::UpstreamUnavailable(msg)) => assert!(msg.contains("rejected credentials")),
        | other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn token_error_payload_is_upstream_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/access_token");
            then.status(200).json_body(json!({ "error": "invalid_grant" }));
        })
        .await;

    let result = source(&server).fetch_posts("AAPL", 10).await;
    assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn search_outage_is_upstream_unavailable() {
    let server = MockServer::start_async().await;
    let _token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/stocks+investing+wallstreetbets/search");
            then.status(503).body("down for maintenance");
        })
        .await;

    let result = source(&server).fetch_posts("AAPL", 10).await;
    assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn malformed_listing_is_data_error() {
    let server = MockServer::start_async().await;
    let _token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/r/stocks+investing+wallstreetbets/search");
            then.status(200).header("content-type", "application/json").body("{not json");
        })
        .await;

    let result = source(&server).fetch_posts("AAPL", 10).await;
    assert!(matches!(result, Err(Error::DataError(_))));
}

#[tokio::test]
async fn unreachable_host_is_upstream_unavailable() {
    let cfg = RedditConfig {
        client_id: "id".into(),
        client_secret: "secret".into(),
        user_agent: "stock-sentiment-tests".into(),
        auth_url: "http://127.0.0.1:1".into(),
        api_url: "http://127.0.0.1:1".into(),
        ..RedditConfig::default()
    };
    let result = RedditSource::new(&cfg).unwrap().fetch_posts("AAPL", 10).await;
    assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
}

#[tokio::test]
async fn invalid_arguments_skip_the_network() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    let src = source(&server);

    assert!(matches!(src.fetch_posts("", 10).await, Err(Error::InvalidArgument(_))));
    assert!(matches!(src.fetch_posts("AAPL", 0).await, Err(Error::InvalidArgument(_))));
    token.assert_hits_async(0).await;
}
