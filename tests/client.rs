use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use httpmock::prelude::*;
use reqwest::{Method, StatusCode};
use statuspal_provider::testing::{test_client, test_client_with_limiter, TEST_API_KEY};
use statuspal_provider::{Client, ClientConfig, Endpoint, Error, RateLimiter};
use tokio_test::{assert_err, assert_ok};

async fn get(client: &Client, path: &str) -> Result<bytes::Bytes, Error> {
    let request = client
        .request(Method::GET, client.url([path]))
        .build()
        .unwrap();
    client.do_request(request).await
}

#[tokio::test]
async fn test_sends_json_and_authorization_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/ping")
                .header("Accept", "application/json")
                .header("Content-Type", "application/json")
                .header("Authorization", TEST_API_KEY);
            then.status(200).body("{}");
        })
        .await;

    let client = test_client(&server.base_url()).unwrap();
    let body = assert_ok!(get(&client, "ping").await);
    assert_eq!(body.as_ref(), b"{}");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_api_key_sends_empty_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping").header("Authorization", "");
            then.status(200).body("{}");
        })
        .await;

    let config = ClientConfig::new(None, Endpoint::custom(&server.base_url()).unwrap());
    let client = Client::new(config, Arc::new(RateLimiter::default())).unwrap();
    assert_ok!(get(&client, "ping").await);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_success_statuses_return_body_unmodified() {
    let server = MockServer::start_async().await;
    let client = test_client(&server.base_url()).unwrap();

    for (status, body) in [(200, "\"\""), (201, "{\"a\":1}"), (204, ""), (226, "im used")] {
        let path = format!("ok{}", status);
        let mut mock = server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{}", path));
                then.status(status).body(body);
            })
            .await;

        let received = assert_ok!(get(&client, &path).await);
        assert_eq!(received.as_ref(), body.as_bytes(), "status {}", status);
        mock.delete_async().await;
    }
}

#[tokio::test]
async fn test_failure_statuses_carry_status_and_body() {
    let server = MockServer::start_async().await;
    let client = test_client(&server.base_url()).unwrap();

    for (status, body) in [
        (227, "past im used"),
        (400, "{\"errors\":{\"name\":[\"can't be blank\"]}}"),
        (404, "{\"error\":\"Not found\"}"),
        (500, "boom"),
    ] {
        let path = format!("fail{}", status);
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/{}", path));
                then.status(status).body(body);
            })
            .await;

        let err = assert_err!(get(&client, &path).await);
        let api = err.as_api().expect("expected an API error");
        assert_eq!(api.status.as_u16(), status);
        assert_eq!(api.body, body);
        assert_eq!(err.is_not_found(), status == 404);
        assert_eq!(
            err.to_string(),
            format!("status: {}, body: {}", status, body)
        );
    }
}

#[tokio::test]
async fn test_status_predicates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gone");
            then.status(410).body("gone");
        })
        .await;

    let client = test_client(&server.base_url()).unwrap();
    let err = get(&client, "gone").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::GONE));
    assert!(err.status_is(StatusCode::GONE));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1").unwrap();
    let err = get(&client, "ping").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_requests_are_throttled_to_the_rate_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200).body("{}");
        })
        .await;

    let limiter = Arc::new(RateLimiter::new(NonZeroU32::new(5).unwrap()));
    let client = test_client_with_limiter(&server.base_url(), limiter).unwrap();

    let start = Instant::now();
    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { get(&client, "ping").await })
        })
        .collect();
    for task in tasks {
        assert_ok!(task.await.unwrap());
    }
    let elapsed = start.elapsed();

    // A burst of 5, then 7 more at 200ms each.
    assert!(
        elapsed >= Duration::from_millis(1300),
        "12 requests at 5/s finished in {:?}",
        elapsed
    );
    mock.assert_calls_async(12).await;
}

#[tokio::test]
async fn test_dropping_the_future_cancels_the_wait() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ping");
            then.status(200).body("{}");
        })
        .await;

    let limiter = Arc::new(RateLimiter::new(NonZeroU32::new(1).unwrap()));
    let client = test_client_with_limiter(&server.base_url(), limiter).unwrap();

    assert_ok!(get(&client, "ping").await);
    let cancelled = tokio::time::timeout(Duration::from_millis(100), get(&client, "ping")).await;
    assert!(cancelled.is_err());

    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_timeout_is_a_transport_error_without_retry() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("{}").delay(Duration::from_secs(1));
        })
        .await;

    let config = ClientConfig::new(
        Some(TEST_API_KEY.to_string()),
        Endpoint::custom(&server.base_url()).unwrap(),
    )
    .with_timeout(Duration::from_millis(100));
    let client = Client::new(config, Arc::new(RateLimiter::default())).unwrap();

    let err = assert_err!(get(&client, "slow").await);
    match &err {
        Error::Transport(e) => assert!(e.is_timeout(), "got {:?}", e),
        other => panic!("expected a transport error, got {:?}", other),
    }
    assert_eq!(err.status(), None);

    // Let the delayed response finish before counting.
    tokio::time::sleep(Duration::from_secs(1)).await;
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_dropping_the_future_aborts_the_request_in_flight() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("{}").delay(Duration::from_secs(1));
        })
        .await;

    let client = test_client(&server.base_url()).unwrap();
    let start = Instant::now();
    let cancelled = tokio::time::timeout(Duration::from_millis(50), get(&client, "slow")).await;

    assert!(cancelled.is_err());
    assert!(start.elapsed() < Duration::from_secs(1));

    tokio::time::sleep(Duration::from_secs(1)).await;
    mock.assert_calls_async(1).await;
}
