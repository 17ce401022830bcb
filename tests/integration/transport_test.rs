//! Client transport behavior against targeted wiremock stubs

use api_test_kit::assertions::{validate_latency, AssertionFailure};
use api_test_kit::{ApiClient, ApiClientConfig, HttpMethod, RequestOptions, TransportError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{init_test_env, FakePlaceholder, TestServer};

fn client_for(server: &MockServer) -> ApiClient {
    init_test_env();
    ApiClient::new(&ApiClientConfig::with_base_url(server.uri())).unwrap()
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ApiClientConfig {
        timeout_ms: 100,
        ..ApiClientConfig::with_base_url(server.uri())
    };
    let api = ApiClient::new(&config).unwrap();

    let err = api.get("slow", RequestOptions::new()).await.unwrap_err();
    assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
    assert!(err.to_string().contains("timed out after 100ms"));
}

#[tokio::test]
async fn test_refused_connection_is_a_transport_error() {
    init_test_env();
    // Grab a free port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let api = ApiClient::new(&ApiClientConfig::with_base_url(format!(
        "http://127.0.0.1:{}",
        port
    )))
    .unwrap();

    let err = api.get("posts", RequestOptions::new()).await.unwrap_err();
    assert!(
        matches!(err, TransportError::Connect { .. }),
        "expected a connect error, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.get("posts", RequestOptions::new()).await.unwrap();
    assert_eq!(response.status_code, 200);

    server.verify().await;
}

#[tokio::test]
async fn test_per_request_header_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("accept", "text/plain"))
        .and(header("x-trace", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api
        .get(
            "posts",
            RequestOptions::new()
                .header("Accept", "text/plain")
                .header("X-Trace", "abc123"),
        )
        .await
        .unwrap();

    assert_eq!(response.body, b"ok");
    server.verify().await;
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "3"))
        .and(query_param("_limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api
        .get(
            "posts",
            RequestOptions::new().query("userId", 3).query("_limit", 5),
        )
        .await
        .unwrap();

    assert!(response.url.contains("userId=3"));
    assert!(response.url.contains("_limit=5"));
    server.verify().await;
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    let payload = json!({"title": "t", "body": "b", "userId": 1});
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api
        .post("posts", RequestOptions::new().json(&payload))
        .await
        .unwrap();

    assert_eq!(response.status_code, 201);
    assert_eq!(response.method, HttpMethod::POST);
    assert_eq!(response.json().unwrap()["id"], json!(101));
    server.verify().await;
}

#[tokio::test]
async fn test_error_statuses_are_responses() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.delete("/posts/1", RequestOptions::new()).await.unwrap();

    assert_eq!(response.status_code, 500);
    assert_eq!(response.status_text, "Internal Server Error");
    assert!(response.is_server_error());
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_elapsed_covers_server_delay() {
    let delay = Duration::from_millis(200);
    let server = TestServer::with_service(FakePlaceholder::lenient().with_delay(delay), false).await;

    let response = server
        .suite
        .api
        .get("posts/1", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert!(response.elapsed >= delay);
}

#[tokio::test]
async fn test_slow_response_fails_latency_check() {
    let server =
        TestServer::with_service(FakePlaceholder::lenient().with_delay(Duration::from_millis(300)), false)
            .await;

    let response = server
        .suite
        .api
        .get("posts", RequestOptions::new())
        .await
        .unwrap();

    let violation = validate_latency(&response, 0.1).unwrap_err();
    assert!(violation.elapsed >= Duration::from_millis(300));
    assert!(violation.subject.starts_with("GET "));

    let failure: AssertionFailure = violation.into();
    assert!(failure.to_string().contains("limit is 0.100s"));

    validate_latency(&response, server.suite.config.max_latency_secs).unwrap();
}

#[tokio::test]
async fn test_last_header_set_wins_regardless_of_case() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("accept", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(20)
        .mount(&server)
        .await;

    let api = client_for(&server);
    for _ in 0..20 {
        let response = api
            .get(
                "posts",
                RequestOptions::new().header("accept", "A").header("Accept", "B"),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
    }

    server.verify().await;
}

#[tokio::test]
async fn test_repeated_response_headers_are_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "b=2"),
        )
        .mount(&server)
        .await;

    let api = client_for(&server);
    let response = api.get("login", RequestOptions::new()).await.unwrap();

    assert_eq!(response.header("Set-Cookie"), Some("a=1, b=2"));
}
