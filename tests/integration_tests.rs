//! Integration tests
//!
//! Drive the full router against a mocked upstream API

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use postproxy::config::{ApiConfig, AppConfig, ServerConfig, Settings};
use postproxy::handlers::create_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_app_config(base_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        api: ApiConfig::new(base_url, "/posts", "/comments"),
    }
}

async fn create_app(server: &MockServer) -> Router {
    create_router(Settings::default(), create_test_app_config(&server.base_url()))
        .await
        .expect("Failed to create router")
}

async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, headers, json)
}

fn sample_posts() -> Value {
    json!([
        { "userId": 1, "id": 1, "title": "First Post", "body": "about motivation" },
        { "userId": 1, "id": 2, "title": "Second Post", "body": "plain" },
        { "userId": 2, "id": 3, "title": "Third", "body": "more plain text" }
    ])
}

async fn mock_posts(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(sample_posts());
        })
        .await
}

#[tokio::test]
async fn test_list_posts_default_page() {
    let server = MockServer::start_async().await;
    let mock = mock_posts(&server).await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["userId"], 1);
    assert!(body[0].get("comments").is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_posts_page_window() {
    let server = MockServer::start_async().await;
    mock_posts(&server).await;

    let (_, _, first) = get(create_app(&server).await, "/posts?page=1&size=1").await;
    let (_, _, second) = get(create_app(&server).await, "/posts?page=2&size=1").await;
    let (status, _, past_end) = get(create_app(&server).await, "/posts?page=4&size=1").await;

    assert_eq!(first[0]["id"], 1);
    assert_eq!(second[0]["id"], 2);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(past_end, json!([]));
}

#[tokio::test]
async fn test_list_posts_with_filter() {
    let server = MockServer::start_async().await;
    mock_posts(&server).await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts?filter=FIRST").await;

    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "First Post");
}

#[tokio::test]
async fn test_blank_filter_is_rejected_before_upstream() {
    let server = MockServer::start_async().await;
    let mock = mock_posts(&server).await;
    let app = create_app(&server).await;

    let (status, headers, body) = get(app, "/posts?filter=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers["content-type"], "application/problem+json");
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "Bad Request");
    assert_eq!(body["detail"], "Filter must not be blank when provided.");
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_empty_filter_is_rejected() {
    let server = MockServer::start_async().await;
    let mock = mock_posts(&server).await;
    let app = create_app(&server).await;

    let (status, headers, body) = get(app, "/posts?filter=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers["content-type"], "application/problem+json");
    assert_eq!(body["title"], "Bad Request");
    assert_eq!(body["detail"], "Filter must not be blank when provided.");
    assert!(headers.contains_key("x-trace-id"));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_page_and_size_validation() {
    let server = MockServer::start_async().await;
    let mock = mock_posts(&server).await;

    let (status, _, body) = get(create_app(&server).await, "/posts?page=0&size=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("'page' value should be positive integer value(>0)"));
    assert!(detail.contains("'size' value should not exceed 25"));

    let (status, _, body) = get(create_app(&server).await, "/posts?size=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid Parameter");
    assert_eq!(body["detail"], "Parameter 'size' must be a valid int. Received: 'abc'");

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_get_post_by_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/1");
            then.status(200).json_body(json!({
                "userId": 1, "id": 1, "title": "First Post", "body": "b", "extra": true
            }));
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "userId": 1, "title": "First Post", "body": "b" }));
}

#[tokio::test]
async fn test_get_missing_post_returns_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/999");
            then.status(404).json_body(json!({}));
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Resource not found");
    assert_eq!(body["detail"], "Cannot find a Post with id 999");
}

#[tokio::test]
async fn test_upstream_error_status_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/5");
            then.status(503).body("maintenance");
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/5").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["title"], "API Error Occurred");
    assert!(body["detail"].as_str().unwrap().contains("maintenance"));
}

#[tokio::test]
async fn test_null_fields_from_upstream_are_tolerated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/1");
            then.status(200)
                .json_body(json!({ "userId": 1, "id": 1, "title": null, "body": "b" }));
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "userId": 1, "body": "b" }));
}

#[tokio::test]
async fn test_invalid_post_id() {
    let server = MockServer::start_async().await;

    let (status, _, body) = get(create_app(&server).await, "/posts/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid Parameter");
    assert_eq!(body["detail"], "Parameter 'postId' must be a valid long. Received: 'abc'");

    let (status, _, body) = get(create_app(&server).await, "/posts/0/comments").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Validation Error");
    assert_eq!(body["detail"], "postId must be greater than 0");
}

#[tokio::test]
async fn test_get_post_with_comments() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/1");
            then.status(200)
                .json_body(json!({ "userId": 1, "id": 1, "title": "First Post", "body": "b" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/1/comments");
            then.status(200).json_body(json!([
                { "postId": 1, "id": 1, "name": "n1", "email": "a@x.io", "body": "c1" },
                { "postId": 1, "id": 2, "name": "n2", "email": "b@x.io", "body": "c2" }
            ]));
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/1/comments").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "First Post");
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c["postId"] == 1));
}

#[tokio::test]
async fn test_post_with_comments_404_on_comments_call() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/3");
            then.status(200).json_body(json!({ "userId": 1, "id": 3, "title": "t", "body": "b" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/posts/3/comments");
            then.status(404);
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/posts/3/comments").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Cannot find a Post and its comments with id 3");
}

#[tokio::test]
async fn test_list_comments() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/comments").query_param("postId", "2");
            then.status(200).json_body(json!([
                { "postId": 2, "id": 6, "name": "n", "email": "e@x.io", "body": "b" }
            ]));
        })
        .await;
    let app = create_app(&server).await;

    let (status, _, body) = get(app, "/comments?postId=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 6);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_comments_requires_post_id() {
    let server = MockServer::start_async().await;

    let (status, _, body) = get(create_app(&server).await, "/comments").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "postId is required");

    let (status, _, body) = get(create_app(&server).await, "/comments?postId=-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "postId must be greater than 0");

    let (status, _, body) = get(create_app(&server).await, "/comments?postId=x1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid Parameter");
}

#[tokio::test]
async fn test_trace_headers_on_every_response() {
    let server = MockServer::start_async().await;
    mock_posts(&server).await;

    let (_, ok_headers, _) = get(create_app(&server).await, "/posts").await;
    let (_, err_headers, _) = get(create_app(&server).await, "/posts/abc").await;

    for headers in [ok_headers, err_headers] {
        let trace_id = headers["x-trace-id"].to_str().unwrap();
        let span_id = headers["x-span-id"].to_str().unwrap();
        assert_eq!(trace_id.len(), 32);
        assert_eq!(span_id.len(), 16);
    }
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let server = MockServer::start_async().await;

    let (status, _, body) = get(create_app(&server).await, "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
    assert!(body["details"]["uptimeSeconds"].is_number());
    assert_eq!(body["details"]["upstream"], server.base_url());

    let (status, _, body) = get(create_app(&server).await, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_wrong_method_returns_problem_detail() {
    let server = MockServer::start_async().await;
    let mock = mock_posts(&server).await;

    for (method, uri) in [
        (Method::POST, "/posts"),
        (Method::DELETE, "/posts/1"),
        (Method::PUT, "/comments?postId=1"),
    ] {
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(create_app(&server).await, request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        assert_eq!(headers["content-type"], "application/problem+json");
        assert_eq!(body["status"], 405);
        assert_eq!(body["title"], "Method Not Allowed");
        assert!(body["detail"].as_str().unwrap().contains(method.as_str()));
        assert_eq!(headers["x-trace-id"].len(), 32);
        assert_eq!(headers["x-span-id"].len(), 16);
    }

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_cors_preflight_carries_trace_headers() {
    let server = MockServer::start_async().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/posts")
        .header("origin", "https://client.example")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(create_app(&server).await, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["x-trace-id"].len(), 32);
    assert_eq!(headers["x-span-id"].len(), 16);
}
