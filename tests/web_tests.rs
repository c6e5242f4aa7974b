/// Router-level tests: pages, hand-offs and the JSON API served through
/// the real route table against a mocked prediction service.
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rust_verify_dashboard::config::Config;
use rust_verify_dashboard::handlers::AppState;
use rust_verify_dashboard::router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(prediction_api_url: String) -> Router {
    let config = Config {
        port: 8080,
        prediction_api_url,
        upstream_timeout_secs: 5,
    };
    let state = AppState::new(config).unwrap();
    router::app_routes().with_state(Arc::new(state))
}

fn form_post(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn mock_instagram(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_fake": true,
            "fake_probability": 0.873,
            "profile_info": {
                "username": "someone",
                "full_name": "Some One",
                "biography": "<b>bio</b>",
                "profile_pic_url": "x",
                "num_posts": 15,
                "num_followers": 100,
                "num_follows": 10,
                "external_url": "javascript:alert(1)",
                "is_private": true
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/social_links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "social_links": [{ "platform": "GitHub", "url": "https://github.com/someone" }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_index_links_every_view() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Account Verification Dashboard"));
    assert!(html.contains(r#"href="/instagram""#));
    assert!(html.contains(r#"href="/twitter""#));
    assert!(html.contains(r#"href="/search""#));
}

#[tokio::test]
async fn test_empty_forms_render() {
    let app = app("http://127.0.0.1:9".to_string());

    for (uri, label) in [
        ("/instagram", "Instagram Username"),
        ("/twitter", "Twitter Username"),
        ("/search", "Search"),
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(label), "{} missing {}", uri, label);
        assert!(!html.contains(r#"<div class="banner"#));
    }
}

#[tokio::test]
async fn test_instagram_post_renders_verdict() {
    let mock_server = MockServer::start().await;
    mock_instagram(&mock_server).await;

    let response = app(mock_server.uri())
        .oneshot(form_post("/instagram", &[("username", "someone")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Fake Account Suspected"));
    assert!(html.contains("Probability: 87%"));
    assert!(html.contains("&lt;b&gt;bio&lt;/b&gt;"));
    assert!(!html.contains("<b>bio</b>"));
    assert!(!html.contains(r#"href="javascript:"#));
    assert!(html.contains("Accounts with same username on other platforms"));
    assert!(html.contains("https://github.com/someone"));
    assert!(html.contains("Report Account"));
}

#[tokio::test]
async fn test_invalid_username_renders_inline_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let response = app(mock_server.uri())
        .oneshot(form_post("/instagram", &[("username", "not valid!")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please enter a valid Instagram username"));
    assert!(html.contains(r#"value="not valid!""#));
}

#[tokio::test]
async fn test_twitter_prefill_from_search_handoff() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(get("/twitter?username=https%3A%2F%2Ftwitter.com%2Fjack"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"value="https://twitter.com/jack""#));
}

#[tokio::test]
async fn test_twitter_prefill_ignores_blank_value() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(get("/twitter?username=%20%20"))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains(r#"name="username" value="""#));
}

#[tokio::test]
async fn test_search_post_renders_analyze_links() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["https://twitter.com/jack", "https://example.com/jack"]
        })))
        .mount(&mock_server)
        .await;

    let response = app(mock_server.uri())
        .oneshot(form_post("/search", &[("query", "jack")]))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert_eq!(html.matches(r#"<tr class="result-row">"#).count(), 2);
    assert!(html.contains("/twitter?username=https%3A%2F%2Ftwitter.com%2Fjack"));
}

#[tokio::test]
async fn test_report_handoff_accepts_profile() {
    let profile = json!({
        "username": "someone",
        "full_name": "Some One",
        "num_posts": 3,
        "num_followers": 4,
        "num_follows": 5
    })
    .to_string();

    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(form_post(
            "/report",
            &[("platform", "instagram"), ("profile", profile.as_str())],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("@someone"));
    assert!(html.contains("Some One"));
}

#[tokio::test]
async fn test_report_handoff_rejects_bad_payloads() {
    let app = app("http://127.0.0.1:9".to_string());

    let cases: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("platform", "facebook"), ("profile", "{}")],
        vec![("platform", "twitter"), ("profile", "not json")],
        vec![("platform", "twitter"), ("profile", r#"{"screen_name":"  "}"#)],
    ];

    for pairs in cases {
        let response = app.clone().oneshot(form_post("/report", &pairs)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", pairs);
    }
}

#[tokio::test]
async fn test_api_validation_is_bad_request() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(json_post(
            "/api/v1/verify/instagram",
            json!({ "username": "has space" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please enter a valid Instagram username");
}

#[tokio::test]
async fn test_api_missing_fields_are_bad_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let app = app(mock_server.uri());

    for (uri, message) in [
        ("/api/v1/verify/instagram", "Please enter a valid Instagram username"),
        ("/api/v1/verify/twitter", "Please enter a valid Twitter username"),
        ("/api/v1/search", "Please enter a search query"),
    ] {
        let response = app.clone().oneshot(json_post(uri, json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = body_json(response).await;
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_api_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict_twitter"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let response = app(mock_server.uri())
        .oneshot(json_post("/api/v1/verify/twitter", json!({ "username": "jack" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "External service error");
}

#[tokio::test]
async fn test_api_instagram_returns_view_state() {
    let mock_server = MockServer::start().await;
    mock_instagram(&mock_server).await;

    let response = app(mock_server.uri())
        .oneshot(json_post(
            "/api/v1/verify/instagram",
            json!({ "username": "someone" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["phase"], "success");
    assert_eq!(body["result"]["verdict"]["risk_score"], 87);
    assert_eq!(body["result"]["verdict"]["kind"], "fake_suspected");
    assert_eq!(body["result"]["details"].as_array().unwrap().len(), 6);
    assert_eq!(body["result"]["social_links"]["state"], "loaded");
}

#[tokio::test]
async fn test_api_search_returns_hits() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/google_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": ["http://a"] })))
        .mount(&mock_server)
        .await;

    let response = app(mock_server.uri())
        .oneshot(json_post("/api/v1/search", json!({ "query": "a" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"][0]["url"], "http://a");
    assert_eq!(
        body["result"][0]["analyze_path"],
        "/twitter?username=http%3A%2F%2Fa"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(get("/settings"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("/settings"));
}

#[tokio::test]
async fn test_unknown_api_route_is_json_not_found() {
    let response = app("http://127.0.0.1:9".to_string())
        .oneshot(json_post("/api/v1/verify/facebook", json!({ "username": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No API route for /api/v1/verify/facebook");
}
