#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use badarpur_api::config::{AppConfig, AuthConfig, DeployConfig, Environment, RecordsConfig};
use badarpur_api::{app, AppState};

pub const BEARER_TOKEN: &str = "test-secret";
pub const BASE_ID: &str = "appTest";

/// Build the router in-process, pointed at mock upstreams.
pub fn test_app(records_url: &str, hook_url: &str) -> Router {
    test_app_with_env(Environment::Development, records_url, hook_url)
}

pub fn test_app_with_env(environment: Environment, records_url: &str, hook_url: &str) -> Router {
    let config = AppConfig {
        environment,
        port: 0,
        records: RecordsConfig {
            api_url: records_url.to_string(),
            api_key: "test-key".to_string(),
            base_id: BASE_ID.to_string(),
        },
        auth: AuthConfig { bearer_token: BEARER_TOKEN.to_string() },
        deploy: DeployConfig {
            build_hook_url: format!("{}/build_hooks/hook123", hook_url),
            trigger_phrase: "netlify deploy auraq".to_string(),
            trigger_branch: "master".to_string(),
        },
    };
    app(AppState::new(config))
}

pub async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let res = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    response_parts(res).await
}

pub async fn post_json(
    app: Router,
    path: &str,
    token: Option<&str>,
    body: &Value,
) -> (StatusCode, String) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    let res = app.oneshot(request).await.unwrap();
    response_parts(res).await
}

pub async fn response_parts(res: Response) -> (StatusCode, String) {
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON body {body:?}: {e}"))
}

/// Wait for fire-and-forget outbound calls to land on a mock server.
pub async fn wait_for_requests(server: &MockServer, count: usize) {
    for _ in 0..40 {
        let seen = server.received_requests().await.unwrap_or_default().len();
        if seen >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("mock server never saw {} request(s)", count);
}
