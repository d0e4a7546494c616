mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use badarpur_api::config::Environment;
use tower::ServiceExt;
use wiremock::MockServer;

#[tokio::test]
async fn development_responses_allow_any_origin() -> Result<()> {
    let store = MockServer::start().await;
    let app = common::test_app(&store.uri(), &store.uri());

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:8080")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );
    Ok(())
}

#[tokio::test]
async fn production_mirrors_the_request_origin() -> Result<()> {
    let store = MockServer::start().await;
    let app = common::test_app_with_env(Environment::Production, &store.uri(), &store.uri());

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "https://auraq.in")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("https://auraq.in")
    );
    Ok(())
}

#[tokio::test]
async fn preflight_carries_origin_and_the_allowed_headers() -> Result<()> {
    let store = MockServer::start().await;
    let app = common::test_app(&store.uri(), &store.uri());

    let res = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/like")
                .header("origin", "http://localhost:8080")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "authorization,content-type")
                .body(Body::empty())?,
        )
        .await?;

    assert!(res.status().is_success(), "preflight got {}", res.status());
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let allowed = res
        .headers()
        .get("access-control-allow-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    for header in ["origin", "x-requested-with", "content-type", "authorization", "accept"] {
        assert!(allowed.contains(header), "allow-headers missing {}: {}", header, allowed);
    }
    Ok(())
}

#[tokio::test]
async fn production_preflight_mirrors_origin_on_a_mutating_route() -> Result<()> {
    let store = MockServer::start().await;
    let app = common::test_app_with_env(Environment::Production, &store.uri(), &store.uri());

    let res = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/subscribe")
                .header("origin", "https://www.auraq.in")
                .header("access-control-request-method", "POST")
                .body(Body::empty())?,
        )
        .await?;

    // Preflight is answered by the CORS layer; the bearer gate never runs.
    assert!(res.status().is_success(), "preflight got {}", res.status());
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("https://www.auraq.in")
    );
    Ok(())
}
