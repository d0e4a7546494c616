use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod deploy;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod records;

use config::{AppConfig, Environment};
use deploy::DeployHook;
use records::RecordsClient;

/// Read-only per-process state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub records: RecordsClient,
    pub deploy: DeployHook,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let records = RecordsClient::new(&config.records);
        let deploy = DeployHook::new(&config.deploy);
        Self { config: Arc::new(config), records, deploy }
    }
}

pub fn app(state: AppState) -> Router {
    // Mutating routes sit behind the bearer gate; reads and the webhook are open.
    let protected = Router::new()
        .route("/like", post(handlers::users::like_post))
        .route("/comment", post(handlers::comments::post_comment))
        .route("/user", post(handlers::users::fetch_user))
        .route("/subscribe", post(handlers::subscribers::subscribe))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::bearer_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/posts", get(handlers::posts::fetch_posts))
        .route("/post/:id", get(handlers::posts::fetch_post))
        .route("/tags", get(handlers::tags::fetch_tags))
        .route("/comments", get(handlers::comments::fetch_comments))
        .route("/slack", post(handlers::slack::slack_webhook))
        .merge(protected)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    match config.environment {
        Environment::Production => cors.allow_origin(AllowOrigin::mirror_request()),
        Environment::Development => cors.allow_origin(Any),
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
