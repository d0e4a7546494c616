use anyhow::Context;

use badarpur_api::{app, config::AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up the store credentials.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    tracing::info!("starting gateway in {:?} mode", config.environment);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("gateway listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
