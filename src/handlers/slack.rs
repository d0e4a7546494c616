use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::extract::Json;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SlackEventNotification {
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub event: Option<SlackEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SlackEvent {
    #[serde(default)]
    pub text: String,
}

/// POST /slack - chat-platform webhook.
///
/// Echoes a `challenge` field verbatim (platform handshake) and, when the
/// event text contains the configured trigger phrase, fires the build hook in
/// a detached task. The inbound response never waits on, or fails with, the
/// outbound call.
pub async fn slack_webhook(
    State(state): State<AppState>,
    Json(body): Json<SlackEventNotification>,
) -> impl IntoResponse {
    let text = body.event.as_ref().map(|e| e.text.as_str()).unwrap_or_default();

    if wants_deploy(text, &state.config.deploy.trigger_phrase) {
        tracing::info!("deploy trigger phrase matched, firing build hook");
        let hook = state.deploy.clone();
        tokio::spawn(async move { hook.trigger().await });
    }

    body.challenge.unwrap_or_default()
}

/// Case-sensitive substring match; an empty phrase disables the trigger.
fn wants_deploy(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && text.contains(phrase)
}
