use serde_json::json;

use crate::config::DeployConfig;

/// Client for the external build hook. Triggering is fire-and-forget: the
/// outcome is logged, never propagated, and no timeout is enforced beyond the
/// transport's defaults.
#[derive(Debug, Clone)]
pub struct DeployHook {
    http: reqwest::Client,
    hook_url: String,
    branch: String,
}

impl DeployHook {
    pub fn new(config: &DeployConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            hook_url: config.build_hook_url.clone(),
            branch: config.trigger_branch.clone(),
        }
    }

    pub async fn trigger(&self) {
        let payload = json!({
            "trigger_branch": self.branch,
            "trigger_title": format!("Deploying {} via chat-bot trigger", self.branch),
        });

        match self.http.post(&self.hook_url).json(&payload).send().await {
            Ok(res) => {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                tracing::info!(%status, body, "build hook triggered");
            }
            Err(err) => {
                tracing::error!(error = %err, "build hook request failed");
            }
        }
    }
}
