use std::env;

use anyhow::Context;

/// Process-wide configuration, built once in `main` and injected into
/// handlers through `AppState`. No module-level singletons.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub records: RecordsConfig,
    pub auth: AuthConfig,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Connection settings for the external records store.
#[derive(Debug, Clone)]
pub struct RecordsConfig {
    /// Base URL of the store's REST API, e.g. `https://api.airtable.com/v0`.
    pub api_url: String,
    pub api_key: String,
    /// Identifier of the base (workspace) holding the content tables.
    pub base_id: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret compared against the `Authorization: Bearer` value.
    /// Selected per environment; there is no per-user identity.
    pub bearer_token: String,
}

#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Full build-hook URL, POSTed to when the trigger phrase is seen.
    pub build_hook_url: String,
    /// Case-sensitive substring looked for in chat event text. Empty
    /// disables the trigger.
    pub trigger_phrase: String,
    pub trigger_branch: String,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RECORDS_API_URL: &str = "https://api.airtable.com/v0";
const DEFAULT_BUILD_HOOK_HOST: &str = "https://api.netlify.com";
const DEFAULT_TRIGGER_PHRASE: &str = "netlify deploy auraq";
const DEFAULT_TRIGGER_BRANCH: &str = "master";

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let records = RecordsConfig {
            api_url: env::var("AIRTABLE_API_URL").unwrap_or_else(|_| DEFAULT_RECORDS_API_URL.to_string()),
            api_key: env::var("AIRTABLE_API_KEY").context("AIRTABLE_API_KEY is required")?,
            base_id: env::var("AIRTABLE_BASE_ID").context("AIRTABLE_BASE_ID is required")?,
        };

        // Development deployments may carry their own secret; fall back to
        // the production one so a single-token .env still works.
        let bearer_token = match environment {
            Environment::Production => {
                env::var("API_BEARER_TOKEN").context("API_BEARER_TOKEN is required in production")?
            }
            Environment::Development => env::var("API_BEARER_TOKEN_DEV")
                .or_else(|_| env::var("API_BEARER_TOKEN"))
                .context("API_BEARER_TOKEN_DEV or API_BEARER_TOKEN is required")?,
        };

        let hook_host =
            env::var("NETLIFY_API_URL").unwrap_or_else(|_| DEFAULT_BUILD_HOOK_HOST.to_string());
        let hook_token =
            env::var("NETLIFY_BUILD_HOOK_TOKEN").context("NETLIFY_BUILD_HOOK_TOKEN is required")?;

        let deploy = DeployConfig {
            build_hook_url: format!("{}/build_hooks/{}", hook_host.trim_end_matches('/'), hook_token),
            trigger_phrase: env::var("DEPLOY_TRIGGER_PHRASE")
                .unwrap_or_else(|_| DEFAULT_TRIGGER_PHRASE.to_string()),
            trigger_branch: env::var("DEPLOY_TRIGGER_BRANCH")
                .unwrap_or_else(|_| DEFAULT_TRIGGER_BRANCH.to_string()),
        };

        Ok(Self {
            environment,
            port,
            records,
            auth: AuthConfig { bearer_token },
            deploy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            environment: Environment::Development,
            port: DEFAULT_PORT,
            records: RecordsConfig {
                api_url: DEFAULT_RECORDS_API_URL.to_string(),
                api_key: "key".to_string(),
                base_id: "appBase".to_string(),
            },
            auth: AuthConfig { bearer_token: "secret".to_string() },
            deploy: DeployConfig {
                build_hook_url: format!("{}/build_hooks/hook123", DEFAULT_BUILD_HOOK_HOST),
                trigger_phrase: DEFAULT_TRIGGER_PHRASE.to_string(),
                trigger_branch: DEFAULT_TRIGGER_BRANCH.to_string(),
            },
        }
    }

    #[test]
    fn build_hook_url_contains_token_path() {
        let config = test_config();
        assert!(config.deploy.build_hook_url.ends_with("/build_hooks/hook123"));
    }

    #[test]
    fn default_trigger_phrase_is_case_sensitive_text() {
        let config = test_config();
        assert_eq!(config.deploy.trigger_phrase, "netlify deploy auraq");
    }
}
