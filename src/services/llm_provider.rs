use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::sleep;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const MAX_ATTEMPTS: u32 = 4;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM credentials missing ({0} not set)")]
    Disabled(&'static str),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("model returned no choices")]
    NoChoices,
}

impl LlmError {
    // Only transport-level trouble is worth another attempt. What the model
    // actually said (or failed to say) is the caller's problem.
    fn is_transient(&self) -> bool {
        match self {
            LlmError::Transport(_) => true,
            LlmError::Status { status, .. } => {
                *status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || *status == reqwest::StatusCode::REQUEST_TIMEOUT
                    || status.is_server_error()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: IncomingMessage,
}

#[derive(Debug, Deserialize)]
struct IncomingMessage {
    content: String,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let endpoint = env_string("LLM_API_ENDPOINT")
            .or_else(|| env_string("LLM_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout_ms = env_string("LLM_TIMEOUT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_key: env_string("LLM_API_KEY"),
            model: env_string("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn disabled() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Transport to an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct LlmProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmProvider {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn from_env() -> Self {
        Self::new(LlmConfig::from_env())
    }

    pub fn is_available(&self) -> bool {
        self.api_key().is_some()
    }

    pub async fn complete_with_system(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let api_key = self.api_key().ok_or(LlmError::Disabled("LLM_API_KEY"))?;
        let payload = serde_json::json!({
            "model": self.config.model,
            "stream": false,
            "messages": [
                OutgoingMessage { role: Role::System, content: system },
                OutgoingMessage { role: Role::User, content: user },
            ],
        });
        let url = completions_url(&self.config.endpoint);

        let mut attempt = 1;
        loop {
            match self.request_once(&url, api_key, &payload).await {
                Ok(completion) => {
                    return completion
                        .choices
                        .into_iter()
                        .next()
                        .map(|choice| choice.message.content)
                        .ok_or(LlmError::NoChoices);
                }
                Err(err) if attempt < MAX_ATTEMPTS && err.is_transient() => {
                    tracing::warn!(attempt, error = %err, "LLM call failed, backing off");
                    sleep(retry_delay(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn request_once(
        &self,
        url: &str,
        api_key: &str,
        payload: &serde_json::Value,
    ) -> Result<ChatCompletion, LlmError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// Accepts a bare host or a base that already carries the /v1 prefix.
fn completions_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.ends_with("/v1") || base.contains("/v1/") {
        format!("{base}/chat/completions")
    } else {
        format!("{base}/v1/chat/completions")
    }
}

fn retry_delay(attempt: u32) -> Duration {
    Duration::from_millis(200 * 2u64.pow(attempt.saturating_sub(1)))
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_provider_is_unavailable() {
        assert!(!LlmProvider::new(LlmConfig::disabled()).is_available());

        let mut config = LlmConfig::disabled();
        config.api_key = Some("   ".into());
        assert!(!LlmProvider::new(config).is_available());
    }

    #[test]
    fn completions_url_adds_v1_when_missing() {
        assert_eq!(
            completions_url("https://api.example.com"),
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://api.example.com/v1/"),
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(
            completions_url("https://proxy.example.com/v1/openai"),
            "https://proxy.example.com/v1/openai/chat/completions"
        );
    }

    #[test]
    fn only_transport_failures_are_transient() {
        let rate_limited = LlmError::Status {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: String::new(),
        };
        let bad_gateway = LlmError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        let unauthorized = LlmError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert!(rate_limited.is_transient());
        assert!(bad_gateway.is_transient());
        assert!(!unauthorized.is_transient());
        assert!(!LlmError::NoChoices.is_transient());
        assert!(!LlmError::Disabled("LLM_API_KEY").is_transient());
    }

    #[test]
    fn retry_delay_doubles_per_attempt() {
        assert_eq!(retry_delay(1), Duration::from_millis(200));
        assert_eq!(retry_delay(2), Duration::from_millis(400));
        assert_eq!(retry_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn outgoing_messages_use_lowercase_roles() {
        let message = OutgoingMessage {
            role: Role::System,
            content: "x",
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
    }
}
