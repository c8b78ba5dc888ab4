use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::error::LlmError;

/// Default model: a fast, small classifier — Tier 3 is a last-resort label,
/// not a generation task.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A raw response from the provider, before response parsing.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub model: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub finish_reason: Option<String>,
}

/// One call into an LLM discovery provider. Implementations must honor
/// `deadline` and return [`LlmError::TransportTimeout`] on expiry.
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    async fn invoke(&self, prompt: &str, deadline: Duration) -> Result<LlmResponse, LlmError>;
}

/// Credentials and endpoint configuration, read once at construction time —
/// never per call.
#[derive(Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Read configuration from the environment: `ANTHROPIC_API_KEY`
    /// (required), `ANTHROPIC_BASE_URL` and `ANTHROPIC_MODEL` (optional
    /// overrides).
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow::anyhow!("ANTHROPIC_API_KEY is not set"))?;
        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

/// [`DiscoveryClient`] backed by the Anthropic Messages API.
pub struct AnthropicClient {
    config: AnthropicConfig,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Timeout used when the caller does not pass a more specific deadline.
    pub fn default_timeout() -> Duration {
        Duration::from_millis(DEFAULT_TIMEOUT_MS)
    }
}

#[async_trait]
impl DiscoveryClient for AnthropicClient {
    async fn invoke(&self, prompt: &str, deadline: Duration) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        let request = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send();

        let response = match tokio::time::timeout(deadline, request).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(_transport_err)) => return Err(LlmError::TransportTimeout),
            Err(_elapsed) => return Err(LlmError::TransportTimeout),
        };

        let status = response.status();
        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|_| LlmError::ClientFailure {
                message: "response body was not valid JSON".to_string(),
            })?;

        if !status.is_success() {
            let message = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("no error message provided")
                .to_string();
            return Err(match status.as_u16() {
                401 => LlmError::AuthFailure,
                429 => LlmError::RateLimited,
                _ => LlmError::ClientFailure { message },
            });
        }

        let text = parsed
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.get("text"))
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        let input_tokens = parsed
            .get("usage")
            .and_then(|u| u.get("input_tokens"))
            .and_then(|v| v.as_u64())
            .map(|v| v as u32);
        let output_tokens = parsed
            .get("usage")
            .and_then(|u| u.get("output_tokens"))
            .and_then(|v| v.as_u64())
            .map(|v| v as u32);
        let finish_reason = parsed
            .get("stop_reason")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(LlmResponse {
            text,
            model: self.config.model.clone(),
            input_tokens,
            output_tokens,
            finish_reason,
        })
    }
}
