//! Anthropic Provider Implementation
//!
//! Provides integration with Anthropic's Messages API.
//!
//! # Features
//!
//! - Async HTTP communication with the Messages endpoint
//! - Configurable endpoint, model, and output budget
//! - Retry logic with exponential backoff on transient failures
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use altrua_llm::AnthropicProvider;
//!
//! let provider = AnthropicProvider::new("sk-ant-...", "claude-sonnet-4-5")
//!     .unwrap()
//!     .with_max_tokens(1200);
//! ```

use crate::LlmError;
use altrua_domain::{LlmPrompt, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Anthropic API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version sent with every request
pub const API_VERSION: &str = "2023-06-01";

/// Default model for disclosure extraction
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Default output token budget
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// Default timeout for a single HTTP request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per prompt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Longest wait between two attempts (60 seconds)
pub const MAX_BACKOFF_SECS: u64 = 60;

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
    max_retries: u32,
    backoff_base: Duration,
}

/// Request body for the Messages API
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the Messages API
#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// The reply's single top-level text: its first text block
    fn into_text(self) -> Result<String, LlmError> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| LlmError::InvalidResponse("Reply contained no text block".to_string()))
    }
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Anthropic API key
    /// - `model`: Model to use (e.g., "claude-sonnet-4-5")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey("an Anthropic API key".to_string()));
        }

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Create a provider from the API key stored in an environment variable
    pub fn from_env(var: &str, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(var).map_err(|_| LlmError::MissingApiKey(var.to_string()))?;
        Self::new(api_key, model)
    }

    /// Point the provider at a different API host
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the output token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the first backoff delay; later delays double
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Delay before the attempt following failed attempt `attempt` (1-based)
    ///
    /// Doubles from `backoff_base` and saturates at [`MAX_BACKOFF_SECS`].
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.backoff_base
            .saturating_mul(factor)
            .min(Duration::from_secs(MAX_BACKOFF_SECS))
    }

    /// Send one request, without retries
    async fn send_once(&self, prompt: &LlmPrompt) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.endpoint);

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: &prompt.system,
            messages: [Message {
                role: "user",
                content: &prompt.user,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let reply: MessagesResponse = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return reply.into_text();
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LlmError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model
    }

    /// Generate a reply, retrying transient failures
    ///
    /// Network errors, 429 and 5xx are retried with exponential backoff
    /// (base, 2x base, 4x base, ... up to [`MAX_BACKOFF_SECS`]). Other
    /// failures return immediately.
    async fn generate(&self, prompt: &LlmPrompt) -> Result<String, LlmError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.send_once(prompt).await {
                Ok(text) => {
                    debug!(model = %self.model, attempts, chars = text.len(), "LLM reply received");
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempts < self.max_retries => {
                    let delay = self.backoff_delay(attempts);
                    warn!(error = %e, attempts, ?delay, "LLM request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn prompt() -> LlmPrompt {
        LlmPrompt {
            system: "You are an ESG analyst.".to_string(),
            user: "CSR TEXT:\nWe used 10 GWh of electricity.".to_string(),
        }
    }

    fn provider(server: &MockServer) -> AnthropicProvider {
        AnthropicProvider::new("test-key", "claude-test")
            .unwrap()
            .with_endpoint(server.base_url())
            .with_backoff_base(Duration::ZERO)
    }

    #[test]
    fn test_anthropic_provider_creation() {
        let provider = AnthropicProvider::new("key", "claude-test").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model_name(), "claude-test");
        assert_eq!(provider.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = AnthropicProvider::new("  ", "claude-test");
        assert!(matches!(result, Err(LlmError::MissingApiKey(_))));
    }

    #[test]
    fn test_missing_env_var() {
        let result = AnthropicProvider::from_env("ALTRUA_TEST_UNSET_KEY_VAR", "claude-test");
        match result {
            Err(LlmError::MissingApiKey(var)) => assert_eq!(var, "ALTRUA_TEST_UNSET_KEY_VAR"),
            _ => panic!("Expected MissingApiKey error"),
        }
    }

    #[test]
    fn test_builder_options() {
        let provider = AnthropicProvider::new("key", "claude-test")
            .unwrap()
            .with_endpoint("http://localhost:9999/")
            .with_max_tokens(64)
            .with_max_retries(0);
        assert_eq!(provider.endpoint, "http://localhost:9999");
        assert_eq!(provider.max_tokens, 64);
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_backoff_doubles_then_saturates() {
        let provider = AnthropicProvider::new("key", "claude-test")
            .unwrap()
            .with_backoff_base(Duration::from_millis(500))
            .with_max_retries(100);

        assert_eq!(provider.max_retries, 100);
        assert_eq!(provider.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(provider.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(provider.backoff_delay(3), Duration::from_secs(2));
        assert_eq!(provider.backoff_delay(8), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(provider.backoff_delay(34), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(
            provider.backoff_delay(u32::MAX),
            Duration::from_secs(MAX_BACKOFF_SECS)
        );
    }

    #[test]
    fn test_request_body_shape() {
        let prompt = prompt();
        let body = MessagesRequest {
            model: "claude-test",
            max_tokens: 1200,
            system: &prompt.system,
            messages: [Message {
                role: "user",
                content: &prompt.user,
            }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "claude-test");
        assert_eq!(value["max_tokens"], 1200);
        assert_eq!(value["system"], "You are an ESG analyst.");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], prompt.user.as_str());
    }

    #[tokio::test]
    async fn test_generate_returns_first_text_block() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/messages")
                    .header("x-api-key", "test-key")
                    .header("anthropic-version", API_VERSION);
                then.status(200).json_body(json!({
                    "id": "msg_1",
                    "type": "message",
                    "content": [
                        { "type": "thinking", "thinking": "..." },
                        { "type": "text", "text": "[{\"gri_code\":\"302-1\"}]" },
                        { "type": "text", "text": "ignored" }
                    ]
                }));
            })
            .await;

        let text = provider(&server).generate(&prompt()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"[{"gri_code":"302-1"}]"#);
    }

    #[tokio::test]
    async fn test_reply_without_text_block() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(200).json_body(json!({ "content": [] }));
            })
            .await;

        let result = provider(&server).generate(&prompt()).await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(400).body("bad request");
            })
            .await;

        let result = provider(&server).generate(&prompt()).await;

        mock.assert_calls_async(1).await;
        match result {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad request");
            }
            _ => panic!("Expected Status error"),
        }
    }

    #[tokio::test]
    async fn test_server_error_retried_until_exhausted() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(529).body("overloaded");
            })
            .await;

        let result = provider(&server).with_max_retries(3).generate(&prompt()).await;

        mock.assert_calls_async(3).await;
        assert!(matches!(result, Err(LlmError::Status { status: 529, .. })));
    }

    #[tokio::test]
    async fn test_rate_limit_surfaces_after_retries() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(429);
            })
            .await;

        let result = provider(&server).with_max_retries(2).generate(&prompt()).await;

        mock.assert_calls_async(2).await;
        assert!(matches!(result, Err(LlmError::RateLimitExceeded)));
    }

    #[tokio::test]
    async fn test_unknown_model() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/messages");
                then.status(404);
            })
            .await;

        let result = provider(&server).generate(&prompt()).await;
        match result {
            Err(LlmError::ModelNotAvailable(model)) => assert_eq!(model, "claude-test"),
            _ => panic!("Expected ModelNotAvailable error"),
        }
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Nothing listens on port 9 locally
        let provider = AnthropicProvider::new("key", "claude-test")
            .unwrap()
            .with_endpoint("http://127.0.0.1:9")
            .with_max_retries(1);

        let result = provider.generate(&prompt()).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
