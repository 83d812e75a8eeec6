//! Altrua LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from `altrua-domain`.
//! The extraction pipeline receives a provider at construction time, so tests
//! can swap in a canned-response double.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `AnthropicProvider`: Anthropic Messages API integration
//!
//! # Examples
//!
//! ```
//! use altrua_domain::{LlmPrompt, LlmProvider};
//! use altrua_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("[]");
//! let prompt = LlmPrompt { system: "task".into(), user: "text".into() };
//! assert_eq!(provider.generate(&prompt).await.unwrap(), "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod anthropic;

use altrua_domain::{LlmPrompt, LlmProvider};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use anthropic::AnthropicProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No API key configured
    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Communication(_) | LlmError::RateLimitExceeded => true,
            LlmError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Responses can be keyed on a fragment of the document text, so one mock can
/// serve several documents.
///
/// # Examples
///
/// ```
/// use altrua_llm::MockProvider;
///
/// let mut provider = MockProvider::new("[]");
/// provider.add_response("Water withdrawal", r#"[{"gri_code":"303-3"}]"#);
/// provider.add_error("corrupted");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<IndexMap<String, String>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<LlmPrompt>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(IndexMap::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Add a specific response for prompts whose document contains `needle`
    ///
    /// When several needles match, the one registered first wins.
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(needle.into(), response.into());
    }

    /// Configure to fail for prompts whose document contains `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.errors.lock().unwrap().push(needle.into());
    }

    /// Wait this long before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<LlmPrompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &LlmPrompt) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .errors
            .lock()
            .unwrap()
            .iter()
            .any(|needle| prompt.user.contains(needle.as_str()));
        if failing {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        let keyed = responses
            .iter()
            .find(|(needle, _)| prompt.user.contains(needle.as_str()))
            .map(|(_, response)| response.clone());

        Ok(keyed.unwrap_or_else(|| self.default_response.clone()))
    }
}
