//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! infrastructure. Implementations live in other crates and are injected
//! when the pipeline is constructed.

use async_trait::async_trait;

/// The payload sent to an LLM: fixed task instructions plus the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmPrompt {
    /// Task description and required output schema
    pub system: String,

    /// User turn carrying the (truncated) document text
    pub user: String,
}

impl LlmPrompt {
    /// Total characters across both parts
    pub fn char_len(&self) -> usize {
        self.system.chars().count() + self.user.chars().count()
    }

    /// Both parts joined as one plain prompt, for providers without a system role
    pub fn to_plain_text(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (altrua-llm). Calls may take a
/// long time; callers are expected to bound them with a timeout.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error;

    /// Identifier of the model answering prompts
    fn model_name(&self) -> &str;

    /// Send a prompt and return the single top-level text of the reply
    async fn generate(&self, prompt: &LlmPrompt) -> Result<String, Self::Error>;
}

/// Trait for turning an uploaded document into plain text
///
/// Implemented by the application layer (altrua-extractor)
pub trait TextExtractor: Send + Sync {
    /// Error type for extraction operations
    type Error;

    /// Extract best-effort text, pages joined by newlines
    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, Self::Error>;
}
