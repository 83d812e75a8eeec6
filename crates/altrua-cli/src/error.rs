//! Error types for the CLI application.

use altrua_extractor::ExtractorError;
use altrua_llm::LlmError;
use altrua_webhook::WebhookError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline failure for the document
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// LLM provider could not be set up
    #[error("LLM setup failed: {0}")]
    Llm(#[from] LlmError),

    /// Webhook client could not be set up
    #[error("Webhook setup failed: {0}")]
    Webhook(#[from] WebhookError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
