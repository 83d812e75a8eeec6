//! Error types for the webhook transport.

use altrua_domain::SummaryError;
use altrua_extractor::ExtractorError;
use thiserror::Error;

/// Webhook operation errors
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Network failure, DNS failure or request timeout
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status
    #[error("Webhook returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The reply body was not valid JSON, or not summary-shaped
    #[error("Invalid webhook reply: {0}")]
    Json(#[from] serde_json::Error),

    /// The reply lacked one of the required summary keys
    #[error("Webhook reply is missing '{0}'")]
    MissingKey(&'static str),

    /// The reply parsed but broke a summary invariant
    #[error("Webhook summary is inconsistent: {0}")]
    Invalid(#[from] SummaryError),

    /// The configured URL cannot be used
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),
}

impl From<WebhookError> for ExtractorError {
    fn from(e: WebhookError) -> Self {
        match e {
            WebhookError::InvalidUrl(url) => ExtractorError::Config(format!("invalid webhook URL: {}", url)),
            other => ExtractorError::Transport(other.to_string()),
        }
    }
}
