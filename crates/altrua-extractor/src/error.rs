//! Error types for the Extractor

use altrua_domain::FieldError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Every variant is terminal for the document being processed: the pipeline
/// never returns a partial summary.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The source document yielded no usable text
    #[error("Text extraction failed: {0}")]
    Extraction(String),

    /// The LLM reply held no recoverable JSON array
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    /// A raw record had a field of the wrong type
    #[error("Type mismatch in record {index}: {source}")]
    TypeMismatch {
        /// Position of the record in the LLM reply
        index: usize,
        /// Which field was wrong, and how
        #[source]
        source: FieldError,
    },

    /// LLM provider or remote pipeline failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The LLM did not answer within the configured bound
    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the failure came from the network side rather than the content
    ///
    /// Callers may choose to retry these with a fresh request.
    pub fn is_transport(&self) -> bool {
        matches!(self, ExtractorError::Transport(_) | ExtractorError::Timeout(_))
    }
}
