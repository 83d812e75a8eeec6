//! Request and response types for extraction

use altrua_domain::Summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An uploaded report, as received from the user
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original file name, used for format detection and upload
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Organization the report belongs to, if known
    pub organization: Option<String>,
}

impl SourceDocument {
    /// Create a document from a file name and its contents
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            organization: None,
        }
    }

    /// Attach an organization label
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Read a document from disk
    pub fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercased file extension, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Which parser branch recovered the record array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePath {
    /// The whole reply was a JSON array
    Strict,
    /// The array was cut out of surrounding prose or fencing
    BracketRecovery,
}

impl fmt::Display for ParsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePath::Strict => f.write_str("strict"),
            ParsePath::BracketRecovery => f.write_str("bracket recovery"),
        }
    }
}

/// Result of a local extraction run
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Dashboard-ready aggregate
    pub summary: Summary,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    /// Name of the LLM model used
    pub model_name: String,

    /// When the run finished
    pub completed_at: DateTime<Utc>,

    /// Characters of extracted document text
    pub document_chars: usize,

    /// Whether the document was cut to fit the prompt window
    pub truncated: bool,

    /// Characters in the LLM reply
    pub response_chars: usize,

    /// How the record array was recovered
    pub parse_path: ParsePath,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
