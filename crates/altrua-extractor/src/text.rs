//! Plain-text document reader

use crate::error::ExtractorError;
use altrua_domain::TextExtractor;

/// Page separator emitted by PDF-to-text tools
pub const PAGE_BREAK: char = '\x0c';

/// Leading bytes of container formats this reader cannot decode
const BINARY_SIGNATURES: [(&[u8], &str); 2] = [(b"%PDF", "PDF"), (b"PK\x03\x04", "ZIP (DOCX/XLSX)")];

/// Reads text documents, page by page
///
/// Pages are separated by form feeds. Each page is trimmed; a page with no
/// text stays in place as an empty line rather than failing the document.
///
/// Files whose extension names a non-text format, or whose bytes look
/// binary, are refused up front so they never reach the LLM. Convert them
/// to text first (for example with `pdftotext`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Split decoded text into trimmed pages
    pub fn pages(text: &str) -> Vec<&str> {
        text.split(PAGE_BREAK).map(str::trim).collect()
    }
}

impl TextExtractor for PlainTextExtractor {
    type Error = ExtractorError;

    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, Self::Error> {
        check_readable(file_name, bytes)?;

        let decoded = String::from_utf8_lossy(bytes);
        let text = Self::pages(&decoded).join("\n");

        if text.trim().is_empty() {
            return Err(ExtractorError::Extraction(format!(
                "no text found in '{}'",
                file_name
            )));
        }

        Ok(text)
    }
}

/// Refuse documents that are not plain text
fn check_readable(file_name: &str, bytes: &[u8]) -> Result<(), ExtractorError> {
    if let Some(mime) = mime_guess::from_path(file_name).first() {
        if mime.type_().as_str() != "text" {
            return Err(ExtractorError::Extraction(format!(
                "cannot read '{}': {} is not a plain-text format",
                file_name,
                mime.essence_str()
            )));
        }
    }

    if let Some((_, format)) = BINARY_SIGNATURES
        .iter()
        .find(|(signature, _)| bytes.starts_with(signature))
    {
        return Err(ExtractorError::Extraction(format!(
            "cannot read '{}': content is {}, not plain text",
            file_name, format
        )));
    }

    if bytes.contains(&0) {
        return Err(ExtractorError::Extraction(format!(
            "cannot read '{}': content is binary",
            file_name
        )));
    }

    Ok(())
}
