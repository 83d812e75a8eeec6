//! Core Extractor implementation

use crate::aggregator::aggregate;
use crate::config::ExtractorConfig;
use crate::enricher::enrich_records;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::text::PlainTextExtractor;
use crate::types::{ExtractionMetadata, ExtractionResult, ParsePath, SourceDocument};
use altrua_domain::traits::{LlmProvider, TextExtractor};
use altrua_domain::Summary;
use chrono::Utc;
use std::fmt::Display;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// The Extractor turns a CSR report into a disclosure summary
///
/// Stages run strictly in sequence for one document: text extraction, prompt
/// construction, the LLM call, parsing, enrichment and aggregation. The LLM
/// call is the only one that can stall, so it is bounded by
/// [`ExtractorConfig::llm_timeout_secs`].
pub struct Extractor<L, T = PlainTextExtractor> {
    llm_provider: L,
    text_extractor: T,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Extractor reading plain-text documents
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            text_extractor: PlainTextExtractor,
            config,
        }
    }
}

impl<L, T> Extractor<L, T>
where
    L: LlmProvider,
    L::Error: Display,
    T: TextExtractor,
    T::Error: Into<ExtractorError>,
{
    /// Swap in a different document reader
    pub fn with_text_extractor<U>(self, text_extractor: U) -> Extractor<L, U>
    where
        U: TextExtractor,
    {
        Extractor {
            llm_provider: self.llm_provider,
            text_extractor,
            config: self.config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Organization label for a document, falling back to the configured one
    pub fn organization_for<'a>(&'a self, document: &'a SourceDocument) -> &'a str {
        document
            .organization
            .as_deref()
            .unwrap_or(&self.config.organization)
    }

    /// Run the full pipeline over an uploaded document
    pub async fn extract(
        &self,
        document: &SourceDocument,
    ) -> Result<ExtractionResult, ExtractorError> {
        let text = self
            .text_extractor
            .extract_text(&document.file_name, &document.bytes)
            .map_err(|e| -> ExtractorError { e.into() })?;

        info!(
            file = %document.file_name,
            bytes = document.bytes.len(),
            chars = text.chars().count(),
            "Extracted document text"
        );

        self.extract_from_text(&text, self.organization_for(document))
            .await
    }

    /// Run the pipeline over text that has already been extracted
    pub async fn extract_from_text(
        &self,
        text: &str,
        organization: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::Extraction(
                "document contains no text".to_string(),
            ));
        }

        let start_time = Instant::now();

        let builder = PromptBuilder::new(text, organization)
            .with_max_chars(self.config.max_prompt_chars);
        let truncated = builder.is_truncated();
        let prompt = builder.build();

        debug!(
            prompt_chars = prompt.char_len(),
            truncated, "Built extraction prompt"
        );

        let llm_timeout = self.config.llm_timeout();
        let response = timeout(llm_timeout, self.llm_provider.generate(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout(llm_timeout))?
            .map_err(|e| ExtractorError::Transport(e.to_string()))?;

        debug!(response_chars = response.len(), "LLM responded");

        let (summary, parse_path) = summarize_response(organization, &response)?;

        let metadata = ExtractionMetadata {
            model_name: self.llm_provider.model_name().to_string(),
            completed_at: Utc::now(),
            document_chars: text.chars().count(),
            truncated,
            response_chars: response.chars().count(),
            parse_path,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(ExtractionResult { summary, metadata })
    }
}

/// Parse, enrich and aggregate one LLM reply
///
/// This is the offline half of the pipeline: it needs no LLM and can replay
/// a saved response.
pub fn summarize_response(
    organization: &str,
    response: &str,
) -> Result<(Summary, ParsePath), ExtractorError> {
    let parsed = parse_llm_response(response)?;
    let records = enrich_records(&parsed.records)?;
    let summary = aggregate(organization, records);

    info!(
        organization,
        sections = summary.total_sections(),
        categories = summary.distinct_categories(),
        low_confidence = summary.low_confidence_count(),
        path = %parsed.path,
        "Summarized extraction"
    );

    Ok((summary, parsed.path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use altrua_llm::MockProvider;

    fn create_test_extractor(response: &str) -> Extractor<MockProvider> {
        Extractor::new(MockProvider::new(response), ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_extract_empty_response() {
        let extractor = create_test_extractor("[]");

        let result = extractor
            .extract_from_text("Some text", "Acme")
            .await
            .unwrap();
        assert!(result.summary.is_empty());
        assert!(result.summary.gri_breakdown.is_empty());
        assert_eq!(result.metadata.model_name, "mock");
        assert_eq!(result.metadata.parse_path, ParsePath::Strict);
    }

    #[tokio::test]
    async fn test_blank_text_skips_llm() {
        let extractor = create_test_extractor("[]");

        let result = extractor.extract_from_text(" \n\t", "Acme").await;
        assert!(matches!(result, Err(ExtractorError::Extraction(_))));
        assert_eq!(extractor.llm_provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_document_organization_overrides_config() {
        let extractor = create_test_extractor("[]");
        let document = SourceDocument::new("r.txt", b"text".to_vec()).with_organization("Acme");

        let result = extractor.extract(&document).await.unwrap();
        assert_eq!(result.summary.organization, "Acme");

        let document = SourceDocument::new("r.txt", b"text".to_vec());
        let result = extractor.extract(&document).await.unwrap();
        assert_eq!(result.summary.organization, "Demo Corp");
    }

    #[test]
    fn test_summarize_response_end_to_end() {
        let response = r#"[
            {"section": "Water", "gri_code": "303-3", "confidence": 0.4},
            {"section": "Misc", "gri_code": null, "confidence": 0.8}
        ]"#;

        let (summary, path) = summarize_response("Demo Corp", response).unwrap();

        assert_eq!(path, ParsePath::Strict);
        assert_eq!(summary.gri_breakdown.len(), 1);
        assert_eq!(summary.gri_breakdown.get("303"), Some(&1));
        assert_eq!(summary.low_confidence.len(), 1);
        assert_eq!(summary.low_confidence[0].section.as_deref(), Some("Water"));

        let sections: Vec<_> = summary
            .full_extraction
            .iter()
            .map(|r| r.section.as_deref())
            .collect();
        assert_eq!(sections, vec![Some("Water"), Some("Misc")]);
    }

    #[test]
    fn test_summarize_malformed_response() {
        let result = summarize_response("Acme", "I cannot comply with this request.");
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }
}
