//! Pluggable summary transports
//!
//! The local [`Extractor`] is the canonical way to turn a document into a
//! [`Summary`]. A remote pipeline (the webhook variant) produces the same
//! wire shape, so both sit behind [`SummaryTransport`] and callers pick one
//! at construction time.

use crate::error::ExtractorError;
use crate::extractor::Extractor;
use crate::types::SourceDocument;
use altrua_domain::traits::{LlmProvider, TextExtractor};
use altrua_domain::Summary;
use async_trait::async_trait;
use std::fmt::Display;

/// Anything that can turn an uploaded document into a validated summary
#[async_trait]
pub trait SummaryTransport: Send + Sync {
    /// Short name for logs and error messages
    fn name(&self) -> &str;

    /// Produce the summary for one document, atomically
    async fn summarize(&self, document: &SourceDocument) -> Result<Summary, ExtractorError>;
}

#[async_trait]
impl<L, T> SummaryTransport for Extractor<L, T>
where
    L: LlmProvider,
    L::Error: Display,
    T: TextExtractor,
    T::Error: Into<ExtractorError>,
{
    fn name(&self) -> &str {
        "local"
    }

    async fn summarize(&self, document: &SourceDocument) -> Result<Summary, ExtractorError> {
        self.extract(document).await.map(|result| result.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use altrua_llm::MockProvider;

    #[tokio::test]
    async fn test_extractor_as_transport() {
        let llm = MockProvider::new(r#"[{"section":"Energy","gri_code":"302-1","confidence":0.9}]"#);
        let transport: Box<dyn SummaryTransport> =
            Box::new(Extractor::new(llm, ExtractorConfig::default()));

        let document = SourceDocument::new("report.txt", b"We used less energy.".to_vec());
        let summary = transport.summarize(&document).await.unwrap();

        assert_eq!(transport.name(), "local");
        assert_eq!(summary.gri_breakdown.get("302"), Some(&1));
        assert!(summary.validate().is_ok());
    }
}
