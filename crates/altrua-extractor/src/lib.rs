//! Altrua Extractor
//!
//! Turns a CSR report into a dashboard-ready summary of GRI disclosures.
//!
//! # Overview
//!
//! The model is asked to list the report's disclosure sections and map each
//! to a GRI code with a confidence score. Its reply is untrusted text, so the
//! pipeline recovers the record array, types each record, derives topic and
//! review flags, and folds everything into a [`Summary`].
//!
//! # Architecture
//!
//! ```text
//! Document → Text → Prompt → LLM → Parser → Enricher → Aggregator → Summary
//! ```
//!
//! Each run is a pure function of its document. The LLM call is the only
//! stage that touches the network, and it is bounded by a timeout.
//!
//! # Key Features
//!
//! - **Bounded prompt**: the document is cut to a fixed character window
//! - **Tolerant parsing**: arrays wrapped in prose or fencing are recovered
//! - **Typed enrichment**: mistyped fields fail fast instead of coercing
//! - **Atomic results**: a run either yields a full summary or an error
//! - **Pluggable transport**: a remote pipeline can stand in for the local one
//!
//! # Example Usage
//!
//! ```
//! use altrua_extractor::{Extractor, ExtractorConfig, SourceDocument};
//! use altrua_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"[{"section":"Water","gri_code":"303-3","confidence":0.4}]"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let document = SourceDocument::new("report.txt", b"Water withdrawal rose 3%.".to_vec());
//! let result = extractor.extract(&document).await?;
//!
//! println!("Sections: {}", result.summary.total_sections());
//! println!("Needs review: {}", result.summary.low_confidence_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod enricher;
mod error;
mod extractor;
mod parser;
mod prompt;
mod text;
mod transport;
mod types;


pub use aggregator::aggregate;
pub use altrua_domain::Summary;
pub use config::{ExtractorConfig, DEFAULT_MAX_PROMPT_CHARS, DEFAULT_ORGANIZATION};
pub use enricher::{enrich_record, enrich_records, enrich_records_with};
pub use error::ExtractorError;
pub use extractor::{summarize_response, Extractor};
pub use parser::{parse_llm_response, ParsedResponse};
pub use prompt::{truncate_chars, PromptBuilder};
pub use text::{PlainTextExtractor, PAGE_BREAK};
pub use transport::SummaryTransport;
pub use types::{ExtractionMetadata, ExtractionResult, ParsePath, SourceDocument};
