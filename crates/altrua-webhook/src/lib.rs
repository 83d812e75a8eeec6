//! Altrua Webhook Transport
//!
//! Client for a remote extraction pipeline. The report is uploaded as-is and
//! the webhook answers with a pre-computed summary, which is checked against
//! the same invariants as a locally built one before it is returned.
//!
//! # Example
//!
//! ```no_run
//! use altrua_extractor::{SourceDocument, SummaryTransport};
//! use altrua_webhook::WebhookClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WebhookClient::new("https://hooks.example.com/webhook/csr_upload")?;
//! let document = SourceDocument::from_path("disney_csr.pdf")?;
//!
//! let summary = client.summarize(&document).await?;
//! println!("Sections: {}", summary.total_sections());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{
    content_type_for, summary_from_value, WebhookClient, DEFAULT_TIMEOUT_SECS, FILE_FIELD,
};
pub use error::WebhookError;
