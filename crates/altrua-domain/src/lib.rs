//! Altrua Domain Layer
//!
//! This crate contains the data model for GRI disclosure extraction and the
//! trait interfaces that the pipeline's collaborators implement.
//!
//! ## Key Concepts
//!
//! - **RawDisclosure**: One untrusted record from an LLM reply, shape-unchecked
//! - **NormalizedDisclosure**: A trusted record with derived topic flags
//! - **GRI code**: A reporting identifier like `302-1`, whose prefix is its category
//! - **Summary**: The dashboard-ready aggregate handed to presentation
//!
//! ## Architecture
//!
//! - Pure data and invariants only, no I/O
//! - Infrastructure implementations (LLM providers, transports) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod disclosure;
pub mod gri;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use confidence::{is_low_confidence, LOW_CONFIDENCE_THRESHOLD};
pub use disclosure::{FieldError, NormalizedDisclosure, RawDisclosure};
pub use gri::{category_prefix, GriCategory};
pub use summary::{GriBreakdown, Summary, SummaryError};
pub use traits::{LlmPrompt, LlmProvider, TextExtractor};
