//! Summary module - the dashboard-ready aggregate of one document

use crate::disclosure::NormalizedDisclosure;
use crate::gri::category_prefix;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Count of disclosures per GRI category prefix, in first-seen order
pub type GriBreakdown = IndexMap<String, usize>;

/// Wire keys every summary must carry
pub const REQUIRED_KEYS: [&str; 3] = ["full_extraction", "gri_breakdown", "low_confidence"];

/// A summary broke one of its invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// Breakdown counts do not add up to the number of coded records
    #[error("breakdown counts {counted} records but {coded} have a GRI code")]
    BreakdownMismatch {
        /// Sum of breakdown values
        counted: usize,
        /// Records in `full_extraction` with a code
        coded: usize,
    },

    /// A breakdown key is not the prefix of any record's code
    #[error("breakdown category '{0}' has no matching record")]
    UnknownCategory(String),

    /// `low_confidence` is not the flagged subsequence of `full_extraction`
    #[error("low-confidence list has {found} records, expected {expected} in extraction order")]
    LowConfidenceMismatch {
        /// Flagged records in `full_extraction`
        expected: usize,
        /// Records in `low_confidence`
        found: usize,
    },
}

/// Aggregated extraction result for one document
///
/// Invariants (checked by [`Summary::validate`]):
/// - `gri_breakdown` values sum to the number of records with a GRI code
/// - `low_confidence` is exactly the flagged records of `full_extraction`,
///   in the same order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Organization the report belongs to
    pub organization: String,

    /// Records per category prefix
    pub gri_breakdown: GriBreakdown,

    /// Records needing human review
    pub low_confidence: Vec<NormalizedDisclosure>,

    /// Every enriched record, in extraction order
    pub full_extraction: Vec<NormalizedDisclosure>,
}

impl Summary {
    /// Total extracted sections
    pub fn total_sections(&self) -> usize {
        self.full_extraction.len()
    }

    /// Distinct GRI categories seen
    pub fn distinct_categories(&self) -> usize {
        self.gri_breakdown.len()
    }

    /// Records flagged for review
    pub fn low_confidence_count(&self) -> usize {
        self.low_confidence.len()
    }

    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.full_extraction.is_empty()
    }

    /// Check the summary's invariants
    ///
    /// Summaries built locally satisfy these by construction; summaries
    /// received over the wire must pass this before they are rendered.
    pub fn validate(&self) -> Result<(), SummaryError> {
        let codes: Vec<&str> = self
            .full_extraction
            .iter()
            .filter_map(|r| r.gri_code.as_deref())
            .collect();

        let counted: usize = self.gri_breakdown.values().sum();
        if counted != codes.len() {
            return Err(SummaryError::BreakdownMismatch {
                counted,
                coded: codes.len(),
            });
        }

        for key in self.gri_breakdown.keys() {
            if !codes.iter().any(|code| category_prefix(code) == key) {
                return Err(SummaryError::UnknownCategory(key.clone()));
            }
        }

        let flagged: Vec<&NormalizedDisclosure> = self
            .full_extraction
            .iter()
            .filter(|r| r.low_confidence)
            .collect();

        let matches = flagged.len() == self.low_confidence.len()
            && flagged
                .iter()
                .zip(&self.low_confidence)
                .all(|(expected, found)| *expected == found);

        if !matches {
            return Err(SummaryError::LowConfidenceMismatch {
                expected: flagged.len(),
                found: self.low_confidence.len(),
            });
        }

        Ok(())
    }
}
