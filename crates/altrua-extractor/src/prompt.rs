//! LLM prompt engineering for GRI disclosure extraction

use crate::config::DEFAULT_MAX_PROMPT_CHARS;
use altrua_domain::LlmPrompt;

/// Builds prompts for the LLM to map report sections to GRI codes
///
/// The document is cut to its first `max_chars` characters. The cut is purely
/// positional: sections past the window are never seen by the model.
pub struct PromptBuilder<'a> {
    text: &'a str,
    organization: &'a str,
    max_chars: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, organization: &'a str) -> Self {
        Self {
            text,
            organization,
            max_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    /// Override the document window
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Whether the document is longer than the window
    pub fn is_truncated(&self) -> bool {
        self.text.chars().nth(self.max_chars).is_some()
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> LlmPrompt {
        let mut user = String::new();

        user.push_str(&format!("Organization: {}\n\n", self.organization));
        user.push_str("CSR TEXT:\n");
        user.push_str(truncate_chars(self.text, self.max_chars));
        user.push_str("\n\n");
        user.push_str(OUTPUT_FORMAT_REMINDER);

        LlmPrompt {
            system: EXTRACTION_INSTRUCTIONS.to_string(),
            user,
        }
    }
}

/// The first `max_chars` characters of `text`, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an ESG analyst. Given the CSR text below, identify disclosures and map each
to GRI codes.

Each disclosure must follow this format:

{
  "section": "name of the report section",
  "gri_code": "GRI disclosure code, e.g. 302-1",
  "confidence": 0.0-1.0
}

Rules:
- One object per disclosure section
- Use the full disclosure code with its hyphen ("305-1", not "305")
- Use null for gri_code when a section is reportable but no code fits
- confidence is your certainty that the section-to-code mapping is correct"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Return ONLY a JSON array of objects with:
[
  {
    "section": "...",
    "gri_code": "...",
    "confidence": 0.0
  }
]"#;
