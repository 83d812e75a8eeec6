//! Parse LLM output into raw disclosure records
//!
//! Models often wrap the requested array in prose or markdown fencing. The
//! parser tries the whole reply first, then falls back to the span between
//! the first `[` and the last `]`:
//!
//! ```text
//! Unparsed ─strict ok─────────────────────────────▶ Parsed(Strict)
//!    │
//!    └─▶ TriedStrict ─brackets, parse ok──────────▶ Parsed(BracketRecovery)
//!           │    │
//!           │    └─▶ TriedBracketRecovery ────────▶ Failed
//!           └─no brackets─────────────────────────▶ Failed
//! ```

use crate::error::ExtractorError;
use crate::types::ParsePath;
use altrua_domain::RawDisclosure;
use serde_json::Value;
use tracing::debug;

/// Records recovered from one LLM reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Raw records, in reply order, shape-unchecked
    pub records: Vec<RawDisclosure>,

    /// Which branch produced them
    pub path: ParsePath,
}

enum ParseState<'a> {
    Unparsed(&'a str),
    TriedStrict { text: &'a str, reason: String },
    TriedBracketRecovery { reason: String },
    Parsed(ParsedResponse),
    Failed(String),
}

impl<'a> ParseState<'a> {
    fn step(self) -> Self {
        match self {
            ParseState::Unparsed(text) => match parse_array(text) {
                Ok(records) => ParseState::Parsed(ParsedResponse {
                    records,
                    path: ParsePath::Strict,
                }),
                Err(reason) => ParseState::TriedStrict { text, reason },
            },
            ParseState::TriedStrict { text, reason } => match bracket_span(text) {
                None => ParseState::Failed(format!(
                    "no JSON array found in reply ({})",
                    reason
                )),
                Some(span) => match parse_array(span) {
                    Ok(records) => ParseState::Parsed(ParsedResponse {
                        records,
                        path: ParsePath::BracketRecovery,
                    }),
                    Err(reason) => ParseState::TriedBracketRecovery { reason },
                },
            },
            ParseState::TriedBracketRecovery { reason } => {
                ParseState::Failed(format!("bracketed span is not a JSON array ({})", reason))
            }
            done @ (ParseState::Parsed(_) | ParseState::Failed(_)) => done,
        }
    }
}

/// Parse an LLM reply into raw disclosure records
///
/// Succeeds with an empty list only when the reply really contains `[]`;
/// a reply with no recoverable array is a `MalformedResponse`.
pub fn parse_llm_response(response: &str) -> Result<ParsedResponse, ExtractorError> {
    let mut state = ParseState::Unparsed(response.trim());

    loop {
        state = match state.step() {
            ParseState::Parsed(parsed) => {
                debug!(
                    records = parsed.records.len(),
                    path = %parsed.path,
                    "Parsed LLM response"
                );
                return Ok(parsed);
            }
            ParseState::Failed(reason) => {
                return Err(ExtractorError::MalformedResponse(reason));
            }
            next => next,
        };
    }
}

/// Parse text that must be a JSON array
fn parse_array(text: &str) -> Result<Vec<RawDisclosure>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(RawDisclosure::new).collect()),
        other => Err(format!(
            "expected a JSON array, found {}",
            altrua_domain::disclosure::json_type_name(&other)
        )),
    }
}

/// Span from the first `[` to the last `]`, inclusive
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;

    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}
