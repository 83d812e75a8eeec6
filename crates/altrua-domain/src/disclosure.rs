//! Disclosure module - raw and normalized GRI disclosure records

use crate::gri::GriCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

/// Name of the section field in LLM output
pub const SECTION_FIELD: &str = "section";
/// Name of the GRI code field in LLM output
pub const GRI_CODE_FIELD: &str = "gri_code";
/// Name of the confidence field in LLM output
pub const CONFIDENCE_FIELD: &str = "confidence";

/// A field of a raw record had a JSON type the pipeline cannot work with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' expected {expected}, found {found}")]
pub struct FieldError {
    /// Field name, or `"record"` when the record itself is not an object
    pub field: &'static str,
    /// Expected JSON type
    pub expected: &'static str,
    /// JSON type actually present
    pub found: &'static str,
}

/// One disclosure record exactly as the LLM produced it
///
/// No invariants hold: any field may be absent, `null`, or of the wrong type,
/// and the record may not even be a JSON object. Field access is checked
/// lazily through the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDisclosure(Value);

impl RawDisclosure {
    /// Wrap an arbitrary JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the underlying JSON value
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `section` field as text, if present and non-null
    ///
    /// Section labels are display-only, so any JSON type is accepted. Strings
    /// are borrowed as-is; numbers, booleans, arrays and objects are rendered
    /// as their compact JSON text (`4.1` becomes `"4.1"`).
    pub fn section(&self) -> Result<Option<Cow<'_, str>>, FieldError> {
        Ok(self.field(SECTION_FIELD)?.map(|value| match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }))
    }

    /// The `gri_code` field, if present and non-null
    pub fn gri_code(&self) -> Result<Option<&str>, FieldError> {
        self.string_field(GRI_CODE_FIELD)
    }

    /// The `confidence` field, if present and non-null
    ///
    /// Any JSON number is accepted, including values outside `[0, 1]`.
    pub fn confidence(&self) -> Result<Option<f64>, FieldError> {
        match self.field(CONFIDENCE_FIELD)? {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or(FieldError {
                field: CONFIDENCE_FIELD,
                expected: "number",
                found: json_type_name(value),
            }),
        }
    }

    fn string_field(&self, name: &'static str) -> Result<Option<&str>, FieldError> {
        match self.field(name)? {
            None => Ok(None),
            Some(value) => value.as_str().map(Some).ok_or(FieldError {
                field: name,
                expected: "string",
                found: json_type_name(value),
            }),
        }
    }

    /// Look up a field, folding "absent" and "null" together
    fn field(&self, name: &'static str) -> Result<Option<&Value>, FieldError> {
        let obj = self.0.as_object().ok_or(FieldError {
            field: "record",
            expected: "object",
            found: json_type_name(&self.0),
        })?;

        Ok(obj.get(name).filter(|v| !v.is_null()))
    }
}

impl From<Value> for RawDisclosure {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A disclosure after enrichment: typed fields plus derived flags
///
/// `extracted_at` is stamped once when the record is enriched and never
/// changes afterwards. The topic flags are independent of each other; a
/// record with no code has all of them `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDisclosure {
    /// Name of the report section
    pub section: Option<String>,

    /// GRI code the section was mapped to
    pub gri_code: Option<String>,

    /// Model-reported confidence, unvalidated
    pub confidence: Option<f64>,

    /// When this record was enriched (UTC)
    pub extracted_at: DateTime<Utc>,

    /// GRI 302 (energy) disclosure
    pub is_energy_related: bool,

    /// GRI 303 (water) disclosure
    pub is_water_related: bool,

    /// GRI 305 (emissions) disclosure
    pub is_emissions_related: bool,

    /// Known confidence below the review threshold
    pub low_confidence: bool,
}

impl NormalizedDisclosure {
    /// Read the topic flag for a category
    pub fn is_related_to(&self, category: GriCategory) -> bool {
        match category {
            GriCategory::Energy => self.is_energy_related,
            GriCategory::Water => self.is_water_related,
            GriCategory::Emissions => self.is_emissions_related,
        }
    }

    /// Categories whose flag is set
    pub fn categories(&self) -> Vec<GriCategory> {
        GriCategory::ALL
            .into_iter()
            .filter(|c| self.is_related_to(*c))
            .collect()
    }
}

/// JSON type name for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
