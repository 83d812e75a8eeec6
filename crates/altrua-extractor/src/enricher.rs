//! Enrich raw LLM records into normalized disclosures

use crate::error::ExtractorError;
use altrua_domain::{is_low_confidence, GriCategory, NormalizedDisclosure, RawDisclosure};
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Enrich one record, stamping it with `extracted_at`
///
/// Missing or `null` fields become `None` and their flags `false`. The
/// section is carried through whatever its JSON type. A code that is not a
/// string, or a confidence that is not a number, is a `TypeMismatch`.
pub fn enrich_record(
    index: usize,
    raw: &RawDisclosure,
    extracted_at: DateTime<Utc>,
) -> Result<NormalizedDisclosure, ExtractorError> {
    let mismatch = |source| ExtractorError::TypeMismatch { index, source };

    let section = raw.section().map_err(mismatch)?;
    let gri_code = raw.gri_code().map_err(mismatch)?;
    let confidence = raw.confidence().map_err(mismatch)?;

    Ok(NormalizedDisclosure {
        section: section.map(Cow::into_owned),
        gri_code: gri_code.map(String::from),
        confidence,
        extracted_at,
        is_energy_related: GriCategory::Energy.matches(gri_code),
        is_water_related: GriCategory::Water.matches(gri_code),
        is_emissions_related: GriCategory::Emissions.matches(gri_code),
        low_confidence: is_low_confidence(confidence),
    })
}

/// Enrich every record, one-to-one and in order
///
/// Each record gets its own timestamp, taken when that record is enriched.
/// The first bad record aborts the batch.
pub fn enrich_records(raws: &[RawDisclosure]) -> Result<Vec<NormalizedDisclosure>, ExtractorError> {
    enrich_records_with(raws, Utc::now)
}

/// Like [`enrich_records`], with an injectable clock
pub fn enrich_records_with<F>(
    raws: &[RawDisclosure],
    mut now: F,
) -> Result<Vec<NormalizedDisclosure>, ExtractorError>
where
    F: FnMut() -> DateTime<Utc>,
{
    raws.iter()
        .enumerate()
        .map(|(index, raw)| enrich_record(index, raw, now()))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn code_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            "30[0-9]-[0-9]{1,2}".prop_map(Some),
            "[0-9]{1,3}(-[0-9a-z]{1,3})?".prop_map(Some),
        ]
    }

    fn confidence_strategy() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![Just(None), (-2.0f64..2.0).prop_map(Some)]
    }

    proptest! {
        /// Property: enriching twice yields the same derived flags
        #[test]
        fn test_enrichment_flags_idempotent(code in code_strategy(), confidence in confidence_strategy()) {
            let raw = RawDisclosure::new(json!({ "gri_code": code, "confidence": confidence }));

            let first = enrich_record(0, &raw, Utc::now()).unwrap();
            let second = enrich_record(0, &raw, Utc::now()).unwrap();

            prop_assert_eq!(first.is_energy_related, second.is_energy_related);
            prop_assert_eq!(first.is_water_related, second.is_water_related);
            prop_assert_eq!(first.is_emissions_related, second.is_emissions_related);
            prop_assert_eq!(first.low_confidence, second.low_confidence);
        }

        /// Property: low_confidence is exactly "known and below 0.65"
        #[test]
        fn test_low_confidence_definition(confidence in confidence_strategy()) {
            let raw = RawDisclosure::new(json!({ "confidence": confidence }));
            let record = enrich_record(0, &raw, Utc::now()).unwrap();

            prop_assert_eq!(record.low_confidence, confidence.is_some_and(|c| c < 0.65));
        }

        /// Property: each topic flag is a prefix test on the code
        #[test]
        fn test_topic_flags_follow_prefix(code in code_strategy()) {
            let raw = RawDisclosure::new(json!({ "gri_code": code }));
            let record = enrich_record(0, &raw, Utc::now()).unwrap();
            let code = code.as_deref();

            prop_assert_eq!(record.is_energy_related, code.is_some_and(|c| c.starts_with("302")));
            prop_assert_eq!(record.is_water_related, code.is_some_and(|c| c.starts_with("303")));
            prop_assert_eq!(record.is_emissions_related, code.is_some_and(|c| c.starts_with("305")));
        }
    }
}
