//! Fold enriched records into a summary

use altrua_domain::{category_prefix, GriBreakdown, NormalizedDisclosure, Summary};

/// Build the summary for one document
///
/// Records without a GRI code count toward `full_extraction` but not toward
/// the breakdown. A present but empty code is still a code and is counted
/// under the empty prefix, so the breakdown always sums to the number of
/// coded records. Categories appear in the order they are first seen.
pub fn aggregate(organization: impl Into<String>, records: Vec<NormalizedDisclosure>) -> Summary {
    let gri_breakdown = records
        .iter()
        .filter_map(|r| r.gri_code.as_deref())
        .fold(GriBreakdown::new(), |mut breakdown, code| {
            *breakdown.entry(category_prefix(code).to_string()).or_insert(0) += 1;
            breakdown
        });

    let low_confidence = records.iter().filter(|r| r.low_confidence).cloned().collect();

    Summary {
        organization: organization.into(),
        gri_breakdown,
        low_confidence,
        full_extraction: records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enricher::enrich_records;
    use altrua_domain::RawDisclosure;
    use chrono::Utc;
    use serde_json::json;

    fn record(code: Option<&str>, confidence: Option<f64>) -> NormalizedDisclosure {
        NormalizedDisclosure {
            section: Some("Section".to_string()),
            gri_code: code.map(String::from),
            confidence,
            extracted_at: Utc::now(),
            is_energy_related: false,
            is_water_related: false,
            is_emissions_related: false,
            low_confidence: confidence.is_some_and(|c| c < 0.65),
        }
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate("Acme", Vec::new());

        assert_eq!(summary.organization, "Acme");
        assert!(summary.gri_breakdown.is_empty());
        assert!(summary.low_confidence.is_empty());
        assert!(summary.full_extraction.is_empty());
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn test_empty_code_counted_under_empty_prefix() {
        let summary = aggregate(
            "Acme",
            vec![record(Some(""), Some(0.9)), record(Some("303-3"), None), record(None, None)],
        );

        assert_eq!(summary.gri_breakdown.get(""), Some(&1));
        assert_eq!(summary.gri_breakdown.get("303"), Some(&1));
        assert_eq!(summary.gri_breakdown.values().sum::<usize>(), 2);
        assert!(summary.validate().is_ok());
    }

    #[test]
    fn test_water_withdrawal_scenario() {
        let raws = vec![RawDisclosure::new(json!({
            "section": "Water withdrawal",
            "gri_code": "303-3",
            "confidence": 0.4
        }))];
        let summary = aggregate("Demo Corp", enrich_records(&raws).unwrap());

        assert_eq!(summary.gri_breakdown.get("303"), Some(&1));
        assert_eq!(summary.gri_breakdown.len(), 1);
        assert_eq!(summary.low_confidence.len(), 1);
        assert!(summary.full_extraction[0].is_water_related);
        assert_eq!(summary.low_confidence[0], summary.full_extraction[0]);
    }

    #[test]
    fn test_breakdown_groups_by_prefix_in_first_seen_order() {
        let records = vec![
            record(Some("305-1"), Some(0.9)),
            record(Some("302-1"), Some(0.9)),
            record(Some("305-2"), Some(0.9)),
            record(Some("302-4"), Some(0.9)),
            record(Some("305-3"), Some(0.9)),
        ];
        let summary = aggregate("Acme", records);

        let entries: Vec<_> = summary
            .gri_breakdown
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        assert_eq!(entries, vec![("305", 3), ("302", 2)]);
    }

    #[test]
    fn test_uncoded_records_are_kept_but_not_counted() {
        let records = vec![
            record(None, Some(0.9)),
            record(Some("401-1"), Some(0.9)),
            record(None, None),
        ];
        let summary = aggregate("Acme", records);

        assert_eq!(summary.total_sections(), 3);
        assert_eq!(summary.gri_breakdown.values().sum::<usize>(), 1);
        assert_eq!(summary.gri_breakdown.get("401"), Some(&1));
    }

    #[test]
    fn test_code_without_separator_is_its_own_category() {
        let summary = aggregate("Acme", vec![record(Some("GRI"), Some(0.9))]);
        assert_eq!(summary.gri_breakdown.get("GRI"), Some(&1));
    }

    #[test]
    fn test_low_confidence_is_ordered_subset() {
        let records = vec![
            record(Some("302-1"), Some(0.2)),
            record(Some("303-1"), Some(0.9)),
            record(Some("305-1"), Some(0.5)),
            record(None, None),
        ];
        let summary = aggregate("Acme", records);

        let codes: Vec<_> = summary
            .low_confidence
            .iter()
            .map(|r| r.gri_code.as_deref())
            .collect();
        assert_eq!(codes, vec![Some("302-1"), Some("305-1")]);
    }

    #[test]
    fn test_full_extraction_is_input_unchanged() {
        let records = vec![
            record(Some("302-1"), Some(0.2)),
            record(None, Some(0.9)),
        ];
        let summary = aggregate("Acme", records.clone());
        assert_eq!(summary.full_extraction, records);
    }

    #[test]
    fn test_aggregated_summary_validates() {
        let records = vec![
            record(Some("302-1"), Some(0.2)),
            record(Some("303-1"), Some(0.9)),
            record(None, Some(0.1)),
        ];
        assert!(aggregate("Acme", records).validate().is_ok());
    }
}
