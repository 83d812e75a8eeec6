//! Confidence module - the human-review threshold

/// Confidence below which a disclosure is flagged for human review
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.65;

/// Whether a model-reported confidence marks a record as low confidence
///
/// Only a *known* confidence can be low: `None` yields `false`. Values are
/// compared verbatim against [`LOW_CONFIDENCE_THRESHOLD`]; there is no range
/// check, so `-1.0` is low and `1.5` is not.
///
/// # Examples
///
/// ```
/// use altrua_domain::is_low_confidence;
///
/// assert!(is_low_confidence(Some(0.4)));
/// assert!(!is_low_confidence(Some(0.65)));
/// assert!(!is_low_confidence(None));
/// ```
pub fn is_low_confidence(confidence: Option<f64>) -> bool {
    confidence.is_some_and(|c| c < LOW_CONFIDENCE_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_low_confidence(Some(0.65)));
        assert!(is_low_confidence(Some(0.649999)));
    }

    #[test]
    fn test_unknown_is_not_low() {
        assert!(!is_low_confidence(None));
    }

    #[test]
    fn test_out_of_range_compared_verbatim() {
        assert!(is_low_confidence(Some(-1.0)));
        assert!(!is_low_confidence(Some(1.5)));
    }

    #[test]
    fn test_nan_is_not_low() {
        assert!(!is_low_confidence(Some(f64::NAN)));
    }
}
