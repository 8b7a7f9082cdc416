/// Per-reading risk threshold rule.
///
/// Each reading is classified independently — no smoothing, no hysteresis,
/// no history from the same sensor. Simplicity and auditability are the
/// point: an inspector can recompute any tier by hand from two fields.

use crate::model::{Reading, RiskLevel, Thresholds};

/// Classify one reading against the site thresholds.
///
/// Pure function of `displacement_mm` and `rainfall_mm`:
///
///   displacement > high AND rainfall > high  →  High
///   displacement > med  OR  rainfall > med   →  Medium
///   otherwise                                →  Low
///
/// All comparisons are strict, so a reading exactly at a threshold stays in
/// the lower tier. Total over all real inputs; negative values simply land
/// in Low.
pub fn classify(reading: &Reading, thresholds: &Thresholds) -> RiskLevel {
    let displacement = reading.displacement_mm;
    let rainfall = reading.rainfall_mm;

    if displacement > thresholds.displacement_high_mm && rainfall > thresholds.rainfall_high_mm {
        RiskLevel::High
    } else if displacement > thresholds.displacement_medium_mm
        || rainfall > thresholds.rainfall_medium_mm
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::DEFAULT_THRESHOLDS;
    use chrono::NaiveDate;

    fn reading(displacement_mm: f64, rainfall_mm: f64) -> Reading {
        Reading {
            sensor_id: "S001".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            displacement_mm,
            pore_pressure_kpa: 150.0,
            strain_micro: 100.0,
            vibration_ms2: 2.0,
            rainfall_mm,
            latitude: 24.171192,
            longitude: 82.658884,
        }
    }

    fn classify_default(displacement_mm: f64, rainfall_mm: f64) -> RiskLevel {
        classify(&reading(displacement_mm, rainfall_mm), &DEFAULT_THRESHOLDS)
    }

    // --- High tier ----------------------------------------------------------

    #[test]
    fn test_high_requires_both_thresholds_exceeded() {
        assert_eq!(classify_default(12.0, 60.0), RiskLevel::High);
    }

    #[test]
    fn test_just_past_both_thresholds_is_high() {
        assert_eq!(classify_default(10.01, 50.01), RiskLevel::High);
    }

    #[test]
    fn test_high_displacement_alone_is_only_medium() {
        // Huge displacement without rainfall does not reach High — the High
        // rule is a conjunction.
        assert_eq!(classify_default(40.0, 5.0), RiskLevel::Medium);
    }

    // --- Boundary values (strict comparison) --------------------------------

    #[test]
    fn test_exactly_at_both_high_thresholds_is_medium() {
        // 10 mm / 50 mm sits on the High boundary without crossing it, but
        // both values clear the Medium thresholds.
        assert_eq!(classify_default(10.0, 50.0), RiskLevel::Medium);
    }

    #[test]
    fn test_exactly_at_medium_thresholds_is_low() {
        assert_eq!(classify_default(7.0, 30.0), RiskLevel::Low);
    }

    // --- Medium tier --------------------------------------------------------

    #[test]
    fn test_displacement_just_past_medium_threshold() {
        assert_eq!(classify_default(7.01, 0.0), RiskLevel::Medium);
    }

    #[test]
    fn test_rainfall_just_past_medium_threshold() {
        assert_eq!(classify_default(0.0, 30.01), RiskLevel::Medium);
    }

    // --- Low tier -----------------------------------------------------------

    #[test]
    fn test_zero_reading_is_low() {
        assert_eq!(classify_default(0.0, 0.0), RiskLevel::Low);
    }

    #[test]
    fn test_negative_values_fall_into_low() {
        // The rule is total: out-of-range sensor glitches classify rather
        // than panic, and negative values cannot exceed positive thresholds.
        assert_eq!(classify_default(-3.0, -1.0), RiskLevel::Low);
    }

    // --- Determinism --------------------------------------------------------

    #[test]
    fn test_classify_is_deterministic() {
        let r = reading(8.0, 20.0);
        assert_eq!(
            classify(&r, &DEFAULT_THRESHOLDS),
            classify(&r, &DEFAULT_THRESHOLDS)
        );
    }

    #[test]
    fn test_only_displacement_and_rainfall_matter() {
        let mut r = reading(5.0, 10.0);
        let before = classify(&r, &DEFAULT_THRESHOLDS);
        r.pore_pressure_kpa = 9_999.0;
        r.strain_micro = 9_999.0;
        r.vibration_ms2 = 9_999.0;
        assert_eq!(classify(&r, &DEFAULT_THRESHOLDS), before);
    }

    #[test]
    fn test_custom_thresholds_are_respected() {
        let tight = Thresholds {
            displacement_high_mm: 5.0,
            rainfall_high_mm: 10.0,
            displacement_medium_mm: 2.0,
            rainfall_medium_mm: 5.0,
        };
        assert_eq!(classify(&reading(6.0, 11.0), &tight), RiskLevel::High);
        assert_eq!(classify(&reading(3.0, 0.0), &tight), RiskLevel::Medium);
    }
}
