/// Canned-response assistant for the dashboard's help panel.
///
/// Keyword lookup over a handful of topics — no model, no network, no
/// state. Answers describe the risk methodology, the sensor catalogue, the
/// map legend, and the export options. When the caller supplies the current
/// analysis, the methodology answer is annotated with live tier totals.

use crate::model::RiskAnalysis;

/// Answer a free-form question with the closest canned topic response.
///
/// Matching is case-insensitive substring search, first topic wins in the
/// order below; unmatched questions get a capability summary.
pub fn respond(question: &str, analysis: Option<&RiskAnalysis>) -> String {
    let q = question.to_lowercase();
    let matches = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if matches(&["risk", "analysis", "prediction"]) {
        let mut answer = RISK_METHODOLOGY.to_string();
        if let Some(a) = analysis {
            answer.push_str(&format!(
                "\nCurrent assessment: {} high, {} medium, {} low risk readings.\n",
                a.total_high, a.total_medium, a.total_low
            ));
        }
        answer
    } else if matches(&["sensor", "data", "monitoring"]) {
        SENSOR_CATALOGUE.to_string()
    } else if matches(&["map", "visualization", "zones"]) {
        MAP_LEGEND.to_string()
    } else if matches(&["report", "export", "download"]) {
        EXPORT_OPTIONS.to_string()
    } else if matches(&["how", "work", "algorithm"]) {
        SYSTEM_OPERATION.to_string()
    } else {
        CAPABILITIES.to_string()
    }
}

const RISK_METHODOLOGY: &str = "\
Risk levels come from established geotechnical criteria:

High risk: displacement > 10mm AND rainfall > 50mm — potential instability
with water saturation.
Medium risk: displacement > 7mm OR rainfall > 30mm — elevated conditions
requiring monitoring.
Low risk: all other conditions — normal operational parameters.

Each reading is assessed independently; the per-sensor level is the most
frequent tier across that sensor's history.
";

const SENSOR_CATALOGUE: &str = "\
The monitoring network tracks five quantities per sensor:

- Displacement (mm): ground movement
- Pore pressure (kPa): water pressure in rock and soil
- Strain (micro): material deformation
- Vibration (m/s^2): seismic activity
- Rainfall (mm): precipitation

Sensors are scattered across the monitored slope; each reading carries the
sensor's coordinates.
";

const MAP_LEGEND: &str = "\
The risk map draws one marker per sensor, colored by its dominant risk
level: red for High, orange for Medium, green for Low. Marker popups show
the sensor id and its current tier.
";

const EXPORT_OPTIONS: &str = "\
Available exports:

- CSV table of all readings with risk levels (GIS-compatible; import as a
  point layer on the longitude/latitude columns)
- Standalone HTML risk assessment report with summary and recommendations
";

const SYSTEM_OPERATION: &str = "\
Pipeline, in order: readings are loaded (uploaded CSV or the synthetic
site model), validated against the required schema, classified per reading
by the threshold rule, then aggregated into per-sensor and global
summaries. Malformed tables are rejected whole before classification.
";

const CAPABILITIES: &str = "\
I can explain:

- the risk methodology (try: how is risk calculated?)
- the sensor catalogue (try: what sensors are monitored?)
- the map legend (try: what do the colors mean?)
- exports (try: how do I export data for QGIS?)
";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::model::Reading;
    use crate::sites::DEFAULT_THRESHOLDS;
    use chrono::NaiveDate;

    #[test]
    fn test_risk_question_routes_to_methodology() {
        let answer = respond("How is RISK calculated?", None);
        assert!(answer.contains("displacement > 10mm AND rainfall > 50mm"));
    }

    #[test]
    fn test_sensor_question_routes_to_catalogue() {
        let answer = respond("what sensors are monitored?", None);
        assert!(answer.contains("Pore pressure"));
    }

    #[test]
    fn test_map_question_routes_to_legend() {
        let answer = respond("what do the map colors mean?", None);
        assert!(answer.contains("red for High"));
    }

    #[test]
    fn test_export_question_routes_to_options() {
        let answer = respond("can I download a report?", None);
        assert!(answer.contains("HTML risk assessment report"));
    }

    #[test]
    fn test_unmatched_question_gets_capability_summary() {
        let answer = respond("hello there", None);
        assert!(answer.contains("I can explain"));
    }

    #[test]
    fn test_methodology_answer_includes_live_totals_when_available() {
        let reading = Reading {
            sensor_id: "S001".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            displacement_mm: 12.0,
            pore_pressure_kpa: 150.0,
            strain_micro: 100.0,
            vibration_ms2: 2.0,
            rainfall_mm: 60.0,
            latitude: 24.17,
            longitude: 82.66,
        };
        let analysis = analysis::analyze(vec![reading], &DEFAULT_THRESHOLDS);
        let answer = respond("explain the risk analysis", Some(&analysis));
        assert!(answer.contains("1 high, 0 medium, 0 low"));
    }
}
