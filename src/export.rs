/// Flat-file exports: CSV tables and the standalone HTML risk report.
///
/// CSV output is byte-stable: fixed column order, fixed decimal precision
/// (displacement/pressure/strain 2 places, vibration 3, rainfall 1,
/// coordinates 6), timestamps as `YYYY-MM-DD HH:MM:SS`. The precision is
/// cosmetic rather than semantic, but downstream GIS imports diff exports
/// byte for byte, so it is pinned here and covered by tests.

use crate::ingest::csv::TIMESTAMP_FORMAT;
use crate::model::{Reading, RiskAnalysis};
use chrono::NaiveDateTime;

/// Column order of every exported table.
pub const EXPORT_COLUMNS: &[&str] = &[
    "sensor_id",
    "timestamp",
    "displacement_mm",
    "pore_pressure_kpa",
    "strain_micro",
    "vibration_ms2",
    "rainfall_mm",
    "latitude",
    "longitude",
];

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Render a reading table as CSV, fully populated, fixed precision.
pub fn to_csv(readings: &[Reading]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_COLUMNS.join(","));
    out.push('\n');
    for r in readings {
        push_reading_fields(&mut out, r);
        out.push('\n');
    }
    out
}

/// Render an annotated table as CSV with a trailing `risk_level` column —
/// the GIS export format (import as a point layer on longitude/latitude).
pub fn annotated_to_csv(analysis: &RiskAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_COLUMNS.join(","));
    out.push_str(",risk_level\n");
    for row in &analysis.rows {
        push_reading_fields(&mut out, &row.reading);
        out.push(',');
        out.push_str(row.risk_level.name());
        out.push('\n');
    }
    out
}

fn push_reading_fields(out: &mut String, r: &Reading) {
    out.push_str(&format!(
        "{},{},{:.2},{:.2},{:.2},{:.3},{:.1},{:.6},{:.6}",
        r.sensor_id,
        r.timestamp.format(TIMESTAMP_FORMAT),
        r.displacement_mm,
        r.pore_pressure_kpa,
        r.strain_micro,
        r.vibration_ms2,
        r.rainfall_mm,
        r.latitude,
        r.longitude,
    ));
}

// ---------------------------------------------------------------------------
// JSON marker feed
// ---------------------------------------------------------------------------

/// Serialize the per-sensor summaries as pretty JSON — the marker feed the
/// map widget plots (one marker per sensor, colored by dominant level).
pub fn sensor_markers_json(analysis: &RiskAnalysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&analysis.sensor_summaries)
}

// ---------------------------------------------------------------------------
// HTML report
// ---------------------------------------------------------------------------

/// Render a standalone HTML risk assessment report.
///
/// `generated_at` is injected by the caller so report generation stays
/// deterministic in tests.
pub fn html_report(analysis: &RiskAnalysis, generated_at: NaiveDateTime) -> String {
    let row_count = analysis.rows.len();
    let percent = |count: usize| {
        if row_count == 0 {
            0.0
        } else {
            count as f64 / row_count as f64 * 100.0
        }
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<title>GeoRisk Assessment Report</title>\n");
    html.push_str(
        "<style>\n\
         body { font-family: Arial, sans-serif; margin: 40px; }\n\
         .header { background: #1f4e79; color: white; padding: 20px; }\n\
         .risk-high { background: #dc3545; color: white; padding: 10px; }\n\
         .risk-medium { background: #fd7e14; color: white; padding: 10px; }\n\
         .risk-low { background: #28a745; color: white; padding: 10px; }\n\
         .section { margin: 20px 0; }\n\
         table { border-collapse: collapse; }\n\
         td, th { border: 1px solid #ccc; padding: 6px 10px; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<div class=\"header\">\n<h1>GeoRisk Assessment Report</h1>\n");
    html.push_str(&format!(
        "<p>Generated on: {}</p>\n</div>\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));

    html.push_str("<div class=\"section\">\n<h2>Summary</h2>\n<ul>\n");
    html.push_str(&format!("<li>Total readings: {}</li>\n", row_count));
    html.push_str(&format!(
        "<li>Monitored sensors: {}</li>\n",
        analysis.sensor_summaries.len()
    ));
    html.push_str(&format!(
        "<li class=\"risk-high\">High risk readings: {} ({:.1}%)</li>\n",
        analysis.total_high,
        percent(analysis.total_high)
    ));
    html.push_str(&format!(
        "<li class=\"risk-medium\">Medium risk readings: {} ({:.1}%)</li>\n",
        analysis.total_medium,
        percent(analysis.total_medium)
    ));
    html.push_str(&format!(
        "<li class=\"risk-low\">Low risk readings: {} ({:.1}%)</li>\n",
        analysis.total_low,
        percent(analysis.total_low)
    ));
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class=\"section\">\n<h2>Sensor Risk Levels</h2>\n<table>\n");
    html.push_str("<tr><th>Sensor</th><th>Latitude</th><th>Longitude</th><th>Dominant Risk</th></tr>\n");
    for s in &analysis.sensor_summaries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.6}</td><td>{:.6}</td><td class=\"risk-{}\">{}</td></tr>\n",
            s.sensor_id,
            s.latitude,
            s.longitude,
            s.dominant_risk_level.name().to_lowercase(),
            s.dominant_risk_level,
        ));
    }
    html.push_str("</table>\n</div>\n");

    html.push_str(
        "<div class=\"section\">\n<h2>Recommendations</h2>\n<ul>\n\
         <li>Implement enhanced monitoring protocols for high-risk sensors</li>\n\
         <li>Review evacuation procedures for zones with dominant High risk</li>\n\
         <li>Install additional sensors in identified risk corridors</li>\n\
         </ul>\n</div>\n",
    );

    html.push_str("</body>\n</html>\n");
    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
