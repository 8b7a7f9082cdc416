/// Core data types for the geotechnical risk monitoring service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic and no I/O — only types.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Reading types
// ---------------------------------------------------------------------------

/// A single timestamped observation from one geotechnical sensor.
///
/// One row of the reading table, whether synthesized by `generate` or parsed
/// from an uploaded CSV. `sensor_id` + `timestamp` is assumed unique within
/// a table by the aggregation code.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sensor_id: String,
    pub timestamp: NaiveDateTime,
    pub displacement_mm: f64,
    pub pore_pressure_kpa: f64,
    pub strain_micro: f64,
    pub vibration_ms2: f64,
    pub rainfall_mm: f64,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

/// A reading together with its derived risk level.
///
/// Classification never rewrites provider fields; the annotated table is a
/// new value, leaving the provider's output reusable.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedReading {
    pub reading: Reading,
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Risk types
// ---------------------------------------------------------------------------

/// Risk severity tiers, in ascending order of severity.
///
/// Derived by the engine from displacement and rainfall thresholds — never
/// supplied as input. The `Ord` impl follows severity: Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Display name used in exports and reports ("Low" / "Medium" / "High").
    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-sensor rollup: where the sensor sits and which risk level dominates
/// its history.
///
/// Coordinates come from the first row encountered for the sensor in table
/// order. Dominant level ties break to the level seen earliest in that
/// sensor's rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub sensor_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub dominant_risk_level: RiskLevel,
}

/// Output bundle of one `analyze` call — a pure snapshot, recomputed fresh
/// each invocation. No state survives between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAnalysis {
    /// Every input row, annotated with its risk level, in input order.
    pub rows: Vec<ClassifiedReading>,
    /// Occurrence count per (sensor, level). Zero entries are omitted.
    pub counts_by_sensor_and_level: BTreeMap<(String, RiskLevel), usize>,
    /// One summary per distinct sensor, in first-seen order.
    pub sensor_summaries: Vec<SensorSummary>,
    pub total_high: usize,
    pub total_medium: usize,
    pub total_low: usize,
}

// ---------------------------------------------------------------------------
// Threshold types
// ---------------------------------------------------------------------------

/// Classification thresholds for the risk rule, in millimetres.
///
/// All comparisons are strict (`>`): a reading exactly at a threshold does
/// not cross it. Default values live in `sites::SiteConfig`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, Serialize)]
pub struct Thresholds {
    /// Displacement above this AND rainfall above `rainfall_high_mm` → High.
    pub displacement_high_mm: f64,
    pub rainfall_high_mm: f64,
    /// Displacement above this OR rainfall above `rainfall_medium_mm` → Medium.
    pub displacement_medium_mm: f64,
    pub rainfall_medium_mm: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when ingesting an external reading table.
///
/// Both are detected eagerly, before any classification runs — the engine
/// never sees a partially valid table.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// One or more required columns are absent from the input.
    Schema { missing: Vec<String> },
    /// A timestamp or numeric field could not be parsed. The whole table is
    /// rejected on the first such value.
    Parse {
        column: String,
        value: String,
        /// 1-based line number in the source file (header is line 1).
        line: usize,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Schema { missing } => {
                write!(f, "Missing required columns: {}", missing.join(", "))
            }
            DataError::Parse { column, value, line } => {
                write!(f, "Unparseable {} value '{}' on line {}", column, value, line)
            }
        }
    }
}

impl std::error::Error for DataError {}
