/// Classification and rollup of reading tables.
///
/// `analyze` is the engine's single entry point for callers: classify every
/// row, then derive the per-sensor summaries, the (sensor, level) count
/// map, and the global tier totals in one pass each. The result is a fresh
/// snapshot; the input table is never mutated.

use crate::model::{ClassifiedReading, Reading, RiskAnalysis, RiskLevel, SensorSummary, Thresholds};
use crate::risk;
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Annotate every row with its risk level, preserving input order.
///
/// Returns a new table; the provider's output stays reusable. Re-running
/// classification on the readings of an already-annotated table yields the
/// same levels — the rule reads only provider fields.
pub fn classify_table(readings: &[Reading], thresholds: &Thresholds) -> Vec<ClassifiedReading> {
    readings
        .iter()
        .map(|r| ClassifiedReading {
            reading: r.clone(),
            risk_level: risk::classify(r, thresholds),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-sensor rollups
// ---------------------------------------------------------------------------

/// One summary per distinct sensor, in first-seen table order.
///
/// Coordinates come from the sensor's first row. The dominant risk level is
/// the most frequent level among the sensor's rows; when two levels share
/// the maximum count, the one appearing earliest in the sensor's row order
/// wins. The tie-break is pinned deliberately — hash-order "most common"
/// implementations drift silently here.
pub fn summarize_by_sensor(rows: &[ClassifiedReading]) -> Vec<SensorSummary> {
    struct Tally {
        latitude: f64,
        longitude: f64,
        // Count and first-occurrence position per level, indexed Low/Medium/High.
        counts: [usize; 3],
        first_seen: [usize; 3],
    }

    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for (pos, row) in rows.iter().enumerate() {
        let tally = tallies
            .entry(row.reading.sensor_id.clone())
            .or_insert_with(|| {
                order.push(row.reading.sensor_id.clone());
                Tally {
                    latitude: row.reading.latitude,
                    longitude: row.reading.longitude,
                    counts: [0; 3],
                    first_seen: [usize::MAX; 3],
                }
            });
        let level = row.risk_level as usize;
        tally.counts[level] += 1;
        if tally.first_seen[level] == usize::MAX {
            tally.first_seen[level] = pos;
        }
    }

    order
        .into_iter()
        .map(|sensor_id| {
            let tally = &tallies[&sensor_id];
            let mut dominant = 0usize;
            for level in 1..3 {
                let more = tally.counts[level] > tally.counts[dominant];
                let tied_but_earlier = tally.counts[level] == tally.counts[dominant]
                    && tally.first_seen[level] < tally.first_seen[dominant];
                if more || tied_but_earlier {
                    dominant = level;
                }
            }
            SensorSummary {
                sensor_id,
                latitude: tally.latitude,
                longitude: tally.longitude,
                dominant_risk_level: match dominant {
                    0 => RiskLevel::Low,
                    1 => RiskLevel::Medium,
                    _ => RiskLevel::High,
                },
            }
        })
        .collect()
}

/// Occurrence count per (sensor, level) pair. Pairs with zero occurrences
/// are omitted, not materialized. `BTreeMap` keeps iteration order
/// deterministic for exports and tests.
pub fn count_by_zone_and_level(
    rows: &[ClassifiedReading],
) -> BTreeMap<(String, RiskLevel), usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts
            .entry((row.reading.sensor_id.clone(), row.risk_level))
            .or_insert(0) += 1;
    }
    counts
}

/// Global tier totals as (high, medium, low). Always sums to the row count.
pub fn totals(rows: &[ClassifiedReading]) -> (usize, usize, usize) {
    let mut high = 0;
    let mut medium = 0;
    let mut low = 0;
    for row in rows {
        match row.risk_level {
            RiskLevel::High => high += 1,
            RiskLevel::Medium => medium += 1,
            RiskLevel::Low => low += 1,
        }
    }
    (high, medium, low)
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Run the full risk analysis over a reading table.
///
/// Schema validation is the provider's contract — typed `Reading` rows
/// cannot lack columns, so this cannot fail. Stateless: every call stands
/// alone, and concurrent calls on independent tables need no coordination.
pub fn analyze(readings: Vec<Reading>, thresholds: &Thresholds) -> RiskAnalysis {
    let rows = classify_table(&readings, thresholds);
    let counts_by_sensor_and_level = count_by_zone_and_level(&rows);
    let sensor_summaries = summarize_by_sensor(&rows);
    let (total_high, total_medium, total_low) = totals(&rows);

    RiskAnalysis {
        rows,
        counts_by_sensor_and_level,
        sensor_summaries,
        total_high,
        total_medium,
        total_low,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
