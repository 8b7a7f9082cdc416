/// CSV reading-table parser.
///
/// Accepts the dashboard upload format: a header row naming columns, one
/// reading per data row. Columns may appear in any order; unknown columns
/// are ignored. Required: `sensor_id`, `timestamp`, `displacement_mm`,
/// `rainfall_mm`. Optional numeric columns default to 0.0 when absent.
///
/// Coordinates are optional as a pair: if either `latitude` or `longitude`
/// is missing, both are synthesized by jittering the site's ingest fallback
/// center. The synthesis RNG is seeded with a fixed constant so ingesting
/// the same file twice yields identical tables.

use crate::model::{DataError, Reading};
use crate::sites::SiteConfig;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Timestamp format of both ingested and exported tables.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns that must be present for a table to be accepted.
pub const REQUIRED_COLUMNS: &[&str] = &["sensor_id", "timestamp", "displacement_mm", "rainfall_mm"];

/// Seed for coordinate synthesis. Fixed so re-ingesting a coordinate-less
/// file reproduces the same jittered positions.
const COORDINATE_SYNTHESIS_SEED: u64 = 7;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a CSV reading table.
///
/// Fails with `DataError::Schema` if any required column is absent, and
/// with `DataError::Parse` on the first unparseable timestamp or numeric
/// field — the whole table is rejected rather than skipping rows.
pub fn parse_csv(text: &str, cfg: &SiteConfig) -> Result<Vec<Reading>, DataError> {
    let mut lines = text.lines().enumerate();

    // First non-empty line is the header.
    let (_, header_line) = lines
        .by_ref()
        .find(|(_, l)| !l.trim().is_empty())
        .ok_or_else(|| DataError::Schema {
            missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        })?;

    let header: Vec<&str> = header_line.split(',').map(|s| s.trim()).collect();
    let column = |name: &str| header.iter().position(|h| *h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| column(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::Schema { missing });
    }

    let sensor_col = column("sensor_id").unwrap();
    let timestamp_col = column("timestamp").unwrap();
    let displacement_col = column("displacement_mm").unwrap();
    let rainfall_col = column("rainfall_mm").unwrap();
    let pore_col = column("pore_pressure_kpa");
    let strain_col = column("strain_micro");
    let vibration_col = column("vibration_ms2");

    // Coordinates are used only when both columns exist.
    let coord_cols = match (column("latitude"), column("longitude")) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => None,
    };
    let mut synth_rng = StdRng::seed_from_u64(COORDINATE_SYNTHESIS_SEED);

    let mut readings = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1; // 1-based, counting the header
        let fields: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
        if fields.len() < header.len() {
            return Err(DataError::Parse {
                column: "row".to_string(),
                value: format!("{} fields, expected {}", fields.len(), header.len()),
                line: line_no,
            });
        }

        let timestamp = NaiveDateTime::parse_from_str(fields[timestamp_col], TIMESTAMP_FORMAT)
            .map_err(|_| DataError::Parse {
                column: "timestamp".to_string(),
                value: fields[timestamp_col].to_string(),
                line: line_no,
            })?;

        let numeric = |col: usize, name: &str| -> Result<f64, DataError> {
            fields[col].parse::<f64>().map_err(|_| DataError::Parse {
                column: name.to_string(),
                value: fields[col].to_string(),
                line: line_no,
            })
        };
        // Absent optional columns default to 0.0; present ones must parse.
        let optional = |col: Option<usize>, name: &str| -> Result<f64, DataError> {
            match col {
                Some(c) => numeric(c, name),
                None => Ok(0.0),
            }
        };

        let (latitude, longitude) = match coord_cols {
            Some((lat_col, lon_col)) => {
                (numeric(lat_col, "latitude")?, numeric(lon_col, "longitude")?)
            }
            None => synthesize_coordinates(cfg, &mut synth_rng),
        };

        readings.push(Reading {
            sensor_id: fields[sensor_col].to_string(),
            timestamp,
            displacement_mm: numeric(displacement_col, "displacement_mm")?,
            pore_pressure_kpa: optional(pore_col, "pore_pressure_kpa")?,
            strain_micro: optional(strain_col, "strain_micro")?,
            vibration_ms2: optional(vibration_col, "vibration_ms2")?,
            rainfall_mm: numeric(rainfall_col, "rainfall_mm")?,
            latitude,
            longitude,
        });
    }

    Ok(readings)
}

/// Jitter the ingest fallback center. Uses the ingest center, not the
/// generator center — the two are independent site constants.
fn synthesize_coordinates(cfg: &SiteConfig, rng: &mut StdRng) -> (f64, f64) {
    let lat = cfg.ingest_fallback_lat
        + cfg.coordinate_jitter_deg * rng.sample::<f64, _>(StandardNormal);
    let lon = cfg.ingest_fallback_lon
        + cfg.coordinate_jitter_deg * rng.sample::<f64, _>(StandardNormal);
    (crate::generate::round_to(lat, 6), crate::generate::round_to(lon, 6))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
