/// Site configuration for the geotechnical monitoring service.
///
/// Defines the canonical defaults for the monitored site — coordinate
/// centers, generator parameters, and classification thresholds — and an
/// optional TOML override file. This is the single source of truth for
/// these values; other modules should take a `SiteConfig` rather than
/// hardcoding coordinates or thresholds.

use crate::model::Thresholds;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Coordinate centers
// ---------------------------------------------------------------------------

/// Center of the monitored slope used by the synthetic generator.
pub const GENERATOR_CENTER_LAT: f64 = 24.1711917;
pub const GENERATOR_CENTER_LON: f64 = 82.6588845;

/// Fallback center used when an ingested table carries no coordinates.
///
/// Deliberately independent of the generator center: callers must not
/// assume geographic consistency between ingested and generated tables
/// unless coordinates are explicitly supplied.
pub const INGEST_FALLBACK_LAT: f64 = 40.7128;
pub const INGEST_FALLBACK_LON: f64 = -74.0060;

/// Standard deviation of the per-axis coordinate jitter, in degrees.
/// Simulates sensors scattered around a single site.
pub const COORDINATE_JITTER_DEG: f64 = 0.01;

// ---------------------------------------------------------------------------
// Generator defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_SENSOR_COUNT: usize = 15;
pub const DEFAULT_DAY_COUNT: usize = 30;
pub const DEFAULT_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Classification thresholds
// ---------------------------------------------------------------------------

/// Established geotechnical criteria for the rockfall risk rule.
///
///   High:   displacement > 10 mm AND rainfall > 50 mm
///   Medium: displacement > 7 mm  OR  rainfall > 30 mm
///   Low:    everything else
pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    displacement_high_mm: 10.0,
    rainfall_high_mm: 50.0,
    displacement_medium_mm: 7.0,
    rainfall_medium_mm: 30.0,
};

// ---------------------------------------------------------------------------
// Site configuration
// ---------------------------------------------------------------------------

/// Full site configuration, overridable from a TOML file.
///
/// Every field has a documented default, so a missing or partial file is
/// never an error — absent keys fall back to the values above.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub generator_center_lat: f64,
    pub generator_center_lon: f64,
    pub ingest_fallback_lat: f64,
    pub ingest_fallback_lon: f64,
    pub coordinate_jitter_deg: f64,
    pub sensor_count: usize,
    pub day_count: usize,
    pub seed: u64,
    pub thresholds: Thresholds,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            generator_center_lat: GENERATOR_CENTER_LAT,
            generator_center_lon: GENERATOR_CENTER_LON,
            ingest_fallback_lat: INGEST_FALLBACK_LAT,
            ingest_fallback_lon: INGEST_FALLBACK_LON,
            coordinate_jitter_deg: COORDINATE_JITTER_DEG,
            sensor_count: DEFAULT_SENSOR_COUNT,
            day_count: DEFAULT_DAY_COUNT,
            seed: DEFAULT_SEED,
            thresholds: DEFAULT_THRESHOLDS,
        }
    }
}

impl SiteConfig {
    /// Parse a TOML configuration string. Absent keys take defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a TOML file. A missing file yields the
    /// defaults; an unreadable or malformed file is an error.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(SiteConfig::from_toml(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SiteConfig::default()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
