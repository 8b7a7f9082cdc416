/// Synthetic sensor data provider.
///
/// When no uploaded table is available, the dashboard runs against a
/// deterministic synthetic table from the monitoring network's site model.
/// A fixed seed reproduces the table exactly, which keeps every view of one
/// session consistent and makes the pipeline testable end to end.
///
/// # Clock injection
/// `generate_at` accepts a `now` parameter rather than calling `Utc::now()`
/// internally, so tests get byte-identical tables without time mocking.
/// `generate` is the convenience wrapper for production use.

use crate::model::Reading;
use crate::sites::SiteConfig;
use chrono::{Duration, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Exp1, StandardNormal};

// ---------------------------------------------------------------------------
// Distribution parameters
// ---------------------------------------------------------------------------

const DISPLACEMENT_MEAN_MM: f64 = 5.0;
const DISPLACEMENT_STDEV_MM: f64 = 2.0;
const RAINFALL_MEAN_MM: f64 = 20.0;
const RAINFALL_STDEV_MM: f64 = 15.0;
/// Coupling between rainfall and displacement. The risk rule is designed to
/// detect exactly this correlation, so the generator injects it.
const RAINFALL_DISPLACEMENT_COUPLING: f64 = 0.1;
const DISPLACEMENT_NOISE_STDEV_MM: f64 = 1.0;
const PORE_PRESSURE_MEAN_KPA: f64 = 150.0;
const PORE_PRESSURE_STDEV_KPA: f64 = 30.0;
const STRAIN_MEAN_MICRO: f64 = 100.0;
const STRAIN_STDEV_MICRO: f64 = 25.0;
const VIBRATION_MEAN_MS2: f64 = 2.0;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate one reading per sensor per day, deterministically for a fixed
/// `(cfg, sensor_count, day_count, seed, now)`.
///
/// Timestamps run backward from `now`, one day per reading, day 0 first.
/// Values are rounded to the export precision at generation time, so a
/// generated table survives a CSV round trip byte for byte.
pub fn generate_at(
    cfg: &SiteConfig,
    sensor_count: usize,
    day_count: usize,
    seed: u64,
    now: NaiveDateTime,
) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut readings = Vec::with_capacity(sensor_count * day_count);

    for sensor in 1..=sensor_count {
        let sensor_id = format!("S{:03}", sensor);
        for day in 0..day_count {
            let timestamp = now - Duration::days(day as i64);

            let base_displacement = normal(&mut rng, DISPLACEMENT_MEAN_MM, DISPLACEMENT_STDEV_MM);
            let base_rainfall =
                f64::max(0.0, normal(&mut rng, RAINFALL_MEAN_MM, RAINFALL_STDEV_MM));
            let noise = normal(&mut rng, 0.0, DISPLACEMENT_NOISE_STDEV_MM);
            let displacement = f64::max(
                0.0,
                base_displacement + base_rainfall * RAINFALL_DISPLACEMENT_COUPLING + noise,
            );

            let pore_pressure = normal(&mut rng, PORE_PRESSURE_MEAN_KPA, PORE_PRESSURE_STDEV_KPA);
            let strain = normal(&mut rng, STRAIN_MEAN_MICRO, STRAIN_STDEV_MICRO);
            let vibration: f64 = VIBRATION_MEAN_MS2 * rng.sample::<f64, _>(Exp1);

            let latitude =
                normal(&mut rng, cfg.generator_center_lat, cfg.coordinate_jitter_deg);
            let longitude =
                normal(&mut rng, cfg.generator_center_lon, cfg.coordinate_jitter_deg);

            readings.push(Reading {
                sensor_id: sensor_id.clone(),
                timestamp,
                displacement_mm: round_to(displacement, 2),
                pore_pressure_kpa: round_to(pore_pressure, 2),
                strain_micro: round_to(strain, 2),
                vibration_ms2: round_to(vibration, 3),
                rainfall_mm: round_to(base_rainfall, 1),
                latitude: round_to(latitude, 6),
                longitude: round_to(longitude, 6),
            });
        }
    }

    readings
}

/// Production wrapper: current wall-clock time, site defaults for the
/// remaining parameters.
pub fn generate(cfg: &SiteConfig) -> Vec<Reading> {
    generate_at(
        cfg,
        cfg.sensor_count,
        cfg.day_count,
        cfg.seed,
        Utc::now().naive_utc(),
    )
}

/// Draw from N(mean, stdev) via the standard normal.
fn normal(rng: &mut StdRng, mean: f64, stdev: f64) -> f64 {
    mean + stdev * rng.sample::<f64, _>(StandardNormal)
}

/// Round to a fixed number of decimal places for export stability.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
