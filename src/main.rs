/// Command-line pipeline runner.
///
/// Loads the site configuration, obtains a reading table (uploaded CSV via
/// `--csv`, otherwise the synthetic site model), runs the risk analysis,
/// and writes the flat-file outputs: `risk_zones.csv`, `risk_markers.json`
/// and `risk_report.html`.
///
/// Usage:
///   georisk_service [--csv <path>] [--config <path>] [--out <dir>]
///
/// An unreadable or malformed CSV is reported and the run falls back to
/// synthetic data, matching the dashboard's behavior when an upload fails.

use georisk_service::logging::{self, LogLevel, Source};
use georisk_service::model::Reading;
use georisk_service::sites::SiteConfig;
use georisk_service::{analysis, assistant, export, generate, ingest};

use chrono::Utc;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let csv_path = flag_value(&args, "--csv");
    let config_path = flag_value(&args, "--config").unwrap_or("georisk_site.toml");
    let out_dir = flag_value(&args, "--out").unwrap_or(".");

    logging::init_logger(LogLevel::Info, None);

    let cfg = match SiteConfig::load(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::error(Source::System, None, &format!("Bad config {}: {}", config_path, e));
            std::process::exit(1);
        }
    };

    let readings = load_readings(&cfg, csv_path);
    logging::info(
        Source::Engine,
        None,
        &format!("Analyzing {} readings", readings.len()),
    );

    let result = analysis::analyze(readings, &cfg.thresholds);
    logging::info(
        Source::Engine,
        None,
        &format!(
            "Risk totals: {} high, {} medium, {} low across {} sensors",
            result.total_high,
            result.total_medium,
            result.total_low,
            result.sensor_summaries.len()
        ),
    );
    for summary in &result.sensor_summaries {
        logging::debug(
            Source::Engine,
            Some(&summary.sensor_id),
            &format!("dominant risk: {}", summary.dominant_risk_level),
        );
    }

    let markers = match export::sensor_markers_json(&result) {
        Ok(json) => json,
        Err(e) => {
            logging::error(Source::Export, None, &format!("Marker feed failed: {}", e));
            std::process::exit(1);
        }
    };

    let now = Utc::now().naive_utc();
    let outputs = [
        ("risk_zones.csv", export::annotated_to_csv(&result)),
        ("risk_markers.json", markers),
        ("risk_report.html", export::html_report(&result, now)),
    ];
    for (name, content) in &outputs {
        let path = Path::new(out_dir).join(name);
        if let Err(e) = std::fs::write(&path, content) {
            logging::error(
                Source::Export,
                None,
                &format!("Failed to write {}: {}", path.display(), e),
            );
            std::process::exit(1);
        }
        logging::info(Source::Export, None, &format!("Wrote {}", path.display()));
    }

    // One canned methodology answer in the run log, totals included, so an
    // unattended run leaves a self-describing record.
    logging::debug(
        Source::System,
        None,
        &assistant::respond("how is risk calculated?", Some(&result)),
    );
}

/// Obtain the reading table: ingested CSV when requested and valid,
/// synthetic site model otherwise.
fn load_readings(cfg: &SiteConfig, csv_path: Option<&str>) -> Vec<Reading> {
    if let Some(path) = csv_path {
        match std::fs::read_to_string(path) {
            Ok(text) => match ingest::parse_csv(&text, cfg) {
                Ok(readings) => {
                    logging::info(
                        Source::Ingest,
                        None,
                        &format!("Ingested {} readings from {}", readings.len(), path),
                    );
                    return readings;
                }
                Err(e) => {
                    logging::warn(
                        Source::Ingest,
                        None,
                        &format!("Rejected {}: {} — falling back to synthetic data", path, e),
                    );
                }
            },
            Err(e) => {
                logging::warn(
                    Source::Ingest,
                    None,
                    &format!("Cannot read {}: {} — falling back to synthetic data", path, e),
                );
            }
        }
    }

    let readings = generate::generate(cfg);
    logging::info(
        Source::Generator,
        None,
        &format!(
            "Generated {} readings ({} sensors x {} days, seed {})",
            readings.len(),
            cfg.sensor_count,
            cfg.day_count,
            cfg.seed
        ),
    );
    readings
}

/// Value following a flag, e.g. `--csv data.csv`.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
