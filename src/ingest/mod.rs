/// Ingestion of external sensor data.
///
/// The only external format this core accepts is a flat CSV table of
/// readings (the dashboard's upload path). Validation is eager and
/// fail-fast: a malformed table is rejected whole before any
/// classification runs.
///
/// Submodules:
/// - `csv` — header-mapped CSV parsing with schema validation.

pub mod csv;

pub use csv::parse_csv;
