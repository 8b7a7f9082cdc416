/// Aggregation over classified reading tables.
///
/// This module turns a flat annotated table into the per-sensor and global
/// rollups the presentation layer consumes. Everything here is a pure
/// function over in-memory tables — no I/O, no shared state, each call
/// self-contained and reentrant.
///
/// Submodules:
/// - `summary` — table classification, per-sensor rollups, tier totals,
///   and the composing `analyze` entry point.

pub mod summary;

pub use summary::{analyze, classify_table, count_by_zone_and_level, summarize_by_sensor, totals};
