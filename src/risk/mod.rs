/// Risk classification for the monitoring service.
///
/// Submodules:
/// - `thresholds` — the per-reading threshold rule mapping a reading to a
///   risk level.

pub mod thresholds;

pub use thresholds::classify;
