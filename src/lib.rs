/// Geotechnical risk monitoring core.
///
/// Two components in sequence: a data provider (`generate` for the
/// synthetic site model, `ingest` for uploaded CSV tables) and a risk
/// engine (`risk` + `analysis`) that classifies every reading against the
/// site thresholds and rolls the results up per sensor and globally.
/// `export` and `assistant` serve the presentation layer's flat-file and
/// help-panel needs; all interactive rendering lives outside this crate.

pub mod analysis;
pub mod assistant;
pub mod export;
pub mod generate;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod risk;
pub mod sites;
