//! Centralized detection thresholds for main-country classification.
//!
//! Changing a value here changes the defaults of `ClassifierConfig` in
//! `countries-pipeline`, and therefore every tag the classifier emits.

/// Pseudo country code holding the worldwide unique scan count of a year.
pub const WORLD: &str = "world";

/// Marker shared by every diagnostic tag the classifier owns.
/// Any tag containing it is removed before the classifier runs.
pub const MAIN_COUNTRIES_NAMESPACE: &str = "main-countries";

/// Latest year considered when picking the scan year of a product.
pub const REFERENCE_YEAR_LATEST: i32 = 2030;

/// Year a product is expected to have scans for once it is old enough.
pub const REFERENCE_YEAR_FLOOR: i32 = 2020;

/// Products created before this instant (2021-01-01, Central European Time)
/// without any scan data are reported as `no-scans` instead of `new-product`.
pub const RECENCY_CUTOFF_EPOCH: i64 = 1_609_462_800;

/// Catalog-wide world scans required in a year before scan ratios are trusted.
pub const MIN_WORLD_SCANS: u64 = 10;

/// A country is under-scanned when its product ratio is at most this
/// fraction of the catalog average ratio.
pub const LOW_SCAN_RATIO: f64 = 0.3;

/// Upper bound of the `0-10-percent-of-expected` severity band.
pub const BAND_10_PERCENT: f64 = 0.1;

/// Upper bound of the `10-20-percent-of-expected` severity band.
pub const BAND_20_PERCENT: f64 = 0.2;

/// Upper bound of the `20-30-percent-of-expected` severity band.
pub const BAND_30_PERCENT: f64 = 0.3;

/// Relative slack applied to every ratio limit, so a ratio exactly on a band
/// edge stays in the tighter band despite floating-point rounding.
pub const RATIO_TOLERANCE: f64 = 1e-9;
