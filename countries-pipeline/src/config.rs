//! Classifier configuration.
//!
//! Defaults come from `countries_stats::thresholds`. A JSON override only
//! needs the keys it changes.

use serde::{Deserialize, Serialize};

use countries_stats::thresholds::{
    BAND_10_PERCENT, BAND_20_PERCENT, BAND_30_PERCENT, LOW_SCAN_RATIO, MIN_WORLD_SCANS,
    RECENCY_CUTOFF_EPOCH, REFERENCE_YEAR_FLOOR, REFERENCE_YEAR_LATEST,
};

use crate::error::{PipelineError, PipelineResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Latest scan year considered.
    pub reference_year_latest: i32,
    /// Products with scans but none in this year are reported as old.
    pub reference_year_floor: i32,
    /// Products without scans created before this epoch are `no-scans`.
    pub recency_cutoff_epoch: i64,
    /// Catalog world scans needed in the selected year for ratio checks.
    pub min_world_scans: u64,
    pub low_scan_ratio: f64,
    pub band_10_percent: f64,
    pub band_20_percent: f64,
    pub band_30_percent: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            reference_year_latest: REFERENCE_YEAR_LATEST,
            reference_year_floor: REFERENCE_YEAR_FLOOR,
            recency_cutoff_epoch: RECENCY_CUTOFF_EPOCH,
            min_world_scans: MIN_WORLD_SCANS,
            low_scan_ratio: LOW_SCAN_RATIO,
            band_10_percent: BAND_10_PERCENT,
            band_20_percent: BAND_20_PERCENT,
            band_30_percent: BAND_30_PERCENT,
        }
    }
}

impl ClassifierConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Bands must be ordered and the low-scan ratio must cover the widest band.
    pub fn validate(&self) -> PipelineResult<()> {
        let bands = [self.band_10_percent, self.band_20_percent, self.band_30_percent];
        if bands.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(PipelineError::InvalidConfig(
                "band limits must be finite and non-negative".into(),
            ));
        }
        if !(bands[0] <= bands[1] && bands[1] <= bands[2]) {
            return Err(PipelineError::InvalidConfig(format!(
                "band limits must be ascending, got {:?}",
                bands
            )));
        }
        if !self.low_scan_ratio.is_finite() || self.low_scan_ratio > self.band_30_percent {
            return Err(PipelineError::InvalidConfig(format!(
                "low_scan_ratio {} exceeds the widest band {}",
                self.low_scan_ratio, self.band_30_percent
            )));
        }
        if self.reference_year_floor > self.reference_year_latest {
            return Err(PipelineError::InvalidConfig(format!(
                "reference_year_floor {} is after reference_year_latest {}",
                self.reference_year_floor, self.reference_year_latest
            )));
        }
        Ok(())
    }
}
