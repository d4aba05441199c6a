//! Unique scan counts keyed by year and country code.
//!
//! The same shape serves the catalog-wide aggregate and the statistics of a
//! single product. Tables are built once by a loader and then only read, so
//! one catalog table can be shared by every classification in a batch.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::thresholds::WORLD;

/// Year → country code (including `"world"`) → number of unique scanning sources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanStatsTable {
    years: BTreeMap<i32, BTreeMap<String, u64>>,
}

impl ScanStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the unique scan count of `cc` for `year`, replacing any previous value.
    pub fn insert(&mut self, year: i32, cc: &str, count: u64) {
        self.years
            .entry(year)
            .or_default()
            .insert(cc.to_lowercase(), count);
    }

    /// Builder form of [`insert`](Self::insert), handy for fixtures.
    pub fn with(mut self, year: i32, cc: &str, count: u64) -> Self {
        self.insert(year, cc, count);
        self
    }

    /// Mark a year as present even if no country has been recorded for it yet.
    pub fn ensure_year(&mut self, year: i32) {
        self.years.entry(year).or_default();
    }

    /// The recorded unique scan count, or `None` when the year or the
    /// country was never recorded. A recorded zero is `Some(0)`.
    pub fn get_unique_scan_count(&self, year: i32, cc: &str) -> Option<u64> {
        let counts = self.years.get(&year)?;
        match counts.get(cc) {
            Some(count) => Some(*count),
            None => counts.get(&cc.to_lowercase()).copied(),
        }
    }

    pub fn world_count(&self, year: i32) -> Option<u64> {
        self.get_unique_scan_count(year, WORLD)
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Recorded years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// The most recent recorded year that is not after `ceiling`.
    pub fn latest_year_at_most(&self, ceiling: i32) -> Option<i32> {
        self.years.range(..=ceiling).next_back().map(|(year, _)| *year)
    }

    /// Share of the year's worldwide scans that came from `cc`.
    ///
    /// A missing country counts as zero scans. Returns `None` when the world
    /// count is missing or zero, since no share can be computed then.
    pub fn country_share(&self, year: i32, cc: &str) -> Option<f64> {
        let world = self.world_count(year).filter(|w| *w > 0)?;
        let count = self.get_unique_scan_count(year, cc).unwrap_or(0);
        Some(count as f64 / world as f64)
    }
}
