//! Loaders for scan statistics and country reference documents.
//!
//! Scans JSON (per product or catalog-wide), one entry per year:
//!   {"2021": {"scans_n": 14, "unique_scans_n": 12,
//!             "unique_scans_n_by_country": {"world": 12, "fr": 9}}}
//!
//! Scans CSV (flat catalog export), header required:
//!   year, country, unique_scans
//!
//! Country table JSON:
//!   {"en:belgium": {"country_code": "be", "languages": ["fr", "nl", "de"]}}

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::{StatsError, StatsResult};
use crate::reference::CountryTable;
use crate::table::ScanStatsTable;
use crate::thresholds::WORLD;

/// One year of a scans JSON document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearScans {
    #[serde(default)]
    pub scans_n: Option<u64>,
    #[serde(default)]
    pub unique_scans_n: Option<u64>,
    #[serde(default)]
    pub unique_scans_n_by_country: BTreeMap<String, u64>,
}

/// A row of the flat CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRecord {
    pub year: i32,
    pub country: String,
    pub unique_scans: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct CountryEntry {
    country_code: String,
    #[serde(default)]
    languages: Vec<String>,
}

/// Load a scans JSON document.
///
/// A year listed without per-country counts is still recorded as present.
/// When the per-country map has no `world` entry, `unique_scans_n` stands in
/// for it.
pub fn load_scans_json<R: Read>(reader: R) -> StatsResult<ScanStatsTable> {
    let document: BTreeMap<String, YearScans> = serde_json::from_reader(reader)?;

    let mut table = ScanStatsTable::new();
    for (key, scans) in document {
        let year: i32 = key
            .trim()
            .parse()
            .map_err(|_| StatsError::InvalidYear(key.clone()))?;

        table.ensure_year(year);
        for (cc, count) in &scans.unique_scans_n_by_country {
            table.insert(year, cc, *count);
        }
        let has_world = scans
            .unique_scans_n_by_country
            .keys()
            .any(|cc| cc.eq_ignore_ascii_case(WORLD));
        if !has_world {
            if let Some(world) = scans.unique_scans_n {
                table.insert(year, WORLD, world);
            }
        }
    }

    log::debug!("loaded scans for {} year(s)", table.years().count());
    Ok(table)
}

pub fn load_scans_json_file(path: &str) -> StatsResult<ScanStatsTable> {
    load_scans_json(open(path)?)
}

/// Load a flat `year,country,unique_scans` CSV export.
pub fn load_scans_csv<R: Read>(reader: R) -> StatsResult<ScanStatsTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = ScanStatsTable::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: ScanRecord = result.map_err(|source| StatsError::Csv {
            line: line_num + 2,
            source,
        })?;
        table.insert(record.year, &record.country, record.unique_scans);
    }

    Ok(table)
}

pub fn load_scans_csv_file(path: &str) -> StatsResult<ScanStatsTable> {
    load_scans_csv(open(path)?)
}

/// Load a country reference table.
pub fn load_country_table_json<R: Read>(reader: R) -> StatsResult<CountryTable> {
    let entries: BTreeMap<String, CountryEntry> = serde_json::from_reader(reader)?;

    let mut table = CountryTable::new();
    for (tag, entry) in entries {
        table.insert(&tag, &entry.country_code, &entry.languages);
    }
    Ok(table)
}

pub fn load_country_table_json_file(path: &str) -> StatsResult<CountryTable> {
    load_country_table_json(open(path)?)
}

fn open(path: &str) -> StatsResult<std::fs::File> {
    std::fs::File::open(path).map_err(|source| StatsError::Open {
        path: path.to_string(),
        source,
    })
}
