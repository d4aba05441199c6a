//! Lookup contract tests for countries-stats.
//!
//! Validates that:
//! 1. Loaded tables answer lookups with "not recorded" rather than errors
//! 2. Year selection picks the latest recorded year under a ceiling
//! 3. Tables and country references can be shared read-only across threads

use countries_stats::thresholds::{REFERENCE_YEAR_LATEST, WORLD};
use countries_stats::{
    load_country_table_json, load_scans_csv, load_scans_json, CountryReference, ScanStatsTable,
};

const CATALOG_CSV: &str = "\
year,country,unique_scans
2020,world,9
2020,fr,4
2025,world,1000
2025,fr,500
2025,be,40
";

const PRODUCT_JSON: &str = r#"{
    "2020": {"unique_scans_n_by_country": {"world": 2, "fr": 2}},
    "2025": {"unique_scans_n_by_country": {"world": 20, "fr": 0}}
}"#;

const COUNTRIES_JSON: &str = r#"{
    "en:france": {"country_code": "fr", "languages": ["fr"]},
    "en:belgium": {"country_code": "be", "languages": ["fr", "nl", "de"]}
}"#;

#[test]
fn unknown_entries_are_not_recorded() {
    let catalog = load_scans_csv(CATALOG_CSV.as_bytes()).unwrap();
    assert_eq!(catalog.get_unique_scan_count(2025, "de"), None);
    assert_eq!(catalog.get_unique_scan_count(1999, WORLD), None);
    assert_eq!(catalog.country_share(1999, "fr"), None);
}

#[test]
fn product_year_selection() {
    let product = load_scans_json(PRODUCT_JSON.as_bytes()).unwrap();
    assert_eq!(product.latest_year_at_most(REFERENCE_YEAR_LATEST), Some(2025));
    assert_eq!(product.latest_year_at_most(2024), Some(2020));
    assert_eq!(product.country_share(2025, "fr"), Some(0.0));
}

#[test]
fn shared_read_only_across_threads() {
    let catalog = load_scans_csv(CATALOG_CSV.as_bytes()).unwrap();
    let countries = load_country_table_json(COUNTRIES_JSON.as_bytes()).unwrap();

    let shares: Vec<Option<f64>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["en:france", "en:belgium", "en:atlantis"]
            .into_iter()
            .map(|tag| {
                let catalog: &ScanStatsTable = &catalog;
                let countries = &countries;
                scope.spawn(move || {
                    countries
                        .country_code(tag)
                        .and_then(|cc| catalog.country_share(2025, cc))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!((shares[0].unwrap() - 0.5).abs() < 1e-9);
    assert!((shares[1].unwrap() - 0.04).abs() < 1e-9);
    assert_eq!(shares[2], None);
}
