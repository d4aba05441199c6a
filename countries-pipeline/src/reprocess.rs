//! Batch reprocessing of many products against one catalog table.
//!
//! The catalog table and the country reference are loaded once by the caller
//! and shared read-only by every worker. Each product record is classified
//! independently, so the batch runs on the Rayon thread pool.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;

use countries_stats::{
    load_country_table_json, load_country_table_json_file, load_scans_json,
    load_scans_json_file, CountryReference, CountryTable, ScanStatsTable,
};

use crate::classifier::classify_product;
use crate::config::ClassifierConfig;
use crate::error::PipelineResult;
use crate::product::Product;

/// Catalog scan table and country reference loaded once per run.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub catalog: ScanStatsTable,
    pub countries: CountryTable,
}

impl ReferenceData {
    pub fn from_readers<C: Read, T: Read>(catalog: C, countries: T) -> PipelineResult<Self> {
        let catalog = load_scans_json(catalog)?;
        let countries = load_country_table_json(countries)?;
        Ok(Self::logged(catalog, countries))
    }

    pub fn from_files(catalog_path: &str, countries_path: &str) -> PipelineResult<Self> {
        let catalog = load_scans_json_file(catalog_path)?;
        let countries = load_country_table_json_file(countries_path)?;
        Ok(Self::logged(catalog, countries))
    }

    fn logged(catalog: ScanStatsTable, countries: CountryTable) -> Self {
        log::info!(
            "reference data: {} catalog year(s), {} country tag(s)",
            catalog.years().count(),
            countries.len()
        );
        Self { catalog, countries }
    }

    /// `reprocess_products` against this catalog and country table.
    pub fn reprocess(
        &self,
        products: &mut [Product],
        product_scans: &HashMap<String, ScanStatsTable>,
        config: &ClassifierConfig,
    ) -> ReprocessSummary {
        reprocess_products(products, &self.catalog, product_scans, &self.countries, config)
    }
}

/// Tags emitted for one product of the batch.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductOutcome {
    pub code: String,
    /// Scan year used for the country checks, if any.
    pub year: Option<i32>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReprocessSummary {
    pub generated_at: String,
    pub products_processed: usize,
    /// Products that received at least one main-countries tag.
    pub products_tagged: usize,
    /// Emitted tags per country-independent kind.
    pub tag_counts: BTreeMap<String, usize>,
    /// One entry per product, in input order.
    pub outcomes: Vec<ProductOutcome>,
}

/// Classify every product in place.
///
/// `product_scans` maps a product code to its scan table; products missing
/// from it are treated as having no scan data.
pub fn reprocess_products<R: CountryReference + ?Sized>(
    products: &mut [Product],
    catalog: &ScanStatsTable,
    product_scans: &HashMap<String, ScanStatsTable>,
    countries: &R,
    config: &ClassifierConfig,
) -> ReprocessSummary {
    let results: Vec<(ProductOutcome, Vec<&'static str>)> = products
        .par_iter_mut()
        .map(|product| {
            let scans = product_scans.get(&product.code);
            let classification = classify_product(product, catalog, scans, countries, config);
            let kinds: Vec<&'static str> =
                classification.tags.iter().map(|t| t.kind()).collect();
            let outcome = ProductOutcome {
                code: product.code.clone(),
                year: classification.year,
                tags: classification.tag_strings(),
            };
            (outcome, kinds)
        })
        .collect();

    let mut tag_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut outcomes = Vec::with_capacity(results.len());
    for (outcome, kinds) in results {
        for kind in kinds {
            *tag_counts.entry(kind.to_string()).or_insert(0) += 1;
        }
        outcomes.push(outcome);
    }

    let products_tagged = outcomes.iter().filter(|o| !o.tags.is_empty()).count();

    log::info!(
        "reprocessed {} product(s), {} with main-countries tags",
        outcomes.len(),
        products_tagged
    );

    ReprocessSummary {
        generated_at: Utc::now().to_rfc3339(),
        products_processed: outcomes.len(),
        products_tagged,
        tag_counts,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::product::LocalizedField;
    use countries_stats::CountryTable;

    fn countries() -> CountryTable {
        CountryTable::new()
            .with_country("en:france", "fr", &["fr"])
            .with_country("en:spain", "es", &["es"])
    }

    fn catalog() -> ScanStatsTable {
        ScanStatsTable::new()
            .with(2020, "world", 500)
            .with(2024, "world", 1000)
            .with(2024, "fr", 400)
            .with(2024, "es", 300)
    }

    fn products() -> Vec<Product> {
        vec![
            Product::new("001")
                .with_countries(&["en:france"])
                .with_localized(LocalizedField::ProductName, "fr", "Confiture")
                .with_localized(LocalizedField::IngredientsText, "fr", "fraises, sucre"),
            Product::new("002")
                .with_countries(&["en:spain"])
                .with_created_t(1_500_000_000),
            Product::new("003").with_created_t(1_700_000_000),
        ]
    }

    fn scans() -> HashMap<String, ScanStatsTable> {
        let mut map = HashMap::new();
        map.insert(
            "001".to_string(),
            ScanStatsTable::new()
                .with(2020, "world", 3)
                .with(2024, "world", 50)
                .with(2024, "fr", 40),
        );
        map
    }

    #[test]
    fn outcomes_follow_input_order() {
        let mut batch = products();
        let summary = reprocess_products(
            &mut batch,
            &catalog(),
            &scans(),
            &countries(),
            &ClassifierConfig::default(),
        );
        let codes: Vec<_> = summary.outcomes.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "002", "003"]);
        assert_eq!(summary.products_processed, 3);
    }

    #[test]
    fn products_without_scans_split_on_creation_date() {
        let mut batch = products();
        let summary = reprocess_products(
            &mut batch,
            &catalog(),
            &scans(),
            &countries(),
            &ClassifierConfig::default(),
        );
        assert!(summary.outcomes[0].tags.is_empty());
        assert_eq!(summary.outcomes[0].year, Some(2024));
        assert_eq!(summary.outcomes[1].tags, vec!["main-countries-no-scans"]);
        assert_eq!(summary.outcomes[2].tags, vec!["main-countries-new-product"]);
        assert_eq!(summary.products_tagged, 2);
        assert_eq!(summary.tag_counts.get("no-scans"), Some(&1));
        assert_eq!(summary.tag_counts.get("new-product"), Some(&1));
    }

    #[test]
    fn tags_are_written_to_the_records() {
        let mut batch = products();
        reprocess_products(
            &mut batch,
            &catalog(),
            &scans(),
            &countries(),
            &ClassifierConfig::default(),
        );
        assert_eq!(batch[1].diagnostic_tags, vec!["main-countries-no-scans"]);
    }

    #[test]
    fn reference_data_loads_and_reprocesses() {
        let catalog = r#"{"2024": {"unique_scans_n_by_country": {"world": 1000, "fr": 400}}}"#;
        let countries = r#"{"en:france": {"country_code": "fr", "languages": ["fr"]}}"#;
        let reference =
            ReferenceData::from_readers(catalog.as_bytes(), countries.as_bytes()).unwrap();
        assert_eq!(reference.catalog.world_count(2024), Some(1000));

        let mut batch = vec![Product::new("004")
            .with_countries(&["en:france"])
            .with_created_t(1_500_000_000)];
        let summary =
            reference.reprocess(&mut batch, &HashMap::new(), &ClassifierConfig::default());
        assert_eq!(summary.outcomes[0].tags, vec!["main-countries-no-scans"]);
    }

    #[test]
    fn reference_data_surfaces_stats_errors() {
        let catalog = r#"{"twenty": {"unique_scans_n_by_country": {"world": 1}}}"#;
        let err = ReferenceData::from_readers(catalog.as_bytes(), "{}".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Stats(countries_stats::StatsError::InvalidYear(_))
        ));

        let err = ReferenceData::from_files("/nonexistent/catalog.json", "/nonexistent/c.json")
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Stats(countries_stats::StatsError::Open { .. })
        ));
    }

    #[test]
    fn summary_serializes() {
        let mut batch = products();
        let summary = reprocess_products(
            &mut batch,
            &catalog(),
            &scans(),
            &countries(),
            &ClassifierConfig::default(),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["products_processed"], 3);
        assert!(json["generated_at"].as_str().unwrap().contains('T'));
    }
}
