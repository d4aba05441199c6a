//! Main-country classification of a product.
//!
//! Compares, for every country a product claims to be sold in, the share of
//! the product's unique scans coming from that country with the share the
//! whole catalog gets from it in the same year. A product scanned far less
//! than expected in a country is probably not really sold there.
//!
//! Tags written to `Product::diagnostic_tags` (all `main-countries-*`):
//! - `<cc>-unexpectedly-low-scans`: product ratio <= 30% of the catalog ratio,
//!   with one severity band tag (`0-10`, `10-20`, `20-30-percent-of-expected`)
//!   and a language gap tag when the product has little text in the
//!   country's languages
//! - `<cc>-product-name-not-in-country-language`, `<cc>-no-data-in-country-language`,
//!   `<cc>-only-1-field-in-country-language`: language presence, always checked
//! - `old-product-without-scans-in-2020`: scans exist, none in the floor year
//! - `no-scans` / `new-product`: no scan data at all, split on creation date

use countries_stats::thresholds::{MAIN_COUNTRIES_NAMESPACE, RATIO_TOLERANCE, WORLD};
use countries_stats::{CountryReference, ScanStatsTable};

use crate::config::ClassifierConfig;
use crate::product::{LocalizedField, Product};
use crate::types::{Classification, CountryAssessment, DiagnosticTag, LanguageGap, ScanBand};

/// Scan tables narrowed to the year selected for a product.
struct YearScans<'a> {
    year: i32,
    catalog: &'a ScanStatsTable,
    product: &'a ScanStatsTable,
}

/// Recompute the `main-countries` diagnostic tags of a product.
///
/// Previously emitted tags are removed first, so running twice on the same
/// inputs gives the same tags. Tags outside the namespace are left alone.
/// `product_scans` is `None` when no scan data exists for the product.
///
/// `config` must pass `ClassifierConfig::validate`; band tags assume ordered
/// limits. Debug builds assert it.
pub fn classify_product<R: CountryReference + ?Sized>(
    product: &mut Product,
    catalog: &ScanStatsTable,
    product_scans: Option<&ScanStatsTable>,
    countries: &R,
    config: &ClassifierConfig,
) -> Classification {
    debug_assert!(config.validate().is_ok(), "invalid classifier config: {:?}", config);

    strip_owned_tags(&mut product.diagnostic_tags);
    product.main_countries_tags.clear();
    product.removed_countries_tags.clear();
    product.added_countries_tags.clear();

    let mut classification = Classification::default();

    match product_scans {
        Some(scans) => {
            classification.year = scans.latest_year_at_most(config.reference_year_latest);

            if let Some(year) = classification.year {
                let year_scans = YearScans {
                    year,
                    catalog,
                    product: scans,
                };
                for country_tag in &product.countries_tags {
                    if let Some(assessment) = assess_country(
                        product,
                        country_tag,
                        &year_scans,
                        countries,
                        config,
                        &mut classification.tags,
                    ) {
                        classification.assessments.push(assessment);
                    }
                }
            } else {
                log::debug!(
                    "product {}: no scans up to {}, country checks skipped",
                    product.code,
                    config.reference_year_latest
                );
            }

            if !scans.has_year(config.reference_year_floor) {
                classification.tags.push(DiagnosticTag::OldProductWithoutScans {
                    year: config.reference_year_floor,
                });
            }
        }
        None => {
            let tag = if product.created_t < config.recency_cutoff_epoch {
                DiagnosticTag::NoScans
            } else {
                DiagnosticTag::NewProduct
            };
            classification.tags.push(tag);
        }
    }

    product
        .diagnostic_tags
        .extend(classification.tags.iter().map(ToString::to_string));

    log::debug!(
        "product {}: {} main-countries tag(s) for {} assessed country(ies)",
        product.code,
        classification.tags.len(),
        classification.assessments.len()
    );

    classification
}

/// Remove every tag owned by the classifier, keeping the others in order.
pub fn strip_owned_tags(tags: &mut Vec<String>) {
    tags.retain(|tag| !tag.contains(MAIN_COUNTRIES_NAMESPACE));
}

// ---------------------------------------------------------------------------
// Per-country evaluation
// ---------------------------------------------------------------------------

/// Evaluate one asserted country, pushing its tags. Returns `None` for tags
/// that do not resolve to a real country.
fn assess_country<R: CountryReference + ?Sized>(
    product: &Product,
    country_tag: &str,
    scans: &YearScans<'_>,
    countries: &R,
    config: &ClassifierConfig,
    tags: &mut Vec<DiagnosticTag>,
) -> Option<CountryAssessment> {
    let cc = match countries.country_code(country_tag) {
        Some(cc) => cc,
        None => {
            log::debug!(
                "product {}: country tag '{}' does not resolve, skipped",
                product.code,
                country_tag
            );
            return None;
        }
    };
    if cc == WORLD {
        return None;
    }

    let average_ratio = scans.catalog.country_share(scans.year, cc);
    let product_ratio = scans.product.country_share(scans.year, cc);
    let (language_coverage, product_name_in_language) =
        language_coverage(product, countries.languages(cc));
    let gap = LanguageGap::from_coverage(language_coverage);

    // --- Unexpectedly low scans ---
    // Only trusted when the catalog saw enough scans worldwide that year.
    let mut low_scan_band = None;
    let enough_catalog_scans = scans
        .catalog
        .world_count(scans.year)
        .map_or(false, |world| world >= config.min_world_scans);

    if enough_catalog_scans {
        match (product_ratio, average_ratio) {
            (Some(product_ratio), Some(average_ratio)) => {
                low_scan_band = low_scan_band_for(product_ratio, average_ratio, config);
            }
            _ => log::debug!(
                "product {}: no world scans for {} in {}, ratio checks skipped",
                product.code,
                cc,
                scans.year
            ),
        }
    }

    if let Some(band) = low_scan_band {
        tags.push(DiagnosticTag::UnexpectedlyLowScans { cc: cc.to_string() });
        tags.push(DiagnosticTag::LowScansBand {
            cc: cc.to_string(),
            band,
        });
        if let Some(gap) = gap {
            tags.push(DiagnosticTag::LowScansWithLanguageGap {
                cc: cc.to_string(),
                gap,
            });
        }
    }

    // --- Language presence ---
    if !product_name_in_language {
        tags.push(DiagnosticTag::ProductNameNotInCountryLanguage { cc: cc.to_string() });
    }
    if let Some(gap) = gap {
        tags.push(DiagnosticTag::LanguageGap {
            cc: cc.to_string(),
            gap,
        });
    }

    Some(CountryAssessment {
        country_tag: country_tag.to_string(),
        cc: cc.to_string(),
        average_ratio,
        product_ratio,
        language_coverage,
        product_name_in_language,
        low_scan_band,
    })
}

/// Severity band of an under-scanned country, tightest band first.
/// `None` when the product ratio is above the low-scan threshold.
fn low_scan_band_for(
    product_ratio: f64,
    average_ratio: f64,
    config: &ClassifierConfig,
) -> Option<ScanBand> {
    let within =
        |fraction: f64| product_ratio <= average_ratio * fraction * (1.0 + RATIO_TOLERANCE);

    if !within(config.low_scan_ratio) {
        return None;
    }
    let band = if within(config.band_10_percent) {
        ScanBand::UpTo10Percent
    } else if within(config.band_20_percent) {
        ScanBand::From10To20Percent
    } else {
        ScanBand::From20To30Percent
    };
    Some(band)
}

/// Count populated (field, language) pairs and whether the product name
/// exists in any of the languages.
fn language_coverage(product: &Product, languages: &[String]) -> (usize, bool) {
    let mut coverage = 0;
    let mut name_in_language = false;

    for lang in languages {
        for field in LocalizedField::ALL {
            if product.localized_text(field, lang).is_some() {
                coverage += 1;
                if field == LocalizedField::ProductName {
                    name_in_language = true;
                }
            }
        }
    }

    (coverage, name_in_language)
}
