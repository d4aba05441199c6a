use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Tag building blocks
// ---------------------------------------------------------------------------

/// How far below the catalog average an under-scanned country falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ScanBand {
    UpTo10Percent,
    From10To20Percent,
    From20To30Percent,
}

impl ScanBand {
    fn tag_fragment(self) -> &'static str {
        match self {
            ScanBand::UpTo10Percent => "0-10-percent-of-expected",
            ScanBand::From10To20Percent => "10-20-percent-of-expected",
            ScanBand::From20To30Percent => "20-30-percent-of-expected",
        }
    }
}

/// Missing localized data in the languages of a country.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LanguageGap {
    /// No text field populated in any of the country's languages.
    NoData,
    /// Exactly one (field, language) pair populated.
    OnlyOneField,
}

impl LanguageGap {
    /// The gap implied by a language coverage count, if any.
    pub fn from_coverage(coverage: usize) -> Option<Self> {
        match coverage {
            0 => Some(LanguageGap::NoData),
            1 => Some(LanguageGap::OnlyOneField),
            _ => None,
        }
    }

    fn tag_fragment(self) -> &'static str {
        match self {
            LanguageGap::NoData => "no-data-in-country-language",
            LanguageGap::OnlyOneField => "only-1-field-in-country-language",
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic tags
// ---------------------------------------------------------------------------

/// A diagnostic tag in the `main-countries` namespace.
///
/// `Display` renders the exact string written to the product.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiagnosticTag {
    UnexpectedlyLowScans { cc: String },
    LowScansBand { cc: String, band: ScanBand },
    LowScansWithLanguageGap { cc: String, gap: LanguageGap },
    ProductNameNotInCountryLanguage { cc: String },
    LanguageGap { cc: String, gap: LanguageGap },
    OldProductWithoutScans { year: i32 },
    NoScans,
    NewProduct,
}

impl DiagnosticTag {
    /// Country-independent key, used to count tags across products.
    pub fn kind(&self) -> &'static str {
        match self {
            DiagnosticTag::UnexpectedlyLowScans { .. } => "unexpectedly-low-scans",
            DiagnosticTag::LowScansBand { band, .. } => match band {
                ScanBand::UpTo10Percent => "unexpectedly-low-scans-0-10-percent-of-expected",
                ScanBand::From10To20Percent => "unexpectedly-low-scans-10-20-percent-of-expected",
                ScanBand::From20To30Percent => "unexpectedly-low-scans-20-30-percent-of-expected",
            },
            DiagnosticTag::LowScansWithLanguageGap { gap, .. } => match gap {
                LanguageGap::NoData => "unexpectedly-low-scans-and-no-data-in-country-language",
                LanguageGap::OnlyOneField => {
                    "unexpectedly-low-scans-and-only-1-field-in-country-language"
                }
            },
            DiagnosticTag::ProductNameNotInCountryLanguage { .. } => {
                "product-name-not-in-country-language"
            }
            DiagnosticTag::LanguageGap { gap, .. } => gap.tag_fragment(),
            DiagnosticTag::OldProductWithoutScans { .. } => "old-product-without-scans",
            DiagnosticTag::NoScans => "no-scans",
            DiagnosticTag::NewProduct => "new-product",
        }
    }

    /// The country this tag is about, if it is country-specific.
    pub fn country(&self) -> Option<&str> {
        match self {
            DiagnosticTag::UnexpectedlyLowScans { cc }
            | DiagnosticTag::LowScansBand { cc, .. }
            | DiagnosticTag::LowScansWithLanguageGap { cc, .. }
            | DiagnosticTag::ProductNameNotInCountryLanguage { cc }
            | DiagnosticTag::LanguageGap { cc, .. } => Some(cc.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticTag::UnexpectedlyLowScans { cc } => {
                write!(f, "main-countries-{}-unexpectedly-low-scans", cc)
            }
            DiagnosticTag::LowScansBand { cc, band } => write!(
                f,
                "main-countries-{}-unexpectedly-low-scans-{}",
                cc,
                band.tag_fragment()
            ),
            DiagnosticTag::LowScansWithLanguageGap { cc, gap } => write!(
                f,
                "main-countries-{}-unexpectedly-low-scans-and-{}",
                cc,
                gap.tag_fragment()
            ),
            DiagnosticTag::ProductNameNotInCountryLanguage { cc } => {
                write!(f, "main-countries-{}-product-name-not-in-country-language", cc)
            }
            DiagnosticTag::LanguageGap { cc, gap } => {
                write!(f, "main-countries-{}-{}", cc, gap.tag_fragment())
            }
            DiagnosticTag::OldProductWithoutScans { year } => {
                write!(f, "main-countries-old-product-without-scans-in-{}", year)
            }
            DiagnosticTag::NoScans => write!(f, "main-countries-no-scans"),
            DiagnosticTag::NewProduct => write!(f, "main-countries-new-product"),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification output
// ---------------------------------------------------------------------------

/// What the classifier found for one asserted country.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountryAssessment {
    /// The asserted tag as written on the product.
    pub country_tag: String,
    pub cc: String,
    /// Catalog-wide country/world scan ratio, `None` if not computable.
    pub average_ratio: Option<f64>,
    /// Product country/world scan ratio, `None` if not computable.
    pub product_ratio: Option<f64>,
    /// Populated (field, language) pairs over the country's languages.
    pub language_coverage: usize,
    pub product_name_in_language: bool,
    /// Set when the country was found under-scanned.
    pub low_scan_band: Option<ScanBand>,
}

impl CountryAssessment {
    /// Product ratio relative to the catalog average (1.0 = as expected).
    pub fn relative_popularity(&self) -> Option<f64> {
        match (self.product_ratio, self.average_ratio) {
            (Some(product), Some(average)) if average > 0.0 => Some(product / average),
            _ => None,
        }
    }
}

/// Result of one classifier run on one product.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Classification {
    /// Scan year used for the per-country evaluation.
    pub year: Option<i32>,
    pub assessments: Vec<CountryAssessment>,
    /// Tags in emission order. The same condition may be reported twice.
    pub tags: Vec<DiagnosticTag>,
}

impl Classification {
    /// Rendered tag strings, in emission order.
    pub fn tag_strings(&self) -> Vec<String> {
        self.tags.iter().map(ToString::to_string).collect()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.to_string() == tag)
    }
}
