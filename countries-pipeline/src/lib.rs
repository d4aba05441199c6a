pub mod classifier;
pub mod config;
pub mod error;
pub mod product;
pub mod reprocess;
pub mod types;

pub use classifier::{classify_product, strip_owned_tags};
pub use config::ClassifierConfig;
pub use error::{PipelineError, PipelineResult};
pub use product::{LocalizedField, Product};
pub use reprocess::{reprocess_products, ProductOutcome, ReferenceData, ReprocessSummary};
pub use types::{Classification, CountryAssessment, DiagnosticTag, LanguageGap, ScanBand};
