//! Product records as stored by the product database.
//!
//! Only the fields the classifier reads or owns are typed. Everything else,
//! localized text included (`product_name_fr`, `ingredients_text_de`, ...),
//! is kept verbatim so a loaded record can be written back unchanged.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PipelineError, PipelineResult};

/// Logical text fields checked for presence in a country's languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LocalizedField {
    ProductName,
    GenericName,
    IngredientsText,
}

impl LocalizedField {
    pub const ALL: [LocalizedField; 3] = [
        LocalizedField::ProductName,
        LocalizedField::GenericName,
        LocalizedField::IngredientsText,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LocalizedField::ProductName => "product_name",
            LocalizedField::GenericName => "generic_name",
            LocalizedField::IngredientsText => "ingredients_text",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: String,
    #[serde(default)]
    pub countries_tags: Vec<String>,
    /// Creation time, seconds since the epoch.
    #[serde(default)]
    pub created_t: i64,
    /// Shared tag collection (`misc_tags` in the product database); the
    /// classifier owns the `main-countries` part.
    #[serde(default, rename = "misc_tags", alias = "diagnostic_tags")]
    pub diagnostic_tags: Vec<String>,
    #[serde(default)]
    pub main_countries_tags: Vec<String>,
    #[serde(default)]
    pub removed_countries_tags: Vec<String>,
    #[serde(default)]
    pub added_countries_tags: Vec<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Product {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            ..Self::default()
        }
    }

    pub fn with_countries(mut self, tags: &[&str]) -> Self {
        self.countries_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_created_t(mut self, created_t: i64) -> Self {
        self.created_t = created_t;
        self
    }

    pub fn with_localized(mut self, field: LocalizedField, lang: &str, value: &str) -> Self {
        self.set_localized(field, lang, value);
        self
    }

    /// The non-empty text of `field` in `lang`, if any.
    pub fn localized_text(&self, field: LocalizedField, lang: &str) -> Option<&str> {
        self.fields
            .get(&localized_key(field, lang))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn set_localized(&mut self, field: LocalizedField, lang: &str, value: &str) {
        self.fields
            .insert(localized_key(field, lang), Value::String(value.to_string()));
    }
}

fn localized_key(field: LocalizedField, lang: &str) -> String {
    format!("{}_{}", field.key(), lang)
}

/// Load a single product record.
pub fn load_product_json<R: Read>(reader: R) -> PipelineResult<Product> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a JSON array of product records.
pub fn load_products_json<R: Read>(reader: R) -> PipelineResult<Vec<Product>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_products_json_file(path: &str) -> PipelineResult<Vec<Product>> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_string(),
        source,
    })?;
    load_products_json(file)
}

/// Write product records back as a pretty-printed JSON array.
pub fn write_products_json<W: Write>(writer: W, products: &[Product]) -> PipelineResult<()> {
    serde_json::to_writer_pretty(writer, products)?;
    Ok(())
}
