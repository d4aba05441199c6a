//! Country reference data: tag → country code, country code → languages.

use std::collections::HashMap;

use crate::thresholds::WORLD;

/// Resolves free-form country tags and lists the languages spoken in a country.
///
/// Implementations are read-only during classification and must be safe to
/// share between threads.
pub trait CountryReference: Send + Sync {
    /// Resolve a country tag (`en:france`, `fr`, ...) to its country code.
    fn country_code(&self, tag: &str) -> Option<&str>;

    /// Languages commonly spoken in the country, most common first.
    fn languages(&self, cc: &str) -> &[String];
}

/// Static in-memory country reference table.
#[derive(Clone, Debug, Default)]
pub struct CountryTable {
    codes_by_tag: HashMap<String, String>,
    languages_by_code: HashMap<String, Vec<String>>,
}

impl CountryTable {
    /// An empty table that still knows the world pseudo-entry.
    pub fn new() -> Self {
        let mut table = Self::default();
        table
            .codes_by_tag
            .insert("en:world".to_string(), WORLD.to_string());
        table
            .codes_by_tag
            .insert(WORLD.to_string(), WORLD.to_string());
        table
    }

    /// Register a country under its taxonomy tag. The country code itself
    /// also becomes a valid tag.
    pub fn insert<S: AsRef<str>>(&mut self, tag: &str, cc: &str, languages: &[S]) {
        let cc = cc.to_lowercase();
        self.codes_by_tag.insert(tag.to_lowercase(), cc.clone());
        self.codes_by_tag.insert(cc.clone(), cc.clone());
        self.languages_by_code.insert(
            cc,
            languages
                .iter()
                .map(|l| l.as_ref().to_lowercase())
                .collect(),
        );
    }

    pub fn with_country<S: AsRef<str>>(mut self, tag: &str, cc: &str, languages: &[S]) -> Self {
        self.insert(tag, cc, languages);
        self
    }

    /// Number of countries with language data.
    pub fn len(&self) -> usize {
        self.languages_by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages_by_code.is_empty()
    }
}

impl CountryReference for CountryTable {
    fn country_code(&self, tag: &str) -> Option<&str> {
        let tag = tag.trim();
        match self.codes_by_tag.get(tag) {
            Some(cc) => Some(cc.as_str()),
            None => self
                .codes_by_tag
                .get(&tag.to_lowercase())
                .map(String::as_str),
        }
    }

    fn languages(&self, cc: &str) -> &[String] {
        self.languages_by_code
            .get(cc)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CountryTable {
        CountryTable::new()
            .with_country("en:france", "fr", &["fr"])
            .with_country("en:belgium", "BE", &["fr", "nl", "de"])
    }

    #[test]
    fn resolves_tags_and_bare_codes() {
        let t = table();
        assert_eq!(t.country_code("en:france"), Some("fr"));
        assert_eq!(t.country_code("EN:France"), Some("fr"));
        assert_eq!(t.country_code("be"), Some("be"));
        assert_eq!(t.country_code("en:atlantis"), None);
    }

    #[test]
    fn world_is_always_known() {
        let t = CountryTable::new();
        assert_eq!(t.country_code("en:world"), Some(WORLD));
        assert!(t.languages(WORLD).is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn languages_keep_declared_order() {
        let t = table();
        assert_eq!(t.languages("be"), ["fr", "nl", "de"]);
        assert!(t.languages("xx").is_empty());
        assert_eq!(t.len(), 2);
    }
}
