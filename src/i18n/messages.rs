//! UI message catalog.
//!
//! Interface strings live in two flat JSON files under `locales/`, embedded at
//! compile time so the server and the hydrated client read the same catalog.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::locale::Locale;

const EN_JSON: &str = include_str!("../../locales/en.json");
const KM_JSON: &str = include_str!("../../locales/km.json");

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::embedded);

/// Parsed message tables, one per locale.
#[derive(Debug, Default)]
pub struct Catalog {
    en: HashMap<String, String>,
    km: HashMap<String, String>,
}

impl Catalog {
    fn embedded() -> Self {
        Self {
            en: parse_table("en", EN_JSON),
            km: parse_table("km", KM_JSON),
        }
    }

    fn table(&self, locale: Locale) -> &HashMap<String, String> {
        match locale {
            Locale::En => &self.en,
            Locale::Km => &self.km,
        }
    }

    /// Look up `key`, falling back to English and then to the key itself.
    pub fn lookup<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.table(locale)
            .get(key)
            .or_else(|| self.en.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Keys present in English but missing from `locale`.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let table = self.table(locale);
        let mut missing: Vec<&str> = self
            .en
            .keys()
            .filter(|k| !table.contains_key(*k))
            .map(String::as_str)
            .collect();
        missing.sort_unstable();
        missing
    }
}

fn parse_table(code: &str, raw: &str) -> HashMap<String, String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::error!("Message catalog '{}' is malformed: {}", code, e);
        HashMap::new()
    })
}

/// The process-wide catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Translate `key` into `locale`.
pub fn t(locale: Locale, key: &'static str) -> &'static str {
    CATALOG.lookup(locale, key)
}

/// Translate `key` and substitute `{name}` placeholders.
pub fn tf(locale: Locale, key: &'static str, args: &[(&str, String)]) -> String {
    args.iter()
        .fold(t(locale, key).to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_parse() {
        let catalog = catalog();
        assert!(!catalog.en.is_empty());
        assert!(!catalog.km.is_empty());
    }

    #[test]
    fn test_khmer_catalog_is_complete() {
        let missing = catalog().missing_keys(Locale::Km);
        assert!(missing.is_empty(), "Keys missing from km.json: {:?}", missing);
    }

    #[test]
    fn test_lookup_per_locale() {
        assert_eq!(t(Locale::En, "nav.faq"), "FAQ");
        assert_ne!(t(Locale::Km, "nav.faq"), t(Locale::En, "nav.faq"));
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(t(Locale::Km, "does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_placeholder_substitution() {
        let text = tf(
            Locale::En,
            "filter.summary",
            &[("shown", "3".to_string()), ("total", "12".to_string())],
        );
        assert_eq!(text, "Showing 3 of 12");
    }
}
