use serde::{Deserialize, Serialize};
use std::fmt;

/// The languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Khmer.
    Km,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Km];

    /// The URL segment / language code for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Km => "km",
        }
    }

    /// Name of the language written in that language, for the switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Km => "ខ្មែរ",
        }
    }

    /// The other published locale.
    pub fn other(&self) -> Locale {
        match self {
            Locale::En => Locale::Km,
            Locale::Km => Locale::En,
        }
    }

    /// Parse a language code (case-insensitive). Region subtags such as
    /// `km-KH` or `en_US` resolve to their base language.
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match base.as_str() {
            "en" => Some(Locale::En),
            "km" => Some(Locale::Km),
            _ => None,
        }
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    ///
    /// Entries are weighted by their `q` parameter (default 1.0); ties keep
    /// header order. Falls back to the default locale.
    pub fn negotiate(accept_language: Option<&str>) -> Locale {
        Self::negotiate_or(accept_language, Locale::default())
    }

    /// Like [`Locale::negotiate`] with an explicit fallback.
    pub fn negotiate_or(accept_language: Option<&str>, fallback: Locale) -> Locale {
        let Some(header) = accept_language else {
            return fallback;
        };

        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default();
            let quality = parts
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            if quality <= 0.0 {
                continue;
            }
            if let Some(locale) = Locale::from_code(tag) {
                if best.map_or(true, |(_, q)| quality > q) {
                    best = Some((locale, quality));
                }
            }
        }

        best.map(|(locale, _)| locale).unwrap_or(fallback)
    }
}

/// Build a site path under the given locale, e.g. `/km/programs`.
pub fn localized_path(locale: Locale, rest: &str) -> String {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        format!("/{}/", locale.code())
    } else {
        format!("/{}/{}", locale.code(), rest)
    }
}

/// Rewrite the leading locale segment of `path` to `target`.
///
/// Paths that don't start with a locale segment get one prepended.
pub fn switch_locale_path(path: &str, target: Locale) -> String {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if first.len() == 2 && Locale::from_code(first).is_some() {
        localized_path(target, rest)
    } else {
        localized_path(target, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("en"), Some(Locale::En));
        assert_eq!(Locale::from_code("KM"), Some(Locale::Km));
        assert_eq!(Locale::from_code("km-KH"), Some(Locale::Km));
        assert_eq!(Locale::from_code("en_US"), Some(Locale::En));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_negotiate_prefers_highest_quality() {
        let header = "fr-FR,fr;q=0.9,en;q=0.5,km;q=0.8";
        assert_eq!(Locale::negotiate(Some(header)), Locale::Km);
    }

    #[test]
    fn test_negotiate_keeps_header_order_on_ties() {
        assert_eq!(Locale::negotiate(Some("km-KH, en")), Locale::Km);
        assert_eq!(Locale::negotiate(Some("en-GB, km")), Locale::En);
    }

    #[test]
    fn test_negotiate_falls_back_to_default() {
        assert_eq!(Locale::negotiate(None), Locale::En);
        assert_eq!(Locale::negotiate(Some("de, ja;q=0.3")), Locale::En);
        assert_eq!(Locale::negotiate(Some("km;q=0")), Locale::En);
    }

    #[test]
    fn test_negotiate_or_uses_fallback() {
        assert_eq!(Locale::negotiate_or(None, Locale::Km), Locale::Km);
        assert_eq!(Locale::negotiate_or(Some("de"), Locale::Km), Locale::Km);
        assert_eq!(Locale::negotiate_or(Some("en-GB"), Locale::Km), Locale::En);
    }

    #[test]
    fn test_localized_path() {
        assert_eq!(localized_path(Locale::Km, ""), "/km/");
        assert_eq!(localized_path(Locale::En, "/programs"), "/en/programs");
    }

    #[test]
    fn test_switch_locale_path() {
        assert_eq!(switch_locale_path("/en/programs/web-dev", Locale::Km), "/km/programs/web-dev");
        assert_eq!(switch_locale_path("/km/", Locale::En), "/en/");
        assert_eq!(switch_locale_path("/km", Locale::En), "/en/");
        assert_eq!(switch_locale_path("/", Locale::Km), "/km/");
        assert_eq!(switch_locale_path("/faq", Locale::Km), "/km/faq");
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Locale::Km).unwrap(), "\"km\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
