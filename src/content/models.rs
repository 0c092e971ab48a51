use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::engine::Filterable;
use crate::i18n::locale::Locale;
use crate::i18n::messages::t;

/// A user-facing string published in every site locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub km: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, km: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            km: km.into(),
        }
    }

    /// The variant for `locale`.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Km => &self.km,
        }
    }

    /// Case-insensitive substring match against either variant.
    ///
    /// `needle` must already be lowercased.
    pub fn contains(&self, needle: &str) -> bool {
        self.en.to_lowercase().contains(needle) || self.km.to_lowercase().contains(needle)
    }

    /// The code of the first blank variant, if any.
    pub(crate) fn blank_locale(&self) -> Option<&'static str> {
        if self.en.trim().is_empty() {
            Some(Locale::En.code())
        } else if self.km.trim().is_empty() {
            Some(Locale::Km.code())
        } else {
            None
        }
    }
}

/// A closed set of values a collection can be filtered by.
pub trait Facet: Copy + Eq + Send + Sync + 'static {
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Stable key used in JSON fixtures and query strings.
    fn key(&self) -> &'static str;

    /// Message catalog key of the display label.
    fn label_key(&self) -> &'static str;

    fn label(&self, locale: Locale) -> &'static str {
        t(locale, self.label_key())
    }

    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.key().eq_ignore_ascii_case(key))
    }
}

macro_rules! facet_enum {
    ($(#[$meta:meta])* $name:ident, $prefix:literal { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl Facet for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            fn label_key(&self) -> &'static str {
                match self {
                    $($name::$variant => concat!($prefix, ".", $key)),+
                }
            }
        }
    };
}

facet_enum!(
    /// Grouping shown as the category filter on the FAQ page.
    FaqCategory, "faq.category" {
        General => "general",
        Programs => "programs",
        Admissions => "admissions",
        Payment => "payment",
        Schedule => "schedule",
        Career => "career",
    }
);

facet_enum!(
    /// Subject area of a training program.
    ProgramCategory, "program.category" {
        WebDevelopment => "web-development",
        MobileDevelopment => "mobile-development",
        DataScience => "data-science",
        Design => "design",
        Networking => "networking",
    }
);

facet_enum!(
    Level, "program.level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
);

facet_enum!(
    /// How a program is delivered.
    Format, "program.format" {
        Online => "online",
        InPerson => "in-person",
        Hybrid => "hybrid",
    }
);

facet_enum!(
    BlogCategory, "blog.category" {
        News => "news",
        Tutorials => "tutorials",
        Careers => "careers",
        Events => "events",
    }
);

facet_enum!(
    GalleryCategory, "gallery.category" {
        Classroom => "classroom",
        Events => "events",
        Graduation => "graduation",
        Workshops => "workshops",
    }
);

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: u32,
    pub question: LocalizedText,
    pub answer: LocalizedText,
    pub category: FaqCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Featured questions are listed before all others.
    #[serde(default)]
    pub featured: bool,
    /// Position within the featured / non-featured group.
    #[serde(default)]
    pub order: u32,
}

/// A training program offered by the academy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// URL-safe identifier, e.g. `full-stack-web`.
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: ProgramCategory,
    pub level: Level,
    pub format: Format,
    pub duration_weeks: u32,
    pub price_usd: u32,
    /// Weekly schedule, e.g. "Mon/Wed/Fri 6-8pm".
    pub schedule: LocalizedText,
    #[serde(default)]
    pub curriculum: Vec<LocalizedText>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub instructor_id: Option<String>,
    /// Average student rating out of 5.
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    pub name: LocalizedText,
    pub title: LocalizedText,
    pub bio: LocalizedText,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub photo: String,
}

/// A graduate's success story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: LocalizedText,
    /// Current role, e.g. "Junior developer at a local bank".
    pub headline: LocalizedText,
    pub quote: LocalizedText,
    #[serde(default)]
    pub program_id: Option<String>,
    /// Star rating, 1-5.
    pub rating: u8,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub graduation_year: u16,
    #[serde(default)]
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: LocalizedText,
    pub excerpt: LocalizedText,
    /// Markdown body.
    pub body: LocalizedText,
    pub author: LocalizedText,
    pub published_on: NaiveDate,
    pub category: BlogCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub reading_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub caption: LocalizedText,
    pub image: String,
    pub category: GalleryCategory,
    pub taken_on: NaiveDate,
}

impl Filterable for Faq {
    type Category = FaqCategory;

    fn category(&self) -> FaqCategory {
        self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn searchable_fields(&self) -> Vec<&LocalizedText> {
        vec![&self.question, &self.answer]
    }
}

impl Filterable for Program {
    type Category = ProgramCategory;

    fn category(&self) -> ProgramCategory {
        self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn searchable_fields(&self) -> Vec<&LocalizedText> {
        vec![&self.title, &self.description]
    }
}

impl Filterable for BlogPost {
    type Category = BlogCategory;

    fn category(&self) -> BlogCategory {
        self.category
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn searchable_fields(&self) -> Vec<&LocalizedText> {
        vec![&self.title, &self.excerpt]
    }
}

impl Filterable for GalleryItem {
    type Category = GalleryCategory;

    fn category(&self) -> GalleryCategory {
        self.category
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    fn searchable_fields(&self) -> Vec<&LocalizedText> {
        vec![&self.caption]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text_get() {
        let text = LocalizedText::new("Hello", "សួស្តី");
        assert_eq!(text.get(Locale::En), "Hello");
        assert_eq!(text.get(Locale::Km), "សួស្តី");
    }

    #[test]
    fn test_localized_text_contains_is_case_insensitive() {
        let text = LocalizedText::new("Web Development", "ការអភិវឌ្ឍគេហទំព័រ");
        assert!(text.contains("development"));
        assert!(text.contains("គេហទំព័រ"));
        assert!(!text.contains("design"));
    }

    #[test]
    fn test_blank_locale() {
        assert_eq!(LocalizedText::new("a", "b").blank_locale(), None);
        assert_eq!(LocalizedText::new(" ", "b").blank_locale(), Some("en"));
        assert_eq!(LocalizedText::new("a", "").blank_locale(), Some("km"));
    }

    #[test]
    fn test_facet_keys_roundtrip_through_serde() {
        for format in Format::ALL {
            let json = serde_json::to_string(format).unwrap();
            assert_eq!(json, format!("\"{}\"", format.key()));
        }
        assert_eq!(Format::from_key("In-Person"), Some(Format::InPerson));
        assert_eq!(FaqCategory::from_key("unknown"), None);
    }

    #[test]
    fn test_facet_label_keys() {
        assert_eq!(ProgramCategory::DataScience.label_key(), "program.category.data-science");
        assert_eq!(Level::Beginner.label(Locale::En), "Beginner");
    }

    #[test]
    fn test_faq_without_tags_defaults_to_empty() {
        let json = r#"{
            "id": 7,
            "question": {"en": "Q", "km": "សំណួរ"},
            "answer": {"en": "A", "km": "ចម្លើយ"},
            "category": "general"
        }"#;
        let faq: Faq = serde_json::from_str(json).unwrap();
        assert!(faq.tags.is_empty());
        assert!(!faq.featured);
        assert_eq!(faq.order, 0);
    }

    #[test]
    fn test_missing_locale_variant_is_rejected() {
        let json = r#"{
            "id": 7,
            "question": {"en": "Q"},
            "answer": {"en": "A", "km": "ចម្លើយ"},
            "category": "general"
        }"#;
        assert!(serde_json::from_str::<Faq>(json).is_err());
    }
}
