use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

use super::models::{BlogPost, Faq, GalleryItem, Instructor, LocalizedText, Program, Testimonial};
use super::shells::{Dashboard, Portal};
use crate::error::ContentError;
use crate::rendering::markdown::reading_minutes;

/// Raw JSON for every collection.
#[derive(Debug, Clone, Copy)]
pub struct ContentSources<'a> {
    pub faqs: &'a str,
    pub programs: &'a str,
    pub instructors: &'a str,
    pub testimonials: &'a str,
    pub blog_posts: &'a str,
    pub gallery: &'a str,
    pub dashboard: &'a str,
    pub portal: &'a str,
}

impl ContentSources<'static> {
    /// The fixtures under `content/`, compiled into the binary.
    pub const EMBEDDED: Self = Self {
        faqs: include_str!("../../content/faqs.json"),
        programs: include_str!("../../content/programs.json"),
        instructors: include_str!("../../content/instructors.json"),
        testimonials: include_str!("../../content/testimonials.json"),
        blog_posts: include_str!("../../content/blog_posts.json"),
        gallery: include_str!("../../content/gallery.json"),
        dashboard: include_str!("../../content/dashboard.json"),
        portal: include_str!("../../content/portal.json"),
    };
}

static EMBEDDED: Lazy<ContentStore> = Lazy::new(|| {
    ContentStore::load_embedded().unwrap_or_else(|e| {
        tracing::error!("Embedded content failed to load: {}", e);
        ContentStore::default()
    })
});

/// Read-only, in-memory content for the whole site.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    faqs: Vec<Faq>,
    programs: Vec<Program>,
    instructors: Vec<Instructor>,
    testimonials: Vec<Testimonial>,
    blog_posts: Vec<BlogPost>,
    gallery: Vec<GalleryItem>,
    dashboard: Dashboard,
    portal: Portal,
}

impl ContentStore {
    /// The process-wide store built from the embedded fixtures.
    pub fn embedded() -> &'static ContentStore {
        &EMBEDDED
    }

    pub fn load_embedded() -> Result<Self, ContentError> {
        Self::from_sources(ContentSources::EMBEDDED)
    }

    /// Parse and validate every collection.
    pub fn from_sources(sources: ContentSources<'_>) -> Result<Self, ContentError> {
        let mut store = Self {
            faqs: parse("faqs", sources.faqs)?,
            programs: parse("programs", sources.programs)?,
            instructors: parse("instructors", sources.instructors)?,
            testimonials: parse("testimonials", sources.testimonials)?,
            blog_posts: parse("blog_posts", sources.blog_posts)?,
            gallery: parse("gallery", sources.gallery)?,
            dashboard: parse("dashboard", sources.dashboard)?,
            portal: parse("portal", sources.portal)?,
        };
        store.validate()?;

        for post in store.blog_posts.iter_mut().filter(|p| p.reading_minutes == 0) {
            post.reading_minutes = reading_minutes(&post.body.en);
        }

        tracing::debug!(
            faqs = store.faqs.len(),
            programs = store.programs.len(),
            posts = store.blog_posts.len(),
            "Content store loaded"
        );
        Ok(store)
    }

    fn validate(&self) -> Result<(), ContentError> {
        check_collection("faqs", &self.faqs)?;
        check_collection("programs", &self.programs)?;
        check_collection("instructors", &self.instructors)?;
        check_collection("testimonials", &self.testimonials)?;
        check_collection("blog_posts", &self.blog_posts)?;
        check_collection("gallery", &self.gallery)?;

        for program in &self.programs {
            if let Some(instructor) = &program.instructor_id {
                if self.instructor(instructor).is_none() {
                    return Err(dangling("programs", &program.id, instructor));
                }
            }
        }
        for story in &self.testimonials {
            if let Some(program) = &story.program_id {
                if self.program(program).is_none() {
                    return Err(dangling("testimonials", &story.id, program));
                }
            }
        }
        for record in &self.dashboard.recent_enrollments {
            if self.program(&record.program_id).is_none() {
                return Err(dangling("dashboard", &record.id, &record.program_id));
            }
        }
        for student in &self.portal.students {
            for course in &student.courses {
                if self.program(&course.program_id).is_none() {
                    return Err(dangling("portal", &student.user_id, &course.program_id));
                }
            }
        }
        Ok(())
    }

    pub fn faqs(&self) -> &[Faq] {
        &self.faqs
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.blog_posts
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn portal(&self) -> &Portal {
        &self.portal
    }

    pub fn program(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    pub fn blog_post(&self, slug: &str) -> Option<&BlogPost> {
        self.blog_posts.iter().find(|p| p.slug == slug)
    }

    pub fn featured_programs(&self) -> Vec<&Program> {
        self.programs.iter().filter(|p| p.featured).collect()
    }

    pub fn featured_testimonials(&self) -> Vec<&Testimonial> {
        self.testimonials.iter().filter(|t| t.featured).collect()
    }

    pub fn testimonials_for(&self, program_id: &str) -> Vec<&Testimonial> {
        self.testimonials
            .iter()
            .filter(|t| t.program_id.as_deref() == Some(program_id))
            .collect()
    }

    /// The `limit` most recently published posts, newest first.
    pub fn latest_posts(&self, limit: usize) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self.blog_posts.iter().collect();
        posts.sort_by(|a, b| b.published_on.cmp(&a.published_on));
        posts.truncate(limit);
        posts
    }
}

/// Identity and localized fields of a record, for load-time checks.
trait Record {
    fn record_id(&self) -> String;
    fn texts(&self) -> Vec<(&'static str, &LocalizedText)>;
}

impl Record for Faq {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        vec![("question", &self.question), ("answer", &self.answer)]
    }
}

impl Record for Program {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        let mut texts = vec![
            ("title", &self.title),
            ("description", &self.description),
            ("schedule", &self.schedule),
        ];
        texts.extend(self.curriculum.iter().map(|c| ("curriculum", c)));
        texts
    }
}

impl Record for Instructor {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        vec![("name", &self.name), ("title", &self.title), ("bio", &self.bio)]
    }
}

impl Record for Testimonial {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        vec![
            ("name", &self.name),
            ("headline", &self.headline),
            ("quote", &self.quote),
        ]
    }
}

impl Record for BlogPost {
    fn record_id(&self) -> String {
        self.slug.clone()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        vec![
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("body", &self.body),
            ("author", &self.author),
        ]
    }
}

impl Record for GalleryItem {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn texts(&self) -> Vec<(&'static str, &LocalizedText)> {
        vec![("caption", &self.caption)]
    }
}

fn parse<T: DeserializeOwned>(collection: &'static str, raw: &str) -> Result<T, ContentError> {
    serde_json::from_str(raw).map_err(|source| ContentError::Malformed { collection, source })
}

fn check_collection<R: Record>(collection: &'static str, records: &[R]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for record in records {
        let id = record.record_id();
        for (field, text) in record.texts() {
            if let Some(locale) = text.blank_locale() {
                return Err(ContentError::BlankText {
                    collection,
                    id,
                    field,
                    locale,
                });
            }
        }
        if !seen.insert(id.clone()) {
            return Err(ContentError::DuplicateId { collection, id });
        }
    }
    Ok(())
}

fn dangling(collection: &'static str, id: &str, target: &str) -> ContentError {
    ContentError::DanglingReference {
        collection,
        id: id.to_string(),
        target: target.to_string(),
    }
}
