//! Read-only JSON endpoints over the content store.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::content::models::{
    BlogPost, Facet, Faq, Format, GalleryCategory, GalleryItem, Instructor, Level, Program,
    Testimonial,
};
use crate::error::AppError;
use crate::filter::engine::{
    compute_available_tags, derive_faq_view, filter_items, Filterable, QueryState, Selection,
};
use crate::filter::programs::{filter_programs, ProgramFilters, ProgramSort};
use crate::i18n::locale::Locale;
use crate::rendering::markdown::render_markdown;

/// Query string shared by the listing endpoints.
///
/// `tags` is comma-separated. Programs additionally read `level`, `format`
/// and `sort`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub sort: String,
}

/// One filtered page of a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    /// Size of the whole collection.
    pub total: usize,
    /// Number of items after filtering.
    pub count: usize,
    /// Every tag used anywhere in the collection.
    pub available_tags: Vec<String>,
    pub items: Vec<T>,
}

impl<T: Clone> Listing<T> {
    fn new(total: usize, available_tags: Vec<String>, items: Vec<&T>) -> Self {
        Self {
            total,
            count: items.len(),
            available_tags,
            items: items.into_iter().cloned().collect(),
        }
    }
}

/// Turn query parameters into a query for a collection.
///
/// Unknown categories are rejected; unknown tags are dropped.
pub fn build_query<C: Facet>(
    params: &ListingParams,
    available_tags: &[String],
) -> Result<QueryState<C>, AppError> {
    let mut query = QueryState::default();
    query.set_search(params.q.clone());
    query.set_category(parse_facet("category", &params.category)?);
    for tag in params.tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        query.selected_tags.insert(tag.to_string());
    }
    query.retain_known_tags(available_tags);
    Ok(query)
}

fn parse_facet<C: Facet>(name: &str, raw: &str) -> Result<Selection<C>, AppError> {
    Selection::parse(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown {} '{}'", name, raw.trim())))
}

fn parse_lang(raw: Option<&str>) -> Result<Locale, AppError> {
    match raw.map(str::trim).filter(|l| !l.is_empty()) {
        None => Ok(Locale::default()),
        Some(code) => Locale::from_code(code)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported language '{}'", code))),
    }
}

/// `GET /api/v1/faqs`
pub async fn faqs_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Listing<Faq>>, AppError> {
    let faqs = state.content.faqs();
    let available = compute_available_tags(faqs);
    let query = build_query(&params, &available)?;
    let view = derive_faq_view(faqs, &query);
    Ok(Json(Listing::new(view.total, available, view.items)))
}

/// `GET /api/v1/programs`
pub async fn programs_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Listing<Program>>, AppError> {
    let programs = state.content.programs();
    let available = compute_available_tags(programs);
    let query = build_query(&params, &available)?;
    let filters = ProgramFilters {
        level: parse_facet::<Level>("level", &params.level)?,
        format: parse_facet::<Format>("format", &params.format)?,
    };
    let sort = ProgramSort::from_key(&params.sort)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown sort '{}'", params.sort.trim())))?;

    let view = filter_programs(programs, &query, &filters, sort);
    Ok(Json(Listing::new(view.total, available, view.items)))
}

/// A program with the records it links to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDetail {
    pub program: Program,
    pub instructor: Option<Instructor>,
    pub testimonials: Vec<Testimonial>,
}

/// `GET /api/v1/programs/{id}`
pub async fn program_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProgramDetail>, AppError> {
    let store = state.content.as_ref();
    let program = store
        .program(&id)
        .ok_or_else(|| AppError::NotFound(format!("Program '{}' not found", id)))?;
    let instructor = program
        .instructor_id
        .as_deref()
        .and_then(|i| store.instructor(i))
        .cloned();
    let testimonials = store.testimonials_for(&program.id).into_iter().cloned().collect();

    Ok(Json(ProgramDetail {
        program: program.clone(),
        instructor,
        testimonials,
    }))
}

/// `GET /api/v1/blog`, newest first.
pub async fn blog_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Listing<BlogPost>>, AppError> {
    let posts = state.content.blog_posts();
    let available = compute_available_tags(posts);
    let query = build_query(&params, &available)?;
    let mut items = filter_items(posts, &query);
    items.sort_by(|a, b| b.published_on.cmp(&a.published_on));
    Ok(Json(Listing::new(posts.len(), available, items)))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

/// A blog post with its body rendered for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostDetail {
    pub post: BlogPost,
    pub lang: Locale,
    pub html: String,
}

/// `GET /api/v1/blog/{slug}?lang=km`
pub async fn blog_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LangParams>,
) -> Result<Json<BlogPostDetail>, AppError> {
    let lang = parse_lang(params.lang.as_deref())?;
    let post = state
        .content
        .blog_post(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Blog post '{}' not found", slug)))?;

    Ok(Json(BlogPostDetail {
        html: render_markdown(post.body.get(lang)),
        post: post.clone(),
        lang,
    }))
}

/// `GET /api/v1/instructors`
pub async fn instructors_handler(State(state): State<AppState>) -> Json<Vec<Instructor>> {
    Json(state.content.instructors().to_vec())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialParams {
    pub program: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// `GET /api/v1/testimonials?program=&featured=true`
pub async fn testimonials_handler(
    State(state): State<AppState>,
    Query(params): Query<TestimonialParams>,
) -> Json<Vec<Testimonial>> {
    let stories = state
        .content
        .testimonials()
        .iter()
        .filter(|t| !params.featured || t.featured)
        .filter(|t| match params.program.as_deref() {
            Some(program) => t.program_id.as_deref() == Some(program),
            None => true,
        })
        .cloned()
        .collect();
    Json(stories)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryParams {
    #[serde(default)]
    pub category: String,
}

/// `GET /api/v1/gallery?category=`
pub async fn gallery_handler(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    let category = parse_facet::<GalleryCategory>("category", &params.category)?;
    let items = state
        .content
        .gallery()
        .iter()
        .filter(|item| category.admits(item.category()))
        .cloned()
        .collect();
    Ok(Json(items))
}
