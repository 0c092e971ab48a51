use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::layout::use_locale;
use crate::content::models::{BlogPost, Facet, GalleryItem, Instructor, Program, Testimonial};
use crate::i18n::locale::localized_path;
use crate::i18n::messages::{t, tf};

#[component]
pub fn ProgramCard(program: &'static Program) -> impl IntoView {
    let locale = use_locale();
    let href = move || localized_path(locale.get(), &format!("programs/{}", program.id));

    view! {
        <article class="card program-card">
            <img src=program.image.clone() alt="" loading="lazy"/>
            <div class="card-body">
                <div class="badges">
                    <span class="badge">{move || program.level.label(locale.get())}</span>
                    <span class="badge">{move || program.format.label(locale.get())}</span>
                    <Show when=move || program.featured>
                        <span class="badge badge-featured">{move || t(locale.get(), "programs.featured")}</span>
                    </Show>
                </div>
                <h3><A href=href>{move || program.title.get(locale.get()).to_string()}</A></h3>
                <p>{move || program.description.get(locale.get()).to_string()}</p>
                <dl class="facts">
                    <dt>{move || t(locale.get(), "programs.duration")}</dt>
                    <dd>
                        {move || tf(locale.get(), "programs.weeks", &[("weeks", program.duration_weeks.to_string())])}
                    </dd>
                    <dt>{move || t(locale.get(), "programs.price")}</dt>
                    <dd>{format!("${}", program.price_usd)}</dd>
                </dl>
            </div>
        </article>
    }
}

/// Filled and empty stars for a 0-5 rating.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[component]
pub fn TestimonialCard(story: &'static Testimonial) -> impl IntoView {
    let locale = use_locale();
    view! {
        <blockquote class="card testimonial-card">
            <p class="quote">{move || story.quote.get(locale.get()).to_string()}</p>
            <span class="rating" aria-label=story.rating.to_string()>{stars(story.rating)}</span>
            <footer>
                <strong>{move || story.name.get(locale.get()).to_string()}</strong>
                <span>{move || story.headline.get(locale.get()).to_string()}</span>
            </footer>
        </blockquote>
    }
}

#[component]
pub fn BlogCard(post: &'static BlogPost) -> impl IntoView {
    let locale = use_locale();
    let href = move || localized_path(locale.get(), &format!("blog/{}", post.slug));
    view! {
        <article class="card blog-card">
            <img src=post.cover_image.clone() alt="" loading="lazy"/>
            <div class="card-body">
                <span class="badge">{move || post.category.label(locale.get())}</span>
                <h3><A href=href>{move || post.title.get(locale.get()).to_string()}</A></h3>
                <p>{move || post.excerpt.get(locale.get()).to_string()}</p>
                <small>
                    {post.published_on.format("%Y-%m-%d").to_string()} " · "
                    {move || tf(locale.get(), "blog.reading_time", &[("minutes", post.reading_minutes.to_string())])}
                </small>
            </div>
        </article>
    }
}

#[component]
pub fn InstructorCard(instructor: &'static Instructor) -> impl IntoView {
    let locale = use_locale();
    view! {
        <article class="card instructor-card">
            <img src=instructor.photo.clone() alt="" loading="lazy"/>
            <h4>{move || instructor.name.get(locale.get()).to_string()}</h4>
            <p class="role">{move || instructor.title.get(locale.get()).to_string()}</p>
            <p>{move || instructor.bio.get(locale.get()).to_string()}</p>
            <ul class="tags">
                {instructor.expertise.iter().map(|e| view! { <li>{e.clone()}</li> }).collect_view()}
            </ul>
        </article>
    }
}

#[component]
pub fn GalleryTile(item: &'static GalleryItem) -> impl IntoView {
    let locale = use_locale();
    view! {
        <figure class="gallery-tile">
            <img src=item.image.clone() alt=move || item.caption.get(locale.get()).to_string() loading="lazy"/>
            <figcaption>{move || item.caption.get(locale.get()).to_string()}</figcaption>
        </figure>
    }
}
