use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::analytics::{track, AnalyticsEvent};
use crate::components::cards::{BlogCard, GalleryTile, InstructorCard, ProgramCard, TestimonialCard};
use crate::components::faq_search::FaqSearch;
use crate::components::forms::{ContactFormView, EnrollmentFormView};
use crate::components::layout::{use_locale, NotFound};
use crate::components::program_filter::ProgramFilter;
use crate::content::models::{BlogCategory, BlogPost, Facet, GalleryCategory, GalleryItem, ProgramCategory};
use crate::content::store::ContentStore;
use crate::filter::engine::{filter_items, QueryState, Selection};
use crate::i18n::locale::localized_path;
use crate::i18n::messages::{t, tf};
use crate::rendering::markdown::render_markdown;

#[component]
pub fn HomePage() -> impl IntoView {
    let locale = use_locale();
    let store = ContentStore::embedded();

    view! {
        <Title text=t(locale.get_untracked(), "nav.home")/>
        <section class="hero">
            <h1>{move || t(locale.get(), "home.hero.title")}</h1>
            <p class="lead">{move || t(locale.get(), "home.hero.subtitle")}</p>
            <div class="cta-row">
                <A href=move || localized_path(locale.get(), "programs") attr:class="btn btn-primary">
                    {move || t(locale.get(), "home.hero.browse")}
                </A>
                <A href=move || localized_path(locale.get(), "enroll") attr:class="btn">
                    {move || t(locale.get(), "nav.enroll")}
                </A>
            </div>
        </section>

        <section class="home-categories">
            <h2>{move || t(locale.get(), "home.categories")}</h2>
            <div class="category-grid">
                {ProgramCategory::ALL
                    .iter()
                    .map(|category| {
                        let category = *category;
                        let href = move || {
                            localized_path(locale.get(), &format!("programs?category={}", category.key()))
                        };
                        view! { <A href=href attr:class="category-tile">{move || category.label(locale.get())}</A> }
                    })
                    .collect_view()}
            </div>
        </section>

        <section class="home-featured">
            <h2>{move || t(locale.get(), "home.featured_programs")}</h2>
            <div class="card-grid">
                {store
                    .featured_programs()
                    .into_iter()
                    .map(|program| view! { <ProgramCard program=program/> })
                    .collect_view()}
            </div>
        </section>

        <section class="home-stories">
            <h2>{move || t(locale.get(), "home.stories")}</h2>
            <div class="card-grid">
                {store
                    .featured_testimonials()
                    .into_iter()
                    .map(|story| view! { <TestimonialCard story=story/> })
                    .collect_view()}
            </div>
            <A href=move || localized_path(locale.get(), "success-stories")>
                {move || t(locale.get(), "home.all_stories")}
            </A>
        </section>

        <section class="home-blog">
            <h2>{move || t(locale.get(), "home.latest_posts")}</h2>
            <div class="card-grid">
                {store
                    .latest_posts(3)
                    .into_iter()
                    .map(|post| view! { <BlogCard post=post/> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ProgramsPage() -> impl IntoView {
    let locale = use_locale();
    view! {
        <Title text=t(locale.get_untracked(), "programs.title")/>
        <ProgramFilter/>
    }
}

#[component]
pub fn ProgramDetailPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let store = ContentStore::embedded();
    let program = Memo::new(move |_| {
        params
            .read()
            .get("id")
            .and_then(|id| store.program(&id))
    });

    move || match program.get() {
        None => view! { <NotFound/> }.into_any(),
        Some(program) => {
            let instructor = program.instructor_id.as_deref().and_then(|id| store.instructor(id));
            let stories = store.testimonials_for(&program.id);
            let enroll_href = move || {
                localized_path(locale.get(), &format!("enroll?program={}", program.id))
            };

            view! {
                <Title text=program.title.get(locale.get_untracked()).to_string()/>
                <article class="program-detail">
                    <header>
                        <span class="badge">{move || program.category.label(locale.get())}</span>
                        <h1>{move || program.title.get(locale.get()).to_string()}</h1>
                        <p class="lead">{move || program.description.get(locale.get()).to_string()}</p>
                    </header>
                    <dl class="facts">
                        <dt>{move || t(locale.get(), "programs.level")}</dt>
                        <dd>{move || program.level.label(locale.get())}</dd>
                        <dt>{move || t(locale.get(), "programs.format")}</dt>
                        <dd>{move || program.format.label(locale.get())}</dd>
                        <dt>{move || t(locale.get(), "programs.duration")}</dt>
                        <dd>
                            {move || tf(locale.get(), "programs.weeks", &[("weeks", program.duration_weeks.to_string())])}
                        </dd>
                        <dt>{move || t(locale.get(), "programs.schedule")}</dt>
                        <dd>{move || program.schedule.get(locale.get()).to_string()}</dd>
                        <dt>{move || t(locale.get(), "programs.price")}</dt>
                        <dd>{format!("${}", program.price_usd)}</dd>
                    </dl>

                    <h2>{move || t(locale.get(), "programs.curriculum")}</h2>
                    <ol class="curriculum">
                        {program
                            .curriculum
                            .iter()
                            .map(|module| view! { <li>{move || module.get(locale.get()).to_string()}</li> })
                            .collect_view()}
                    </ol>

                    {instructor.map(|instructor| view! {
                        <h2>{move || t(locale.get(), "programs.instructor")}</h2>
                        <InstructorCard instructor=instructor/>
                    })}

                    <Show when={
                        let has_stories = !stories.is_empty();
                        move || has_stories
                    }>
                        <h2>{move || t(locale.get(), "programs.stories")}</h2>
                    </Show>
                    <div class="card-grid">
                        {stories
                            .into_iter()
                            .map(|story| view! { <TestimonialCard story=story/> })
                            .collect_view()}
                    </div>

                    <A href=enroll_href attr:class="btn btn-primary">{move || t(locale.get(), "programs.enroll_cta")}</A>
                </article>
            }
            .into_any()
        }
    }
}

#[component]
pub fn FaqPage() -> impl IntoView {
    let locale = use_locale();
    view! {
        <Title text=t(locale.get_untracked(), "faq.title")/>
        <FaqSearch/>
    }
}

/// Blog posts matching `query`, newest first.
fn blog_listing<'a>(posts: &'a [BlogPost], query: &QueryState<BlogCategory>) -> Vec<&'a BlogPost> {
    let mut items = filter_items(posts, query);
    items.sort_by(|a, b| b.published_on.cmp(&a.published_on));
    items
}

#[component]
pub fn BlogPage() -> impl IntoView {
    let locale = use_locale();
    let posts: &'static [BlogPost] = ContentStore::embedded().blog_posts();
    let query = RwSignal::new(QueryState::<BlogCategory>::default());
    let items = Memo::new(move |_| query.with(|q| blog_listing(posts, q)));

    view! {
        <Title text=t(locale.get_untracked(), "blog.title")/>
        <section class="blog-page">
            <h1>{move || t(locale.get(), "blog.title")}</h1>
            <div class="filter-bar">
                <input
                    type="search"
                    class="search-input"
                    placeholder=move || t(locale.get(), "filter.search_placeholder")
                    prop:value=move || query.with(|q| q.search_text.clone())
                    on:input=move |ev| query.update(|q| q.set_search(event_target_value(&ev)))
                />
                <CategoryButtons
                    selected=Signal::derive(move || query.with(|q| q.category))
                    on_select=Callback::new(move |selection: Selection<BlogCategory>| {
                        query.update(|q| q.set_category(selection));
                        track(AnalyticsEvent::FilterChange {
                            page: "blog",
                            filter: "category",
                            value: selection.key().to_string(),
                        });
                    })
                />
            </div>
            <Show
                when=move || !items.with(|i| i.is_empty())
                fallback=move || view! { <p class="no-results">{t(locale.get(), "filter.no_results")}</p> }
            >
                <div class="card-grid">
                    <For
                        each=move || items.get()
                        key=|post| post.slug.clone()
                        children=|post: &'static BlogPost| view! { <BlogCard post=post/> }
                    />
                </div>
            </Show>
        </section>
    }
}

/// "All" plus one button per facet value.
#[component]
fn CategoryButtons<F: Facet>(
    selected: Signal<Selection<F>>,
    on_select: Callback<Selection<F>>,
) -> impl IntoView {
    let locale = use_locale();
    let choices = std::iter::once(Selection::All)
        .chain(F::ALL.iter().copied().map(Selection::Only))
        .collect::<Vec<_>>();

    view! {
        <div class="category-buttons">
            {choices
                .into_iter()
                .map(|choice| {
                    let label = move || match choice {
                        Selection::All => t(locale.get(), "filter.all"),
                        Selection::Only(value) => value.label(locale.get()),
                    };
                    view! {
                        <button
                            class="chip"
                            class:selected=move || selected.get() == choice
                            on:click=move |_| on_select.run(choice)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn BlogPostPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let store = ContentStore::embedded();
    let post = Memo::new(move |_| params.read().get("slug").and_then(|slug| store.blog_post(&slug)));

    move || match post.get() {
        None => view! { <NotFound/> }.into_any(),
        Some(post) => view! {
            <Title text=post.title.get(locale.get_untracked()).to_string()/>
            <article class="blog-post">
                <img class="cover" src=post.cover_image.clone() alt=""/>
                <span class="badge">{move || post.category.label(locale.get())}</span>
                <h1>{move || post.title.get(locale.get()).to_string()}</h1>
                <p class="byline">
                    {move || post.author.get(locale.get()).to_string()} " · "
                    {post.published_on.format("%Y-%m-%d").to_string()} " · "
                    {move || tf(locale.get(), "blog.reading_time", &[("minutes", post.reading_minutes.to_string())])}
                </p>
                <div class="prose" inner_html=move || render_markdown(post.body.get(locale.get()))></div>
                <A href=move || localized_path(locale.get(), "blog")>{move || t(locale.get(), "blog.back")}</A>
            </article>
        }
        .into_any(),
    }
}

#[component]
pub fn GalleryPage() -> impl IntoView {
    let locale = use_locale();
    let gallery: &'static [GalleryItem] = ContentStore::embedded().gallery();
    let selected = RwSignal::new(Selection::<GalleryCategory>::All);
    let items = Memo::new(move |_| {
        let selection = selected.get();
        gallery
            .iter()
            .filter(|item| selection.admits(item.category))
            .collect::<Vec<_>>()
    });

    view! {
        <Title text=t(locale.get_untracked(), "gallery.title")/>
        <section class="gallery-page">
            <h1>{move || t(locale.get(), "gallery.title")}</h1>
            <CategoryButtons
                selected=selected.into()
                on_select=Callback::new(move |selection: Selection<GalleryCategory>| selected.set(selection))
            />
            <div class="gallery-grid">
                <For
                    each=move || items.get()
                    key=|item| item.id.clone()
                    children=|item: &'static GalleryItem| view! { <GalleryTile item=item/> }
                />
            </div>
        </section>
    }
}

#[component]
pub fn SuccessStoriesPage() -> impl IntoView {
    let locale = use_locale();
    let store = ContentStore::embedded();

    view! {
        <Title text=t(locale.get_untracked(), "stories.title")/>
        <section class="stories-page">
            <h1>{move || t(locale.get(), "stories.title")}</h1>
            <p class="lead">{move || t(locale.get(), "stories.subtitle")}</p>
            <div class="card-grid">
                {store
                    .testimonials()
                    .iter()
                    .map(|story| view! { <TestimonialCard story=story/> })
                    .collect_view()}
            </div>
            <h2>{move || t(locale.get(), "stories.instructors")}</h2>
            <div class="card-grid">
                {store
                    .instructors()
                    .iter()
                    .map(|instructor| view! { <InstructorCard instructor=instructor/> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let locale = use_locale();
    view! {
        <Title text=t(locale.get_untracked(), "contact.title")/>
        <section class="contact-page">
            <h1>{move || t(locale.get(), "contact.title")}</h1>
            <p class="lead">{move || t(locale.get(), "contact.subtitle")}</p>
            <ContactFormView/>
        </section>
    }
}

#[component]
pub fn EnrollPage() -> impl IntoView {
    let locale = use_locale();
    view! {
        <Title text=t(locale.get_untracked(), "enroll.title")/>
        <section class="enroll-page">
            <h1>{move || t(locale.get(), "enroll.title")}</h1>
            <p class="lead">{move || t(locale.get(), "enroll.subtitle")}</p>
            <EnrollmentFormView/>
        </section>
    }
}
