use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::analytics::{track, AnalyticsEvent};
use crate::components::cards::ProgramCard;
use crate::components::layout::use_locale;
use crate::content::models::{Facet, Format, Level, Program, ProgramCategory};
use crate::content::store::ContentStore;
use crate::filter::engine::{QueryState, Selection};
use crate::filter::programs::{available_levels, filter_programs, ProgramFilters, ProgramSort};
use crate::i18n::messages::{t, tf};

/// Options of one facet `<select>`, led by the "all" entry.
fn facet_options<F: Facet>(all_key: &'static str, values: Vec<F>) -> impl IntoView {
    let locale = use_locale();
    view! {
        <option value={Selection::<F>::ALL_KEY}>{move || t(locale.get(), all_key)}</option>
        {values
            .into_iter()
            .map(|value| view! { <option value=value.key()>{move || value.label(locale.get())}</option> })
            .collect_view()}
    }
}

#[component]
pub fn ProgramFilter() -> impl IntoView {
    let locale = use_locale();
    let programs: &'static [Program] = ContentStore::embedded().programs();

    // `?category=` links from the home page preselect a category.
    let initial_category = use_query_map()
        .with_untracked(|q| q.get("category"))
        .and_then(|raw| Selection::<ProgramCategory>::parse(&raw))
        .unwrap_or_default();

    let query = RwSignal::new(QueryState::<ProgramCategory> {
        category: initial_category,
        ..Default::default()
    });
    let filters = RwSignal::new(ProgramFilters::default());
    let sort = RwSignal::new(ProgramSort::default());

    let results = Memo::new(move |_| {
        let filters = filters.get();
        let sort = sort.get();
        query.with(|q| filter_programs(programs, q, &filters, sort))
    });

    let changed = move |filter: &'static str, value: &'static str| {
        track(AnalyticsEvent::FilterChange {
            page: "programs",
            filter,
            value: value.to_string(),
        });
    };

    let reset = move |_| {
        query.update(|q| q.clear());
        filters.set(ProgramFilters::default());
        sort.set(ProgramSort::default());
    };

    view! {
        <section class="programs-page">
            <h1>{move || t(locale.get(), "programs.title")}</h1>
            <p class="lead">{move || t(locale.get(), "programs.subtitle")}</p>

            <div class="filter-bar">
                <input
                    type="search"
                    class="search-input"
                    placeholder=move || t(locale.get(), "filter.search_placeholder")
                    prop:value=move || query.with(|q| q.search_text.clone())
                    on:input=move |ev| query.update(|q| q.set_search(event_target_value(&ev)))
                    on:change=move |ev| {
                        let term = event_target_value(&ev);
                        if !term.trim().is_empty() {
                            track(AnalyticsEvent::Search { page: "programs", term });
                        }
                    }
                />
                <select
                    prop:value=move || query.with(|q| q.category.key())
                    on:change=move |ev| {
                        let selection = Selection::parse(&event_target_value(&ev)).unwrap_or_default();
                        query.update(|q| q.set_category(selection));
                        changed("category", selection.key());
                    }
                >
                    {facet_options("filter.all_categories", ProgramCategory::ALL.to_vec())}
                </select>
                <select
                    prop:value=move || filters.get().level.key()
                    on:change=move |ev| {
                        let level = Selection::<Level>::parse(&event_target_value(&ev)).unwrap_or_default();
                        filters.update(|f| f.level = level);
                        changed("level", level.key());
                    }
                >
                    {facet_options("filter.all_levels", available_levels(programs))}
                </select>
                <select
                    prop:value=move || filters.get().format.key()
                    on:change=move |ev| {
                        let format = Selection::<Format>::parse(&event_target_value(&ev)).unwrap_or_default();
                        filters.update(|f| f.format = format);
                        changed("format", format.key());
                    }
                >
                    {facet_options("filter.all_formats", Format::ALL.to_vec())}
                </select>
                <select
                    prop:value=move || sort.get().key()
                    on:change=move |ev| {
                        let chosen = ProgramSort::from_key(&event_target_value(&ev)).unwrap_or_default();
                        sort.set(chosen);
                        changed("sort", chosen.key());
                    }
                >
                    {ProgramSort::ALL
                        .into_iter()
                        .map(|s| view! { <option value=s.key()>{move || t(locale.get(), s.label_key())}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="results-header">
                <p class="results-summary">
                    {move || {
                        let summary = results.with(|v| v.summary());
                        tf(
                            locale.get(),
                            "filter.summary",
                            &[("shown", summary.shown.to_string()), ("total", summary.total.to_string())],
                        )
                    }}
                </p>
                <Show when=move || !query.with(|q| q.is_default()) || !filters.get().is_default()>
                    <button class="btn btn-link" on:click=reset>
                        {move || t(locale.get(), "filter.clear_all")}
                    </button>
                </Show>
            </div>

            <Show
                when=move || !results.with(|v| v.is_empty())
                fallback=move || {
                    view! {
                        <div class="no-results">
                            <h3>{move || t(locale.get(), "filter.no_results")}</h3>
                            <p>{move || t(locale.get(), "filter.no_results_hint")}</p>
                            <button class="btn" on:click=reset>{move || t(locale.get(), "filter.clear_all")}</button>
                        </div>
                    }
                }
            >
                <div class="card-grid">
                    <For
                        each=move || results.with(|v| v.items.clone())
                        key=|program| program.id.clone()
                        children=|program: &'static Program| view! { <ProgramCard program=program/> }
                    />
                </div>
            </Show>
        </section>
    }
}
