//! Interactive FAQ page: free-text search, category and tag filters over the
//! embedded FAQ collection. Filtering runs in the browser after hydration and
//! on the server for the first render, using the same engine.

use leptos::prelude::*;

use crate::analytics::{track, AnalyticsEvent};
use crate::components::layout::use_locale;
use crate::content::models::{Facet, Faq, FaqCategory};
use crate::content::store::ContentStore;
use crate::filter::engine::{
    compute_available_tags, derive_faq_view, ActiveFilter, PanelState, QueryState, Selection,
};
use crate::i18n::locale::Locale;
use crate::i18n::messages::{t, tf};

/// Text of a removable filter chip.
fn chip_label(chip: &ActiveFilter<FaqCategory>, locale: Locale) -> String {
    match chip {
        ActiveFilter::Search(text) => format!("\u{201c}{}\u{201d}", text.trim()),
        ActiveFilter::Category(category) => category.label(locale).to_string(),
        ActiveFilter::Tag(tag) => format!("#{tag}"),
    }
}

#[component]
pub fn FaqSearch() -> impl IntoView {
    let locale = use_locale();
    let faqs: &'static [Faq] = ContentStore::embedded().faqs();
    let available_tags = StoredValue::new(compute_available_tags(faqs));

    let query = RwSignal::new(QueryState::<FaqCategory>::default());
    let panel = RwSignal::new(PanelState::default());
    let open_item = RwSignal::new(None::<u32>);

    let results = Memo::new(move |_| query.with(|q| derive_faq_view(faqs, q)));

    let on_category = move |ev| {
        let raw = event_target_value(&ev);
        let selection = Selection::<FaqCategory>::parse(&raw).unwrap_or_default();
        query.update(|q| q.set_category(selection));
        track(AnalyticsEvent::FilterChange {
            page: "faq",
            filter: "category",
            value: selection.key().to_string(),
        });
    };

    view! {
        <section class="faq-page">
            <h1>{move || t(locale.get(), "faq.title")}</h1>
            <p class="lead">{move || t(locale.get(), "faq.subtitle")}</p>

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
                            track(AnalyticsEvent::Search { page: "faq", term });
                        }
                    }
                />
                <select
                    class="category-select"
                    prop:value=move || query.with(|q| q.category.key())
                    on:change=on_category
                >
                    <option value={Selection::<FaqCategory>::ALL_KEY}>
                        {move || t(locale.get(), "filter.all_categories")}
                    </option>
                    {FaqCategory::ALL
                        .iter()
                        .map(|category| {
                            let category = *category;
                            view! {
                                <option value=category.key()>{move || category.label(locale.get())}</option>
                            }
                        })
                        .collect_view()}
                </select>
                <button
                    class="btn btn-ghost panel-toggle"
                    aria-expanded=move || panel.get().is_expanded().to_string()
                    on:click=move |_| panel.update(|p| *p = p.toggle())
                >
                    {move || {
                        if panel.get().is_expanded() {
                            t(locale.get(), "filter.hide_tags")
                        } else {
                            t(locale.get(), "filter.show_tags")
                        }
                    }}
                </button>
            </div>

            <Show when=move || panel.get().is_expanded()>
                <div class="tag-panel">
                    {move || {
                        available_tags
                            .get_value()
                            .into_iter()
                            .map(|tag| {
                                let for_class = tag.clone();
                                let for_click = tag.clone();
                                view! {
                                    <button
                                        class="tag-chip"
                                        class:selected=move || query.with(|q| q.is_tag_selected(&for_class))
                                        on:click=move |_| {
                                            query.update(|q| q.toggle_tag(&for_click));
                                            track(AnalyticsEvent::FilterChange {
                                                page: "faq",
                                                filter: "tag",
                                                value: for_click.clone(),
                                            });
                                        }
                                    >
                                        {format!("#{tag}")}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>

            <Show when=move || !query.with(|q| q.is_default())>
                <div class="active-filters">
                    <span>{move || t(locale.get(), "filter.active")}</span>
                    {move || {
                        query
                            .with(|q| q.active_filters())
                            .into_iter()
                            .map(|chip| {
                                let label = chip_label(&chip, locale.get());
                                view! {
                                    <button
                                        class="active-chip"
                                        on:click=move |_| query.update(|q| q.remove_filter(&chip))
                                    >
                                        {label} " ×"
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                    <button class="btn btn-link" on:click=move |_| query.update(|q| q.clear())>
                        {move || t(locale.get(), "filter.clear_all")}
                    </button>
                </div>
            </Show>

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

            <Show
                when=move || !results.with(|v| v.is_empty())
                fallback=move || {
                    view! {
                        <div class="no-results">
                            <h3>{move || t(locale.get(), "filter.no_results")}</h3>
                            <p>{move || t(locale.get(), "filter.no_results_hint")}</p>
                            <button class="btn" on:click=move |_| query.update(|q| q.clear())>
                                {move || t(locale.get(), "filter.clear_all")}
                            </button>
                        </div>
                    }
                }
            >
                <ul class="faq-list">
                    <For
                        each=move || results.with(|v| v.items.clone())
                        key=|faq| faq.id
                        children=move |faq: &'static Faq| {
                            let id = faq.id;
                            let is_open = move || open_item.get() == Some(id);
                            view! {
                                <li class="faq-item" class:open=is_open>
                                    <button
                                        class="faq-question"
                                        aria-expanded=move || is_open().to_string()
                                        on:click=move |_| {
                                            open_item.update(|open| {
                                                *open = if *open == Some(id) { None } else { Some(id) };
                                            })
                                        }
                                    >
                                        {move || faq.question.get(locale.get()).to_string()}
                                    </button>
                                    <Show when=is_open>
                                        <div class="faq-answer">
                                            <p>{move || faq.answer.get(locale.get()).to_string()}</p>
                                            <span class="badge">{move || faq.category.label(locale.get())}</span>
                                        </div>
                                    </Show>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_labels() {
        assert_eq!(chip_label(&ActiveFilter::Tag("fees".into()), Locale::En), "#fees");
        assert_eq!(
            chip_label(&ActiveFilter::Search("  laptop ".into()), Locale::En),
            "\u{201c}laptop\u{201d}"
        );
        assert_eq!(
            chip_label(&ActiveFilter::Category(FaqCategory::Payment), Locale::En),
            FaqCategory::Payment.label(Locale::En)
        );
    }
}
