use leptos::prelude::*;
use leptos_router::components::{Outlet, A};
use leptos_router::hooks::{use_location, use_params_map};

use crate::analytics::{track, AnalyticsEvent};
use crate::components::forms::NewsletterSignup;
use crate::i18n::locale::{localized_path, switch_locale_path, Locale};
use crate::i18n::messages::t;

/// The locale of the page being rendered, provided by [`LangLayout`].
#[derive(Debug, Clone, Copy)]
pub struct LocaleContext {
    pub locale: Memo<Locale>,
}

/// Current locale; the default locale outside a `/:lang` route.
pub fn use_locale() -> Signal<Locale> {
    match use_context::<LocaleContext>() {
        Some(ctx) => ctx.locale.into(),
        None => Signal::stored(Locale::default()),
    }
}

/// Only the exact codes `en` and `km` are valid path prefixes.
fn locale_from_segment(segment: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|l| l.code() == segment)
}

/// Parent of every localized page: chrome around the matched child route.
#[component]
pub fn LangLayout() -> impl IntoView {
    let params = use_params_map();
    let parsed = Memo::new(move |_| {
        params
            .read()
            .get("lang")
            .and_then(|segment| locale_from_segment(&segment))
    });
    let locale = Memo::new(move |_| parsed.get().unwrap_or_default());
    provide_context(LocaleContext { locale });

    #[cfg(feature = "ssr")]
    remember_locale(parsed.get_untracked());

    let location = use_location();
    Effect::new(move |_| {
        track(AnalyticsEvent::PageView {
            path: location.pathname.get(),
            locale: locale.get(),
        });
    });

    view! {
        <div class="site" lang=move || locale.get().code()>
            <Show
                when=move || parsed.get().is_some()
                fallback=|| view! { <NotFound/> }
            >
                <Nav/>
                <main class="site-main">
                    <Outlet/>
                </main>
                <Footer/>
            </Show>
        </div>
    }
}

/// Store the locale of a server-rendered page in the locale cookie.
#[cfg(feature = "ssr")]
fn remember_locale(locale: Option<Locale>) {
    use axum::http::header::SET_COOKIE;
    use axum::http::HeaderValue;

    let (Some(locale), Some(response)) = (locale, use_context::<leptos_axum::ResponseOptions>())
    else {
        return;
    };
    let cookie = crate::api::site::locale_cookie(locale).to_string();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.append_header(SET_COOKIE, value);
    }
}

const NAV_ITEMS: &[(&str, &str)] = &[
    ("", "nav.home"),
    ("programs", "nav.programs"),
    ("success-stories", "nav.stories"),
    ("blog", "nav.blog"),
    ("gallery", "nav.gallery"),
    ("faq", "nav.faq"),
    ("contact", "nav.contact"),
];

#[component]
pub fn Nav() -> impl IntoView {
    let locale = use_locale();
    let location = use_location();
    let (menu_open, set_menu_open) = signal(false);

    let switch_href = move || switch_locale_path(&location.pathname.get(), locale.get().other());
    let on_switch = move |_| {
        let from = locale.get_untracked();
        track(AnalyticsEvent::LocaleSwitched {
            from,
            to: from.other(),
        });
    };

    view! {
        <header class="top-nav">
            <A href=move || localized_path(locale.get(), "") attr:class="logo">
                {move || t(locale.get(), "site.name")}
            </A>
            <button
                class="menu-toggle"
                aria-label=move || t(locale.get(), "nav.menu")
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>
            <nav class="nav-links" class:open=move || menu_open.get()>
                {NAV_ITEMS
                    .iter()
                    .map(|(rest, key)| {
                        let rest = *rest;
                        let key = *key;
                        view! {
                            <A
                                href=move || localized_path(locale.get(), rest)
                                on:click=move |_| set_menu_open.set(false)
                            >
                                {move || t(locale.get(), key)}
                            </A>
                        }
                    })
                    .collect_view()}
                <A href=move || localized_path(locale.get(), "enroll") attr:class="btn btn-primary">
                    {move || t(locale.get(), "nav.enroll")}
                </A>
                <A href=move || localized_path(locale.get(), "portal") attr:class="nav-portal">
                    {move || t(locale.get(), "nav.portal")}
                </A>
                // Full reload so the server refreshes the locale cookie.
                <a class="locale-switch" href=switch_href rel="external" on:click=on_switch>
                    {move || locale.get().other().native_name()}
                </a>
            </nav>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let locale = use_locale();
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <footer class="site-footer">
            <div class="footer-about">
                <h3>{move || t(locale.get(), "site.name")}</h3>
                <p>{move || t(locale.get(), "footer.tagline")}</p>
                <p>{move || t(locale.get(), "footer.address")}</p>
            </div>
            <div class="footer-newsletter">
                <h3>{move || t(locale.get(), "footer.newsletter")}</h3>
                <NewsletterSignup/>
            </div>
            <p class="copyright">
                "© " {year} " " {move || t(locale.get(), "site.name")} ". "
                {move || t(locale.get(), "footer.rights")}
            </p>
        </footer>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
        response.set_status(axum::http::StatusCode::NOT_FOUND);
    }

    let locale = use_locale();
    view! {
        <section class="not-found">
            <h1>{move || t(locale.get(), "notfound.title")}</h1>
            <p>{move || t(locale.get(), "notfound.body")}</p>
            <a href=move || localized_path(locale.get(), "")>{move || t(locale.get(), "notfound.home")}</a>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_segment_is_exact() {
        assert_eq!(locale_from_segment("km"), Some(Locale::Km));
        assert_eq!(locale_from_segment("en"), Some(Locale::En));
        assert_eq!(locale_from_segment("en-US"), None);
        assert_eq!(locale_from_segment("favicon.ico"), None);
    }

    #[test]
    fn test_nav_keys_are_translated() {
        for (_, key) in NAV_ITEMS {
            assert_ne!(t(Locale::Km, key), *key, "missing translation for {key}");
        }
    }
}
