use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::layout::{LangLayout, NotFound};
use crate::components::pages::{
    BlogPage, BlogPostPage, ContactPage, EnrollPage, FaqPage, GalleryPage, HomePage,
    ProgramDetailPage, ProgramsPage, SuccessStoriesPage,
};
use crate::components::shells::{AdminPage, LoginPage, PortalPage};

#[cfg(feature = "ssr")]
pub use state::AppState;

#[cfg(feature = "ssr")]
mod state {
    use std::sync::Arc;

    use crate::content::store::ContentStore;
    use crate::i18n::locale::Locale;
    use crate::relay::client::{FormRelay, RelaySettings};

    /// Shared state handed to axum handlers and, through context, to server
    /// functions.
    #[derive(Clone)]
    pub struct AppState {
        pub content: Arc<ContentStore>,
        pub relay: Arc<dyn FormRelay>,
        pub relay_settings: RelaySettings,
        pub default_locale: Locale,
        /// Whether the built-in demo accounts may sign in.
        pub demo_mode: bool,
        pub leptos_options: leptos::prelude::LeptosOptions,
    }

    impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
        fn from_ref(state: &AppState) -> Self {
            state.leptos_options.clone()
        }
    }
}

/// The HTML document every page is rendered into.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/sala.css"/>
        <Title formatter=|text: String| format!("{text} | Sala Academy")/>

        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <ParentRoute path=path!("/:lang") view=LangLayout>
                    <Route path=path!("") view=HomePage/>
                    <Route path=path!("programs") view=ProgramsPage/>
                    <Route path=path!("programs/:id") view=ProgramDetailPage/>
                    <Route path=path!("faq") view=FaqPage/>
                    <Route path=path!("blog") view=BlogPage/>
                    <Route path=path!("blog/:slug") view=BlogPostPage/>
                    <Route path=path!("gallery") view=GalleryPage/>
                    <Route path=path!("success-stories") view=SuccessStoriesPage/>
                    <Route path=path!("contact") view=ContactPage/>
                    <Route path=path!("enroll") view=EnrollPage/>
                    <Route path=path!("login") view=LoginPage/>
                    <Route path=path!("admin") view=AdminPage/>
                    <Route path=path!("portal") view=PortalPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
