pub mod analytics;
pub mod app;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod i18n {
    pub mod locale;
    pub mod messages;
}
pub mod content {
    pub mod models;
    pub mod shells;
    pub mod store;
}
pub mod filter {
    pub mod engine;
    pub mod programs;
}
pub mod forms {
    pub mod schemas;
    pub mod status;
    pub mod validation;
}
#[cfg(feature = "ssr")]
pub mod relay {
    pub mod client;
}
pub mod auth {
    pub mod demo_auth;
    pub mod middleware;
    pub mod models;
}
pub mod rendering {
    pub mod markdown;
}
pub mod components {
    pub mod cards;
    pub mod faq_search;
    pub mod forms;
    pub mod layout;
    pub mod pages;
    pub mod program_filter;
    pub mod shells;
}
#[cfg(feature = "ssr")]
pub mod api {
    pub mod content;
    pub mod errors;
    pub mod forms;
    pub mod routes;
    pub mod shells;
    pub mod site;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
