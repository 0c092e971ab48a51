#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use sala::api::routes::api_router;
    use sala::app::{shell, App, AppState};
    use sala::config::SiteConfig;
    use sala::content::store::ContentStore;
    use tower_http::services::{ServeDir, ServeFile};
    use tower_http::trace::TraceLayer;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sala=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Sala Academy site...");

    let site_config = SiteConfig::load()?;
    tracing::info!(
        site = %site_config.site_name,
        default_locale = %site_config.default_locale,
        demo_mode = site_config.demo_mode,
        "Configuration loaded"
    );

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();
    let pkg_dir = format!("{}/{}", site_root, leptos_options.site_pkg_dir);

    // Refuse to start on broken fixtures rather than serve empty pages.
    let content = Arc::new(ContentStore::load_embedded().context("Embedded content is invalid")?);
    tracing::info!(
        programs = content.programs().len(),
        faqs = content.faqs().len(),
        "Content loaded"
    );

    let app_state = AppState {
        content,
        relay: site_config.build_relay()?,
        relay_settings: site_config.relay_settings(),
        default_locale: site_config.default_locale,
        demo_mode: site_config.demo_mode,
        leptos_options: leptos_options.clone(),
    };

    let routes = generate_route_list(App);
    let context_state = app_state.clone();

    let app = api_router()
        // Static assets are routed explicitly so `/{lang}` never shadows them.
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .nest_service("/images", ServeDir::new(format!("{}/images", site_root)))
        .route_service("/favicon.ico", ServeFile::new(format!("{}/favicon.ico", site_root)))
        .route_service("/robots.txt", ServeFile::new(format!("{}/robots.txt", site_root)))
        .leptos_routes_with_context(
            &app_state,
            routes,
            move || provide_context(context_state.clone()),
            {
                let options = leptos_options.clone();
                move || shell(options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// The client bundle has no main; hydration starts from `sala::hydrate`.
#[cfg(not(feature = "ssr"))]
fn main() {}
