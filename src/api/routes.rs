use axum::routing::{get, post};
use axum::Router;

use super::{content, forms, shells, site};
use crate::app::AppState;
use crate::auth::demo_auth;

/// JSON API, demo auth and the locale redirect. Leptos page routes and
/// static files are added on top of this in `main`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::root_redirect_handler))
        .route("/healthz", get(site::healthz_handler))
        // Content
        .route("/api/v1/faqs", get(content::faqs_handler))
        .route("/api/v1/programs", get(content::programs_handler))
        .route("/api/v1/programs/{id}", get(content::program_handler))
        .route("/api/v1/blog", get(content::blog_handler))
        .route("/api/v1/blog/{slug}", get(content::blog_post_handler))
        .route("/api/v1/instructors", get(content::instructors_handler))
        .route("/api/v1/testimonials", get(content::testimonials_handler))
        .route("/api/v1/gallery", get(content::gallery_handler))
        // Forms
        .route("/api/v1/forms", post(forms::submit_form_handler))
        // Shells
        .route("/api/v1/admin/dashboard", get(shells::dashboard_handler))
        .route("/api/v1/portal", get(shells::portal_handler))
        // Demo auth
        .route("/api/auth/login", post(demo_auth::login_handler))
        .route("/api/auth/me", get(demo_auth::me_handler))
        .route("/api/auth/logout", post(demo_auth::logout_handler))
}
