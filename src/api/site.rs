use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::Redirect;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::app::AppState;
use crate::i18n::locale::{localized_path, Locale};

/// Cookie remembering the visitor's last chosen locale.
pub const LOCALE_COOKIE: &str = "sala_locale";

/// The locale a visitor landing on `/` should see.
///
/// An explicit earlier choice (the cookie) beats `Accept-Language`, which
/// beats the configured default.
pub fn preferred_locale(cookie: Option<&str>, accept_language: Option<&str>, fallback: Locale) -> Locale {
    cookie
        .and_then(Locale::from_code)
        .unwrap_or_else(|| Locale::negotiate_or(accept_language, fallback))
}

/// Long-lived cookie storing `locale`.
pub fn locale_cookie(locale: Locale) -> Cookie<'static> {
    Cookie::build((LOCALE_COOKIE, locale.code()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(365))
        .build()
}

/// `GET /` redirects to the home page of the preferred locale.
pub async fn root_redirect_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Redirect {
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let locale = preferred_locale(
        jar.get(LOCALE_COOKIE).map(|c| c.value()),
        accept,
        state.default_locale,
    );
    tracing::debug!(locale = locale.code(), "Redirecting to localized home page");
    Redirect::temporary(&localized_path(locale, ""))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /healthz`
pub async fn healthz_handler() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
