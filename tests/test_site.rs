mod common;

use axum::http::header;
use serde_json::Value;

#[tokio::test]
async fn healthz_reports_ok() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: Value = server.get("/healthz").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn root_redirects_to_default_locale() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/").await;
    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header(header::LOCATION), "/en/");
}

#[tokio::test]
async fn root_follows_accept_language() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .get("/")
        .add_header(header::ACCEPT_LANGUAGE, "km-KH,km;q=0.9,en;q=0.5")
        .await;
    assert_eq!(response.header(header::LOCATION), "/km/");
}

#[tokio::test]
async fn locale_cookie_beats_accept_language() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .get("/")
        .add_header(header::ACCEPT_LANGUAGE, "en-US")
        .add_header(header::COOKIE, "sala_locale=km")
        .await;
    assert_eq!(response.header(header::LOCATION), "/km/");
}
