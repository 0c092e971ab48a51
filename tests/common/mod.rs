#![allow(dead_code)]

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use url::Url;

use sala::api::routes::api_router;
use sala::app::AppState;
use sala::content::store::ContentStore;
use sala::i18n::locale::Locale;
use sala::relay::client::{HttpFormRelay, RelaySettings};

/// In-process stand-in for the hosted form relay.
///
/// Records every JSON body it receives and answers with a configurable
/// status code.
#[derive(Clone)]
pub struct FakeRelay {
    pub url: Url,
    received: Arc<Mutex<Vec<Value>>>,
    status: Arc<AtomicU16>,
}

#[derive(Clone)]
struct RelayState {
    received: Arc<Mutex<Vec<Value>>>,
    status: Arc<AtomicU16>,
}

async fn record(State(state): State<RelayState>, Json(body): Json<Value>) -> StatusCode {
    state.received.lock().unwrap().push(body);
    StatusCode::from_u16(state.status.load(Ordering::SeqCst)).unwrap()
}

impl FakeRelay {
    pub async fn start() -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let status = Arc::new(AtomicU16::new(200));
        let app = Router::new()
            .route("/f/test", post(record))
            .with_state(RelayState {
                received: received.clone(),
                status: status.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake relay");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{}/f/test", addr)).unwrap(),
            received,
            status,
        }
    }

    /// Make the relay answer every following request with `status`.
    pub fn respond_with(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

/// Router wired to the embedded content and a fake relay.
pub struct TestEnv {
    pub router: Router,
    pub relay: FakeRelay,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::start_with(true).await
    }

    pub async fn start_with(demo_mode: bool) -> Self {
        let relay = FakeRelay::start().await;
        let http_relay = HttpFormRelay::new(relay.url.clone(), Duration::from_secs(5))
            .expect("Failed to build relay client");

        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("sala")
            .build();

        let app_state = AppState {
            content: Arc::new(ContentStore::load_embedded().expect("Embedded content is invalid")),
            relay: Arc::new(http_relay),
            relay_settings: RelaySettings::default(),
            default_locale: Locale::En,
            demo_mode,
            leptos_options,
        };

        // API routes only, no Leptos SSR
        let router = api_router().with_state(app_state);

        Self { router, relay }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Helper: sign in with one of the demo accounts.
    pub async fn login(&self, server: &axum_test::TestServer, username: &str) -> axum_test::TestResponse {
        server
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": username
            }))
            .await
    }
}
