#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use ttl_shortener::application::services::{RegistrySettings, ShortcodeRegistry};
use ttl_shortener::domain::clock::ManualClock;
use ttl_shortener::domain::events::EventSink;
use ttl_shortener::infrastructure::logging::NullEventSink;
use ttl_shortener::infrastructure::persistence::InMemoryLinkStore;
use ttl_shortener::routes::{RouterOptions, build_router};
use ttl_shortener::state::AppState;
use ttl_shortener::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "http://localhost:4000";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()
}

/// Application state on an empty in-memory store, driven by `clock`.
pub fn create_test_state(clock: &ManualClock) -> AppState {
    create_test_state_with_sink(clock, Arc::new(NullEventSink::new()))
}

pub fn create_test_state_with_sink(clock: &ManualClock, events: Arc<dyn EventSink>) -> AppState {
    let registry = Arc::new(ShortcodeRegistry::new(
        Arc::new(InMemoryLinkStore::new()),
        Arc::new(RandomCodeGenerator::seeded(6, 42)),
        Arc::new(clock.clone()),
        Arc::clone(&events),
        RegistrySettings::default(),
    ));

    AppState::new(registry, events, BASE_URL)
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub clock: ManualClock,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_options(&RouterOptions::default())
}

pub fn create_test_app_with_options(options: &RouterOptions) -> TestApp {
    let clock = ManualClock::new(start_time());
    let state = create_test_state(&clock);
    let app: Router = build_router(state.clone(), options);

    TestApp {
        server: TestServer::new(app).unwrap(),
        state,
        clock,
    }
}

/// Creates a link directly through the registry.
pub async fn create_test_link(state: &AppState, code: &str, url: &str, validity: Option<i64>) {
    state
        .registry
        .create(url, validity, Some(code))
        .await
        .unwrap();
}
