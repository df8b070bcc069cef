pub(crate) mod fixtures;

use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api;
use crate::db;
use crate::core::identity::{CallerIdentity, JwtIdentityProvider};
use crate::core::config::{SecuritySettings, Settings};
use crate::core::security::Claims;
use crate::core::state::AppState;
use crate::db::types::UserRole;
use crate::repositories::memory::MemoryStore;

const TEST_SECRET_KEY: &str = "test-secret";

pub(crate) struct TestContext {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) settings: Settings,
    pub(crate) app: Router,
    _guard: OwnedMutexGuard<()>,
}

impl TestContext {
    pub(crate) fn token_for(&self, caller: &CallerIdentity) -> String {
        bearer_token(caller, &self.settings)
    }
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("ASSESSMENT_ENV", "test");
    std::env::set_var("ASSESSMENT_STRICT_CONFIG", "0");
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::set_var("PROMETHEUS_ENABLED", "0");
    for key in [
        "INBOX_DEFAULT_PAGE_SIZE",
        "INBOX_MAX_PAGE_SIZE",
        "ATTEMPT_RETRY_LIMIT",
        "GRADING_RETRY_LIMIT",
        "API_V1_STR",
        "BACKEND_CORS_ORIGINS",
    ] {
        std::env::remove_var(key);
    }
}

/// Router over a seeded in-memory store, authenticated with real bearer tokens.
pub(crate) async fn setup_test_context() -> TestContext {
    let guard = env_lock().await;
    set_test_env();

    let settings = Settings::load().expect("settings");
    let store = Arc::new(fixtures::seeded_store());
    let app = api::router::router(state_with_store(settings.clone(), store.clone()));

    TestContext { store, settings, app, _guard: guard }
}

/// Migrated pool for the database in `DATABASE_URL`, or `None` when no database is configured.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())?;

    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.expect("connect");
    db::run_migrations(&pool).await.expect("migrations");
    Some(pool)
}

pub(crate) fn memory_state(settings: Settings) -> AppState {
    state_with_store(settings, Arc::new(fixtures::seeded_store()))
}

fn state_with_store(settings: Settings, store: Arc<MemoryStore>) -> AppState {
    let identity = Arc::new(JwtIdentityProvider::new(settings.security().clone()));
    AppState::new(settings, store, identity)
}

/// Signs a token the way the platform's auth service does.
pub(crate) fn mint_token(
    subject: &str,
    name: &str,
    role: UserRole,
    security: &SecuritySettings,
    expires_in: Duration,
) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        name: name.to_string(),
        role,
        exp: (OffsetDateTime::now_utc() + expires_in).unix_timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(security.secret_key.as_bytes()))
        .expect("token")
}

pub(crate) fn bearer_token(caller: &CallerIdentity, settings: &Settings) -> String {
    mint_token(
        &caller.id,
        &caller.display_name,
        caller.role,
        settings.security(),
        Duration::minutes(30),
    )
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
