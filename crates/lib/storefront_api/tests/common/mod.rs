//! Shared scaffolding for integration tests: an ephemeral PostgreSQL
//! instance with migrations applied, wired into a full router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tower::ServiceExt;

use storefront_api::AppState;
use storefront_api::config::ApiConfig;
use storefront_core::auth::jwt::TokenSecrets;
use storefront_core::auth::sessions::PgSessionStore;
use storefront_core::catalog::cache::FeaturedCache;
use storefront_core::db::{DbError, LocalDbManager};

/// An ephemeral database plus a router wired to it.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    db: LocalDbManager,
}

impl TestApp {
    /// Spin up an ephemeral PostgreSQL instance, run migrations, and
    /// build the router. Returns None (after a note) when PostgreSQL
    /// is not installed, so the suite passes without it.
    pub async fn spawn() -> Option<TestApp> {
        let mut db = match LocalDbManager::ephemeral().await {
            Ok(db) => db,
            Err(DbError::PgConfigNotFound) => {
                eprintln!("skipping: pg_config not found on PATH");
                return None;
            }
            Err(e) => panic!("ephemeral LocalDbManager: {e}"),
        };
        db.setup().await.expect("db setup");
        db.start().await.expect("db start");

        let pool = PgPool::connect(&db.connection_url())
            .await
            .expect("connect to ephemeral PG");

        storefront_api::migrate(&pool).await.expect("migrations");

        let state = AppState {
            pool: pool.clone(),
            config: ApiConfig {
                token_secrets: TokenSecrets {
                    access: "test-access-secret".into(),
                    refresh: "test-refresh-secret".into(),
                },
                secure_cookies: false,
            },
            sessions: Arc::new(PgSessionStore::new(pool.clone())),
            featured_cache: Arc::new(RwLock::new(FeaturedCache::new())),
        };

        Some(TestApp {
            router: storefront_api::router(state),
            pool,
            db,
        })
    }

    /// Close the pool and stop the database.
    pub async fn stop(mut self) {
        self.pool.close().await;
        self.db.stop().await.expect("db stop");
    }
}

/// Send a request through the router.
pub async fn send(router: &Router, req: Request<Body>) -> axum::response::Response {
    router.clone().oneshot(req).await.expect("request")
}

/// Build a JSON POST request carrying the given `name=value` cookies.
pub fn post_json(uri: &str, body: &serde_json::Value, cookies: &[String]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Build a request with no body, carrying the given cookies.
pub fn request(method: &str, uri: &str, cookies: &[String]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    builder.body(Body::empty()).expect("request")
}

/// The `name=value` pair of a cookie set on the response, if any.
pub fn cookie_value(resp: &axum::response::Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&prefix))
        .map(|pair| pair.to_string())
}

/// Read and parse the response body as JSON.
pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}
