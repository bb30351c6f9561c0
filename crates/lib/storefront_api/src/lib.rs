//! # storefront_api
//!
//! HTTP API library for Storefront.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use storefront_core::auth::sessions::SessionStore;
use storefront_core::catalog::cache::FeaturedCache;

use crate::config::ApiConfig;
use crate::handlers::{auth, health, products};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Session registry holding the active refresh token per user.
    pub sessions: Arc<dyn SessionStore>,
    /// Cache for the featured-products list.
    pub featured_cache: Arc<RwLock<FeaturedCache>>,
}

/// Run embedded database migrations.
///
/// Delegates to `storefront_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    storefront_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/auth/signup", post(auth::signup_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/refresh-token", post(auth::refresh_handler))
        .route(
            "/api/products/featured",
            get(products::featured_products_handler),
        )
        .route(
            "/api/products/recommendations",
            get(products::recommended_products_handler),
        )
        .route(
            "/api/products/category/{category}",
            get(products::products_by_category_handler),
        );

    // Routes for any authenticated user
    let authenticated = Router::new()
        .route("/api/auth/profile", get(auth::profile_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Catalog management (admin only)
    let admin = Router::new()
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/{id}",
            delete(products::delete_product_handler).patch(products::toggle_featured_handler),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(cors)
        .with_state(state)
}
