//! Catalog service. Orchestrates product queries and the featured cache.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use storefront_core::catalog::cache::FeaturedCache;
use storefront_core::catalog::queries;
use storefront_core::models::catalog::Product;

use crate::error::AppResult;

/// Featured products, served from the cache when it is fresh.
pub async fn featured_products(
    pool: &PgPool,
    cache: &Arc<RwLock<FeaturedCache>>,
) -> AppResult<Vec<Product>> {
    if let Some(products) = cache.read().await.get() {
        return Ok(products);
    }

    let products: Vec<Product> = queries::list_featured_products(pool)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    cache.write().await.set(products.clone());
    Ok(products)
}

/// Rebuild the featured cache from the database.
///
/// Called after a featured toggle so the next read already sees the
/// change instead of waiting out the TTL.
pub async fn rebuild_featured_cache(
    pool: &PgPool,
    cache: &Arc<RwLock<FeaturedCache>>,
) -> AppResult<()> {
    let products: Vec<Product> = queries::list_featured_products(pool)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    cache.write().await.set(products);
    Ok(())
}
