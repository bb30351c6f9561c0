//! Product catalog request handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::catalog::queries;
use storefront_core::models::catalog::{Product, ProductSummary};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::services::catalog;

/// Number of products returned by the recommendations endpoint.
const RECOMMENDATION_COUNT: i64 = 3;

/// Request body for `POST /api/products`.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub category: String,
}

/// Response wrapper for the admin product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// `GET /api/products` — all products (admin only).
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ProductListResponse>> {
    let products = queries::list_products(&state.pool)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(Json(ProductListResponse { products }))
}

/// `GET /api/products/featured` — the featured list, cache-first.
pub async fn featured_products_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let products = catalog::featured_products(&state.pool, &state.featured_cache).await?;
    Ok(Json(products))
}

/// `GET /api/products/recommendations` — a random sample of products.
pub async fn recommended_products_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let products = queries::sample_products(&state.pool, RECOMMENDATION_COUNT).await?;
    Ok(Json(products))
}

/// `GET /api/products/category/{category}` — products in one category.
pub async fn products_by_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let products = queries::list_products_by_category(&state.pool, &category)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok(Json(products))
}

/// `POST /api/products` — create a product (admin only).
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    // The products table rejects negative prices; fail before the insert.
    if body.price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }

    let image = body.image.unwrap_or_default();
    let product = queries::create_product(
        &state.pool,
        &body.name,
        &body.description,
        body.price,
        &image,
        &body.category,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// `DELETE /api/products/{id}` — remove a product (admin only).
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = queries::delete_product(&state.pool, &product_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Json(
        serde_json::json!({"message": "Product deleted successfully"}),
    ))
}

/// `PATCH /api/products/{id}` — flip the featured flag (admin only).
///
/// Rebuilds the featured cache so the public list reflects the change
/// immediately.
pub async fn toggle_featured_handler(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = queries::toggle_featured(&state.pool, &product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    catalog::rebuild_featured_cache(&state.pool, &state.featured_cache).await?;

    Ok(Json(product.into()))
}
