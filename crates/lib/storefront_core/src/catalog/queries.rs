//! Product catalog persistence.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::catalog::{ProductRow, ProductSummary};
use crate::uuid::uuidv7;

/// List all products, newest first.
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, name, description, price, image, category, is_featured, created_at, updated_at
        FROM products
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// List products currently flagged as featured, newest first.
pub async fn list_featured_products(pool: &PgPool) -> Result<Vec<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, name, description, price, image, category, is_featured, created_at, updated_at
        FROM products
        WHERE is_featured
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// List products in a category, newest first.
pub async fn list_products_by_category(
    pool: &PgPool,
    category: &str,
) -> Result<Vec<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, name, description, price, image, category, is_featured, created_at, updated_at
        FROM products
        WHERE category = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Pick a random sample of products for the recommendations endpoint.
pub async fn sample_products(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ProductSummary>, sqlx::Error> {
    sqlx::query_as::<_, ProductSummary>(
        r#"
        SELECT id, name, description, image, price
        FROM products
        ORDER BY random()
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Create a new product.
pub async fn create_product(
    pool: &PgPool,
    name: &str,
    description: &str,
    price: f64,
    image: &str,
    category: &str,
) -> Result<ProductRow, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (id, name, description, price, image, category)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, price, image, category, is_featured, created_at, updated_at
        "#,
    )
    .bind(uuidv7())
    .bind(name)
    .bind(description)
    .bind(price)
    .bind(image)
    .bind(category)
    .fetch_one(pool)
    .await
}

/// Delete a product by ID. Returns false if no such product exists.
pub async fn delete_product(pool: &PgPool, product_id: &Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Flip a product's featured flag, returning the updated row.
pub async fn toggle_featured(
    pool: &PgPool,
    product_id: &Uuid,
) -> Result<Option<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET is_featured = NOT is_featured, updated_at = now()
        WHERE id = $1
        RETURNING id, name, description, price, image, category, is_featured, created_at, updated_at
        "#,
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await
}
