//! Product service functions with database access.
//!
//! Each mutation loads the row, runs the lifecycle rules on it and writes
//! the result back. The read and the write share one transaction, with
//! the row locked, so a concurrent update cannot slip in between.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::pricing::PriceBreakdown;

use super::lifecycle;
use super::models::{NewProduct, Product, ProductPatch};
use super::queries;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

fn duplicate_id() -> AppError {
    AppError::Conflict("product_id already exists".to_string())
}

/// List a page of products
pub async fn list_products(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<Product>> {
    queries::list_products(pool, offset, limit).await
}

/// Fetch a single product, served from cache when possible
pub async fn get_product(pool: &PgPool, cache: &AppCache, product_id: i32) -> Result<Product> {
    if let Some(cached) = cache.products.get(&product_id).await {
        tracing::debug!("Cache HIT for product: {}", product_id);
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for product: {}", product_id);
    let ticket = cache.read_ticket();
    let product = queries::find_product(pool, product_id)
        .await?
        .ok_or_else(not_found)?;
    cache.fill_product(ticket, Arc::new(product.clone())).await;

    Ok(product)
}

/// Create a product, filling its forecast and optimized price
pub async fn create_product(pool: &PgPool, cache: &AppCache, product: NewProduct) -> Result<Product> {
    let product = lifecycle::prepare_create(product);

    let mut tx = pool.begin().await?;

    if let Some(product_id) = product.product_id {
        if queries::product_exists(&mut *tx, product_id).await? {
            return Err(duplicate_id());
        }
    }

    let created = queries::insert_product(&mut *tx, &product)
        .await
        .map_err(|e| match e {
            AppError::Database(sqlx::Error::Database(db))
                if db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                duplicate_id()
            }
            other => other,
        })?;

    if product.product_id.is_some() {
        queries::sync_product_id_sequence(&mut *tx).await?;
    }

    tx.commit().await?;

    // Drop anything cached under this id before the row existed
    cache.invalidate_product(created.product_id).await;
    info!(
        product_id = created.product_id,
        optimized_price = ?created.optimized_price,
        "Created product"
    );

    Ok(created)
}

/// Apply a partial update and recompute derived fields as needed
pub async fn update_product(
    pool: &PgPool,
    cache: &AppCache,
    product_id: i32,
    patch: ProductPatch,
) -> Result<Product> {
    let mut tx = pool.begin().await?;

    let stored = queries::find_product_for_update(&mut *tx, product_id)
        .await?
        .ok_or_else(not_found)?;

    let outcome = lifecycle::apply_update(stored, patch);
    let updated = if outcome.changes.is_empty() {
        outcome.product
    } else {
        queries::update_product(&mut *tx, &outcome.product).await?
    };

    tx.commit().await?;

    cache.invalidate_product(product_id).await;
    info!(
        product_id,
        forecast_recomputed = outcome.forecast_recomputed,
        price_recomputed = outcome.price_recomputed,
        "Updated product"
    );

    Ok(updated)
}

/// Delete a product outright
pub async fn delete_product(pool: &PgPool, cache: &AppCache, product_id: i32) -> Result<()> {
    if !queries::delete_product(pool, product_id).await? {
        return Err(not_found());
    }

    cache.invalidate_product(product_id).await;
    info!(product_id, "Deleted product");

    Ok(())
}

/// Recompute and store the optimized price from the stored state
pub async fn optimize_product(
    pool: &PgPool,
    cache: &AppCache,
    product_id: i32,
) -> Result<(Product, PriceBreakdown)> {
    let mut tx = pool.begin().await?;

    let mut product = queries::find_product_for_update(&mut *tx, product_id)
        .await?
        .ok_or_else(not_found)?;

    let breakdown = lifecycle::reprice(&mut product);
    if !queries::update_optimized_price(&mut *tx, product_id, breakdown.optimized_price).await? {
        return Err(not_found());
    }

    tx.commit().await?;

    cache.invalidate_product(product_id).await;
    info!(
        product_id,
        optimized_price = %breakdown.optimized_price,
        "Optimized product price"
    );

    Ok((product, breakdown))
}
