//! Database queries for product records.
//!
//! Every function takes its executor explicitly, so the same query runs
//! against the pool or inside a transaction.

use sqlx::{PgExecutor, PgPool};

use crate::error::AppError;

use super::models::{NewProduct, Product};

/// List products ordered by id
pub async fn list_products(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        FROM products
        ORDER BY product_id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

/// Find a product by id
pub async fn find_product<'e, E>(executor: E, product_id: i32) -> Result<Option<Product>, AppError>
where
    E: PgExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        FROM products
        WHERE product_id = $1
        "#,
    )
    .bind(product_id)
    .fetch_optional(executor)
    .await?;

    Ok(product)
}

/// Find a product by id and lock its row until the transaction ends
pub async fn find_product_for_update<'e, E>(
    executor: E,
    product_id: i32,
) -> Result<Option<Product>, AppError>
where
    E: PgExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        FROM products
        WHERE product_id = $1
        FOR UPDATE
        "#,
    )
    .bind(product_id)
    .fetch_optional(executor)
    .await?;

    Ok(product)
}

/// Check whether a product id is taken
pub async fn product_exists<'e, E>(executor: E, product_id: i32) -> Result<bool, AppError>
where
    E: PgExecutor<'e>,
{
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE product_id = $1)")
            .bind(product_id)
            .fetch_one(executor)
            .await?;

    Ok(exists)
}

/// Insert a product, letting the sequence assign the id when none is given
pub async fn insert_product<'e, E>(executor: E, product: &NewProduct) -> Result<Product, AppError>
where
    E: PgExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        )
        VALUES (
            COALESCE($1, nextval(pg_get_serial_sequence('products', 'product_id'))::INTEGER),
            $2, $3, $4, $5, $6, $7, $8, $9, $10, $11
        )
        RETURNING
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        "#,
    )
    .bind(product.product_id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.cost_price)
    .bind(product.selling_price)
    .bind(&product.category)
    .bind(product.stock_available)
    .bind(product.units_sold)
    .bind(product.customer_rating)
    .bind(product.demand_forecast)
    .bind(product.optimized_price)
    .fetch_one(executor)
    .await?;

    Ok(product)
}

/// Move the id sequence past any explicitly inserted ids
pub async fn sync_product_id_sequence<'e, E>(executor: E) -> Result<(), AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        SELECT setval(
            pg_get_serial_sequence('products', 'product_id'),
            GREATEST((SELECT MAX(product_id) FROM products), 1)
        )
        "#,
    )
    .execute(executor)
    .await?;

    Ok(())
}

/// Write every column of a product back to its row
pub async fn update_product<'e, E>(executor: E, product: &Product) -> Result<Product, AppError>
where
    E: PgExecutor<'e>,
{
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products SET
            name = $2,
            description = $3,
            cost_price = $4,
            selling_price = $5,
            category = $6,
            stock_available = $7,
            units_sold = $8,
            customer_rating = $9,
            demand_forecast = $10,
            optimized_price = $11
        WHERE product_id = $1
        RETURNING
            product_id, name, description, cost_price, selling_price,
            category, stock_available, units_sold, customer_rating,
            demand_forecast, optimized_price
        "#,
    )
    .bind(product.product_id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.cost_price)
    .bind(product.selling_price)
    .bind(&product.category)
    .bind(product.stock_available)
    .bind(product.units_sold)
    .bind(product.customer_rating)
    .bind(product.demand_forecast)
    .bind(product.optimized_price)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(product)
}

/// Store a new optimized price
pub async fn update_optimized_price<'e, E>(
    executor: E,
    product_id: i32,
    optimized_price: rust_decimal::Decimal,
) -> Result<bool, AppError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("UPDATE products SET optimized_price = $2 WHERE product_id = $1")
        .bind(product_id)
        .bind(optimized_price)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a product, returning whether a row was removed
pub async fn delete_product(pool: &PgPool, product_id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
