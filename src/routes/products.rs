//! Product route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::extract::ApiJson;
use crate::error::Result;
use crate::products::requests::{CreateProductRequest, ListProductsQuery, UpdateProductRequest};
use crate::products::responses::{OptimizeResponse, ProductResponse};
use crate::products::{services, NewProduct, ProductPatch};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:product_id", get(detail).put(update).delete(remove))
        .route("/:product_id/optimize", post(optimize))
}

/// Product listing
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let (offset, limit) = query.bounds();
    let products = services::list_products(&state.db, offset, limit).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Single product
pub async fn detail(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = services::get_product(&state.db, &state.cache, product_id).await?;
    Ok(Json(product.into()))
}

/// Create a product
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<Json<ProductResponse>> {
    let product = NewProduct::try_from(body)?;
    let created = services::create_product(&state.db, &state.cache, product).await?;
    Ok(Json(created.into()))
}

/// Partially update a product
pub async fn update(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ApiJson(body): ApiJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    let patch = ProductPatch::try_from(body)?;
    let updated = services::update_product(&state.db, &state.cache, product_id, patch).await?;
    Ok(Json(updated.into()))
}

/// Delete a product
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<StatusCode> {
    services::delete_product(&state.db, &state.cache, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Recompute and store the optimized price
pub async fn optimize(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<OptimizeResponse>> {
    let (product, breakdown) =
        services::optimize_product(&state.db, &state.cache, product_id).await?;

    Ok(Json(OptimizeResponse {
        product_id: product.product_id,
        optimized_price: breakdown.optimized_price,
        breakdown,
    }))
}
