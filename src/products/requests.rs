//! Request DTOs for product API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

use super::models::{NewProduct, ProductPatch};

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

/// Query parameters for product listing
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl ListProductsQuery {
    /// (offset, limit) clamped to sane bounds
    pub fn bounds(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(1, MAX_LIMIT))
    }
}

/// Request to create a product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub product_id: Option<i32>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock_available: i32,
    #[serde(default)]
    pub units_sold: i32,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub customer_rating: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub demand_forecast: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub optimized_price: Option<Decimal>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = AppError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        Ok(NewProduct {
            product_id: req.product_id,
            name: name.to_string(),
            description: req.description,
            cost_price: req.cost_price,
            selling_price: req.selling_price,
            category: req.category,
            stock_available: req.stock_available,
            units_sold: req.units_sold,
            customer_rating: req.customer_rating,
            demand_forecast: req.demand_forecast,
            optimized_price: req.optimized_price,
        })
    }
}

/// Request to partially update a product.
///
/// Every field distinguishes "absent" (`None`) from "sent as null"
/// (`Some(None)`), so the set of changed fields is explicit.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_decimal")]
    pub cost_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present_decimal")]
    pub selling_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub stock_available: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub units_sold: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present_decimal")]
    pub customer_rating: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present_decimal")]
    pub demand_forecast: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "present_decimal")]
    pub optimized_price: Option<Option<Decimal>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present_decimal<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    rust_decimal::serde::float_option::deserialize(deserializer).map(Some)
}

/// Required columns may be omitted from an update but never nulled
fn required<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, AppError> {
    match value {
        None => Ok(None),
        Some(Some(v)) => Ok(Some(v)),
        Some(None) => Err(AppError::Validation(format!("{} cannot be null", field))),
    }
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = AppError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        let name = required("name", req.name)?.map(|n| n.trim().to_string());
        if name.as_deref() == Some("") {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }

        Ok(ProductPatch {
            name,
            description: req.description,
            cost_price: required("cost_price", req.cost_price)?,
            selling_price: required("selling_price", req.selling_price)?,
            category: req.category,
            stock_available: required("stock_available", req.stock_available)?,
            units_sold: required("units_sold", req.units_sold)?,
            customer_rating: req.customer_rating,
            demand_forecast: req.demand_forecast,
            optimized_price: req.optimized_price,
        })
    }
}
