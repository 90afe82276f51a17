//! Response DTOs for product API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::PriceBreakdown;

use super::models::Product;

/// Product as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
    pub category: Option<String>,
    pub stock_available: i32,
    pub units_sold: i32,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub customer_rating: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub demand_forecast: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub optimized_price: Option<Decimal>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            name: p.name,
            description: p.description,
            cost_price: p.cost_price,
            selling_price: p.selling_price,
            category: p.category,
            stock_available: p.stock_available,
            units_sold: p.units_sold,
            customer_rating: p.customer_rating,
            demand_forecast: p.demand_forecast,
            optimized_price: p.optimized_price,
        }
    }
}

/// Response for an explicit optimize request
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub product_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub optimized_price: Decimal,
    pub breakdown: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_response_uses_json_numbers() {
        let product = Product {
            product_id: 1,
            name: "Kettle".to_string(),
            description: None,
            cost_price: dec!(10.00),
            selling_price: dec!(12.50),
            category: None,
            stock_available: 4,
            units_sold: 250,
            customer_rating: None,
            demand_forecast: Some(dec!(250)),
            optimized_price: Some(dec!(13.75)),
        };

        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(json["cost_price"], serde_json::json!(10.0));
        assert_eq!(json["selling_price"], serde_json::json!(12.5));
        assert_eq!(json["optimized_price"], serde_json::json!(13.75));
        assert_eq!(json["demand_forecast"], serde_json::json!(250.0));
        assert!(json["customer_rating"].is_null());
    }
}
