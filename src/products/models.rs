//! Database models for product records.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::pricing::PricingSnapshot;

use super::lifecycle::{ChangeSet, ProductField};

/// Product from the products table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub category: Option<String>,
    pub stock_available: i32,
    pub units_sold: i32,
    pub customer_rating: Option<Decimal>,
    pub demand_forecast: Option<Decimal>,
    pub optimized_price: Option<Decimal>,
}

impl Product {
    /// Fields the pricing engine reads
    pub fn pricing_snapshot(&self) -> PricingSnapshot {
        PricingSnapshot::new(self.cost_price, self.selling_price, self.units_sold)
    }
}

/// A product about to be inserted. `product_id` is assigned by the
/// database when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub category: Option<String>,
    pub stock_available: i32,
    pub units_sold: i32,
    pub customer_rating: Option<Decimal>,
    pub demand_forecast: Option<Decimal>,
    pub optimized_price: Option<Decimal>,
}

impl NewProduct {
    pub fn pricing_snapshot(&self) -> PricingSnapshot {
        PricingSnapshot::new(self.cost_price, self.selling_price, self.units_sold)
    }
}

/// Partial update of a product.
///
/// `None` means the field was not part of the update. For nullable columns
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub category: Option<Option<String>>,
    pub stock_available: Option<i32>,
    pub units_sold: Option<i32>,
    pub customer_rating: Option<Option<Decimal>>,
    pub demand_forecast: Option<Option<Decimal>>,
    pub optimized_price: Option<Option<Decimal>>,
}

impl ProductPatch {
    /// The set of fields this patch writes
    pub fn changed_fields(&self) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let flags = [
            (self.name.is_some(), ProductField::Name),
            (self.description.is_some(), ProductField::Description),
            (self.cost_price.is_some(), ProductField::CostPrice),
            (self.selling_price.is_some(), ProductField::SellingPrice),
            (self.category.is_some(), ProductField::Category),
            (self.stock_available.is_some(), ProductField::StockAvailable),
            (self.units_sold.is_some(), ProductField::UnitsSold),
            (self.customer_rating.is_some(), ProductField::CustomerRating),
            (self.demand_forecast.is_some(), ProductField::DemandForecast),
            (self.optimized_price.is_some(), ProductField::OptimizedPrice),
        ];
        for (present, field) in flags {
            if present {
                changes.insert(field);
            }
        }
        changes
    }

    /// Write every supplied field onto `product`
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(cost_price) = self.cost_price {
            product.cost_price = cost_price;
        }
        if let Some(selling_price) = self.selling_price {
            product.selling_price = selling_price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(stock_available) = self.stock_available {
            product.stock_available = stock_available;
        }
        if let Some(units_sold) = self.units_sold {
            product.units_sold = units_sold;
        }
        if let Some(customer_rating) = self.customer_rating {
            product.customer_rating = customer_rating;
        }
        if let Some(demand_forecast) = self.demand_forecast {
            product.demand_forecast = demand_forecast;
        }
        if let Some(optimized_price) = self.optimized_price {
            product.optimized_price = optimized_price;
        }
    }
}
