//! When derived product fields get recomputed.
//!
//! Create, partial update and explicit optimize each have their own trigger
//! rules. Everything here is pure; `services` wraps it with database access.

use std::collections::BTreeSet;

use crate::pricing::{compute_price, estimate_demand_forecast, price_breakdown, PriceBreakdown};

use super::models::{NewProduct, Product, ProductPatch};

/// A writable product column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProductField {
    Name,
    Description,
    CostPrice,
    SellingPrice,
    Category,
    StockAvailable,
    UnitsSold,
    CustomerRating,
    DemandForecast,
    OptimizedPrice,
}

impl ProductField {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::CostPrice => "cost_price",
            ProductField::SellingPrice => "selling_price",
            ProductField::Category => "category",
            ProductField::StockAvailable => "stock_available",
            ProductField::UnitsSold => "units_sold",
            ProductField::CustomerRating => "customer_rating",
            ProductField::DemandForecast => "demand_forecast",
            ProductField::OptimizedPrice => "optimized_price",
        }
    }
}

/// Fields whose change invalidates `demand_forecast`
pub const FORECAST_INPUTS: [ProductField; 1] = [ProductField::UnitsSold];

/// Fields whose change invalidates `optimized_price`
pub const PRICE_INPUTS: [ProductField; 3] = [
    ProductField::CostPrice,
    ProductField::SellingPrice,
    ProductField::UnitsSold,
];

/// Fields present in an update payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(BTreeSet<ProductField>);

impl ChangeSet {
    pub fn insert(&mut self, field: ProductField) {
        self.0.insert(field);
    }

    pub fn contains(&self, field: ProductField) -> bool {
        self.0.contains(&field)
    }

    pub fn touches_any(&self, fields: &[ProductField]) -> bool {
        fields.iter().any(|f| self.0.contains(f))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductField> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ProductField> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ProductField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fill derived fields for a product being created.
///
/// A caller-supplied forecast is kept. The optimized price is always
/// recomputed, whatever the caller sent.
pub fn prepare_create(mut product: NewProduct) -> NewProduct {
    let snapshot = product.pricing_snapshot();

    if product.demand_forecast.is_none() {
        product.demand_forecast = Some(estimate_demand_forecast(&snapshot));
    }
    let optimized_price = compute_price(&snapshot);
    product.optimized_price = Some(optimized_price);

    tracing::debug!(
        product_id = ?product.product_id,
        %optimized_price,
        "Prepared derived fields for new product"
    );
    product
}

/// Result of applying a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub product: Product,
    pub changes: ChangeSet,
    pub forecast_recomputed: bool,
    pub price_recomputed: bool,
}

/// Apply a partial update, then recompute derived fields from the
/// post-update state.
///
/// Recomputed values replace anything the same patch wrote to
/// `demand_forecast` or `optimized_price`.
pub fn apply_update(mut product: Product, patch: ProductPatch) -> UpdateOutcome {
    let changes = patch.changed_fields();
    patch.apply_to(&mut product);

    let snapshot = product.pricing_snapshot();

    let forecast_recomputed = changes.touches_any(&FORECAST_INPUTS);
    if forecast_recomputed {
        product.demand_forecast = Some(estimate_demand_forecast(&snapshot));
    }

    let price_recomputed = changes.touches_any(&PRICE_INPUTS);
    if price_recomputed {
        product.optimized_price = Some(compute_price(&snapshot));
    }

    tracing::debug!(
        product_id = product.product_id,
        changed = ?changes.iter().map(ProductField::as_str).collect::<Vec<_>>(),
        forecast_recomputed,
        price_recomputed,
        "Applied product update"
    );

    UpdateOutcome {
        product,
        changes,
        forecast_recomputed,
        price_recomputed,
    }
}

/// Recompute `optimized_price` from the product's current state.
pub fn reprice(product: &mut Product) -> PriceBreakdown {
    let breakdown = price_breakdown(&product.pricing_snapshot());
    product.optimized_price = Some(breakdown.optimized_price);
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn stored(units_sold: i32) -> Product {
        Product {
            product_id: 7,
            name: "Widget".to_string(),
            description: None,
            cost_price: dec!(50),
            selling_price: dec!(55),
            category: Some("Tools".to_string()),
            stock_available: 10,
            units_sold,
            customer_rating: Some(dec!(4.5)),
            demand_forecast: Some(Decimal::from(units_sold)),
            optimized_price: Some(dec!(57)),
        }
    }

    fn new_product() -> NewProduct {
        NewProduct {
            product_id: None,
            name: "Gadget".to_string(),
            description: None,
            cost_price: dec!(10),
            selling_price: dec!(10),
            category: None,
            stock_available: 3,
            units_sold: 250,
            customer_rating: None,
            demand_forecast: None,
            optimized_price: None,
        }
    }

    #[test]
    fn test_create_fills_forecast_and_price() {
        let prepared = prepare_create(new_product());
        assert_eq!(prepared.demand_forecast, Some(dec!(250)));
        assert_eq!(prepared.optimized_price, Some(dec!(13.2)));
    }

    #[test]
    fn test_create_keeps_supplied_forecast_but_not_price() {
        let mut product = new_product();
        product.demand_forecast = Some(dec!(999));
        product.optimized_price = Some(dec!(1));

        let prepared = prepare_create(product);
        assert_eq!(prepared.demand_forecast, Some(dec!(999)));
        assert_eq!(prepared.optimized_price, Some(dec!(13.2)));
    }

    #[test]
    fn test_update_units_sold_uses_post_update_state() {
        let patch = ProductPatch {
            units_sold: Some(150),
            ..Default::default()
        };

        let outcome = apply_update(stored(50), patch);
        assert!(outcome.forecast_recomputed);
        assert!(outcome.price_recomputed);
        assert_eq!(outcome.product.units_sold, 150);
        assert_eq!(outcome.product.demand_forecast, Some(dec!(150.0)));
        // base = max(55, 60) = 60, medium band: 60 * 1.05 = 63
        assert_eq!(outcome.product.optimized_price, Some(dec!(63)));
    }

    #[test]
    fn test_update_price_fields_recompute_price_only() {
        let patch = ProductPatch {
            selling_price: Some(dec!(100)),
            ..Default::default()
        };

        let outcome = apply_update(stored(50), patch);
        assert!(!outcome.forecast_recomputed);
        assert!(outcome.price_recomputed);
        assert_eq!(outcome.product.demand_forecast, Some(dec!(50)));
        assert_eq!(outcome.product.optimized_price, Some(dec!(95)));
    }

    #[test]
    fn test_update_recompute_overrides_supplied_derived_values() {
        let patch = ProductPatch {
            cost_price: Some(dec!(100)),
            units_sold: Some(300),
            demand_forecast: Some(Some(dec!(1))),
            optimized_price: Some(Some(dec!(1))),
            ..Default::default()
        };

        let outcome = apply_update(stored(50), patch);
        assert_eq!(outcome.product.demand_forecast, Some(dec!(300)));
        // base = max(55, 120) = 120, high band: 132
        assert_eq!(outcome.product.optimized_price, Some(dec!(132)));
    }

    #[test]
    fn test_update_with_out_of_range_price_saturates() {
        let huge: Decimal = "75000000000000000000000000000".parse().unwrap();
        let patch = ProductPatch {
            selling_price: Some(huge),
            units_sold: Some(250),
            ..Default::default()
        };

        let outcome = apply_update(stored(50), patch);
        assert_eq!(outcome.product.optimized_price, Some(Decimal::MAX));
    }

    #[test]
    fn test_update_unrelated_fields_leave_derived_values() {
        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            stock_available: Some(0),
            description: Some(Some("Now with docs".to_string())),
            category: Some(None),
            ..Default::default()
        };

        let before = stored(50);
        let outcome = apply_update(before.clone(), patch);
        assert!(!outcome.forecast_recomputed);
        assert!(!outcome.price_recomputed);
        assert_eq!(outcome.product.name, "Renamed");
        assert_eq!(outcome.product.category, None);
        assert_eq!(outcome.product.description.as_deref(), Some("Now with docs"));
        assert_eq!(outcome.product.demand_forecast, before.demand_forecast);
        assert_eq!(outcome.product.optimized_price, before.optimized_price);
    }

    #[test]
    fn test_update_explicit_derived_override_is_kept_without_triggers() {
        let patch = ProductPatch {
            optimized_price: Some(Some(dec!(42))),
            demand_forecast: Some(None),
            ..Default::default()
        };

        let outcome = apply_update(stored(50), patch);
        assert_eq!(outcome.product.optimized_price, Some(dec!(42)));
        assert_eq!(outcome.product.demand_forecast, None);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let before = stored(120);
        let outcome = apply_update(before.clone(), ProductPatch::default());
        assert!(outcome.changes.is_empty());
        assert_eq!(outcome.product, before);
    }

    #[test]
    fn test_reprice_writes_current_price() {
        let mut product = stored(250);
        product.optimized_price = None;

        let breakdown = reprice(&mut product);
        // base = max(55, 60) = 60, high band: 66
        assert_eq!(breakdown.optimized_price, dec!(66));
        assert_eq!(product.optimized_price, Some(dec!(66)));
    }

    #[test]
    fn test_change_set_collects_fields() {
        let changes: ChangeSet = [ProductField::UnitsSold, ProductField::Name]
            .into_iter()
            .collect();
        assert!(changes.contains(ProductField::UnitsSold));
        assert!(changes.touches_any(&PRICE_INPUTS));
        assert!(!changes.contains(ProductField::CostPrice));
        assert_eq!(
            changes.iter().map(ProductField::as_str).collect::<Vec<_>>(),
            vec!["name", "units_sold"]
        );
    }
}
