//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no shared state.
//! Safe to call concurrently with any (possibly stale) snapshot.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Minimum markup applied to cost when building the base price (20% margin).
pub const MIN_MARGIN_FACTOR: Decimal = dec!(1.20);

/// Units sold at or above which the high demand band applies.
pub const HIGH_DEMAND_UNITS: i32 = 200;

/// Units sold at or above which the medium demand band applies.
pub const MEDIUM_DEMAND_UNITS: i32 = 100;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use price_optimizer::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// The fields of a product the pricing rules read. Everything else is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingSnapshot {
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub units_sold: Option<i32>,
}

impl PricingSnapshot {
    pub fn new(cost_price: Decimal, selling_price: Decimal, units_sold: i32) -> Self {
        Self {
            cost_price: Some(cost_price),
            selling_price: Some(selling_price),
            units_sold: Some(units_sold),
        }
    }

    fn units(&self) -> i32 {
        self.units_sold.unwrap_or(0)
    }
}

/// Demand band derived from units sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandBand {
    /// 200 units or more: +10%
    High,
    /// 100 to 199 units: +5%
    Medium,
    /// Fewer than 100 units: -5%
    Low,
}

impl DemandBand {
    /// Pick the band for a units-sold figure, highest threshold first.
    pub fn for_units(units: i32) -> Self {
        if units >= HIGH_DEMAND_UNITS {
            DemandBand::High
        } else if units >= MEDIUM_DEMAND_UNITS {
            DemandBand::Medium
        } else {
            DemandBand::Low
        }
    }

    pub fn multiplier(self) -> Decimal {
        match self {
            DemandBand::High => dec!(1.10),
            DemandBand::Medium => dec!(1.05),
            DemandBand::Low => dec!(0.95),
        }
    }
}

/// Every intermediate value behind a price recommendation.
///
/// When `fallback` is set, one of the prices was missing and no rule was
/// applied: `base_price`, `band` and `multiplier` are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub base_price: Option<Decimal>,
    pub band: Option<DemandBand>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub multiplier: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub optimized_price: Decimal,
    pub fallback: bool,
}

/// Work out the optimized price and how it was reached.
///
/// 1. `base = max(selling_price, cost_price * 1.20)`
/// 2. pick the demand band from `units_sold` (missing counts as 0)
/// 3. `round(base * multiplier, 2)` with banker's rounding
///
/// Products that leave the `Decimal` range saturate at `Decimal::MAX` /
/// `Decimal::MIN` instead of overflowing.
///
/// If either price is missing, returns the selling price, else the cost
/// price, else zero. Zero prices are skipped in that chain.
pub fn price_breakdown(snapshot: &PricingSnapshot) -> PriceBreakdown {
    let (cost_price, selling_price) = match (snapshot.cost_price, snapshot.selling_price) {
        (Some(cost), Some(selling)) => (cost, selling),
        (cost, selling) => {
            let fallback = selling
                .filter(|p| !p.is_zero())
                .or(cost.filter(|p| !p.is_zero()))
                .unwrap_or(Decimal::ZERO);
            return PriceBreakdown {
                base_price: None,
                band: None,
                multiplier: None,
                optimized_price: fallback,
                fallback: true,
            };
        }
    };

    let base_price = selling_price.max(cost_price.saturating_mul(MIN_MARGIN_FACTOR));
    let band = DemandBand::for_units(snapshot.units());
    let multiplier = band.multiplier();

    PriceBreakdown {
        base_price: Some(base_price),
        band: Some(band),
        multiplier: Some(multiplier),
        optimized_price: round_money(base_price.saturating_mul(multiplier), 2),
        fallback: false,
    }
}

/// Rule-based optimized price for a product snapshot. Never fails.
pub fn compute_price(snapshot: &PricingSnapshot) -> Decimal {
    price_breakdown(snapshot).optimized_price
}

/// Demand forecast for a product snapshot.
///
/// The forecast is defined as units sold (missing counts as 0).
pub fn estimate_demand_forecast(snapshot: &PricingSnapshot) -> Decimal {
    Decimal::from(snapshot.units())
}
