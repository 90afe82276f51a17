//! Pricing engine.
//!
//! Rule-based optimized price and demand forecast for a product. Pure
//! functions only; the product lifecycle decides when they run.

pub mod calculators;

// Re-export commonly used items
pub use calculators::{
    compute_price, estimate_demand_forecast, price_breakdown, round_money, DemandBand,
    PriceBreakdown, PricingSnapshot,
};
