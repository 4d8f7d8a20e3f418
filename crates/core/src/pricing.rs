//! Deterministic quote pricing.
//!
//! A quote is priced from three inputs: estimated labor hours, materials cost,
//! and a complexity tier (1 = facile, 2 = medio, 3 = complesso). The hourly rate
//! and profit margin come from configuration, never from literals in the formula.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingConfig {
    pub hourly_rate: Decimal,
    pub profit_margin: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        // Reference deployment: 30 EUR/hour, 20% margin.
        Self { hourly_rate: Decimal::new(30, 0), profit_margin: Decimal::new(12, 1) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub ore_lavoro: Decimal,
    pub materiali_costo: Decimal,
    pub complessita: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub prezzo_preventivato: Decimal,
    pub data: NaiveDate,
}

/// Multiplier for a complexity tier. Unknown tiers deliberately fall back to a
/// neutral 1.0 instead of erroring, keeping the endpoint permissive.
pub fn complexity_factor(tier: i32) -> Decimal {
    match tier {
        1 => Decimal::ONE,
        2 => Decimal::new(12, 1),
        3 => Decimal::new(15, 1),
        _ => Decimal::ONE,
    }
}

/// Price a job: `((hours * hourly_rate) + materials) * complexity * margin`,
/// rounded to 2 decimal places. Pure, no side effects.
pub fn compute_quote(config: &PricingConfig, request: &QuoteRequest) -> Decimal {
    let base = request.ore_lavoro * config.hourly_rate;
    let total = (base + request.materiali_costo)
        * complexity_factor(request.complessita)
        * config.profit_margin;
    total.round_dp(2)
}
