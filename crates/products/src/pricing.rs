//! Effective (post-discount) price.

use chrono::{DateTime, Utc};

use crate::discount::Discount;
use crate::money::Money;
use crate::product::Product;

/// Stateless price calculator; safe to share across threads.
#[derive(Debug, Default, Copy, Clone)]
pub struct PricingCalculator;

impl PricingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Base price minus any discount valid at `now`.
    pub fn effective_price(&self, product: &Product, now: DateTime<Utc>) -> Money {
        Self::price_with(product.base_price(), product.discount(), now)
    }

    /// Same rule for callers holding the parts rather than a `Product`.
    pub fn price_with(base: &Money, discount: Option<&Discount>, now: DateTime<Utc>) -> Money {
        match discount {
            Some(d) if d.is_valid_at(now) => d.apply_to(base),
            _ => base.clone(),
        }
    }
}
