//! Products domain module (change-tracked aggregate).
//!
//! This crate contains business rules for the catalog, implemented purely as
//! deterministic domain logic (no IO, no storage, no ambient clock).

pub mod change_tracker;
pub mod discount;
pub mod event;
pub mod money;
pub mod pricing;
pub mod product;

pub use change_tracker::{ChangeTracker, ProductField};
pub use discount::Discount;
pub use event::{
    DiscountApplied, DiscountRemoved, ProductActivated, ProductArchived, ProductCreated,
    ProductDeactivated, ProductEvent, ProductUpdated,
};
pub use money::Money;
pub use pricing::PricingCalculator;
pub use product::{Product, ProductId, ProductSnapshot, ProductStatus};

/// Exact rational number used for amounts and percentages.
pub type Rational = num_rational::BigRational;
