use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_events::DomainEvent;

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Rational form, e.g. `"1999/100"`.
    pub base_price: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated (carries the post-update details).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductActivated {
    pub product_id: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeactivated {
    pub product_id: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductArchived {
    pub product_id: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DiscountApplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountApplied {
    pub product_id: String,
    /// Rational form, e.g. `"25"` or `"25/2"`.
    pub percent: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRemoved {
    pub product_id: String,
    pub occurred_at: DateTime<Utc>,
}

/// Facts recorded by the `Product` aggregate.
///
/// Serializes as the bare variant body: the event type travels separately in
/// the outbox row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProductEvent {
    ProductCreated(ProductCreated),
    ProductUpdated(ProductUpdated),
    ProductActivated(ProductActivated),
    ProductDeactivated(ProductDeactivated),
    ProductArchived(ProductArchived),
    DiscountApplied(DiscountApplied),
    DiscountRemoved(DiscountRemoved),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::ProductCreated(_) => "product.created",
            ProductEvent::ProductUpdated(_) => "product.updated",
            ProductEvent::ProductActivated(_) => "product.activated",
            ProductEvent::ProductDeactivated(_) => "product.deactivated",
            ProductEvent::ProductArchived(_) => "product.archived",
            ProductEvent::DiscountApplied(_) => "discount.applied",
            ProductEvent::DiscountRemoved(_) => "discount.removed",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            ProductEvent::ProductCreated(e) => &e.product_id,
            ProductEvent::ProductUpdated(e) => &e.product_id,
            ProductEvent::ProductActivated(e) => &e.product_id,
            ProductEvent::ProductDeactivated(e) => &e.product_id,
            ProductEvent::ProductArchived(e) => &e.product_id,
            ProductEvent::DiscountApplied(e) => &e.product_id,
            ProductEvent::DiscountRemoved(e) => &e.product_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::ProductCreated(e) => e.occurred_at,
            ProductEvent::ProductUpdated(e) => e.occurred_at,
            ProductEvent::ProductActivated(e) => e.occurred_at,
            ProductEvent::ProductDeactivated(e) => e.occurred_at,
            ProductEvent::ProductArchived(e) => e.occurred_at,
            ProductEvent::DiscountApplied(e) => e.occurred_at,
            ProductEvent::DiscountRemoved(e) => e.occurred_at,
        }
    }
}
