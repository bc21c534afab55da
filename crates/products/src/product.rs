use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use catalog_core::{AggregateRoot, DomainError, DomainResult};

use crate::change_tracker::{ChangeTracker, ProductField};
use crate::discount::Discount;
use crate::event::{
    DiscountApplied, DiscountRemoved, ProductActivated, ProductArchived, ProductCreated,
    ProductDeactivated, ProductEvent, ProductUpdated,
};
use crate::money::Money;

/// Product identifier (caller-supplied, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidProductId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product status lifecycle.
///
/// `Inactive ⇄ Active`, and either can move to the terminal `Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Inactive,
    Active,
    Archived,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Inactive => "inactive",
            ProductStatus::Active => "active",
            ProductStatus::Archived => "archived",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(ProductStatus::Inactive),
            "active" => Ok(ProductStatus::Active),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(format!("unknown product status '{other}'")),
        }
    }
}

/// Stored state used to rebuild a `Product` without replaying history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price: Money,
    pub discount: Option<Discount>,
    pub status: ProductStatus,
    pub archived_at: Option<DateTime<Utc>>,
}

/// Aggregate root: Product.
///
/// All state changes go through the operations below. Each one either fails
/// before touching anything, or applies its change, marks the changed fields
/// dirty and records exactly one event. Operations that would not change
/// anything are no-ops: no dirty marks, no events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    category: String,
    base_price: Money,
    discount: Option<Discount>,
    status: ProductStatus,
    archived_at: Option<DateTime<Utc>>,

    changes: ChangeTracker,
    events: Vec<ProductEvent>,
}

impl Product {
    /// Create a brand-new product.
    ///
    /// Starts `Inactive`, records `ProductCreated`, and marks every initial
    /// field dirty.
    pub fn create(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        base_price: Money,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let id = ProductId::parse(id)?;
        let name = name.into();
        let description = description.into();
        let category = category.into();
        validate_name(&name)?;
        validate_category(&category)?;

        let mut product = Self {
            id,
            name,
            description,
            category,
            base_price,
            discount: None,
            status: ProductStatus::Inactive,
            archived_at: None,
            changes: ChangeTracker::new(),
            events: Vec::new(),
        };

        for field in [
            ProductField::Name,
            ProductField::Description,
            ProductField::Category,
            ProductField::Status,
        ] {
            product.changes.mark_dirty(field);
        }

        product.record(ProductEvent::ProductCreated(ProductCreated {
            product_id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            base_price: product.base_price.to_string(),
            occurred_at: now,
        }));

        Ok(product)
    }

    /// Rebuild from storage: clean tracker, empty event buffer.
    pub fn hydrate(snapshot: ProductSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            description: snapshot.description,
            category: snapshot.category,
            base_price: snapshot.base_price,
            discount: snapshot.discount,
            status: snapshot.status,
            archived_at: snapshot.archived_at,
            changes: ChangeTracker::new(),
            events: Vec::new(),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn base_price(&self) -> &Money {
        &self.base_price
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    pub fn is_archived(&self) -> bool {
        self.status == ProductStatus::Archived
    }

    pub fn update_details(
        &mut self,
        name: &str,
        description: &str,
        category: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        validate_name(name)?;
        validate_category(category)?;
        self.ensure_not_archived()?;

        let mut changed = false;
        if self.name != name {
            self.name = name.to_string();
            self.changes.mark_dirty(ProductField::Name);
            changed = true;
        }
        if self.description != description {
            self.description = description.to_string();
            self.changes.mark_dirty(ProductField::Description);
            changed = true;
        }
        if self.category != category {
            self.category = category.to_string();
            self.changes.mark_dirty(ProductField::Category);
            changed = true;
        }

        if changed {
            self.record(ProductEvent::ProductUpdated(ProductUpdated {
                product_id: self.id.to_string(),
                name: self.name.clone(),
                description: self.description.clone(),
                category: self.category.clone(),
                occurred_at: now,
            }));
        }
        Ok(())
    }

    pub fn activate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_not_archived()?;
        if self.status == ProductStatus::Active {
            return Ok(());
        }

        self.status = ProductStatus::Active;
        self.changes.mark_dirty(ProductField::Status);
        self.record(ProductEvent::ProductActivated(ProductActivated {
            product_id: self.id.to_string(),
            occurred_at: now,
        }));
        Ok(())
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_not_archived()?;
        if self.status == ProductStatus::Inactive {
            return Ok(());
        }

        self.status = ProductStatus::Inactive;
        self.changes.mark_dirty(ProductField::Status);
        self.record(ProductEvent::ProductDeactivated(ProductDeactivated {
            product_id: self.id.to_string(),
            occurred_at: now,
        }));
        Ok(())
    }

    /// Attach `discount`, replacing the current one.
    ///
    /// Checks, in order: product is active, a discount was given, it is valid
    /// at `now`, and it does not overlap the discount already attached.
    pub fn apply_discount(
        &mut self,
        discount: Option<Discount>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != ProductStatus::Active {
            return Err(DomainError::ProductNotActive);
        }
        let discount = discount.ok_or(DomainError::InvalidDiscountPercent)?;
        if !discount.is_valid_at(now) {
            return Err(DomainError::InvalidDiscountPeriod);
        }
        if let Some(existing) = &self.discount {
            if existing.overlaps(&discount) {
                return Err(DomainError::DiscountOverlaps);
            }
        }

        let event = DiscountApplied {
            product_id: self.id.to_string(),
            percent: discount.percent().to_string(),
            start: discount.start(),
            end: discount.end(),
            occurred_at: now,
        };
        self.discount = Some(discount);
        self.changes.mark_dirty(ProductField::Discount);
        self.record(ProductEvent::DiscountApplied(event));
        Ok(())
    }

    pub fn remove_discount(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_not_archived()?;
        if self.discount.take().is_none() {
            return Ok(());
        }

        self.changes.mark_dirty(ProductField::Discount);
        self.record(ProductEvent::DiscountRemoved(DiscountRemoved {
            product_id: self.id.to_string(),
            occurred_at: now,
        }));
        Ok(())
    }

    /// Terminal transition. Archiving twice is a no-op.
    ///
    /// Any attached discount stays as stored; it no longer matters once the
    /// product is frozen.
    pub fn archive(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.is_archived() {
            return Ok(());
        }

        self.status = ProductStatus::Archived;
        self.archived_at = Some(now);
        self.changes.mark_dirty(ProductField::Status);
        self.changes.mark_dirty(ProductField::ArchivedAt);
        self.record(ProductEvent::ProductArchived(ProductArchived {
            product_id: self.id.to_string(),
            occurred_at: now,
        }));
        Ok(())
    }

    fn ensure_not_archived(&self) -> DomainResult<()> {
        if self.is_archived() {
            return Err(DomainError::ProductArchived);
        }
        Ok(())
    }

    fn record(&mut self, event: ProductEvent) {
        self.events.push(event);
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;
    type Event = ProductEvent;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn domain_events(&self) -> Vec<Self::Event> {
        self.events.clone()
    }

    fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::InvalidProductName);
    }
    Ok(())
}

fn validate_category(category: &str) -> DomainResult<()> {
    if category.is_empty() {
        return Err(DomainError::InvalidCategory);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_events::DomainEvent;
    use chrono::{Duration, TimeZone};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap()
    }

    fn price(n: i64) -> Money {
        Money::from_fraction(n, 1).unwrap()
    }

    fn pct(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn new_product() -> Product {
        Product::create("p1", "name", "desc", "cat", price(100), now()).unwrap()
    }

    fn clean(status: ProductStatus) -> Product {
        Product::hydrate(ProductSnapshot {
            id: ProductId::parse("p1").unwrap(),
            name: "name".to_string(),
            description: "desc".to_string(),
            category: "cat".to_string(),
            base_price: price(100),
            discount: None,
            status,
            archived_at: None,
        })
    }

    fn discount(percent: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> Discount {
        Discount::new(pct(percent), start, end).unwrap()
    }

    fn event_types(p: &Product) -> Vec<&'static str> {
        p.domain_events().iter().map(|e| e.event_type()).collect()
    }

    #[test]
    fn create_starts_inactive_with_one_created_event() {
        let p = new_product();
        assert_eq!(p.status(), ProductStatus::Inactive);
        assert_eq!(event_types(&p), vec!["product.created"]);
        assert_eq!(p.domain_events()[0].aggregate_id(), "p1");

        for field in [
            ProductField::Name,
            ProductField::Description,
            ProductField::Category,
            ProductField::Status,
        ] {
            assert!(p.changes().is_dirty(field), "{field:?} should be dirty");
        }
        assert!(!p.changes().is_dirty(ProductField::Discount));
    }

    #[test]
    fn create_validates_in_order() {
        assert_eq!(
            Product::create("", "", "", "", price(1), now()).unwrap_err(),
            DomainError::InvalidProductId
        );
        assert_eq!(
            Product::create("p1", "", "", "", price(1), now()).unwrap_err(),
            DomainError::InvalidProductName
        );
        assert_eq!(
            Product::create("p1", "n", "", "", price(1), now()).unwrap_err(),
            DomainError::InvalidCategory
        );
        assert!(Product::create("p1", "n", "", "c", price(0), now()).is_ok());
    }

    #[test]
    fn whitespace_only_details_are_not_empty() {
        let mut p = Product::create(" ", "  ", "", " ", price(1), now()).unwrap();
        assert_eq!(p.id().as_str(), " ");
        assert_eq!(p.name(), "  ");
        assert_eq!(p.category(), " ");

        p.clear_domain_events();
        p.update_details("\t", "", "  ", now()).unwrap();
        assert_eq!(p.name(), "\t");
        assert_eq!(p.category(), "  ");
        assert_eq!(event_types(&p), vec!["product.updated"]);
    }

    #[test]
    fn hydrate_is_a_clean_snapshot() {
        let p = clean(ProductStatus::Active);
        assert!(p.changes().is_empty());
        assert!(p.domain_events().is_empty());
    }

    #[test]
    fn update_details_marks_only_changed_fields() {
        let mut p = clean(ProductStatus::Inactive);
        p.update_details("new name", "desc", "cat", now()).unwrap();

        assert!(p.changes().is_dirty(ProductField::Name));
        assert!(!p.changes().is_dirty(ProductField::Description));
        assert!(!p.changes().is_dirty(ProductField::Category));
        assert_eq!(event_types(&p), vec!["product.updated"]);
        assert_eq!(p.name(), "new name");
    }

    #[test]
    fn update_details_with_same_values_is_a_no_op() {
        let mut p = clean(ProductStatus::Inactive);
        p.update_details("name", "desc", "cat", now()).unwrap();
        assert!(p.changes().is_empty());
        assert!(p.domain_events().is_empty());
    }

    #[test]
    fn update_details_rejects_empty_name_or_category_without_side_effects() {
        let mut p = clean(ProductStatus::Inactive);
        assert_eq!(
            p.update_details("", "other", "cat", now()),
            Err(DomainError::InvalidProductName)
        );
        assert_eq!(
            p.update_details("n", "other", "", now()),
            Err(DomainError::InvalidCategory)
        );
        assert_eq!(p.description(), "desc");
        assert!(p.changes().is_empty());
        assert!(p.domain_events().is_empty());
    }

    #[test]
    fn activate_and_deactivate_are_idempotent() {
        let mut p = clean(ProductStatus::Inactive);
        p.deactivate(now()).unwrap();
        assert!(p.changes().is_empty());

        p.activate(now()).unwrap();
        p.activate(now()).unwrap();
        assert_eq!(p.status(), ProductStatus::Active);
        assert_eq!(event_types(&p), vec!["product.activated"]);

        p.deactivate(now()).unwrap();
        assert_eq!(p.status(), ProductStatus::Inactive);
        assert_eq!(event_types(&p), vec!["product.activated", "product.deactivated"]);
        assert!(p.changes().is_dirty(ProductField::Status));
    }

    #[test]
    fn apply_discount_requires_active_product() {
        let mut p = new_product();
        let d = discount(10, now() - Duration::minutes(1), now() + Duration::hours(1));
        assert_eq!(p.apply_discount(Some(d), now()), Err(DomainError::ProductNotActive));
        assert_eq!(event_types(&p), vec!["product.created"]);
        assert!(p.discount().is_none());
    }

    #[test]
    fn apply_discount_requires_a_discount() {
        let mut p = clean(ProductStatus::Active);
        assert_eq!(p.apply_discount(None, now()), Err(DomainError::InvalidDiscountPercent));
    }

    #[test]
    fn apply_discount_must_be_valid_now() {
        let mut p = clean(ProductStatus::Active);
        let future = discount(10, now() + Duration::hours(1), now() + Duration::hours(2));
        assert_eq!(p.apply_discount(Some(future), now()), Err(DomainError::InvalidDiscountPeriod));

        let elapsed = discount(10, now() - Duration::hours(2), now());
        assert_eq!(p.apply_discount(Some(elapsed), now()), Err(DomainError::InvalidDiscountPeriod));
        assert!(p.changes().is_empty());
    }

    #[test]
    fn apply_discount_success_marks_and_records() {
        let mut p = clean(ProductStatus::Active);
        let d = discount(50, now() - Duration::hours(1), now() + Duration::hours(24));
        p.apply_discount(Some(d.clone()), now()).unwrap();

        assert_eq!(p.discount(), Some(&d));
        assert!(p.changes().is_dirty(ProductField::Discount));
        assert_eq!(event_types(&p), vec!["discount.applied"]);
    }

    #[test]
    fn overlapping_discount_is_rejected_and_existing_kept() {
        let mut p = clean(ProductStatus::Active);
        let first = discount(50, now() - Duration::hours(1), now() + Duration::hours(24));
        p.apply_discount(Some(first.clone()), now()).unwrap();

        let second = discount(20, now(), now() + Duration::hours(2));
        assert_eq!(p.apply_discount(Some(second), now()), Err(DomainError::DiscountOverlaps));
        assert_eq!(p.discount(), Some(&first));
        assert_eq!(p.domain_events().len(), 1);
    }

    #[test]
    fn elapsed_discount_is_replaced_by_a_disjoint_one() {
        let elapsed = discount(50, now() - Duration::hours(3), now() - Duration::hours(1));
        let mut p = Product::hydrate(ProductSnapshot {
            discount: Some(elapsed),
            ..snapshot_of(&clean(ProductStatus::Active))
        });

        let next = discount(30, now() - Duration::minutes(5), now() + Duration::hours(1));
        p.apply_discount(Some(next.clone()), now()).unwrap();
        assert_eq!(p.discount(), Some(&next));
        assert!(p.changes().is_dirty(ProductField::Discount));
    }

    fn snapshot_of(p: &Product) -> ProductSnapshot {
        ProductSnapshot {
            id: p.product_id().clone(),
            name: p.name().to_string(),
            description: p.description().to_string(),
            category: p.category().to_string(),
            base_price: p.base_price().clone(),
            discount: p.discount().cloned(),
            status: p.status(),
            archived_at: p.archived_at(),
        }
    }

    #[test]
    fn remove_discount_is_a_no_op_without_one() {
        let mut p = clean(ProductStatus::Active);
        p.remove_discount(now()).unwrap();
        assert!(p.changes().is_empty());
        assert!(p.domain_events().is_empty());

        let d = discount(10, now() - Duration::hours(1), now() + Duration::hours(1));
        p.apply_discount(Some(d), now()).unwrap();
        p.clear_domain_events();
        p.remove_discount(now()).unwrap();
        assert!(p.discount().is_none());
        assert_eq!(event_types(&p), vec!["discount.removed"]);
    }

    #[test]
    fn archive_freezes_the_product() {
        let mut p = clean(ProductStatus::Active);
        p.archive(now()).unwrap();
        assert_eq!(p.status(), ProductStatus::Archived);
        assert_eq!(p.archived_at(), Some(now()));
        assert!(p.changes().is_dirty(ProductField::Status));
        assert!(p.changes().is_dirty(ProductField::ArchivedAt));
        assert_eq!(event_types(&p), vec!["product.archived"]);

        p.archive(now()).unwrap();
        assert_eq!(p.domain_events().len(), 1);

        assert_eq!(p.activate(now()), Err(DomainError::ProductArchived));
        assert_eq!(p.deactivate(now()), Err(DomainError::ProductArchived));
        assert_eq!(p.update_details("x", "y", "z", now()), Err(DomainError::ProductArchived));
        assert_eq!(p.remove_discount(now()), Err(DomainError::ProductArchived));
        let d = discount(10, now() - Duration::hours(1), now() + Duration::hours(1));
        assert_eq!(p.apply_discount(Some(d), now()), Err(DomainError::ProductNotActive));
        assert_eq!(p.domain_events().len(), 1);
    }

    #[test]
    fn domain_events_is_a_snapshot() {
        let mut p = new_product();
        let snapshot = p.domain_events();
        p.activate(now()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(p.domain_events().len(), 2);

        p.clear_domain_events();
        assert!(p.domain_events().is_empty());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn status_round_trips_through_its_storage_name() {
        for status in [ProductStatus::Inactive, ProductStatus::Active, ProductStatus::Archived] {
            assert_eq!(status.as_str().parse::<ProductStatus>(), Ok(status));
        }
        assert!("deleted".parse::<ProductStatus>().is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: re-applying the current details never marks or records anything.
            #[test]
            fn identical_update_is_idempotent(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                description in "[A-Za-z0-9 ]{0,80}",
                category in "[a-z]{1,20}"
            ) {
                let mut p = Product::hydrate(ProductSnapshot {
                    name: name.clone(),
                    description: description.clone(),
                    category: category.clone(),
                    ..snapshot_of(&clean(ProductStatus::Inactive))
                });
                p.update_details(&name, &description, &category, now()).unwrap();
                prop_assert!(p.changes().is_empty());
                prop_assert!(p.domain_events().is_empty());
            }

            /// Property: every discount is valid at its start and invalid at its end.
            #[test]
            fn discount_window_is_half_open(
                percent in 1i64..=100,
                offset_secs in -1_000_000i64..1_000_000,
                length_secs in 1i64..10_000_000
            ) {
                let start = now() + Duration::seconds(offset_secs);
                let end = start + Duration::seconds(length_secs);
                let d = discount(percent, start, end);
                prop_assert!(d.is_valid_at(start));
                prop_assert!(!d.is_valid_at(end));
            }

            /// Property: a failed discount on an inactive product changes nothing.
            #[test]
            fn inactive_product_never_takes_a_discount(percent in 1i64..=100) {
                let mut p = clean(ProductStatus::Inactive);
                let d = discount(percent, now() - Duration::hours(1), now() + Duration::hours(1));
                prop_assert_eq!(p.apply_discount(Some(d), now()), Err(DomainError::ProductNotActive));
                prop_assert!(p.changes().is_empty());
                prop_assert!(p.domain_events().is_empty());
            }
        }
    }
}
