//! Integration tests for the full command pipeline.
//!
//! Tests: Interactor → Plan → InMemoryDatabase → Outbox relay → EventBus,
//! plus the read model over the same tables.
//!
//! Verifies:
//! - State changes and their outbox rows are committed together
//! - Rejected operations never reach the committer
//! - Effective prices are exact

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use catalog_core::{DomainError, FixedClock};
    use catalog_events::EventBus;
    use catalog_products::{Money, PricingCalculator, ProductStatus};

    use crate::app::CatalogApp;
    use crate::config::CatalogConfig;
    use crate::contracts::{ListProductsFilter, ProductRepository};
    use crate::repo::StoreProductRepository;
    use crate::store::Table;
    use crate::usecases::testing::{Harness, t0};
    use crate::usecases::{
        ActivateProductRequest, ApplyDiscountInteractor, ApplyDiscountRequest, ArchiveProductRequest,
        CreateProductRequest, UseCaseError,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
    }

    fn setup() -> (CatalogApp, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(now()));
        (CatalogApp::in_memory(CatalogConfig::default(), clock.clone()), clock)
    }

    fn create_request(id: &str) -> CreateProductRequest {
        CreateProductRequest {
            id: Some(id.to_string()),
            name: "Kettle".into(),
            description: "1.7L electric kettle".into(),
            category: "kitchen".into(),
            base_price_numerator: 100,
            base_price_denominator: 1,
        }
    }

    fn discount(id: &str, percent: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> ApplyDiscountRequest {
        ApplyDiscountRequest {
            product_id: id.to_string(),
            percent_numerator: percent,
            percent_denominator: 1,
            start,
            end,
        }
    }

    fn outbox_event_types(app: &CatalogApp) -> Vec<String> {
        app.db
            .scan(Table::OutboxEvents)
            .unwrap()
            .iter()
            .map(|row| row["event_type"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn created_product_is_inactive_with_one_created_event() {
        let (app, _) = setup();

        let id = app.create_product.execute(create_request("k1")).await.unwrap();

        let dto = app.get_product.execute(&id).await.unwrap();
        assert_eq!(dto.status, "inactive");
        assert_eq!((dto.base_price_numerator, dto.base_price_denominator), (100, 1));
        assert_eq!(outbox_event_types(&app), vec!["product.created"]);
    }

    #[tokio::test]
    async fn activated_product_takes_a_half_price_discount() {
        let (app, clock) = setup();
        app.create_product.execute(create_request("k1")).await.unwrap();
        app.activate_product
            .execute(ActivateProductRequest { product_id: "k1".into() })
            .await
            .unwrap();
        app.apply_discount
            .execute(discount("k1", 50, now() - Duration::hours(1), now() + Duration::hours(24)))
            .await
            .unwrap();

        let dto = app.get_product.execute("k1").await.unwrap();
        assert_eq!((dto.effective_price_numerator, dto.effective_price_denominator), (50, 1));
        assert_eq!(dto.discount_percent.as_deref(), Some("50.00"));

        let repo = StoreProductRepository::new(app.db.clone(), clock.clone());
        let stored = repo.get_by_id("k1").await.unwrap();
        assert_eq!(
            PricingCalculator::new().effective_price(&stored, now()),
            Money::from_fraction(50, 1).unwrap()
        );

        // Window elapsed: back to base price.
        clock.advance(Duration::hours(24));
        let dto = app.get_product.execute("k1").await.unwrap();
        assert_eq!((dto.effective_price_numerator, dto.effective_price_denominator), (100, 1));
        assert_eq!(dto.discount_percent, None);

        assert_eq!(
            outbox_event_types(&app),
            vec!["product.created", "product.activated", "discount.applied"]
        );
    }

    #[tokio::test]
    async fn discount_on_never_activated_product_never_commits() {
        let h = Harness::new();
        let product = catalog_products::Product::create(
            "k1",
            "Kettle",
            "",
            "kitchen",
            Money::from_fraction(100, 1).unwrap(),
            t0(),
        )
        .unwrap();
        h.seed(&product).await;

        let err = ApplyDiscountInteractor::new(h.deps.clone())
            .execute(discount("k1", 50, t0() - Duration::hours(1), t0() + Duration::hours(24)))
            .await
            .unwrap_err();

        assert_eq!(err, UseCaseError::Domain(DomainError::ProductNotActive));
        assert_eq!(h.committer.calls(), 0);
        assert!(h.outbox_types().is_empty());
    }

    #[tokio::test]
    async fn overlapping_discount_is_rejected_and_existing_kept() {
        let (app, _) = setup();
        app.create_product.execute(create_request("k1")).await.unwrap();
        app.activate_product
            .execute(ActivateProductRequest { product_id: "k1".into() })
            .await
            .unwrap();
        app.apply_discount
            .execute(discount("k1", 50, now() - Duration::hours(1), now() + Duration::hours(24)))
            .await
            .unwrap();

        let err = app
            .apply_discount
            .execute(discount("k1", 10, now(), now() + Duration::hours(2)))
            .await
            .unwrap_err();
        assert_eq!(err, UseCaseError::Domain(DomainError::DiscountOverlaps));

        let dto = app.get_product.execute("k1").await.unwrap();
        assert_eq!(dto.discount_percent.as_deref(), Some("50.00"));
        assert_eq!(dto.discount_end_date, Some(now() + Duration::hours(24)));
        assert_eq!(outbox_event_types(&app).len(), 3);
    }

    #[tokio::test]
    async fn relay_publishes_committed_events_in_order() {
        let (app, _) = setup();
        let sub = app.bus.subscribe();

        app.create_product.execute(create_request("k1")).await.unwrap();
        app.activate_product
            .execute(ActivateProductRequest { product_id: "k1".into() })
            .await
            .unwrap();
        app.archive_product
            .execute(ArchiveProductRequest { product_id: "k1".into() })
            .await
            .unwrap();

        assert_eq!(app.relay.drain().await.unwrap(), 3);
        let published: Vec<String> = (0..3)
            .map(|_| sub.try_recv().unwrap().event_type().to_string())
            .collect();
        assert_eq!(published, vec!["product.created", "product.activated", "product.archived"]);
        assert!(sub.try_recv().is_err());
        assert_eq!(app.relay.run_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn archived_product_is_frozen_and_hidden_from_lists() {
        let (app, _) = setup();
        app.create_product.execute(create_request("k1")).await.unwrap();
        app.create_product.execute(create_request("k2")).await.unwrap();
        app.archive_product
            .execute(ArchiveProductRequest { product_id: "k1".into() })
            .await
            .unwrap();

        let err = app
            .activate_product
            .execute(ActivateProductRequest { product_id: "k1".into() })
            .await
            .unwrap_err();
        assert_eq!(err, UseCaseError::Domain(DomainError::ProductArchived));

        let dto = app.get_product.execute("k1").await.unwrap();
        assert_eq!(dto.status, ProductStatus::Archived.as_str());
        assert_eq!(dto.archived_at, Some(now()));

        let listed = app.list_products.execute(ListProductsFilter::default()).await.unwrap();
        let ids: Vec<&str> = listed.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["k2"]);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found_everywhere() {
        let (app, _) = setup();
        assert_eq!(
            app.activate_product
                .execute(ActivateProductRequest { product_id: "ghost".into() })
                .await,
            Err(UseCaseError::NotFound("ghost".into()))
        );
        assert_eq!(
            app.get_product.execute("ghost").await,
            Err(UseCaseError::NotFound("ghost".into()))
        );
        assert!(outbox_event_types(&app).is_empty());
    }
}
