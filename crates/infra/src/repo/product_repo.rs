use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::Clock;
use catalog_products::Product;

use crate::contracts::{ProductRepository, RepositoryError};
use crate::models::product::{insert_row, product_from_row, update_row};
use crate::store::{InMemoryDatabase, StoreMutation, Table};
use crate::unit_of_work::Mutation;

pub struct StoreProductRepository {
    db: Arc<InMemoryDatabase>,
    clock: Arc<dyn Clock>,
}

impl StoreProductRepository {
    pub fn new(db: Arc<InMemoryDatabase>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn get_by_id(&self, id: &str) -> Result<Product, RepositoryError> {
        let row = self
            .db
            .get(Table::Products, id)?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        product_from_row(&row)
    }

    fn insert_mut(&self, product: &Product) -> Result<Box<dyn Mutation>, RepositoryError> {
        let row = insert_row(product, self.clock.now())?;
        Ok(StoreMutation::insert(Table::Products, row).boxed())
    }

    fn update_mut(&self, product: &Product) -> Result<Option<Box<dyn Mutation>>, RepositoryError> {
        let row = update_row(product, self.clock.now())?;
        Ok(row.map(|row| StoreMutation::update(Table::Products, row).boxed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WriteOp;
    use crate::unit_of_work::{Committer, Plan};
    use catalog_core::FixedClock;
    use catalog_products::Money;
    use chrono::{TimeZone, Utc};

    fn setup() -> (Arc<InMemoryDatabase>, StoreProductRepository) {
        let db = Arc::new(InMemoryDatabase::new());
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()));
        (db.clone(), StoreProductRepository::new(db, clock))
    }

    fn lamp() -> Product {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Product::create("p1", "Lamp", "", "lighting", Money::from_fraction(100, 1).unwrap(), now).unwrap()
    }

    fn as_store(m: &dyn Mutation) -> &StoreMutation {
        m.as_any().downcast_ref::<StoreMutation>().unwrap()
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let (_, repo) = setup();
        assert_eq!(
            repo.get_by_id("nope").await.unwrap_err(),
            RepositoryError::NotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn inserted_product_loads_clean() {
        let (db, repo) = setup();
        let m = repo.insert_mut(&lamp()).unwrap();
        assert_eq!(as_store(m.as_ref()).op(), WriteOp::Insert);

        let mut plan = Plan::new();
        plan.add(m);
        db.apply(plan).await.unwrap();

        let loaded = repo.get_by_id("p1").await.unwrap();
        assert_eq!(loaded.name(), "Lamp");
        assert!(loaded.changes().is_empty());
        assert!(repo.update_mut(&loaded).unwrap().is_none());
    }

    #[tokio::test]
    async fn update_mut_carries_dirty_columns() {
        let (_, repo) = setup();
        let mut p = lamp();
        p.activate(Utc::now()).unwrap();

        let m = repo.update_mut(&p).unwrap().unwrap();
        let m = as_store(m.as_ref());
        assert_eq!(m.op(), WriteOp::Update);
        assert_eq!(m.row()["status"], "active");
    }
}
