//! Use-case interactors (application-level orchestration).
//!
//! Every interactor follows the same pipeline:
//!
//! ```text
//! Request
//!   ↓
//! 1. Load the product (or construct it, for create)
//!   ↓
//! 2. Invoke exactly one aggregate operation at `clock.now()`
//!   ↓
//! 3. Serialize recorded events into outbox inserts
//!   ↓
//! 4. Plan = [product insert/update, outbox inserts...]
//!   ↓
//! 5. Committer::apply(plan), then clear the aggregate's events
//! ```
//!
//! A failure at step 2 or 3 returns before a plan exists, so nothing reaches
//! storage. A commit failure is returned as-is; the committer guarantees nothing
//! from the plan is visible.

pub mod activate_product;
pub mod apply_discount;
pub mod archive_product;
pub mod create_product;
pub mod deactivate_product;
pub mod remove_discount;
pub mod update_product;

use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use catalog_core::{AggregateRoot, Clock, DomainError, EventId};
use catalog_events::DomainEvent;
use catalog_products::{Product, ProductEvent};

use crate::contracts::{OutboxRepository, ProductRepository, RepositoryError};
use crate::unit_of_work::{CommitError, Committer, Plan};

pub use activate_product::{ActivateProductInteractor, ActivateProductRequest};
pub use apply_discount::{ApplyDiscountInteractor, ApplyDiscountRequest};
pub use archive_product::{ArchiveProductInteractor, ArchiveProductRequest};
pub use create_product::{CreateProductInteractor, CreateProductRequest};
pub use deactivate_product::{DeactivateProductInteractor, DeactivateProductRequest};
pub use remove_discount::{RemoveDiscountInteractor, RemoveDiscountRequest};
pub use update_product::{UpdateProductInteractor, UpdateProductRequest};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("product not found: {0}")]
    NotFound(String),

    #[error("repository: {0}")]
    Repository(RepositoryError),

    #[error("event serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => UseCaseError::NotFound(id),
            other => UseCaseError::Repository(other),
        }
    }
}

/// Encodes a recorded event as its outbox payload.
pub trait EventSerializer: Send + Sync {
    fn to_payload(&self, event: &ProductEvent) -> Result<JsonValue, String>;
}

/// The event's own fields as a JSON object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEventSerializer;

impl EventSerializer for JsonEventSerializer {
    fn to_payload(&self, event: &ProductEvent) -> Result<JsonValue, String> {
        serde_json::to_value(event).map_err(|e| e.to_string())
    }
}

/// Collaborators shared by every interactor.
#[derive(Clone)]
pub struct UseCaseDeps {
    pub products: Arc<dyn ProductRepository>,
    pub outbox: Arc<dyn OutboxRepository>,
    pub committer: Arc<dyn Committer>,
    pub serializer: Arc<dyn EventSerializer>,
    pub clock: Arc<dyn Clock>,
}

/// How the product row itself is written.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Persist {
    Insert,
    Update,
}

impl UseCaseDeps {
    pub(crate) async fn load(&self, id: &str) -> Result<Product, UseCaseError> {
        Ok(self.products.get_by_id(id).await?)
    }

    /// Build the plan for `product`'s pending changes and apply it.
    pub(crate) async fn commit(
        &self,
        operation: &'static str,
        product: &mut Product,
        persist: Persist,
    ) -> Result<(), UseCaseError> {
        let events = product.domain_events();
        let product_id = product.product_id().to_string();

        let mut outbox = Vec::with_capacity(events.len());
        for event in &events {
            let payload = self.serializer.to_payload(event).map_err(|e| {
                tracing::warn!(
                    operation,
                    product_id = %product_id,
                    event_type = event.event_type(),
                    error = %e,
                    "event serialization failed"
                );
                UseCaseError::Serialization(e)
            })?;
            outbox.push(
                self.outbox
                    .insert_mut(EventId::new(), event.event_type(), event.aggregate_id(), payload),
            );
        }

        let mut plan = Plan::new();
        match persist {
            Persist::Insert => plan.add(self.products.insert_mut(product)?),
            Persist::Update => plan.add(self.products.update_mut(product)?),
        }
        for mutation in outbox {
            plan.add(mutation);
        }

        if plan.is_empty() {
            tracing::debug!(operation, product_id = %product_id, "no changes to commit");
        }

        if let Err(e) = self.committer.apply(plan).await {
            tracing::warn!(operation, product_id = %product_id, error = %e, "commit failed");
            return Err(e.into());
        }

        product.clear_domain_events();
        if !events.is_empty() {
            tracing::info!(operation, product_id = %product_id, events = events.len(), "product committed");
        }
        Ok(())
    }
}
