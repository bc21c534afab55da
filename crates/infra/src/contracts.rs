//! Collaborator contracts used by the application layer.
//!
//! Repositories never write on their own: they read, or they turn an aggregate
//! into a `Mutation` for the caller to put in a `Plan`. Only a `Committer`
//! makes anything durable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use async_trait::async_trait;
use catalog_core::EventId;
use catalog_events::OutboxEnvelope;
use catalog_products::Product;

use crate::unit_of_work::Mutation;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored row could not be mapped back to the domain.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// A domain value cannot be represented in storage.
    #[error("cannot encode: {0}")]
    Encode(String),

    #[error("storage lock poisoned")]
    Poisoned,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load a clean aggregate (no dirty fields, no pending events).
    async fn get_by_id(&self, id: &str) -> Result<Product, RepositoryError>;

    /// Full-row insert for a newly created product.
    fn insert_mut(&self, product: &Product) -> Result<Box<dyn Mutation>, RepositoryError>;

    /// Differential update from the product's dirty fields; `Ok(None)` if nothing changed.
    fn update_mut(&self, product: &Product) -> Result<Option<Box<dyn Mutation>>, RepositoryError>;
}

pub trait OutboxRepository: Send + Sync {
    fn insert_mut(
        &self,
        event_id: EventId,
        event_type: &str,
        aggregate_id: &str,
        payload: JsonValue,
    ) -> Box<dyn Mutation>;

    fn mark_processed_mut(&self, event_id: EventId, processed_at: DateTime<Utc>) -> Box<dyn Mutation>;
}

#[async_trait]
pub trait OutboxReader: Send + Sync {
    /// Unprocessed rows, oldest first, at most `limit`.
    async fn pending(&self, limit: usize) -> Result<Vec<OutboxEnvelope>, RepositoryError>;
}

/// Query-side view of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub base_price_numerator: i64,
    pub base_price_denominator: i64,
    pub effective_price_numerator: i64,
    pub effective_price_denominator: i64,
    /// Percent with two decimals, only while the discount is in effect.
    pub discount_percent: Option<String>,
    pub discount_start_date: Option<DateTime<Utc>>,
    pub discount_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsFilter {
    pub category: Option<String>,
    pub only_active: bool,
    /// 0 means the configured default page size.
    pub limit: usize,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsResult {
    pub items: Vec<ProductDto>,
    pub next_page_token: Option<String>,
}

#[async_trait]
pub trait ProductReadModel: Send + Sync {
    async fn get_product(&self, id: &str) -> Result<ProductDto, RepositoryError>;

    async fn list_products(&self, filter: &ListProductsFilter) -> Result<ListProductsResult, RepositoryError>;
}
