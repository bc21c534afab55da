//! Product read model computed straight from the `products` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use catalog_core::Clock;
use catalog_products::money::decimal_string;
use catalog_products::{PricingCalculator, ProductStatus};

use crate::config::CatalogConfig;
use crate::contracts::{ListProductsFilter, ListProductsResult, ProductDto, ProductReadModel, RepositoryError};
use crate::models::product::{CREATED_AT, PRODUCT_ID, UPDATED_AT, price_fraction, product_from_row};
use crate::models::{Row, time_col};
use crate::store::{InMemoryDatabase, Table};

pub struct InMemoryReadModel {
    db: Arc<InMemoryDatabase>,
    clock: Arc<dyn Clock>,
    config: CatalogConfig,
    pricing: PricingCalculator,
}

impl InMemoryReadModel {
    pub fn new(db: Arc<InMemoryDatabase>, clock: Arc<dyn Clock>, config: CatalogConfig) -> Self {
        Self {
            db,
            clock,
            config,
            pricing: PricingCalculator::new(),
        }
    }

    fn to_dto(&self, row: &Row, now: DateTime<Utc>) -> Result<ProductDto, RepositoryError> {
        let product = product_from_row(row)?;
        let (base_num, base_den) = price_fraction("base price", product.base_price())?;
        let (eff_num, eff_den) = price_fraction("effective price", &self.pricing.effective_price(&product, now))?;
        let active_discount = product.discount().filter(|d| d.is_valid_at(now));

        Ok(ProductDto {
            id: product.product_id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            category: product.category().to_string(),
            status: product.status().to_string(),
            base_price_numerator: base_num,
            base_price_denominator: base_den,
            effective_price_numerator: eff_num,
            effective_price_denominator: eff_den,
            discount_percent: active_discount.map(|d| decimal_string(d.percent(), 2)),
            discount_start_date: active_discount.map(|d| d.start()),
            discount_end_date: active_discount.map(|d| d.end()),
            created_at: time_col(row, CREATED_AT)?,
            updated_at: time_col(row, UPDATED_AT)?,
            archived_at: product.archived_at(),
        })
    }
}

fn parse_page_token(token: Option<&str>) -> Result<usize, RepositoryError> {
    match token {
        None | Some("") => Ok(0),
        Some(t) => t
            .parse()
            .map_err(|_| RepositoryError::Corrupt(format!("invalid page token '{t}'"))),
    }
}

#[async_trait]
impl ProductReadModel for InMemoryReadModel {
    async fn get_product(&self, id: &str) -> Result<ProductDto, RepositoryError> {
        let row = self
            .db
            .get(Table::Products, id)?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        self.to_dto(&row, self.clock.now())
    }

    async fn list_products(&self, filter: &ListProductsFilter) -> Result<ListProductsResult, RepositoryError> {
        let now = self.clock.now();
        let offset = parse_page_token(filter.page_token.as_deref())?;
        let page_size = self.config.page_size(filter.limit);

        // A row that cannot be rendered is skipped, not allowed to fail the page.
        let mut items: Vec<ProductDto> = self
            .db
            .scan(Table::Products)?
            .iter()
            .filter_map(|row| match self.to_dto(row, now) {
                Ok(dto) => Some(dto),
                Err(err) => {
                    warn!(product_id = ?row.get(PRODUCT_ID), error = %err, "skipping unreadable product row");
                    None
                }
            })
            .filter(|dto| {
                dto.status != ProductStatus::Archived.as_str()
                    && (!filter.only_active || dto.status == ProductStatus::Active.as_str())
                    && filter.category.as_deref().is_none_or(|c| dto.category == c)
            })
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        let total = items.len();
        let page: Vec<ProductDto> = items.into_iter().skip(offset).take(page_size).collect();
        let next = offset + page.len();
        let next_page_token = (next < total).then(|| next.to_string());

        Ok(ListProductsResult {
            items: page,
            next_page_token,
        })
    }
}
