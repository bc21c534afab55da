//! Query handlers over the product read model.

use std::sync::Arc;

use crate::contracts::{ListProductsFilter, ListProductsResult, ProductDto, ProductReadModel};
use crate::usecases::UseCaseError;

pub struct GetProductQuery {
    read_model: Arc<dyn ProductReadModel>,
}

impl GetProductQuery {
    pub fn new(read_model: Arc<dyn ProductReadModel>) -> Self {
        Self { read_model }
    }

    pub async fn execute(&self, product_id: &str) -> Result<ProductDto, UseCaseError> {
        Ok(self.read_model.get_product(product_id).await?)
    }
}

pub struct ListProductsQuery {
    read_model: Arc<dyn ProductReadModel>,
}

impl ListProductsQuery {
    pub fn new(read_model: Arc<dyn ProductReadModel>) -> Self {
        Self { read_model }
    }

    pub async fn execute(&self, filter: ListProductsFilter) -> Result<ListProductsResult, UseCaseError> {
        Ok(self.read_model.list_products(&filter).await?)
    }
}
