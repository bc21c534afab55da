use uuid::Uuid;

use catalog_products::{Money, Product};

use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProductRequest {
    /// Caller-chosen id; a UUIDv7 is generated when absent.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price_numerator: i64,
    pub base_price_denominator: i64,
}

pub struct CreateProductInteractor {
    deps: UseCaseDeps,
}

impl CreateProductInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    /// Returns the id of the new product.
    pub async fn execute(&self, req: CreateProductRequest) -> Result<String, UseCaseError> {
        let base_price = Money::from_fraction(req.base_price_numerator, req.base_price_denominator)?;
        let id = req.id.unwrap_or_else(|| Uuid::now_v7().to_string());

        let mut product = Product::create(
            id,
            req.name,
            req.description,
            req.category,
            base_price,
            self.deps.clock.now(),
        )?;

        self.deps.commit("create_product", &mut product, Persist::Insert).await?;
        Ok(product.product_id().to_string())
    }
}
