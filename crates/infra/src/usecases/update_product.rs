use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProductRequest {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

pub struct UpdateProductInteractor {
    deps: UseCaseDeps,
}

impl UpdateProductInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: UpdateProductRequest) -> Result<(), UseCaseError> {
        let mut product = self.deps.load(&req.product_id).await?;
        product.update_details(&req.name, &req.description, &req.category, self.deps.clock.now())?;
        self.deps.commit("update_product", &mut product, Persist::Update).await
    }
}
