use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeactivateProductRequest {
    pub product_id: String,
}

pub struct DeactivateProductInteractor {
    deps: UseCaseDeps,
}

impl DeactivateProductInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: DeactivateProductRequest) -> Result<(), UseCaseError> {
        let mut product = self.deps.load(&req.product_id).await?;
        product.deactivate(self.deps.clock.now())?;
        self.deps.commit("deactivate_product", &mut product, Persist::Update).await
    }
}
