use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateProductRequest {
    pub product_id: String,
}

pub struct ActivateProductInteractor {
    deps: UseCaseDeps,
}

impl ActivateProductInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: ActivateProductRequest) -> Result<(), UseCaseError> {
        let mut product = self.deps.load(&req.product_id).await?;
        product.activate(self.deps.clock.now())?;
        self.deps.commit("activate_product", &mut product, Persist::Update).await
    }
}
