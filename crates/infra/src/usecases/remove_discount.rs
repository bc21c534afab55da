use super::{Persist, UseCaseDeps, UseCaseError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveDiscountRequest {
    pub product_id: String,
}

pub struct RemoveDiscountInteractor {
    deps: UseCaseDeps,
}

impl RemoveDiscountInteractor {
    pub fn new(deps: UseCaseDeps) -> Self {
        Self { deps }
    }

    pub async fn execute(&self, req: RemoveDiscountRequest) -> Result<(), UseCaseError> {
        let mut product = self.deps.load(&req.product_id).await?;
        product.remove_discount(self.deps.clock.now())?;
        self.deps.commit("remove_discount", &mut product, Persist::Update).await
    }
}
